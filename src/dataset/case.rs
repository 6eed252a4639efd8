use serde::{Serialize, Deserialize};

use crate::error::{NetworkError, Result};
use crate::network::topology::Topology;

/// One input vector and the output the network should produce for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingCase {
    pub input: Vec<f64>,
    pub expected: Vec<f64>,
}

impl TrainingCase {
    pub fn new(input: Vec<f64>, expected: Vec<f64>) -> TrainingCase {
        TrainingCase { input, expected }
    }
}

/// Checks every case against the input and output widths of `topology`.
pub fn validate_cases(topology: &Topology, cases: &[TrainingCase]) -> Result<()> {
    for (case, tc) in cases.iter().enumerate() {
        if tc.input.len() != topology.input_width() {
            return Err(NetworkError::DimensionMismatch {
                case,
                what: "input",
                expected: topology.input_width(),
                actual: tc.input.len(),
            });
        }
        if tc.expected.len() != topology.output_width() {
            return Err(NetworkError::DimensionMismatch {
                case,
                what: "expected output",
                expected: topology.output_width(),
                actual: tc.expected.len(),
            });
        }
    }
    Ok(())
}

/// Truth table for logical AND over two inputs.
pub fn and_table() -> Vec<TrainingCase> {
    vec![
        TrainingCase::new(vec![0.0, 0.0], vec![0.0]),
        TrainingCase::new(vec![0.0, 1.0], vec![0.0]),
        TrainingCase::new(vec![1.0, 0.0], vec![0.0]),
        TrainingCase::new(vec![1.0, 1.0], vec![1.0]),
    ]
}
