use std::io::BufRead;

use serde::{Serialize, Deserialize};

use crate::dataset::case::TrainingCase;
use crate::error::{NetworkError, Result};

/// Plain-text training set split over two files with one case per line:
/// the inputs in `activations`, the expected outputs in `truths`. Values on
/// a line are separated by spaces, the same layout `write_outputs` produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseFiles {
    pub activations: String,
    pub truths: String,
}

impl CaseFiles {
    pub fn load(&self) -> Result<Vec<TrainingCase>> {
        let inputs = load_table(&self.activations)?;
        let expected = load_table(&self.truths)?;
        zip_cases(inputs, expected)
    }
}

/// Reads one row per non-blank line. Line numbers in errors start at 1.
pub fn read_table<R: BufRead>(reader: R) -> Result<Vec<Vec<f64>>> {
    let mut rows = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let row = line
            .split_whitespace()
            .map(|token| {
                token.parse::<f64>().map_err(|_| NetworkError::InvalidNumber {
                    line: index + 1,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }
    Ok(rows)
}

pub fn load_table(path: &str) -> Result<Vec<Vec<f64>>> {
    let file = std::fs::File::open(path)?;
    read_table(std::io::BufReader::new(file))
}

/// Pairs input rows with expected-output rows. Widths are checked later
/// against the topology.
pub fn zip_cases(inputs: Vec<Vec<f64>>, expected: Vec<Vec<f64>>) -> Result<Vec<TrainingCase>> {
    if inputs.len() != expected.len() {
        return Err(NetworkError::CaseCountMismatch {
            inputs: inputs.len(),
            expected: expected.len(),
        });
    }
    Ok(inputs
        .into_iter()
        .zip(expected)
        .map(|(input, expected)| TrainingCase::new(input, expected))
        .collect())
}
