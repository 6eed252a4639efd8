use serde::{Serialize, Deserialize};

use crate::error::{NetworkError, Result};

/// Layer widths of a network, input first and output last.
///
/// Always holds at least two layers, and every layer has at least one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Topology {
    widths: Vec<usize>,
}

impl Topology {
    pub fn new(widths: Vec<usize>) -> Result<Topology> {
        if widths.len() < 2 {
            return Err(NetworkError::InvalidTopology {
                reason: format!("need at least 2 layers, got {}", widths.len()),
                widths,
            });
        }
        if let Some(layer) = widths.iter().position(|&w| w == 0) {
            return Err(NetworkError::InvalidTopology {
                reason: format!("layer {layer} has zero width"),
                widths,
            });
        }
        Ok(Topology { widths })
    }

    /// Builds a topology from an input width, a list of hidden widths and an
    /// output width.
    pub fn from_parts(input: usize, hidden: &[usize], output: usize) -> Result<Topology> {
        let mut widths = Vec::with_capacity(hidden.len() + 2);
        widths.push(input);
        widths.extend_from_slice(hidden);
        widths.push(output);
        Topology::new(widths)
    }

    pub fn widths(&self) -> &[usize] {
        &self.widths
    }

    pub fn width(&self, layer: usize) -> usize {
        self.widths[layer]
    }

    /// Number of activation layers, input and output included.
    pub fn layer_count(&self) -> usize {
        self.widths.len()
    }

    /// Number of weight matrices (adjacent layer pairs).
    pub fn weight_layer_count(&self) -> usize {
        self.widths.len() - 1
    }

    pub fn hidden_layer_count(&self) -> usize {
        self.widths.len() - 2
    }

    pub fn input_width(&self) -> usize {
        self.widths[0]
    }

    pub fn output_width(&self) -> usize {
        self.widths[self.widths.len() - 1]
    }

    /// Total number of weights across all layers.
    pub fn weight_count(&self) -> usize {
        self.widths.windows(2).map(|pair| pair[0] * pair[1]).sum()
    }
}

impl TryFrom<Vec<usize>> for Topology {
    type Error = NetworkError;

    fn try_from(widths: Vec<usize>) -> Result<Topology> {
        Topology::new(widths)
    }
}

impl From<Topology> for Vec<usize> {
    fn from(topology: Topology) -> Vec<usize> {
        topology.widths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_irregular_widths() {
        let t = Topology::new(vec![3, 7, 2, 5]).unwrap();
        assert_eq!(t.layer_count(), 4);
        assert_eq!(t.weight_layer_count(), 3);
        assert_eq!(t.hidden_layer_count(), 2);
        assert_eq!(t.weight_count(), 3 * 7 + 7 * 2 + 2 * 5);
        assert_eq!((t.input_width(), t.output_width()), (3, 5));
    }

    #[test]
    fn from_parts_orders_layers() {
        let t = Topology::from_parts(2, &[4, 3], 1).unwrap();
        assert_eq!(t.widths(), &[2, 4, 3, 1]);
    }

    #[test]
    fn rejects_single_layer() {
        let err = Topology::new(vec![4]).unwrap_err();
        assert!(matches!(err, NetworkError::InvalidTopology { .. }));
    }

    #[test]
    fn rejects_zero_width_hidden_layer() {
        let err = Topology::from_parts(2, &[0], 1).unwrap_err();
        match err {
            NetworkError::InvalidTopology { widths, reason } => {
                assert_eq!(widths, vec![2, 0, 1]);
                assert!(reason.contains("layer 1"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn deserializing_validates() {
        let ok: Topology = serde_json::from_str("[2, 2, 1]").unwrap();
        assert_eq!(ok.widths(), &[2, 2, 1]);
        assert!(serde_json::from_str::<Topology>("[2, 0, 1]").is_err());
    }
}
