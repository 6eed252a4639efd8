use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::error::{NetworkError, Result};
use crate::math::matrix::Matrix;
use crate::network::topology::Topology;

/// One weight matrix per adjacent layer pair, each sized
/// `widths[i] x widths[i + 1]` (source-major, destination-minor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightStore {
    pub(crate) layers: Vec<Matrix>,
}

impl WeightStore {
    /// Allocates zeroed matrices matching `topology`.
    pub fn zeros(topology: &Topology) -> WeightStore {
        let layers = topology.widths()
            .windows(2)
            .map(|pair| Matrix::zeros(pair[0], pair[1]))
            .collect();
        WeightStore { layers }
    }

    pub fn randomize<R: Rng>(&mut self, low: f64, high: f64, rng: &mut R) {
        for matrix in &mut self.layers {
            matrix.fill_uniform(low, high, rng);
        }
    }

    /// Replaces every weight with the values from `tensor`, indexed
    /// `[layer][source][destination]`. Nothing is written unless the whole
    /// tensor matches the current shape.
    pub fn replace(&mut self, tensor: &[Vec<Vec<f64>>]) -> Result<()> {
        if tensor.len() != self.layers.len() {
            return Err(NetworkError::WeightLayerCountMismatch {
                expected: self.layers.len(),
                actual: tensor.len(),
            });
        }

        for (layer, (matrix, rows)) in self.layers.iter().zip(tensor).enumerate() {
            let bad_row = rows.iter().find(|row| row.len() != matrix.cols);
            if rows.len() != matrix.rows || bad_row.is_some() {
                return Err(NetworkError::WeightShapeMismatch {
                    layer,
                    expected_rows: matrix.rows,
                    expected_cols: matrix.cols,
                    rows: rows.len(),
                    cols: bad_row.map_or(matrix.cols, |row| row.len()),
                });
            }
        }

        for (matrix, rows) in self.layers.iter_mut().zip(tensor) {
            for (dest, src) in matrix.data.iter_mut().zip(rows) {
                dest.copy_from_slice(src);
            }
        }
        Ok(())
    }

    pub fn to_tensor(&self) -> Vec<Vec<Vec<f64>>> {
        self.layers.iter().map(|m| m.data.clone()).collect()
    }

    pub fn layer(&self, index: usize) -> &Matrix {
        &self.layers[index]
    }

    pub fn layers(&self) -> &[Matrix] {
        &self.layers
    }

    pub(crate) fn layer_mut(&mut self, index: usize) -> &mut Matrix {
        &mut self.layers[index]
    }

    /// True when the store has exactly the shape `topology` implies.
    pub fn matches(&self, topology: &Topology) -> bool {
        self.layers.len() == topology.weight_layer_count()
            && self.layers.iter().enumerate().all(|(i, m)| {
                m.rows == topology.width(i)
                    && m.cols == topology.width(i + 1)
                    && m.data.len() == m.rows
                    && m.data.iter().all(|row| row.len() == m.cols)
            })
    }
}
