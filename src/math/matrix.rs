use rand::Rng;
use serde::{Serialize, Deserialize};

/// Dense row-major matrix. For weights, rows index the source node and
/// columns the destination node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix{
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>
}

impl Matrix{
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix{
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows]
        }
    }

    /// Overwrites every entry in place with a draw from `[low, high)`.
    pub fn fill_uniform<R: Rng>(&mut self, low: f64, high: f64, rng: &mut R) {
        for row in self.data.iter_mut() {
            for value in row.iter_mut() {
                *value = rng.gen_range(low..high);
            }
        }
    }

    /// Builds a matrix from nested rows. Every row must have the same length
    /// as the first one.
    pub fn from_data(data: Vec<Vec<f64>>) -> Matrix {
        let cols = data.first().map_or(0, |row| row.len());
        assert!(
            data.iter().all(|row| row.len() == cols),
            "Matrix rows are of different lengths"
        );
        Matrix {
            rows: data.len(),
            cols,
            data
        }
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row][col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row][col] = value;
    }

    /// `self += factor * other`, element-wise.
    pub fn add_scaled(&mut self, other: &Matrix, factor: f64) {
        if self.rows != other.rows || self.cols != other.cols {
            panic!("Matrices are of incorrect sizes")
        }

        for (row, other_row) in self.data.iter_mut().zip(other.data.iter()) {
            for (value, delta) in row.iter_mut().zip(other_row.iter()) {
                *value += factor * delta;
            }
        }
    }

    /// Iterates over every entry, row by row.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().flat_map(|row| row.iter().copied())
    }

    pub fn same_shape(&self, other: &Matrix) -> bool {
        self.rows == other.rows && self.cols == other.cols
    }
}
