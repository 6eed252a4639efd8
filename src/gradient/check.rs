use crate::loss::squared_error::SquaredError;
use crate::math::matrix::Matrix;
use crate::network::network::Network;

/// Central-difference estimate of the descent direction `-dE/dw` for one
/// case, where `E = 0.5 * sum (T - F)^2`.
///
/// Works on a private copy, so `network`'s weights and buffers are untouched.
pub fn numeric_gradient(network: &Network, input: &[f64], expected: &[f64], epsilon: f64) -> Vec<Matrix> {
    let mut perturbed = network.clone();
    let mut gradient: Vec<Matrix> = network.weights()
        .layers()
        .iter()
        .map(|m| Matrix::zeros(m.rows, m.cols))
        .collect();

    for (layer, matrix) in gradient.iter_mut().enumerate() {
        for s in 0..matrix.rows {
            for d in 0..matrix.cols {
                let original = perturbed.weights.layer(layer).get(s, d);

                perturbed.weights.layer_mut(layer).set(s, d, original + epsilon);
                let plus = SquaredError::loss(expected, perturbed.forward(input));

                perturbed.weights.layer_mut(layer).set(s, d, original - epsilon);
                let minus = SquaredError::loss(expected, perturbed.forward(input));

                perturbed.weights.layer_mut(layer).set(s, d, original);
                matrix.set(s, d, -(plus - minus) / (2.0 * epsilon));
            }
        }
    }

    gradient
}

/// Largest absolute element-wise difference between two same-shaped tensors.
pub fn max_abs_difference(a: &[Matrix], b: &[Matrix]) -> f64 {
    assert_eq!(a.len(), b.len(), "tensors have different layer counts");
    a.iter()
        .zip(b)
        .flat_map(|(x, y)| {
            assert!(x.same_shape(y), "tensors have different layer shapes");
            x.values().zip(y.values()).map(|(p, q)| (p - q).abs())
        })
        .fold(0.0, f64::max)
}
