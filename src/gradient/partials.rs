use crate::activation::sigmoid::sigmoid_prime;
use crate::error::{NetworkError, Result};
use crate::math::matrix::Matrix;
use crate::network::network::Network;

/// Explicit chain-rule partials for a network with exactly one hidden layer
/// (input `k`, hidden `j`, output `i`).
///
/// Every entry is derived from scratch: net inputs are re-summed from the
/// activations and weights for each weight instead of reusing the error
/// signals of the backward sweep. This is quadratic in the weight count and
/// only exists to cross-check [`super::backprop::backprop`].
///
/// Returns the descent direction `-dE/dw` as `[input->hidden, hidden->output]`.
pub fn compute_partials(network: &Network, expected: &[f64]) -> Result<Vec<Matrix>> {
    let topology = network.topology();
    if topology.hidden_layer_count() != 1 {
        return Err(NetworkError::UnsupportedTopology {
            hidden: topology.hidden_layer_count(),
        });
    }
    assert_eq!(
        expected.len(),
        topology.output_width(),
        "expected output length does not match the output layer"
    );

    let activations = network.activations();
    let (input, hidden, output) = (&activations[0], &activations[1], &activations[2]);
    let lower = network.weights().layer(0);
    let upper = network.weights().layer(1);

    let output_theta = |i: usize| -> f64 {
        hidden.iter().enumerate().map(|(j, a)| a * upper.get(j, i)).sum()
    };
    let hidden_theta = |j: usize| -> f64 {
        input.iter().enumerate().map(|(k, a)| a * lower.get(k, j)).sum()
    };

    // dE/dw_ji = -(T_i - F_i) f'(theta_i) h_j
    let mut upper_partials = Matrix::zeros(hidden.len(), output.len());
    for j in 0..hidden.len() {
        for i in 0..output.len() {
            let error = expected[i] - output[i];
            upper_partials.set(j, i, hidden[j] * error * sigmoid_prime(output_theta(i)));
        }
    }

    // dE/dw_kj = -a_k f'(theta_j) sum_i (T_i - F_i) f'(theta_i) w_ji
    let mut lower_partials = Matrix::zeros(input.len(), hidden.len());
    for k in 0..input.len() {
        for j in 0..hidden.len() {
            let mut downstream = 0.0;
            for i in 0..output.len() {
                let error = expected[i] - output[i];
                downstream += error * sigmoid_prime(output_theta(i)) * upper.get(j, i);
            }
            lower_partials.set(k, j, input[k] * sigmoid_prime(hidden_theta(j)) * downstream);
        }
    }

    Ok(vec![lower_partials, upper_partials])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gradient::check::max_abs_difference;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn agrees_with_backprop_direction() {
        let mut network = Network::build(vec![3, 4, 2]).unwrap();
        network.randomize_weights_with(&mut StdRng::seed_from_u64(21), -1.5, 1.5);
        network.forward(&[0.2, 0.9, -0.3]);

        let explicit = network.compute_partials(&[1.0, 0.0]).unwrap();
        network.backprop(&[1.0, 0.0], 0.5);

        assert!(max_abs_difference(&explicit, network.last_gradient()) < 1e-9);
    }

    #[test]
    fn does_not_mutate_weights() {
        let mut network = Network::build(vec![2, 2, 1]).unwrap();
        network.randomize_weights_with(&mut StdRng::seed_from_u64(2), -1.0, 1.0);
        network.forward(&[1.0, 1.0]);
        let before = network.current_weights();
        network.compute_partials(&[1.0]).unwrap();
        assert_eq!(network.current_weights(), before);
    }

    #[test]
    fn rejects_deeper_networks() {
        let mut network = Network::build(vec![2, 2, 2, 1]).unwrap();
        network.forward(&[0.0, 1.0]);
        assert!(matches!(
            network.compute_partials(&[1.0]),
            Err(NetworkError::UnsupportedTopology { hidden: 2 })
        ));
    }
}
