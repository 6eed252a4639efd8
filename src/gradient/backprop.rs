use crate::activation::sigmoid::sigmoid_prime;
use crate::network::buffers::ActivationBuffer;
use crate::network::network::Network;

/// Reverse sweep from the output layer to the input layer, updating the
/// weights as it goes.
///
/// Each hidden node's error signal is read from the weights feeding out of
/// it *before* those weights are nudged, so the sweep yields the gradient of
/// the pre-update network while still applying every delta in place. The
/// descent direction for every weight is left in the network's `partials`
/// buffer.
///
/// # Panics
/// Panics if `expected` does not have one value per output node.
pub fn backprop(network: &mut Network, expected: &[f64], lambda: f64) {
    let last = network.topology.layer_count() - 1;
    assert_eq!(
        expected.len(),
        network.topology.output_width(),
        "expected output length does not match the output layer"
    );

    let Network { weights, buffers, .. } = network;
    let ActivationBuffer { activations, theta, omega, psi, partials } = buffers;

    // Output layer.
    for s in 0..activations[last].len() {
        omega[last][s] = expected[s] - activations[last][s];
        psi[last][s] = omega[last][s] * sigmoid_prime(theta[last][s]);
    }

    // Hidden layers, top down.
    for n in (1..last).rev() {
        let layer = weights.layer_mut(n);
        let direction = &mut partials[n];

        for s in 0..activations[n].len() {
            let mut signal = 0.0;
            for d in 0..activations[n + 1].len() {
                signal += psi[n + 1][d] * layer.data[s][d];

                let step = activations[n][s] * psi[n + 1][d];
                direction.data[s][d] = step;
                layer.data[s][d] += lambda * step;
            }
            omega[n][s] = signal;
            psi[n][s] = signal * sigmoid_prime(theta[n][s]);
        }
    }

    // Input layer.
    let layer = weights.layer_mut(0);
    let direction = &mut partials[0];
    for s in 0..activations[0].len() {
        for d in 0..activations[1].len() {
            let step = activations[0][s] * psi[1][d];
            direction.data[s][d] = step;
            layer.data[s][d] += lambda * step;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::network::network::Network;
    use approx::assert_abs_diff_eq;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn output_signals_follow_expected_minus_actual() {
        let mut network = Network::build(vec![2, 3, 2]).unwrap();
        network.randomize_weights_with(&mut StdRng::seed_from_u64(5), -1.0, 1.0);
        let output = network.forward(&[0.5, -0.5]).to_vec();

        network.backprop(&[1.0, 0.0], 0.1);

        let omega = &network.buffers.omega[2];
        assert_abs_diff_eq!(omega[0], 1.0 - output[0], epsilon = 1e-15);
        assert_abs_diff_eq!(omega[1], 0.0 - output[1], epsilon = 1e-15);
        let psi = &network.buffers.psi[2];
        assert_abs_diff_eq!(psi[0], omega[0] * output[0] * (1.0 - output[0]), epsilon = 1e-12);
    }

    #[test]
    fn applied_delta_is_lambda_times_direction() {
        let mut network = Network::build(vec![3, 4, 2, 2]).unwrap();
        network.randomize_weights_with(&mut StdRng::seed_from_u64(9), -1.0, 1.0);
        let before = network.current_weights();

        network.forward(&[0.1, 0.7, -0.4]);
        network.backprop(&[0.0, 1.0], 0.25);

        let after = network.current_weights();
        for (layer, direction) in network.last_gradient().iter().enumerate() {
            for s in 0..direction.rows {
                for d in 0..direction.cols {
                    let delta = after[layer][s][d] - before[layer][s][d];
                    assert_abs_diff_eq!(delta, 0.25 * direction.get(s, d), epsilon = 1e-12);
                }
            }
        }
    }

    #[test]
    fn zero_lambda_leaves_weights_untouched() {
        let mut network = Network::build(vec![2, 2, 1]).unwrap();
        network.randomize_weights_with(&mut StdRng::seed_from_u64(1), -1.5, 1.5);
        let before = network.current_weights();

        network.forward(&[1.0, 0.0]);
        network.backprop(&[1.0], 0.0);

        assert_eq!(network.current_weights(), before);
    }

    #[test]
    #[should_panic(expected = "expected output length")]
    fn rejects_wrong_expected_length() {
        let mut network = Network::build(vec![2, 2, 1]).unwrap();
        network.forward(&[1.0, 0.0]);
        network.backprop(&[1.0, 0.0], 0.5);
    }
}
