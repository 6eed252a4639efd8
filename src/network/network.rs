use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::activation::sigmoid::sigmoid;
use crate::error::Result;
use crate::gradient::{backprop, partials};
use crate::math::matrix::Matrix;
use crate::network::buffers::ActivationBuffer;
use crate::network::topology::Topology;
use crate::network::weights::WeightStore;

/// A fully connected sigmoid network without biases.
///
/// The network owns its weights and every per-layer scratch buffer, so a
/// single instance must not run two passes at once. Clone it to get an
/// independent copy.
#[derive(Debug, Clone)]
pub struct Network {
    pub(crate) topology: Topology,
    pub(crate) weights: WeightStore,
    pub(crate) buffers: ActivationBuffer,
}

/// On-disk form: only the topology and the weights. Scratch buffers are
/// rebuilt on load.
#[derive(Serialize)]
struct SavedNetworkRef<'a> {
    topology: &'a Topology,
    weights: &'a WeightStore,
}

#[derive(Deserialize)]
struct SavedNetwork {
    topology: Topology,
    weights: WeightStore,
}

impl Network {
    /// Builds a zero-weight network for the given layer widths.
    pub fn build(layer_widths: Vec<usize>) -> Result<Network> {
        Ok(Network::new(Topology::new(layer_widths)?))
    }

    pub fn new(topology: Topology) -> Network {
        let weights = WeightStore::zeros(&topology);
        let buffers = ActivationBuffer::new(&topology);
        Network { topology, weights, buffers }
    }

    /// Fills every weight with a uniform draw from `[low, high)`.
    ///
    /// # Panics
    /// Panics if `low >= high`.
    pub fn randomize_weights(&mut self, low: f64, high: f64) {
        self.randomize_weights_with(&mut rand::thread_rng(), low, high);
    }

    pub fn randomize_weights_with<R: Rng>(&mut self, rng: &mut R, low: f64, high: f64) {
        self.weights.randomize(low, high, rng);
    }

    /// Bulk replace, indexed `[layer][source][destination]`.
    pub fn set_weights(&mut self, tensor: &[Vec<Vec<f64>>]) -> Result<()> {
        self.weights.replace(tensor)
    }

    pub fn current_weights(&self) -> Vec<Vec<Vec<f64>>> {
        self.weights.to_tensor()
    }

    pub fn weights(&self) -> &WeightStore {
        &self.weights
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Forward pass. Recomputes every layer's net input and activation and
    /// returns the output layer.
    ///
    /// # Panics
    /// Panics if `input` does not have exactly one value per input node.
    pub fn forward(&mut self, input: &[f64]) -> &[f64] {
        assert_eq!(
            input.len(),
            self.topology.input_width(),
            "input length does not match the input layer"
        );

        let buf = &mut self.buffers;
        buf.activations[0].copy_from_slice(input);

        for n in 1..buf.activations.len() {
            let (upstream, downstream) = buf.activations.split_at_mut(n);
            let source = &upstream[n - 1];
            let dest = &mut downstream[0];
            let weights = self.weights.layer(n - 1);

            for (d, activation) in dest.iter_mut().enumerate() {
                let mut theta = 0.0;
                for (s, a) in source.iter().enumerate() {
                    theta += a * weights.data[s][d];
                }
                buf.theta[n][d] = theta;
                *activation = sigmoid(theta);
            }
        }

        buf.output()
    }

    /// Post-sigmoid values of every layer from the last forward pass.
    pub fn activations(&self) -> &[Vec<f64>] {
        &self.buffers.activations
    }

    /// Net inputs of every layer from the last forward pass; `[0]` is empty.
    pub fn net_inputs(&self) -> &[Vec<f64>] {
        &self.buffers.theta
    }

    pub fn output(&self) -> &[f64] {
        self.buffers.output()
    }

    /// Descent direction applied by the last weight update.
    pub fn last_gradient(&self) -> &[Matrix] {
        &self.buffers.partials
    }

    /// Analytic backpropagation for the case most recently passed to
    /// [`Network::forward`]. Weights are updated in place with step `lambda`.
    pub fn backprop(&mut self, expected: &[f64], lambda: f64) {
        backprop::backprop(self, expected, lambda);
    }

    /// Closed-form partials for a single-hidden-layer network, evaluated at
    /// the last forward pass. Does not touch the weights.
    pub fn compute_partials(&self, expected: &[f64]) -> Result<Vec<Matrix>> {
        partials::compute_partials(self, expected)
    }

    /// Applies `weights += lambda * partials` and records `partials` as the
    /// last gradient.
    pub(crate) fn apply_partials(&mut self, partials: Vec<Matrix>, lambda: f64) {
        for (layer, direction) in partials.iter().enumerate() {
            self.weights.layer_mut(layer).add_scaled(direction, lambda);
        }
        self.buffers.partials = partials;
    }

    /// Serializes the topology and weights to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        let saved = SavedNetworkRef { topology: &self.topology, weights: &self.weights };
        serde_json::to_writer_pretty(writer, &saved)?;
        Ok(())
    }

    /// Deserializes a network from a JSON file previously written by `save_json`.
    pub fn load_json(path: &str) -> Result<Network> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let saved: SavedNetwork = serde_json::from_reader(reader)?;

        let mut network = Network::new(saved.topology);
        if saved.weights.matches(&network.topology) {
            network.weights = saved.weights;
        } else {
            // Goes through the shape check to report which layer is off.
            network.set_weights(&saved.weights.to_tensor())?;
        }
        Ok(network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NetworkError;
    use approx::assert_abs_diff_eq;
    use rand::{rngs::StdRng, SeedableRng};

    fn reference_network() -> Network {
        let mut network = Network::build(vec![2, 2, 1]).unwrap();
        network.set_weights(&[
            vec![vec![0.739674399, 1.665815801], vec![1.321837369, 1.8005763]],
            vec![vec![0.089064485], vec![0.341737526]],
        ]).unwrap();
        network
    }

    #[test]
    fn forward_matches_hand_computed_values() {
        let mut network = reference_network();
        let output = network.forward(&[1.0, 1.0]).to_vec();
        assert_abs_diff_eq!(output[0], 0.601, epsilon = 1e-3);

        let hidden = &network.activations()[1];
        assert_abs_diff_eq!(hidden[0], 0.887, epsilon = 1e-3);
        assert_abs_diff_eq!(hidden[1], 0.970, epsilon = 1e-3);

        let theta = &network.net_inputs()[1];
        assert_abs_diff_eq!(theta[0], 0.739674399 + 1.321837369, epsilon = 1e-12);
    }

    #[test]
    fn forward_is_deterministic() {
        let mut network = Network::build(vec![3, 4, 4, 2]).unwrap();
        network.randomize_weights_with(&mut StdRng::seed_from_u64(11), -2.0, 2.0);

        let first = network.forward(&[0.3, -0.1, 0.9]).to_vec();
        network.forward(&[1.0, 1.0, 1.0]);
        let second = network.forward(&[0.3, -0.1, 0.9]).to_vec();
        assert_eq!(
            first.iter().map(|v| v.to_bits()).collect::<Vec<_>>(),
            second.iter().map(|v| v.to_bits()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn input_layer_holds_latest_input() {
        let mut network = reference_network();
        let output = network.forward(&[0.25, 0.75]).to_vec();
        assert_eq!(network.activations()[0], vec![0.25, 0.75]);
        assert_eq!(network.output(), &output[..]);
    }

    #[test]
    #[should_panic(expected = "input length")]
    fn forward_rejects_wrong_input_length() {
        let mut network = reference_network();
        network.forward(&[1.0]);
    }

    #[test]
    fn randomized_weights_stay_in_bounds() {
        let mut network = Network::build(vec![5, 8, 3, 2]).unwrap();
        for seed in 0..4 {
            network.randomize_weights_with(&mut StdRng::seed_from_u64(seed), -1.5, 1.5);
            assert!(network.weights().layers().iter().all(|m| m.values().all(|w| (-1.5..1.5).contains(&w))));
        }
        network.randomize_weights(0.0, 0.001);
        assert!(network.weights().layers().iter().all(|m| m.values().all(|w| (0.0..0.001).contains(&w))));
    }

    #[test]
    fn build_rejects_zero_width_layer() {
        assert!(matches!(
            Network::build(vec![2, 0, 1]),
            Err(NetworkError::InvalidTopology { .. })
        ));
    }

    #[test]
    fn json_round_trip_keeps_weights() {
        let network = reference_network();
        let path = std::env::temp_dir().join(format!("perceptron-net-{}-network.json", std::process::id()));
        let path = path.to_str().unwrap();

        network.save_json(path).unwrap();
        let mut loaded = Network::load_json(path).unwrap();
        std::fs::remove_file(path).unwrap();

        assert_eq!(loaded.topology(), network.topology());
        assert_eq!(loaded.current_weights(), network.current_weights());
        assert_abs_diff_eq!(loaded.forward(&[1.0, 1.0])[0], 0.601, epsilon = 1e-3);
    }

    #[test]
    fn load_rejects_weights_for_another_topology() {
        let topology = Topology::new(vec![2, 2, 1]).unwrap();
        let weights = WeightStore::zeros(&Topology::new(vec![2, 3, 1]).unwrap());
        let path = std::env::temp_dir().join(format!("perceptron-net-{}-mismatch.json", std::process::id()));
        let path = path.to_str().unwrap();

        let json = serde_json::to_string(&SavedNetworkRef { topology: &topology, weights: &weights }).unwrap();
        std::fs::write(path, json).unwrap();
        let result = Network::load_json(path);
        std::fs::remove_file(path).unwrap();

        assert!(matches!(
            result,
            Err(NetworkError::WeightShapeMismatch { layer: 0, expected_cols: 2, cols: 3, .. })
        ));
    }
}
