use crate::math::matrix::Matrix;
use crate::network::topology::Topology;

/// Per-layer scratch state rebuilt on every forward/backward pass.
///
/// All vectors are indexed by activation layer. The input layer has no net
/// input or error signal, so `theta[0]`, `omega[0]` and `psi[0]` stay empty.
#[derive(Debug, Clone)]
pub struct ActivationBuffer {
    pub activations: Vec<Vec<f64>>,
    pub theta: Vec<Vec<f64>>,
    pub omega: Vec<Vec<f64>>,
    pub psi: Vec<Vec<f64>>,
    /// Descent direction `-dE/dw` applied by the last backward pass, shaped
    /// like the weight store.
    pub partials: Vec<Matrix>,
}

impl ActivationBuffer {
    pub fn new(topology: &Topology) -> ActivationBuffer {
        let activations: Vec<Vec<f64>> = topology.widths()
            .iter()
            .map(|&w| vec![0.0; w])
            .collect();
        let per_node: Vec<Vec<f64>> = topology.widths()
            .iter()
            .enumerate()
            .map(|(layer, &w)| if layer == 0 { Vec::new() } else { vec![0.0; w] })
            .collect();
        let partials = topology.widths()
            .windows(2)
            .map(|pair| Matrix::zeros(pair[0], pair[1]))
            .collect();

        ActivationBuffer {
            activations,
            theta: per_node.clone(),
            omega: per_node.clone(),
            psi: per_node,
            partials,
        }
    }

    pub fn output(&self) -> &[f64] {
        &self.activations[self.activations.len() - 1]
    }
}
