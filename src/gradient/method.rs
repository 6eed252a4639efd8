use serde::{Serialize, Deserialize};

use crate::error::{NetworkError, Result};
use crate::gradient::{backprop::backprop, partials::compute_partials};
use crate::network::network::Network;
use crate::network::topology::Topology;

/// Selects how the trainer turns one case's error into a weight update.
///
/// - `AnalyticBackprop`: reverse sweep, linear in the weight count; any depth.
/// - `ExplicitPartials`: closed-form partials re-derived per weight; exactly
///   one hidden layer. Kept to validate the analytic path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientMethod {
    #[default]
    AnalyticBackprop,
    ExplicitPartials,
}

impl GradientMethod {
    /// Fails if this method cannot train a network shaped like `topology`.
    pub fn check(&self, topology: &Topology) -> Result<()> {
        match self {
            GradientMethod::AnalyticBackprop => Ok(()),
            GradientMethod::ExplicitPartials if topology.hidden_layer_count() == 1 => Ok(()),
            GradientMethod::ExplicitPartials => Err(NetworkError::UnsupportedTopology {
                hidden: topology.hidden_layer_count(),
            }),
        }
    }

    /// Applies one update of step `lambda` for the case that was just run
    /// forward through `network`.
    pub fn descend(&self, network: &mut Network, expected: &[f64], lambda: f64) -> Result<()> {
        match self {
            GradientMethod::AnalyticBackprop => {
                backprop(network, expected, lambda);
                Ok(())
            }
            GradientMethod::ExplicitPartials => {
                let partials = compute_partials(network, expected)?;
                network.apply_partials(partials, lambda);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn both_methods_take_the_same_step() {
        let mut analytic = Network::build(vec![2, 3, 1]).unwrap();
        analytic.randomize_weights_with(&mut StdRng::seed_from_u64(8), -1.5, 1.5);
        let mut explicit = analytic.clone();

        analytic.forward(&[1.0, 0.0]);
        GradientMethod::AnalyticBackprop.descend(&mut analytic, &[1.0], 0.5).unwrap();
        explicit.forward(&[1.0, 0.0]);
        GradientMethod::ExplicitPartials.descend(&mut explicit, &[1.0], 0.5).unwrap();

        let a = analytic.current_weights();
        let e = explicit.current_weights();
        for (la, le) in a.iter().flatten().flatten().zip(e.iter().flatten().flatten()) {
            assert!((la - le).abs() < 1e-12);
        }
    }

    #[test]
    fn explicit_partials_refuse_two_hidden_layers() {
        let topology = Topology::new(vec![2, 2, 2, 1]).unwrap();
        assert!(GradientMethod::AnalyticBackprop.check(&topology).is_ok());
        assert!(matches!(
            GradientMethod::ExplicitPartials.check(&topology),
            Err(NetworkError::UnsupportedTopology { hidden: 2 })
        ));
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&GradientMethod::ExplicitPartials).unwrap();
        assert_eq!(json, "\"explicit_partials\"");
    }
}
