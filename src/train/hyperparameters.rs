use serde::{Serialize, Deserialize};

use crate::error::{NetworkError, Result};
use crate::gradient::method::GradientMethod;

/// What the trainer does when a step raises the aggregate error.
///
/// - `AcceptAll`: keep every step (default).
/// - `RollbackOnIncrease`: restore the weights from before the step and stop
///   training in the `Stalled` state. Updates are deterministic, so retrying
///   would only repeat the same rejected step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepPolicy {
    #[default]
    AcceptAll,
    RollbackOnIncrease,
}

/// Immutable settings for one training run.
///
/// # Fields
/// - `lambda`: learning rate applied to every weight delta
/// - `minimum_error`: training stops once the aggregate error is at or below this
/// - `max_steps`: cap on full passes over the training set
/// - `weight_low`: inclusive lower bound for randomized weights
/// - `weight_high`: exclusive upper bound for randomized weights
/// - `seed`: seeds weight randomization when set
/// - `gradient`: how each case's update is computed
/// - `policy`: accept or roll back steps that raise the error
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hyperparameters {
    pub lambda: f64,
    pub minimum_error: f64,
    pub max_steps: usize,
    pub weight_low: f64,
    pub weight_high: f64,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub gradient: GradientMethod,
    #[serde(default)]
    pub policy: StepPolicy,
}

impl Hyperparameters {
    /// Creates settings with no seed, analytic backprop and the accept-all policy.
    pub fn new(lambda: f64, minimum_error: f64, max_steps: usize, weight_low: f64, weight_high: f64) -> Self {
        Hyperparameters {
            lambda,
            minimum_error,
            max_steps,
            weight_low,
            weight_high,
            seed: None,
            gradient: GradientMethod::default(),
            policy: StepPolicy::default(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_gradient(mut self, gradient: GradientMethod) -> Self {
        self.gradient = gradient;
        self
    }

    pub fn with_policy(mut self, policy: StepPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.lambda.is_finite() || self.lambda < 0.0 {
            return Err(invalid(format!("lambda must be finite and non-negative, got {}", self.lambda)));
        }
        if self.minimum_error.is_nan() || self.minimum_error < 0.0 {
            return Err(invalid(format!("minimum_error must be non-negative, got {}", self.minimum_error)));
        }
        if self.max_steps == 0 {
            return Err(invalid("max_steps must be at least 1".to_string()));
        }
        if !(self.weight_low.is_finite() && self.weight_high.is_finite()) || self.weight_low >= self.weight_high {
            return Err(invalid(format!(
                "weight range [{}, {}) is empty or not finite",
                self.weight_low, self.weight_high
            )));
        }
        Ok(())
    }
}

fn invalid(msg: String) -> NetworkError {
    NetworkError::InvalidHyperparameters(msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_optional_fields() {
        let json = r#"{
            "lambda": 0.5,
            "minimum_error": 0.01,
            "max_steps": 100,
            "weight_low": -1.5,
            "weight_high": 1.5
        }"#;
        let hp: Hyperparameters = serde_json::from_str(json).unwrap();
        assert_eq!(hp, Hyperparameters::new(0.5, 0.01, 100, -1.5, 1.5));
        assert_eq!(hp.gradient, GradientMethod::AnalyticBackprop);
        assert_eq!(hp.policy, StepPolicy::AcceptAll);
        assert!(hp.validate().is_ok());
    }

    #[test]
    fn rejects_empty_weight_range() {
        let hp = Hyperparameters::new(0.5, 0.01, 100, 1.0, 1.0);
        assert!(matches!(hp.validate(), Err(NetworkError::InvalidHyperparameters(_))));
    }

    #[test]
    fn rejects_zero_steps_and_negative_lambda() {
        assert!(Hyperparameters::new(0.5, 0.01, 0, -1.0, 1.0).validate().is_err());
        assert!(Hyperparameters::new(-0.1, 0.01, 10, -1.0, 1.0).validate().is_err());
        assert!(Hyperparameters::new(0.1, -0.01, 10, -1.0, 1.0).validate().is_err());
    }

    #[test]
    fn zero_lambda_is_allowed() {
        assert!(Hyperparameters::new(0.0, 0.0, 1, -1.0, 1.0).validate().is_ok());
    }
}
