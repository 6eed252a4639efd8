use std::sync::mpsc;
use std::time::Instant;

use log::{debug, info, warn};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Serialize, Deserialize};

use crate::dataset::case::{validate_cases, TrainingCase};
use crate::error::{NetworkError, Result};
use crate::loss::squared_error::SquaredError;
use crate::network::network::Network;
use crate::train::hyperparameters::{Hyperparameters, StepPolicy};
use crate::train::step_stats::StepStats;

/// Where a training run stands. Everything but `Running` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingState {
    Running,
    /// Aggregate error reached `minimum_error`.
    Converged,
    /// `max_steps` steps ran without converging.
    StepLimitReached,
    /// A step raised the error and was rolled back.
    Stalled,
    /// A step produced a non-finite error. Under `RollbackOnIncrease` the
    /// weights from before that step are restored.
    Diverged,
}

/// Outcome of [`Trainer::train`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub final_error: f64,
    pub steps: usize,
    pub state: TrainingState,
}

/// Online gradient descent over a fixed training set.
///
/// The trainer owns the network for the whole run; each case's update is
/// applied before the next case runs forward.
pub struct Trainer {
    network: Network,
    cases: Vec<TrainingCase>,
    hyperparameters: Hyperparameters,
    state: TrainingState,
    steps: usize,
    error: f64,
    progress_tx: Option<mpsc::Sender<StepStats>>,
}

impl Trainer {
    /// Checks the hyperparameters, the gradient method against the topology
    /// and every case against the input/output widths.
    pub fn new(network: Network, cases: Vec<TrainingCase>, hyperparameters: Hyperparameters) -> Result<Trainer> {
        hyperparameters.validate()?;
        hyperparameters.gradient.check(network.topology())?;
        validate_cases(network.topology(), &cases)?;

        Ok(Trainer {
            network,
            cases,
            hyperparameters,
            state: TrainingState::Running,
            steps: 0,
            error: f64::INFINITY,
            progress_tx: None,
        })
    }

    /// Sends one `StepStats` per step to `tx`. If the receiver goes away the
    /// trainer keeps going and stops reporting.
    pub fn with_progress(mut self, tx: mpsc::Sender<StepStats>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    /// Randomizes the weights within the configured bounds, seeded when the
    /// hyperparameters carry a seed.
    pub fn randomize_weights(&mut self) {
        let (low, high) = (self.hyperparameters.weight_low, self.hyperparameters.weight_high);
        match self.hyperparameters.seed {
            Some(seed) => self.network.randomize_weights_with(&mut StdRng::seed_from_u64(seed), low, high),
            None => self.network.randomize_weights(low, high),
        }
    }

    /// Runs every case forward, updates the weights from its error, runs it
    /// forward again and sums the post-update errors. Returns the aggregate
    /// error the trainer holds afterwards.
    pub fn step(&mut self) -> Result<f64> {
        let t_start = Instant::now();
        let snapshot = match self.hyperparameters.policy {
            StepPolicy::RollbackOnIncrease => Some(self.network.weights.clone()),
            StepPolicy::AcceptAll => None,
        };

        let lambda = self.hyperparameters.lambda;
        let gradient = self.hyperparameters.gradient;
        let mut total = 0.0;
        for case in &self.cases {
            self.network.forward(&case.input);
            gradient.descend(&mut self.network, &case.expected, lambda)?;
            let output = self.network.forward(&case.input);
            total += SquaredError::loss(&case.expected, output);
        }
        self.steps += 1;

        if !total.is_finite() {
            warn!("step {}: aggregate error is {}, stopping", self.steps, total);
            if let Some(previous) = snapshot {
                self.network.weights = previous;
            }
            self.state = TrainingState::Diverged;
            return Err(NetworkError::Diverged { step: self.steps, error: total });
        }

        let rejected = snapshot.is_some() && total > self.error;
        match snapshot {
            Some(previous) if rejected => {
                warn!(
                    "step {}: error rose from {} to {}, rolling back",
                    self.steps, self.error, total
                );
                self.network.weights = previous;
                self.state = TrainingState::Stalled;
            }
            _ => {
                debug!("step {}: error {}", self.steps, total);
                self.error = total;
                self.state = self.settled_state();
            }
        }

        self.report_progress(StepStats {
            step: self.steps,
            error: total,
            accepted: !rejected,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        });

        Ok(self.error)
    }

    /// Steps until the error reaches `minimum_error`, the step cap is hit or
    /// the step policy stalls. Running out of steps is a normal outcome; a
    /// non-finite error leaves the trainer `Diverged` and is returned as an error.
    pub fn train(&mut self) -> Result<TrainingReport> {
        while self.state == TrainingState::Running {
            self.step()?;
        }

        let hp = &self.hyperparameters;
        info!(
            "training finished: {:?} after {} steps, error {}",
            self.state, self.steps, self.error
        );
        info!(
            "lambda {}, minimum error {}, max steps {}, weight range [{}, {})",
            hp.lambda, hp.minimum_error, hp.max_steps, hp.weight_low, hp.weight_high
        );

        Ok(self.report())
    }

    pub fn report(&self) -> TrainingReport {
        TrainingReport {
            final_error: self.error,
            steps: self.steps,
            state: self.state,
        }
    }

    /// Runs every case forward and returns the outputs in case order.
    pub fn final_outputs(&mut self) -> Vec<Vec<f64>> {
        let Trainer { network, cases, .. } = self;
        cases.iter()
            .map(|case| network.forward(&case.input).to_vec())
            .collect()
    }

    pub fn state(&self) -> TrainingState {
        self.state
    }

    /// Aggregate error after the last accepted step; infinite before the first.
    pub fn error(&self) -> f64 {
        self.error
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn into_network(self) -> Network {
        self.network
    }

    pub fn cases(&self) -> &[TrainingCase] {
        &self.cases
    }

    pub fn hyperparameters(&self) -> &Hyperparameters {
        &self.hyperparameters
    }

    fn settled_state(&self) -> TrainingState {
        if self.error <= self.hyperparameters.minimum_error {
            TrainingState::Converged
        } else if self.steps >= self.hyperparameters.max_steps {
            TrainingState::StepLimitReached
        } else {
            TrainingState::Running
        }
    }

    fn report_progress(&mut self, stats: StepStats) {
        let disconnected = match self.progress_tx {
            Some(ref tx) => tx.send(stats).is_err(),
            None => false,
        };
        if disconnected {
            debug!("progress receiver dropped, no longer reporting");
            self.progress_tx = None;
        }
    }
}
