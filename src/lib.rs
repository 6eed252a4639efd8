pub mod error;
pub mod math;
pub mod activation;
pub mod network;
pub mod gradient;
pub mod loss;
pub mod train;
pub mod dataset;

// Convenience re-exports
pub use error::{NetworkError, Result};
pub use math::matrix::Matrix;
pub use network::{Network, Topology, WeightStore};
pub use gradient::GradientMethod;
pub use loss::SquaredError;
pub use train::{Hyperparameters, StepPolicy, StepStats, Trainer, TrainingReport, TrainingState};
pub use dataset::{CaseFiles, RunConfig, TrainingCase};
