pub mod hyperparameters;
pub mod step_stats;
pub mod trainer;

pub use hyperparameters::{Hyperparameters, StepPolicy};
pub use step_stats::StepStats;
pub use trainer::{Trainer, TrainingReport, TrainingState};
