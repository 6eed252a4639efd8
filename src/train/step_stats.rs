use serde::{Serialize, Deserialize};

/// Per-step training statistics.
///
/// When a progress channel is attached to a `Trainer`, one `StepStats` value
/// is sent at the end of every step, accepted or not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepStats {
    /// 1-based step number.
    pub step: usize,
    /// Aggregate half-sum-of-squares error over every case after this step.
    pub error: f64,
    /// False when the step policy rolled the step back.
    pub accepted: bool,
    /// Wall-clock duration of this step in milliseconds.
    pub elapsed_ms: u64,
}
