use serde::{Serialize, Deserialize};

/// Metrics recorded after one completed iteration.
///
/// When a `progress_tx` channel is configured in `TrainConfig`, the training
/// loop sends one `IterationStats` value per iteration. All four metrics are
/// measured with the parameters produced by that iteration's update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IterationStats {
    /// 1-based iteration number.
    pub iteration: usize,
    /// Total iterations requested for this run.
    pub total_iterations: usize,
    /// Binary cross-entropy on the training set.
    pub train_loss: f64,
    /// Binary cross-entropy on the test set.
    pub test_loss: f64,
    /// Training accuracy as a fraction in [0, 1].
    pub train_accuracy: f64,
    /// Test accuracy as a fraction in [0, 1].
    pub test_accuracy: f64,
    /// Wall-clock duration of this iteration in milliseconds.
    pub elapsed_ms: u64,
}
