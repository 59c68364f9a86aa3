pub mod history;
pub mod iteration_stats;
pub mod loop_fn;
pub mod metrics;
pub mod train_config;
pub mod trainer;

pub use history::{Column, TrainingHistory};
pub use iteration_stats::IterationStats;
pub use loop_fn::{train_loop, TrainOutcome};
pub use metrics::{accuracy, evaluate, Evaluation};
pub use train_config::TrainConfig;
pub use trainer::{Trainer, TrainingState};
