pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;
pub mod data;
pub mod report;
pub mod config;

// Convenience re-exports
pub use error::{NetError, NetResult};
pub use math::matrix::Matrix;
pub use layers::dense::Layer;
pub use network::{Activations, Dimensions, Gradients, Network};
pub use loss::bce::BceLoss;
pub use optim::sgd::Sgd;
pub use data::{load_data, Dataset, ImageOptions};
pub use train::{train_loop, TrainConfig, TrainOutcome, TrainingHistory};
pub use config::RunConfig;
