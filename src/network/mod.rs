pub mod activations;
pub mod dimensions;
pub mod gradients;
pub mod network;

pub use activations::Activations;
pub use dimensions::Dimensions;
pub use gradients::Gradients;
pub use network::{Network, DECISION_THRESHOLD};
