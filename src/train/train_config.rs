use std::sync::mpsc;
use std::sync::{Arc, atomic::AtomicBool};

use serde::{Serialize, Deserialize};

use crate::error::{NetError, NetResult};
use crate::train::iteration_stats::IterationStats;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `hidden_layers`: widths of the hidden layers, input side first; the
///   input and output widths come from the dataset
/// - `learning_rate`: gradient-descent step size, must be positive
/// - `iterations`: number of full-batch updates
/// - `seed`: seeds the RNG used for weight initialisation
/// - `progress_tx`: optional channel sender; one `IterationStats` is sent
///   per completed iteration.  If the receiver is dropped
///   the loop stops early.
/// - `stop_flag`: optional atomic flag; when set to `true` from another
///   thread the loop stops after the current iteration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub hidden_layers: Vec<usize>,
    pub learning_rate: f64,
    pub iterations: usize,
    pub seed: u64,
    #[serde(skip)]
    pub progress_tx: Option<mpsc::Sender<IterationStats>>,
    #[serde(skip)]
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl TrainConfig {
    /// Creates a `TrainConfig` with no progress channel and no stop flag.
    pub fn new(hidden_layers: Vec<usize>, learning_rate: f64, iterations: usize, seed: u64) -> Self {
        TrainConfig {
            hidden_layers,
            learning_rate,
            iterations,
            seed,
            progress_tx: None,
            stop_flag: None,
        }
    }

    pub fn validate(&self) -> NetResult<()> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(NetError::InvalidConfig(format!(
                "learning rate must be a positive number, got {}",
                self.learning_rate
            )));
        }
        if self.iterations == 0 {
            return Err(NetError::InvalidConfig("iteration count must be at least 1".into()));
        }
        if let Some(pos) = self.hidden_layers.iter().position(|&w| w == 0) {
            return Err(NetError::InvalidDimensions {
                dims: self.hidden_layers.clone(),
                reason: format!("hidden layer {} has zero width", pos + 1),
            });
        }
        Ok(())
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig::new(vec![8, 8, 8], 0.01, 3000, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = TrainConfig::default();
        assert_eq!(config.hidden_layers, vec![8, 8, 8]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_bad_learning_rate() {
        for lr in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            let config = TrainConfig::new(vec![4], lr, 10, 0);
            assert!(matches!(config.validate(), Err(NetError::InvalidConfig(_))), "lr = {lr}");
        }
    }

    #[test]
    fn rejects_zero_iterations_and_zero_width() {
        assert!(TrainConfig::new(vec![4], 0.1, 0, 0).validate().is_err());
        assert!(matches!(
            TrainConfig::new(vec![4, 0], 0.1, 10, 0).validate(),
            Err(NetError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: TrainConfig = serde_json::from_str(r#"{"iterations": 50, "seed": 7}"#).unwrap();
        assert_eq!(config.iterations, 50);
        assert_eq!(config.seed, 7);
        assert_eq!(config.learning_rate, 0.01);
        assert!(config.progress_tx.is_none());
    }
}
