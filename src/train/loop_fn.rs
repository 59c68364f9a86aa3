use std::sync::atomic::Ordering;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::data::dataset::Dataset;
use crate::error::NetResult;
use crate::network::dimensions::Dimensions;
use crate::network::network::Network;
use crate::optim::sgd::Sgd;
use crate::train::history::TrainingHistory;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::{Trainer, TrainingState};

/// Iterations between debug log lines.
const LOG_EVERY: usize = 100;

/// Result of a training run.
#[derive(Debug, Clone)]
pub struct TrainOutcome {
    /// Parameters after the last completed iteration.
    pub network: Network,
    /// One row per completed iteration.
    pub history: TrainingHistory,
    /// `false` when the run was stopped before `config.iterations`.
    pub completed: bool,
}

/// Builds a network sized for `train`, then trains it for
/// `config.iterations` full-batch iterations.
///
/// The layer widths are `[n_features, config.hidden_layers..., label_rows]`.
///
/// # Early termination
/// The loop stops after the current iteration if:
/// - the `progress_tx` receiver has been dropped, **or**
/// - `config.stop_flag` is set to `true`.
/// The network and the rows recorded so far are still returned.
///
/// # Errors
/// Invalid configuration is rejected before any parameter is created. Any
/// error during an iteration aborts the run and no history is returned.
pub fn train_loop(train: &Dataset, test: &Dataset, config: &TrainConfig) -> NetResult<TrainOutcome> {
    config.validate()?;

    let dims = Dimensions::from_topology(train.n_features(), &config.hidden_layers, train.labels.rows)?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let network = Network::initialise(&dims, &mut rng);

    info!(
        dimensions = ?dims.widths(),
        learning_rate = config.learning_rate,
        iterations = config.iterations,
        seed = config.seed,
        train_examples = train.n_examples(),
        test_examples = test.n_examples(),
        "starting training"
    );

    let mut trainer = Trainer::new(network, Sgd::new(config.learning_rate), train, test, config.iterations)?;

    while trainer.state() != TrainingState::Completed {
        if stop_requested(config) {
            warn!(completed = trainer.history().len(), "stop requested, ending training early");
            break;
        }

        let Some(stats) = trainer.step()? else {
            break;
        };

        if stats.iteration % LOG_EVERY == 0 {
            debug!(
                iteration = stats.iteration,
                train_loss = stats.train_loss,
                test_loss = stats.test_loss,
                train_accuracy = stats.train_accuracy,
                test_accuracy = stats.test_accuracy,
                "progress"
            );
        }

        if let Some(ref tx) = config.progress_tx {
            // If the receiver has been dropped, stop training.
            if tx.send(stats).is_err() {
                warn!(completed = stats.iteration, "progress receiver dropped, ending training early");
                break;
            }
        }
    }

    let completed = trainer.state() == TrainingState::Completed;
    let (network, history) = trainer.into_parts();

    if let Some(last) = history.last() {
        info!(
            iterations = history.len(),
            train_loss = last[0],
            test_loss = last[1],
            train_accuracy = last[2],
            test_accuracy = last[3],
            "training finished"
        );
    }

    Ok(TrainOutcome { network, history, completed })
}

fn stop_requested(config: &TrainConfig) -> bool {
    config.stop_flag
        .as_ref()
        .map_or(false, |flag| flag.load(Ordering::Relaxed))
}
