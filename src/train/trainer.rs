use std::time::Instant;

use crate::data::dataset::Dataset;
use crate::error::{NetError, NetResult};
use crate::network::network::Network;
use crate::optim::sgd::Sgd;
use crate::train::history::TrainingHistory;
use crate::train::iteration_stats::IterationStats;
use crate::train::metrics::evaluate;

/// Where a `Trainer` is in its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingState {
    /// Parameters initialised, no update applied yet.
    Initialized,
    /// `completed` iterations done, more to go.
    Iterating { completed: usize },
    /// Every requested iteration has run.
    Completed,
}

/// Full-batch gradient-descent driver.
///
/// Owns the network for the duration of the run. Each call to `step` is one
/// complete iteration; between calls the network and history are always in
/// a consistent state, so a run can be abandoned after any step.
pub struct Trainer<'a> {
    network: Network,
    optimizer: Sgd,
    train: &'a Dataset,
    test: &'a Dataset,
    history: TrainingHistory,
    total_iterations: usize,
    state: TrainingState,
}

impl<'a> Trainer<'a> {
    pub fn new(
        network: Network,
        optimizer: Sgd,
        train: &'a Dataset,
        test: &'a Dataset,
        total_iterations: usize,
    ) -> NetResult<Trainer<'a>> {
        if total_iterations == 0 {
            return Err(NetError::InvalidConfig("iteration count must be at least 1".into()));
        }
        let dims = network.dimensions();
        for dataset in [train, test] {
            if dataset.n_features() != dims.input_size() {
                return Err(NetError::shape(
                    "Trainer dataset features",
                    (dims.input_size(), dataset.n_examples()),
                    dataset.features.shape(),
                ));
            }
            if dataset.labels.rows != dims.output_size() {
                return Err(NetError::shape(
                    "Trainer dataset labels",
                    (dims.output_size(), dataset.n_examples()),
                    dataset.labels.shape(),
                ));
            }
        }

        Ok(Trainer {
            network,
            optimizer,
            train,
            test,
            history: TrainingHistory::with_capacity(total_iterations),
            total_iterations,
            state: TrainingState::Initialized,
        })
    }

    pub fn state(&self) -> TrainingState {
        self.state
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn history(&self) -> &TrainingHistory {
        &self.history
    }

    /// Runs one iteration: forward on the training set, backward, update,
    /// then scores the updated network on both sets and records the row.
    ///
    /// Returns `Ok(None)` once the run is already `Completed`.
    pub fn step(&mut self) -> NetResult<Option<IterationStats>> {
        if self.state == TrainingState::Completed {
            return Ok(None);
        }
        let t_start = Instant::now();

        let activations = self.network.forward(&self.train.features)?;
        let gradients = self.network.backward(&self.train.labels, &activations)?;
        self.optimizer.step(&mut self.network, &gradients)?;

        let train_eval = evaluate(&self.network, self.train)?;
        let test_eval = evaluate(&self.network, self.test)?;

        let completed = self.history.len() + 1;
        let stats = IterationStats {
            iteration: completed,
            total_iterations: self.total_iterations,
            train_loss: train_eval.loss,
            test_loss: test_eval.loss,
            train_accuracy: train_eval.accuracy,
            test_accuracy: test_eval.accuracy,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };
        self.history.push(&stats)?;

        self.state = if completed == self.total_iterations {
            TrainingState::Completed
        } else {
            TrainingState::Iterating { completed }
        };
        Ok(Some(stats))
    }

    /// Hands back the trained network and the rows recorded so far.
    pub fn into_parts(self) -> (Network, TrainingHistory) {
        (self.network, self.history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::toy::builtin_and;
    use crate::network::dimensions::Dimensions;

    fn network(widths: &[usize]) -> Network {
        Network::with_seed(&Dimensions::new(widths.to_vec()).unwrap(), 1)
    }

    #[test]
    fn walks_through_states() {
        let data = builtin_and();
        let mut trainer = Trainer::new(network(&[2, 2, 1]), Sgd::new(0.1), &data, &data, 2).unwrap();
        assert_eq!(trainer.state(), TrainingState::Initialized);

        let first = trainer.step().unwrap().unwrap();
        assert_eq!(first.iteration, 1);
        assert_eq!(trainer.state(), TrainingState::Iterating { completed: 1 });

        trainer.step().unwrap().unwrap();
        assert_eq!(trainer.state(), TrainingState::Completed);
        assert!(trainer.step().unwrap().is_none());
        assert_eq!(trainer.history().len(), 2);
    }

    #[test]
    fn recorded_metrics_describe_updated_parameters() {
        let data = builtin_and();
        let mut trainer = Trainer::new(network(&[2, 3, 1]), Sgd::new(0.5), &data, &data, 1).unwrap();
        let stats = trainer.step().unwrap().unwrap();
        let eval = evaluate(trainer.network(), &data).unwrap();
        assert_eq!(stats.train_loss, eval.loss);
        assert_eq!(stats.train_accuracy, eval.accuracy);
    }

    #[test]
    fn rejects_dataset_of_wrong_width() {
        let data = builtin_and();
        let err = Trainer::new(network(&[3, 1]), Sgd::new(0.1), &data, &data, 1).err().unwrap();
        assert!(matches!(err, NetError::ShapeMismatch { .. }));
    }

    #[test]
    fn rejects_multi_output_network_for_binary_labels() {
        let data = builtin_and();
        assert!(Trainer::new(network(&[2, 2]), Sgd::new(0.1), &data, &data, 1).is_err());
    }

    #[test]
    fn rejects_zero_iterations() {
        let data = builtin_and();
        assert!(Trainer::new(network(&[2, 1]), Sgd::new(0.1), &data, &data, 0).is_err());
    }
}
