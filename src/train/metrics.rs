use crate::data::dataset::Dataset;
use crate::error::NetResult;
use crate::loss::bce::BceLoss;
use crate::math::matrix::Matrix;
use crate::network::network::Network;

/// Loss and accuracy of a network on one dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub loss: f64,
    pub accuracy: f64,
}

/// Fraction of entries where `predicted` equals `expected` exactly.
pub fn accuracy(predicted: &Matrix, expected: &Matrix) -> f64 {
    let n = predicted.rows * predicted.cols;
    if n == 0 {
        return 0.0;
    }
    let correct = predicted.values().zip(expected.values())
        .filter(|(p, y)| p == y)
        .count();
    correct as f64 / n as f64
}

/// One forward pass over `dataset`, scored with BCE and thresholded accuracy.
pub fn evaluate(network: &Network, dataset: &Dataset) -> NetResult<Evaluation> {
    let proba = network.predict_proba(&dataset.features)?;
    proba.ensure_shape(dataset.labels.shape(), "evaluate predictions")?;
    Ok(Evaluation {
        loss: BceLoss::loss(&proba, &dataset.labels)?,
        accuracy: accuracy(&Network::binarize(&proba), &dataset.labels),
    })
}
