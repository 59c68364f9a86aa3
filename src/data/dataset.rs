use crate::error::{NetError, NetResult};
use crate::math::matrix::Matrix;

/// A labelled batch in the layout the network consumes.
///
/// `features` is `n_features × n_examples` (one column per example) and
/// `labels` is `1 × n_examples`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub features: Matrix,
    pub labels: Matrix,
}

impl Dataset {
    pub fn new(features: Matrix, labels: Matrix) -> NetResult<Dataset> {
        if features.cols == 0 || features.rows == 0 {
            return Err(NetError::shape("Dataset features", (features.rows.max(1), 1), features.shape()));
        }
        labels.ensure_shape((1, features.cols), "Dataset labels")?;
        Ok(Dataset { features, labels })
    }

    /// Builds a dataset from per-example rows (`n_examples × n_features`),
    /// transposing them into column-per-example form.
    pub fn from_samples(samples: Vec<Vec<f64>>, labels: Vec<f64>) -> NetResult<Dataset> {
        if samples.len() != labels.len() {
            return Err(NetError::shape("Dataset::from_samples", (samples.len(), 1), (labels.len(), 1)));
        }
        let features = Matrix::from_data(samples)?.transpose();
        Dataset::new(features, Matrix::row_vector(labels))
    }

    pub fn n_examples(&self) -> usize {
        self.features.cols
    }

    pub fn n_features(&self) -> usize {
        self.features.rows
    }

    /// Divides every feature by the largest feature value so the data lies
    /// in [0, 1] for non-negative inputs. Left unchanged when that maximum
    /// is not positive.
    pub fn normalized(self) -> Dataset {
        match self.features.max() {
            Some(max) if max > 0.0 => Dataset {
                features: self.features.map(|x| x / max),
                labels: self.labels,
            },
            _ => self,
        }
    }
}
