use std::path::PathBuf;

use thiserror::Error;

/// Every failure the library can report.
///
/// None of these are retryable: once the datasets are in memory all work is
/// deterministic, so an error always means bad input or a broken contract.
#[derive(Debug, Error)]
pub enum NetError {
    /// A required dataset file or directory does not exist.
    #[error("dataset not found: {}", path.display())]
    DatasetNotFound { path: PathBuf },

    /// The layer-width sequence cannot describe a network.
    #[error("invalid dimensions {dims:?}: {reason}")]
    InvalidDimensions { dims: Vec<usize>, reason: String },

    /// Two arrays that must agree in shape do not.
    #[error("shape mismatch in {context}: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        context: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// A dataset exists but its contents could not be turned into samples.
    #[error("malformed dataset {}: {reason}", path.display())]
    MalformedDataset { path: PathBuf, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

pub type NetResult<T> = Result<T, NetError>;

impl NetError {
    pub(crate) fn shape(
        context: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    ) -> NetError {
        NetError::ShapeMismatch { context, expected, actual }
    }
}
