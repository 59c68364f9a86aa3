use std::path::Path;

use tracing::info;

use crate::data::csv::parse_csv;
use crate::data::dataset::Dataset;
use crate::data::images::{load_image_dir, ImageOptions};
use crate::error::{NetError, NetResult};

/// On-disk layouts the loader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    /// A `.csv` file whose last column is the 0/1 label.
    Csv,
    /// A directory with `0/` and `1/` image sub-directories.
    ImageDir,
}

impl DatasetFormat {
    pub fn detect(path: &Path) -> NetResult<DatasetFormat> {
        if path.is_dir() {
            return Ok(DatasetFormat::ImageDir);
        }
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Ok(DatasetFormat::Csv),
            _ => Err(NetError::MalformedDataset {
                path: path.to_path_buf(),
                reason: "unsupported format (expected a .csv file or an image directory)".into(),
            }),
        }
    }
}

/// Loads one dataset file or directory. Features are returned as read,
/// without normalisation.
pub fn load_dataset(path: &Path, options: &ImageOptions) -> NetResult<Dataset> {
    if !path.exists() {
        return Err(NetError::DatasetNotFound { path: path.to_path_buf() });
    }

    let (samples, labels) = match DatasetFormat::detect(path)? {
        DatasetFormat::Csv => {
            let text = std::fs::read_to_string(path)?;
            parse_csv(&text).map_err(|reason| NetError::MalformedDataset {
                path: path.to_path_buf(),
                reason,
            })?
        }
        DatasetFormat::ImageDir => load_image_dir(path, options)?,
    };

    let dataset = Dataset::from_samples(samples, labels)?;
    info!(
        path = %path.display(),
        examples = dataset.n_examples(),
        features = dataset.n_features(),
        "loaded dataset"
    );
    Ok(dataset)
}

/// Loads the train and test sets.
///
/// Both paths are checked before either is read, and the two sets must agree
/// on their feature count.
pub fn load_data(train_path: &Path, test_path: &Path, options: &ImageOptions) -> NetResult<(Dataset, Dataset)> {
    for path in [train_path, test_path] {
        if !path.exists() {
            return Err(NetError::DatasetNotFound { path: path.to_path_buf() });
        }
    }

    let train = load_dataset(train_path, options)?;
    let test = load_dataset(test_path, options)?;

    if train.n_features() != test.n_features() {
        return Err(NetError::MalformedDataset {
            path: test_path.to_path_buf(),
            reason: format!(
                "test set has {} features but the training set has {}",
                test.n_features(),
                train.n_features()
            ),
        });
    }

    Ok((train, test))
}
