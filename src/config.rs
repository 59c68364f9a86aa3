use std::path::{Path, PathBuf};

use serde::{Serialize, Deserialize};

use crate::data::images::ImageOptions;
use crate::error::{NetError, NetResult};
use crate::train::train_config::TrainConfig;

/// Settings for one `train` run of the command-line tool.
///
/// Also defines the config file format: every field is optional, so a file
/// can set just the ones it cares about and command-line flags fill the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Training set: a `.csv` file or an image directory.
    pub train: Option<PathBuf>,
    /// Test set, same format as `train`.
    pub test: Option<PathBuf>,
    pub hidden_layers: Option<Vec<usize>>,
    pub learning_rate: Option<f64>,
    pub iterations: Option<usize>,
    pub seed: Option<u64>,
    /// Size images are resized to; ignored for CSV data.
    pub image_width: Option<u32>,
    pub image_height: Option<u32>,
    /// Where to write the history table (`.json` or `.csv`).
    pub history_out: Option<PathBuf>,
    /// Where to write the loss/accuracy chart.
    pub plot_out: Option<PathBuf>,
    /// Where to write the trained network.
    pub model_out: Option<PathBuf>,
}

impl RunConfig {
    pub fn load(path: &Path) -> NetResult<RunConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    // merge configs where the second overwrites the first
    pub fn merge(self, other: RunConfig) -> RunConfig {
        RunConfig {
            train: other.train.or(self.train),
            test: other.test.or(self.test),
            hidden_layers: other.hidden_layers.or(self.hidden_layers),
            learning_rate: other.learning_rate.or(self.learning_rate),
            iterations: other.iterations.or(self.iterations),
            seed: other.seed.or(self.seed),
            image_width: other.image_width.or(self.image_width),
            image_height: other.image_height.or(self.image_height),
            history_out: other.history_out.or(self.history_out),
            plot_out: other.plot_out.or(self.plot_out),
            model_out: other.model_out.or(self.model_out),
        }
    }

    /// Both dataset paths, or `InvalidConfig` naming the missing one.
    pub fn dataset_paths(&self) -> NetResult<(&Path, &Path)> {
        let train = self.train.as_deref()
            .ok_or_else(|| NetError::InvalidConfig("no training set given (--train)".into()))?;
        let test = self.test.as_deref()
            .ok_or_else(|| NetError::InvalidConfig("no test set given (--test)".into()))?;
        Ok((train, test))
    }

    /// Hyper-parameters with defaults for anything unset.
    pub fn train_config(&self) -> TrainConfig {
        let defaults = TrainConfig::default();
        TrainConfig::new(
            self.hidden_layers.clone().unwrap_or(defaults.hidden_layers),
            self.learning_rate.unwrap_or(defaults.learning_rate),
            self.iterations.unwrap_or(defaults.iterations),
            self.seed.unwrap_or(defaults.seed),
        )
    }

    pub fn image_options(&self) -> ImageOptions {
        let defaults = ImageOptions::default();
        ImageOptions {
            width: self.image_width.unwrap_or(defaults.width),
            height: self.image_height.unwrap_or(defaults.height),
        }
    }
}
