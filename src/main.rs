//! Command-line front end.
//!
//!   ferrite-dnn train --train trainset.csv --test testset.csv --hidden 8,8,8 \
//!       --learning-rate 0.01 --iterations 3000 --plot-out history.png
//!   ferrite-dnn predict --model model.json --data testset.csv

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;

use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use ferrite_dnn::data::load_dataset;
use ferrite_dnn::report::{render_history, PlotOptions};
use ferrite_dnn::train::{accuracy, IterationStats};
use ferrite_dnn::{load_data, train_loop, ImageOptions, NetResult, Network, RunConfig, TrainingHistory};

#[derive(Parser)]
#[command(name = "ferrite-dnn", version, about = "Train a sigmoid MLP binary classifier with full-batch gradient descent")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Train a network on a train/test dataset pair
    Train(TrainArgs),
    /// Classify a dataset with a saved network
    Predict {
        /// Network written by `train --model-out`
        #[arg(long, value_name = "FILE")]
        model: PathBuf,
        /// Labelled dataset (.csv file or image directory)
        #[arg(long, value_name = "PATH")]
        data: PathBuf,
        /// Image size as WIDTH,HEIGHT (image directories only)
        #[arg(long, value_name = "W,H", value_parser = parse_image_size)]
        image_size: Option<ImageOptions>,
    },
}

#[derive(Args)]
struct TrainArgs {
    /// JSON run configuration; flags override its values
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Training set (.csv file or image directory with 0/ and 1/)
    #[arg(long, value_name = "PATH")]
    train: Option<PathBuf>,
    /// Test set, same format as --train
    #[arg(long, value_name = "PATH")]
    test: Option<PathBuf>,
    /// Hidden layer widths, e.g. 8,8,8
    #[arg(long, value_name = "WIDTHS", value_delimiter = ',')]
    hidden: Option<Vec<usize>>,
    #[arg(long, value_name = "F")]
    learning_rate: Option<f64>,
    #[arg(long, value_name = "N")]
    iterations: Option<usize>,
    #[arg(long, value_name = "N")]
    seed: Option<u64>,
    /// Image size as WIDTH,HEIGHT (image directories only)
    #[arg(long, value_name = "W,H", value_parser = parse_image_size)]
    image_size: Option<ImageOptions>,
    /// Write the history table here (.csv, otherwise JSON)
    #[arg(long, value_name = "FILE")]
    history_out: Option<PathBuf>,
    /// Write the loss/accuracy chart here (PNG)
    #[arg(long, value_name = "FILE")]
    plot_out: Option<PathBuf>,
    /// Write the trained network here (JSON)
    #[arg(long, value_name = "FILE")]
    model_out: Option<PathBuf>,
    /// Disable the progress bar
    #[arg(long)]
    no_progress: bool,
}

impl TrainArgs {
    fn to_run_config(&self) -> RunConfig {
        RunConfig {
            train: self.train.clone(),
            test: self.test.clone(),
            hidden_layers: self.hidden.clone(),
            learning_rate: self.learning_rate,
            iterations: self.iterations,
            seed: self.seed,
            image_width: self.image_size.map(|s| s.width),
            image_height: self.image_size.map(|s| s.height),
            history_out: self.history_out.clone(),
            plot_out: self.plot_out.clone(),
            model_out: self.model_out.clone(),
        }
    }
}

fn parse_image_size(s: &str) -> Result<ImageOptions, String> {
    let (w, h) = s.split_once(',').ok_or_else(|| format!("expected WIDTH,HEIGHT, got '{s}'"))?;
    let width = w.trim().parse::<u32>().map_err(|e| format!("bad width '{w}': {e}"))?;
    let height = h.trim().parse::<u32>().map_err(|e| format!("bad height '{h}': {e}"))?;
    Ok(ImageOptions { width, height })
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Train(args) => run_train(args),
        Command::Predict { model, data, image_size } => {
            run_predict(&model, &data, &image_size.unwrap_or_default())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                error!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn run_train(args: TrainArgs) -> NetResult<()> {
    let file_config = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    let run = file_config.merge(args.to_run_config());

    let (train_path, test_path) = run.dataset_paths()?;
    let (train, test) = load_data(train_path, test_path, &run.image_options())?;
    // Each set is scaled by its own maximum.
    let (train, test) = (train.normalized(), test.normalized());

    let mut config = run.train_config();
    let progress = if args.no_progress {
        None
    } else {
        let (tx, rx) = mpsc::channel();
        config.progress_tx = Some(tx);
        Some(spawn_progress_bar(rx, config.iterations))
    };

    let outcome = train_loop(&train, &test, &config);
    // Closes the progress channel so the bar thread can finish.
    drop(config);
    if let Some(handle) = progress {
        join_progress_bar(handle);
    }
    let outcome = outcome?;

    if let Some(path) = &run.history_out {
        save_history(&outcome.history, path)?;
        info!(path = %path.display(), "wrote training history");
    }
    if let Some(path) = &run.plot_out {
        render_history(&outcome.history, path, &PlotOptions::default())?;
        info!(path = %path.display(), "wrote training chart");
    }
    if let Some(path) = &run.model_out {
        outcome.network.save_json(path)?;
        info!(path = %path.display(), "wrote trained network");
    }
    Ok(())
}

fn run_predict(model: &Path, data: &Path, image_options: &ImageOptions) -> NetResult<()> {
    let network = Network::load_json(model)?;
    let dataset = load_dataset(data, image_options)?.normalized();
    let predictions = network.predict(&dataset.features)?;

    for value in predictions.values() {
        println!("{}", value as u8);
    }
    info!(
        examples = dataset.n_examples(),
        accuracy = accuracy(&predictions, &dataset.labels),
        "prediction finished"
    );
    Ok(())
}

fn save_history(history: &TrainingHistory, path: &Path) -> NetResult<()> {
    let is_csv = path.extension()
        .and_then(|e| e.to_str())
        .map_or(false, |e| e.eq_ignore_ascii_case("csv"));
    if is_csv {
        history.save_csv(path)
    } else {
        history.save_json(path)
    }
}

fn spawn_progress_bar(rx: mpsc::Receiver<IterationStats>, total: usize) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let pb = ProgressBar::new(total as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        pb.set_style(style);

        for stats in rx {
            pb.set_position(stats.iteration as u64);
            pb.set_message(format!(
                "loss {:.4}/{:.4} acc {:.3}/{:.3}",
                stats.train_loss, stats.test_loss, stats.train_accuracy, stats.test_accuracy
            ));
        }
        pb.finish_and_clear();
    })
}

/// Waits for the bar thread; `false` if it panicked.
fn join_progress_bar(handle: thread::JoinHandle<()>) -> bool {
    match handle.join() {
        Ok(()) => true,
        Err(_) => {
            warn!("progress bar thread panicked");
            false
        }
    }
}
