pub mod plot;

pub use plot::{render_history, render_history_image, PlotOptions};
