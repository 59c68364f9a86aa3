pub mod csv;
pub mod dataset;
pub mod images;
pub mod loader;
pub mod toy;

pub use dataset::Dataset;
pub use images::ImageOptions;
pub use loader::{load_data, load_dataset, DatasetFormat};
