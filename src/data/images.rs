//! Image-directory datasets.
//!
//! A dataset directory holds two sub-directories, `0/` and `1/`, one per
//! class. Every PNG/JPEG/BMP/GIF file inside is decoded, converted to
//! grayscale, resized to `width × height` and flattened row by row with
//! pixels scaled to [0, 1].

use std::path::{Path, PathBuf};

use serde::{Serialize, Deserialize};

use crate::error::{NetError, NetResult};

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

/// Target size every image is resized to before flattening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageOptions {
    pub width: u32,
    pub height: u32,
}

impl Default for ImageOptions {
    fn default() -> Self {
        ImageOptions { width: 64, height: 64 }
    }
}

/// Decodes image bytes, resizes to `width × height`, converts to grayscale,
/// and normalizes pixels to [0, 1].
///
/// Returns a flat `Vec<f64>` of length `width * height`.
pub fn image_bytes_to_grayscale_input(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> NetResult<Vec<f64>> {
    let img = image::load_from_memory(bytes)?;
    let resized = img.resize_exact(width, height, image::imageops::FilterType::Lanczos3);
    let gray = resized.to_luma8();
    Ok(gray.pixels().map(|p| p.0[0] as f64 / 255.0).collect())
}

/// Loads every image under `dir/0` and `dir/1`.
///
/// Files are read in name order so the example order is stable across runs.
pub fn load_image_dir(dir: &Path, options: &ImageOptions) -> NetResult<(Vec<Vec<f64>>, Vec<f64>)> {
    if options.width == 0 || options.height == 0 {
        return Err(NetError::InvalidConfig(format!(
            "image size must be positive, got {}x{}",
            options.width, options.height
        )));
    }

    let mut inputs = Vec::new();
    let mut labels = Vec::new();

    for class in [0u8, 1u8] {
        let class_dir = dir.join(class.to_string());
        if !class_dir.is_dir() {
            return Err(NetError::MalformedDataset {
                path: dir.to_path_buf(),
                reason: format!("missing class directory '{}'", class),
            });
        }

        for path in image_files(&class_dir)? {
            let bytes = std::fs::read(&path)?;
            inputs.push(image_bytes_to_grayscale_input(&bytes, options.width, options.height)?);
            labels.push(class as f64);
        }
    }

    if inputs.is_empty() {
        return Err(NetError::MalformedDataset {
            path: dir.to_path_buf(),
            reason: "no images found in '0/' or '1/'".into(),
        });
    }

    Ok((inputs, labels))
}

fn image_files(dir: &Path) -> NetResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_image = path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
            .unwrap_or(false);
        if path.is_file() && is_image {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
