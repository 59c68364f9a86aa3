//! Renders a `TrainingHistory` as a two-panel PNG: log loss on the left,
//! accuracy on the right, each with a train and a test curve.

use std::path::Path;

use image::{Rgb, RgbImage};

use crate::error::{NetError, NetResult};
use crate::train::history::{Column, TrainingHistory};

pub const TRAIN_COLOUR: Rgb<u8> = Rgb([31, 119, 180]);
pub const TEST_COLOUR: Rgb<u8> = Rgb([255, 127, 14]);
const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([60, 60, 60]);
const MARGIN: u32 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotOptions {
    pub width: u32,
    pub height: u32,
}

impl Default for PlotOptions {
    fn default() -> Self {
        PlotOptions { width: 1200, height: 600 }
    }
}

/// Pixel rectangle of one panel's plotting area.
#[derive(Debug, Clone, Copy)]
struct Panel {
    left: u32,
    top: u32,
    width: u32,
    height: u32,
}

impl Panel {
    fn to_pixel(&self, x_frac: f64, y_frac: f64) -> (i64, i64) {
        let x = self.left as f64 + x_frac.clamp(0.0, 1.0) * (self.width - 1) as f64;
        let y = self.top as f64 + (1.0 - y_frac.clamp(0.0, 1.0)) * (self.height - 1) as f64;
        (x.round() as i64, y.round() as i64)
    }
}

/// Writes the chart to `path`; the image format follows the extension.
pub fn render_history(history: &TrainingHistory, path: impl AsRef<Path>, options: &PlotOptions) -> NetResult<()> {
    render_history_image(history, options)?.save(path)?;
    Ok(())
}

pub fn render_history_image(history: &TrainingHistory, options: &PlotOptions) -> NetResult<RgbImage> {
    let min_width = 4 * MARGIN + 2;
    let min_height = 2 * MARGIN + 2;
    if options.width < min_width || options.height < min_height {
        return Err(NetError::InvalidConfig(format!(
            "plot must be at least {}x{} pixels, got {}x{}",
            min_width, min_height, options.width, options.height
        )));
    }

    let mut img = RgbImage::from_pixel(options.width, options.height, BACKGROUND);
    let panel_width = options.width / 2 - 2 * MARGIN;
    let panel_height = options.height - 2 * MARGIN;
    let loss_panel = Panel { left: MARGIN, top: MARGIN, width: panel_width, height: panel_height };
    let accuracy_panel = Panel {
        left: options.width / 2 + MARGIN,
        top: MARGIN,
        width: panel_width,
        height: panel_height,
    };

    let loss_max = history.column(Column::TrainLoss)
        .chain(history.column(Column::TestLoss))
        .filter(|v| v.is_finite())
        .fold(0.0f64, f64::max);
    let loss_scale = if loss_max > 0.0 { loss_max * 1.05 } else { 1.0 };

    for (panel, columns, y_max) in [
        (loss_panel, [Column::TrainLoss, Column::TestLoss], loss_scale),
        (accuracy_panel, [Column::TrainAccuracy, Column::TestAccuracy], 1.0),
    ] {
        draw_frame(&mut img, panel);
        for (column, colour) in columns.into_iter().zip([TRAIN_COLOUR, TEST_COLOUR]) {
            draw_series(&mut img, panel, history, column, y_max, colour);
        }
    }

    Ok(img)
}

fn draw_frame(img: &mut RgbImage, panel: Panel) {
    let right = (panel.left + panel.width - 1) as i64;
    let bottom = (panel.top + panel.height - 1) as i64;
    let (left, top) = (panel.left as i64, panel.top as i64);
    draw_line(img, (left, top), (left, bottom), AXIS);
    draw_line(img, (left, bottom), (right, bottom), AXIS);
}

fn draw_series(
    img: &mut RgbImage,
    panel: Panel,
    history: &TrainingHistory,
    column: Column,
    y_max: f64,
    colour: Rgb<u8>,
) {
    let span = history.len().saturating_sub(1).max(1) as f64;
    let mut previous: Option<(i64, i64)> = None;
    for (i, value) in history.column(column).enumerate() {
        if !value.is_finite() {
            previous = None;
            continue;
        }
        let point = panel.to_pixel(i as f64 / span, value / y_max);
        match previous {
            Some(from) => draw_line(img, from, point, colour),
            None => put(img, point, colour),
        }
        previous = Some(point);
    }
}

/// Bresenham line between two pixel coordinates.
fn draw_line(img: &mut RgbImage, from: (i64, i64), to: (i64, i64), colour: Rgb<u8>) {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let sx = if x < to.0 { 1 } else { -1 };
    let sy = if y < to.1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put(img, (x, y), colour);
        if (x, y) == to {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

fn put(img: &mut RgbImage, (x, y): (i64, i64), colour: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, colour);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::toy::{builtin_and, builtin_xor};
    use crate::train::{train_loop, TrainConfig};

    fn history() -> TrainingHistory {
        let config = TrainConfig::new(vec![3], 0.5, 40, 2);
        train_loop(&builtin_and(), &builtin_xor(), &config).unwrap().history
    }

    #[test]
    fn both_curves_are_drawn() {
        let img = render_history_image(&history(), &PlotOptions::default()).unwrap();
        assert_eq!(img.dimensions(), (1200, 600));
        assert!(img.pixels().any(|p| *p == TRAIN_COLOUR));
        assert!(img.pixels().any(|p| *p == TEST_COLOUR));
    }

    #[test]
    fn writes_png_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.png");
        render_history(&history(), &path, &PlotOptions { width: 400, height: 200 }).unwrap();
        let loaded = image::open(&path).unwrap();
        assert_eq!((loaded.width(), loaded.height()), (400, 200));
    }

    #[test]
    fn empty_history_still_renders_axes() {
        let img = render_history_image(&TrainingHistory::with_capacity(5), &PlotOptions::default()).unwrap();
        assert!(img.pixels().any(|p| *p == AXIS));
        assert!(!img.pixels().any(|p| *p == TRAIN_COLOUR));
    }

    #[test]
    fn tiny_canvas_is_rejected() {
        let opts = PlotOptions { width: 50, height: 50 };
        assert!(render_history_image(&history(), &opts).is_err());
    }
}
