//! Convenience helpers for loading grayscale grids via the `image` crate.
//!
//! Available when the `image-io` feature is enabled. Color conversion stays
//! here at the boundary; the core only ever sees grayscale grids.

use crate::grid::Grid;
use crate::util::{EdgeScreenError, EdgeScreenResult};
use std::path::Path;

/// Converts a grayscale image buffer to a grid of `f64` samples.
pub fn grid_from_gray_image(img: &image::GrayImage) -> EdgeScreenResult<Grid> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    let data = img.as_raw().iter().map(|&v| f64::from(v)).collect();
    Grid::from_vec(data, width, height)
}

/// Converts any dynamic image to a grayscale grid.
pub fn grid_from_dynamic_image(img: &image::DynamicImage) -> EdgeScreenResult<Grid> {
    grid_from_gray_image(&img.to_luma8())
}

/// Loads an image from disk and converts it to a grayscale grid.
pub fn load_gray_grid<P: AsRef<Path>>(path: P) -> EdgeScreenResult<Grid> {
    let img = image::open(path).map_err(|err| EdgeScreenError::ImageIo {
        reason: err.to_string(),
    })?;
    grid_from_dynamic_image(&img)
}
