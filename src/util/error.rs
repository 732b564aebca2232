//! Error types for edgescreen.

use thiserror::Error;

/// Result alias for edgescreen operations.
pub type EdgeScreenResult<T> = std::result::Result<T, EdgeScreenError>;

/// Errors that can occur when running edgescreen algorithms.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EdgeScreenError {
    /// A grid was declared with a zero-sized or overflowing axis.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// A backing buffer is shorter than the declared dimensions require.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// Two grids (or a kernel and a grid) have incompatible shapes.
    #[error("dimension mismatch: {a_width}x{a_height} vs {b_width}x{b_height}")]
    DimensionMismatch {
        a_width: usize,
        a_height: usize,
        b_width: usize,
        b_height: usize,
    },
    /// The input data cannot support the operation.
    #[error("degenerate input: {reason}")]
    DegenerateInput { reason: &'static str },
    /// The operation produced nothing to reduce.
    #[error("empty result: {reason}")]
    EmptyResult { reason: &'static str },
    /// A parameter is outside its documented range.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// Image decoding or loading failed.
    #[cfg(feature = "image-io")]
    #[error("image io: {reason}")]
    ImageIo { reason: String },
}
