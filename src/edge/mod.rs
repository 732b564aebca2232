//! Edge detection pipeline: blur, gradient, non-maximum suppression,
//! double thresholding and hysteresis linking.
//!
//! Each stage is a pure function consuming the previous stage's freshly
//! allocated grid; [`detect_edges`] chains all five.

use crate::grid::{Grid, Kernel};
use crate::trace::{trace_event, trace_span};
use crate::util::EdgeScreenResult;

pub mod convolve;
pub mod gradient;
pub mod hysteresis;
pub mod nms;
pub mod threshold;

pub use convolve::convolve;
pub use gradient::{gradient, GradientKernels, GradientMap};
pub use hysteresis::link;
pub use nms::suppress;
pub use threshold::{threshold, EdgeState, StateGrid};

/// Configuration for the edge detection pipeline.
///
/// Defaults: a 5x5 Gaussian blur over 159, the Sobel pair, ratios
/// (0.05, 0.12) and marker values (25, 255).
#[derive(Clone, Debug)]
pub struct EdgeConfig {
    /// Blur kernel applied before gradient estimation.
    pub blur: Kernel,
    /// Directional kernel pair for gradient estimation.
    pub gradient: GradientKernels,
    /// Low threshold as a fraction of the high threshold, in (0, 1).
    pub low_ratio: f64,
    /// High threshold as a fraction of the magnitude maximum, in (0, 1).
    pub high_ratio: f64,
    /// Marker value rendered for weak border cells in the final map.
    pub weak_value: f64,
    /// Marker value rendered for edge cells in the final map.
    pub strong_value: f64,
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            blur: Kernel::gaussian_5x5(),
            gradient: GradientKernels::sobel(),
            low_ratio: 0.05,
            high_ratio: 0.12,
            weak_value: 25.0,
            strong_value: 255.0,
        }
    }
}

/// Runs the full edge detection pipeline on a grayscale grid.
pub fn detect_edges(image: &Grid, config: &EdgeConfig) -> EdgeScreenResult<Grid> {
    let _guard = trace_span!("detect_edges").entered();
    let blurred = convolve(image, &config.blur)?;
    let grad = gradient(&blurred, &config.gradient)?;
    let thinned = suppress(&grad.magnitude, &grad.direction)?;
    let states = threshold(&thinned, config.low_ratio, config.high_ratio)?;
    let map = link(&states, config.weak_value, config.strong_value);
    trace_event!("edges_linked", width = map.width(), height = map.height());
    Ok(map)
}
