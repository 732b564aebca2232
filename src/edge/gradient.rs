//! Gradient magnitude and quantized direction.
//!
//! Two directional 3x3 convolutions produce `gx` and `gy`; magnitude is the
//! Euclidean norm and direction is `atan2(gy, gx)` quantized to one of the
//! four canonical angles. Gradient orientation is ambiguous modulo 180
//! degrees, so opposite angles share a bin.

use crate::edge::convolve::convolve;
use crate::grid::{Grid, Kernel};
use crate::util::EdgeScreenResult;

#[rustfmt::skip]
const SOBEL_X: [f64; 9] = [
    -1.0, 0.0, 1.0,
    -2.0, 0.0, 2.0,
    -1.0, 0.0, 1.0,
];
#[rustfmt::skip]
const SOBEL_Y: [f64; 9] = [
    1.0, 2.0, 1.0,
    0.0, 0.0, 0.0,
    -1.0, -2.0, -1.0,
];

#[rustfmt::skip]
const SCHARR_X: [f64; 9] = [
    -3.0, 0.0, 3.0,
    -10.0, 0.0, 10.0,
    -3.0, 0.0, 3.0,
];
#[rustfmt::skip]
const SCHARR_Y: [f64; 9] = [
    3.0, 10.0, 3.0,
    0.0, 0.0, 0.0,
    -3.0, -10.0, -3.0,
];

/// Directional kernel pair for gradient estimation.
#[derive(Clone, Debug)]
pub struct GradientKernels {
    /// Horizontal difference operator.
    pub x: Kernel,
    /// Vertical difference operator.
    pub y: Kernel,
}

impl GradientKernels {
    /// Standard Sobel pair.
    pub fn sobel() -> Self {
        Self {
            x: Kernel::from_vec(SOBEL_X.to_vec(), 3, 3).expect("3x3 dimensions are odd"),
            y: Kernel::from_vec(SOBEL_Y.to_vec(), 3, 3).expect("3x3 dimensions are odd"),
        }
    }

    /// Scharr pair (better rotational symmetry than Sobel).
    pub fn scharr() -> Self {
        Self {
            x: Kernel::from_vec(SCHARR_X.to_vec(), 3, 3).expect("3x3 dimensions are odd"),
            y: Kernel::from_vec(SCHARR_Y.to_vec(), 3, 3).expect("3x3 dimensions are odd"),
        }
    }
}

impl Default for GradientKernels {
    fn default() -> Self {
        Self::sobel()
    }
}

/// Per-cell gradient magnitude and quantized direction.
///
/// `direction` cells hold exactly one of 0.0, 45.0, 90.0 or 135.0 degrees.
#[derive(Clone, Debug)]
pub struct GradientMap {
    /// Non-negative gradient magnitude per cell.
    pub magnitude: Grid,
    /// Quantized gradient direction per cell, in degrees.
    pub direction: Grid,
}

/// Estimates the gradient of `image` from two directional convolutions.
pub fn gradient(image: &Grid, kernels: &GradientKernels) -> EdgeScreenResult<GradientMap> {
    let gx = convolve(image, &kernels.x)?;
    let gy = convolve(image, &kernels.y)?;

    let len = image.width() * image.height();
    let mut magnitude = Vec::with_capacity(len);
    let mut direction = Vec::with_capacity(len);
    for (gx_v, gy_v) in gx.as_slice().iter().zip(gy.as_slice()) {
        magnitude.push((gx_v * gx_v + gy_v * gy_v).sqrt());
        direction.push(quantize_direction(gy_v.atan2(*gx_v).to_degrees()));
    }

    Ok(GradientMap {
        magnitude: Grid::from_vec(magnitude, image.width(), image.height())?,
        direction: Grid::from_vec(direction, image.width(), image.height())?,
    })
}

/// Maps a continuous angle in degrees to the nearest canonical direction.
///
/// Negative angles shift into [0, 360) first; rounding to the nearest
/// multiple of 45 is followed by a modulo-180 fold, so a rounded 360 lands
/// on 0 and the result is always one of {0, 45, 90, 135}.
fn quantize_direction(angle_deg: f64) -> f64 {
    let positive = if angle_deg < 0.0 {
        angle_deg + 360.0
    } else {
        angle_deg
    };
    let rounded = (positive / 45.0).round() * 45.0;
    rounded % 180.0
}

#[cfg(test)]
mod tests {
    use super::quantize_direction;

    #[test]
    fn quantize_direction_folds_to_canonical_angles() {
        assert_eq!(quantize_direction(0.0), 0.0);
        assert_eq!(quantize_direction(100.0), 90.0);
        assert_eq!(quantize_direction(130.2), 135.0);
        // 180-periodic fold
        assert_eq!(quantize_direction(180.0), 0.0);
        assert_eq!(quantize_direction(225.0), 45.0);
        // negative angles wrap before rounding
        assert_eq!(quantize_direction(-45.0), 135.0);
        assert_eq!(quantize_direction(-10.0), 0.0);
        // a rounded 360 must land on 0, not 180
        assert_eq!(quantize_direction(350.0), 0.0);
    }
}
