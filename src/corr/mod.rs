//! Sliding-window correlation between grids.
//!
//! Scores are plain product-sums divided by a fixed normalization constant.
//! That constant is a documented scale factor, not a statistical
//! normalization: there is no mean subtraction and no energy normalization.

use crate::grid::Grid;
use crate::util::{EdgeScreenError, EdgeScreenResult};

#[cfg(feature = "rayon")]
pub mod rayon;

/// Correlation scoring configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CorrConfig {
    /// Fixed scale divisor applied to every window product-sum.
    pub normalization: f64,
}

impl Default for CorrConfig {
    fn default() -> Self {
        Self {
            normalization: 1000.0,
        }
    }
}

/// Scalar scores indexed by template placement, one per top-left offset.
#[derive(Clone, Debug, PartialEq)]
pub struct CorrelationSurface {
    scores: Vec<f64>,
    width: usize,
    height: usize,
}

impl CorrelationSurface {
    pub(crate) fn new(scores: Vec<f64>, width: usize, height: usize) -> Self {
        debug_assert_eq!(scores.len(), width * height);
        Self {
            scores,
            width,
            height,
        }
    }

    pub(crate) fn empty() -> Self {
        Self {
            scores: Vec::new(),
            width: 0,
            height: 0,
        }
    }

    /// Builds a single-element surface from a same-size comparison score.
    pub fn from_scalar(score: f64) -> Self {
        Self {
            scores: vec![score],
            width: 1,
            height: 1,
        }
    }

    /// Returns the number of placements along the horizontal axis.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of placements along the vertical axis.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns true when no placement fit.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Returns the score at placement `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.scores.get(y * self.width + x).copied()
    }

    /// Returns the scores in row-major placement order.
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Returns the maximum score, or `None` for an empty surface.
    pub fn max_score(&self) -> Option<f64> {
        self.scores.iter().copied().reduce(f64::max)
    }
}

/// Scores two equal-shaped grids with a whole-grid product-sum.
///
/// Fails with `DimensionMismatch` when the shapes differ.
pub fn correlate_same(a: &Grid, b: &Grid, config: &CorrConfig) -> EdgeScreenResult<f64> {
    check_normalization(config)?;
    if !a.same_shape(b) {
        return Err(EdgeScreenError::DimensionMismatch {
            a_width: a.width(),
            a_height: a.height(),
            b_width: b.width(),
            b_height: b.height(),
        });
    }
    let dot: f64 = a
        .as_slice()
        .iter()
        .zip(b.as_slice())
        .map(|(x, y)| x * y)
        .sum();
    Ok(dot / config.normalization)
}

/// Scores every placement of `template` inside `input`.
///
/// Offsets range over `[0, input - template)` per axis with exclusive upper
/// bounds, so a template matching either input dimension exactly yields an
/// empty surface, as does one exceeding the input. Callers must check
/// `is_empty` before reducing the surface.
pub fn correlate_template(
    input: &Grid,
    template: &Grid,
    config: &CorrConfig,
) -> EdgeScreenResult<CorrelationSurface> {
    check_normalization(config)?;
    let (out_width, out_height) = match placement_extent(input, template) {
        Some(extent) => extent,
        None => return Ok(CorrelationSurface::empty()),
    };

    let mut scores = Vec::with_capacity(out_width * out_height);
    for y in 0..out_height {
        for x in 0..out_width {
            scores.push(window_score(input, template, x, y, config.normalization));
        }
    }
    Ok(CorrelationSurface::new(scores, out_width, out_height))
}

pub(crate) fn check_normalization(config: &CorrConfig) -> EdgeScreenResult<()> {
    if config.normalization == 0.0 {
        return Err(EdgeScreenError::InvalidInput(
            "normalization must be non-zero",
        ));
    }
    Ok(())
}

/// Placement counts per axis, or `None` when the template does not fit.
pub(crate) fn placement_extent(input: &Grid, template: &Grid) -> Option<(usize, usize)> {
    let out_width = input.width().checked_sub(template.width())?;
    let out_height = input.height().checked_sub(template.height())?;
    if out_width == 0 || out_height == 0 {
        return None;
    }
    Some((out_width, out_height))
}

pub(crate) fn window_score(
    input: &Grid,
    template: &Grid,
    x: usize,
    y: usize,
    normalization: f64,
) -> f64 {
    let mut dot = 0.0f64;
    for ty in 0..template.height() {
        let img_row = input.row(y + ty).expect("placement row is in range");
        let tpl_row = template.row(ty).expect("template row is in range");
        for (tx, t) in tpl_row.iter().enumerate() {
            dot += img_row[x + tx] * t;
        }
    }
    dot / normalization
}
