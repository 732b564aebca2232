//! Rayon-parallel template correlation (feature-gated).
//!
//! Parallelizes over placement rows; results are identical to the
//! sequential scan.

use crate::corr::{check_normalization, placement_extent, window_score, CorrConfig, CorrelationSurface};
use crate::grid::Grid;
use crate::util::EdgeScreenResult;
use rayon::prelude::*;

/// Row-parallel equivalent of [`correlate_template`].
///
/// [`correlate_template`]: crate::corr::correlate_template
pub fn correlate_template_par(
    input: &Grid,
    template: &Grid,
    config: &CorrConfig,
) -> EdgeScreenResult<CorrelationSurface> {
    check_normalization(config)?;
    let (out_width, out_height) = match placement_extent(input, template) {
        Some(extent) => extent,
        None => return Ok(CorrelationSurface::empty()),
    };

    let rows: Vec<Vec<f64>> = (0..out_height)
        .into_par_iter()
        .map(|y| {
            (0..out_width)
                .map(|x| window_score(input, template, x, y, config.normalization))
                .collect()
        })
        .collect();

    let mut scores = Vec::with_capacity(out_width * out_height);
    for row in rows {
        scores.extend(row);
    }
    Ok(CorrelationSurface::new(scores, out_width, out_height))
}
