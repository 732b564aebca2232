//! Non-maximum suppression along the quantized gradient direction.
//!
//! The border ring is always zero: neighbor comparison is restricted to the
//! interior, with no wraparound at the edges.

use crate::grid::Grid;
use crate::util::{EdgeScreenError, EdgeScreenResult};

/// Thins `magnitude` by keeping interior cells that are at least as large
/// as both magnitude neighbors along their quantized direction.
///
/// Every output cell is bounded above by the input magnitude at that cell.
/// Fails with `DimensionMismatch` when the two grids differ in shape.
pub fn suppress(magnitude: &Grid, direction: &Grid) -> EdgeScreenResult<Grid> {
    if !magnitude.same_shape(direction) {
        return Err(EdgeScreenError::DimensionMismatch {
            a_width: magnitude.width(),
            a_height: magnitude.height(),
            b_width: direction.width(),
            b_height: direction.height(),
        });
    }

    let width = magnitude.width();
    let height = magnitude.height();
    let mut out = vec![0.0f64; width * height];
    if width < 3 || height < 3 {
        return Grid::from_vec(out, width, height);
    }

    for y in 1..height - 1 {
        let mag_prev = magnitude.row(y - 1).expect("interior row is in range");
        let mag_row = magnitude.row(y).expect("interior row is in range");
        let mag_next = magnitude.row(y + 1).expect("interior row is in range");
        let dir_row = direction.row(y).expect("interior row is in range");

        for x in 1..width - 1 {
            let mag = mag_row[x];
            let (ahead, behind) = match dir_row[x] as i64 {
                0 => (mag_row[x + 1], mag_row[x - 1]),
                45 => (mag_next[x - 1], mag_prev[x + 1]),
                90 => (mag_next[x], mag_prev[x]),
                135 => (mag_next[x + 1], mag_prev[x - 1]),
                // non-canonical directions never come from the pipeline
                _ => continue,
            };
            if mag >= ahead && mag >= behind {
                out[y * width + x] = mag;
            }
        }
    }

    Grid::from_vec(out, width, height)
}
