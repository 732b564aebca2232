//! One-pass hysteresis linking of weak edges.
//!
//! A weak interior cell is promoted when any of its eight neighbors is
//! strong in the input state grid; promotion never cascades within the
//! pass. This is deliberately not a transitive flood fill: a weak cell two
//! hops from the nearest strong cell stays unpromoted even through a chain
//! of weak cells.

use crate::edge::threshold::{EdgeState, StateGrid};
use crate::grid::Grid;

/// Renders `state` to a numeric edge map, promoting interior weak cells
/// with a strong 8-neighbor and discarding the rest.
///
/// Interior cells end at `strong_value` or zero. Border cells render their
/// input state unchanged, so a weak border cell keeps `weak_value`; callers
/// needing a strictly binary border can threshold at `strong_value`.
pub fn link(state: &StateGrid, weak_value: f64, strong_value: f64) -> Grid {
    let width = state.width();
    let height = state.height();
    let states = state.states();

    let mut out = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let interior = x > 0 && x + 1 < width && y > 0 && y + 1 < height;
            let value = match states[y * width + x] {
                EdgeState::Strong => strong_value,
                EdgeState::Suppressed => 0.0,
                EdgeState::Weak if !interior => weak_value,
                EdgeState::Weak => {
                    if has_strong_neighbor(states, width, x, y) {
                        strong_value
                    } else {
                        0.0
                    }
                }
            };
            out.push(value);
        }
    }

    Grid::from_vec(out, width, height).expect("state grid dimensions are valid")
}

/// Checks the eight neighbors of an interior cell for a strong state.
fn has_strong_neighbor(states: &[EdgeState], width: usize, x: usize, y: usize) -> bool {
    for ny in y - 1..=y + 1 {
        for nx in x - 1..=x + 1 {
            if (nx, ny) == (x, y) {
                continue;
            }
            if states[ny * width + nx] == EdgeState::Strong {
                return true;
            }
        }
    }
    false
}
