//! Double thresholding of a suppressed magnitude map.
//!
//! Thresholds are data-derived: `high = max(magnitude) * high_ratio`,
//! `low = high * low_ratio`.

use crate::grid::Grid;
use crate::util::{EdgeScreenError, EdgeScreenResult};

/// Per-cell state after double thresholding.
///
/// Strong and weak are mutually exclusive; a cell at exactly the high
/// threshold is strong.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeState {
    Suppressed,
    Weak,
    Strong,
}

/// Grid of edge states produced by [`threshold`].
#[derive(Clone, Debug)]
pub struct StateGrid {
    states: Vec<EdgeState>,
    width: usize,
    height: usize,
}

impl StateGrid {
    /// Returns the grid width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the grid height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the state at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<EdgeState> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.states.get(y * self.width + x).copied()
    }

    /// Returns the states in row-major order.
    pub fn states(&self) -> &[EdgeState] {
        &self.states
    }
}

/// Classifies each magnitude cell against two data-derived thresholds.
///
/// Both ratios must lie in (0, 1). Fails with `DegenerateInput` when the
/// magnitude maximum is zero, since the thresholds scale from it.
pub fn threshold(
    magnitude: &Grid,
    low_ratio: f64,
    high_ratio: f64,
) -> EdgeScreenResult<StateGrid> {
    if !(low_ratio > 0.0 && low_ratio < 1.0) {
        return Err(EdgeScreenError::InvalidInput("low_ratio must lie in (0, 1)"));
    }
    if !(high_ratio > 0.0 && high_ratio < 1.0) {
        return Err(EdgeScreenError::InvalidInput(
            "high_ratio must lie in (0, 1)",
        ));
    }

    let max = magnitude.max_value();
    if max <= 0.0 {
        return Err(EdgeScreenError::DegenerateInput {
            reason: "zero-valued magnitude maximum",
        });
    }

    let high = max * high_ratio;
    let low = high * low_ratio;
    let states = magnitude
        .as_slice()
        .iter()
        .map(|&m| {
            if m >= high {
                EdgeState::Strong
            } else if m >= low {
                EdgeState::Weak
            } else {
                EdgeState::Suppressed
            }
        })
        .collect();

    Ok(StateGrid {
        states,
        width: magnitude.width(),
        height: magnitude.height(),
    })
}
