//! Score reduction, labeling and set-level tallies.

use crate::corr::CorrelationSurface;
use crate::util::{EdgeScreenError, EdgeScreenResult};

/// Classification outcome for a single image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Label {
    Friendly,
    Hostile,
}

/// Open interval of scores classified as friendly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThresholdRange {
    low: f64,
    high: f64,
}

impl ThresholdRange {
    /// Creates a range. `low` must not exceed `high`; NaN bounds are
    /// rejected.
    pub fn new(low: f64, high: f64) -> EdgeScreenResult<Self> {
        if !(low <= high) {
            return Err(EdgeScreenError::InvalidInput(
                "threshold range requires low <= high",
            ));
        }
        Ok(Self { low, high })
    }

    /// Returns the lower bound.
    pub fn low(&self) -> f64 {
        self.low
    }

    /// Returns the upper bound.
    pub fn high(&self) -> f64 {
        self.high
    }
}

/// Reduces a correlation surface to its best-alignment score.
///
/// Fails with `EmptyResult` on an empty surface.
pub fn peak_score(surface: &CorrelationSurface) -> EdgeScreenResult<f64> {
    surface.max_score().ok_or(EdgeScreenError::EmptyResult {
        reason: "empty correlation surface",
    })
}

/// Labels a score against the friendly interval, strict on both ends.
///
/// A score equal to either bound classifies hostile.
pub fn classify(score: f64, range: &ThresholdRange) -> Label {
    if range.low < score && score < range.high {
        Label::Friendly
    } else {
        Label::Hostile
    }
}

/// Friendly/hostile tallies across an image set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SetCounts {
    pub friendly: usize,
    pub hostile: usize,
}

/// Tallies labels across a set of scores. An empty set tallies (0, 0).
pub fn evaluate_set(scores: &[f64], range: &ThresholdRange) -> SetCounts {
    let mut counts = SetCounts::default();
    for &score in scores {
        match classify(score, range) {
            Label::Friendly => counts.friendly += 1,
            Label::Hostile => counts.hostile += 1,
        }
    }
    counts
}

/// Observed score extrema for threshold calibration.
///
/// The suggested range brackets the friendly set; operators typically widen
/// or shift it by hand after inspecting the hostile extrema.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangeDiagnostics {
    pub friendly_min: f64,
    pub friendly_max: f64,
    pub hostile_min: Option<f64>,
    pub hostile_max: Option<f64>,
}

impl RangeDiagnostics {
    /// Returns the candidate range spanning the friendly extrema.
    ///
    /// Classification is strict on both ends, so the extremal friendly
    /// scores themselves fall outside this range; it is a starting point
    /// for a manual override, not a finished calibration.
    pub fn suggested_range(&self) -> ThresholdRange {
        ThresholdRange {
            low: self.friendly_min,
            high: self.friendly_max,
        }
    }
}

/// Derives calibration diagnostics from scored friendly and hostile sets.
///
/// The hostile set may be empty; an empty friendly set fails with
/// `DegenerateInput`.
pub fn derive_range(friendly: &[f64], hostile: &[f64]) -> EdgeScreenResult<RangeDiagnostics> {
    let (friendly_min, friendly_max) =
        extrema(friendly).ok_or(EdgeScreenError::DegenerateInput {
            reason: "empty friendly score set",
        })?;
    let hostile_extrema = extrema(hostile);
    Ok(RangeDiagnostics {
        friendly_min,
        friendly_max,
        hostile_min: hostile_extrema.map(|(min, _)| min),
        hostile_max: hostile_extrema.map(|(_, max)| max),
    })
}

fn extrema(scores: &[f64]) -> Option<(f64, f64)> {
    scores.iter().fold(None, |acc, &s| match acc {
        None => Some((s, s)),
        Some((min, max)) => Some((min.min(s), max.max(s))),
    })
}
