//! EdgeScreen distinguishes a known subject from unknown subjects in still
//! images: a Canny-style edge detection pipeline, sliding-window
//! correlation scoring, and threshold-interval classification.
//!
//! The core operates purely on in-memory `f64` grids; grayscale conversion
//! and file handling live at the boundary (see the `image-io` feature and
//! the CLI). Optional batch and scan parallelism via the `rayon` feature,
//! optional stage instrumentation via the `tracing` feature.

pub mod classify;
pub mod corr;
pub mod edge;
pub mod grid;
pub mod screen;
pub(crate) mod trace;
pub mod util;

pub use classify::{
    classify, derive_range, evaluate_set, peak_score, Label, RangeDiagnostics, SetCounts,
    ThresholdRange,
};
pub use corr::{correlate_same, correlate_template, CorrConfig, CorrelationSurface};
pub use edge::{
    convolve, detect_edges, gradient, link, suppress, threshold, EdgeConfig, EdgeState,
    GradientKernels, GradientMap, StateGrid,
};
pub use grid::{Grid, Kernel};
pub use screen::{BatchReport, BatchScores, ScreenConfig, ScreenMode, Screener};
pub use util::{EdgeScreenError, EdgeScreenResult};

#[cfg(feature = "rayon")]
pub use corr::rayon::correlate_template_par;

#[cfg(feature = "image-io")]
pub use grid::io;
