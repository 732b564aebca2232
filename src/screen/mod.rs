//! High-level screening of images against a reference template.
//!
//! A [`Screener`] owns the template and a configuration, scores images
//! against it and tallies batches. In [`ScreenMode::Edges`] the template's
//! edge map is computed once at construction and reused for every image.

use crate::classify::{classify, evaluate_set, peak_score, Label, SetCounts, ThresholdRange};
use crate::corr::{correlate_same, correlate_template, CorrConfig, CorrelationSurface};
use crate::edge::{detect_edges, EdgeConfig};
use crate::grid::Grid;
use crate::trace::{trace_event, trace_span};
use crate::util::{EdgeScreenError, EdgeScreenResult};

/// Whether images are compared on raw intensity or on their edge maps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScreenMode {
    Intensity,
    Edges,
}

/// Screening configuration.
#[derive(Clone, Debug)]
pub struct ScreenConfig {
    pub mode: ScreenMode,
    pub edge: EdgeConfig,
    pub corr: CorrConfig,
    /// Friendly interval. Scoring works without one; labeling does not.
    pub range: Option<ThresholdRange>,
    /// Evaluate batch images in parallel (effective with the `rayon`
    /// feature).
    pub parallel: bool,
}

impl ScreenConfig {
    /// Creates a config with default stage settings and no range.
    pub fn new(mode: ScreenMode) -> Self {
        Self {
            mode,
            edge: EdgeConfig::default(),
            corr: CorrConfig::default(),
            range: None,
            parallel: false,
        }
    }

    /// Sets the friendly interval.
    pub fn with_range(mut self, range: ThresholdRange) -> Self {
        self.range = Some(range);
        self
    }
}

/// Scores from a batch run with per-image skip records.
///
/// Indices refer to positions in the input slice; an image appears either
/// in `scores` or in `skipped`, never both.
#[derive(Clone, Debug)]
pub struct BatchScores {
    /// `(index, score)` for each successfully scored image.
    pub scores: Vec<(usize, f64)>,
    /// `(index, error)` for each image that failed to score.
    pub skipped: Vec<(usize, EdgeScreenError)>,
}

/// Batch evaluation outcome: tallies plus the underlying scores and skips.
#[derive(Clone, Debug)]
pub struct BatchReport {
    pub counts: SetCounts,
    pub scores: Vec<(usize, f64)>,
    pub skipped: Vec<(usize, EdgeScreenError)>,
}

/// Scores and labels images against an owned reference template.
pub struct Screener {
    template: Grid,
    template_edges: Option<Grid>,
    config: ScreenConfig,
}

impl Screener {
    /// Creates a screener. In edges mode the template's edge map is
    /// computed here and reused across images, so a template that yields a
    /// degenerate edge map fails construction.
    pub fn new(template: Grid, config: ScreenConfig) -> EdgeScreenResult<Self> {
        let template_edges = match config.mode {
            ScreenMode::Edges => Some(detect_edges(&template, &config.edge)?),
            ScreenMode::Intensity => None,
        };
        Ok(Self {
            template,
            template_edges,
            config,
        })
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &ScreenConfig {
        &self.config
    }

    /// Scores one image against the template.
    ///
    /// A same-shape pair is scored as a whole-grid comparison; otherwise
    /// the template slides over the image and the best alignment wins.
    pub fn score_image(&self, image: &Grid) -> EdgeScreenResult<f64> {
        let surface = self.correlate(image)?;
        peak_score(&surface)
    }

    /// Labels one image against the configured range.
    pub fn classify_image(&self, image: &Grid) -> EdgeScreenResult<Label> {
        let range = self.range()?;
        Ok(classify(self.score_image(image)?, &range))
    }

    /// Scores a batch of images, skipping and recording per-image failures.
    pub fn score_batch(&self, images: &[Grid]) -> BatchScores {
        let _guard = trace_span!("score_batch").entered();
        let mut scores = Vec::new();
        let mut skipped = Vec::new();
        for (index, result) in self.score_all(images) {
            match result {
                Ok(score) => scores.push((index, score)),
                Err(error) => skipped.push((index, error)),
            }
        }
        trace_event!("batch_scored", scored = scores.len(), skipped = skipped.len());
        BatchScores { scores, skipped }
    }

    /// Scores and tallies a batch against the configured range.
    ///
    /// Per-image failures are recorded and skipped, never absorbed and
    /// never aborting the batch. Fails only when no range is configured.
    pub fn evaluate_batch(&self, images: &[Grid]) -> EdgeScreenResult<BatchReport> {
        let range = self.range()?;
        let BatchScores { scores, skipped } = self.score_batch(images);
        let values: Vec<f64> = scores.iter().map(|&(_, score)| score).collect();
        Ok(BatchReport {
            counts: evaluate_set(&values, &range),
            scores,
            skipped,
        })
    }

    fn range(&self) -> EdgeScreenResult<ThresholdRange> {
        self.config
            .range
            .ok_or(EdgeScreenError::InvalidInput("no threshold range configured"))
    }

    fn correlate(&self, image: &Grid) -> EdgeScreenResult<CorrelationSurface> {
        match self.config.mode {
            ScreenMode::Intensity => self.correlate_pair(image, &self.template),
            ScreenMode::Edges => {
                let image_edges = detect_edges(image, &self.config.edge)?;
                let template_edges = self
                    .template_edges
                    .as_ref()
                    .expect("edge template is precomputed in edges mode");
                self.correlate_pair(&image_edges, template_edges)
            }
        }
    }

    fn correlate_pair(&self, image: &Grid, template: &Grid) -> EdgeScreenResult<CorrelationSurface> {
        if image.same_shape(template) {
            let score = correlate_same(image, template, &self.config.corr)?;
            return Ok(CorrelationSurface::from_scalar(score));
        }
        self.correlate_windows(image, template)
    }

    #[cfg(feature = "rayon")]
    fn correlate_windows(
        &self,
        image: &Grid,
        template: &Grid,
    ) -> EdgeScreenResult<CorrelationSurface> {
        if self.config.parallel {
            return crate::corr::rayon::correlate_template_par(image, template, &self.config.corr);
        }
        correlate_template(image, template, &self.config.corr)
    }

    #[cfg(not(feature = "rayon"))]
    fn correlate_windows(
        &self,
        image: &Grid,
        template: &Grid,
    ) -> EdgeScreenResult<CorrelationSurface> {
        correlate_template(image, template, &self.config.corr)
    }

    #[cfg(feature = "rayon")]
    fn score_all(&self, images: &[Grid]) -> Vec<(usize, EdgeScreenResult<f64>)> {
        use rayon::prelude::*;
        if self.config.parallel {
            return images
                .par_iter()
                .enumerate()
                .map(|(index, image)| (index, self.score_image(image)))
                .collect();
        }
        images
            .iter()
            .enumerate()
            .map(|(index, image)| (index, self.score_image(image)))
            .collect()
    }

    #[cfg(not(feature = "rayon"))]
    fn score_all(&self, images: &[Grid]) -> Vec<(usize, EdgeScreenResult<f64>)> {
        images
            .iter()
            .enumerate()
            .map(|(index, image)| (index, self.score_image(image)))
            .collect()
    }
}
