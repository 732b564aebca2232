use edgescreen::{
    EdgeScreenError, Grid, Label, ScreenConfig, ScreenMode, Screener, ThresholdRange,
};

fn blob_image(width: usize, height: usize, x0: usize, y0: usize, side: usize) -> Grid {
    let mut data = vec![0.0; width * height];
    for y in y0..y0 + side {
        for x in x0..x0 + side {
            data[y * width + x] = 200.0;
        }
    }
    Grid::from_vec(data, width, height).unwrap()
}

fn embed(template: &Grid, width: usize, height: usize, x0: usize, y0: usize) -> Grid {
    let mut data = vec![0.0; width * height];
    for y in 0..template.height() {
        for x in 0..template.width() {
            data[(y0 + y) * width + (x0 + x)] = template.get(x, y).unwrap();
        }
    }
    Grid::from_vec(data, width, height).unwrap()
}

fn ramp_template() -> Grid {
    let data: Vec<f64> = (1..=30).map(f64::from).collect();
    Grid::from_vec(data, 6, 5).unwrap()
}

fn self_product(template: &Grid) -> f64 {
    template.as_slice().iter().map(|v| v * v).sum::<f64>() / 1000.0
}

#[test]
fn intensity_peak_finds_embedded_template() {
    let template = ramp_template();
    let image = embed(&template, 20, 16, 3, 4);

    let screener =
        Screener::new(template.clone(), ScreenConfig::new(ScreenMode::Intensity)).unwrap();
    let score = screener.score_image(&image).unwrap();
    assert!((score - self_product(&template)).abs() < 1e-9);
}

#[test]
fn same_shape_images_use_whole_grid_comparison() {
    // an equal-size template has no sliding placement, so this must go
    // through the whole-grid comparison path
    let template = blob_image(8, 8, 2, 2, 4);
    let screener =
        Screener::new(template.clone(), ScreenConfig::new(ScreenMode::Intensity)).unwrap();
    let score = screener.score_image(&template).unwrap();
    assert!((score - self_product(&template)).abs() < 1e-9);
}

#[test]
fn classification_follows_configured_range() {
    let template = ramp_template();
    let friendly = embed(&template, 20, 16, 3, 4);
    let hostile = Grid::zeros(20, 16).unwrap();

    let peak = self_product(&template);
    let range = ThresholdRange::new(peak * 0.9, peak * 1.1).unwrap();
    let config = ScreenConfig::new(ScreenMode::Intensity).with_range(range);
    let screener = Screener::new(template, config).unwrap();

    assert_eq!(screener.classify_image(&friendly).unwrap(), Label::Friendly);
    assert_eq!(screener.classify_image(&hostile).unwrap(), Label::Hostile);
}

#[test]
fn batch_skips_and_records_failures() {
    let template = ramp_template();
    let friendly = embed(&template, 20, 16, 3, 4);
    let hostile = Grid::zeros(20, 16).unwrap();
    // too small for the template to slide over
    let tiny = Grid::zeros(4, 4).unwrap();

    let peak = self_product(&template);
    let range = ThresholdRange::new(peak * 0.9, peak * 1.1).unwrap();
    let screener = Screener::new(
        template,
        ScreenConfig::new(ScreenMode::Intensity).with_range(range),
    )
    .unwrap();

    let images = vec![friendly, tiny, hostile];
    let report = screener.evaluate_batch(&images).unwrap();

    assert_eq!(report.counts.friendly, 1);
    assert_eq!(report.counts.hostile, 1);
    assert_eq!(report.scores.len(), 2);
    assert_eq!(report.skipped.len(), 1);
    let (index, error) = &report.skipped[0];
    assert_eq!(*index, 1);
    assert_eq!(
        *error,
        EdgeScreenError::EmptyResult {
            reason: "empty correlation surface",
        }
    );
}

#[test]
fn labeling_without_a_range_is_rejected() {
    let template = Grid::constant(4, 4, 1.0).unwrap();
    let screener =
        Screener::new(template.clone(), ScreenConfig::new(ScreenMode::Intensity)).unwrap();

    assert!(screener.score_image(&template).is_ok());
    let err = screener.classify_image(&template).err().unwrap();
    assert_eq!(
        err,
        EdgeScreenError::InvalidInput("no threshold range configured")
    );
    assert!(screener.evaluate_batch(std::slice::from_ref(&template)).is_err());
}

#[test]
fn edges_mode_separates_matching_and_shifted_scenes() {
    let template = blob_image(16, 16, 5, 5, 6);
    let shifted = blob_image(16, 16, 7, 7, 6);

    let screener =
        Screener::new(template.clone(), ScreenConfig::new(ScreenMode::Edges)).unwrap();
    let self_score = screener.score_image(&template).unwrap();
    let shifted_score = screener.score_image(&shifted).unwrap();
    assert!(self_score > 0.0);
    assert!(self_score > shifted_score);

    let gap = self_score - shifted_score;
    let range = ThresholdRange::new(self_score - gap / 2.0, self_score + gap / 2.0).unwrap();
    let config = ScreenConfig::new(ScreenMode::Edges).with_range(range);
    let screener = Screener::new(template.clone(), config).unwrap();
    assert_eq!(screener.classify_image(&template).unwrap(), Label::Friendly);
    assert_eq!(screener.classify_image(&shifted).unwrap(), Label::Hostile);
}

#[test]
fn flat_scene_is_skipped_in_edges_mode() {
    let template = blob_image(16, 16, 5, 5, 6);
    let flat = Grid::constant(16, 16, 40.0).unwrap();
    let screener = Screener::new(template, ScreenConfig::new(ScreenMode::Edges)).unwrap();

    let err = screener.score_image(&flat).err().unwrap();
    assert_eq!(
        err,
        EdgeScreenError::DegenerateInput {
            reason: "zero-valued magnitude maximum",
        }
    );

    let batch = screener.score_batch(std::slice::from_ref(&flat));
    assert!(batch.scores.is_empty());
    assert_eq!(batch.skipped.len(), 1);
}

#[test]
fn degenerate_template_fails_construction_in_edges_mode() {
    let flat = Grid::constant(12, 12, 7.0).unwrap();
    let err = Screener::new(flat, ScreenConfig::new(ScreenMode::Edges))
        .err()
        .unwrap();
    assert_eq!(
        err,
        EdgeScreenError::DegenerateInput {
            reason: "zero-valued magnitude maximum",
        }
    );
}
