#![cfg(feature = "rayon")]

use edgescreen::{
    correlate_template, correlate_template_par, CorrConfig, Grid, ScreenConfig, ScreenMode,
    Screener, ThresholdRange,
};

fn make_grid(width: usize, height: usize) -> Grid {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            data.push((((x * 13) ^ (y * 7) ^ (x * y)) & 0xFF) as f64);
        }
    }
    Grid::from_vec(data, width, height).unwrap()
}

#[test]
fn parallel_scan_matches_sequential() {
    let input = make_grid(64, 48);
    let template = make_grid(16, 12);
    let cfg = CorrConfig::default();

    let seq = correlate_template(&input, &template, &cfg).unwrap();
    let par = correlate_template_par(&input, &template, &cfg).unwrap();
    assert_eq!(seq, par);
}

#[test]
fn parallel_scan_handles_unfitting_templates() {
    let input = make_grid(8, 8);
    let template = make_grid(9, 4);
    let surface = correlate_template_par(&input, &template, &CorrConfig::default()).unwrap();
    assert!(surface.is_empty());
}

#[test]
fn parallel_batch_matches_sequential() {
    let template = make_grid(16, 12);
    let images: Vec<Grid> = (0..6).map(|i| make_grid(40 + i, 30)).collect();
    let range = ThresholdRange::new(0.0, f64::INFINITY).unwrap();

    let sequential = Screener::new(
        template.clone(),
        ScreenConfig::new(ScreenMode::Intensity).with_range(range),
    )
    .unwrap();
    let mut parallel_cfg = ScreenConfig::new(ScreenMode::Intensity).with_range(range);
    parallel_cfg.parallel = true;
    let parallel = Screener::new(template, parallel_cfg).unwrap();

    let seq = sequential.evaluate_batch(&images).unwrap();
    let par = parallel.evaluate_batch(&images).unwrap();
    assert_eq!(seq.counts, par.counts);
    assert_eq!(seq.scores, par.scores);
    assert_eq!(seq.skipped.len(), par.skipped.len());
}
