use clap::Parser;
use edgescreen::io::load_gray_grid;
use edgescreen::{
    derive_range, evaluate_set, CorrConfig, EdgeConfig, ScreenConfig, ScreenMode, Screener,
    ThresholdRange,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "EdgeScreen CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for progress and profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
enum ModeConfig {
    Intensity,
    #[default]
    Edges,
}

impl From<&ModeConfig> for ScreenMode {
    fn from(value: &ModeConfig) -> Self {
        match value {
            ModeConfig::Intensity => ScreenMode::Intensity,
            ModeConfig::Edges => ScreenMode::Edges,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct EdgeConfigJson {
    low_ratio: f64,
    high_ratio: f64,
    weak_value: f64,
    strong_value: f64,
}

impl Default for EdgeConfigJson {
    fn default() -> Self {
        let cfg = EdgeConfig::default();
        Self {
            low_ratio: cfg.low_ratio,
            high_ratio: cfg.high_ratio,
            weak_value: cfg.weak_value,
            strong_value: cfg.strong_value,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct CorrConfigJson {
    normalization: f64,
}

impl Default for CorrConfigJson {
    fn default() -> Self {
        Self {
            normalization: CorrConfig::default().normalization,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RangeJson {
    low: f64,
    high: f64,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct Config {
    template_path: String,
    friendly_dir: String,
    hostile_dir: Option<String>,
    output_path: Option<String>,
    mode: ModeConfig,
    range: Option<RangeJson>,
    parallel: bool,
    edge: EdgeConfigJson,
    corr: CorrConfigJson,
}

#[derive(Debug, Serialize)]
struct SkipRecord {
    path: String,
    error: String,
}

#[derive(Debug, Serialize)]
struct SetReport {
    images: usize,
    scored: usize,
    friendly: Option<usize>,
    hostile: Option<usize>,
    min_score: Option<f64>,
    max_score: Option<f64>,
    skipped: Vec<SkipRecord>,
}

#[derive(Debug, Serialize)]
struct RangeRecord {
    low: f64,
    high: f64,
}

#[derive(Debug, Serialize)]
struct Output {
    friendly: SetReport,
    hostile: Option<SetReport>,
    range: Option<RangeRecord>,
    suggested_range: Option<RangeRecord>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive("edgescreen=info".parse()?),
            )
            .with_target(false)
            .init();
    }

    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.template_path.is_empty() || config.friendly_dir.is_empty() {
        return Err("template_path and friendly_dir must be set in the config".into());
    }

    let range = config
        .range
        .as_ref()
        .map(|r| ThresholdRange::new(r.low, r.high))
        .transpose()?;

    let template = load_gray_grid(&config.template_path)?;
    let mut screen_cfg = ScreenConfig::new(ScreenMode::from(&config.mode));
    screen_cfg.edge.low_ratio = config.edge.low_ratio;
    screen_cfg.edge.high_ratio = config.edge.high_ratio;
    screen_cfg.edge.weak_value = config.edge.weak_value;
    screen_cfg.edge.strong_value = config.edge.strong_value;
    screen_cfg.corr.normalization = config.corr.normalization;
    screen_cfg.parallel = config.parallel;
    if let Some(range) = range {
        screen_cfg = screen_cfg.with_range(range);
    }
    let screener = Screener::new(template, screen_cfg)?;

    let (friendly_report, friendly_scores) =
        run_set(&screener, Path::new(&config.friendly_dir), range.as_ref())?;
    let mut hostile_report = None;
    let mut hostile_scores = Vec::new();
    if let Some(dir) = &config.hostile_dir {
        let (report, scores) = run_set(&screener, Path::new(dir), range.as_ref())?;
        hostile_report = Some(report);
        hostile_scores = scores;
    }

    let suggested_range = derive_range(&friendly_scores, &hostile_scores)
        .ok()
        .map(|diag| {
            let suggested = diag.suggested_range();
            RangeRecord {
                low: suggested.low(),
                high: suggested.high(),
            }
        });

    let output = Output {
        friendly: friendly_report,
        hostile: hostile_report,
        range: range.map(|r| RangeRecord {
            low: r.low(),
            high: r.high(),
        }),
        suggested_range,
    };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}

/// Scores every image file in `dir`, tallying against `range` when one is
/// configured. Unreadable files and unscorable images are recorded as
/// skips, never aborting the set.
fn run_set(
    screener: &Screener,
    dir: &Path,
    range: Option<&ThresholdRange>,
) -> Result<(SetReport, Vec<f64>), Box<dyn std::error::Error>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    paths.sort();
    let images = paths.len();

    let mut skipped = Vec::new();
    let mut grids = Vec::new();
    let mut grid_paths = Vec::new();
    for path in paths {
        match load_gray_grid(&path) {
            Ok(grid) => {
                grids.push(grid);
                grid_paths.push(path);
            }
            Err(err) => skipped.push(SkipRecord {
                path: path.display().to_string(),
                error: err.to_string(),
            }),
        }
    }

    let batch = screener.score_batch(&grids);
    for (index, error) in &batch.skipped {
        skipped.push(SkipRecord {
            path: grid_paths[*index].display().to_string(),
            error: error.to_string(),
        });
    }

    let scores: Vec<f64> = batch.scores.iter().map(|&(_, score)| score).collect();
    let counts = range.map(|r| evaluate_set(&scores, r));
    let min_score = scores.iter().copied().reduce(f64::min);
    let max_score = scores.iter().copied().reduce(f64::max);

    tracing::info!(
        dir = %dir.display(),
        images,
        scored = scores.len(),
        skipped = skipped.len(),
        "set evaluated"
    );

    let report = SetReport {
        images,
        scored: scores.len(),
        friendly: counts.map(|c| c.friendly),
        hostile: counts.map(|c| c.hostile),
        min_score,
        max_score,
        skipped,
    };
    Ok((report, scores))
}
