//! Heatmap renderer command line.
//!
//! Reads weighted points from a JSON or CSV file and writes a PNG heatmap:
//! - Options from flags, an optional YAML job file and `HEATMAP_*` variables
//! - Bounds default to the extent of the points
//! - Density or weighted-average interpolation

mod config;
mod input;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use heatmap_common::{BoundingBox, HeatmapError};
use heatmap_renderer::{BitDepth, Heatmap, RenderOptions, StrategyKind};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use config::{load_legend, JobConfig};

#[derive(Parser, Debug)]
#[command(name = "heatmap")]
#[command(about = "Render weighted geographic points into a PNG heatmap")]
pub struct Args {
    /// Point file (.json array or .csv with lat,lng,value,id columns)
    #[arg(short, long)]
    points: Option<PathBuf>,

    /// Bounds as min_lat,min_lng,max_lat,max_lng (default: extent of the points)
    #[arg(short, long, allow_hyphen_values = true)]
    bounds: Option<String>,

    /// Output height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Output width in pixels (default: from the bounds aspect ratio)
    #[arg(long)]
    width: Option<u32>,

    /// Distance in degrees beyond which a point has no influence
    #[arg(short, long)]
    effect_distance: Option<f64>,

    /// Interpolation strategy: density or weighted-average
    #[arg(short, long)]
    strategy: Option<StrategyKind>,

    /// Nearest points used by the weighted-average strategy
    #[arg(long)]
    neighbours: Option<usize>,

    /// Legend file (.json or .yaml)
    #[arg(long)]
    legend: Option<PathBuf>,

    /// YAML job file
    #[arg(short, long, env = "HEATMAP_CONFIG")]
    config: Option<PathBuf>,

    /// PNG channel depth: 8 or 16
    #[arg(long)]
    bit_depth: Option<u8>,

    /// Output PNG path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level
    #[arg(long, env = "HEATMAP_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, env = "HEATMAP_LOG_JSON")]
    log_json: bool,
}

fn main() -> ExitCode {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    if let Err(e) = init_tracing(&args.log_level, args.log_json) {
        eprintln!("Failed to initialize logging: {:#}", e);
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<HeatmapError>() {
                Some(cause) => error!(code = cause.code(), "{:#}", e),
                None => error!("{:#}", e),
            }
            ExitCode::from(exit_status(&e))
        }
    }
}

/// 2 when the caller's input or options were rejected, 1 for anything else.
fn exit_status(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<HeatmapError>() {
        Some(cause) if cause.is_input_error() => 2,
        _ => 1,
    }
}

fn run(args: &Args) -> Result<()> {
    let job = match &args.config {
        Some(path) => JobConfig::load(path)?,
        None => JobConfig::default(),
    };

    let mut options = job.apply(RenderOptions::from_env())?;
    apply_args(&mut options, args)?;
    options.validate()?;

    let points_path = args
        .points
        .clone()
        .or_else(|| job.points.clone())
        .context("No point file given (use --points or `points:` in the job file)")?;
    let output = args
        .output
        .clone()
        .or_else(|| job.output.clone())
        .unwrap_or_else(|| PathBuf::from("heatmap.png"));

    let points = input::load_points(&points_path)?;
    info!(path = %points_path.display(), count = points.len(), "Loaded points");

    let bbox = match args.bounds.as_deref().or(job.bounds.as_deref()) {
        Some(bounds) => bounds
            .parse::<BoundingBox>()
            .map_err(|e| HeatmapError::InvalidBounds(e.to_string()))
            .with_context(|| format!("Invalid bounds: {}", bounds))?,
        None => BoundingBox::enclosing(&points, options.effect_distance)
            .context("Could not derive bounds from the points")?,
    };
    info!(bounds = %bbox, strategy = %options.strategy, "Rendering heatmap");

    let heatmap = Heatmap::render(&points, bbox, &options)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    heatmap
        .save(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    let stats = heatmap.stats();
    info!(
        output = %output.display(),
        width = heatmap.buffer().width(),
        height = heatmap.buffer().height(),
        pixels_colored = stats.pixels_colored,
        "Wrote heatmap"
    );

    Ok(())
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

/// Overlay command line flags, which take precedence over everything else.
fn apply_args(options: &mut RenderOptions, args: &Args) -> Result<()> {
    if let Some(height) = args.height {
        options.height = height;
    }
    if let Some(width) = args.width {
        options.width = Some(width);
    }
    if let Some(distance) = args.effect_distance {
        options.effect_distance = distance;
    }
    if let Some(strategy) = args.strategy {
        options.strategy = strategy;
    }
    if let Some(neighbours) = args.neighbours {
        options.neighbours = neighbours;
    }
    if let Some(depth) = args.bit_depth {
        options.bit_depth = BitDepth::try_from(depth)?;
    }
    if let Some(path) = &args.legend {
        options.legend = Some(load_legend(path)?);
    }
    Ok(())
}
