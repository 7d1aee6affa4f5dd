//! Point file loading.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{bail, Context, Result};
use heatmap_common::GeoPoint;
use serde::Deserialize;
use tracing::{debug, warn};

/// JSON point files hold either a bare array or `{"points": [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonPoints {
    List(Vec<GeoPoint>),
    Wrapped { points: Vec<GeoPoint> },
}

/// Load points from a `.csv` file or a JSON file (any other extension).
///
/// CSV files need a header row naming `lat`, `lng` and `id`; a missing
/// `value` column gives every point a value of 1.
pub fn load_points(path: &Path) -> Result<Vec<GeoPoint>> {
    let is_csv = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("csv"));

    let points = if is_csv {
        load_csv(path)?
    } else {
        load_json(path)?
    };

    if points.is_empty() {
        bail!("No points in {}", path.display());
    }

    let non_finite = points.iter().filter(|p| !p.is_finite()).count();
    if non_finite > 0 {
        warn!(count = non_finite, "Points with non-finite fields will be skipped");
    }

    Ok(points)
}

fn load_json(path: &Path) -> Result<Vec<GeoPoint>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open point file: {}", path.display()))?;

    let parsed: JsonPoints = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse point file: {}", path.display()))?;

    Ok(match parsed {
        JsonPoints::List(points) | JsonPoints::Wrapped { points } => points,
    })
}

fn load_csv(path: &Path) -> Result<Vec<GeoPoint>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open point file: {}", path.display()))?;

    let mut points = Vec::new();
    for (row, record) in reader.deserialize::<GeoPoint>().enumerate() {
        // header is line 1
        let point = record.with_context(|| format!("{}: bad row {}", path.display(), row + 2))?;
        points.push(point);
    }

    debug!(path = %path.display(), rows = points.len(), "Parsed CSV points");
    Ok(points)
}
