//! YAML job files and legend loading.
//!
//! A job file describes one render. Every field is optional; fields that are
//! present override the environment, and command line flags override the
//! job file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use heatmap_renderer::{BitDepth, LegendConfig, RenderOptions, StrategyKind};
use serde::Deserialize;
use tracing::debug;

/// A render job loaded from YAML.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JobConfig {
    /// Point file; relative paths resolve against the job file.
    pub points: Option<PathBuf>,
    /// Bounds as `min_lat,min_lng,max_lat,max_lng`.
    pub bounds: Option<String>,
    pub output: Option<PathBuf>,
    pub height: Option<u32>,
    pub width: Option<u32>,
    pub effect_distance: Option<f64>,
    pub strategy: Option<StrategyKind>,
    pub neighbours: Option<usize>,
    pub bit_depth: Option<BitDepth>,
    /// Inline legend.
    pub legend: Option<LegendConfig>,
    /// Legend file, used when no inline legend is given.
    pub legend_file: Option<PathBuf>,
}

impl JobConfig {
    /// Load a job configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read job file: {}", path.display()))?;

        let mut job: JobConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse job file: {}", path.display()))?;

        if let Some(base) = path.parent() {
            job.resolve_paths(base);
        }

        debug!(path = %path.display(), "Loaded job config");
        Ok(job)
    }

    fn resolve_paths(&mut self, base: &Path) {
        for slot in [&mut self.points, &mut self.output, &mut self.legend_file] {
            if let Some(p) = slot.as_mut() {
                if p.is_relative() {
                    *p = base.join(&*p);
                }
            }
        }
    }

    /// Overlay the fields present in this job onto `options`.
    pub fn apply(&self, mut options: RenderOptions) -> Result<RenderOptions> {
        if let Some(height) = self.height {
            options.height = height;
        }
        if let Some(width) = self.width {
            options.width = Some(width);
        }
        if let Some(distance) = self.effect_distance {
            options.effect_distance = distance;
        }
        if let Some(strategy) = self.strategy {
            options.strategy = strategy;
        }
        if let Some(neighbours) = self.neighbours {
            options.neighbours = neighbours;
        }
        if let Some(depth) = self.bit_depth {
            options.bit_depth = depth;
        }

        if let Some(legend) = &self.legend {
            options.legend = Some(legend.clone());
        } else if let Some(path) = &self.legend_file {
            options.legend = Some(load_legend(path)?);
        }

        Ok(options)
    }
}

/// Load a legend from a `.yaml`/`.yml` file, or JSON otherwise.
pub fn load_legend(path: &Path) -> Result<LegendConfig> {
    let is_yaml = path
        .extension()
        .map_or(false, |ext| ext == "yaml" || ext == "yml");

    let legend = if is_yaml {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read legend file: {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse legend file: {}", path.display()))?
    } else {
        LegendConfig::from_file(path)
            .with_context(|| format!("Failed to load legend file: {}", path.display()))?
    };

    // surface bad colors or thresholds before any points are read
    legend
        .build()
        .with_context(|| format!("Invalid legend in {}", path.display()))?;

    debug!(path = %path.display(), stops = legend.stops.len(), "Loaded legend");
    Ok(legend)
}
