//! Per-pixel color computation.
//!
//! Two strategies are provided:
//! - **Density**: distance-weighted sum of nearby point values, with alpha
//!   fading toward the edge of the nearest point's influence.
//! - **Weighted average**: inverse-distance-weighted mean of the values of
//!   the nearest few points, fully opaque.
//!
//! Distances are Euclidean in degrees; no correction is made for the
//! shrinking length of a degree of longitude away from the equator.

use std::fmt;
use std::str::FromStr;

use heatmap_common::{Color, HeatmapError};
use serde::{Deserialize, Serialize};

use crate::legend::ColorLegend;
use crate::preprocess::{PreparedPoint, PreparedPointSet};
use crate::spatial::{RTreeIndex, SpatialIndex};

/// Number of neighbours the weighted-average strategy considers per pixel.
pub const DEFAULT_NEIGHBOURS: usize = 5;

/// Selects the interpolation used for a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    #[default]
    Density,
    #[serde(alias = "weighted-average", alias = "idw")]
    WeightedAverage,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Density => "density",
            StrategyKind::WeightedAverage => "weighted_average",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = HeatmapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "density" => Ok(StrategyKind::Density),
            "weighted_average" | "idw" => Ok(StrategyKind::WeightedAverage),
            other => Err(HeatmapError::ConfigError(format!(
                "unknown strategy '{}' (expected density or weighted_average)",
                other
            ))),
        }
    }
}

/// Computes the color of a single pixel from its geographic location.
pub trait RenderStrategy {
    /// Points whose influence windows drive the raster scan.
    fn working_set(&self) -> &[PreparedPoint];

    /// Color at `(lat, lng)`, or `None` if no point influences it.
    fn render_pixel(&self, lat: f64, lng: f64) -> Option<Color>;
}

/// Euclidean distance between two locations, in degrees.
pub fn distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    (lat1 - lat2).hypot(lng1 - lng2)
}

/// Accumulated density at a location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensitySample {
    /// Sum of point values scaled by linear falloff.
    pub value: f64,
    /// Distance to the nearest contributing point.
    pub closest: f64,
}

/// Renders the falloff-weighted sum of every point within the effect distance.
#[derive(Debug)]
pub struct DensityStrategy<'a> {
    points: Vec<PreparedPoint>,
    effect_distance: f64,
    legend: &'a ColorLegend,
}

impl<'a> DensityStrategy<'a> {
    pub fn new(prepared: PreparedPointSet, effect_distance: f64, legend: &'a ColorLegend) -> Self {
        Self {
            points: prepared.points,
            effect_distance,
            legend,
        }
    }

    /// Scans every point; weight falls linearly from 1 at distance 0 to 0 at
    /// the effect distance. `None` when nothing is in range.
    pub fn accumulate(&self, lat: f64, lng: f64) -> Option<DensitySample> {
        let mut sample: Option<DensitySample> = None;

        for point in &self.points {
            let dist = distance(lat, lng, point.lat, point.lng);
            if dist > self.effect_distance {
                continue;
            }

            let contribution = point.value * (1.0 - dist / self.effect_distance);
            let s = sample.get_or_insert(DensitySample {
                value: 0.0,
                closest: dist,
            });
            s.value += contribution;
            s.closest = s.closest.min(dist);
        }

        sample
    }
}

impl RenderStrategy for DensityStrategy<'_> {
    fn working_set(&self) -> &[PreparedPoint] {
        &self.points
    }

    /// Legend color of the accumulated value, with alpha set by proximity of
    /// the nearest point: 255 on top of it, 0 at the effect distance.
    fn render_pixel(&self, lat: f64, lng: f64) -> Option<Color> {
        let sample = self.accumulate(lat, lng)?;
        let proximity = (1.0 - sample.closest / self.effect_distance).min(1.0);
        let alpha = (proximity * 255.0).round().clamp(0.0, 255.0) as u8;
        Some(self.legend.color_for(sample.value).with_alpha(alpha))
    }
}

/// Renders the inverse-distance-weighted average of the nearest points.
///
/// Only the `neighbours` nearest points are considered, so points further
/// out are ignored even when they are within the effect distance.
#[derive(Debug)]
pub struct WeightedAverageStrategy<'a, I = RTreeIndex> {
    points: Vec<PreparedPoint>,
    index: I,
    effect_distance: f64,
    neighbours: usize,
    legend: &'a ColorLegend,
}

impl<'a> WeightedAverageStrategy<'a, RTreeIndex> {
    /// Builds an R-tree over the prepared points.
    pub fn new(prepared: PreparedPointSet, effect_distance: f64, legend: &'a ColorLegend) -> Self {
        let index = RTreeIndex::from_points(&prepared.points);
        Self::with_index(prepared, index, effect_distance, legend)
    }
}

impl<'a, I: SpatialIndex> WeightedAverageStrategy<'a, I> {
    /// Use a caller-supplied index. Its entries must be tagged with
    /// positions into `prepared.points`.
    pub fn with_index(
        prepared: PreparedPointSet,
        index: I,
        effect_distance: f64,
        legend: &'a ColorLegend,
    ) -> Self {
        Self {
            points: prepared.points,
            index,
            effect_distance,
            neighbours: DEFAULT_NEIGHBOURS,
            legend,
        }
    }

    pub fn with_neighbours(mut self, neighbours: usize) -> Self {
        self.neighbours = neighbours.max(1);
        self
    }

    /// Interpolated value at a location, or `None` if none of the nearest
    /// points is within the effect distance.
    pub fn value_at(&self, lat: f64, lng: f64) -> Option<f64> {
        let mut numerator = 0.0;
        let mut denominator = 0.0;
        let mut any = false;

        for i in self.index.nearest_k(lat, lng, self.neighbours) {
            let Some(point) = self.points.get(i) else {
                continue;
            };

            let dist = distance(lat, lng, point.lat, point.lng);
            if dist > self.effect_distance {
                continue;
            }

            // A coincident point gets weight 1 instead of an infinite one.
            let inv_weight = if dist == 0.0 { 1.0 } else { 1.0 / dist };
            numerator += point.value * inv_weight;
            denominator += inv_weight;
            any = true;
        }

        if !any {
            None
        } else if denominator == 0.0 {
            Some(numerator)
        } else {
            Some(numerator / denominator)
        }
    }
}

impl<I: SpatialIndex> RenderStrategy for WeightedAverageStrategy<'_, I> {
    fn working_set(&self) -> &[PreparedPoint] {
        &self.points
    }

    fn render_pixel(&self, lat: f64, lng: f64) -> Option<Color> {
        self.value_at(lat, lng)
            .map(|value| self.legend.color_for(value).with_alpha(255))
    }
}
