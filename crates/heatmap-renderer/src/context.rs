//! Render options and the per-render context built from them.

use heatmap_common::{BoundingBox, HeatmapError, HeatmapResult, RasterDimensions};
use serde::{Deserialize, Serialize};

use crate::legend::{ColorLegend, LegendConfig};
use crate::mapper::CoordinateMapper;
use crate::png::BitDepth;
use crate::strategy::{StrategyKind, DEFAULT_NEIGHBOURS};

/// Default effect distance in decimal degrees.
pub const DEFAULT_EFFECT_DISTANCE: f64 = 0.01;

/// Default output height in pixels.
pub const DEFAULT_HEIGHT: u32 = 256;

/// Caller-facing options for a render.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Output height in pixels.
    pub height: u32,

    /// Output width in pixels; derived from the bounding box aspect ratio
    /// when absent.
    pub width: Option<u32>,

    /// Distance in degrees beyond which a point has no influence.
    pub effect_distance: f64,

    /// Value-to-color legend; the four-stop default when absent.
    pub legend: Option<LegendConfig>,

    /// Interpolation strategy.
    pub strategy: StrategyKind,

    /// Nearest points considered by the weighted-average strategy.
    pub neighbours: usize,

    /// Channel depth of the encoded PNG.
    pub bit_depth: BitDepth,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            height: DEFAULT_HEIGHT,
            width: None,
            effect_distance: DEFAULT_EFFECT_DISTANCE,
            legend: None,
            strategy: StrategyKind::Density,
            neighbours: DEFAULT_NEIGHBOURS,
            bit_depth: BitDepth::Eight,
        }
    }
}

impl RenderOptions {
    /// Load options from environment variables over the defaults.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a key lookup. Unparseable values are ignored.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(val) = lookup("HEATMAP_HEIGHT") {
            if let Ok(height) = val.parse() {
                self.height = height;
            }
        }

        if let Some(val) = lookup("HEATMAP_WIDTH") {
            if let Ok(width) = val.parse() {
                self.width = Some(width);
            }
        }

        if let Some(val) = lookup("HEATMAP_EFFECT_DISTANCE") {
            if let Ok(distance) = val.parse() {
                self.effect_distance = distance;
            }
        }

        if let Some(val) = lookup("HEATMAP_STRATEGY") {
            if let Ok(strategy) = val.parse() {
                self.strategy = strategy;
            }
        }

        if let Some(val) = lookup("HEATMAP_NEIGHBOURS") {
            if let Ok(neighbours) = val.parse() {
                self.neighbours = neighbours;
            }
        }

        if let Some(val) = lookup("HEATMAP_BIT_DEPTH") {
            if let Ok(depth) = val.parse::<u8>() {
                if let Ok(depth) = BitDepth::try_from(depth) {
                    self.bit_depth = depth;
                }
            }
        }

        self
    }

    /// Validate the options.
    pub fn validate(&self) -> HeatmapResult<()> {
        if self.height == 0 || self.width == Some(0) {
            return Err(HeatmapError::InvalidDimensions {
                width: self.width.map(i64::from).unwrap_or(-1),
                height: self.height as i64,
            });
        }

        if !self.effect_distance.is_finite() || self.effect_distance <= 0.0 {
            return Err(HeatmapError::InvalidEffectDistance(self.effect_distance));
        }

        if self.neighbours == 0 {
            return Err(HeatmapError::ConfigError(
                "neighbours must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Raster dimensions for `bbox`.
    pub fn dimensions(&self, bbox: &BoundingBox) -> HeatmapResult<RasterDimensions> {
        match self.width {
            Some(width) => RasterDimensions::new(width as i64, self.height as i64),
            None => RasterDimensions::from_height(self.height as i64, bbox),
        }
    }

    /// The configured legend, or the default one.
    pub fn legend(&self) -> HeatmapResult<ColorLegend> {
        match &self.legend {
            Some(config) => config.build(),
            None => Ok(ColorLegend::default()),
        }
    }
}

/// Everything fixed for the duration of one render.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub bbox: BoundingBox,
    pub dimensions: RasterDimensions,
    pub effect_distance: f64,
    pub legend: ColorLegend,
    pub mapper: CoordinateMapper,
}

impl RenderContext {
    /// Validate `options` against `bbox` and freeze them.
    ///
    /// Bounds are checked first, so a degenerate box is reported before any
    /// other problem.
    pub fn new(bbox: BoundingBox, options: &RenderOptions) -> HeatmapResult<Self> {
        bbox.validate()?;
        options.validate()?;

        let dimensions = options.dimensions(&bbox)?;
        let legend = options.legend()?;
        let mapper = CoordinateMapper::new(bbox, dimensions)?;

        Ok(Self {
            bbox,
            dimensions,
            effect_distance: options.effect_distance,
            legend,
            mapper,
        })
    }
}
