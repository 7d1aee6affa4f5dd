//! Value-to-color legend.
//!
//! A legend is a set of `(threshold, color)` stops. Values between two stops
//! are blended linearly; values beyond the outermost stops saturate to the
//! nearest stop's color.

use std::path::Path;

use heatmap_common::{Color, HeatmapError, HeatmapResult};
use serde::{Deserialize, Serialize};

/// Color as written in a legend file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Hex string: "#RRGGBB" or "#RRGGBBAA"
    Hex(String),

    /// Channel array: [r, g, b] or [r, g, b, a]
    Array(Vec<u8>),
}

impl ColorSpec {
    pub fn resolve(&self) -> HeatmapResult<Color> {
        match self {
            ColorSpec::Hex(s) => Color::from_hex(s),
            ColorSpec::Array(channels) => match channels.as_slice() {
                [r, g, b] => Ok(Color::new(*r, *g, *b, 255)),
                [r, g, b, a] => Ok(Color::new(*r, *g, *b, *a)),
                other => Err(HeatmapError::InvalidColor(format!(
                    "expected 3 or 4 channels, got {}",
                    other.len()
                ))),
            },
        }
    }
}

impl From<Color> for ColorSpec {
    fn from(c: Color) -> Self {
        ColorSpec::Array(c.to_array().to_vec())
    }
}

/// A legend stop as written in a legend file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopConfig {
    /// The value at this stop
    pub value: f64,

    /// The color at this stop
    pub color: ColorSpec,

    /// Optional label for display
    #[serde(default)]
    pub label: Option<String>,
}

/// Legend configuration loaded from JSON (or any serde format).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegendConfig {
    pub stops: Vec<StopConfig>,
}

impl LegendConfig {
    /// Parse a legend configuration from a JSON string.
    pub fn from_json(json: &str) -> HeatmapResult<Self> {
        serde_json::from_str(json).map_err(|e| HeatmapError::InvalidLegend(e.to_string()))
    }

    /// Load a legend configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> HeatmapResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Resolve colors and sort into a [`ColorLegend`].
    pub fn build(&self) -> HeatmapResult<ColorLegend> {
        let stops = self
            .stops
            .iter()
            .map(|s| {
                Ok(LegendStop {
                    threshold: s.value,
                    color: s.color.resolve()?,
                    label: s.label.clone(),
                })
            })
            .collect::<HeatmapResult<Vec<_>>>()?;
        ColorLegend::from_stops(stops)
    }
}

impl From<&ColorLegend> for LegendConfig {
    fn from(legend: &ColorLegend) -> Self {
        Self {
            stops: legend
                .stops()
                .iter()
                .map(|s| StopConfig {
                    value: s.threshold,
                    color: s.color.into(),
                    label: s.label.clone(),
                })
                .collect(),
        }
    }
}

/// One resolved legend stop.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendStop {
    pub threshold: f64,
    pub color: Color,
    pub label: Option<String>,
}

/// Immutable legend with stops sorted by descending threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorLegend {
    stops: Vec<LegendStop>,
}

impl ColorLegend {
    /// Build a legend from `(threshold, color)` pairs in any order.
    pub fn new(stops: impl IntoIterator<Item = (f64, Color)>) -> HeatmapResult<Self> {
        Self::from_stops(
            stops
                .into_iter()
                .map(|(threshold, color)| LegendStop {
                    threshold,
                    color,
                    label: None,
                })
                .collect(),
        )
    }

    fn from_stops(mut stops: Vec<LegendStop>) -> HeatmapResult<Self> {
        if stops.is_empty() {
            return Err(HeatmapError::InvalidLegend(
                "legend must have at least one stop".to_string(),
            ));
        }
        if let Some(bad) = stops.iter().find(|s| !s.threshold.is_finite()) {
            return Err(HeatmapError::InvalidLegend(format!(
                "non-finite threshold {}",
                bad.threshold
            )));
        }

        stops.sort_by(|a, b| b.threshold.total_cmp(&a.threshold));
        Ok(Self { stops })
    }

    /// Stops in descending threshold order.
    pub fn stops(&self) -> &[LegendStop] {
        &self.stops
    }

    /// Color for a scalar value.
    ///
    /// The floor is the highest stop at or below `value` and the ceiling the
    /// lowest stop strictly above it. With both present the colors are
    /// blended; with only one the value is outside the legend and takes that
    /// stop's color. NaN has neither and maps to transparent.
    pub fn color_for(&self, value: f64) -> Color {
        let floor = self.stops.iter().find(|s| value >= s.threshold);
        let ceiling = self.stops.iter().rev().find(|s| value < s.threshold);

        match (floor, ceiling) {
            (Some(floor), Some(ceiling)) => {
                let bias = (value - floor.threshold) / (ceiling.threshold - floor.threshold);
                floor.color.blend(ceiling.color, bias)
            }
            (Some(floor), None) => floor.color,
            (None, Some(ceiling)) => ceiling.color,
            (None, None) => Color::TRANSPARENT,
        }
    }
}

impl Default for ColorLegend {
    /// Blue at 0, green at 0.25, yellow at 0.5 and red at 1.
    fn default() -> Self {
        Self {
            stops: vec![
                default_stop(1.0, Color::new(235, 46, 46, 255), "red"),
                default_stop(0.5, Color::new(253, 253, 45, 255), "yellow"),
                default_stop(0.25, Color::new(0, 158, 84, 255), "green"),
                default_stop(0.0, Color::new(50, 52, 144, 255), "blue"),
            ],
        }
    }
}

fn default_stop(threshold: f64, color: Color, label: &str) -> LegendStop {
    LegendStop {
        threshold,
        color,
        label: Some(label.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_descending() {
        let legend = ColorLegend::new([
            (0.0, Color::new(0, 0, 0, 255)),
            (1.0, Color::new(255, 255, 255, 255)),
            (0.5, Color::new(128, 128, 128, 255)),
        ])
        .unwrap();
        let thresholds: Vec<f64> = legend.stops().iter().map(|s| s.threshold).collect();
        assert_eq!(thresholds, vec![1.0, 0.5, 0.0]);
    }

    #[test]
    fn test_empty_legend_rejected() {
        assert!(matches!(
            ColorLegend::new(Vec::new()),
            Err(HeatmapError::InvalidLegend(_))
        ));
    }

    #[test]
    fn test_nan_is_transparent() {
        assert_eq!(ColorLegend::default().color_for(f64::NAN), Color::TRANSPARENT);
    }

    #[test]
    fn test_color_spec_resolve() {
        assert_eq!(
            ColorSpec::Array(vec![1, 2, 3]).resolve().unwrap(),
            Color::new(1, 2, 3, 255)
        );
        assert!(ColorSpec::Array(vec![1, 2]).resolve().is_err());
        assert_eq!(
            ColorSpec::Hex("#0a0b0c0d".into()).resolve().unwrap(),
            Color::new(10, 11, 12, 13)
        );
    }
}
