//! Error types for heatmap rendering.

use thiserror::Error;

/// Result type alias using HeatmapError.
pub type HeatmapResult<T> = Result<T, HeatmapError>;

/// Primary error type for heatmap operations.
#[derive(Debug, Error)]
pub enum HeatmapError {
    // === Input Shape Errors ===
    #[error("Invalid bounding box: {0}")]
    InvalidBounds(String),

    #[error("Invalid raster dimensions: {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },

    #[error("Invalid effect distance: {0} (must be finite and greater than zero)")]
    InvalidEffectDistance(f64),

    #[error("Invalid legend: {0}")]
    InvalidLegend(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    // === Output Errors ===
    #[error("Image encoding failed: {0}")]
    EncodingError(String),

    #[error("I/O error: {0}")]
    IoError(String),

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl HeatmapError {
    /// Short, stable identifier for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            HeatmapError::InvalidBounds(_) => "InvalidBounds",
            HeatmapError::InvalidDimensions { .. } => "InvalidDimensions",
            HeatmapError::InvalidEffectDistance(_) => "InvalidEffectDistance",
            HeatmapError::InvalidLegend(_) => "InvalidLegend",
            HeatmapError::InvalidColor(_) => "InvalidColor",
            HeatmapError::EncodingError(_) => "EncodingError",
            HeatmapError::IoError(_) => "IoError",
            HeatmapError::ConfigError(_) => "ConfigError",
        }
    }

    /// Whether the error was caused by the shape of the caller's input,
    /// as opposed to a failure while writing output.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            HeatmapError::InvalidBounds(_)
                | HeatmapError::InvalidDimensions { .. }
                | HeatmapError::InvalidEffectDistance(_)
                | HeatmapError::InvalidLegend(_)
                | HeatmapError::InvalidColor(_)
                | HeatmapError::ConfigError(_)
        )
    }
}

// Conversion from common error types
impl From<std::io::Error> for HeatmapError {
    fn from(err: std::io::Error) -> Self {
        HeatmapError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for HeatmapError {
    fn from(err: serde_json::Error) -> Self {
        HeatmapError::ConfigError(format!("JSON error: {}", err))
    }
}
