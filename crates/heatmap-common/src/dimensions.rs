//! Output raster dimensions.

use serde::{Deserialize, Serialize};

use crate::bbox::BoundingBox;
use crate::error::{HeatmapError, HeatmapResult};

/// Width and height of the output raster in pixels. Both are positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RasterDimensions {
    pub width: u32,
    pub height: u32,
}

impl RasterDimensions {
    /// Create dimensions, rejecting a zero or negative side.
    pub fn new(width: i64, height: i64) -> HeatmapResult<Self> {
        if width <= 0 || height <= 0 || width > u32::MAX as i64 || height > u32::MAX as i64 {
            return Err(HeatmapError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width: width as u32,
            height: height as u32,
        })
    }

    /// Dimensions for a requested height, with the width derived from the
    /// aspect ratio of `bbox` (never less than one pixel).
    pub fn from_height(height: i64, bbox: &BoundingBox) -> HeatmapResult<Self> {
        if height <= 0 {
            return Err(HeatmapError::InvalidDimensions { width: 0, height });
        }
        let width = (height as f64 * bbox.aspect_ratio()).round().max(1.0);
        if !width.is_finite() || width > u32::MAX as f64 {
            return Err(HeatmapError::InvalidDimensions {
                width: i64::MAX,
                height,
            });
        }
        Self::new(width as i64, height)
    }

    /// Number of pixels in the raster.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}
