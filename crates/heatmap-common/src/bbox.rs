//! Geographic bounding box.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{HeatmapError, HeatmapResult};
use crate::point::GeoPoint;

/// A geographic bounding box in decimal degrees.
///
/// The extent is mapped onto the output raster with `(min_lng, max_lat)` at
/// pixel `(0, 0)`. A valid box has a strictly positive extent on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lng: f64,
    pub max_lat: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    /// Create a validated bounding box.
    ///
    /// Fails with [`HeatmapError::InvalidBounds`] if any coordinate is not
    /// finite, or if either axis has zero or negative extent.
    pub fn new(min_lat: f64, min_lng: f64, max_lat: f64, max_lng: f64) -> HeatmapResult<Self> {
        let bbox = Self {
            min_lat,
            min_lng,
            max_lat,
            max_lng,
        };
        bbox.validate()?;
        Ok(bbox)
    }

    /// Check the invariants of an already constructed box.
    ///
    /// Boxes arriving through serde bypass [`BoundingBox::new`], so anything
    /// that consumes a deserialized box should call this first.
    pub fn validate(&self) -> HeatmapResult<()> {
        let coords = [self.min_lat, self.min_lng, self.max_lat, self.max_lng];
        if coords.iter().any(|c| !c.is_finite()) {
            return Err(HeatmapError::InvalidBounds(format!(
                "non-finite coordinate in {}",
                self
            )));
        }
        if self.min_lat >= self.max_lat {
            return Err(HeatmapError::InvalidBounds(format!(
                "latitude extent must be positive (min_lat={}, max_lat={})",
                self.min_lat, self.max_lat
            )));
        }
        if self.min_lng >= self.max_lng {
            return Err(HeatmapError::InvalidBounds(format!(
                "longitude extent must be positive (min_lng={}, max_lng={})",
                self.min_lng, self.max_lng
            )));
        }
        Ok(())
    }

    /// Smallest box enclosing every point, grown by `margin` on all sides.
    ///
    /// A single point (or a set of collinear points) only yields a valid box
    /// when `margin` is positive.
    pub fn enclosing(points: &[GeoPoint], margin: f64) -> HeatmapResult<Self> {
        let mut finite = points.iter().filter(|p| p.is_finite());
        let first = finite
            .next()
            .ok_or_else(|| HeatmapError::InvalidBounds("no points to enclose".to_string()))?;

        let init = (first.lat, first.lng, first.lat, first.lng);
        let (min_lat, min_lng, max_lat, max_lng) =
            finite.fold(init, |(min_lat, min_lng, max_lat, max_lng), p| {
                (
                    min_lat.min(p.lat),
                    min_lng.min(p.lng),
                    max_lat.max(p.lat),
                    max_lng.max(p.lng),
                )
            });

        Self::new(
            min_lat - margin,
            min_lng - margin,
            max_lat + margin,
            max_lng + margin,
        )
    }

    /// Latitude extent in degrees.
    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Longitude extent in degrees.
    pub fn lng_span(&self) -> f64 {
        self.max_lng - self.min_lng
    }

    /// Ratio of longitude span to latitude span (width over height).
    pub fn aspect_ratio(&self) -> f64 {
        self.lng_span() / self.lat_span()
    }

    /// This box grown by `distance` degrees on every side.
    pub fn expanded(&self, distance: f64) -> BoundingBox {
        BoundingBox {
            min_lat: self.min_lat - distance,
            min_lng: self.min_lng - distance,
            max_lat: self.max_lat + distance,
            max_lng: self.max_lng + distance,
        }
    }

    /// Check if a location lies within this box (edges inclusive).
    pub fn contains_point(&self, lat: f64, lng: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lng >= self.min_lng && lng <= self.max_lng
    }
}

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.min_lat, self.min_lng, self.max_lat, self.max_lng
        )
    }
}

impl FromStr for BoundingBox {
    type Err = BboxParseError;

    /// Parse `"min_lat,min_lng,max_lat,max_lng"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(BboxParseError::InvalidFormat(s.to_string()));
        }

        let mut values = [0.0f64; 4];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| BboxParseError::InvalidNumber(part.to_string()))?;
        }

        let [min_lat, min_lng, max_lat, max_lng] = values;
        BoundingBox::new(min_lat, min_lng, max_lat, max_lng)
            .map_err(|e| BboxParseError::InvalidExtent(e.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BboxParseError {
    #[error("Invalid bounds format: {0}. Expected 'min_lat,min_lng,max_lat,max_lng'")]
    InvalidFormat(String),

    #[error("Invalid number in bounds: {0}")]
    InvalidNumber(String),

    #[error("{0}")]
    InvalidExtent(String),
}
