//! Input point type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identity of a point.
///
/// Points sharing an identity are treated as repeated observations of the
/// same site by the density renderer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointId(String);

impl PointId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PointId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PointId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<u64> for PointId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

/// A weighted, geographically located input point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
    #[serde(default = "default_value")]
    pub value: f64,
    pub id: PointId,
}

fn default_value() -> f64 {
    1.0
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64, value: f64, id: impl Into<PointId>) -> Self {
        Self {
            lat,
            lng,
            value,
            id: id.into(),
        }
    }

    /// True when location and value are all finite numbers.
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite() && self.value.is_finite()
    }
}
