//! Common types shared across the heatmap workspace.

pub mod bbox;
pub mod color;
pub mod dimensions;
pub mod error;
pub mod point;

pub use bbox::BoundingBox;
pub use color::Color;
pub use dimensions::RasterDimensions;
pub use error::{HeatmapError, HeatmapResult};
pub use point::{GeoPoint, PointId};
