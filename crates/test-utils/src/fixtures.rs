//! Common test fixtures for heatmap tests.

use heatmap_common::BoundingBox;

/// Common bounding box definitions for testing, as
/// `(min_lat, min_lng, max_lat, max_lng)`.
pub mod bbox {
    /// Whole globe
    pub const GLOBAL: (f64, f64, f64, f64) = (-90.0, -180.0, 90.0, 180.0);

    /// Ten-degree square anchored at the origin
    pub const UNIT_TEN: (f64, f64, f64, f64) = (0.0, 0.0, 10.0, 10.0);

    /// Small city-scale extent (roughly central Melbourne)
    pub const CITY: (f64, f64, f64, f64) = (-37.83, 144.93, -37.79, 145.0);

    /// Zero latitude extent
    pub const FLAT: (f64, f64, f64, f64) = (5.0, 0.0, 5.0, 10.0);

    /// min > max
    pub const INVERTED: (f64, f64, f64, f64) = (10.0, 10.0, 5.0, 5.0);
}

/// Build a validated [`BoundingBox`] from a fixture tuple.
pub fn bbox_from((min_lat, min_lng, max_lat, max_lng): (f64, f64, f64, f64)) -> BoundingBox {
    BoundingBox::new(min_lat, min_lng, max_lat, max_lng).expect("fixture bbox must be valid")
}

/// Legend files in the shapes accepted by `LegendConfig`.
pub mod legends {
    /// Two stops, black at 0 and white at 10.
    pub const GRAYSCALE_JSON: &str = r##"{
        "stops": [
            { "value": 0, "color": "#000000" },
            { "value": 10, "color": [255, 255, 255] }
        ]
    }"##;

    /// A single translucent stop.
    pub const SINGLE_STOP_JSON: &str = r##"{
        "stops": [ { "value": 1, "color": "#11223380", "label": "only" } ]
    }"##;
}
