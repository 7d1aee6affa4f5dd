//! Conversion between geographic coordinates and raster pixels.
//!
//! The mapping is a plain equirectangular projection of the bounding box
//! onto the raster: longitude runs left to right, latitude top to bottom with
//! row 0 at `max_lat`. It is not accurate at extreme latitudes.

use heatmap_common::{BoundingBox, HeatmapResult, RasterDimensions};

/// Maps `(lat, lng)` to `(x, y)` pixels and back for a fixed box and raster.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateMapper {
    bbox: BoundingBox,
    dims: RasterDimensions,
}

impl CoordinateMapper {
    /// Fails with `InvalidBounds` if the box has zero extent on either axis.
    pub fn new(bbox: BoundingBox, dims: RasterDimensions) -> HeatmapResult<Self> {
        bbox.validate()?;
        Ok(Self { bbox, dims })
    }

    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    pub fn dimensions(&self) -> RasterDimensions {
        self.dims
    }

    /// Pixel containing a geographic location.
    ///
    /// Locations outside the box map to coordinates outside the raster,
    /// including negative ones.
    pub fn geo_to_pixel(&self, lat: f64, lng: f64) -> (i64, i64) {
        let lng_frac = (lng - self.bbox.min_lng) / self.bbox.lng_span();
        let lat_frac = (lat - self.bbox.min_lat) / self.bbox.lat_span();

        let x = (lng_frac * self.dims.width as f64).floor() as i64;
        let y = ((1.0 - lat_frac) * self.dims.height as f64).floor() as i64;
        (x, y)
    }

    /// Geographic location of a pixel, as `(lat, lng)`.
    pub fn pixel_to_geo(&self, x: u32, y: u32) -> (f64, f64) {
        let x_frac = x as f64 / self.dims.width as f64;
        let y_frac = y as f64 / self.dims.height as f64;

        let lng = self.bbox.min_lng + x_frac * self.bbox.lng_span();
        let lat = self.bbox.max_lat - y_frac * self.bbox.lat_span();
        (lat, lng)
    }

    /// Horizontal pixel width of `distance` degrees measured at the origin,
    /// plus one so that influence windows are not clipped at their edges.
    ///
    /// Capped at the larger raster side, which already covers every pixel
    /// from any point on the raster.
    pub fn distance_to_pixels(&self, distance: f64) -> i64 {
        let column = |lng: f64| {
            ((lng - self.bbox.min_lng) / self.bbox.lng_span() * self.dims.width as f64).floor()
        };
        let pixels = column(distance) - column(0.0) + 1.0;
        let cap = self.dims.width.max(self.dims.height) as f64;

        if pixels.is_nan() {
            0
        } else {
            pixels.clamp(0.0, cap) as i64
        }
    }
}
