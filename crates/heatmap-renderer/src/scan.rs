//! Raster scan driven by point influence windows.
//!
//! Rather than evaluating every pixel against every point, the scanner walks
//! the working set and only visits the square window of pixels each point can
//! reach. A claimed mask guarantees that a pixel covered by several windows is
//! rendered once, by the first window that reaches it. Pixels outside every
//! window stay transparent.

use heatmap_common::{Color, RasterDimensions};
use tracing::{debug, trace, warn};

use crate::mapper::CoordinateMapper;
use crate::strategy::RenderStrategy;

/// Row-major RGBA raster, 8 bits per channel.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    dims: RasterDimensions,
    pixels: Vec<Color>,
}

impl PixelBuffer {
    /// A buffer with every pixel transparent.
    pub fn transparent(dims: RasterDimensions) -> Self {
        Self {
            dims,
            pixels: vec![Color::TRANSPARENT; dims.pixel_count()],
        }
    }

    pub fn width(&self) -> u32 {
        self.dims.width
    }

    pub fn height(&self) -> u32 {
        self.dims.height
    }

    pub fn dimensions(&self) -> RasterDimensions {
        self.dims
    }

    /// Pixel at `(x, y)`, or `None` outside the raster.
    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.dims.width || y >= self.dims.height {
            return None;
        }
        self.pixels.get(self.offset(x, y)).copied()
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Flat `[r, g, b, a, r, g, b, a, ...]` bytes in row-major order.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_array()).collect()
    }

    /// Number of pixels with non-zero alpha.
    pub fn visible_count(&self) -> usize {
        self.pixels.iter().filter(|c| c.a > 0).count()
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.dims.width as usize + x as usize
    }
}

/// Inclusive pixel rectangle, already clamped to the raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelWindow {
    pub x_min: u32,
    pub x_max: u32,
    pub y_min: u32,
    pub y_max: u32,
}

impl PixelWindow {
    pub fn area(&self) -> usize {
        (self.x_max - self.x_min + 1) as usize * (self.y_max - self.y_min + 1) as usize
    }
}

/// Counters collected during a scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Points whose windows were walked.
    pub points_scanned: usize,
    /// Points whose window missed the raster entirely.
    pub windows_skipped: usize,
    /// Strategy invocations; never more than the pixel count.
    pub pixels_rendered: usize,
    /// Rendered pixels the strategy returned a color for.
    pub pixels_colored: usize,
}

/// Drives a [`RenderStrategy`] over the windows of its working set.
#[derive(Debug, Clone, Copy)]
pub struct RasterScanner<'a> {
    mapper: &'a CoordinateMapper,
    radius_px: i64,
}

impl<'a> RasterScanner<'a> {
    pub fn new(mapper: &'a CoordinateMapper, effect_distance: f64) -> Self {
        let radius_px = mapper.distance_to_pixels(effect_distance).max(0);

        let dims = mapper.dimensions();
        if radius_px.saturating_mul(2) >= dims.width.max(dims.height) as i64 {
            warn!(
                radius_px,
                width = dims.width,
                height = dims.height,
                "Effect distance covers the whole raster; every point window is full size"
            );
        }

        Self { mapper, radius_px }
    }

    /// Pixel radius of a point's influence window.
    pub fn radius_px(&self) -> i64 {
        self.radius_px
    }

    /// Window of pixels a point at `(lat, lng)` can influence, or `None` if it
    /// lies entirely off the raster.
    pub fn window(&self, lat: f64, lng: f64) -> Option<PixelWindow> {
        let (x, y) = self.mapper.geo_to_pixel(lat, lng);
        let dims = self.mapper.dimensions();

        let x_min = x.saturating_sub(self.radius_px).max(0);
        let x_max = x.saturating_add(self.radius_px).min(dims.width as i64 - 1);
        let y_min = y.saturating_sub(self.radius_px).max(0);
        let y_max = y.saturating_add(self.radius_px).min(dims.height as i64 - 1);

        if x_min > x_max || y_min > y_max {
            return None;
        }

        Some(PixelWindow {
            x_min: x_min as u32,
            x_max: x_max as u32,
            y_min: y_min as u32,
            y_max: y_max as u32,
        })
    }

    /// Render every pixel reachable from the strategy's working set.
    pub fn render<S: RenderStrategy + ?Sized>(&self, strategy: &S) -> (PixelBuffer, ScanStats) {
        let dims = self.mapper.dimensions();
        let mut buffer = PixelBuffer::transparent(dims);
        let mut claimed = vec![false; dims.pixel_count()];
        let mut stats = ScanStats::default();

        for point in strategy.working_set() {
            let Some(window) = self.window(point.lat, point.lng) else {
                stats.windows_skipped += 1;
                continue;
            };
            stats.points_scanned += 1;
            trace!(lat = point.lat, lng = point.lng, ?window, "Scanning point window");

            for y in window.y_min..=window.y_max {
                for x in window.x_min..=window.x_max {
                    let offset = buffer.offset(x, y);
                    if claimed[offset] {
                        continue;
                    }
                    claimed[offset] = true;

                    let (lat, lng) = self.mapper.pixel_to_geo(x, y);
                    stats.pixels_rendered += 1;
                    if let Some(color) = strategy.render_pixel(lat, lng) {
                        buffer.pixels[offset] = color;
                        stats.pixels_colored += 1;
                    }
                }
            }
        }

        debug!(
            radius_px = self.radius_px,
            points_scanned = stats.points_scanned,
            windows_skipped = stats.windows_skipped,
            pixels_rendered = stats.pixels_rendered,
            pixels_colored = stats.pixels_colored,
            "Raster scan complete"
        );

        (buffer, stats)
    }
}
