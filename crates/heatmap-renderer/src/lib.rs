//! Heatmap rendering for weighted geographic points.
//!
//! Turns a sparse set of points into a raster over a bounding box using one
//! of two interpolation strategies:
//! - Density (distance-weighted point counts)
//! - Weighted average (inverse distance weighting of the nearest points)
//!
//! Only pixels within reach of some point are evaluated; the rest of the
//! raster is left transparent.

pub mod context;
pub mod legend;
pub mod mapper;
pub mod png;
pub mod preprocess;
pub mod scan;
pub mod spatial;
pub mod strategy;

use std::path::Path;
use std::time::Instant;

use heatmap_common::{BoundingBox, GeoPoint, HeatmapResult};
use tracing::info;

pub use context::{RenderContext, RenderOptions};
pub use legend::{ColorLegend, LegendConfig};
pub use mapper::CoordinateMapper;
pub use png::BitDepth;
pub use preprocess::{PointPreprocessor, PreparedPoint, PreparedPointSet};
pub use scan::{PixelBuffer, RasterScanner, ScanStats};
pub use spatial::{RTreeIndex, SpatialIndex};
pub use strategy::{DensityStrategy, RenderStrategy, StrategyKind, WeightedAverageStrategy};

/// A finished heatmap raster.
#[derive(Debug, Clone)]
pub struct Heatmap {
    buffer: PixelBuffer,
    stats: ScanStats,
    bit_depth: BitDepth,
}

impl Heatmap {
    /// Render `points` over `bbox`.
    ///
    /// Fails before touching any point if the bounds, dimensions, effect
    /// distance or legend are invalid.
    pub fn render(
        points: &[GeoPoint],
        bbox: BoundingBox,
        options: &RenderOptions,
    ) -> HeatmapResult<Self> {
        let started = Instant::now();
        let ctx = RenderContext::new(bbox, options)?;
        let (buffer, stats) = render_with_context(points, &ctx, options.strategy, options.neighbours);

        info!(
            width = buffer.width(),
            height = buffer.height(),
            strategy = %options.strategy,
            points = points.len(),
            pixels_colored = stats.pixels_colored,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Rendered heatmap"
        );

        Ok(Self {
            buffer,
            stats,
            bit_depth: options.bit_depth,
        })
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn into_buffer(self) -> PixelBuffer {
        self.buffer
    }

    pub fn stats(&self) -> ScanStats {
        self.stats
    }

    /// Encode as PNG bytes at the configured bit depth.
    pub fn to_png(&self) -> HeatmapResult<Vec<u8>> {
        png::encode(&self.buffer, self.bit_depth)
    }

    /// Encode as PNG and write to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> HeatmapResult<()> {
        let bytes = self.to_png()?;
        std::fs::write(path.as_ref(), bytes)?;
        info!(path = %path.as_ref().display(), "Saved heatmap");
        Ok(())
    }
}

/// Prepare points and scan the raster for an already validated context.
pub fn render_with_context(
    points: &[GeoPoint],
    ctx: &RenderContext,
    kind: StrategyKind,
    neighbours: usize,
) -> (PixelBuffer, ScanStats) {
    let prepared = PointPreprocessor::new(&ctx.bbox, ctx.effect_distance).prepare(points, kind);
    let scanner = RasterScanner::new(&ctx.mapper, ctx.effect_distance);

    match kind {
        StrategyKind::Density => {
            let strategy = DensityStrategy::new(prepared, ctx.effect_distance, &ctx.legend);
            scanner.render(&strategy)
        }
        StrategyKind::WeightedAverage => {
            let strategy = WeightedAverageStrategy::new(prepared, ctx.effect_distance, &ctx.legend)
                .with_neighbours(neighbours);
            scanner.render(&strategy)
        }
    }
}
