//! Point preparation ahead of a render.

use std::collections::HashMap;

use heatmap_common::{BoundingBox, GeoPoint, PointId};
use tracing::debug;

use crate::strategy::StrategyKind;

/// A point in the form the renderers work on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreparedPoint {
    pub lat: f64,
    pub lng: f64,
    pub value: f64,
}

impl From<&GeoPoint> for PreparedPoint {
    fn from(p: &GeoPoint) -> Self {
        Self {
            lat: p.lat,
            lng: p.lng,
            value: p.value,
        }
    }
}

/// The working set of points for one render.
#[derive(Debug, Clone, Default)]
pub struct PreparedPointSet {
    pub points: Vec<PreparedPoint>,
    /// Input points that were out of reach or not finite.
    pub dropped: usize,
}

impl PreparedPointSet {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Filters and reshapes input points for a given strategy.
#[derive(Debug, Clone, Copy)]
pub struct PointPreprocessor {
    reach: BoundingBox,
}

impl PointPreprocessor {
    pub fn new(bbox: &BoundingBox, effect_distance: f64) -> Self {
        Self {
            reach: bbox.expanded(effect_distance),
        }
    }

    /// Whether a point can influence any pixel of the raster.
    pub fn in_reach(&self, point: &GeoPoint) -> bool {
        point.is_finite() && self.reach.contains_point(point.lat, point.lng)
    }

    /// Keep only points within reach; for density, collapse shared identities
    /// into single counted points.
    pub fn prepare(&self, points: &[GeoPoint], kind: StrategyKind) -> PreparedPointSet {
        let kept: Vec<&GeoPoint> = points.iter().filter(|p| self.in_reach(p)).collect();
        let dropped = points.len() - kept.len();

        let prepared = match kind {
            StrategyKind::Density => aggregate_by_identity(&kept),
            StrategyKind::WeightedAverage => kept.into_iter().map(PreparedPoint::from).collect(),
        };

        debug!(
            input = points.len(),
            dropped,
            prepared = prepared.len(),
            strategy = %kind,
            "Prepared points"
        );

        PreparedPointSet {
            points: prepared,
            dropped,
        }
    }
}

/// Group points by identity. Each group becomes one point at the location of
/// its first member, valued at the number of members. Groups keep the order
/// in which their identity first appears.
pub fn aggregate_by_identity(points: &[&GeoPoint]) -> Vec<PreparedPoint> {
    let mut slots: HashMap<&PointId, usize> = HashMap::with_capacity(points.len());
    let mut groups: Vec<PreparedPoint> = Vec::new();

    for point in points {
        match slots.get(&point.id) {
            Some(&slot) => groups[slot].value += 1.0,
            None => {
                slots.insert(&point.id, groups.len());
                groups.push(PreparedPoint {
                    lat: point.lat,
                    lng: point.lng,
                    value: 1.0,
                });
            }
        }
    }

    groups
}
