//! Nearest-neighbour lookup over a fixed point set.

use rstar::primitives::GeomWithData;
use rstar::RTree;

use crate::preprocess::PreparedPoint;

/// Answers "which indexed points are nearest to this location".
///
/// Distances are Euclidean in degrees, treating latitude and longitude as
/// the same linear unit.
pub trait SpatialIndex {
    /// Indices of up to `k` entries nearest to `(lat, lng)`, nearest first.
    fn nearest_k(&self, lat: f64, lng: f64, k: usize) -> Vec<usize>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

type IndexEntry = GeomWithData<[f64; 2], usize>;

/// Read-only R-tree built in one pass from `(lat, lng, index)` entries.
pub struct RTreeIndex {
    tree: RTree<IndexEntry>,
}

impl RTreeIndex {
    pub fn build(entries: impl IntoIterator<Item = (f64, f64, usize)>) -> Self {
        let entries: Vec<IndexEntry> = entries
            .into_iter()
            .map(|(lat, lng, index)| GeomWithData::new([lat, lng], index))
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    /// Index `points`, tagging each entry with its position in the slice.
    pub fn from_points(points: &[PreparedPoint]) -> Self {
        Self::build(
            points
                .iter()
                .enumerate()
                .map(|(index, p)| (p.lat, p.lng, index)),
        )
    }
}

impl SpatialIndex for RTreeIndex {
    fn nearest_k(&self, lat: f64, lng: f64, k: usize) -> Vec<usize> {
        self.tree
            .nearest_neighbor_iter(&[lat, lng])
            .take(k)
            .map(|entry| entry.data)
            .collect()
    }

    fn len(&self) -> usize {
        self.tree.size()
    }
}

impl std::fmt::Debug for RTreeIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RTreeIndex")
            .field("len", &self.tree.size())
            .finish()
    }
}
