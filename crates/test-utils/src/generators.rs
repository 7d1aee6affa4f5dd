//! Generators for synthetic point sets.
//!
//! These produce deterministic, easily reasoned-about layouts so that tests
//! can predict exactly which pixels should be colored.

use heatmap_common::GeoPoint;

/// Points on a regular `rows x cols` lattice spanning the given extent, each
/// with value 1 and a unique id (`"p{row}_{col}"`).
///
/// # Example
///
/// ```
/// use test_utils::create_point_grid;
///
/// let points = create_point_grid(2, 3, (0.0, 0.0, 1.0, 2.0));
/// assert_eq!(points.len(), 6);
/// assert_eq!((points[0].lat, points[0].lng), (0.0, 0.0));
/// assert_eq!((points[5].lat, points[5].lng), (1.0, 2.0));
/// ```
pub fn create_point_grid(
    rows: usize,
    cols: usize,
    (min_lat, min_lng, max_lat, max_lng): (f64, f64, f64, f64),
) -> Vec<GeoPoint> {
    let step = |min: f64, max: f64, n: usize| {
        if n > 1 {
            (max - min) / (n - 1) as f64
        } else {
            0.0
        }
    };
    let lat_step = step(min_lat, max_lat, rows);
    let lng_step = step(min_lng, max_lng, cols);

    let mut points = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            points.push(GeoPoint::new(
                min_lat + row as f64 * lat_step,
                min_lng + col as f64 * lng_step,
                1.0,
                format!("p{}_{}", row, col),
            ));
        }
    }
    points
}

/// `count` points arranged on a circle of `radius` degrees around a centre.
///
/// Values ramp from 0 to 1 around the ring. Ids are `"c{i}"`.
pub fn create_clustered_points(center: (f64, f64), radius: f64, count: usize) -> Vec<GeoPoint> {
    (0..count)
        .map(|i| {
            let frac = i as f64 / count.max(1) as f64;
            let angle = frac * std::f64::consts::TAU;
            GeoPoint::new(
                center.0 + radius * angle.sin(),
                center.1 + radius * angle.cos(),
                frac,
                format!("c{}", i),
            )
        })
        .collect()
}

/// `count` observations of the same site, all sharing one id.
pub fn create_duplicate_points(lat: f64, lng: f64, id: &str, count: usize) -> Vec<GeoPoint> {
    (0..count)
        .map(|_| GeoPoint::new(lat, lng, 1.0, id))
        .collect()
}
