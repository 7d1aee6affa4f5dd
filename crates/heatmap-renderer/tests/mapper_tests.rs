//! Tests for geographic <-> pixel coordinate mapping.

use heatmap_common::{BoundingBox, HeatmapError, RasterDimensions};
use heatmap_renderer::CoordinateMapper;
use test_utils::{assert_coords_approx_eq, bbox, bbox_from};

fn mapper(b: (f64, f64, f64, f64), width: i64, height: i64) -> CoordinateMapper {
    CoordinateMapper::new(bbox_from(b), RasterDimensions::new(width, height).unwrap()).unwrap()
}

// ============================================================================
// Round-trip tests
// ============================================================================

fn assert_round_trip(m: &CoordinateMapper) {
    let dims = m.dimensions();
    for y in 0..dims.height {
        for x in 0..dims.width {
            let (lat, lng) = m.pixel_to_geo(x, y);
            let (rx, ry) = m.geo_to_pixel(lat, lng);
            assert!(
                (rx - x as i64).abs() <= 1 && (ry - y as i64).abs() <= 1,
                "pixel ({}, {}) came back as ({}, {})",
                x,
                y,
                rx,
                ry
            );
        }
    }
}

#[test]
fn test_round_trip_square() {
    assert_round_trip(&mapper(bbox::UNIT_TEN, 100, 100));
}

#[test]
fn test_round_trip_global_non_square() {
    assert_round_trip(&mapper(bbox::GLOBAL, 360, 90));
}

#[test]
fn test_round_trip_small_extent() {
    assert_round_trip(&mapper(bbox::CITY, 175, 100));
}

#[test]
fn test_round_trip_odd_sizes() {
    assert_round_trip(&mapper((-3.3, 7.7, 1.1, 9.9), 37, 53));
}

// ============================================================================
// Orientation tests
// ============================================================================

#[test]
fn test_row_zero_is_north() {
    let m = mapper(bbox::UNIT_TEN, 100, 100);
    let (_, y_north) = m.geo_to_pixel(9.95, 5.0);
    let (_, y_south) = m.geo_to_pixel(0.05, 5.0);
    assert_eq!(y_north, 0);
    assert_eq!(y_south, 99);
}

#[test]
fn test_pixel_to_geo_top_left() {
    let m = mapper(bbox::GLOBAL, 360, 180);
    assert_coords_approx_eq!(m.pixel_to_geo(0, 0), (90.0, -180.0), 1e-12);
    assert_coords_approx_eq!(m.pixel_to_geo(180, 90), (0.0, 0.0), 1e-12);
}

#[test]
fn test_geo_to_pixel_centre() {
    let m = mapper(bbox::UNIT_TEN, 100, 100);
    assert_eq!(m.geo_to_pixel(5.0, 5.0), (50, 50));
}

// ============================================================================
// Construction tests
// ============================================================================

#[test]
fn test_zero_extent_fails_at_construction() {
    let flat = BoundingBox {
        min_lat: 5.0,
        min_lng: 0.0,
        max_lat: 5.0,
        max_lng: 10.0,
    };
    let result = CoordinateMapper::new(flat, RasterDimensions::new(10, 10).unwrap());
    assert!(matches!(result, Err(HeatmapError::InvalidBounds(_))));
}

#[test]
fn test_effect_distance_in_pixels() {
    let m = mapper(bbox::UNIT_TEN, 100, 100);
    assert_eq!(m.distance_to_pixels(2.0), 21);
    assert_eq!(m.distance_to_pixels(0.01), 1);
}
