//! Tests for legend color mapping.

use heatmap_common::{Color, HeatmapError};
use heatmap_renderer::legend::{ColorLegend, ColorSpec, LegendConfig, StopConfig};
use test_utils::legends;

const RED: Color = Color::new(235, 46, 46, 255);
const YELLOW: Color = Color::new(253, 253, 45, 255);
const GREEN: Color = Color::new(0, 158, 84, 255);
const BLUE: Color = Color::new(50, 52, 144, 255);

// ============================================================================
// Default legend tests
// ============================================================================

#[test]
fn test_default_legend_stops() {
    let legend = ColorLegend::default();
    let stops: Vec<(f64, Color)> = legend.stops().iter().map(|s| (s.threshold, s.color)).collect();
    assert_eq!(stops, vec![(1.0, RED), (0.5, YELLOW), (0.25, GREEN), (0.0, BLUE)]);
}

#[test]
fn test_stop_thresholds_map_exactly() {
    let legend = ColorLegend::default();
    for stop in legend.stops() {
        assert_eq!(legend.color_for(stop.threshold), stop.color);
    }
}

#[test]
fn test_saturates_above_highest() {
    let legend = ColorLegend::default();
    assert_eq!(legend.color_for(1.5), RED);
    assert_eq!(legend.color_for(1e9), RED);
}

#[test]
fn test_saturates_below_lowest() {
    let legend = ColorLegend::default();
    assert_eq!(legend.color_for(-0.1), BLUE);
    assert_eq!(legend.color_for(-1e9), BLUE);
}

#[test]
fn test_midpoint_blend() {
    let legend = ColorLegend::default();
    // halfway between yellow (0.5) and red (1.0)
    assert_eq!(legend.color_for(0.75), Color::new(244, 150, 46, 255));
}

#[test]
fn test_interpolation_is_monotonic_between_stops() {
    let legend = ColorLegend::default();
    // green (0.25) -> yellow (0.5): red and green channels rise, blue falls
    let mut prev = legend.color_for(0.25);
    for i in 1..=100 {
        let value = 0.25 + 0.25 * i as f64 / 100.0;
        let c = legend.color_for(value);
        assert!(c.r >= prev.r, "red fell at {}", value);
        assert!(c.g >= prev.g, "green fell at {}", value);
        assert!(c.b <= prev.b, "blue rose at {}", value);
        prev = c;
    }
    assert_eq!(prev, YELLOW);
}

// ============================================================================
// Custom legend tests
// ============================================================================

#[test]
fn test_single_stop_legend() {
    let legend = LegendConfig::from_json(legends::SINGLE_STOP_JSON)
        .unwrap()
        .build()
        .unwrap();
    let only = Color::new(0x11, 0x22, 0x33, 0x80);
    assert_eq!(legend.color_for(-5.0), only);
    assert_eq!(legend.color_for(1.0), only);
    assert_eq!(legend.color_for(5.0), only);
    assert_eq!(legend.stops()[0].label.as_deref(), Some("only"));
}

#[test]
fn test_thresholds_outside_unit_range() {
    let legend = LegendConfig::from_json(legends::GRAYSCALE_JSON)
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(legend.color_for(0.0), Color::new(0, 0, 0, 255));
    assert_eq!(legend.color_for(5.0), Color::new(128, 128, 128, 255));
    assert_eq!(legend.color_for(10.0), Color::new(255, 255, 255, 255));
}

#[test]
fn test_unsorted_stops_are_sorted() {
    let legend = ColorLegend::new([(0.0, BLUE), (1.0, RED), (0.5, YELLOW)]).unwrap();
    assert_eq!(legend.color_for(0.5), YELLOW);
    assert_eq!(legend.stops()[0].threshold, 1.0);
}

#[test]
fn test_duplicate_thresholds_do_not_divide_by_zero() {
    let legend = ColorLegend::new([(0.5, RED), (0.5, BLUE), (0.0, GREEN)]).unwrap();
    let c = legend.color_for(0.5);
    assert!(c == RED || c == BLUE);
    let between = legend.color_for(0.25);
    assert_eq!(between.a, 255);
}

#[test]
fn test_non_finite_threshold_rejected() {
    let result = ColorLegend::new([(f64::NAN, RED)]);
    assert!(matches!(result, Err(HeatmapError::InvalidLegend(_))));
}

#[test]
fn test_bad_color_in_config() {
    let config = LegendConfig {
        stops: vec![StopConfig {
            value: 0.0,
            color: ColorSpec::Hex("#12345".into()),
            label: None,
        }],
    };
    assert!(matches!(config.build(), Err(HeatmapError::InvalidColor(_))));
}

#[test]
fn test_config_round_trip_through_legend() {
    let legend = ColorLegend::default();
    let config = LegendConfig::from(&legend);
    let json = serde_json::to_string(&config).unwrap();
    let rebuilt = LegendConfig::from_json(&json).unwrap().build().unwrap();
    assert_eq!(rebuilt, legend);
}
