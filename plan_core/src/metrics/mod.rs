//! # Performance Metrics
//!
//! Five independent scores derived from a [`LayoutData`], plus a short list
//! of advisory recommendations. Each score lives in its own module:
//!
//! - [`circulation`] - circulation-to-usable area ratio (0-100)
//! - [`daylight`] - exterior-wall exposure heuristic (3-12 hours)
//! - [`energy`] - compactness, perimeter ratio, shared walls (0-100)
//! - [`utilization`] - room area over bounding-box area (0-100)
//! - [`accessibility`] - corridor widths and room reachability (0-100)
//!
//! Nothing here fails. Empty or inconsistent layouts produce floor values,
//! and circulation paths naming missing rooms are skipped.
//!
//! ## Example
//!
//! ```rust
//! use plan_core::layout::sample_layout;
//! use plan_core::metrics::{calculate_all_metrics, MetricsOptions};
//!
//! let metrics = calculate_all_metrics(&sample_layout(), &MetricsOptions::default());
//! assert!(metrics.space_utilization <= 100);
//! assert!(metrics.daylight_hours >= 3.0 && metrics.daylight_hours <= 12.0);
//! ```

pub mod accessibility;
pub mod circulation;
pub mod daylight;
pub mod energy;
pub mod recommendations;
pub mod utilization;

use serde::{Deserialize, Serialize};

use crate::layout::LayoutData;

pub use recommendations::{Priority, Recommendation, RecommendationCategory};

/// Default minimum corridor width for the accessibility score (feet)
pub const DEFAULT_MIN_CORRIDOR_WIDTH_FT: f64 = 4.0;

/// Tunables for the metrics calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MetricsOptions {
    /// Paths narrower than this fail the accessibility score
    pub min_corridor_width_ft: f64,
}

impl Default for MetricsOptions {
    fn default() -> Self {
        MetricsOptions {
            min_corridor_width_ft: DEFAULT_MIN_CORRIDOR_WIDTH_FT,
        }
    }
}

/// Scores for one layout.
///
/// ## JSON Example
///
/// ```json
/// {
///   "circulationEfficiency": 82,
///   "daylightHours": 6.4,
///   "energyEfficiency": 71,
///   "spaceUtilization": 100,
///   "accessibilityScore": 67,
///   "recommendations": [
///     { "category": "accessibility", "priority": "critical", "title": "...", "description": "..." }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub circulation_efficiency: u32,
    pub daylight_hours: f64,
    pub energy_efficiency: u32,
    pub space_utilization: u32,
    pub accessibility_score: u32,
    pub recommendations: Vec<Recommendation>,
}

/// Compute every score and the recommendation list.
pub fn calculate_all_metrics(layout: &LayoutData, options: &MetricsOptions) -> PerformanceMetrics {
    let circulation_efficiency = circulation::circulation_efficiency(layout);
    let daylight_hours = daylight::daylight_hours(layout);
    let energy_efficiency = energy::energy_efficiency(layout);
    let space_utilization = utilization::space_utilization(layout);
    let accessibility_score = accessibility::accessibility_score(layout, options.min_corridor_width_ft);

    let mut metrics = PerformanceMetrics {
        circulation_efficiency,
        daylight_hours,
        energy_efficiency,
        space_utilization,
        accessibility_score,
        recommendations: Vec::new(),
    };
    metrics.recommendations = recommendations::recommendations_for(&metrics);

    tracing::debug!(
        rooms = layout.rooms.len(),
        paths = layout.circulation.len(),
        circulation = metrics.circulation_efficiency,
        daylight = metrics.daylight_hours,
        energy = metrics.energy_efficiency,
        utilization = metrics.space_utilization,
        accessibility = metrics.accessibility_score,
        "calculated performance metrics"
    );

    metrics
}

/// Round a non-negative score and clamp it into 0..=100
pub(crate) fn to_score(value: f64) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{sample_layout, CirculationPath, Room};
    use proptest::prelude::*;

    #[test]
    fn test_empty_layout_reports_floor_values() {
        let metrics = calculate_all_metrics(&LayoutData::empty(), &MetricsOptions::default());
        assert_eq!(metrics.circulation_efficiency, 0);
        assert_eq!(metrics.daylight_hours, daylight::MIN_DAYLIGHT_HOURS);
        assert_eq!(metrics.energy_efficiency, 0);
        assert_eq!(metrics.space_utilization, 0);
        assert_eq!(metrics.accessibility_score, 100);
    }

    #[test]
    fn test_scores_stay_in_range() {
        let layouts = vec![
            sample_layout(),
            sample_layout().scaled(3.0).unwrap(),
            LayoutData::new(
                vec![
                    Room::new("a", "Tiny", 1.0, 0.0, 0.0, 1.0, 1.0),
                    Room::new("b", "Far", 1.0, 1000.0, 1000.0, 1.0, 1.0),
                ],
                vec![
                    CirculationPath::new("a", "b", 50.0),
                    CirculationPath::new("a", "missing", 1.0),
                ],
            ),
            LayoutData::new(vec![Room::new("a", "Huge", 1_000_000.0, 0.0, 0.0, 10.0, 10.0)], vec![]),
        ];

        for layout in layouts {
            let m = calculate_all_metrics(&layout, &MetricsOptions::default());
            assert!(m.circulation_efficiency <= 100);
            assert!(m.energy_efficiency <= 100);
            assert!(m.space_utilization <= 100);
            assert!(m.accessibility_score <= 100);
            assert!(m.daylight_hours >= 3.0 && m.daylight_hours <= 12.0, "{}", m.daylight_hours);
        }
    }

    fn arb_room() -> impl Strategy<Value = Room> {
        (
            0usize..8,
            -100.0f64..5_000.0,
            -2_000.0f64..2_000.0,
            -2_000.0f64..2_000.0,
            -10.0f64..200.0,
            -10.0f64..200.0,
        )
            .prop_map(|(id, area, x, y, width, height)| {
                Room::new(format!("r{}", id), "Room", area, x, y, width, height)
            })
    }

    fn arb_layout() -> impl Strategy<Value = LayoutData> {
        // ids overlap between rooms and paths, so some paths dangle and some rooms repeat
        let paths = prop::collection::vec(
            (0usize..10, 0usize..10, -1.0f64..20.0)
                .prop_map(|(a, b, w)| CirculationPath::new(format!("r{}", a), format!("r{}", b), w)),
            0..12,
        );
        (prop::collection::vec(arb_room(), 0..12), paths)
            .prop_map(|(rooms, circulation)| LayoutData::new(rooms, circulation))
    }

    proptest! {
        #[test]
        fn prop_scores_stay_in_range(layout in arb_layout(), min_width in 0.0f64..10.0) {
            let options = MetricsOptions { min_corridor_width_ft: min_width };
            let m = calculate_all_metrics(&layout, &options);
            prop_assert!(m.circulation_efficiency <= 100);
            prop_assert!(m.energy_efficiency <= 100);
            prop_assert!(m.space_utilization <= 100);
            prop_assert!(m.accessibility_score <= 100);
            prop_assert!(
                m.daylight_hours >= 3.0 && m.daylight_hours <= 12.0,
                "daylight {}",
                m.daylight_hours
            );
        }
    }

    #[test]
    fn test_metrics_json_uses_camel_case() {
        let metrics = calculate_all_metrics(&sample_layout(), &MetricsOptions::default());
        let json = serde_json::to_value(&metrics).unwrap();
        assert!(json.get("circulationEfficiency").is_some());
        assert!(json.get("accessibilityScore").is_some());
    }

    #[test]
    fn test_options_default_from_empty_json() {
        let options: MetricsOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options.min_corridor_width_ft, DEFAULT_MIN_CORRIDOR_WIDTH_FT);
    }
}
