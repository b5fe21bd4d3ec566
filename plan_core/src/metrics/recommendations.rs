//! Threshold-driven advisory notes for a set of scores.
//!
//! The list is always ordered circulation, daylight, energy, accessibility,
//! regardless of priority.

use serde::{Deserialize, Serialize};

use super::PerformanceMetrics;

const CIRCULATION_THRESHOLD: u32 = 70;
const DAYLIGHT_THRESHOLD_HOURS: f64 = 6.0;
const ENERGY_THRESHOLD: u32 = 60;
const ACCESSIBILITY_THRESHOLD: u32 = 90;

/// Urgency of a recommendation, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn display_name(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Which score a recommendation addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationCategory {
    Circulation,
    Daylight,
    Energy,
    Accessibility,
}

/// One advisory note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: RecommendationCategory,
    pub priority: Priority,
    pub title: String,
    pub description: String,
}

impl Recommendation {
    fn new(
        category: RecommendationCategory,
        priority: Priority,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Recommendation {
            category,
            priority,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Build the recommendation list for already-computed scores
pub fn recommendations_for(metrics: &PerformanceMetrics) -> Vec<Recommendation> {
    let mut out = Vec::new();

    if metrics.circulation_efficiency < CIRCULATION_THRESHOLD {
        out.push(Recommendation::new(
            RecommendationCategory::Circulation,
            Priority::High,
            "Improve circulation efficiency",
            format!(
                "Circulation efficiency is {}%. Shorten corridors or group connected rooms to reduce circulation area.",
                metrics.circulation_efficiency
            ),
        ));
    }

    if metrics.daylight_hours < DAYLIGHT_THRESHOLD_HOURS {
        out.push(Recommendation::new(
            RecommendationCategory::Daylight,
            Priority::Medium,
            "Increase daylight exposure",
            format!(
                "Estimated daylight is {:.1} hours. Move occupied rooms toward south-facing exterior walls.",
                metrics.daylight_hours
            ),
        ));
    }

    if metrics.energy_efficiency < ENERGY_THRESHOLD {
        out.push(Recommendation::new(
            RecommendationCategory::Energy,
            Priority::High,
            "Improve energy performance",
            format!(
                "Energy efficiency is {}%. A more compact footprint with more shared walls reduces envelope losses.",
                metrics.energy_efficiency
            ),
        ));
    }

    if metrics.accessibility_score < ACCESSIBILITY_THRESHOLD {
        out.push(Recommendation::new(
            RecommendationCategory::Accessibility,
            Priority::Critical,
            "Address accessibility gaps",
            format!(
                "Accessibility score is {}%. Widen corridors and give every room an accessible connection.",
                metrics.accessibility_score
            ),
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(circulation: u32, daylight: f64, energy: u32, accessibility: u32) -> PerformanceMetrics {
        PerformanceMetrics {
            circulation_efficiency: circulation,
            daylight_hours: daylight,
            energy_efficiency: energy,
            space_utilization: 80,
            accessibility_score: accessibility,
            recommendations: Vec::new(),
        }
    }

    #[test]
    fn test_good_scores_produce_no_recommendations() {
        assert!(recommendations_for(&metrics(90, 8.0, 80, 100)).is_empty());
    }

    #[test]
    fn test_fixed_order_and_priorities() {
        let recs = recommendations_for(&metrics(50, 4.0, 40, 50));
        let categories: Vec<_> = recs.iter().map(|r| r.category).collect();
        assert_eq!(
            categories,
            vec![
                RecommendationCategory::Circulation,
                RecommendationCategory::Daylight,
                RecommendationCategory::Energy,
                RecommendationCategory::Accessibility,
            ]
        );
        let priorities: Vec<_> = recs.iter().map(|r| r.priority).collect();
        assert_eq!(
            priorities,
            vec![Priority::High, Priority::Medium, Priority::High, Priority::Critical]
        );
    }

    #[test]
    fn test_thresholds_are_strict() {
        assert!(recommendations_for(&metrics(70, 6.0, 60, 90)).is_empty());
    }

    #[test]
    fn test_priority_serialization() {
        assert_eq!(serde_json::to_string(&Priority::Critical).unwrap(), "\"critical\"");
    }
}
