//! Compliance report generation.
//!
//! Post-processes a [`ComplianceResult`] into something a reader can act on:
//! a compliance rate, one recommendation per mapped issue category, and a
//! fixed list of next steps chosen by status alone.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::metrics::Priority;

use super::{ComplianceIssue, ComplianceResult, ComplianceStatus, IssueType};

/// Remediation advice for one category of issues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceRecommendation {
    pub category: IssueType,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub actions: Vec<String>,

    /// Locations of the issues in this bucket
    pub affected: Vec<String>,
}

/// A compliance result plus derived guidance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReport {
    pub result: ComplianceResult,

    /// `round(100 * passed / total_checks)`, 100 with no checks
    pub compliance_rate: u32,

    pub recommendations: Vec<ComplianceRecommendation>,
    pub next_steps: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

impl ComplianceReport {
    pub fn status(&self) -> ComplianceStatus {
        self.result.status
    }
}

/// Build the report for a compliance result.
///
/// # Example
///
/// ```rust
/// use plan_core::compliance::{check_compliance, generate_compliance_report, NormSettings};
/// use plan_core::layout::LayoutData;
///
/// let result = check_compliance(&LayoutData::empty(), &NormSettings::default());
/// let report = generate_compliance_report(&result);
/// assert_eq!(report.compliance_rate, 100);
/// assert!(report.recommendations.is_empty());
/// ```
pub fn generate_compliance_report(result: &ComplianceResult) -> ComplianceReport {
    ComplianceReport {
        result: result.clone(),
        compliance_rate: compliance_rate(result),
        recommendations: recommendations(&result.issues),
        next_steps: next_steps(result.status),
        generated_at: Utc::now(),
    }
}

pub fn compliance_rate(result: &ComplianceResult) -> u32 {
    let total = result.summary.total_checks;
    if total == 0 {
        return 100;
    }
    (100.0 * result.summary.passed as f64 / total as f64).round() as u32
}

/// One recommendation per mapped issue type, in order of first appearance
fn recommendations(issues: &[ComplianceIssue]) -> Vec<ComplianceRecommendation> {
    let mut buckets: Vec<(IssueType, Vec<&ComplianceIssue>)> = Vec::new();
    for issue in issues {
        match buckets.iter_mut().find(|(t, _)| *t == issue.issue_type) {
            Some((_, bucket)) => bucket.push(issue),
            None => buckets.push((issue.issue_type, vec![issue])),
        }
    }

    buckets
        .into_iter()
        .filter_map(|(issue_type, bucket)| recommendation_for(issue_type, &bucket))
        .collect()
}

fn recommendation_for(issue_type: IssueType, bucket: &[&ComplianceIssue]) -> Option<ComplianceRecommendation> {
    let count = bucket.len();
    let affected = bucket.iter().map(|i| i.location.clone()).collect();

    let (title, description, actions): (&str, String, &[&str]) = match issue_type {
        IssueType::CorridorWidth => (
            "Widen corridors",
            format!("{} corridor(s) are narrower than the required minimum width.", count),
            &[
                "Increase corridor widths to meet the code minimum",
                "Remove obstructions that reduce clear width",
                "Reconsider room placement to allow wider circulation",
            ],
        ),
        IssueType::RoomArea => (
            "Enlarge undersized rooms",
            format!("{} room(s) are below the minimum floor area for their use.", count),
            &[
                "Increase the dimensions of undersized rooms",
                "Merge small rooms or reassign their use",
                "Verify room names reflect their intended use",
            ],
        ),
        IssueType::AccessibilityRoute => (
            "Provide accessible routes",
            format!("{} route(s) do not meet accessible route width requirements.", count),
            &[
                "Widen routes to the accessible minimum clear width",
                "Provide an alternative accessible path to affected rooms",
                "Review the layout with an accessibility consultant",
            ],
        ),
        IssueType::Configuration | IssueType::TurningSpace | IssueType::DoorWidth => return None,
    };

    Some(ComplianceRecommendation {
        category: issue_type,
        priority: Priority::High,
        title: title.to_string(),
        description,
        actions: actions.iter().map(|a| a.to_string()).collect(),
        affected,
    })
}

fn next_steps(status: ComplianceStatus) -> Vec<String> {
    let steps: &[&str] = match status {
        ComplianceStatus::Compliant => &[
            "Archive this report with the project documentation",
            "Proceed to detailed design development",
            "Re-run the compliance check after any layout change",
        ],
        ComplianceStatus::NonCompliant => &[
            "Resolve all critical issues listed in this report",
            "Revise the layout to meet minimum dimensions",
            "Consult a licensed code official on interpretations",
            "Re-run the compliance check after revisions",
        ],
        ComplianceStatus::Warning | ComplianceStatus::Error => &[
            "Review each finding with the design team",
            "Confirm the selected country and building codes",
            "Re-run the compliance check after revisions",
        ],
    };
    steps.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::{check_compliance, NormSettings};
    use crate::layout::{CirculationPath, LayoutData, Room};

    fn failing_layout() -> LayoutData {
        LayoutData::new(
            vec![
                Room::new("r1", "office", 50.0, 0.0, 0.0, 5.0, 10.0),
                Room::new("r2", "meeting", 150.0, 5.0, 0.0, 15.0, 10.0),
                Room::new("r3", "Restroom", 20.0, 20.0, 0.0, 4.0, 5.0),
            ],
            vec![CirculationPath::new("r1", "r2", 2.0), CirculationPath::new("r2", "r3", 2.0)],
        )
    }

    #[test]
    fn test_rate_and_buckets() {
        let result = check_compliance(&failing_layout(), &NormSettings::new("US", ["IBC", "ADA"]));
        let report = generate_compliance_report(&result);

        let expected_rate =
            (100.0 * result.summary.passed as f64 / result.summary.total_checks as f64).round() as u32;
        assert_eq!(report.compliance_rate, expected_rate);

        let categories: Vec<_> = report.recommendations.iter().map(|r| r.category).collect();
        assert_eq!(
            categories,
            vec![IssueType::CorridorWidth, IssueType::RoomArea, IssueType::AccessibilityRoute]
        );

        let corridor = &report.recommendations[0];
        assert_eq!(corridor.affected.len(), 4);
        assert!(corridor.description.starts_with("4 corridor(s)"));
    }

    #[test]
    fn test_door_and_turning_space_are_unmapped() {
        let result = check_compliance(&failing_layout(), &NormSettings::new("US", ["IBC", "ADA"]));
        assert!(result.issues.iter().any(|i| i.issue_type == IssueType::DoorWidth));
        let report = generate_compliance_report(&result);
        assert!(report
            .recommendations
            .iter()
            .all(|r| r.category != IssueType::DoorWidth && r.category != IssueType::TurningSpace));
    }

    #[test]
    fn test_next_steps_depend_only_on_status() {
        let failing = generate_compliance_report(&check_compliance(
            &failing_layout(),
            &NormSettings::new("US", ["IBC"]),
        ));
        let also_failing = generate_compliance_report(&check_compliance(
            &LayoutData::new(vec![Room::new("a", "Office", 10.0, 0.0, 0.0, 2.0, 5.0)], vec![]),
            &NormSettings::new("US", ["IBC"]),
        ));
        assert_eq!(failing.next_steps, also_failing.next_steps);
        assert_eq!(failing.status(), ComplianceStatus::NonCompliant);

        let compliant = generate_compliance_report(&check_compliance(&LayoutData::empty(), &NormSettings::default()));
        assert_ne!(compliant.next_steps, failing.next_steps);
    }

    #[test]
    fn test_config_error_report() {
        let result = check_compliance(&failing_layout(), &NormSettings::new("ZZ", ["IBC"]));
        let report = generate_compliance_report(&result);
        assert_eq!(report.compliance_rate, 100);
        assert!(report.recommendations.is_empty());
        assert_eq!(report.next_steps.len(), 3);
    }
}
