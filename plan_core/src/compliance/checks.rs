//! Per-category checks run against one rule table.
//!
//! Every check either records a pass or appends a finding to [`Findings`].
//! Circulation paths whose endpoints do not resolve are skipped. Plan widths
//! are in feet and compared in inches; areas are compared in square feet.

use crate::codes::{MinimumRule, RoomType, RuleTable};
use crate::layout::{CirculationPath, LayoutData};
use crate::units::{Feet, Inches};

use super::{ComplianceIssue, Findings, IssueType, Severity};

/// A single circulation path stands for one door of at most this width
const MAX_DOOR_WIDTH_IN: f64 = 36.0;

const INCHES: &str = "in";
const SQUARE_FEET: &str = "sq ft";

fn path_width_in(path: &CirculationPath) -> Inches {
    Feet(path.width).into()
}

fn resolved_paths<'a>(layout: &'a LayoutData) -> impl Iterator<Item = &'a CirculationPath> + 'a {
    layout.circulation.iter().filter(move |path| {
        let resolved = layout.resolve(path).is_some();
        if !resolved {
            tracing::debug!(path = %path.describe(), "skipping unresolved circulation path");
        }
        resolved
    })
}

fn minimum_in(rule: &MinimumRule) -> Option<f64> {
    rule.minimum_inches().map(|i| i.0)
}

fn with_reference(message: String, rule: &MinimumRule) -> String {
    match &rule.reference {
        Some(reference) => format!("{} ({})", message, reference),
        None => message,
    }
}

/// Every path width against the table's corridor minimum
pub(crate) fn check_corridor_width(layout: &LayoutData, code_id: &str, table: &RuleTable, findings: &mut Findings) {
    let Some(rule) = table.corridor_width.as_ref() else {
        return;
    };
    let Some(required) = minimum_in(rule) else {
        return;
    };

    for path in resolved_paths(layout) {
        let actual = path_width_in(path).0;
        if actual < required {
            findings.issue(ComplianceIssue {
                issue_type: IssueType::CorridorWidth,
                severity: Severity::Critical,
                message: with_reference(
                    format!(
                        "Corridor {} is {:.1} in wide; {} requires at least {:.1} in",
                        path.describe(),
                        actual,
                        code_id,
                        required
                    ),
                    rule,
                ),
                code: format!("{}_CORRIDOR_WIDTH", code_id),
                location: path.describe(),
                required: Some(required),
                actual: Some(actual),
                unit: Some(INCHES.to_string()),
            });
        } else {
            findings.pass();
        }
    }
}

/// Each room's area against the minimum for its inferred type
pub(crate) fn check_room_area(layout: &LayoutData, code_id: &str, table: &RuleTable, findings: &mut Findings) {
    for room in &layout.rooms {
        let room_type = RoomType::classify(&room.name);
        let Some(required) = table.room_area_minimum(room_type) else {
            continue;
        };

        if room.area < required.0 {
            findings.issue(ComplianceIssue {
                issue_type: IssueType::RoomArea,
                severity: Severity::Critical,
                message: format!(
                    "{} ({}) is {:.0} sq ft; {} requires at least {:.0} sq ft",
                    room.name, room_type, room.area, code_id, required.0
                ),
                code: format!("{}_ROOM_AREA", code_id),
                location: room.name.clone(),
                required: Some(required.0),
                actual: Some(room.area),
                unit: Some(SQUARE_FEET.to_string()),
            });
        } else {
            findings.pass();
        }
    }
}

/// Accessible route width and wheelchair turning space
pub(crate) fn check_accessibility(layout: &LayoutData, code_id: &str, table: &RuleTable, findings: &mut Findings) {
    let Some(rules) = table.accessibility.as_ref() else {
        return;
    };

    if let Some(rule) = rules.corridor_width.as_ref() {
        if let Some(required) = minimum_in(rule) {
            for path in resolved_paths(layout) {
                let actual = path_width_in(path).0;
                if actual < required {
                    findings.issue(ComplianceIssue {
                        issue_type: IssueType::AccessibilityRoute,
                        severity: Severity::Critical,
                        message: with_reference(
                            format!(
                                "Accessible route {} is {:.1} in wide; {} requires at least {:.1} in",
                                path.describe(),
                                actual,
                                code_id,
                                required
                            ),
                            rule,
                        ),
                        code: format!("{}_ACCESSIBLE_ROUTE", code_id),
                        location: path.describe(),
                        required: Some(required),
                        actual: Some(actual),
                        unit: Some(INCHES.to_string()),
                    });
                } else {
                    findings.pass();
                }
            }
        }
    }

    let Some(diameter) = rules.turning_space.and_then(|t| t.to_inches()) else {
        return;
    };
    let required_area = (diameter.0 / 12.0).powi(2);

    for room in &layout.rooms {
        let room_type = RoomType::classify(&room.name);
        if !room_type.needs_turning_space() {
            continue;
        }

        if room.area < required_area {
            findings.warning(ComplianceIssue {
                issue_type: IssueType::TurningSpace,
                severity: Severity::Warning,
                message: format!(
                    "{} may not fit a {:.0} in turning circle ({:.0} sq ft < {:.0} sq ft)",
                    room.name, diameter.0, room.area, required_area
                ),
                code: format!("{}_TURNING_SPACE", code_id),
                location: room.name.clone(),
                required: Some(required_area),
                actual: Some(room.area),
                unit: Some(SQUARE_FEET.to_string()),
            });
        } else {
            findings.pass();
        }
    }
}

/// Each path as one door, capped at a single-leaf width
pub(crate) fn check_door_width(layout: &LayoutData, code_id: &str, table: &RuleTable, findings: &mut Findings) {
    let Some(rule) = table.door_rule() else {
        return;
    };
    let Some(required) = minimum_in(rule) else {
        return;
    };

    for path in resolved_paths(layout) {
        let actual = path_width_in(path).0.min(MAX_DOOR_WIDTH_IN);
        if actual < required {
            findings.issue(ComplianceIssue {
                issue_type: IssueType::DoorWidth,
                severity: Severity::Critical,
                message: with_reference(
                    format!(
                        "Door on {} is {:.1} in wide; {} requires at least {:.1} in",
                        path.describe(),
                        actual,
                        code_id,
                        required
                    ),
                    rule,
                ),
                code: format!("{}_DOOR_WIDTH", code_id),
                location: path.describe(),
                required: Some(required),
                actual: Some(actual),
                unit: Some(INCHES.to_string()),
            });
        } else {
            findings.pass();
        }
    }
}
