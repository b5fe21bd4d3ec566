//! # Compliance Rule Engine
//!
//! Evaluates a [`LayoutData`] against the building-code rule tables selected
//! by [`NormSettings`], in a single pass.
//!
//! ## Flow
//!
//! 1. Resolve `(country, code)` tables from the [`registry`](crate::codes::registry).
//!    An unknown country, or a country with none of the requested codes,
//!    returns immediately with status `error` and one `CONFIG_ERROR` issue.
//! 2. Run each table's checks (corridor width, room area, accessibility,
//!    door width), appending issues and warnings and counting passes.
//! 3. Derive the status: `non-compliant` on any critical issue, `warning` on
//!    any other finding, otherwise `compliant`.
//!
//! Findings are plain records; nothing in this module returns an error.
//!
//! ## Example
//!
//! ```rust
//! use plan_core::compliance::{check_compliance, ComplianceStatus, NormSettings};
//! use plan_core::layout::{CirculationPath, LayoutData, Room};
//!
//! let layout = LayoutData::new(
//!     vec![
//!         Room::new("r1", "office", 50.0, 0.0, 0.0, 5.0, 10.0),
//!         Room::new("r2", "meeting", 150.0, 5.0, 0.0, 15.0, 10.0),
//!     ],
//!     vec![CirculationPath::new("r1", "r2", 2.0)],
//! );
//!
//! let result = check_compliance(&layout, &NormSettings::new("US", ["IBC"]));
//! assert_eq!(result.status, ComplianceStatus::NonCompliant);
//! assert!(result.issues.iter().any(|i| i.code == "IBC_ROOM_AREA"));
//! assert!(result.issues.iter().any(|i| i.code == "IBC_CORRIDOR_WIDTH"));
//! ```

pub mod checks;
pub mod report;

use serde::{Deserialize, Serialize};

use crate::codes::{registry, RuleTable};
use crate::layout::LayoutData;

pub use report::{generate_compliance_report, ComplianceRecommendation, ComplianceReport};

/// Code attached to the single issue of an `error` result
pub const CONFIG_ERROR_CODE: &str = "CONFIG_ERROR";

/// Which rule tables to evaluate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormSettings {
    /// Country code, e.g. "US"
    pub country: String,

    /// Code ids within the country, e.g. ["IBC", "ADA"]
    pub codes: Vec<String>,

    /// Run the accessibility block of each table
    pub accessibility: bool,
}

impl NormSettings {
    pub fn new<I, S>(country: impl Into<String>, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        NormSettings {
            country: country.into(),
            codes: codes.into_iter().map(Into::into).collect(),
            accessibility: true,
        }
    }

    pub fn with_accessibility(mut self, accessibility: bool) -> Self {
        self.accessibility = accessibility;
        self
    }

    /// Requested code ids, upper-cased, duplicates removed, order kept
    pub fn unique_codes(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for code in &self.codes {
            let code = code.trim().to_uppercase();
            if !code.is_empty() && !out.contains(&code) {
                out.push(code);
            }
        }
        out
    }
}

impl Default for NormSettings {
    fn default() -> Self {
        NormSettings::new("US", ["IBC", "ADA"])
    }
}

/// Overall outcome of a compliance check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplianceStatus {
    Compliant,
    Warning,
    NonCompliant,
    Error,
}

impl ComplianceStatus {
    /// Wire name, as serialized
    pub fn key(&self) -> &'static str {
        match self {
            ComplianceStatus::Compliant => "compliant",
            ComplianceStatus::Warning => "warning",
            ComplianceStatus::NonCompliant => "non-compliant",
            ComplianceStatus::Error => "error",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ComplianceStatus::Compliant => "Compliant",
            ComplianceStatus::Warning => "Warning",
            ComplianceStatus::NonCompliant => "Non-Compliant",
            ComplianceStatus::Error => "Error",
        }
    }
}

impl std::fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Severity of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks a compliant status
    Critical,
    /// Advisory only
    Warning,
}

/// Check category a finding came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    Configuration,
    CorridorWidth,
    RoomArea,
    AccessibilityRoute,
    TurningSpace,
    DoorWidth,
}

/// One issue or warning. A flat record, not an error value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceIssue {
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub severity: Severity,
    pub message: String,

    /// Machine-readable code, e.g. "IBC_CORRIDOR_WIDTH"
    pub code: String,

    /// Offending room name or path ("from -> to")
    pub location: String,

    pub required: Option<f64>,
    pub actual: Option<f64>,
    pub unit: Option<String>,
}

impl ComplianceIssue {
    pub fn is_critical(&self) -> bool {
        self.severity == Severity::Critical
    }
}

/// Check counters. `total_checks = passed + failed + warnings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceSummary {
    pub total_checks: u32,
    pub passed: u32,
    pub failed: u32,
    pub warnings: u32,
}

/// Outcome of [`check_compliance`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceResult {
    pub status: ComplianceStatus,
    pub issues: Vec<ComplianceIssue>,
    pub warnings: Vec<ComplianceIssue>,
    pub summary: ComplianceSummary,
}

impl ComplianceResult {
    fn config_error(message: impl Into<String>) -> Self {
        ComplianceResult {
            status: ComplianceStatus::Error,
            issues: vec![ComplianceIssue {
                issue_type: IssueType::Configuration,
                severity: Severity::Critical,
                message: message.into(),
                code: CONFIG_ERROR_CODE.to_string(),
                location: "normSettings".to_string(),
                required: None,
                actual: None,
                unit: None,
            }],
            warnings: Vec::new(),
            summary: ComplianceSummary::default(),
        }
    }

    pub fn is_compliant(&self) -> bool {
        self.status == ComplianceStatus::Compliant
    }
}

/// Accumulates findings and counters across tables
#[derive(Debug, Default)]
pub(crate) struct Findings {
    pub issues: Vec<ComplianceIssue>,
    pub warnings: Vec<ComplianceIssue>,
    pub passed: u32,
}

impl Findings {
    pub fn pass(&mut self) {
        self.passed += 1;
    }

    pub fn issue(&mut self, issue: ComplianceIssue) {
        tracing::debug!(code = %issue.code, location = %issue.location, "compliance issue");
        self.issues.push(issue);
    }

    pub fn warning(&mut self, warning: ComplianceIssue) {
        tracing::debug!(code = %warning.code, location = %warning.location, "compliance warning");
        self.warnings.push(warning);
    }

    fn into_result(self) -> ComplianceResult {
        let failed = self.issues.len() as u32;
        let warnings = self.warnings.len() as u32;
        let summary = ComplianceSummary {
            total_checks: self.passed + failed + warnings,
            passed: self.passed,
            failed,
            warnings,
        };

        let status = if self.issues.iter().any(ComplianceIssue::is_critical) {
            ComplianceStatus::NonCompliant
        } else if !self.issues.is_empty() || !self.warnings.is_empty() {
            ComplianceStatus::Warning
        } else {
            ComplianceStatus::Compliant
        };

        ComplianceResult {
            status,
            issues: self.issues,
            warnings: self.warnings,
            summary,
        }
    }
}

/// Resolve the rule tables named by `settings`.
///
/// Unknown code ids are skipped; the caller decides what an empty result
/// means.
fn resolve_tables(settings: &NormSettings) -> Result<Vec<(String, &'static RuleTable)>, String> {
    let registry = registry().map_err(|e| format!("Building-code data unavailable: {}", e))?;

    if !registry.has_country(&settings.country) {
        return Err(format!("Unknown country code '{}'", settings.country));
    }

    let mut tables = Vec::new();
    for code in settings.unique_codes() {
        match registry.get(&settings.country, &code) {
            Some(table) => tables.push((code, table)),
            None => tracing::warn!(country = %settings.country, code = %code, "unknown building code, skipping"),
        }
    }

    if tables.is_empty() {
        return Err(format!(
            "None of the requested codes [{}] exist for country '{}'",
            settings.codes.join(", "),
            settings.country
        ));
    }

    Ok(tables)
}

/// Check a layout against the selected building codes.
pub fn check_compliance(layout: &LayoutData, settings: &NormSettings) -> ComplianceResult {
    let tables = match resolve_tables(settings) {
        Ok(tables) => tables,
        Err(message) => {
            tracing::warn!(country = %settings.country, "compliance configuration error: {}", message);
            return ComplianceResult::config_error(message);
        }
    };

    let mut findings = Findings::default();
    for (code_id, table) in tables {
        checks::check_corridor_width(layout, &code_id, table, &mut findings);
        checks::check_room_area(layout, &code_id, table, &mut findings);
        if settings.accessibility {
            checks::check_accessibility(layout, &code_id, table, &mut findings);
        }
        checks::check_door_width(layout, &code_id, table, &mut findings);
    }

    let result = findings.into_result();
    tracing::info!(
        status = %result.status,
        checks = result.summary.total_checks,
        failed = result.summary.failed,
        warnings = result.summary.warnings,
        "compliance check complete"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{sample_layout, CirculationPath, Room};

    fn office_and_meeting(path_width: f64) -> LayoutData {
        LayoutData::new(
            vec![
                Room::new("r1", "office", 50.0, 0.0, 0.0, 5.0, 10.0),
                Room::new("r2", "meeting", 150.0, 5.0, 0.0, 15.0, 10.0),
            ],
            vec![CirculationPath::new("r1", "r2", path_width)],
        )
    }

    #[test]
    fn test_ibc_office_and_corridor_scenario() {
        let result = check_compliance(&office_and_meeting(2.0), &NormSettings::new("US", ["IBC"]));
        assert_eq!(result.status, ComplianceStatus::NonCompliant);

        let area = result.issues.iter().find(|i| i.code == "IBC_ROOM_AREA").unwrap();
        assert_eq!(area.location, "office");
        assert_eq!(area.required, Some(80.0));
        assert_eq!(area.actual, Some(50.0));
        assert!(area.is_critical());

        let corridor = result.issues.iter().find(|i| i.code == "IBC_CORRIDOR_WIDTH").unwrap();
        assert_eq!(corridor.required, Some(44.0));
        assert_eq!(corridor.actual, Some(24.0));
        assert_eq!(corridor.unit.as_deref(), Some("in"));

        assert!(!result.issues.iter().any(|i| i.location == "meeting"));
    }

    #[test]
    fn test_ada_narrow_path_is_critical() {
        let result = check_compliance(&office_and_meeting(3.0), &NormSettings::new("US", ["ADA"]));
        assert_eq!(result.status, ComplianceStatus::NonCompliant);
        assert!(result.issues.iter().any(|i| i.is_critical()
            && (i.code.ends_with("_ACCESSIBLE_ROUTE") || i.code.ends_with("_CORRIDOR_WIDTH"))));
    }

    #[test]
    fn test_accessibility_flag_disables_route_and_turning_checks() {
        let mut layout = office_and_meeting(2.5);
        layout.rooms.push(Room::new("r3", "Restroom", 20.0, 20.0, 0.0, 4.0, 5.0));
        let codes = |result: &ComplianceResult| -> Vec<String> {
            result.issues.iter().chain(&result.warnings).map(|i| i.code.clone()).collect()
        };

        let on = check_compliance(&layout, &NormSettings::new("US", ["ADA"]));
        let on_codes = codes(&on);
        assert!(on_codes.iter().any(|c| c == "ADA_ACCESSIBLE_ROUTE"));
        assert!(on_codes.iter().any(|c| c == "ADA_TURNING_SPACE"));

        let off = check_compliance(&layout, &NormSettings::new("US", ["ADA"]).with_accessibility(false));
        let off_codes = codes(&off);
        assert!(!off_codes.iter().any(|c| c == "ADA_ACCESSIBLE_ROUTE"));
        assert!(!off_codes.iter().any(|c| c == "ADA_TURNING_SPACE"));
        assert!(off_codes.iter().any(|c| c == "ADA_CORRIDOR_WIDTH"));
        assert!(off.summary.total_checks < on.summary.total_checks);
        assert_eq!(off.status, ComplianceStatus::NonCompliant);
    }

    #[test]
    fn test_unknown_country_is_config_error() {
        let result = check_compliance(&sample_layout(), &NormSettings::new("ZZ", ["IBC"]));
        assert_eq!(result.status, ComplianceStatus::Error);
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].code, CONFIG_ERROR_CODE);
        assert_eq!(result.summary, ComplianceSummary::default());
    }

    #[test]
    fn test_no_matching_codes_is_config_error() {
        let result = check_compliance(&sample_layout(), &NormSettings::new("US", ["NBC", "XYZ"]));
        assert_eq!(result.status, ComplianceStatus::Error);
        assert_eq!(result.issues[0].code, CONFIG_ERROR_CODE);
    }

    #[test]
    fn test_unknown_codes_are_skipped_when_others_resolve() {
        let result = check_compliance(&office_and_meeting(5.0), &NormSettings::new("US", ["XYZ", "IBC"]));
        assert_ne!(result.status, ComplianceStatus::Error);
        assert!(result.issues.iter().all(|i| i.code.starts_with("IBC_")));
    }

    #[test]
    fn test_compliant_layout() {
        let layout = LayoutData::new(
            vec![
                Room::new("r1", "Office", 120.0, 0.0, 0.0, 10.0, 12.0),
                Room::new("r2", "Kitchen", 100.0, 10.0, 0.0, 10.0, 10.0),
            ],
            vec![CirculationPath::new("r1", "r2", 4.0)],
        );
        let result = check_compliance(&layout, &NormSettings::new("US", ["IBC"]));
        assert_eq!(result.status, ComplianceStatus::Compliant);
        assert!(result.is_compliant());
        assert_eq!(result.summary.failed, 0);
        assert_eq!(result.summary.total_checks, result.summary.passed);
    }

    #[test]
    fn test_summary_invariant() {
        let result = check_compliance(&sample_layout(), &NormSettings::default());
        let s = result.summary;
        assert_eq!(s.total_checks, s.passed + s.failed + s.warnings);
        assert_eq!(s.failed as usize, result.issues.len());
        assert_eq!(s.warnings as usize, result.warnings.len());
    }

    #[test]
    fn test_empty_layout_is_compliant() {
        let result = check_compliance(&LayoutData::empty(), &NormSettings::default());
        assert_eq!(result.status, ComplianceStatus::Compliant);
        assert_eq!(result.summary.total_checks, 0);
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(serde_json::to_string(&ComplianceStatus::NonCompliant).unwrap(), "\"non-compliant\"");
        let result = check_compliance(&office_and_meeting(2.0), &NormSettings::new("US", ["IBC"]));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["issues"][0]["type"], "corridor_width");
        assert_eq!(json["summary"]["totalChecks"], result.summary.total_checks);
    }

    #[test]
    fn test_unique_codes() {
        let settings = NormSettings::new("US", ["ibc", "IBC", " ada ", ""]);
        assert_eq!(settings.unique_codes(), vec!["IBC".to_string(), "ADA".to_string()]);
    }
}
