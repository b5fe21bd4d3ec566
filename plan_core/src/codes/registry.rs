//! # Building-Code Registry
//!
//! The process-wide, read-only set of rule tables. The dataset is the TOML
//! document in `data/building_codes.toml`, embedded at compile time and
//! parsed once on first use.
//!
//! ## Structure
//!
//! ```text
//! CodeRegistry
//! ├── schema_version
//! └── countries: country code -> code id -> RuleTable
//!     ├── corridor_width / door_width / exit_width: MinimumRule
//!     ├── room_area: room type -> Threshold
//!     └── accessibility: { corridor_width, turning_space }
//! ```
//!
//! Loading checks every threshold's unit against its category, so a width
//! entered in square meters is rejected instead of silently compared.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{PlanError, PlanResult};
use crate::units::{Inches, SqFt, Threshold};

use super::room_type::RoomType;

const BUILDING_CODES_TOML: &str = include_str!("../../data/building_codes.toml");

static REGISTRY: Lazy<PlanResult<CodeRegistry>> = Lazy::new(|| {
    let registry = CodeRegistry::from_toml(BUILDING_CODES_TOML);
    match &registry {
        Ok(r) => tracing::debug!(schema = %r.schema_version, tables = r.table_count(), "loaded building-code registry"),
        Err(e) => tracing::error!(error = %e, "failed to load building-code registry"),
    }
    registry
});

/// The embedded building-code registry.
///
/// # Example
///
/// ```rust
/// use plan_core::codes::registry;
///
/// let ibc = registry().unwrap().get("US", "IBC").unwrap();
/// assert_eq!(ibc.corridor_width.as_ref().unwrap().minimum_inches().unwrap().0, 44.0);
/// ```
pub fn registry() -> PlanResult<&'static CodeRegistry> {
    REGISTRY.as_ref().map_err(Clone::clone)
}

/// A single minimum-value rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinimumRule {
    pub minimum: Threshold,

    /// Code section the value comes from
    #[serde(default)]
    pub reference: Option<String>,
}

impl MinimumRule {
    pub fn minimum_inches(&self) -> Option<Inches> {
        self.minimum.to_inches()
    }
}

/// Accessibility sub-rules of a table
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AccessibilityRules {
    /// Minimum accessible route width
    #[serde(default)]
    pub corridor_width: Option<MinimumRule>,

    /// Wheelchair turning circle diameter
    #[serde(default)]
    pub turning_space: Option<Threshold>,
}

/// Thresholds for one code in one jurisdiction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleTable {
    pub name: String,
    pub version: String,

    #[serde(default)]
    pub corridor_width: Option<MinimumRule>,

    #[serde(default)]
    pub door_width: Option<MinimumRule>,

    #[serde(default)]
    pub exit_width: Option<MinimumRule>,

    /// Minimum area keyed by [`RoomType::key`]
    #[serde(default)]
    pub room_area: BTreeMap<String, Threshold>,

    #[serde(default)]
    pub accessibility: Option<AccessibilityRules>,
}

impl RuleTable {
    /// Minimum area for a room type, in square feet
    pub fn room_area_minimum(&self, room_type: RoomType) -> Option<SqFt> {
        self.room_area.get(room_type.key()).and_then(Threshold::to_sq_ft)
    }

    /// Door rule, falling back to the exit rule when no door rule exists
    pub fn door_rule(&self) -> Option<&MinimumRule> {
        self.door_width.as_ref().or(self.exit_width.as_ref())
    }

    fn check_units(&self, label: &str) -> PlanResult<()> {
        let lengths = [
            ("corridor_width", self.corridor_width.as_ref().map(|r| r.minimum)),
            ("door_width", self.door_width.as_ref().map(|r| r.minimum)),
            ("exit_width", self.exit_width.as_ref().map(|r| r.minimum)),
            (
                "accessibility.corridor_width",
                self.accessibility
                    .as_ref()
                    .and_then(|a| a.corridor_width.as_ref())
                    .map(|r| r.minimum),
            ),
            (
                "accessibility.turning_space",
                self.accessibility.as_ref().and_then(|a| a.turning_space),
            ),
        ];

        for (field, threshold) in lengths {
            if let Some(t) = threshold {
                if !t.unit.is_length() {
                    return Err(unit_error(label, field, &t));
                }
            }
        }

        for (room_type, threshold) in &self.room_area {
            if !threshold.unit.is_area() {
                return Err(unit_error(label, &format!("room_area.{}", room_type), threshold));
            }
            if !RoomType::ALL.iter().any(|t| t.key() == room_type) {
                return Err(PlanError::RuleData {
                    reason: format!("{}: unknown room type '{}' in room_area", label, room_type),
                });
            }
        }

        Ok(())
    }
}

fn unit_error(label: &str, field: &str, threshold: &Threshold) -> PlanError {
    PlanError::RuleData {
        reason: format!("{}: {} has incompatible unit '{}'", label, field, threshold.unit),
    }
}

/// Summary of an available code, for selection lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeSummary {
    pub country: String,
    pub code: String,
    pub name: String,
    pub version: String,
}

/// Country -> code id -> rule table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeRegistry {
    pub schema_version: String,
    pub countries: BTreeMap<String, BTreeMap<String, RuleTable>>,
}

impl CodeRegistry {
    /// Parse and validate a registry document
    pub fn from_toml(source: &str) -> PlanResult<Self> {
        let registry: CodeRegistry = toml::from_str(source).map_err(|e| PlanError::RuleData {
            reason: e.to_string(),
        })?;

        for (country, codes) in &registry.countries {
            for (code, table) in codes {
                table.check_units(&format!("{}.{}", country, code))?;
            }
        }

        Ok(registry)
    }

    /// Look up one table. Country and code ids are case-insensitive.
    pub fn get(&self, country: &str, code: &str) -> Option<&RuleTable> {
        self.countries
            .get(&country.to_uppercase())?
            .get(&code.to_uppercase())
    }

    pub fn has_country(&self, country: &str) -> bool {
        self.countries.contains_key(&country.to_uppercase())
    }

    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.countries.keys().map(String::as_str)
    }

    /// Codes available for a country, empty when the country is unknown
    pub fn available_codes(&self, country: &str) -> Vec<CodeSummary> {
        let key = country.to_uppercase();
        self.countries
            .get(&key)
            .map(|codes| {
                codes
                    .iter()
                    .map(|(code, table)| CodeSummary {
                        country: key.clone(),
                        code: code.clone(),
                        name: table.name.clone(),
                        version: table.version.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn table_count(&self) -> usize {
        self.countries.values().map(BTreeMap::len).sum()
    }
}

/// Codes available for a country in the embedded registry
pub fn available_codes(country: &str) -> Vec<CodeSummary> {
    registry()
        .map(|r| r.available_codes(country))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Unit;

    #[test]
    fn test_embedded_registry_loads() {
        let registry = registry().unwrap();
        assert_eq!(registry.schema_version, "1.0");
        for (country, code) in [("US", "IBC"), ("US", "ADA"), ("US", "IRC"), ("CA", "NBC")] {
            assert!(registry.get(country, code).is_some(), "{}.{}", country, code);
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = registry().unwrap();
        assert!(registry.get("us", "ibc").is_some());
        assert!(registry.get("ZZ", "IBC").is_none());
        assert!(registry.get("US", "NBC").is_none());
    }

    #[test]
    fn test_metric_thresholds_convert() {
        let nbc = registry().unwrap().get("CA", "NBC").unwrap();
        let corridor = nbc.corridor_width.as_ref().unwrap();
        assert_eq!(corridor.minimum.unit, Unit::Millimeters);
        assert!((corridor.minimum_inches().unwrap().0 - 43.307).abs() < 0.001);

        let bedroom = nbc.room_area_minimum(RoomType::Bedroom).unwrap();
        assert!((bedroom.0 - 75.347).abs() < 0.001);
    }

    #[test]
    fn test_door_rule_falls_back_to_exit() {
        let registry = registry().unwrap();
        let irc = registry.get("US", "IRC").unwrap();
        assert!(irc.door_width.is_none());
        assert_eq!(irc.door_rule().unwrap().minimum_inches().unwrap().0, 32.0);
    }

    #[test]
    fn test_available_codes() {
        let codes = available_codes("US");
        let ids: Vec<_> = codes.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(ids, vec!["ADA", "IBC", "IRC"]);
        assert!(available_codes("ZZ").is_empty());
    }

    #[test]
    fn test_unit_mismatch_is_rejected() {
        let source = r#"
            schema_version = "1.0"
            [countries.XX.BAD]
            name = "Bad"
            version = "1"
            [countries.XX.BAD.corridor_width]
            minimum = { value = 2.0, unit = "sq_m" }
        "#;
        let err = CodeRegistry::from_toml(source).unwrap_err();
        assert_eq!(err.error_code(), "RULE_DATA_ERROR");
    }

    #[test]
    fn test_unknown_room_type_is_rejected() {
        let source = r#"
            schema_version = "1.0"
            [countries.XX.BAD]
            name = "Bad"
            version = "1"
            [countries.XX.BAD.room_area]
            ballroom = { value = 200.0, unit = "sq_ft" }
        "#;
        assert!(CodeRegistry::from_toml(source).is_err());
    }
}
