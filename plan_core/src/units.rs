//! # Unit Types
//!
//! Type-safe wrappers for the units a floor plan and a building code mix:
//! plan widths in feet, code widths in inches or millimeters, areas in
//! square feet or square meters.
//!
//! Building-code thresholds never travel as bare numbers. Each one is a
//! [`Threshold`] carrying its own [`Unit`] tag, and the compliance engine
//! converts it into the unit of the check before comparing.
//!
//! ## Example
//!
//! ```rust
//! use plan_core::units::{Feet, Inches, Threshold, Unit};
//!
//! let corridor = Feet(3.0);
//! let corridor_in: Inches = corridor.into();
//! assert_eq!(corridor_in.0, 36.0);
//!
//! let nbc_corridor = Threshold::new(1100.0, Unit::Millimeters);
//! assert!((nbc_corridor.to_inches().unwrap().0 - 43.307).abs() < 0.001);
//! ```

use serde::{Deserialize, Serialize};

const MM_PER_INCH: f64 = 25.4;
const SQ_FT_PER_SQ_M: f64 = 10.763_910_416_709_722;

// ============================================================================
// Length Units
// ============================================================================

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

impl From<Feet> for Inches {
    fn from(ft: Feet) -> Self {
        Inches(ft.0 * 12.0)
    }
}

impl From<Millimeters> for Inches {
    fn from(mm: Millimeters) -> Self {
        Inches(mm.0 / MM_PER_INCH)
    }
}

// ============================================================================
// Area Units
// ============================================================================

/// Area in square feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqFt(pub f64);

/// Area in square meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqM(pub f64);

impl From<SqM> for SqFt {
    fn from(sqm: SqM) -> Self {
        SqFt(sqm.0 * SQ_FT_PER_SQ_M)
    }
}

// ============================================================================
// Unit-tagged thresholds
// ============================================================================

/// Unit tag attached to every building-code threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "in")]
    Inches,
    #[serde(rename = "ft")]
    Feet,
    #[serde(rename = "mm")]
    Millimeters,
    #[serde(rename = "sq_ft")]
    SquareFeet,
    #[serde(rename = "sq_m")]
    SquareMeters,
}

impl Unit {
    /// Short label used in issue records and reports
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Inches => "in",
            Unit::Feet => "ft",
            Unit::Millimeters => "mm",
            Unit::SquareFeet => "sq ft",
            Unit::SquareMeters => "sq m",
        }
    }

    pub fn is_length(&self) -> bool {
        matches!(self, Unit::Inches | Unit::Feet | Unit::Millimeters)
    }

    pub fn is_area(&self) -> bool {
        matches!(self, Unit::SquareFeet | Unit::SquareMeters)
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A numeric building-code limit with an explicit unit.
///
/// ```json
/// { "value": 44, "unit": "in" }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub value: f64,
    pub unit: Unit,
}

impl Threshold {
    pub fn new(value: f64, unit: Unit) -> Self {
        Threshold { value, unit }
    }

    /// Convert a length threshold to inches.
    ///
    /// Returns `None` when the threshold is an area.
    pub fn to_inches(&self) -> Option<Inches> {
        match self.unit {
            Unit::Inches => Some(Inches(self.value)),
            Unit::Feet => Some(Feet(self.value).into()),
            Unit::Millimeters => Some(Millimeters(self.value).into()),
            Unit::SquareFeet | Unit::SquareMeters => None,
        }
    }

    /// Convert an area threshold to square feet.
    ///
    /// Returns `None` when the threshold is a length.
    pub fn to_sq_ft(&self) -> Option<SqFt> {
        match self.unit {
            Unit::SquareFeet => Some(SqFt(self.value)),
            Unit::SquareMeters => Some(SqM(self.value).into()),
            Unit::Inches | Unit::Feet | Unit::Millimeters => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feet_to_inches() {
        let ft = Feet(2.0);
        let inches: Inches = ft.into();
        assert_eq!(inches.0, 24.0);
    }

    #[test]
    fn test_millimeters_to_inches() {
        let inches: Inches = Millimeters(254.0).into();
        assert!((inches.0 - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_square_meters_to_square_feet() {
        let sqft: SqFt = SqM(1.0).into();
        assert!((sqft.0 - 10.7639).abs() < 1e-4);
    }

    #[test]
    fn test_threshold_conversion_respects_kind() {
        let width = Threshold::new(3.0, Unit::Feet);
        assert_eq!(width.to_inches(), Some(Inches(36.0)));
        assert_eq!(width.to_sq_ft(), None);

        let area = Threshold::new(70.0, Unit::SquareFeet);
        assert_eq!(area.to_sq_ft(), Some(SqFt(70.0)));
        assert_eq!(area.to_inches(), None);
    }

    #[test]
    fn test_threshold_serialization() {
        let threshold: Threshold = serde_json::from_str(r#"{"value": 800, "unit": "mm"}"#).unwrap();
        assert_eq!(threshold.unit, Unit::Millimeters);
        assert_eq!(threshold.value, 800.0);
        assert!(threshold.unit.is_length());
    }
}
