//! # Pipeline Settings
//!
//! One document configuring every stage. Any field may be omitted; missing
//! fields take their defaults.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "norms": { "country": "CA", "codes": ["NBC"], "accessibility": true },
//!   "metrics": { "minCorridorWidthFt": 4.0 },
//!   "export": { "scale": 10.0, "includeText": true, "padding": 20.0 }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::compliance::NormSettings;
use crate::errors::PlanResult;
use crate::export::ExportOptions;
use crate::metrics::MetricsOptions;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanSettings {
    pub norms: NormSettings,
    pub metrics: MetricsOptions,
    pub export: ExportOptions,
}

impl PlanSettings {
    /// Parse a settings document.
    ///
    /// ```rust
    /// use plan_core::settings::PlanSettings;
    ///
    /// let settings = PlanSettings::from_json(r#"{ "export": { "scale": 12 } }"#).unwrap();
    /// assert_eq!(settings.export.scale, 12.0);
    /// assert!(settings.export.include_text);
    /// assert_eq!(settings.norms.country, "US");
    /// ```
    pub fn from_json(text: &str) -> PlanResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> PlanResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
