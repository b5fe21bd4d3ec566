//! # Project Data Structures
//!
//! A `Project` ties a layout to the norms it is checked against. Projects
//! serialize to human-readable JSON; persistence beyond a single file is
//! left to the host application.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── id: Uuid
//! ├── name: String          (report titles, export filenames)
//! ├── meta: ProjectMetadata (schema version, timestamps)
//! ├── norms: NormSettings   (country, codes, accessibility)
//! └── layout: LayoutData
//! ```
//!
//! ## Example
//!
//! ```rust
//! use plan_core::layout::sample_layout;
//! use plan_core::metrics::MetricsOptions;
//! use plan_core::project::Project;
//!
//! let project = Project::new("Lake House", sample_layout());
//! let analysis = project.analyze(&MetricsOptions::default());
//!
//! assert_eq!(analysis.report.result, analysis.compliance);
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! assert!(json.contains("\"schemaVersion\""));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::compliance::{check_compliance, generate_compliance_report, ComplianceReport, ComplianceResult, NormSettings};
use crate::errors::PlanResult;
use crate::layout::LayoutData;
use crate::metrics::{calculate_all_metrics, MetricsOptions, PerformanceMetrics};

/// Current schema version for project files
pub const SCHEMA_VERSION: &str = "1.0";

/// Root project container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub meta: ProjectMetadata,

    #[serde(default)]
    pub norms: NormSettings,

    #[serde(default)]
    pub layout: LayoutData,
}

impl Project {
    /// Create a project with default norms.
    ///
    /// ```rust
    /// use plan_core::layout::LayoutData;
    /// use plan_core::project::{Project, SCHEMA_VERSION};
    ///
    /// let project = Project::new("North Wing", LayoutData::empty());
    /// assert_eq!(project.meta.schema_version, SCHEMA_VERSION);
    /// assert_eq!(project.norms.country, "US");
    /// ```
    pub fn new(name: impl Into<String>, layout: LayoutData) -> Self {
        let now = Utc::now();
        Project {
            id: Uuid::new_v4(),
            name: name.into(),
            meta: ProjectMetadata {
                schema_version: SCHEMA_VERSION.to_string(),
                created: now,
                modified: now,
            },
            norms: NormSettings::default(),
            layout,
        }
    }

    pub fn with_norms(mut self, norms: NormSettings) -> Self {
        self.norms = norms;
        self
    }

    /// Replace the layout, e.g. after regeneration.
    pub fn set_layout(&mut self, layout: LayoutData) {
        self.layout = layout;
        self.touch();
    }

    /// Scale room dimensions in place; the previous layout is kept on error.
    pub fn scale_layout(&mut self, multiplier: f64) -> PlanResult<()> {
        let scaled = self.layout.scaled(multiplier)?;
        self.set_layout(scaled);
        Ok(())
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    /// Run metrics and compliance against the project's own norms.
    pub fn analyze(&self, options: &MetricsOptions) -> ProjectAnalysis {
        let metrics = calculate_all_metrics(&self.layout, options);
        let compliance = check_compliance(&self.layout, &self.norms);
        let report = generate_compliance_report(&compliance);
        tracing::info!(
            project = %self.name,
            status = %compliance.status,
            rate = report.compliance_rate,
            "project analyzed"
        );
        ProjectAnalysis {
            metrics,
            compliance,
            report,
        }
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("Untitled", LayoutData::empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub schema_version: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// Everything computed for one project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectAnalysis {
    pub metrics: PerformanceMetrics,
    pub compliance: ComplianceResult,
    pub report: ComplianceReport,
}
