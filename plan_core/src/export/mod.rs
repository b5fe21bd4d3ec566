//! # Export Formats
//!
//! Encoders that turn a [`LayoutData`] into file artifacts:
//!
//! | Format | Module   | Output                        | MIME type          |
//! |--------|----------|-------------------------------|--------------------|
//! | DXF    | [`dxf`]  | CAD drawing (R12 ASCII)       | `application/dxf`  |
//! | SVG    | [`svg`]  | Vector plan                   | `image/svg+xml`    |
//! | PDF    | [`html`] | Printable HTML report         | `text/html`        |
//! | JSON   | [`json`] | Versioned envelope + layout   | `application/json` |
//! | CSV    | [`csv`]  | Room schedule                 | `text/csv`         |
//!
//! The PDF export is an HTML document meant for the browser's
//! print-to-PDF; it embeds the SVG plan and, when supplied, the metrics and
//! compliance report.
//!
//! Encoders never modify the layout. Circulation paths whose endpoints do
//! not resolve are left out of the drawings.
//!
//! ## Example
//!
//! ```rust
//! use plan_core::export::{export_batch, ExportContext};
//! use plan_core::layout::sample_layout;
//!
//! let layout = sample_layout();
//! let ctx = ExportContext::new("Lake House");
//! let results = export_batch(&layout, &["svg", "csv", "dwg"], &ctx);
//!
//! assert!(results[0].success);
//! assert!(results[1].success);
//! assert!(!results[2].success);
//! ```

pub mod csv;
pub mod dxf;
pub mod html;
pub mod json;
pub mod svg;

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::compliance::ComplianceReport;
use crate::errors::{PlanError, PlanResult};
use crate::layout::LayoutData;
use crate::metrics::PerformanceMetrics;

pub use json::{import_json, ExportEnvelope, EXPORT_FORMAT_VERSION};

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Dxf,
    Svg,
    Pdf,
    Json,
    Csv,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 5] = [
        ExportFormat::Dxf,
        ExportFormat::Svg,
        ExportFormat::Pdf,
        ExportFormat::Json,
        ExportFormat::Csv,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ExportFormat::Dxf => "dxf",
            ExportFormat::Svg => "svg",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    /// File extension of the produced artifact
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Dxf => "dxf",
            ExportFormat::Svg => "svg",
            ExportFormat::Pdf => "html",
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Dxf => "application/dxf",
            ExportFormat::Svg => "image/svg+xml",
            ExportFormat::Pdf => "text/html",
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dxf" => Ok(ExportFormat::Dxf),
            "svg" => Ok(ExportFormat::Svg),
            "pdf" | "html" => Ok(ExportFormat::Pdf),
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            _ => Err(PlanError::unsupported_format(s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Drawing options shared by the encoders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportOptions {
    /// Plan units to SVG user units
    pub scale: f64,

    /// Label rooms with their names
    pub include_text: bool,

    /// Margin around the SVG plan, in SVG user units
    pub padding: f64,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            scale: 1.0,
            include_text: true,
            padding: 20.0,
        }
    }
}

/// Everything an export needs besides the layout.
#[derive(Debug, Clone)]
pub struct ExportContext<'a> {
    pub project_name: String,
    pub options: ExportOptions,

    /// Included in the HTML report when present
    pub metrics: Option<&'a PerformanceMetrics>,
    pub compliance: Option<&'a ComplianceReport>,

    /// Caller-supplied metadata for the JSON envelope
    pub metadata: serde_json::Value,

    pub exported_at: DateTime<Utc>,
}

impl<'a> ExportContext<'a> {
    pub fn new(project_name: impl Into<String>) -> Self {
        ExportContext {
            project_name: project_name.into(),
            options: ExportOptions::default(),
            metrics: None,
            compliance: None,
            metadata: serde_json::Value::Object(serde_json::Map::new()),
            exported_at: Utc::now(),
        }
    }

    pub fn with_options(mut self, options: ExportOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_metrics(mut self, metrics: &'a PerformanceMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn with_compliance(mut self, compliance: &'a ComplianceReport) -> Self {
        self.compliance = Some(compliance);
        self
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }
}

/// A produced file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportArtifact {
    pub format: ExportFormat,
    pub filename: String,
    pub mime_type: String,
    pub content: String,
}

/// Outcome of one format within a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchExportEntry {
    /// Format name as requested
    pub format: String,
    pub success: bool,
    pub artifact: Option<ExportArtifact>,
    pub error: Option<String>,
}

/// Strip every character outside `[A-Za-z0-9_]`.
pub fn sanitize_project_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// `{sanitized_name}_{YYYY-MM-DD}.{ext}`
///
/// ```rust
/// use chrono::NaiveDate;
/// use plan_core::export::{export_filename, ExportFormat};
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
/// assert_eq!(export_filename("Lake House #2", date, ExportFormat::Dxf), "LakeHouse2_2024-03-09.dxf");
/// ```
pub fn export_filename(project_name: &str, date: NaiveDate, format: ExportFormat) -> String {
    format!(
        "{}_{}.{}",
        sanitize_project_name(project_name),
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

/// Encode one format.
pub fn export(layout: &LayoutData, format: ExportFormat, ctx: &ExportContext<'_>) -> PlanResult<ExportArtifact> {
    let content = match format {
        ExportFormat::Dxf => dxf::encode(layout, &ctx.options),
        ExportFormat::Svg => svg::encode(layout, &ctx.options),
        ExportFormat::Pdf => html::encode(layout, ctx),
        ExportFormat::Json => json::encode(layout, &ctx.metadata, ctx.exported_at)?,
        ExportFormat::Csv => csv::encode(layout),
    };

    Ok(ExportArtifact {
        format,
        filename: export_filename(&ctx.project_name, ctx.exported_at.date_naive(), format),
        mime_type: format.mime_type().to_string(),
        content,
    })
}

/// Encode several formats, each independently.
///
/// A failing or unknown format yields a `success: false` entry and never
/// stops the others. Entries come back in request order.
pub fn export_batch<S: AsRef<str>>(layout: &LayoutData, formats: &[S], ctx: &ExportContext<'_>) -> Vec<BatchExportEntry> {
    formats
        .iter()
        .map(|requested| {
            let requested = requested.as_ref();
            let outcome = requested
                .parse::<ExportFormat>()
                .and_then(|format| export(layout, format, ctx));

            match outcome {
                Ok(artifact) => {
                    tracing::debug!(format = requested, filename = %artifact.filename, "export succeeded");
                    BatchExportEntry {
                        format: requested.to_string(),
                        success: true,
                        artifact: Some(artifact),
                        error: None,
                    }
                }
                Err(e) => {
                    tracing::warn!(format = requested, error = %e, "export failed");
                    BatchExportEntry {
                        format: requested.to_string(),
                        success: false,
                        artifact: None,
                        error: Some(e.to_string()),
                    }
                }
            }
        })
        .collect()
}

/// Escape text for XML/HTML content and attribute values
pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
