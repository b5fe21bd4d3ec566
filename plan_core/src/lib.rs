//! # plan_core - Floor Plan Analysis Engine
//!
//! `plan_core` evaluates generated floor plans. Given a [`LayoutData`] it
//! computes performance scores, checks the plan against building-code
//! tables, and encodes it as DXF, SVG, an HTML report, JSON, or CSV. All
//! inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions over an immutable layout
//! - **Tolerant**: Partial layouts and dangling references are skipped, not fatal
//! - **Data-driven codes**: Adding a building code is a change to a TOML table
//! - **Rich Errors**: Structured error types at the fallible edges
//!
//! ## Quick Start
//!
//! ```rust
//! use plan_core::compliance::{check_compliance, generate_compliance_report, NormSettings};
//! use plan_core::layout::sample_layout;
//! use plan_core::metrics::{calculate_all_metrics, MetricsOptions};
//!
//! let layout = sample_layout();
//!
//! let metrics = calculate_all_metrics(&layout, &MetricsOptions::default());
//! println!("Daylight: {} h", metrics.daylight_hours);
//!
//! let result = check_compliance(&layout, &NormSettings::new("US", ["IBC", "ADA"]));
//! let report = generate_compliance_report(&result);
//! println!("{} ({}%)", report.status(), report.compliance_rate);
//! ```
//!
//! ## Modules
//!
//! - [`layout`] - Rooms, circulation paths, validation and scaling
//! - [`geometry`] - Bounding boxes and room adjacency
//! - [`units`] - Type-safe unit wrappers and unit-tagged thresholds
//! - [`metrics`] - Performance scores and recommendations
//! - [`codes`] - Building-code dataset and room-type inference
//! - [`compliance`] - Rule engine and compliance report
//! - [`export`] - DXF, SVG, HTML, JSON and CSV encoders
//! - [`project`] - Project container and one-call analysis
//! - [`settings`] - Pipeline configuration document
//! - [`file_io`] - Input detection and atomic artifact writes
//! - [`errors`] - Structured error types

pub mod codes;
pub mod compliance;
pub mod errors;
pub mod export;
pub mod file_io;
pub mod geometry;
pub mod layout;
pub mod metrics;
pub mod project;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use compliance::{check_compliance, generate_compliance_report, ComplianceReport, ComplianceResult, NormSettings};
pub use errors::{PlanError, PlanResult};
pub use export::{export, export_batch, ExportArtifact, ExportContext, ExportFormat, ExportOptions};
pub use layout::{CirculationPath, LayoutData, Room};
pub use metrics::{calculate_all_metrics, MetricsOptions, PerformanceMetrics};
pub use project::Project;
pub use settings::PlanSettings;
