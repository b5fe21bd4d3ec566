//! # File I/O Module
//!
//! Reading inputs and writing artifacts:
//! - **Input detection**: a file may hold a bare layout, a project, or a
//!   JSON export envelope
//! - **Atomic writes**: write to `.tmp`, sync, rename so a crash never
//!   leaves a half-written file
//! - **Version validation**: projects and envelopes must share the major
//!   schema version
//!
//! ## Example
//!
//! ```rust,no_run
//! use plan_core::export::{export, ExportContext, ExportFormat};
//! use plan_core::file_io::{load_layout, write_artifact};
//! use std::path::Path;
//!
//! let source = load_layout(Path::new("layout.json"))?;
//! let ctx = ExportContext::new(source.project_name().unwrap_or("layout"));
//! let artifact = export(source.layout(), ExportFormat::Svg, &ctx)?;
//! write_artifact(Path::new("out"), &artifact)?;
//! # Ok::<(), plan_core::errors::PlanError>(())
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::errors::{PlanError, PlanResult};
use crate::export::{import_json, ExportArtifact, ExportEnvelope};
use crate::layout::LayoutData;
use crate::project::{Project, SCHEMA_VERSION};
use crate::settings::PlanSettings;

/// What an input file turned out to contain.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutSource {
    Layout(LayoutData),
    Project(Box<Project>),
    Envelope(Box<ExportEnvelope>),
}

impl LayoutSource {
    pub fn layout(&self) -> &LayoutData {
        match self {
            LayoutSource::Layout(layout) => layout,
            LayoutSource::Project(project) => &project.layout,
            LayoutSource::Envelope(envelope) => &envelope.layout,
        }
    }

    pub fn into_layout(self) -> LayoutData {
        match self {
            LayoutSource::Layout(layout) => layout,
            LayoutSource::Project(project) => project.layout,
            LayoutSource::Envelope(envelope) => envelope.layout,
        }
    }

    /// Only projects carry a name
    pub fn project_name(&self) -> Option<&str> {
        match self {
            LayoutSource::Project(project) => Some(&project.name),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            LayoutSource::Layout(_) => "layout",
            LayoutSource::Project(_) => "project",
            LayoutSource::Envelope(_) => "export envelope",
        }
    }
}

fn read_text(path: &Path) -> PlanResult<String> {
    fs::read_to_string(path).map_err(|e| PlanError::file_error("read", path.display().to_string(), e.to_string()))
}

/// Interpret JSON text as a layout, project, or export envelope.
///
/// ```rust
/// use plan_core::file_io::{parse_layout_source, LayoutSource};
///
/// let source = parse_layout_source(r#"{ "rooms": [], "circulation": [] }"#).unwrap();
/// assert!(matches!(source, LayoutSource::Layout(_)));
/// ```
pub fn parse_layout_source(text: &str) -> PlanResult<LayoutSource> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let Some(object) = value.as_object() else {
        return Err(PlanError::invalid_input("input", "non-object JSON", "Expected a JSON object"));
    };

    if object.contains_key("meta") {
        let project: Project = serde_json::from_value(value)?;
        validate_version(&project.meta.schema_version, SCHEMA_VERSION)?;
        return Ok(LayoutSource::Project(Box::new(project)));
    }

    if object.contains_key("version") && object.contains_key("layout") {
        return Ok(LayoutSource::Envelope(Box::new(import_json(text)?)));
    }

    if object.contains_key("rooms") || object.contains_key("circulation") {
        return Ok(LayoutSource::Layout(serde_json::from_value(value)?));
    }

    Err(PlanError::invalid_input(
        "input",
        "unrecognized document",
        "Expected a layout, a project, or an export envelope",
    ))
}

/// Load any supported input file.
pub fn load_layout(path: &Path) -> PlanResult<LayoutSource> {
    let source = parse_layout_source(&read_text(path)?).map_err(|e| match e {
        PlanError::SerializationError { reason } => PlanError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), reason),
        },
        other => other,
    })?;
    tracing::debug!(path = %path.display(), kind = source.kind(), "input loaded");
    Ok(source)
}

/// Load a settings document.
pub fn load_settings(path: &Path) -> PlanResult<PlanSettings> {
    PlanSettings::from_json(&read_text(path)?)
}

/// Save a project atomically.
pub fn save_project(project: &Project, path: &Path) -> PlanResult<()> {
    let json = serde_json::to_string_pretty(project)?;
    write_atomic(path, json.as_bytes())
}

/// Load a project file, rejecting incompatible schema versions.
pub fn load_project(path: &Path) -> PlanResult<Project> {
    let project: Project = serde_json::from_str(&read_text(path)?).map_err(|e| PlanError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })?;
    validate_version(&project.meta.schema_version, SCHEMA_VERSION)?;
    Ok(project)
}

/// Write an artifact into `dir` under its own filename.
///
/// Creates `dir` if needed. Returns the final path.
pub fn write_artifact(dir: &Path, artifact: &ExportArtifact) -> PlanResult<PathBuf> {
    fs::create_dir_all(dir)
        .map_err(|e| PlanError::file_error("create directory", dir.display().to_string(), e.to_string()))?;
    let path = dir.join(&artifact.filename);
    write_atomic(&path, artifact.content.as_bytes())?;
    tracing::info!(path = %path.display(), bytes = artifact.content.len(), "artifact written");
    Ok(path)
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write to `<path>.tmp`, sync, then rename over `path`.
fn write_atomic(path: &Path, bytes: &[u8]) -> PlanResult<()> {
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path)
        .map_err(|e| PlanError::file_error("create temp file", tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .write_all(bytes)
        .map_err(|e| PlanError::file_error("write temp file", tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .sync_all()
        .map_err(|e| PlanError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string()))?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        PlanError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

/// Check a file's `major.minor` version against what this build writes.
///
/// Major versions must match. A newer minor version than `expected` is
/// rejected since it may carry fields this build would drop.
pub fn validate_version(file_version: &str, expected: &str) -> PlanResult<()> {
    let parse = |v: &str| -> Vec<u32> { v.split('.').filter_map(|p| p.trim().parse().ok()).collect() };
    let file_parts = parse(file_version);
    let current_parts = parse(expected);

    let mismatch = || PlanError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: expected.to_string(),
    };

    let (Some(file_major), Some(current_major)) = (file_parts.first(), current_parts.first()) else {
        return Err(mismatch());
    };
    if file_major != current_major {
        return Err(mismatch());
    }

    let file_minor = file_parts.get(1).copied().unwrap_or(0);
    let current_minor = current_parts.get(1).copied().unwrap_or(0);
    if file_minor > current_minor {
        return Err(mismatch());
    }

    Ok(())
}
