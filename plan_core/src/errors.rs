//! # Error Types
//!
//! Structured error types for plan_core. Only the fallible edges of the
//! pipeline return these: parsing layouts and envelopes, file I/O, export
//! format names, and parameter scaling. Metrics and compliance evaluation
//! never fail; they degrade to low scores or an `error` status instead.
//!
//! ## Example
//!
//! ```rust
//! use plan_core::errors::{PlanError, PlanResult};
//!
//! fn validate_multiplier(multiplier: f64) -> PlanResult<()> {
//!     if multiplier <= 0.0 {
//!         return Err(PlanError::InvalidInput {
//!             field: "multiplier".to_string(),
//!             value: multiplier.to_string(),
//!             reason: "Multiplier must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for plan_core operations
pub type PlanResult<T> = Result<T, PlanError>;

/// Structured error type for pipeline operations.
///
/// Each variant provides specific context about what went wrong,
/// so callers can branch on the failure without parsing messages.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum PlanError {
    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Requested export format is not one of the supported encoders
    #[error("Unsupported export format: {format}")]
    UnsupportedFormat { format: String },

    /// Building-code dataset could not be loaded
    #[error("Building-code dataset error: {reason}")]
    RuleData { reason: String },

    /// An encoder failed to produce its artifact
    #[error("Export failed: {format} - {reason}")]
    ExportFailed { format: String, reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON/TOML serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Export envelope version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl PlanError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        PlanError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnsupportedFormat error
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        PlanError::UnsupportedFormat {
            format: format.into(),
        }
    }

    /// Create an ExportFailed error
    pub fn export_failed(format: impl Into<String>, reason: impl Into<String>) -> Self {
        PlanError::ExportFailed {
            format: format.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        PlanError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        PlanError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            PlanError::InvalidInput { .. } => "INVALID_INPUT",
            PlanError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            PlanError::RuleData { .. } => "RULE_DATA_ERROR",
            PlanError::ExportFailed { .. } => "EXPORT_FAILED",
            PlanError::FileError { .. } => "FILE_ERROR",
            PlanError::SerializationError { .. } => "SERIALIZATION_ERROR",
            PlanError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

impl From<serde_json::Error> for PlanError {
    fn from(e: serde_json::Error) -> Self {
        PlanError::serialization(e.to_string())
    }
}
