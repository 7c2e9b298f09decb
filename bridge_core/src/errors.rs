//! # Error Types
//!
//! Structured error types for bridge_core. Every failure carries enough
//! context to locate the bad input (field name, file, line number) instead
//! of bubbling up a bare string.
//!
//! ## Example
//!
//! ```rust
//! use bridge_core::errors::{BridgeError, BridgeResult};
//!
//! fn validate_width(width_mm: f64) -> BridgeResult<()> {
//!     if width_mm < 0.0 {
//!         return Err(BridgeError::invalid_input(
//!             "width_mm",
//!             width_mm.to_string(),
//!             "Width must be non-negative",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for bridge_core operations
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Structured error type for analysis operations.
///
/// Each variant provides specific context about what went wrong, so the
/// CLI and GUI front-ends can show something better than a traceback.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum BridgeError {
    /// An input value is invalid (out of range, wrong sign, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A geometry file line could not be parsed
    #[error("Geometry parse error at {path}:{line}: {reason}")]
    GeometryParse {
        path: String,
        line: usize,
        reason: String,
    },

    /// Cross-section is degenerate (zero area, zero inertia, zero width)
    #[error("Degenerate section: {reason}")]
    DegenerateSection { reason: String },

    /// Calculation failed (no members of a class, empty envelope, etc.)
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// File is locked by another user/process
    #[error("File locked: '{path}' is locked by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl BridgeError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        BridgeError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a GeometryParse error
    pub fn geometry_parse(
        path: impl Into<String>,
        line: usize,
        reason: impl Into<String>,
    ) -> Self {
        BridgeError::GeometryParse {
            path: path.into(),
            line,
            reason: reason.into(),
        }
    }

    /// Create a DegenerateSection error
    pub fn degenerate_section(reason: impl Into<String>) -> Self {
        BridgeError::DegenerateSection {
            reason: reason.into(),
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(
        calculation_type: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        BridgeError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        BridgeError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(
        path: impl Into<String>,
        locked_by: impl Into<String>,
        locked_at: impl Into<String>,
    ) -> Self {
        BridgeError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, BridgeError::FileLocked { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            BridgeError::InvalidInput { .. } => "INVALID_INPUT",
            BridgeError::GeometryParse { .. } => "GEOMETRY_PARSE",
            BridgeError::DegenerateSection { .. } => "DEGENERATE_SECTION",
            BridgeError::CalculationFailed { .. } => "CALCULATION_FAILED",
            BridgeError::FileError { .. } => "FILE_ERROR",
            BridgeError::FileLocked { .. } => "FILE_LOCKED",
            BridgeError::SerializationError { .. } => "SERIALIZATION_ERROR",
            BridgeError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = BridgeError::invalid_input("width_mm", "-5.0", "Width must be non-negative");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: BridgeError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            BridgeError::degenerate_section("zero area").error_code(),
            "DEGENERATE_SECTION"
        );
        assert_eq!(
            BridgeError::geometry_parse("section.txt", 3, "expected '('").error_code(),
            "GEOMETRY_PARSE"
        );
    }

    #[test]
    fn test_parse_error_display() {
        let error = BridgeError::geometry_parse("design6_middle.txt", 2, "unbalanced brackets");
        let message = error.to_string();
        assert!(message.contains("design6_middle.txt:2"));
        assert!(message.contains("unbalanced brackets"));
    }
}
