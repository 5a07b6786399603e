//! Error types for test-case generation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable, machine-readable error codes.
///
/// Serialized as `snake_case`; the CLI prints them in its JSON error output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ErrorCode {
    /// JSON (de)serialization error.
    JsonParseError,
    /// No generator is registered for the schema kind.
    NoGenerator,
    /// A generator was handed a node of another kind.
    KindMismatch,
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("JSON (de)serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("No generator registered for schema kind `{kind}` at {path}")]
    NoGenerator { kind: String, path: String },

    #[error("Generator for `{expected}` received a `{found}` schema at {path}")]
    KindMismatch {
        expected: &'static str,
        found: String,
        path: String,
    },
}

impl GenerateError {
    /// Returns the stable error code for this error variant.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            GenerateError::JsonError(_) => ErrorCode::JsonParseError,
            GenerateError::NoGenerator { .. } => ErrorCode::NoGenerator,
            GenerateError::KindMismatch { .. } => ErrorCode::KindMismatch,
        }
    }

    /// Returns the field path context, if available.
    pub fn path(&self) -> Option<&str> {
        match self {
            GenerateError::JsonError(_) => None,
            GenerateError::NoGenerator { path, .. } => Some(path),
            GenerateError::KindMismatch { path, .. } => Some(path),
        }
    }

    /// Structured JSON form: `{"code": "...", "message": "...", "path": "..." | null}`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "code": self.error_code(),
            "message": self.to_string(),
            "path": self.path(),
        })
    }
}
