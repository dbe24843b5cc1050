//! Structured error types for the JSON API.
//!
//! Errors serialize to `{"code": ..., "message": ..., "details": ...}` so
//! bindings can branch on `code` without parsing messages.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Error codes for swatch operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Input was not valid JSON, or did not match the expected shape.
    InvalidJson,
    /// Settings were present but out of range.
    InvalidSettings,
    /// An operation was invoked on input it does not accept.
    PreconditionFailed,
    /// Unknown operation mode.
    UnknownMode,
    /// Internal error (unexpected state).
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::InvalidJson => write!(f, "invalid_json"),
            ErrorCode::InvalidSettings => write!(f, "invalid_settings"),
            ErrorCode::PreconditionFailed => write!(f, "precondition_failed"),
            ErrorCode::UnknownMode => write!(f, "unknown_mode"),
            ErrorCode::InternalError => write!(f, "internal_error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwatchError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl SwatchError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(
        code: ErrorCode,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            details: Some(details.into()),
        }
    }

    pub fn invalid_json(err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::InvalidJson, format!("Invalid JSON: {}", err))
    }

    /// A present field whose value has the wrong shape.
    pub fn invalid_field(field: &str, expected: &str) -> Self {
        Self::with_details(
            ErrorCode::InvalidJson,
            format!("Invalid value for `{}`", field),
            format!("expected {}", expected),
        )
    }

    pub fn invalid_settings(err: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::InvalidSettings,
            format!("Invalid settings: {}", err),
        )
    }

    pub fn precondition_failed(err: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::PreconditionFailed,
            format!("Precondition failed: {}", err),
        )
    }

    pub fn unknown_mode(mode: &str) -> Self {
        Self::new(ErrorCode::UnknownMode, format!("Unknown mode: {}", mode))
    }

    pub fn internal(err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::InternalError, format!("Internal error: {}", err))
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(
                r#"{{"code":"{}","message":"{}"}}"#,
                self.code,
                escape(&self.message)
            )
        })
    }
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

impl fmt::Display for SwatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(details) = &self.details {
            write!(f, "[{}] {}: {}", self.code, self.message, details)
        } else {
            write!(f, "[{}] {}", self.code, self.message)
        }
    }
}

impl std::error::Error for SwatchError {}

impl From<anyhow::Error> for SwatchError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal(format!("{err:#}"))
    }
}

impl From<serde_json::Error> for SwatchError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_json(err)
    }
}

/// Flat JSON error response: `{"error": true, "code": ..., "message": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `true` for error responses.
    pub error: bool,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl From<SwatchError> for ErrorResponse {
    fn from(err: SwatchError) -> Self {
        Self {
            error: true,
            code: err.code.to_string(),
            message: err.message,
            details: err.details,
        }
    }
}

impl ErrorResponse {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(
                r#"{{"error":true,"code":"{}","message":"{}"}}"#,
                self.code,
                escape(&self.message)
            )
        })
    }
}

/// The `run_json` envelope.
///
/// - Success: `{"ok": true, "data": ...}`
/// - Error: `{"ok": false, "error": {"code": ..., "message": ...}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<SwatchError>,
}

impl ResponseEnvelope {
    pub fn success(data: Value) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(err: &SwatchError) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(err.clone()),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| match &self.error {
            Some(err) => format!(r#"{{"ok":false,"error":{}}}"#, err.to_json()),
            None => r#"{"ok":false,"error":{"code":"internal_error","message":"Internal error: response serialization failed"}}"#.to_string(),
        })
    }
}
