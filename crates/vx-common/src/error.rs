//! Error types for Vortex VSL.
//!
//! This module provides structured error handling with:
//! - Stable error codes for machine parsing
//! - Category classification for error grouping
//! - Transient vs permanent classification for persistence failures
//! - Remediation suggestions for humans
//!
//! # Human-Facing Output
//!
//! ```text
//! ✗ Project Not Found
//!   Reason: project not found: vsl-20260115-143022-a7xq
//!   Fix: List your projects with 'vortex project list'.
//! ```
//!
//! # Agent-Facing Output
//!
//! ```json
//! {
//!   "code": 30,
//!   "category": "store",
//!   "message": "project not found: vsl-20260115-143022-a7xq",
//!   "recoverable": false,
//!   "transient": false
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Result type alias for Vortex VSL operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Settings file and path resolution errors.
    Config,
    /// Player configuration validation errors.
    Validation,
    /// Project store errors.
    Store,
    /// Ownership and session errors.
    Auth,
    /// Embed rendering errors.
    Render,
    /// File I/O and serialization errors.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Validation => write!(f, "validation"),
            ErrorCategory::Store => write!(f, "store"),
            ErrorCategory::Auth => write!(f, "auth"),
            ErrorCategory::Render => write!(f, "render"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Unified error type for Vortex VSL.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid settings file: {0}")]
    InvalidSettings(String),

    // Validation errors (20-29)
    #[error("invalid value for {field}: {message}")]
    Validation { field: String, message: String },

    #[error("invalid player configuration: {0}")]
    InvalidPlayerConfig(String),

    // Store errors (30-39)
    #[error("project not found: {project_id}")]
    ProjectNotFound { project_id: String },

    #[error("project store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("project record corrupted: {0}")]
    StoreCorrupted(String),

    // Auth errors (40-49)
    #[error("project {project_id} is not owned by {owner}")]
    Forbidden { project_id: String, owner: String },

    #[error("not authenticated: {0}")]
    Unauthorized(String),

    // Render errors (50-59)
    #[error("embed rendering failed: {0}")]
    Render(String),

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    ///
    /// Error codes are stable and grouped by category:
    /// - 10-19: Configuration errors
    /// - 20-29: Validation errors
    /// - 30-39: Store errors
    /// - 40-49: Auth errors
    /// - 50-59: Render errors
    /// - 60-69: I/O errors
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::InvalidSettings(_) => 11,
            Error::Validation { .. } => 20,
            Error::InvalidPlayerConfig(_) => 21,
            Error::ProjectNotFound { .. } => 30,
            Error::StoreUnavailable(_) => 31,
            Error::StoreCorrupted(_) => 32,
            Error::Forbidden { .. } => 40,
            Error::Unauthorized(_) => 41,
            Error::Render(_) => 50,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Config(_) | Error::InvalidSettings(_) => ErrorCategory::Config,
            Error::Validation { .. } | Error::InvalidPlayerConfig(_) => ErrorCategory::Validation,
            Error::ProjectNotFound { .. } | Error::StoreUnavailable(_) | Error::StoreCorrupted(_) => {
                ErrorCategory::Store
            }
            Error::Forbidden { .. } | Error::Unauthorized(_) => ErrorCategory::Auth,
            Error::Render(_) => ErrorCategory::Render,
            Error::Io(_) | Error::Json(_) => ErrorCategory::Io,
        }
    }

    /// Returns whether this error can be resolved by user action.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::Config(_) => true,
            Error::InvalidSettings(_) => true,
            Error::Validation { .. } => true,
            Error::InvalidPlayerConfig(_) => true,
            Error::ProjectNotFound { .. } => false, // Record is gone
            Error::StoreUnavailable(_) => true,
            Error::StoreCorrupted(_) => false,
            Error::Forbidden { .. } => false, // Ownership is intentional
            Error::Unauthorized(_) => true,   // Re-authenticate
            Error::Render(_) => false,
            Error::Io(_) => true,
            Error::Json(_) => true,
        }
    }

    /// Returns whether repeating the same request later may succeed unchanged.
    ///
    /// Nothing in this workspace retries automatically; this only shapes the
    /// message shown to the user.
    pub fn is_transient(&self) -> bool {
        match self {
            Error::StoreUnavailable(_) => true,
            Error::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::Interrupted
                    | std::io::ErrorKind::WouldBlock
                    | std::io::ErrorKind::TimedOut
            ),
            _ => false,
        }
    }

    /// Returns a human-readable remediation hint.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::Config(_) => "Run 'vortex config show' to see which settings file is in use.",
            Error::InvalidSettings(_) => {
                "Fix the JSON in settings.json, or remove it to fall back to built-in defaults."
            }
            Error::Validation { .. } | Error::InvalidPlayerConfig(_) => {
                "Run 'vortex validate --config <file>' to list every problem in the configuration."
            }
            Error::ProjectNotFound { .. } => "List your projects with 'vortex project list'.",
            Error::StoreUnavailable(_) => {
                "The project store could not be reached. Check the data directory and try again."
            }
            Error::StoreCorrupted(_) => {
                "The stored record is unreadable. Delete it with 'vortex project delete <id>'."
            }
            Error::Forbidden { .. } => {
                "This project belongs to another owner. Pass the right '--owner' or create a copy."
            }
            Error::Unauthorized(_) => "Sign in again (set VORTEX_OWNER or pass '--owner').",
            Error::Render(_) => "Internal rendering error. Please report it with the configuration used.",
            Error::Io(_) => "Check disk space and permissions on the data directory, then retry.",
            Error::Json(_) => "Invalid JSON. Check the syntax with 'jq . <file>'.",
        }
    }

    /// Returns a short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::Config(_) => "Configuration Error",
            Error::InvalidSettings(_) => "Invalid Settings File",
            Error::Validation { .. } => "Invalid Player Configuration",
            Error::InvalidPlayerConfig(_) => "Invalid Player Configuration",
            Error::ProjectNotFound { .. } => "Project Not Found",
            Error::StoreUnavailable(_) => "Project Store Unavailable",
            Error::StoreCorrupted(_) => "Corrupted Project Record",
            Error::Forbidden { .. } => "Permission Denied",
            Error::Unauthorized(_) => "Not Authenticated",
            Error::Render(_) => "Rendering Error",
            Error::Io(_) => "I/O Error",
            Error::Json(_) => "JSON Error",
        }
    }
}

/// Structured error representation for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Stable error code.
    pub code: u32,

    /// Error category for grouping.
    pub category: ErrorCategory,

    /// Human-readable error message.
    pub message: String,

    /// Whether the error is potentially recoverable.
    pub recoverable: bool,

    /// Whether the same request may succeed later unchanged.
    pub transient: bool,

    /// Additional structured context (e.g., project id, field).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, serde_json::Value>,
}

impl From<&Error> for StructuredError {
    fn from(err: &Error) -> Self {
        let mut context = HashMap::new();

        match err {
            Error::Validation { field, .. } => {
                context.insert("field".to_string(), serde_json::json!(field));
            }
            Error::ProjectNotFound { project_id } => {
                context.insert("project_id".to_string(), serde_json::json!(project_id));
            }
            Error::Forbidden { project_id, owner } => {
                context.insert("project_id".to_string(), serde_json::json!(project_id));
                context.insert("owner".to_string(), serde_json::json!(owner));
            }
            _ => {}
        }

        StructuredError {
            code: err.code(),
            category: err.category(),
            message: err.to_string(),
            recoverable: err.is_recoverable(),
            transient: err.is_transient(),
            context,
        }
    }
}

impl StructuredError {
    /// Add additional context to the error.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.context.insert(key.into(), v);
        }
        self
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"code":{},"error":"serialization_failed"}}"#, self.code)
        })
    }

    /// Serialize to pretty JSON string.
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| self.to_json())
    }
}

/// Format an error for a terminal: headline, reason and fix.
pub fn format_error_human(err: &Error, use_color: bool) -> String {
    let (red, bold, reset) = if use_color {
        ("\x1b[31m", "\x1b[1m", "\x1b[0m")
    } else {
        ("", "", "")
    };
    let mut out = format!("{red}✗{reset} {bold}{}{reset}\n", err.headline());
    out.push_str(&format!("  Reason: {}\n", err));
    if err.is_transient() {
        out.push_str("  Note: this looks temporary; repeating the command may succeed.\n");
    }
    out.push_str(&format!("  Fix: {}", err.remediation()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_grouped_by_category() {
        let cases = [
            (Error::Config("x".into()), ErrorCategory::Config),
            (
                Error::Validation {
                    field: "accentColor".into(),
                    message: "bad".into(),
                },
                ErrorCategory::Validation,
            ),
            (
                Error::ProjectNotFound {
                    project_id: "p".into(),
                },
                ErrorCategory::Store,
            ),
            (Error::Unauthorized("expired".into()), ErrorCategory::Auth),
            (Error::Render("x".into()), ErrorCategory::Render),
        ];
        for (err, category) in cases {
            assert_eq!(err.category(), category);
            let base = match category {
                ErrorCategory::Config => 10,
                ErrorCategory::Validation => 20,
                ErrorCategory::Store => 30,
                ErrorCategory::Auth => 40,
                ErrorCategory::Render => 50,
                ErrorCategory::Io => 60,
            };
            assert!((base..base + 10).contains(&err.code()), "{:?}", err);
        }
    }

    #[test]
    fn test_transient_classification() {
        assert!(Error::StoreUnavailable("offline".into()).is_transient());
        assert!(Error::Io(std::io::Error::from(std::io::ErrorKind::TimedOut)).is_transient());
        assert!(!Error::Io(std::io::Error::from(std::io::ErrorKind::PermissionDenied)).is_transient());
        assert!(!Error::ProjectNotFound {
            project_id: "p".into()
        }
        .is_transient());
    }

    #[test]
    fn test_structured_error_context() {
        let err = Error::Forbidden {
            project_id: "vsl-20260115-143022-a7xq".into(),
            owner: "bob".into(),
        };
        let structured = StructuredError::from(&err);
        assert_eq!(structured.code, 40);
        assert_eq!(structured.category, ErrorCategory::Auth);
        assert!(!structured.recoverable);
        assert_eq!(structured.context["owner"], serde_json::json!("bob"));

        let json = structured.to_json();
        assert!(json.contains("\"category\":\"auth\""));
    }

    #[test]
    fn test_format_error_human() {
        let err = Error::StoreUnavailable("connection reset".into());
        let text = format_error_human(&err, false);
        assert!(text.starts_with("✗ Project Store Unavailable"));
        assert!(text.contains("Reason: project store unavailable: connection reset"));
        assert!(text.contains("temporary"));
        assert!(text.contains("Fix: "));
    }
}
