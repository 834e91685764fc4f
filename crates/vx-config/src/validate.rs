//! Configuration validation errors and semantic validation.

use thiserror::Error;
use vx_common::{AccentColor, PlayerConfig};
use vx_math::RetentionCurve;

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted content delay: one day.
pub const MAX_CONTENT_DELAY_SECONDS: u32 = 86_400;

/// Longest accepted display name, in characters.
pub const MAX_DISPLAY_NAME_CHARS: usize = 120;

/// Configuration validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Schema validation failed: {0}")]
    SchemaError(String),

    #[error("Semantic validation failed: {0}")]
    SemanticError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },
}

impl ValidationError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::IoError(_) => 60,
            ValidationError::ParseError(_) => 61,
            ValidationError::SchemaError(_) => 62,
            ValidationError::SemanticError(_) => 63,
            ValidationError::MissingField(_) => 64,
            ValidationError::InvalidValue { .. } => 65,
            ValidationError::VersionMismatch { .. } => 66,
        }
    }

    /// The offending field, when the error points at one.
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::MissingField(field) => Some(field),
            ValidationError::InvalidValue { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Classify a serde_json failure: malformed JSON vs. wrong shape.
    pub fn from_json(err: serde_json::Error) -> Self {
        use serde_json::error::Category;
        match err.classify() {
            Category::Data => ValidationError::SchemaError(err.to_string()),
            Category::Io => ValidationError::IoError(err.to_string()),
            Category::Syntax | Category::Eof => ValidationError::ParseError(err.to_string()),
        }
    }
}

impl From<ValidationError> for vx_common::Error {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::IoError(msg) => vx_common::Error::Config(msg),
            ValidationError::VersionMismatch { .. } => {
                vx_common::Error::InvalidSettings(err.to_string())
            }
            ValidationError::MissingField(field) => vx_common::Error::Validation {
                field,
                message: "must not be empty".to_string(),
            },
            ValidationError::InvalidValue { field, message } => {
                vx_common::Error::Validation { field, message }
            }
            other => vx_common::Error::InvalidPlayerConfig(other.to_string()),
        }
    }
}

/// Validate a player configuration, stopping at the first problem.
///
/// The embed generator degrades gracefully on bad input; this is the strict
/// gate callers run before persisting or exporting.
pub fn validate_player_config(config: &PlayerConfig) -> ValidationResult<()> {
    match collect_issues(config).into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Every problem in a player configuration, in field order.
pub fn collect_issues(config: &PlayerConfig) -> Vec<ValidationError> {
    let mut issues = Vec::new();

    if let Err(e) = validate_display_name(&config.display_name) {
        issues.push(e);
    }
    if let Err(e) = validate_video_source(&config.video_source) {
        issues.push(e);
    }
    if let Err(e) = validate_accent_color(&config.accent_color) {
        issues.push(e);
    }
    if let Err(e) = validate_exponent(config.retention_curve_exponent) {
        issues.push(e);
    }
    if let Some(seconds) = config.content_delay() {
        if seconds > MAX_CONTENT_DELAY_SECONDS {
            issues.push(ValidationError::InvalidValue {
                field: "contentDelaySeconds".to_string(),
                message: format!(
                    "Must be at most {} when the delay is enabled, got {}",
                    MAX_CONTENT_DELAY_SECONDS, seconds
                ),
            });
        }
    }

    issues
}

fn validate_display_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::MissingField("displayName".to_string()));
    }
    let len = name.chars().count();
    if len > MAX_DISPLAY_NAME_CHARS {
        return Err(ValidationError::InvalidValue {
            field: "displayName".to_string(),
            message: format!(
                "Must be at most {} characters, got {}",
                MAX_DISPLAY_NAME_CHARS, len
            ),
        });
    }
    Ok(())
}

fn validate_video_source(source: &str) -> ValidationResult<()> {
    let source = source.trim();
    if source.is_empty() {
        return Err(ValidationError::MissingField("videoSource".to_string()));
    }
    let url = url::Url::parse(source).map_err(|e| ValidationError::InvalidValue {
        field: "videoSource".to_string(),
        message: format!("Not a valid URL ({})", e),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ValidationError::InvalidValue {
            field: "videoSource".to_string(),
            message: format!("Unsupported scheme '{}', expected http or https", url.scheme()),
        });
    }
    Ok(())
}

fn validate_accent_color(color: &str) -> ValidationResult<()> {
    if AccentColor::parse(color).is_none() {
        return Err(ValidationError::InvalidValue {
            field: "accentColor".to_string(),
            message: format!("Expected #RGB or #RRGGBB, got {:?}", color),
        });
    }
    Ok(())
}

fn validate_exponent(exponent: f64) -> ValidationResult<()> {
    RetentionCurve::try_from(exponent)
        .map(|_| ())
        .map_err(|message| ValidationError::InvalidValue {
            field: "retentionCurveExponent".to_string(),
            message,
        })
}
