//! Error types for embed generation.

use thiserror::Error;

/// Result type for embed operations.
pub type Result<T> = std::result::Result<T, EmbedError>;

/// Errors that can occur while rendering an embed artifact.
///
/// Player configuration content never causes one of these; malformed values
/// degrade to defaults instead.
#[derive(Error, Debug)]
pub enum EmbedError {
    /// Template rendering error.
    #[error("template error: {0}")]
    TemplateError(String),

    /// Minifier produced output that is not UTF-8.
    #[error("minification failed: {0}")]
    MinifyError(String),
}

impl From<askama::Error> for EmbedError {
    fn from(err: askama::Error) -> Self {
        EmbedError::TemplateError(err.to_string())
    }
}

impl From<EmbedError> for vx_common::Error {
    fn from(err: EmbedError) -> Self {
        vx_common::Error::Render(err.to_string())
    }
}
