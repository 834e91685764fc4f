//! Exit codes for the `vortex` CLI.
//!
//! Exit codes communicate the outcome without requiring output parsing.
//!
//! Exit code ranges:
//! - 0-9: Success/operational outcomes
//! - 10-19: User/environment errors (recoverable by user action)
//! - 20-29: Internal and I/O errors

use vx_common::{Error, ErrorCategory};

/// Exit codes for `vortex` operations.
///
/// These codes are a stable contract for automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    // ========================================================================
    // Success / Operational Outcomes (0-9)
    // ========================================================================
    /// Success
    Clean = 0,

    /// The command ran but found problems (`validate`)
    IssuesFound = 1,

    // ========================================================================
    // User / Environment Errors (10-19)
    // ========================================================================
    /// Invalid arguments, settings or player configuration
    ArgsError = 10,

    /// Project owned by someone else, or no usable identity
    PermissionError = 12,

    /// Project not found
    NotFoundError = 15,

    // ========================================================================
    // Internal Errors (20-29)
    // ========================================================================
    /// Internal error (bug - please report)
    InternalError = 20,

    /// I/O or store error
    IoError = 21,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn is_success(self) -> bool {
        self == ExitCode::Clean
    }

    /// Codes 0-9: not errors, they describe what the command found.
    pub fn is_operational(self) -> bool {
        (self as i32) < 10
    }

    /// Codes 10-19: resolvable by the user.
    pub fn is_user_error(self) -> bool {
        (10..20).contains(&(self as i32))
    }

    /// Codes 20-29: bugs or environment failures.
    pub fn is_internal_error(self) -> bool {
        (self as i32) >= 20
    }

    /// Get the error code name as a string constant (for JSON output).
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Clean => "OK_CLEAN",
            ExitCode::IssuesFound => "OK_ISSUES",
            ExitCode::ArgsError => "ERR_ARGS",
            ExitCode::PermissionError => "ERR_PERMISSION",
            ExitCode::NotFoundError => "ERR_NOT_FOUND",
            ExitCode::InternalError => "ERR_INTERNAL",
            ExitCode::IoError => "ERR_IO",
        }
    }

    /// Exit code for a failed command.
    pub fn from_error(err: &Error) -> Self {
        match err {
            Error::ProjectNotFound { .. } => ExitCode::NotFoundError,
            Error::StoreUnavailable(_) | Error::StoreCorrupted(_) => ExitCode::IoError,
            _ => match err.category() {
                ErrorCategory::Config | ErrorCategory::Validation => ExitCode::ArgsError,
                ErrorCategory::Auth => ExitCode::PermissionError,
                ErrorCategory::Render => ExitCode::InternalError,
                ErrorCategory::Store | ErrorCategory::Io => ExitCode::IoError,
            },
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        ExitCode::from_error(err)
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code_name(), self.as_i32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges() {
        assert!(ExitCode::Clean.is_success());
        assert!(ExitCode::IssuesFound.is_operational());
        assert!(!ExitCode::IssuesFound.is_success());
        assert!(ExitCode::ArgsError.is_user_error());
        assert!(ExitCode::NotFoundError.is_user_error());
        assert!(ExitCode::IoError.is_internal_error());
        assert!(!ExitCode::PermissionError.is_internal_error());
    }

    #[test]
    fn test_error_mapping() {
        let cases = [
            (Error::Config("x".into()), ExitCode::ArgsError),
            (Error::InvalidSettings("x".into()), ExitCode::ArgsError),
            (
                Error::Validation {
                    field: "videoSource".into(),
                    message: "bad".into(),
                },
                ExitCode::ArgsError,
            ),
            (
                Error::ProjectNotFound {
                    project_id: "p".into(),
                },
                ExitCode::NotFoundError,
            ),
            (
                Error::Forbidden {
                    project_id: "p".into(),
                    owner: "o".into(),
                },
                ExitCode::PermissionError,
            ),
            (Error::Unauthorized("x".into()), ExitCode::PermissionError),
            (Error::StoreUnavailable("x".into()), ExitCode::IoError),
            (Error::Render("x".into()), ExitCode::InternalError),
        ];
        for (err, expected) in cases {
            assert_eq!(ExitCode::from(&err), expected, "{}", err);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(ExitCode::NotFoundError.to_string(), "ERR_NOT_FOUND (15)");
        assert_eq!(i32::from(ExitCode::PermissionError), 12);
    }
}
