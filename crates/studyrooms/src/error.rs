//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text and a process exit code.

use miette::Diagnostic;
use thiserror::Error;

use studyrooms_config::ConfigError;
use studyrooms_core::CoreError;

/// Process exit codes (0 on success).
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to server at {url}")]
    #[diagnostic(
        code(studyrooms::connection_failed),
        help(
            "Check that the server is running and reachable.\n\
             For a self-signed development server try --insecure (-k)."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(studyrooms::timeout),
        help("Increase timeout with --timeout or check server responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(studyrooms::auth_failed),
        help("Check your username and password, or store a new one with: studyrooms config set-password")
    )]
    AuthFailed { message: String },

    #[error("Session expired: {message}")]
    #[diagnostic(
        code(studyrooms::session_expired),
        help("The stored token was removed. Run: studyrooms login")
    )]
    SessionExpired { message: String },

    #[error("Please authenticate first to obtain a JWT.")]
    #[diagnostic(
        code(studyrooms::not_signed_in),
        help(
            "Run: studyrooms login\n\
             Or configure a username and password for automatic sign-in."
        )
    )]
    NotSignedIn,

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(studyrooms::no_credentials),
        help("Store a password with: studyrooms config set-password, or set STUDYROOMS_PASSWORD.")
    )]
    NoCredentials { profile: String },

    #[error("Permission denied: {message}")]
    #[diagnostic(
        code(studyrooms::permission_denied),
        help("This command needs a staff account.")
    )]
    PermissionDenied { message: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(studyrooms::not_found),
        help("Run: studyrooms {list_command} to see what exists")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────
    /// Refused by a server-side rule; the message says why.
    #[error("{message}")]
    #[diagnostic(code(studyrooms::rejected))]
    Rejected { message: String },

    #[error("{message}")]
    #[diagnostic(code(studyrooms::api_error))]
    ApiError { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(studyrooms::validation))]
    Validation { field: String, reason: String },

    /// Input rejected before any request was sent.
    #[error("{message}")]
    #[diagnostic(code(studyrooms::invalid_request))]
    InvalidRequest { message: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(studyrooms::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: studyrooms config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No server configured")]
    #[diagnostic(
        code(studyrooms::no_config),
        help(
            "Create a profile with: studyrooms config init\n\
             Or pass --server / set STUDYROOMS_SERVER.\n\
             Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(studyrooms::config))]
    Config { message: String },

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(studyrooms::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(studyrooms::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. }
            | Self::SessionExpired { .. }
            | Self::NotSignedIn
            | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::PermissionDenied { .. } => exit_code::PERMISSION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Validation { .. }
            | Self::InvalidRequest { .. }
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed {
                url,
                source: reason.into(),
            },
            CoreError::Timeout => Self::Timeout,
            CoreError::AuthenticationFailed { message } => Self::AuthFailed { message },
            CoreError::SessionExpired { message } => Self::SessionExpired { message },
            CoreError::NotSignedIn => Self::NotSignedIn,
            CoreError::Forbidden { message } => Self::PermissionDenied { message },
            CoreError::SpaceNotFound { identifier } => Self::NotFound {
                resource_type: "Study space".into(),
                identifier,
                list_command: "spaces list".into(),
            },
            CoreError::NotFound { message } => Self::NotFound {
                resource_type: "Resource".into(),
                identifier: message,
                list_command: "reservations list".into(),
            },
            CoreError::ValidationFailed { message } => Self::InvalidRequest { message },
            CoreError::Rejected { message, .. } => Self::Rejected { message },
            CoreError::Api { message, .. } | CoreError::Internal(message) => {
                Self::ApiError { message }
            }
            CoreError::Config { message } => Self::Config { message },
            CoreError::Storage(e) => Self::Io(e),
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::Io(e) => Self::Io(e),
            other => Self::Config {
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_error_kind() {
        assert_eq!(CliError::from(CoreError::NotSignedIn).exit_code(), exit_code::AUTH);
        assert_eq!(CliError::from(CoreError::Timeout).exit_code(), exit_code::TIMEOUT);
        assert_eq!(
            CliError::from(CoreError::Forbidden {
                message: "Forbidden".into()
            })
            .exit_code(),
            exit_code::PERMISSION
        );
        assert_eq!(
            CliError::from(CoreError::ValidationFailed {
                message: "Select a space and a date range.".into()
            })
            .exit_code(),
            exit_code::USAGE
        );
        assert_eq!(
            CliError::from(CoreError::Rejected {
                status: 400,
                message: "full".into()
            })
            .exit_code(),
            exit_code::GENERAL
        );
    }

    #[test]
    fn validation_message_is_shown_verbatim() {
        let err = CliError::from(CoreError::ValidationFailed {
            message: "Select a space and a date range.".into(),
        });
        assert_eq!(err.to_string(), "Select a space and a date range.");
    }
}
