// ── Core error types ──
//
// User-facing errors from studyrooms-core. Each variant renders as the one
// line shown for a failed action. `From<studyrooms_api::Error>` folds HTTP
// statuses into domain variants so the CLI can pick exit codes without
// looking at status codes itself.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to server at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request to the server timed out")]
    Timeout,

    // ── Session errors ───────────────────────────────────────────────
    /// Login or registration rejected.
    #[error("{message}")]
    AuthenticationFailed { message: String },

    /// The server answered 401; the stored token is already gone.
    #[error("Session expired: {message}")]
    SessionExpired { message: String },

    /// No token in memory or in the store.
    #[error("Please authenticate first to obtain a JWT.")]
    NotSignedIn,

    /// The signed-in account lacks the staff role.
    #[error("Permission denied: {message}")]
    Forbidden { message: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Study space not found: {identifier}")]
    SpaceNotFound { identifier: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    // ── Operation errors ─────────────────────────────────────────────
    /// Rejected before any request was sent.
    #[error("{message}")]
    ValidationFailed { message: String },

    /// Rejected by a server-side business rule (capacity, hours, ...).
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("{message}")]
    Api { message: String, status: Option<u16> },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Session storage error: {0}")]
    Storage(#[from] std::io::Error),

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Whether the user has to log in (again) before retrying.
    pub fn needs_login(&self) -> bool {
        matches!(self, Self::SessionExpired { .. } | Self::NotSignedIn)
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<studyrooms_api::Error> for CoreError {
    fn from(err: studyrooms_api::Error) -> Self {
        use studyrooms_api::Error as ApiError;

        match err {
            ApiError::Authentication { message } => Self::AuthenticationFailed { message },
            ApiError::SessionExpired { message } => Self::SessionExpired { message },
            ApiError::NotAuthenticated => Self::NotSignedIn,
            ApiError::Transport(ref e) => {
                if e.is_timeout() {
                    Self::Timeout
                } else if e.is_connect() {
                    Self::ConnectionFailed {
                        url: e.url().map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    Self::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            ApiError::InvalidUrl(e) => Self::Config {
                message: format!("Invalid URL: {e}"),
            },
            ApiError::Tls(reason) => Self::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {reason}"),
            },
            ApiError::Api { status, message } => match status {
                403 => Self::Forbidden { message },
                404 => Self::NotFound { message },
                400 | 409 | 422 => Self::Rejected { status, message },
                _ => Self::Api {
                    message,
                    status: Some(status),
                },
            },
            ApiError::Deserialization { message, body: _ } => {
                Self::Internal(format!("Unexpected response from server: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_map_to_domain_variants() {
        let forbidden: CoreError = studyrooms_api::Error::Api {
            status: 403,
            message: "Forbidden".into(),
        }
        .into();
        assert!(matches!(forbidden, CoreError::Forbidden { .. }));

        let rejected: CoreError = studyrooms_api::Error::Api {
            status: 400,
            message: "Space is closed at that time".into(),
        }
        .into();
        assert_eq!(rejected.to_string(), "Space is closed at that time");

        let server: CoreError = studyrooms_api::Error::Api {
            status: 500,
            message: "Internal Server Error".into(),
        }
        .into();
        assert!(matches!(server, CoreError::Api { status: Some(500), .. }));
    }

    #[test]
    fn missing_token_needs_login() {
        let err: CoreError = studyrooms_api::Error::NotAuthenticated.into();
        assert!(err.needs_login());
        assert_eq!(err.to_string(), "Please authenticate first to obtain a JWT.");
    }
}
