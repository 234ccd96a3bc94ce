use std::fmt::Write;

use serde::Deserialize;
use thiserror::Error;

/// Top-level error type for the `studyrooms-api` crate.
///
/// Every variant renders as a single human-readable line. Backend error
/// bodies are folded into that line by [`ErrorBody::describe`], so callers
/// can show `err.to_string()` directly.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login or registration was rejected by the backend.
    #[error("{message}")]
    Authentication { message: String },

    /// The backend answered 401 on an authenticated call. The client has
    /// already dropped its token when this is returned.
    #[error("{message}")]
    SessionExpired { message: String },

    /// An authenticated call was attempted without a token.
    #[error("Please authenticate first to obtain a JWT.")]
    NotAuthenticated,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── API ─────────────────────────────────────────────────────────
    /// Non-2xx response with the formatted error message.
    #[error("{message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error means the session is gone and the
    /// user has to log in again.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::SessionExpired { .. } | Self::NotAuthenticated)
    }

    /// HTTP status of the failed response, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::SessionExpired { .. } => Some(401),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if the backend refused the call for lack of a role.
    pub fn is_forbidden(&self) -> bool {
        self.status() == Some(403)
    }
}

// ── Error body ──────────────────────────────────────────────────────

/// JSON error body returned by the backend.
///
/// Validation failures carry `{"message": "...", "errors": {field: msg}}`;
/// business-rule failures carry only `message`. Some framework errors use
/// `error` instead of `message`.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub errors: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Parse a raw response body. Non-JSON bodies yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    /// Build the user-facing message for a failed call.
    ///
    /// Picks the first non-empty of `message`, `error`, `fallback` and
    /// `status_text`, then appends `(field: msg; field: msg)` when the body
    /// carries a non-empty `errors` object.
    pub fn describe(body: Option<&Self>, fallback: &str, status_text: &str) -> String {
        let mut message = non_empty(body.and_then(|b| b.message.as_deref()))
            .or_else(|| non_empty(body.and_then(|b| b.error.as_deref())))
            .or_else(|| non_empty(Some(fallback)))
            .unwrap_or(status_text)
            .to_owned();

        if let Some(serde_json::Value::Object(fields)) = body.and_then(|b| b.errors.as_ref()) {
            let detailed = fields
                .iter()
                .map(|(field, msg)| match msg {
                    serde_json::Value::String(s) => format!("{field}: {s}"),
                    other => format!("{field}: {other}"),
                })
                .collect::<Vec<_>>()
                .join("; ");
            if !detailed.is_empty() {
                let _ = write!(message, " ({detailed})");
            }
        }

        message
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

/// Human-readable status text (`"Unauthorized"`), falling back to the code.
pub(crate) fn status_text(status: reqwest::StatusCode) -> String {
    status
        .canonical_reason()
        .map_or_else(|| status.as_str().to_owned(), str::to_owned)
}
