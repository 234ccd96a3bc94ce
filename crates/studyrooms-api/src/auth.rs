// Authentication endpoints
//
// Login and registration are the only unauthenticated calls. A successful
// login installs the returned bearer token on the client; logout is purely
// local since the backend keeps no session state for JWTs.

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::client::{StudyRoomsClient, decode};
use crate::error::{Error, ErrorBody, status_text};
use crate::models::{LoginRequest, LoginResponse, Registration};

/// Message shown when the login endpoint rejects the request without a
/// usable JSON error body.
pub const LOGIN_FAILED: &str = "Login failed. Check your credentials.";

impl StudyRoomsClient {
    /// Authenticate with username/password.
    ///
    /// `POST /api/auth/login` with `{"username", "password"}`. On success the
    /// token is stored on the client and also returned so callers can
    /// persist it.
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<SecretString, Error> {
        let url = self.url("api/auth/login")?;
        debug!(username, "logging in at {url}");

        let resp = self
            .http()
            .post(url)
            .json(&LoginRequest {
                username,
                password: password.expose_secret(),
            })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let raw = resp.text().await.unwrap_or_default();
            let message = ErrorBody::describe(
                ErrorBody::parse(&raw).as_ref(),
                LOGIN_FAILED,
                &status_text(status),
            );
            return Err(Error::Authentication { message });
        }

        let body: LoginResponse = decode(resp).await?;
        let token = body
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::Authentication {
                message: "login response did not include a token".into(),
            })?;

        let token = SecretString::from(token);
        self.set_token(token.clone());
        debug!("login successful");
        Ok(token)
    }

    /// End the current session. Only the local token is dropped.
    pub fn logout(&self) {
        debug!("logging out");
        self.clear_token();
    }

    /// Register a new student account.
    ///
    /// `POST /api/auth/register`; the backend answers with the created
    /// username as plain text.
    pub async fn register(&self, registration: &Registration) -> Result<String, Error> {
        let url = self.url("api/auth/register")?;
        debug!(username = %registration.username, "registering at {url}");

        let resp = self.http().post(url).json(registration).send().await?;

        let status = resp.status();
        let raw = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            let message =
                ErrorBody::describe(ErrorBody::parse(&raw).as_ref(), &raw, &status_text(status));
            return Err(Error::Authentication { message });
        }

        // Plain-text body; tolerate a JSON string too.
        let username = serde_json::from_str::<String>(&raw).unwrap_or(raw);
        Ok(username.trim().to_owned())
    }
}
