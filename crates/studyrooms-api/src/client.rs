// Study Rooms HTTP client
//
// Wraps `reqwest::Client` with base-URL joining, bearer-token injection and
// error-body formatting. Endpoint families (auth, spaces, reservations,
// staff, stats, weather) are inherent methods in sibling modules so this
// file stays focused on transport mechanics.

use std::sync::RwLock;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::error::{Error, ErrorBody, status_text};
use crate::transport::TransportConfig;

/// Async client for the Study Rooms REST API.
///
/// Holds at most one bearer token. Every authenticated call fails with
/// [`Error::NotAuthenticated`] before dispatch when no token is set, and a
/// 401 response on an authenticated call drops the token and returns
/// [`Error::SessionExpired`].
pub struct StudyRoomsClient {
    http: reqwest::Client,
    base_url: Url,
    token: RwLock<Option<SecretString>>,
}

impl StudyRoomsClient {
    /// Create a client for the server at `base_url` (e.g.
    /// `https://rooms.example.edu`). Any path on the base URL is kept as a
    /// prefix for every endpoint.
    pub fn new(base_url: &Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: &Url) -> Self {
        Self {
            http,
            base_url: normalize_base_url(base_url),
            token: RwLock::new(None),
        }
    }

    /// The underlying HTTP client (for unauthenticated flows).
    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // ── Token management ─────────────────────────────────────────────

    /// Install a bearer token (after login, or restored from storage).
    pub fn set_token(&self, token: SecretString) {
        debug!("storing bearer token");
        *self.token.write().expect("token lock poisoned") = Some(token);
    }

    /// Drop the bearer token.
    pub fn clear_token(&self) {
        *self.token.write().expect("token lock poisoned") = None;
    }

    pub fn has_token(&self) -> bool {
        self.token.read().expect("token lock poisoned").is_some()
    }

    /// A copy of the current token, if any.
    pub fn token(&self) -> Option<SecretString> {
        self.token.read().expect("token lock poisoned").clone()
    }

    /// Apply the bearer token to a request builder, or fail before dispatch.
    fn authorize(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder, Error> {
        let guard = self.token.read().expect("token lock poisoned");
        match guard.as_ref() {
            Some(token) => Ok(builder.bearer_auth(token.expose_secret())),
            None => Err(Error::NotAuthenticated),
        }
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join an endpoint path (e.g. `"api/spaces"`) onto the base URL.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.authorize(self.http.get(url))?.send().await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url} params={params:?}");

        let resp = self
            .authorize(self.http.get(url).query(params))?
            .send()
            .await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.authorize(self.http.post(url).json(body))?.send().await?;
        self.handle_response(resp).await
    }

    /// POST without a body, expecting no content back.
    pub(crate) async fn post_empty(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.authorize(self.http.post(url))?.send().await?;
        self.handle_empty(resp).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PUT {url}");

        let resp = self.authorize(self.http.put(url).json(body))?.send().await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let resp = self.authorize(self.http.delete(url))?.send().await?;
        self.handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            decode(resp).await
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn parse_error(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();
        let payload = ErrorBody::parse(&raw);
        let message = ErrorBody::describe(payload.as_ref(), &raw, &status_text(status));

        if status == reqwest::StatusCode::UNAUTHORIZED {
            warn!("server rejected the bearer token; dropping session");
            self.clear_token();
            return Error::SessionExpired { message };
        }

        Error::Api {
            status: status.as_u16(),
            message,
        }
    }
}

/// Read a successful response body as JSON.
pub(crate) async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body: body.clone(),
        }
    })
}

/// Ensure the base path ends with `/` so relative joins keep any prefix.
fn normalize_base_url(raw: &Url) -> Url {
    let mut url = raw.clone();
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> StudyRoomsClient {
        let url = Url::parse(base).expect("valid url");
        StudyRoomsClient::with_client(reqwest::Client::new(), &url)
    }

    #[test]
    fn url_keeps_base_path_prefix() {
        let c = client("https://rooms.example.edu/portal");
        assert_eq!(
            c.url("/api/spaces").expect("url").as_str(),
            "https://rooms.example.edu/portal/api/spaces"
        );
        assert_eq!(
            c.url("api/reservations/my").expect("url").as_str(),
            "https://rooms.example.edu/portal/api/reservations/my"
        );
    }

    #[test]
    fn url_at_root() {
        let c = client("http://localhost:8080");
        assert_eq!(
            c.url("api/auth/login").expect("url").as_str(),
            "http://localhost:8080/api/auth/login"
        );
    }

    #[test]
    fn token_lifecycle() {
        let c = client("http://localhost:8080");
        assert!(!c.has_token());
        c.set_token(SecretString::from("abc".to_owned()));
        assert!(c.has_token());
        assert_eq!(c.token().map(|t| t.expose_secret().to_owned()).as_deref(), Some("abc"));
        c.clear_token();
        assert!(c.token().is_none());
    }

    #[test]
    fn authorize_without_token_fails_before_dispatch() {
        let c = client("http://localhost:8080");
        let builder = c.http.get("http://localhost:8080/api/spaces");
        assert!(matches!(c.authorize(builder), Err(Error::NotAuthenticated)));
    }
}
