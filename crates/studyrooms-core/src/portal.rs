// ── Portal facade ──
//
// Owns the API client, the session token store and a small cache of the
// last fetched lists. Every authenticated call goes through `guard`, so a
// 401 anywhere clears the token both in memory and in the store.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use secrecy::SecretString;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use studyrooms_api::{
    OccupancyStat, Registration, Reservation, ReservationId, Space, SpaceForm, SpaceId,
    StudyRoomsClient, Weather, WeatherQuery,
};

use crate::config::ClientConfig;
use crate::error::CoreError;
use crate::occupancy::OccupancyQuery;
use crate::schedule::ReservationDraft;
use crate::session::TokenStore;

// ── Role ─────────────────────────────────────────────────────────

/// Role of the signed-in account, inferred from the staff reservations check.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display, strum::EnumString, Serialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Not checked yet.
    #[default]
    Unknown,
    Student,
    Staff,
}

/// Data loaded right after sign-in.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub role: Role,
    pub spaces: Arc<Vec<Space>>,
    pub reservations: Arc<Vec<Reservation>>,
}

/// Result of a change that went through, plus the list reloaded after it.
///
/// A failed reload does not undo the change; it only leaves `list` as an
/// error and the cached list as it was.
#[derive(Debug)]
pub struct Refreshed<T, L> {
    pub value: T,
    pub list: Result<L, CoreError>,
}

impl<T, L> Refreshed<T, L> {
    fn new(value: T, list: Result<L, CoreError>) -> Self {
        if let Err(ref e) = list {
            warn!(error = %e, "change applied but the list could not be reloaded");
        }
        Self { value, list }
    }
}

// ── Portal ───────────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<PortalInner>`.
#[derive(Clone)]
pub struct Portal {
    inner: Arc<PortalInner>,
}

struct PortalInner {
    config: ClientConfig,
    client: StudyRoomsClient,
    store: Arc<dyn TokenStore>,
    role: RwLock<Role>,
    spaces: RwLock<Arc<Vec<Space>>>,
    reservations: RwLock<Arc<Vec<Reservation>>>,
}

impl Portal {
    /// Build a portal for `config`. Nothing is sent until the first call.
    pub fn new(config: ClientConfig, store: Arc<dyn TokenStore>) -> Result<Self, CoreError> {
        let client = StudyRoomsClient::new(&config.url, &config.transport())?;
        Ok(Self {
            inner: Arc::new(PortalInner {
                config,
                client,
                store,
                role: RwLock::new(Role::Unknown),
                spaces: RwLock::new(Arc::new(Vec::new())),
                reservations: RwLock::new(Arc::new(Vec::new())),
            }),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn is_signed_in(&self) -> bool {
        self.inner.client.has_token()
    }

    pub async fn role(&self) -> Role {
        *self.inner.role.read().await
    }

    /// Spaces from the last successful listing.
    pub async fn cached_spaces(&self) -> Arc<Vec<Space>> {
        Arc::clone(&*self.inner.spaces.read().await)
    }

    /// The user's reservations from the last successful listing.
    pub async fn cached_reservations(&self) -> Arc<Vec<Reservation>> {
        Arc::clone(&*self.inner.reservations.read().await)
    }

    // ── Session lifecycle ────────────────────────────────────────

    /// Sign in, persist the token, then load spaces, the user's
    /// reservations and the staff check concurrently. Any failure, from the
    /// credentials check to the initial load, drops every token held.
    pub async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<SessionSnapshot, CoreError> {
        match self.sign_in(username, password).await {
            Ok(snapshot) => Ok(snapshot),
            Err(e) => {
                warn!(error = %e, "login failed; signing out");
                self.logout().await;
                Err(e)
            }
        }
    }

    async fn sign_in(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<SessionSnapshot, CoreError> {
        let client = &self.inner.client;
        let token = client.login(username, password).await?;
        self.inner.store.save(&token)?;
        info!(username, "signed in");

        let (spaces, mine, staff) = tokio::join!(
            client.list_spaces(),
            client.list_my_reservations(),
            self.staff_check(),
        );

        let loaded = match (spaces, mine, staff) {
            (Ok(spaces), Ok(mine), Ok(is_staff)) => Ok((spaces, mine, is_staff)),
            (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => Err(e),
        };
        let (spaces, mine, is_staff) = loaded?;

        let role = if is_staff { Role::Staff } else { Role::Student };
        *self.inner.role.write().await = role;
        debug!(%role, "role detected");
        Ok(self.remember(spaces, mine).await)
    }

    /// Pick up a stored token and reload spaces and reservations with it.
    ///
    /// Returns `Ok(None)` when no token is stored. A failed reload signs
    /// the user out.
    pub async fn restore(&self) -> Result<Option<SessionSnapshot>, CoreError> {
        let Some(token) = self.inner.store.load()? else {
            return Ok(None);
        };
        let client = &self.inner.client;
        client.set_token(token);

        let (spaces, mine) = tokio::join!(client.list_spaces(), client.list_my_reservations());
        match (spaces, mine) {
            (Ok(spaces), Ok(mine)) => Ok(Some(self.remember(spaces, mine).await)),
            (Err(e), _) | (_, Err(e)) => {
                warn!(error = %e, "stored session is no longer valid; signing out");
                self.logout().await;
                Err(e.into())
            }
        }
    }

    /// Make sure a token is available: the one already in memory, the
    /// stored one, or a fresh login with configured credentials.
    pub async fn ensure_signed_in(&self) -> Result<(), CoreError> {
        if self.is_signed_in() {
            return Ok(());
        }
        if let Some(token) = self.inner.store.load()? {
            debug!("using stored session token");
            self.inner.client.set_token(token);
            return Ok(());
        }
        let Some(credentials) = self.inner.config.credentials.clone() else {
            return Err(CoreError::NotSignedIn);
        };
        debug!(username = %credentials.username, "no session; signing in with configured credentials");
        self.login(&credentials.username, &credentials.password)
            .await
            .map(|_| ())
    }

    /// Forget the token locally. The server keeps no session to end.
    pub async fn logout(&self) {
        self.inner.client.logout();
        if let Err(e) = self.inner.store.clear() {
            warn!(error = %e, "failed to remove stored session token");
        }
        self.forget().await;
        info!("signed out");
    }

    /// Create a student account. Does not sign in.
    pub async fn register(&self, registration: &Registration) -> Result<String, CoreError> {
        Ok(self.inner.client.register(registration).await?)
    }

    /// Ask the server whether the signed-in account is staff.
    pub async fn detect_role(&self) -> Result<Role, CoreError> {
        let result = self.staff_check().await;
        let is_staff = self.guard(result).await?;
        let role = if is_staff { Role::Staff } else { Role::Student };
        *self.inner.role.write().await = role;
        Ok(role)
    }

    /// Call `GET /api/staff/reservations` for today. Only a 401 (or a
    /// missing token) counts as failure; any other error means "not staff".
    async fn staff_check(&self) -> Result<bool, studyrooms_api::Error> {
        match self
            .inner
            .client
            .list_staff_reservations(Some(today()))
            .await
        {
            Ok(_) => Ok(true),
            Err(e) if e.is_auth_expired() => Err(e),
            Err(e) => {
                debug!(error = %e, "staff check failed; treating account as student");
                Ok(false)
            }
        }
    }

    // ── Spaces ───────────────────────────────────────────────────

    pub async fn list_spaces(&self) -> Result<Arc<Vec<Space>>, CoreError> {
        let result = self.inner.client.list_spaces().await;
        let spaces = Arc::new(self.guard(result).await?);
        *self.inner.spaces.write().await = Arc::clone(&spaces);
        Ok(spaces)
    }

    pub async fn get_space(&self, id: SpaceId) -> Result<Space, CoreError> {
        let result = self.inner.client.get_space(id).await;
        self.guard(result).await.map_err(|e| match e {
            CoreError::NotFound { .. } => CoreError::SpaceNotFound {
                identifier: id.to_string(),
            },
            other => other,
        })
    }

    /// Resolve a space by numeric id or by (case-insensitive) name, using
    /// the cached list and fetching it once if needed.
    pub async fn resolve_space(&self, identifier: &str) -> Result<Space, CoreError> {
        let mut spaces = self.cached_spaces().await;
        if spaces.is_empty() {
            spaces = self.list_spaces().await?;
        }
        find_space(&spaces, identifier)
            .cloned()
            .ok_or_else(|| CoreError::SpaceNotFound {
                identifier: identifier.to_owned(),
            })
    }

    /// Create (no id) or update (with id) a space, then refresh the list.
    pub async fn save_space(
        &self,
        form: &SpaceForm,
    ) -> Result<Refreshed<Space, Arc<Vec<Space>>>, CoreError> {
        let result = self.inner.client.save_space(form).await;
        let saved = self.guard(result).await?;
        info!(id = saved.id, name = %saved.name, "space saved");
        Ok(Refreshed::new(saved, self.list_spaces().await))
    }

    pub async fn delete_space(
        &self,
        id: SpaceId,
    ) -> Result<Refreshed<(), Arc<Vec<Space>>>, CoreError> {
        let result = self.inner.client.delete_space(id).await;
        self.guard(result).await?;
        info!(id, "space deleted");
        Ok(Refreshed::new((), self.list_spaces().await))
    }

    // ── Reservations ─────────────────────────────────────────────

    pub async fn my_reservations(&self) -> Result<Arc<Vec<Reservation>>, CoreError> {
        let result = self.inner.client.list_my_reservations().await;
        let reservations = Arc::new(self.guard(result).await?);
        *self.inner.reservations.write().await = Arc::clone(&reservations);
        Ok(reservations)
    }

    pub async fn all_reservations(&self) -> Result<Vec<Reservation>, CoreError> {
        let result = self.inner.client.list_reservations().await;
        self.guard(result).await
    }

    /// Book a space, then refresh the user's reservation list.
    pub async fn create_reservation(
        &self,
        draft: ReservationDraft,
    ) -> Result<Refreshed<Reservation, Arc<Vec<Reservation>>>, CoreError> {
        let body = draft.into_request();
        let result = self.inner.client.create_reservation(&body).await;
        let created = self.guard(result).await?;
        info!(id = created.id, "reservation created");
        Ok(Refreshed::new(created, self.my_reservations().await))
    }

    /// Cancel one of the user's reservations, then refresh the list.
    pub async fn cancel_reservation(
        &self,
        id: ReservationId,
    ) -> Result<Refreshed<(), Arc<Vec<Reservation>>>, CoreError> {
        let result = self.inner.client.cancel_reservation(id).await;
        self.guard(result).await?;
        info!(id, "reservation cancelled");
        Ok(Refreshed::new((), self.my_reservations().await))
    }

    // ── Staff ────────────────────────────────────────────────────

    pub async fn staff_reservations(
        &self,
        date: Option<NaiveDate>,
    ) -> Result<Vec<Reservation>, CoreError> {
        let result = self.inner.client.list_staff_reservations(date).await;
        self.guard(result).await
    }

    /// Cancel any reservation as staff, then reload the staff list with the
    /// same date filter.
    pub async fn staff_cancel(
        &self,
        id: ReservationId,
        date: Option<NaiveDate>,
    ) -> Result<Refreshed<(), Vec<Reservation>>, CoreError> {
        let result = self.inner.client.cancel_reservation_as_staff(id).await;
        self.guard(result).await?;
        info!(id, "reservation cancelled by staff");
        Ok(Refreshed::new((), self.staff_reservations(date).await))
    }

    /// Daily occupancy for a validated query. Incomplete queries fail
    /// before any request.
    pub async fn occupancy(&self, query: &OccupancyQuery) -> Result<Vec<OccupancyStat>, CoreError> {
        let (space_id, start, end) = query.validate()?;
        let result = self.inner.client.occupancy(space_id, start, end).await;
        self.guard(result).await
    }

    // ── Weather ──────────────────────────────────────────────────

    pub async fn weather(&self, query: &WeatherQuery) -> Result<Weather, CoreError> {
        let result = self.inner.client.weather(query).await;
        self.guard(result).await
    }

    // ── Internals ────────────────────────────────────────────────

    /// Translate an API result; on session expiry also drop the stored
    /// token and the cached lists.
    async fn guard<T: Send>(
        &self,
        result: Result<T, studyrooms_api::Error>,
    ) -> Result<T, CoreError> {
        match result {
            Ok(value) => Ok(value),
            Err(e) => {
                if matches!(e, studyrooms_api::Error::SessionExpired { .. }) {
                    if let Err(store_err) = self.inner.store.clear() {
                        warn!(error = %store_err, "failed to remove stored session token");
                    }
                    self.forget().await;
                }
                Err(e.into())
            }
        }
    }

    async fn remember(&self, spaces: Vec<Space>, mine: Vec<Reservation>) -> SessionSnapshot {
        let spaces = Arc::new(spaces);
        let reservations = Arc::new(mine);
        *self.inner.spaces.write().await = Arc::clone(&spaces);
        *self.inner.reservations.write().await = Arc::clone(&reservations);
        SessionSnapshot {
            role: *self.inner.role.read().await,
            spaces,
            reservations,
        }
    }

    async fn forget(&self) {
        *self.inner.role.write().await = Role::Unknown;
        *self.inner.spaces.write().await = Arc::new(Vec::new());
        *self.inner.reservations.write().await = Arc::new(Vec::new());
    }
}

/// Match by numeric id first, then by case-insensitive name.
fn find_space<'a>(spaces: &'a [Space], identifier: &str) -> Option<&'a Space> {
    let identifier = identifier.trim();
    if let Ok(id) = identifier.parse::<SpaceId>() {
        if let Some(space) = spaces.iter().find(|s| s.id == id) {
            return Some(space);
        }
    }
    spaces
        .iter()
        .find(|s| s.name.eq_ignore_ascii_case(identifier))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
