// studyrooms-core: Session, scheduling and portal layer between studyrooms-api and the CLI.

pub mod config;
pub mod display;
pub mod error;
pub mod occupancy;
pub mod portal;
pub mod schedule;
pub mod session;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ClientConfig, Credentials, TlsVerification};
pub use error::CoreError;
pub use occupancy::{OccupancyQuery, OccupancySummary, validate_range};
pub use portal::{Portal, Refreshed, Role, SessionSnapshot};
pub use schedule::{MAX_RESERVATION_MINUTES, ReservationDraft, exceeds_window, max_end_time};
pub use session::{FileTokenStore, MemoryTokenStore, TokenStore};

// Re-export wire types so consumers need only one dependency.
pub use studyrooms_api::{
    NewReservation, OccupancyStat, Registration, Reservation, ReservationId, ReservationStatus,
    Space, SpaceForm, SpaceId, Weather, WeatherQuery,
};
