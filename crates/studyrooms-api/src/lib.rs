// studyrooms-api: Async Rust client for the Study Rooms reservation REST API

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod reservations;
pub mod spaces;
pub mod staff;
pub mod stats;
pub mod transport;
pub mod weather;

pub use client::StudyRoomsClient;
pub use error::{Error, ErrorBody};
pub use models::{
    LoginRequest, LoginResponse, NewReservation, OccupancyStat, Registration, Reservation,
    ReservationId, ReservationStatus, Space, SpaceForm, SpaceId, SpaceRef, UserSummary, Weather,
    WeatherQuery,
};
pub use transport::{TlsMode, TransportConfig};
