// Wire types for the Study Rooms REST API.
//
// Field names are camelCase on the wire. Dates are ISO `YYYY-MM-DD`,
// times `HH:MM:SS` (the backend also accepts `HH:MM` on input and chrono
// parses both forms on output).

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

pub type SpaceId = i64;
pub type ReservationId = i64;

// ── Spaces ──────────────────────────────────────────────────────────

/// A study space as returned by `GET /api/spaces`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Space {
    pub id: SpaceId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub capacity: u32,
    #[serde(default)]
    pub open_time: Option<NaiveTime>,
    #[serde(default)]
    pub close_time: Option<NaiveTime>,
    /// Open around the clock; opening hours are ignored by the backend.
    #[serde(default)]
    pub full_day: bool,
}

/// Request body for creating or updating a space.
///
/// `id` is never sent for creation; its presence is what routes
/// [`StudyRoomsClient::save_space`](crate::StudyRoomsClient::save_space)
/// to `PUT /api/spaces/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SpaceId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub capacity: u32,
    #[serde(default)]
    pub open_time: Option<NaiveTime>,
    #[serde(default)]
    pub close_time: Option<NaiveTime>,
    #[serde(default)]
    pub full_day: bool,
}

impl From<&Space> for SpaceForm {
    fn from(space: &Space) -> Self {
        Self {
            id: Some(space.id),
            name: space.name.clone(),
            description: space.description.clone(),
            capacity: space.capacity,
            open_time: space.open_time,
            close_time: space.close_time,
            full_day: space.full_day,
        }
    }
}

/// The space embedded in a reservation. The backend sends the full space
/// object; only the identity is relied upon.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceRef {
    #[serde(default)]
    pub id: Option<SpaceId>,
    #[serde(default)]
    pub name: Option<String>,
}

// ── Reservations ────────────────────────────────────────────────────

/// Public part of the user who owns a reservation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: ReservationId,
    #[serde(default)]
    pub study_space: Option<SpaceRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default)]
    pub status: Option<ReservationStatus>,
    #[serde(default)]
    pub demo: bool,
}

/// Reservation lifecycle status.
///
/// Parsing is case-insensitive; strings the client does not know are kept
/// verbatim in [`Unknown`](Self::Unknown).
#[derive(Debug, Clone, PartialEq, Eq, Hash, strum::EnumString, strum::IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[derive(Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReservationStatus {
    Active,
    Pending,
    Confirmed,
    Cancelled,
    CancelledByStaff,
    NoShow,
    #[strum(default)]
    Unknown(String),
}

impl ReservationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unknown(raw) => raw,
            known => known.into(),
        }
    }

    /// Cancelled reservations (by the owner or by staff) cannot be
    /// cancelled again.
    pub fn is_cancelled(&self) -> bool {
        match self {
            Self::Cancelled | Self::CancelledByStaff => true,
            Self::Unknown(raw) => {
                raw.eq_ignore_ascii_case("CANCELLED")
                    || raw.eq_ignore_ascii_case("CANCELLED_BY_STAFF")
            }
            _ => false,
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ReservationStatus {
    fn from(raw: String) -> Self {
        match Self::from_str(raw.trim()) {
            Ok(status) => status,
            Err(_) => Self::Unknown(raw),
        }
    }
}

impl From<ReservationStatus> for String {
    fn from(status: ReservationStatus) -> Self {
        status.as_str().to_owned()
    }
}

/// Request body for `POST /api/reservations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReservation {
    pub study_space_id: SpaceId,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

// ── Statistics ──────────────────────────────────────────────────────

/// One day of occupancy for a space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyStat {
    pub date: NaiveDate,
    pub reservations_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupied_minutes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_minutes: Option<u64>,
    pub occupancy_percentage: f64,
}

// ── Auth ────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
}

/// Request body for `POST /api/auth/register`.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub full_name: String,
    pub email: String,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

// ── Weather ─────────────────────────────────────────────────────────

/// Query for `GET /api/weather`. Unset coordinates use the backend's
/// defaults (the campus location).
#[derive(Debug, Clone, Default)]
pub struct WeatherQuery {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weather {
    pub temperature_celsius: f64,
    pub wind_speed: f64,
    pub precipitation: f64,
    #[serde(default)]
    pub weather_code: Option<i32>,
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!(
            ReservationStatus::from("cancelled_by_staff".to_owned()),
            ReservationStatus::CancelledByStaff
        );
        assert_eq!(
            ReservationStatus::from("CONFIRMED".to_owned()),
            ReservationStatus::Confirmed
        );
    }

    #[test]
    fn unknown_status_is_preserved() {
        let status = ReservationStatus::from("ON_HOLD".to_owned());
        assert_eq!(status, ReservationStatus::Unknown("ON_HOLD".into()));
        assert_eq!(status.to_string(), "ON_HOLD");
        assert!(!status.is_cancelled());
    }

    #[test]
    fn cancelled_statuses() {
        assert!(ReservationStatus::Cancelled.is_cancelled());
        assert!(ReservationStatus::CancelledByStaff.is_cancelled());
        assert!(!ReservationStatus::Confirmed.is_cancelled());
        assert!(!ReservationStatus::NoShow.is_cancelled());
    }

    #[test]
    fn reservation_from_backend_json() {
        let raw = json!({
            "id": 7,
            "user": { "id": 2, "username": "student1", "fullName": "Student One", "role": "STUDENT" },
            "studySpace": {
                "id": 3,
                "name": "Library Room A",
                "capacity": 20,
                "openTime": "08:00:00",
                "closeTime": "20:00:00"
            },
            "date": "2026-10-20",
            "startTime": "10:00:00",
            "endTime": "12:00:00",
            "status": "CONFIRMED",
            "demo": false
        });
        let r: Reservation = serde_json::from_value(raw).expect("valid reservation");
        assert_eq!(r.id, 7);
        assert_eq!(r.study_space.as_ref().and_then(|s| s.id), Some(3));
        assert_eq!(r.status, Some(ReservationStatus::Confirmed));
        assert_eq!(r.start_time, NaiveTime::from_hms_opt(10, 0, 0).expect("time"));
        assert_eq!(
            r.user.and_then(|u| u.username).as_deref(),
            Some("student1")
        );
    }

    #[test]
    fn space_accepts_short_times_and_missing_hours() {
        let space: Space = serde_json::from_value(json!({
            "id": 1, "name": "Hall", "capacity": 40, "openTime": "08:00", "closeTime": "22:30"
        }))
        .expect("valid space");
        assert_eq!(space.close_time, NaiveTime::from_hms_opt(22, 30, 0));
        assert!(!space.full_day);

        let space: Space = serde_json::from_value(json!({
            "id": 2, "name": "24h Lab", "capacity": 10, "fullDay": true
        }))
        .expect("valid space");
        assert!(space.full_day);
        assert_eq!(space.open_time, None);
    }

    #[test]
    fn new_space_form_omits_id() {
        let form = SpaceForm {
            id: None,
            name: "Room B".into(),
            description: None,
            capacity: 12,
            open_time: NaiveTime::from_hms_opt(9, 0, 0),
            close_time: NaiveTime::from_hms_opt(17, 0, 0),
            full_day: false,
        };
        let value = serde_json::to_value(&form).expect("serializable");
        assert_eq!(
            value,
            json!({
                "name": "Room B",
                "capacity": 12,
                "openTime": "09:00:00",
                "closeTime": "17:00:00",
                "fullDay": false
            })
        );
    }

    #[test]
    fn new_reservation_wire_shape() {
        let body = NewReservation {
            study_space_id: 4,
            date: NaiveDate::from_ymd_opt(2026, 10, 21).expect("date"),
            start_time: NaiveTime::from_hms_opt(23, 0, 0).expect("time"),
            end_time: NaiveTime::from_hms_opt(1, 0, 0).expect("time"),
        };
        assert_eq!(
            serde_json::to_value(&body).expect("serializable"),
            json!({
                "studySpaceId": 4,
                "date": "2026-10-21",
                "startTime": "23:00:00",
                "endTime": "01:00:00"
            })
        );
    }

    #[test]
    fn registration_debug_hides_password() {
        let reg = Registration {
            username: "student9".into(),
            password: "hunter22".into(),
            confirm_password: "hunter22".into(),
            full_name: "Nine".into(),
            email: "nine@example.com".into(),
        };
        assert!(!format!("{reg:?}").contains("hunter22"));
    }
}
