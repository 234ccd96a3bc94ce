// ── Display helpers ──
//
// Pure formatting from wire types to the short strings shown in lists.

use chrono::NaiveTime;

use studyrooms_api::{Reservation, ReservationStatus, Space};

pub const NO_SPACES: &str = "No spaces found.";
pub const NO_RESERVATIONS: &str = "No reservations yet.";

/// `HH:MM`, or `--:--` for a missing time.
pub fn short_time(time: Option<NaiveTime>) -> String {
    time.map_or_else(|| "--:--".into(), |t| t.format("%H:%M").to_string())
}

/// Opening hours: `08:00 to 20:00`, or `full day`.
pub fn space_hours(space: &Space) -> String {
    if space.full_day {
        "full day".into()
    } else {
        format!(
            "{} to {}",
            short_time(space.open_time),
            short_time(space.close_time)
        )
    }
}

/// `Capacity: 20 — 08:00 to 20:00`
pub fn space_line(space: &Space) -> String {
    format!("Capacity: {} — {}", space.capacity, space_hours(space))
}

/// Name of the booked space, falling back to `Space #<id>`.
pub fn reservation_space_label(reservation: &Reservation) -> String {
    let space = reservation.study_space.as_ref();
    match space.and_then(|s| s.name.as_deref()).filter(|n| !n.is_empty()) {
        Some(name) => name.to_owned(),
        None => match space.and_then(|s| s.id) {
            Some(id) => format!("Space #{id}"),
            None => "Space #?".into(),
        },
    }
}

/// Status tag; reservations without a status are shown as active.
pub fn status_label(reservation: &Reservation) -> String {
    reservation
        .status
        .as_ref()
        .map_or_else(|| ReservationStatus::Active.to_string(), ToString::to_string)
}

/// `10:00 - 12:00`
pub fn time_range(reservation: &Reservation) -> String {
    format!(
        "{} - {}",
        short_time(Some(reservation.start_time)),
        short_time(Some(reservation.end_time))
    )
}

/// Cancelled reservations offer no cancel action.
pub fn is_cancellable(reservation: &Reservation) -> bool {
    !reservation
        .status
        .as_ref()
        .is_some_and(ReservationStatus::is_cancelled)
}

/// Owner shown in staff listings: full name, else username.
pub fn owner_label(reservation: &Reservation) -> String {
    reservation
        .user
        .as_ref()
        .and_then(|u| {
            u.full_name
                .as_deref()
                .filter(|n| !n.is_empty())
                .or(u.username.as_deref())
        })
        .unwrap_or("-")
        .to_owned()
}
