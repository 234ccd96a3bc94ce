// ── Reservation time window ──
//
// A booking lasts at most two hours. The end time is derived on the clock
// face, so a 23:00 start yields 01:00. The server remains the authority:
// an end time beyond the window is reported, never rejected here.

use chrono::{Duration, NaiveDate, NaiveTime};
use tracing::warn;

use studyrooms_api::{NewReservation, SpaceId};

/// Longest reservation the form offers, in minutes.
pub const MAX_RESERVATION_MINUTES: i64 = 120;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Latest end time for a reservation starting at `start`, wrapping past
/// midnight.
pub fn max_end_time(start: NaiveTime) -> NaiveTime {
    let (end, _) = start.overflowing_add_signed(Duration::minutes(MAX_RESERVATION_MINUTES));
    end
}

/// Minutes from `start` to `end` on a 24-hour clock face.
fn clock_span_minutes(start: NaiveTime, end: NaiveTime) -> i64 {
    (end - start).num_minutes().rem_euclid(MINUTES_PER_DAY)
}

/// Whether `end` lies beyond the two-hour window that starts at `start`.
pub fn exceeds_window(start: NaiveTime, end: NaiveTime) -> bool {
    clock_span_minutes(start, end) > MAX_RESERVATION_MINUTES
}

/// A reservation as entered by the user, before the end time is settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationDraft {
    pub space_id: SpaceId,
    pub date: NaiveDate,
    pub start: NaiveTime,
    /// Defaults to [`max_end_time`] when omitted.
    pub end: Option<NaiveTime>,
}

impl ReservationDraft {
    pub fn end_time(&self) -> NaiveTime {
        self.end.unwrap_or_else(|| max_end_time(self.start))
    }

    /// Whether an explicit end time falls outside the window.
    pub fn is_over_window(&self) -> bool {
        self.end.is_some_and(|end| exceeds_window(self.start, end))
    }

    /// Build the request body. An over-long window is logged and sent as is.
    pub fn into_request(self) -> NewReservation {
        let end_time = self.end_time();
        if self.is_over_window() {
            warn!(
                start = %self.start,
                end = %end_time,
                max_end = %max_end_time(self.start),
                "reservation is longer than {MAX_RESERVATION_MINUTES} minutes; the server may reject it"
            );
        }
        NewReservation {
            study_space_id: self.space_id,
            date: self.date,
            start_time: self.start,
            end_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
    }

    #[test]
    fn max_end_is_two_hours_later() {
        assert_eq!(max_end_time(t(9, 5)), t(11, 5));
        assert_eq!(max_end_time(t(0, 0)), t(2, 0));
        assert_eq!(max_end_time(t(21, 59)), t(23, 59));
    }

    #[test]
    fn max_end_wraps_past_midnight() {
        assert_eq!(max_end_time(t(23, 0)), t(1, 0));
        assert_eq!(max_end_time(t(22, 30)), t(0, 30));
        assert_eq!(max_end_time(t(23, 59)), t(1, 59));
    }

    #[test]
    fn max_end_is_always_exactly_the_window() {
        for hour in 0..24 {
            for minute in [0, 15, 30, 45, 59] {
                let start = t(hour, minute);
                let end = max_end_time(start);
                assert_eq!(clock_span_minutes(start, end), MAX_RESERVATION_MINUTES);
                assert!(!exceeds_window(start, end));
            }
        }
    }

    #[test]
    fn window_check_respects_wraparound() {
        assert!(!exceeds_window(t(10, 0), t(11, 30)));
        assert!(exceeds_window(t(10, 0), t(12, 1)));
        assert!(!exceeds_window(t(23, 0), t(0, 45)));
        assert!(exceeds_window(t(23, 0), t(1, 1)));
    }

    #[test]
    fn draft_defaults_end_time() {
        let draft = ReservationDraft {
            space_id: 3,
            date: NaiveDate::from_ymd_opt(2026, 10, 20).expect("date"),
            start: t(23, 0),
            end: None,
        };
        assert!(!draft.is_over_window());
        let body = draft.into_request();
        assert_eq!(body.end_time, t(1, 0));
        assert_eq!(body.study_space_id, 3);
    }

    #[test]
    fn draft_keeps_explicit_end_even_when_too_long() {
        let draft = ReservationDraft {
            space_id: 1,
            date: NaiveDate::from_ymd_opt(2026, 10, 20).expect("date"),
            start: t(9, 0),
            end: Some(t(13, 0)),
        };
        assert!(draft.is_over_window());
        assert_eq!(draft.into_request().end_time, t(13, 0));
    }
}
