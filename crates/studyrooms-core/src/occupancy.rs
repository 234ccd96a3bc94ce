// ── Occupancy query validation ──
//
// The statistics form needs a space and both ends of a date range. An
// incomplete form never reaches the server.

use chrono::NaiveDate;

use studyrooms_api::{OccupancyStat, SpaceId};

use crate::error::CoreError;

/// Message shown when the form is incomplete.
pub const INCOMPLETE_QUERY: &str = "Select a space and a date range.";

/// Occupancy form input; every field may still be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccupancyQuery {
    pub space_id: Option<SpaceId>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl OccupancyQuery {
    /// Check the form and return `(space, start, end)`.
    pub fn validate(&self) -> Result<(SpaceId, NaiveDate, NaiveDate), CoreError> {
        let Some(space_id) = self.space_id else {
            return Err(incomplete());
        };
        let (start, end) = validate_range(true, self.start, self.end)?;
        Ok((space_id, start, end))
    }
}

/// Check the form before the space name has been looked up.
///
/// Callers that still hold the space as free text run this first so an
/// incomplete form costs no request at all.
pub fn validate_range(
    has_space: bool,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(NaiveDate, NaiveDate), CoreError> {
    let (true, Some(start), Some(end)) = (has_space, start, end) else {
        return Err(incomplete());
    };
    if start > end {
        return Err(CoreError::ValidationFailed {
            message: format!("Start date {start} is after end date {end}."),
        });
    }
    Ok((start, end))
}

fn incomplete() -> CoreError {
    CoreError::ValidationFailed {
        message: INCOMPLETE_QUERY.into(),
    }
}

/// Totals over a range of daily occupancy rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OccupancySummary {
    pub days: usize,
    pub reservations: u64,
    /// Mean of the daily percentages; 0 for an empty range.
    pub average_percentage: f64,
    pub busiest: Option<NaiveDate>,
}

impl OccupancySummary {
    pub fn from_stats(stats: &[OccupancyStat]) -> Self {
        let reservations = stats.iter().map(|s| s.reservations_count).sum();
        let total: f64 = stats.iter().map(|s| s.occupancy_percentage).sum();
        #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
        let average_percentage = if stats.is_empty() {
            0.0
        } else {
            total / stats.len() as f64
        };
        let busiest = stats
            .iter()
            .filter(|s| s.reservations_count > 0)
            .max_by(|a, b| a.occupancy_percentage.total_cmp(&b.occupancy_percentage))
            .map(|s| s.date);

        Self {
            days: stats.len(),
            reservations,
            average_percentage,
            busiest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).expect("valid date")
    }

    #[test]
    fn incomplete_query_is_rejected() {
        for query in [
            OccupancyQuery::default(),
            OccupancyQuery {
                space_id: Some(1),
                start: Some(date(1)),
                end: None,
            },
            OccupancyQuery {
                space_id: None,
                start: Some(date(1)),
                end: Some(date(2)),
            },
        ] {
            let err = query.validate().expect_err("incomplete");
            assert_eq!(err.to_string(), INCOMPLETE_QUERY);
        }
    }

    #[test]
    fn range_is_checked_before_space_lookup() {
        let err = validate_range(true, Some(date(1)), None).expect_err("no end");
        assert_eq!(err.to_string(), INCOMPLETE_QUERY);
        let err = validate_range(false, Some(date(1)), Some(date(2))).expect_err("no space");
        assert_eq!(err.to_string(), INCOMPLETE_QUERY);
        assert_eq!(
            validate_range(true, Some(date(1)), Some(date(2))).expect("valid"),
            (date(1), date(2))
        );
    }

    #[test]
    fn reversed_range_is_rejected() {
        let query = OccupancyQuery {
            space_id: Some(1),
            start: Some(date(5)),
            end: Some(date(2)),
        };
        assert!(matches!(query.validate(), Err(CoreError::ValidationFailed { .. })));
    }

    #[test]
    fn single_day_range_is_fine() {
        let query = OccupancyQuery {
            space_id: Some(4),
            start: Some(date(3)),
            end: Some(date(3)),
        };
        assert_eq!(query.validate().expect("valid"), (4, date(3), date(3)));
    }

    #[test]
    fn summary_totals() {
        let stats = vec![
            OccupancyStat {
                date: date(1),
                reservations_count: 2,
                occupied_minutes: None,
                total_minutes: None,
                occupancy_percentage: 20.0,
            },
            OccupancyStat {
                date: date(2),
                reservations_count: 5,
                occupied_minutes: None,
                total_minutes: None,
                occupancy_percentage: 60.0,
            },
        ];
        let summary = OccupancySummary::from_stats(&stats);
        assert_eq!(summary.days, 2);
        assert_eq!(summary.reservations, 7);
        assert!((summary.average_percentage - 40.0).abs() < f64::EPSILON);
        assert_eq!(summary.busiest, Some(date(2)));

        let empty = OccupancySummary::from_stats(&[]);
        assert_eq!(empty.busiest, None);
        assert!(empty.average_percentage.abs() < f64::EPSILON);
    }
}
