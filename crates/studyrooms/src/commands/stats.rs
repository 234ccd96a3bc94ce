//! Occupancy statistics.

use tabled::Tabled;

use chrono::NaiveDate;

use studyrooms_core::{OccupancyQuery, OccupancyStat, OccupancySummary, Portal, validate_range};

use crate::cli::{GlobalOpts, OutputFormat, StatsArgs, StatsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct OccupancyRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Reservations")]
    reservations: u64,
    #[tabled(rename = "Occupied")]
    occupied: String,
    #[tabled(rename = "Occupancy")]
    percentage: String,
}

impl From<&OccupancyStat> for OccupancyRow {
    fn from(s: &OccupancyStat) -> Self {
        let occupied = match (s.occupied_minutes, s.total_minutes) {
            (Some(used), Some(total)) => format!("{used}/{total} min"),
            (Some(used), None) => format!("{used} min"),
            _ => "-".into(),
        };
        Self {
            date: s.date.to_string(),
            reservations: s.reservations_count,
            occupied,
            percentage: format!("{:.1}%", s.occupancy_percentage),
        }
    }
}

fn summary_line(summary: &OccupancySummary) -> String {
    let busiest = summary
        .busiest
        .map_or_else(|| "none".to_owned(), |d| d.to_string());
    format!(
        "{} days, {} reservations, average {:.1}%, busiest day: {busiest}",
        summary.days, summary.reservations, summary.average_percentage
    )
}

/// Reject an incomplete or malformed form before any request is made,
/// sign-in and space lookup included.
pub fn check(args: &StatsArgs) -> Result<(NaiveDate, NaiveDate), CliError> {
    match &args.command {
        StatsCommand::Occupancy { space, from, to } => {
            let start = util::parse_optional_date("from", from.as_deref())?;
            let end = util::parse_optional_date("to", to.as_deref())?;
            Ok(validate_range(space.is_some(), start, end)?)
        }
    }
}

pub async fn handle(portal: &Portal, args: StatsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let (start, end) = check(&args)?;
    match args.command {
        StatsCommand::Occupancy { space, .. } => {
            let space_id = match space {
                Some(ref s) => Some(portal.resolve_space(s).await?.id),
                None => None,
            };
            let query = OccupancyQuery {
                space_id,
                start: Some(start),
                end: Some(end),
            };

            let stats = portal.occupancy(&query).await?;
            let out = output::render_list(
                &global.output,
                &stats,
                "No occupancy data for this range.",
                |s| OccupancyRow::from(s),
                |s| format!("{}\t{:.1}", s.date, s.occupancy_percentage),
            );
            output::print_output(&out, global.quiet);

            if matches!(global.output, OutputFormat::Table) && !stats.is_empty() {
                output::print_output(&summary_line(&OccupancySummary::from_stats(&stats)), global.quiet);
            }
            Ok(())
        }
    }
}
