//! Reservation command handlers.

use tabled::Tabled;

use studyrooms_core::display::{self, NO_RESERVATIONS};
use studyrooms_core::{Portal, Reservation, ReservationDraft, max_end_time};

use crate::cli::{GlobalOpts, ReservationsArgs, ReservationsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ReservationRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Space")]
    space: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Cancel")]
    cancellable: &'static str,
}

impl From<&Reservation> for ReservationRow {
    fn from(r: &Reservation) -> Self {
        Self {
            id: r.id,
            space: display::reservation_space_label(r),
            date: r.date.to_string(),
            time: display::time_range(r),
            status: display::status_label(r),
            cancellable: if display::is_cancellable(r) { "yes" } else { "-" },
        }
    }
}

fn render_reservations(reservations: &[Reservation], global: &GlobalOpts) {
    let out = output::render_list(
        &global.output,
        reservations,
        NO_RESERVATIONS,
        |r| ReservationRow::from(r),
        |r| r.id.to_string(),
    );
    output::print_output(&out, global.quiet);
}

fn detail(r: &Reservation) -> String {
    format!(
        "#{} {}\n{} {}\nStatus: {}",
        r.id,
        display::reservation_space_label(r),
        r.date,
        display::time_range(r),
        display::status_label(r)
    )
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    portal: &Portal,
    args: ReservationsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ReservationsCommand::List { all } => {
            if all {
                let reservations = portal.all_reservations().await?;
                render_reservations(&reservations, global);
            } else {
                let reservations = portal.my_reservations().await?;
                render_reservations(&reservations, global);
            }
            Ok(())
        }

        ReservationsCommand::Create {
            space,
            date,
            start,
            end,
        } => {
            let target = portal.resolve_space(&space).await?;
            let draft = ReservationDraft {
                space_id: target.id,
                date: util::parse_date("date", &date)?,
                start: util::parse_time("start", &start)?,
                end: util::parse_optional_time("end", end.as_deref())?,
            };
            if draft.is_over_window() {
                output::warning(
                    global,
                    &format!(
                        "Reservations are limited to two hours; latest end is {}",
                        display::short_time(Some(max_end_time(draft.start)))
                    ),
                );
            }

            let refreshed = portal.create_reservation(draft).await?;
            let created = refreshed.value;
            output::success(
                global,
                &format!(
                    "Reserved {} on {} ({})",
                    target.name,
                    created.date,
                    display::time_range(&created)
                ),
            );
            let out = output::render_single(&global.output, &created, detail, |r| r.id.to_string());
            output::print_output(&out, global.quiet);
            util::reloaded(global, refreshed.list);
            Ok(())
        }

        ReservationsCommand::Cancel { id } => {
            let mine = portal.my_reservations().await?;
            let target = mine
                .iter()
                .find(|r| r.id == id)
                .ok_or_else(|| CliError::NotFound {
                    resource_type: "reservation".into(),
                    identifier: id.to_string(),
                    list_command: "reservations list".into(),
                })?;
            if !display::is_cancellable(target) {
                return Err(CliError::InvalidRequest {
                    message: format!("Reservation #{id} is already {}", display::status_label(target)),
                });
            }
            let prompt = format!(
                "Cancel this reservation? ({} on {}, {})",
                display::reservation_space_label(target),
                target.date,
                display::time_range(target)
            );
            if !util::confirm(&prompt, "reservations cancel", global.yes)? {
                return Ok(());
            }

            let refreshed = portal.cancel_reservation(id).await?;
            output::success(global, &format!("Reservation #{id} cancelled"));
            if let Some(remaining) = util::reloaded(global, refreshed.list) {
                render_reservations(&remaining, global);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use studyrooms_core::ReservationStatus;

    use super::*;

    fn reservation(status: Option<ReservationStatus>) -> Reservation {
        Reservation {
            id: 9,
            study_space: None,
            user: None,
            date: NaiveDate::from_ymd_opt(2026, 10, 20).expect("date"),
            start_time: NaiveTime::from_hms_opt(10, 0, 0).expect("time"),
            end_time: NaiveTime::from_hms_opt(12, 0, 0).expect("time"),
            status,
            demo: false,
        }
    }

    #[test]
    fn row_marks_cancelled_reservations() {
        let row = ReservationRow::from(&reservation(Some(ReservationStatus::CancelledByStaff)));
        assert_eq!(row.cancellable, "-");
        assert_eq!(row.status, "CANCELLED_BY_STAFF");

        let row = ReservationRow::from(&reservation(None));
        assert_eq!(row.cancellable, "yes");
        assert_eq!(row.status, "ACTIVE");
        assert_eq!(row.space, "Space #?");
        assert_eq!(row.time, "10:00 - 12:00");
    }
}
