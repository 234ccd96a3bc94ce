//! Staff command handlers: the full reservation list and cancel-any.

use tabled::Tabled;

use studyrooms_core::display::{self, NO_RESERVATIONS};
use studyrooms_core::{Portal, Reservation};

use crate::cli::{GlobalOpts, StaffArgs, StaffCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct StaffRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Owner")]
    owner: String,
    #[tabled(rename = "Space")]
    space: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&Reservation> for StaffRow {
    fn from(r: &Reservation) -> Self {
        Self {
            id: r.id,
            owner: display::owner_label(r),
            space: display::reservation_space_label(r),
            date: r.date.to_string(),
            time: display::time_range(r),
            status: display::status_label(r),
        }
    }
}

fn render(reservations: &[Reservation], global: &GlobalOpts) {
    let out = output::render_list(
        &global.output,
        reservations,
        NO_RESERVATIONS,
        |r| StaffRow::from(r),
        |r| r.id.to_string(),
    );
    output::print_output(&out, global.quiet);
}

pub async fn handle(portal: &Portal, args: StaffArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        StaffCommand::List { date } => {
            let date = util::parse_optional_date("date", date.as_deref())?;
            let reservations = portal.staff_reservations(date).await?;
            render(&reservations, global);
            Ok(())
        }

        StaffCommand::Cancel { id, date } => {
            let date = util::parse_optional_date("date", date.as_deref())?;
            if !util::confirm(
                &format!("Cancel reservation #{id} for its owner?"),
                "staff cancel",
                global.yes,
            )? {
                return Ok(());
            }
            let refreshed = portal.staff_cancel(id, date).await?;
            output::success(global, &format!("Reservation #{id} cancelled"));
            if let Some(reservations) = util::reloaded(global, refreshed.list) {
                render(&reservations, global);
            }
            Ok(())
        }
    }
}
