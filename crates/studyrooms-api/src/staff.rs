// Staff-only reservation endpoints

use chrono::NaiveDate;
use tracing::debug;

use crate::client::StudyRoomsClient;
use crate::error::Error;
use crate::models::{Reservation, ReservationId};

impl StudyRoomsClient {
    /// All reservations, optionally restricted to one day.
    ///
    /// `GET /api/staff/reservations[?date=YYYY-MM-DD]`
    pub async fn list_staff_reservations(
        &self,
        date: Option<NaiveDate>,
    ) -> Result<Vec<Reservation>, Error> {
        debug!(?date, "listing reservations as staff");
        match date {
            Some(date) => {
                self.get_with_params("api/staff/reservations", &[("date", date.to_string())])
                    .await
            }
            None => self.get("api/staff/reservations").await,
        }
    }

    /// Cancel any reservation on behalf of staff.
    ///
    /// `POST /api/staff/reservations/{id}/cancel` (204 No Content)
    pub async fn cancel_reservation_as_staff(&self, id: ReservationId) -> Result<(), Error> {
        debug!(id, "cancelling reservation as staff");
        self.post_empty(&format!("api/staff/reservations/{id}/cancel"))
            .await
    }
}
