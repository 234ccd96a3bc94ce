// Reservation endpoints for the signed-in user

use tracing::debug;

use crate::client::StudyRoomsClient;
use crate::error::Error;
use crate::models::{NewReservation, Reservation, ReservationId};

impl StudyRoomsClient {
    /// Reservations owned by the signed-in user.
    ///
    /// `GET /api/reservations/my`
    pub async fn list_my_reservations(&self) -> Result<Vec<Reservation>, Error> {
        debug!("listing own reservations");
        self.get("api/reservations/my").await
    }

    /// Every reservation visible to the signed-in user.
    ///
    /// `GET /api/reservations`
    pub async fn list_reservations(&self) -> Result<Vec<Reservation>, Error> {
        self.get("api/reservations").await
    }

    /// Book a space.
    ///
    /// `POST /api/reservations` with `{studySpaceId, date, startTime, endTime}`.
    /// Business rules (opening hours, capacity, duration) are enforced by
    /// the backend and come back as a 400 with a message.
    pub async fn create_reservation(&self, body: &NewReservation) -> Result<Reservation, Error> {
        debug!(
            space = body.study_space_id,
            date = %body.date,
            start = %body.start_time,
            end = %body.end_time,
            "creating reservation"
        );
        self.post("api/reservations", body).await
    }

    /// Cancel one of the user's own reservations.
    ///
    /// `DELETE /api/reservations/{id}` (204 No Content)
    pub async fn cancel_reservation(&self, id: ReservationId) -> Result<(), Error> {
        debug!(id, "cancelling reservation");
        self.delete(&format!("api/reservations/{id}")).await
    }
}
