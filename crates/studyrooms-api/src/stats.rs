// Occupancy statistics endpoint (staff only)

use chrono::NaiveDate;
use tracing::debug;

use crate::client::StudyRoomsClient;
use crate::error::Error;
use crate::models::{OccupancyStat, SpaceId};

impl StudyRoomsClient {
    /// Daily occupancy of one space over an inclusive date range.
    ///
    /// `GET /api/stats/occupancy?spaceId=&startDate=&endDate=`
    pub async fn occupancy(
        &self,
        space_id: SpaceId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<OccupancyStat>, Error> {
        debug!(space_id, %start, %end, "fetching occupancy");
        self.get_with_params(
            "api/stats/occupancy",
            &[
                ("spaceId", space_id.to_string()),
                ("startDate", start.to_string()),
                ("endDate", end.to_string()),
            ],
        )
        .await
    }
}
