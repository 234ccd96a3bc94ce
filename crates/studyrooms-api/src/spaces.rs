// Study space endpoints
//
// Listing is open to every authenticated user; create/update/delete
// require the staff role on the backend.

use tracing::debug;

use crate::client::StudyRoomsClient;
use crate::error::Error;
use crate::models::{Space, SpaceForm, SpaceId};

impl StudyRoomsClient {
    /// List all study spaces.
    ///
    /// `GET /api/spaces`
    pub async fn list_spaces(&self) -> Result<Vec<Space>, Error> {
        debug!("listing spaces");
        self.get("api/spaces").await
    }

    /// Fetch a single space.
    ///
    /// `GET /api/spaces/{id}`
    pub async fn get_space(&self, id: SpaceId) -> Result<Space, Error> {
        self.get(&format!("api/spaces/{id}")).await
    }

    /// Create a space.
    ///
    /// `POST /api/spaces`
    pub async fn create_space(&self, form: &SpaceForm) -> Result<Space, Error> {
        debug!(name = %form.name, "creating space");
        self.post("api/spaces", form).await
    }

    /// Replace a space's attributes.
    ///
    /// `PUT /api/spaces/{id}`
    pub async fn update_space(&self, id: SpaceId, form: &SpaceForm) -> Result<Space, Error> {
        debug!(id, name = %form.name, "updating space");
        self.put(&format!("api/spaces/{id}"), form).await
    }

    /// Create or update depending on whether the form carries an id.
    pub async fn save_space(&self, form: &SpaceForm) -> Result<Space, Error> {
        match form.id {
            Some(id) => self.update_space(id, form).await,
            None => self.create_space(form).await,
        }
    }

    /// Delete a space.
    ///
    /// `DELETE /api/spaces/{id}` (204 No Content)
    pub async fn delete_space(&self, id: SpaceId) -> Result<(), Error> {
        debug!(id, "deleting space");
        self.delete(&format!("api/spaces/{id}")).await
    }
}
