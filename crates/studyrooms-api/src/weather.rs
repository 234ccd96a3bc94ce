// Weather lookup endpoint
//
// Proxied by the backend from Open-Meteo; handy when planning a booking.

use tracing::debug;

use crate::client::StudyRoomsClient;
use crate::error::Error;
use crate::models::{Weather, WeatherQuery};

impl StudyRoomsClient {
    /// Current weather, or the forecast at `query.at`.
    ///
    /// `GET /api/weather[?lat=&lon=&at=]`
    pub async fn weather(&self, query: &WeatherQuery) -> Result<Weather, Error> {
        let mut params = Vec::new();
        if let Some(lat) = query.latitude {
            params.push(("lat", lat.to_string()));
        }
        if let Some(lon) = query.longitude {
            params.push(("lon", lon.to_string()));
        }
        if let Some(at) = query.at {
            params.push(("at", at.format("%Y-%m-%dT%H:%M:%S").to_string()));
        }
        debug!(?params, "fetching weather");
        self.get_with_params("api/weather", &params).await
    }
}
