//! openrouteservice geocoding client
//!
//! Converts free-form place names to coordinates and coordinates to display
//! labels using the Pelias-based `/geocode` endpoints.

use async_trait::async_trait;
use domain::Coordinate;
use tracing::{debug, instrument};

use crate::client::OpenRouteClient;
use crate::error::OpenRouteError;
use crate::models::{GeocodeResponse, coordinate_from_position};

/// Trait for geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Convert a free-form place name to the first candidate's coordinate
    async fn geocode(&self, text: &str) -> Result<Coordinate, OpenRouteError>;

    /// Convert a coordinate to the best-match label, `None` when there is no candidate
    async fn reverse_geocode(&self, coordinate: Coordinate)
    -> Result<Option<String>, OpenRouteError>;
}

#[async_trait]
impl GeocodingClient for OpenRouteClient {
    #[instrument(skip(self))]
    async fn geocode(&self, text: &str) -> Result<Coordinate, OpenRouteError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(OpenRouteError::InvalidQuery(
                "place name is empty".to_string(),
            ));
        }

        let params = [("text", text.to_string()), ("size", "1".to_string())];
        let response: GeocodeResponse = self.get_json("/geocode/search", &params).await?;

        let feature = response
            .features
            .into_iter()
            .next()
            .ok_or_else(|| OpenRouteError::PlaceNotFound(text.to_string()))?;

        let coordinate = coordinate_from_position(&feature.geometry.coordinates)?;
        debug!(%text, %coordinate, label = ?feature.properties.label, "Geocoded place");
        Ok(coordinate)
    }

    #[instrument(skip(self))]
    async fn reverse_geocode(
        &self,
        coordinate: Coordinate,
    ) -> Result<Option<String>, OpenRouteError> {
        let params = [
            ("point.lat", coordinate.latitude().to_string()),
            ("point.lon", coordinate.longitude().to_string()),
            ("size", "1".to_string()),
        ];
        let response: GeocodeResponse = self.get_json("/geocode/reverse", &params).await?;

        let label = response
            .features
            .into_iter()
            .next()
            .and_then(|feature| feature.properties.label)
            .filter(|label| !label.is_empty());

        debug!(%coordinate, ?label, "Reverse geocoded");
        Ok(label)
    }
}
