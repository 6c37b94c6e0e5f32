//! openrouteservice adapter - Implements `RoutingPort` and `GeocodingPort`

use application::error::ApplicationError;
use application::ports::{GeocodingPort, RoutingPort};
use async_trait::async_trait;
use domain::{Coordinate, RouteResult, TravelMode};
use integration_openroute::{
    DirectionsClient, GeocodingClient, OpenRouteClient, OpenRouteConfig, OpenRouteError,
};
use tracing::{debug, instrument, warn};

/// Adapter for routing and geocoding backed by openrouteservice
pub struct OpenRouteAdapter {
    client: OpenRouteClient,
}

impl std::fmt::Debug for OpenRouteAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenRouteAdapter")
            .field("config", self.client.config())
            .finish()
    }
}

impl OpenRouteAdapter {
    /// Create a new adapter from client configuration
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the API key is missing or the base URL is invalid.
    pub fn new(config: &OpenRouteConfig) -> Result<Self, ApplicationError> {
        let client = OpenRouteClient::new(config).map_err(map_error)?;
        Ok(Self { client })
    }
}

/// Translate provider errors into the application's error kinds
pub(crate) fn map_error(err: OpenRouteError) -> ApplicationError {
    match err {
        OpenRouteError::ConnectionFailed(_)
        | OpenRouteError::RequestFailed(_)
        | OpenRouteError::RateLimitExceeded { .. }
        | OpenRouteError::Timeout { .. } => ApplicationError::Network(err.to_string()),
        OpenRouteError::ParseError(msg) => ApplicationError::Provider(msg),
        OpenRouteError::InvalidQuery(msg) => ApplicationError::InvalidInput(msg),
        OpenRouteError::PlaceNotFound(text) => ApplicationError::NotFound(text),
        OpenRouteError::RouteNotFound { .. } => ApplicationError::RouteNotFound(err.to_string()),
        OpenRouteError::ConfigurationError(msg) => ApplicationError::Configuration(msg),
    }
}

#[async_trait]
impl RoutingPort for OpenRouteAdapter {
    #[instrument(skip(self))]
    async fn compute_route(
        &self,
        start: Coordinate,
        end: Coordinate,
        mode: TravelMode,
    ) -> Result<RouteResult, ApplicationError> {
        self.client
            .directions(start, end, mode)
            .await
            .map_err(|e| {
                warn!(error = %e, "Directions request failed");
                map_error(e)
            })
    }
}

#[async_trait]
impl GeocodingPort for OpenRouteAdapter {
    #[instrument(skip(self))]
    async fn resolve_place(&self, text: &str) -> Result<Coordinate, ApplicationError> {
        self.client.geocode(text).await.map_err(map_error)
    }

    #[instrument(skip(self))]
    async fn resolve_label(&self, coordinate: Coordinate) -> Result<String, ApplicationError> {
        let label = self
            .client
            .reverse_geocode(coordinate)
            .await
            .map_err(map_error)?;
        if label.is_none() {
            debug!("No reverse geocoding candidate");
        }
        Ok(label.unwrap_or_default())
    }
}
