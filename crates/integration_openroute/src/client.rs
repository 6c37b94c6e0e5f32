//! openrouteservice HTTP client and directions endpoint
//!
//! Issues exactly one request per call: no retry, no caching.

use std::time::Duration;

use async_trait::async_trait;
use domain::{Coordinate, RouteResult, TravelMode};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::config::OpenRouteConfig;
use crate::error::OpenRouteError;
use crate::models::{DirectionsResponse, lon_lat_param, normalize_route};

/// Trait for route computation clients
#[async_trait]
pub trait DirectionsClient: Send + Sync {
    /// Compute a route between two coordinates for the given travel mode
    async fn directions(
        &self,
        start: Coordinate,
        end: Coordinate,
        mode: TravelMode,
    ) -> Result<RouteResult, OpenRouteError>;
}

/// openrouteservice routing profile for a travel mode
#[must_use]
pub const fn profile_for(mode: TravelMode) -> &'static str {
    match mode {
        TravelMode::Driving => "driving-car",
        TravelMode::Cycling => "cycling-regular",
        TravelMode::Walking => "foot-walking",
    }
}

/// Client for the openrouteservice directions and geocoding APIs
#[derive(Debug)]
pub struct OpenRouteClient {
    client: Client,
    config: OpenRouteConfig,
}

impl OpenRouteClient {
    /// Create a new openrouteservice client
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if the configuration is invalid (e.g. no
    /// API key) and `ConnectionFailed` if the HTTP client cannot be initialized.
    pub fn new(config: &OpenRouteConfig) -> Result<Self, OpenRouteError> {
        config
            .validate()
            .map_err(OpenRouteError::ConfigurationError)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("MapViewer/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| OpenRouteError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// The configuration this client was built with
    #[must_use]
    pub const fn config(&self) -> &OpenRouteConfig {
        &self.config
    }

    /// Send an authenticated GET request and decode the JSON body
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, OpenRouteError> {
        let url = format!("{}{path}", self.config.api_root());

        debug!(%url, "Sending openrouteservice request");

        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, &self.config.api_key)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    OpenRouteError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    OpenRouteError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(OpenRouteError::RateLimitExceeded {
                retry_after_secs: response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            });
        }

        if !status.is_success() {
            warn!(%url, %status, "openrouteservice request failed");
            return Err(OpenRouteError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| OpenRouteError::ConnectionFailed(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| OpenRouteError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl DirectionsClient for OpenRouteClient {
    #[instrument(skip(self), fields(profile = profile_for(mode)))]
    async fn directions(
        &self,
        start: Coordinate,
        end: Coordinate,
        mode: TravelMode,
    ) -> Result<RouteResult, OpenRouteError> {
        let path = format!("/v2/directions/{}", profile_for(mode));
        let params = [
            ("start", lon_lat_param(&start)),
            ("end", lon_lat_param(&end)),
            (
                "instructions",
                self.config.include_instructions.to_string(),
            ),
        ];

        let response: DirectionsResponse = self.get_json(&path, &params).await?;

        let not_found = || OpenRouteError::RouteNotFound {
            from: start.to_string(),
            to: end.to_string(),
        };

        let feature = response.features.into_iter().next().ok_or_else(not_found)?;
        let route = normalize_route(feature)?;

        if route.path.is_empty() {
            warn!("Route feature without geometry");
            return Err(not_found());
        }

        debug!(
            points = route.path.len(),
            distance_km = route.distance_km,
            duration_min = route.duration_minutes,
            steps = route.instructions.len(),
            "Route computed"
        );
        Ok(route)
    }
}
