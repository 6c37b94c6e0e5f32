//! Route planner service
//!
//! Drives one routing session: endpoint selection from any input source,
//! travel mode changes, and the single in-flight route request. The session
//! lock is never held across a provider call, so endpoint edits stay
//! responsive while a request is pending.

use std::sync::Arc;
use std::time::Duration;

use domain::{
    Coordinate, Endpoint, Rejection, RouteResult, RouteSession, SessionEvent, Transition,
    TravelMode, Waypoint,
};
use parking_lot::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{GeocodingPort, LocationPort, RoutingPort};

/// Configuration for the route planner
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Travel mode a fresh session starts with
    pub default_mode: TravelMode,
    /// Upper bound for a device location lookup
    pub location_timeout_secs: u64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            default_mode: TravelMode::Driving,
            location_timeout_secs: 10,
        }
    }
}

/// Where an endpoint comes from
#[derive(Debug, Clone, PartialEq)]
pub enum WaypointInput {
    /// A point picked on the map
    Coordinate(Coordinate),
    /// Typed "lat, lon" text
    CoordinateText(String),
    /// Free-text place name to geocode
    PlaceName(String),
    /// The device's current position
    DeviceLocation,
}

impl WaypointInput {
    /// Keyword that selects the device location
    pub const HERE: &'static str = "here";

    /// Interpret free user text: `here`, `lat,lon`, or a place name
    #[must_use]
    pub fn interpret(text: &str) -> Self {
        let text = text.trim();
        if text.eq_ignore_ascii_case(Self::HERE) {
            return Self::DeviceLocation;
        }
        match text.parse::<Coordinate>() {
            Ok(coordinate) => Self::Coordinate(coordinate),
            Err(_) if looks_numeric(text) => Self::CoordinateText(text.to_string()),
            Err(_) => Self::PlaceName(text.to_string()),
        }
    }
}

/// Two numbers separated by a comma, semicolon or space are meant as coordinates
///
/// A lone number such as a postal code is left to the geocoder.
fn looks_numeric(text: &str) -> bool {
    let parts: Vec<&str> = text
        .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect();
    parts.len() == 2
        && parts.iter().all(|part| {
            part.chars().any(|c| c.is_ascii_digit())
                && part
                    .chars()
                    .all(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.'))
        })
}

/// Resolve the device position, giving up after `timeout_secs`
///
/// # Errors
///
/// Returns the source's error, or `LocationUnavailable` on timeout.
pub async fn locate_within(
    location: &dyn LocationPort,
    timeout_secs: u64,
) -> Result<Coordinate, ApplicationError> {
    let timeout = Duration::from_secs(timeout_secs);
    match tokio::time::timeout(timeout, location.resolve_device_location()).await {
        Ok(result) => result,
        Err(_) => {
            warn!(timeout_secs, "Location lookup timed out");
            Err(ApplicationError::LocationUnavailable(format!(
                "timed out after {timeout_secs}s"
            )))
        },
    }
}

/// Service that owns a route session and talks to the providers
pub struct RoutePlanner {
    routing: Arc<dyn RoutingPort>,
    geocoding: Arc<dyn GeocodingPort>,
    location: Option<Arc<dyn LocationPort>>,
    session: Mutex<RouteSession>,
    config: PlannerConfig,
}

impl std::fmt::Debug for RoutePlanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutePlanner")
            .field("config", &self.config)
            .field("has_location", &self.location.is_some())
            .finish_non_exhaustive()
    }
}

impl RoutePlanner {
    /// Create a new planner with an empty session
    #[must_use]
    pub fn new(
        routing: Arc<dyn RoutingPort>,
        geocoding: Arc<dyn GeocodingPort>,
        config: PlannerConfig,
    ) -> Self {
        Self {
            routing,
            geocoding,
            location: None,
            session: Mutex::new(RouteSession::new(config.default_mode)),
            config,
        }
    }

    /// Attach a device location source
    #[must_use]
    pub fn with_location(mut self, location: Arc<dyn LocationPort>) -> Self {
        self.location = Some(location);
        self
    }

    /// Copy of the current session for rendering
    #[must_use]
    pub fn snapshot(&self) -> RouteSession {
        self.session.lock().clone()
    }

    /// Set the start or end from any input source
    ///
    /// Coordinates are stored right away; a reverse-geocoded label is
    /// attached afterwards if the endpoint still points at the same spot.
    /// A failed label lookup leaves the endpoint unlabeled.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for unparseable coordinates or an empty place
    /// name, `NotFound` when geocoding has no candidate, `LocationUnavailable`
    /// when the device position cannot be determined, and `Network` on
    /// provider failures. The session is unchanged on error.
    #[instrument(skip(self))]
    pub async fn set_endpoint(
        &self,
        endpoint: Endpoint,
        input: WaypointInput,
    ) -> Result<Waypoint, ApplicationError> {
        let coordinate = match input {
            WaypointInput::Coordinate(coordinate) => coordinate,
            WaypointInput::CoordinateText(text) => text.parse::<Coordinate>()?,
            WaypointInput::DeviceLocation => self.locate().await?,
            WaypointInput::PlaceName(name) => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(ApplicationError::InvalidInput(
                        "place name is empty".to_string(),
                    ));
                }
                let coordinate = self.geocoding.resolve_place(name).await?;
                let waypoint = Waypoint::new(coordinate, name);
                self.apply(SessionEvent::SetEndpoint(endpoint, waypoint.clone()));
                info!(%endpoint, %coordinate, "Endpoint set from place name");
                return Ok(waypoint);
            },
        };

        self.apply(SessionEvent::SetEndpoint(
            endpoint,
            Waypoint::unlabeled(coordinate),
        ));
        info!(%endpoint, %coordinate, "Endpoint set");

        Ok(self.label_endpoint(endpoint, coordinate).await)
    }

    async fn label_endpoint(&self, endpoint: Endpoint, coordinate: Coordinate) -> Waypoint {
        let label = match self.geocoding.resolve_label(coordinate).await {
            Ok(label) => label,
            Err(e) => {
                warn!(%endpoint, error = %e, "Reverse geocoding failed, keeping coordinates");
                return Waypoint::unlabeled(coordinate);
            },
        };
        if label.is_empty() {
            debug!(%endpoint, "No label for coordinate");
            return Waypoint::unlabeled(coordinate);
        }

        let mut session = self.session.lock();
        let unchanged = session
            .endpoint(endpoint)
            .is_some_and(|current| current.coordinate == coordinate);
        if !unchanged {
            debug!(%endpoint, "Endpoint moved during label lookup, label dropped");
            return Waypoint::unlabeled(coordinate);
        }

        let waypoint = Waypoint::new(coordinate, label);
        session.apply(SessionEvent::SetEndpoint(endpoint, waypoint.clone()));
        waypoint
    }

    /// Unset an endpoint
    pub fn clear_endpoint(&self, endpoint: Endpoint) {
        self.apply(SessionEvent::ClearEndpoint(endpoint));
    }

    /// Change the travel mode
    pub fn set_mode(&self, mode: TravelMode) {
        self.apply(SessionEvent::SetMode(mode));
    }

    /// Exchange start and end
    pub fn swap_endpoints(&self) {
        self.apply(SessionEvent::SwapEndpoints);
    }

    fn apply(&self, event: SessionEvent) -> Transition {
        self.session.lock().apply(event)
    }

    /// Resolve the device position within the configured timeout
    ///
    /// # Errors
    ///
    /// Returns `LocationUnavailable` when no location source is attached,
    /// the source fails, or the lookup times out.
    #[instrument(skip(self))]
    pub async fn locate(&self) -> Result<Coordinate, ApplicationError> {
        let Some(location) = &self.location else {
            return Err(ApplicationError::LocationUnavailable(
                "no location source configured".to_string(),
            ));
        };

        locate_within(location.as_ref(), self.config.location_timeout_secs).await
    }

    /// Compute the route for the current start, end and mode
    ///
    /// The session moves to `Requesting` before the provider is called and
    /// records the outcome afterwards. If the inputs change while the call
    /// is in flight, the answer is dropped.
    ///
    /// # Errors
    ///
    /// Returns `MissingEndpoint` or `RequestPending` without calling the
    /// provider, `Superseded` when the inputs changed mid-flight, or the
    /// provider error that was recorded in the session.
    #[instrument(skip(self))]
    pub async fn compute_route(&self) -> Result<RouteResult, ApplicationError> {
        let request = self
            .session
            .lock()
            .begin_request()
            .map_err(|rejection| match rejection {
                Rejection::MissingEndpoint(endpoint) => {
                    ApplicationError::MissingEndpoint(endpoint)
                },
                Rejection::RequestPending => ApplicationError::RequestPending,
            })?;

        info!(
            request_id = %request.id,
            start = %request.start,
            end = %request.end,
            mode = %request.mode,
            "Requesting route"
        );

        let outcome = self
            .routing
            .compute_route(request.start, request.end, request.mode)
            .await;

        let mut session = self.session.lock();
        match outcome {
            Ok(result) => {
                let transition = session.apply(SessionEvent::RouteSucceeded {
                    request_id: request.id,
                    result: result.clone(),
                });
                if let Transition::Discarded(id) = transition {
                    debug!(request_id = %id, "Route answer superseded");
                    return Err(ApplicationError::Superseded(id));
                }
                info!(
                    request_id = %request.id,
                    distance_km = result.distance_km,
                    duration_minutes = result.duration_minutes,
                    "Route computed"
                );
                Ok(result)
            },
            Err(e) => {
                let transition = session.apply(SessionEvent::RouteFailed {
                    request_id: request.id,
                    failure: e.to_failure(),
                });
                if let Transition::Discarded(id) = transition {
                    debug!(request_id = %id, "Route failure superseded");
                    return Err(ApplicationError::Superseded(id));
                }
                warn!(request_id = %request.id, error = %e, "Route request failed");
                Err(e)
            },
        }
    }
}
