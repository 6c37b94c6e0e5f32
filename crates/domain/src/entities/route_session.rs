//! Route session state machine
//!
//! One explicit record holds everything the UI displays for a routing
//! session. All changes go through [`RouteSession::apply`], so a result can
//! only be shown for the inputs that produced it.
//!
//! ```text
//! Idle ──RouteRequested──▶ Requesting ──RouteSucceeded──▶ Success
//!   ▲                          │                              │
//!   │                          └────RouteFailed────▶ Failed   │
//!   └──────── input changed (start / end / mode) ◀────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use super::route::RouteResult;
use super::waypoint::{Endpoint, Waypoint};
use crate::value_objects::{Coordinate, TravelMode};

/// Monotonically increasing identifier of a routing request within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(u64);

impl RequestId {
    /// Raw sequence number
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A routing request the caller must issue to the routing provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    /// Identifier to hand back with the outcome
    pub id: RequestId,
    /// Origin
    pub start: Coordinate,
    /// Destination
    pub end: Coordinate,
    /// Routing profile selector
    pub mode: TravelMode,
}

/// Classification of a failed user action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteErrorKind {
    /// Transport failure or non-success HTTP status
    Network,
    /// Geocoding returned no candidates
    NotFound,
    /// Directions returned no route
    RouteNotFound,
    /// Device location missing or denied
    LocationUnavailable,
    /// Malformed user input
    InvalidInput,
    /// Provider answered with something we could not read
    Provider,
    /// Missing or invalid configuration (e.g. no API credential)
    Configuration,
}

/// Error annotation kept in [`RouteStatus::Failed`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteFailure {
    /// What went wrong
    pub kind: RouteErrorKind,
    /// Notification text for the user
    pub message: String,
}

impl RouteFailure {
    /// Create a new failure annotation
    pub fn new(kind: RouteErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Routing status of a session
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RouteStatus {
    /// Nothing requested for the current inputs
    #[default]
    Idle,
    /// A request is in flight; further requests are rejected
    Requesting {
        /// The in-flight request
        request_id: RequestId,
    },
    /// The latest request for the current inputs succeeded
    Success {
        /// Request that produced the result
        request_id: RequestId,
        /// The route to display
        result: RouteResult,
    },
    /// The latest request for the current inputs failed; the user may retry
    Failed {
        /// Request that failed
        request_id: RequestId,
        /// Why it failed
        failure: RouteFailure,
    },
}

/// Input to [`RouteSession::apply`]
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Select an endpoint (map click, typed coordinates, place name, device location)
    SetEndpoint(Endpoint, Waypoint),
    /// Unset an endpoint
    ClearEndpoint(Endpoint),
    /// Change the travel mode
    SetMode(TravelMode),
    /// Exchange start and end
    SwapEndpoints,
    /// User triggered "calculate route"
    RouteRequested,
    /// Provider answered with a route
    RouteSucceeded {
        /// Request the answer belongs to
        request_id: RequestId,
        /// Normalised route
        result: RouteResult,
    },
    /// Provider call failed
    RouteFailed {
        /// Request the failure belongs to
        request_id: RequestId,
        /// Why it failed
        failure: RouteFailure,
    },
}

/// Why a [`SessionEvent::RouteRequested`] was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The named endpoint is not set
    MissingEndpoint(Endpoint),
    /// Another request is still in flight
    RequestPending,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingEndpoint(endpoint) => write!(f, "{endpoint} location is not set"),
            Self::RequestPending => write!(f, "a route request is already in progress"),
        }
    }
}

/// Outcome of applying an event
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// State changed (or was already as requested); re-render
    Updated,
    /// State moved to `Requesting`; the caller must issue this request
    Issue(RouteRequest),
    /// The request was refused; nothing was issued
    Rejected(Rejection),
    /// A provider answer arrived for a superseded request and was dropped
    Discarded(RequestId),
}

/// Transient state of one routing session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteSession {
    start: Option<Waypoint>,
    end: Option<Waypoint>,
    mode: TravelMode,
    status: RouteStatus,
    last_request: u64,
}

impl RouteSession {
    /// Empty session with the given travel mode
    #[must_use]
    pub fn new(mode: TravelMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Selected origin
    #[must_use]
    pub const fn start(&self) -> Option<&Waypoint> {
        self.start.as_ref()
    }

    /// Selected destination
    #[must_use]
    pub const fn end(&self) -> Option<&Waypoint> {
        self.end.as_ref()
    }

    /// Selected endpoint by side
    #[must_use]
    pub const fn endpoint(&self, endpoint: Endpoint) -> Option<&Waypoint> {
        match endpoint {
            Endpoint::Start => self.start.as_ref(),
            Endpoint::End => self.end.as_ref(),
        }
    }

    /// Selected travel mode
    #[must_use]
    pub const fn mode(&self) -> TravelMode {
        self.mode
    }

    /// Current routing status
    #[must_use]
    pub const fn status(&self) -> &RouteStatus {
        &self.status
    }

    /// Whether a request is in flight (the trigger control should be disabled)
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self.status, RouteStatus::Requesting { .. })
    }

    /// Route to display, if the latest request for the current inputs succeeded
    #[must_use]
    pub const fn result(&self) -> Option<&RouteResult> {
        match &self.status {
            RouteStatus::Success { result, .. } => Some(result),
            _ => None,
        }
    }

    /// Failure to display, if the latest request for the current inputs failed
    #[must_use]
    pub const fn failure(&self) -> Option<&RouteFailure> {
        match &self.status {
            RouteStatus::Failed { failure, .. } => Some(failure),
            _ => None,
        }
    }

    /// Apply an event and report what the caller has to do next
    pub fn apply(&mut self, event: SessionEvent) -> Transition {
        match event {
            SessionEvent::SetEndpoint(endpoint, waypoint) => {
                let slot = self.slot_mut(endpoint);
                let moved = slot
                    .as_ref()
                    .is_none_or(|current| current.coordinate != waypoint.coordinate);
                *slot = Some(waypoint);
                if moved {
                    self.invalidate();
                }
                Transition::Updated
            },
            SessionEvent::ClearEndpoint(endpoint) => {
                if self.slot_mut(endpoint).take().is_some() {
                    self.invalidate();
                }
                Transition::Updated
            },
            SessionEvent::SetMode(mode) => {
                if self.mode != mode {
                    self.mode = mode;
                    self.invalidate();
                }
                Transition::Updated
            },
            SessionEvent::SwapEndpoints => {
                std::mem::swap(&mut self.start, &mut self.end);
                self.invalidate();
                Transition::Updated
            },
            SessionEvent::RouteRequested => match self.begin_request() {
                Ok(request) => Transition::Issue(request),
                Err(rejection) => Transition::Rejected(rejection),
            },
            SessionEvent::RouteSucceeded { request_id, result } => {
                self.complete(request_id, RouteStatus::Success { request_id, result })
            },
            SessionEvent::RouteFailed {
                request_id,
                failure,
            } => self.complete(request_id, RouteStatus::Failed {
                request_id,
                failure,
            }),
        }
    }

    fn slot_mut(&mut self, endpoint: Endpoint) -> &mut Option<Waypoint> {
        match endpoint {
            Endpoint::Start => &mut self.start,
            Endpoint::End => &mut self.end,
        }
    }

    /// Drop any result, failure or in-flight request tied to the previous inputs
    fn invalidate(&mut self) {
        self.status = RouteStatus::Idle;
    }

    /// Typed form of [`SessionEvent::RouteRequested`]
    ///
    /// # Errors
    ///
    /// Returns the [`Rejection`] when an endpoint is unset or a request is
    /// already in flight; the session is left unchanged in that case.
    pub fn begin_request(&mut self) -> Result<RouteRequest, Rejection> {
        if self.is_pending() {
            return Err(Rejection::RequestPending);
        }
        let Some(start) = self.start.as_ref().map(|w| w.coordinate) else {
            return Err(Rejection::MissingEndpoint(Endpoint::Start));
        };
        let Some(end) = self.end.as_ref().map(|w| w.coordinate) else {
            return Err(Rejection::MissingEndpoint(Endpoint::End));
        };

        self.last_request += 1;
        let id = RequestId(self.last_request);
        self.status = RouteStatus::Requesting { request_id: id };

        Ok(RouteRequest {
            id,
            start,
            end,
            mode: self.mode,
        })
    }

    fn complete(&mut self, request_id: RequestId, next: RouteStatus) -> Transition {
        let current = match self.status {
            RouteStatus::Requesting { request_id } => Some(request_id),
            _ => None,
        };
        if current == Some(request_id) {
            self.status = next;
            Transition::Updated
        } else {
            Transition::Discarded(request_id)
        }
    }
}
