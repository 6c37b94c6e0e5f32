//! Application-level errors

use domain::{DomainError, Endpoint, RequestId, RouteErrorKind, RouteFailure};
use thiserror::Error;

/// Errors that can occur in the application layer
///
/// Every variant is recoverable: the user is notified and may retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplicationError {
    /// Transport failure or non-success HTTP status
    #[error("Network error: {0}")]
    Network(String),

    /// Geocoding returned no candidates
    #[error("Place not found: {0}")]
    NotFound(String),

    /// Directions returned no route
    #[error("No route found: {0}")]
    RouteNotFound(String),

    /// Device location missing, denied or timed out
    #[error("Location unavailable: {0}")]
    LocationUnavailable(String),

    /// Malformed user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A route was requested before both endpoints were set
    #[error("Cannot compute route: {0} location is not set")]
    MissingEndpoint(Endpoint),

    /// A route request is already in flight
    #[error("A route request is already in progress")]
    RequestPending,

    /// The inputs changed while the request was in flight; its answer was dropped
    #[error("Route request {0} was superseded")]
    Superseded(RequestId),

    /// Provider answered with something that could not be read
    #[error("Provider error: {0}")]
    Provider(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Classification recorded in a failed route session
    pub const fn kind(&self) -> RouteErrorKind {
        match self {
            Self::Network(_) => RouteErrorKind::Network,
            Self::NotFound(_) => RouteErrorKind::NotFound,
            Self::RouteNotFound(_) => RouteErrorKind::RouteNotFound,
            Self::LocationUnavailable(_) => RouteErrorKind::LocationUnavailable,
            Self::InvalidInput(_)
            | Self::MissingEndpoint(_)
            | Self::RequestPending
            | Self::Superseded(_) => RouteErrorKind::InvalidInput,
            Self::Provider(_) => RouteErrorKind::Provider,
            Self::Configuration(_) => RouteErrorKind::Configuration,
        }
    }

    /// Failure annotation for [`domain::RouteStatus::Failed`]
    pub fn to_failure(&self) -> RouteFailure {
        RouteFailure::new(self.kind(), self.to_string())
    }
}

impl From<DomainError> for ApplicationError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidInput(msg) => Self::InvalidInput(msg),
            other => Self::InvalidInput(other.to_string()),
        }
    }
}
