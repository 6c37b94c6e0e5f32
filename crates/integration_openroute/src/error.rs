//! openrouteservice error types

use thiserror::Error;

/// Errors that can occur while talking to openrouteservice
#[derive(Debug, Error)]
pub enum OpenRouteError {
    /// Connection to the service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The service answered with a non-success HTTP status
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response from the service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimitExceeded {
        /// Seconds to wait before retrying (if provided by API)
        retry_after_secs: Option<u64>,
    },

    /// The query was rejected before it was sent
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Geocoding returned zero candidates
    #[error("Place not found: {0}")]
    PlaceNotFound(String),

    /// Directions returned no route feature
    #[error("No route found from {from} to {to}")]
    RouteNotFound {
        /// Origin description
        from: String,
        /// Destination description
        to: String,
    },

    /// Configuration error (e.g. missing API key)
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}
