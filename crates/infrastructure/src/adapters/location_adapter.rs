//! Host location adapter - Implements `LocationPort` from configuration
//!
//! A terminal host has no geolocation sensor, so the device position is
//! whatever fixed coordinate the operator configured.

use application::error::ApplicationError;
use application::ports::LocationPort;
use async_trait::async_trait;
use domain::Coordinate;
use tracing::debug;

/// Location source that reports a configured position
#[derive(Debug, Clone, Default)]
pub struct StaticLocationAdapter {
    position: Option<Coordinate>,
}

impl StaticLocationAdapter {
    /// Create an adapter reporting the given position (or none)
    #[must_use]
    pub const fn new(position: Option<Coordinate>) -> Self {
        Self { position }
    }
}

#[async_trait]
impl LocationPort for StaticLocationAdapter {
    async fn resolve_device_location(&self) -> Result<Coordinate, ApplicationError> {
        debug!(configured = self.position.is_some(), "Resolving host location");
        self.position.ok_or_else(|| {
            ApplicationError::LocationUnavailable(
                "no host location configured (set location.fixed)".to_string(),
            )
        })
    }
}
