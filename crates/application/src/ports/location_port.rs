//! Location port - Interface for the device's current position

use async_trait::async_trait;
use domain::Coordinate;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for resolving the device location
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LocationPort: Send + Sync {
    /// Resolve the current device position
    ///
    /// # Errors
    ///
    /// Returns `LocationUnavailable` when no position can be determined.
    async fn resolve_device_location(&self) -> Result<Coordinate, ApplicationError>;
}
