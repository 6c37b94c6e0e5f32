//! Geocoding port - Interface for place name and coordinate lookups

use async_trait::async_trait;
use domain::Coordinate;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for forward and reverse geocoding
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Resolve free text to the best matching coordinate
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the provider has no candidate for the text
    /// and `Network` when the provider cannot be reached.
    async fn resolve_place(&self, text: &str) -> Result<Coordinate, ApplicationError>;

    /// Resolve a coordinate to a human-readable label
    ///
    /// An empty string means the provider had no candidate.
    ///
    /// # Errors
    ///
    /// Returns `Network` when the provider cannot be reached.
    async fn resolve_label(&self, coordinate: Coordinate) -> Result<String, ApplicationError>;
}
