//! Routing port - Interface for directions between two coordinates

use async_trait::async_trait;
use domain::{Coordinate, RouteResult, TravelMode};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for computing a route
///
/// Implementations hand back a normalized [`RouteResult`]: the path in
/// `[lat, lon]` order, distance in kilometers and duration in whole minutes.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RoutingPort: Send + Sync {
    /// Compute a route from `start` to `end` for the given travel mode
    ///
    /// # Errors
    ///
    /// Returns `RouteNotFound` when the provider has no route between the
    /// points and `Network` on transport or HTTP failures.
    async fn compute_route(
        &self,
        start: Coordinate,
        end: Coordinate,
        mode: TravelMode,
    ) -> Result<RouteResult, ApplicationError>;
}
