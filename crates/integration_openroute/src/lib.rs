//! openrouteservice integration for MapViewer
//!
//! Provides route computation via the
//! [openrouteservice directions API](https://openrouteservice.org/dev/#/api-docs/v2/directions)
//! and place lookup via its Pelias-based geocoding endpoints.
//!
//! # Architecture
//!
//! [`OpenRouteClient`] holds one HTTP client and the API credential and
//! implements both [`DirectionsClient`] and [`GeocodingClient`]. Provider
//! responses are GeoJSON with `[longitude, latitude]` positions; they are
//! converted to the domain's `(latitude, longitude)` order in exactly one
//! place ([`coordinate_from_position`]) before leaving this crate. Distances
//! and durations are normalised to kilometers and minutes here as well.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain::{Coordinate, TravelMode};
//! use integration_openroute::{DirectionsClient, OpenRouteClient, OpenRouteConfig};
//!
//! let config = OpenRouteConfig::new(std::env::var("ORS_API_KEY")?);
//! let client = OpenRouteClient::new(&config)?;
//!
//! let route = client
//!     .directions(
//!         Coordinate::new(52.3733747, 4.8833205)?, // Amsterdam
//!         Coordinate::new(51.920223, 4.4749919)?,  // Rotterdam
//!         TravelMode::Driving,
//!     )
//!     .await?;
//! println!("{} / {}", route.distance_label(), route.duration_label());
//! ```

mod client;
mod config;
mod error;
mod geocoding;
mod models;

pub use client::{DirectionsClient, OpenRouteClient, profile_for};
pub use config::OpenRouteConfig;
pub use error::OpenRouteError;
pub use geocoding::GeocodingClient;
pub use models::coordinate_from_position;
