//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer on top of the
//! openrouteservice integration and the host, and owns configuration
//! loading and logging setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{
    AppConfig, GeoLocationConfig, LocationAppConfig, MapAppConfig, OpenRouteAppConfig,
};
pub use telemetry::{LogFormat, TelemetryError, init_logging};
