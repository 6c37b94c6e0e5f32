//! Application layer - Use cases and orchestration
//!
//! Contains the route-request workflow, port definitions for the external
//! geocoding, routing and location collaborators, and the display payload
//! handed to the map renderer.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
