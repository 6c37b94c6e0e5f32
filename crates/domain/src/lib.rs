//! Domain layer for MapViewer
//!
//! Contains the route vocabulary: coordinates, travel modes, route results,
//! and the per-session route request state machine.
//! This layer performs no I/O and knows nothing about the routing provider.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
