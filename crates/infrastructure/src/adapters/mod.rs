//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod location_adapter;
mod openroute_adapter;

pub use location_adapter::StaticLocationAdapter;
pub use openroute_adapter::OpenRouteAdapter;
