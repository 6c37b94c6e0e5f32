//! Value Objects - Immutable, identity-less domain primitives

mod coordinate;
mod travel_mode;

pub use coordinate::Coordinate;
pub use travel_mode::TravelMode;
