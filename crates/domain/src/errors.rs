//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Latitude or longitude outside the valid range
    #[error(
        "Invalid coordinates ({latitude}, {longitude}): latitude must be -90 to 90, longitude must be -180 to 180"
    )]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    /// Malformed user input (e.g. non-numeric coordinate text)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Unknown travel mode name
    #[error("Invalid travel mode: {0}")]
    InvalidTravelMode(String),
}

impl DomainError {
    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}
