//! Travel mode value object

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::DomainError;

/// Routing behaviour selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    /// By car
    #[default]
    Driving,
    /// By bicycle
    Cycling,
    /// On foot
    Walking,
}

impl TravelMode {
    /// All modes, in the order they are offered to the user
    pub const ALL: [Self; 3] = [Self::Driving, Self::Cycling, Self::Walking];

    /// Get a human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Driving => "Car",
            Self::Cycling => "Bike",
            Self::Walking => "Walk",
        }
    }

    /// Lowercase identifier used in configuration and on the command line
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Driving => "driving",
            Self::Cycling => "cycling",
            Self::Walking => "walking",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TravelMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "driving" | "drive" | "car" => Ok(Self::Driving),
            "cycling" | "cycle" | "bike" | "bicycle" => Ok(Self::Cycling),
            "walking" | "walk" | "foot" => Ok(Self::Walking),
            other => Err(DomainError::InvalidTravelMode(other.to_string())),
        }
    }
}
