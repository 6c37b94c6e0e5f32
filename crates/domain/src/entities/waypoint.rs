//! Route endpoints

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::Coordinate;

/// Which end of the route an input applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    /// Route origin
    Start,
    /// Route destination
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::End => write!(f, "end"),
        }
    }
}

/// A selected route endpoint with its advisory display label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Where the endpoint is
    pub coordinate: Coordinate,
    /// Human-readable label; empty when none is known
    pub label: String,
}

impl Waypoint {
    /// Create a waypoint with a label
    pub fn new(coordinate: Coordinate, label: impl Into<String>) -> Self {
        Self {
            coordinate,
            label: label.into(),
        }
    }

    /// Create a waypoint without a label
    #[must_use]
    pub const fn unlabeled(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            label: String::new(),
        }
    }

    /// Label if known, the coordinate text otherwise
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.label.is_empty() {
            self.coordinate.to_string()
        } else {
            self.label.clone()
        }
    }
}
