//! Route result entity
//!
//! Display-ready output of a routing request. Distances are kilometers,
//! durations are whole minutes rounded up; there is no hours component.

use serde::{Deserialize, Serialize};

use crate::value_objects::Coordinate;

/// Convert a provider distance in meters to kilometers
#[must_use]
pub fn meters_to_km(meters: f64) -> f64 {
    meters.max(0.0) / 1000.0
}

/// Convert a provider duration in seconds to whole minutes, rounding up
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped to [0, u32::MAX]
pub fn seconds_to_minutes(seconds: f64) -> u32 {
    let minutes = (seconds.max(0.0) / 60.0).ceil();
    minutes.min(f64::from(u32::MAX)) as u32
}

/// Format a kilometer value with two decimals, e.g. `"49.50 km"`
#[must_use]
pub fn format_distance_km(km: f64) -> String {
    format!("{km:.2} km")
}

/// Format a minute value, e.g. `"41 min"`
#[must_use]
pub fn format_duration_minutes(minutes: u32) -> String {
    format!("{minutes} min")
}

/// A single step of a route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// Free-text direction, e.g. "Turn left onto Damrak"
    pub text: String,
    /// Distance covered by this step in kilometers
    pub distance_km: f64,
}

impl Instruction {
    /// Create a new instruction
    pub fn new(text: impl Into<String>, distance_km: f64) -> Self {
        Self {
            text: text.into(),
            distance_km: distance_km.max(0.0),
        }
    }

    /// Distance label for the directions panel
    #[must_use]
    pub fn distance_label(&self) -> String {
        format_distance_km(self.distance_km)
    }
}

/// Result of a successful routing request
///
/// Replaced wholesale when a new request completes; never updated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    /// Path geometry in travel order
    pub path: Vec<Coordinate>,
    /// Total distance in kilometers
    pub distance_km: f64,
    /// Total duration in minutes
    pub duration_minutes: u32,
    /// Turn-by-turn instructions in traversal order
    pub instructions: Vec<Instruction>,
}

impl RouteResult {
    /// Create a new route result
    #[must_use]
    pub fn new(
        path: Vec<Coordinate>,
        distance_km: f64,
        duration_minutes: u32,
        instructions: Vec<Instruction>,
    ) -> Self {
        Self {
            path,
            distance_km: distance_km.max(0.0),
            duration_minutes,
            instructions,
        }
    }

    /// Distance label, e.g. `"49.50 km"`
    #[must_use]
    pub fn distance_label(&self) -> String {
        format_distance_km(self.distance_km)
    }

    /// Duration label, e.g. `"41 min"`
    #[must_use]
    pub fn duration_label(&self) -> String {
        format_duration_minutes(self.duration_minutes)
    }

    /// Bounding box of the path, for fitting the map viewport
    #[must_use]
    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(&self.path)
    }
}

/// Axis-aligned bounding box in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Minimum latitude
    pub south: f64,
    /// Minimum longitude
    pub west: f64,
    /// Maximum latitude
    pub north: f64,
    /// Maximum longitude
    pub east: f64,
}

impl BoundingBox {
    /// Smallest box containing all points, `None` for an empty slice
    #[must_use]
    pub fn from_points(points: &[Coordinate]) -> Option<Self> {
        let first = points.first()?;
        let init = Self {
            south: first.latitude(),
            west: first.longitude(),
            north: first.latitude(),
            east: first.longitude(),
        };

        Some(points.iter().skip(1).fold(init, |bbox, p| Self {
            south: bbox.south.min(p.latitude()),
            west: bbox.west.min(p.longitude()),
            north: bbox.north.max(p.latitude()),
            east: bbox.east.max(p.longitude()),
        }))
    }

    /// Corners as `[[south, west], [north, east]]`, the form Leaflet's `fitBounds` takes
    #[must_use]
    pub const fn corners(&self) -> [[f64; 2]; 2] {
        [[self.south, self.west], [self.north, self.east]]
    }

    /// Center of the box
    #[must_use]
    pub fn center(&self) -> Coordinate {
        Coordinate::new_unchecked(
            (self.south + self.north) / 2.0,
            (self.west + self.east) / 2.0,
        )
    }
}
