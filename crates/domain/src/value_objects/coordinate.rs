//! Geographic coordinate value object

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::DomainError;

/// A geographic coordinate in `(latitude, longitude)` order
///
/// Every coordinate inside the application uses this order. Providers that
/// speak GeoJSON (`[longitude, latitude]`) are converted at the adapter
/// boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    latitude: f64,
    /// Longitude in degrees (-180 to 180)
    longitude: f64,
}

impl Coordinate {
    /// Create a new coordinate with validation
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinates` if latitude is not in [-90, 90]
    /// or longitude is not in [-180, 180]
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::InvalidCoordinates {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Create a coordinate without validation (for constants)
    ///
    /// Caller must ensure latitude is in [-90, 90] and longitude in [-180, 180]
    #[must_use]
    pub const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Get the latitude
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Get the longitude
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// The coordinate as a `[latitude, longitude]` pair, the form map libraries consume
    #[must_use]
    pub const fn to_lat_lon(&self) -> [f64; 2] {
        [self.latitude, self.longitude]
    }

    /// Amsterdam city centre, the default map center
    #[must_use]
    pub const fn amsterdam() -> Self {
        Self::new_unchecked(52.373_374_7, 4.883_320_5)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// Parses raw coordinate text such as `"52.37, 4.88"`
///
/// Latitude comes first. Components may be separated by a comma, a
/// semicolon or whitespace.
impl FromStr for Coordinate {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s
            .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();

        let [lat, lon] = parts.as_slice() else {
            return Err(DomainError::invalid_input(format!(
                "expected 'latitude,longitude', got '{}'",
                s.trim()
            )));
        };

        let latitude = parse_component(lat, "latitude")?;
        let longitude = parse_component(lon, "longitude")?;

        Self::new(latitude, longitude)
            .map_err(|_| DomainError::invalid_input(format!("coordinates out of range: {}", s.trim())))
    }
}

fn parse_component(text: &str, name: &str) -> Result<f64, DomainError> {
    let value: f64 = text
        .parse()
        .map_err(|_| DomainError::invalid_input(format!("{name} '{text}' is not a number")))?;
    if !value.is_finite() {
        return Err(DomainError::invalid_input(format!(
            "{name} '{text}' is not a finite number"
        )));
    }
    Ok(value)
}
