//! Provider, map and location configuration sections

use application::{DEFAULT_ATTRIBUTION, DEFAULT_TILE_URL, DEFAULT_ZOOM, MapSettings};
use domain::Coordinate;
use integration_openroute::OpenRouteConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::default_true;

/// Geographic location configuration (latitude/longitude pair)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocationConfig {
    /// Latitude (-90.0 to 90.0)
    pub latitude: f64,
    /// Longitude (-180.0 to 180.0)
    pub longitude: f64,
}

impl GeoLocationConfig {
    /// Convert to the domain `Coordinate` value object
    ///
    /// Returns `None` if coordinates are invalid.
    #[must_use]
    pub fn to_coordinate(&self) -> Option<Coordinate> {
        Coordinate::new(self.latitude, self.longitude).ok()
    }
}

impl From<Coordinate> for GeoLocationConfig {
    fn from(coordinate: Coordinate) -> Self {
        Self {
            latitude: coordinate.latitude(),
            longitude: coordinate.longitude(),
        }
    }
}

// ==============================
// openrouteservice Configuration
// ==============================

/// openrouteservice connection settings
#[derive(Clone, Serialize, Deserialize)]
pub struct OpenRouteAppConfig {
    /// API base URL
    #[serde(default = "default_openroute_base_url")]
    pub base_url: String,

    /// API key (sensitive - uses `SecretString`, never serialized)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_openroute_timeout")]
    pub timeout_secs: u64,

    /// Request turn-by-turn instructions (default: true)
    #[serde(default = "default_true")]
    pub include_instructions: bool,
}

impl std::fmt::Debug for OpenRouteAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenRouteAppConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("include_instructions", &self.include_instructions)
            .finish()
    }
}

pub(super) fn default_openroute_base_url() -> String {
    "https://api.openrouteservice.org".to_string()
}

const fn default_openroute_timeout() -> u64 {
    10
}

impl Default for OpenRouteAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_openroute_base_url(),
            api_key: None,
            timeout_secs: default_openroute_timeout(),
            include_instructions: true,
        }
    }
}

impl OpenRouteAppConfig {
    /// Convert to `integration_openroute`'s `OpenRouteConfig`
    ///
    /// A missing key becomes an empty one, which the client rejects.
    #[must_use]
    pub fn to_openroute_config(&self) -> OpenRouteConfig {
        OpenRouteConfig {
            base_url: self.base_url.clone(),
            api_key: self
                .api_key
                .as_ref()
                .map(|key| key.expose_secret().to_string())
                .unwrap_or_default(),
            timeout_secs: self.timeout_secs,
            include_instructions: self.include_instructions,
        }
    }

    /// Whether a non-empty API key is configured
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().trim().is_empty())
    }
}

// ==============================
// Map Configuration
// ==============================

/// Base map settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapAppConfig {
    /// Tile URL template
    #[serde(default = "default_tile_url")]
    pub tile_url: String,

    /// Tile attribution
    #[serde(default = "default_attribution")]
    pub attribution: String,

    /// Initial map center
    #[serde(default = "default_center")]
    pub center: GeoLocationConfig,

    /// Initial zoom level (default: 13)
    #[serde(default = "default_zoom")]
    pub zoom: u8,
}

fn default_tile_url() -> String {
    DEFAULT_TILE_URL.to_string()
}

fn default_attribution() -> String {
    DEFAULT_ATTRIBUTION.to_string()
}

fn default_center() -> GeoLocationConfig {
    Coordinate::amsterdam().into()
}

const fn default_zoom() -> u8 {
    DEFAULT_ZOOM
}

impl Default for MapAppConfig {
    fn default() -> Self {
        Self {
            tile_url: default_tile_url(),
            attribution: default_attribution(),
            center: default_center(),
            zoom: default_zoom(),
        }
    }
}

impl MapAppConfig {
    /// Convert to the application's `MapSettings`
    ///
    /// An invalid center falls back to the default one.
    #[must_use]
    pub fn to_map_settings(&self) -> MapSettings {
        MapSettings {
            tile_url: self.tile_url.clone(),
            attribution: self.attribution.clone(),
            center: self
                .center
                .to_coordinate()
                .unwrap_or_else(Coordinate::amsterdam),
            zoom: self.zoom,
        }
    }
}

// ==============================
// Location Configuration
// ==============================

/// Host location settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationAppConfig {
    /// Fixed position reported as the device location (optional)
    #[serde(default)]
    pub fixed: Option<GeoLocationConfig>,

    /// Location lookup timeout in seconds (default: 10)
    #[serde(default = "default_location_timeout")]
    pub timeout_secs: u64,
}

const fn default_location_timeout() -> u64 {
    10
}

impl Default for LocationAppConfig {
    fn default() -> Self {
        Self {
            fixed: None,
            timeout_secs: default_location_timeout(),
        }
    }
}
