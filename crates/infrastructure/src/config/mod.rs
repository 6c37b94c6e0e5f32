//! Application configuration
//!
//! Split into focused sections:
//! - `openroute`: provider endpoint, credential, timeouts
//! - `map`: tile layer and initial view
//! - `location`: host location source
//!
//! Values are layered: built-in defaults, then an optional `mapviewer.toml`
//! (or an explicit file), then `MAPVIEWER__*` environment variables.

mod integrations;

use std::path::Path;

use application::PlannerConfig;
use domain::TravelMode;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::telemetry::LogFormat;

pub use integrations::{GeoLocationConfig, LocationAppConfig, MapAppConfig, OpenRouteAppConfig};

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Environment variable prefix
pub const ENV_PREFIX: &str = "MAPVIEWER";

/// Default config file name (without extension)
pub const DEFAULT_CONFIG_FILE: &str = "mapviewer";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// openrouteservice settings
    #[serde(default)]
    pub openroute: OpenRouteAppConfig,

    /// Base map settings
    #[serde(default)]
    pub map: MapAppConfig,

    /// Host location settings
    #[serde(default)]
    pub location: LocationAppConfig,

    /// Travel mode a session starts with
    #[serde(default)]
    pub default_mode: TravelMode,

    /// Log output format
    #[serde(default)]
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load configuration from defaults, an optional file and the environment
    ///
    /// With `path` set the file must exist; otherwise `mapviewer.toml` in the
    /// working directory is read if present.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or values have the wrong type.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let builder = config::Config::builder()
            // Start with defaults
            .set_default("openroute.base_url", integrations::default_openroute_base_url())?
            // Load from file if exists
            .add_source(file)
            // Override with environment variables (e.g., MAPVIEWER__OPENROUTE__API_KEY)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Replace the API key (e.g. from a command-line flag)
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.openroute.api_key = Some(SecretString::from(api_key.into()));
        self
    }

    /// Settings for the route planner
    #[must_use]
    pub const fn planner_config(&self) -> PlannerConfig {
        PlannerConfig {
            default_mode: self.default_mode,
            location_timeout_secs: self.location.timeout_secs,
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns the first problem found, described for the operator.
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if !self.openroute.has_api_key() {
            return Err(config::ConfigError::Message(format!(
                "openroute.api_key is not set (use {ENV_PREFIX}__OPENROUTE__API_KEY or --api-key)"
            )));
        }

        self.openroute
            .to_openroute_config()
            .validate()
            .map_err(|e| config::ConfigError::Message(format!("openroute: {e}")))?;

        if self.map.center.to_coordinate().is_none() {
            return Err(config::ConfigError::Message(format!(
                "map.center ({}, {}) is not a valid coordinate",
                self.map.center.latitude, self.map.center.longitude
            )));
        }

        if let Some(fixed) = self.location.fixed {
            if fixed.to_coordinate().is_none() {
                return Err(config::ConfigError::Message(format!(
                    "location.fixed ({}, {}) is not a valid coordinate",
                    fixed.latitude, fixed.longitude
                )));
            }
        }

        if self.location.timeout_secs == 0 {
            return Err(config::ConfigError::Message(
                "location.timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
