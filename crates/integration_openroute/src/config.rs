//! openrouteservice configuration

use serde::{Deserialize, Serialize};

/// Configuration for the openrouteservice client
#[derive(Clone, Serialize, Deserialize)]
pub struct OpenRouteConfig {
    /// Base URL for the openrouteservice API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key, sent in the `Authorization` header (sensitive, never serialized)
    #[serde(default, skip_serializing)]
    pub api_key: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Ask the directions endpoint for turn-by-turn instructions
    #[serde(default = "default_include_instructions")]
    pub include_instructions: bool,
}

impl std::fmt::Debug for OpenRouteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenRouteConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .field("include_instructions", &self.include_instructions)
            .finish()
    }
}

fn default_base_url() -> String {
    "https://api.openrouteservice.org".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_include_instructions() -> bool {
    true
}

impl Default for OpenRouteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
            include_instructions: default_include_instructions(),
        }
    }
}

impl OpenRouteConfig {
    /// Default configuration with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Create a configuration suitable for testing against a mock server
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            api_key: "test-key".to_string(),
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Base URL without a trailing slash
    #[must_use]
    pub fn api_root(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        url::Url::parse(&self.base_url)
            .map_err(|e| format!("base_url '{}' is not a valid URL: {e}", self.base_url))?;

        if self.api_key.trim().is_empty() {
            return Err("api_key must be configured".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        Ok(())
    }
}
