//! Provider configuration.

use serde::Deserialize;
use tracing::debug;
use vidya_error::ConfigError;

const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Settings for the Gemini client.
///
/// Loaded from an optional `vidya.toml` in the working directory, with
/// `VIDYA_*` environment overrides (`VIDYA_MODEL`, `VIDYA_API_KEY`, ...).
/// When no key is configured either way, `GEMINI_API_KEY` is consulted
/// as a fallback.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Provider API key
    pub api_key: String,
    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Sampling temperature
    #[serde(default)]
    pub temperature: Option<f32>,
    /// Output token cap
    #[serde(default)]
    pub max_output_tokens: Option<u32>,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl ModelConfig {
    /// Loads configuration from `vidya.toml` and the environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the configuration sources cannot be
    /// read or no API key is present anywhere.
    pub fn load() -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("vidya").required(false))
            .add_source(config::Environment::with_prefix("VIDYA"))
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to read configuration: {}", e)))?;

        let api_key = settings
            .get_string("api_key")
            .ok()
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .ok_or_else(|| {
                ConfigError::new(
                    "No API key configured: set VIDYA_API_KEY or GEMINI_API_KEY",
                )
            })?;

        let model = settings
            .get_string("model")
            .unwrap_or_else(|_| default_model());
        let base_url = settings
            .get_string("base_url")
            .unwrap_or_else(|_| default_base_url());
        let temperature = settings.get_float("temperature").ok().map(|t| t as f32);
        let max_output_tokens = settings
            .get_int("max_output_tokens")
            .ok()
            .map(|t| t as u32);

        debug!(model = %model, base_url = %base_url, "Loaded model configuration");

        Ok(Self {
            api_key,
            model,
            base_url,
            temperature,
            max_output_tokens,
        })
    }

    /// Builds a configuration directly, for tests and embedding callers.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: default_model(),
            base_url: default_base_url(),
            temperature: None,
            max_output_tokens: None,
        }
    }
}
