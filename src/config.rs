//! Application configuration.

use crate::chat::client::DEFAULT_MODEL;
use crate::{AuraError, Result};

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Name fragment of the preferred synthesis voice.
pub const DEFAULT_PREFERRED_VOICE: &str = "Google US English";

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Gemini API key
    pub api_key: String,

    /// Model identifier
    pub model: String,

    /// Preferred synthesis voice name (falls back to en-US, then default)
    pub preferred_voice: String,

    /// Capacity of the command/event channels
    pub channel_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            preferred_voice: DEFAULT_PREFERRED_VOICE.to_string(),
            channel_capacity: 100,
        }
    }
}

impl AppConfig {
    /// Build the configuration from the environment.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| {
            AuraError::ConfigError(format!("{API_KEY_ENV} environment variable is not set"))
        })?;

        let config = Self {
            api_key,
            ..Default::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_preferred_voice(mut self, voice: impl Into<String>) -> Self {
        self.preferred_voice = voice.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(AuraError::ConfigError("API key is required".into()));
        }
        if self.model.trim().is_empty() {
            return Err(AuraError::ConfigError("Model id is required".into()));
        }
        Ok(())
    }

    /// Configuration for tests; never touches the network.
    pub fn for_tests() -> Self {
        Self {
            api_key: "test-key".to_string(),
            ..Default::default()
        }
    }
}
