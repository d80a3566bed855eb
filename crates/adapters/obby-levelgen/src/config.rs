use serde::{Deserialize, Serialize};

use crate::prompt::TEMPERATURE;

pub const API_KEY_ENV: &str = "OBBY_LEVELGEN_API_KEY";
pub const ENDPOINT_ENV: &str = "OBBY_LEVELGEN_ENDPOINT";
pub const MODEL_ENV: &str = "OBBY_LEVELGEN_MODEL";

/// Settings for the remote level service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// URL the generation request is POSTed to. Empty disables remote generation.
    pub endpoint: String,
    pub model: String,
    /// Bearer token. Only ever read from the environment.
    #[serde(skip)]
    pub api_key: String,
    pub timeout_secs: u64,
    pub temperature: f32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            model: "gemini-2.5-flash".to_string(),
            api_key: String::new(),
            timeout_secs: 60,
            temperature: TEMPERATURE,
        }
    }
}

impl GeneratorConfig {
    /// Defaults with environment variable overrides applied.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV)
            && !endpoint.is_empty()
        {
            self.endpoint = endpoint;
        }
        if let Ok(model) = std::env::var(MODEL_ENV)
            && !model.is_empty()
        {
            self.model = model;
        }
        if let Ok(key) = std::env::var(API_KEY_ENV)
            && !key.is_empty()
        {
            self.api_key = key;
        }
        self
    }

    pub fn is_remote_enabled(&self) -> bool {
        !self.endpoint.is_empty()
    }
}
