use serde::Serialize;

use obby_core::level::{Difficulty, LevelDescription};

use crate::config::GeneratorConfig;
use crate::prompt::{system_instruction, user_prompt};
use crate::{GenerateError, LevelGenerator, validate_level, validate_theme};

const RESPONSE_MIME_TYPE: &str = "application/json";

/// Request body sent to the level service.
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    system_instruction: String,
    prompt: String,
    difficulty: Difficulty,
    temperature: f32,
    response_mime_type: &'a str,
}

/// Generates levels by POSTing a prompt to a configured JSON endpoint.
pub struct HttpLevelGenerator {
    config: GeneratorConfig,
    client: reqwest::Client,
}

impl HttpLevelGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self, GenerateError> {
        if !config.is_remote_enabled() {
            return Err(GenerateError::Config("no endpoint configured".to_string()));
        }
        let client = reqwest::Client::builder()
            .user_agent("obby-levelgen/0.1")
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GenerateError::Http(e.to_string()))?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    fn request_body(&self, theme: &str, difficulty: Difficulty) -> GenerateRequest<'_> {
        GenerateRequest {
            model: &self.config.model,
            system_instruction: system_instruction(theme, difficulty),
            prompt: user_prompt(theme),
            difficulty,
            temperature: self.config.temperature,
            response_mime_type: RESPONSE_MIME_TYPE,
        }
    }
}

impl LevelGenerator for HttpLevelGenerator {
    async fn generate(
        &self,
        theme: &str,
        difficulty: Difficulty,
    ) -> Result<LevelDescription, GenerateError> {
        let theme = validate_theme(theme)?;
        let body = self.request_body(theme, difficulty);

        let mut request = self.client.post(&self.config.endpoint).json(&body);
        if !self.config.api_key.is_empty() {
            request = request.bearer_auth(&self.config.api_key);
        }
        let resp = request
            .send()
            .await
            .map_err(|e| GenerateError::Http(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(GenerateError::Status(resp.status().as_u16()));
        }

        let text = resp
            .text()
            .await
            .map_err(|e| GenerateError::Http(e.to_string()))?;
        parse_level_response(&text)
    }
}

/// Decode a service response: either a level description, or an object carrying one
/// under `"text"` (as a JSON string or inline).
pub fn parse_level_response(body: &str) -> Result<LevelDescription, GenerateError> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    let level = match value.get("text") {
        Some(serde_json::Value::String(inner)) => LevelDescription::from_json(inner)?,
        Some(inner) => serde_json::from_value(inner.clone())?,
        None => serde_json::from_value(value)?,
    };
    validate_level(level)
}
