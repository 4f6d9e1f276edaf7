use serde::Deserialize;
use std::collections::HashMap;

use crate::errors::ConfigError;

/// AI provider configuration
#[derive(Deserialize, Debug, Clone)]
pub struct AIConfig {
    pub api_url: String,
    pub model_name: String,
    /// Sampling temperature. Kept near zero to minimize output variance and
    /// schema drift.
    pub temperature: f32,
    pub api_key: Option<String>,
}

impl Default for AIConfig {
    fn default() -> Self {
        Self {
            api_url: default_ai_api_url(),
            model_name: default_ai_model_name(),
            temperature: default_ai_temperature(),
            api_key: None,
        }
    }
}

/// Partial AI configuration for loading from files
#[derive(Deserialize, Debug, Default)]
pub struct PartialAIConfig {
    pub api_url: Option<String>,
    pub model_name: Option<String>,
    pub temperature: Option<f32>,
    pub api_key: Option<String>,
}

impl AIConfig {
    /// Create AIConfig from environment variables and file config
    pub fn from_env_or_file(
        file_ai_config: Option<PartialAIConfig>,
        env_map: &HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        // Get values from environment with fallback to file config
        let api_url = env_map
            .get("REVAI_AI_API_URL")
            .cloned()
            .or_else(|| file_ai_config.as_ref().and_then(|c| c.api_url.clone()))
            .unwrap_or_else(default_ai_api_url);

        let model_name = env_map
            .get("REVAI_AI_MODEL")
            .cloned()
            .or_else(|| file_ai_config.as_ref().and_then(|c| c.model_name.clone()))
            .unwrap_or_else(default_ai_model_name);

        let temperature = env_map
            .get("REVAI_AI_TEMPERATURE")
            .and_then(|s| s.parse().ok())
            .or_else(|| file_ai_config.as_ref().and_then(|c| c.temperature))
            .unwrap_or_else(default_ai_temperature);

        let api_key = env_map
            .get("REVAI_AI_API_KEY")
            .cloned()
            .or_else(|| file_ai_config.as_ref().and_then(|c| c.api_key.clone()));

        Ok(AIConfig {
            api_url,
            model_name,
            temperature,
            api_key,
        })
    }
}

// Default functions
fn default_ai_api_url() -> String {
    "http://localhost:11434/v1/chat/completions".to_string()
}

fn default_ai_model_name() -> String {
    "qwen2.5-coder:32b".to_string()
}

fn default_ai_temperature() -> f32 {
    0.1
}
