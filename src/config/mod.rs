mod ai_config;
mod server_config;

pub use ai_config::{AIConfig, PartialAIConfig};
pub use server_config::{PartialServerConfig, ServerConfig};

use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::errors::ConfigError;

const CONFIG_FILE_NAME: &str = "config.toml";

/// Application configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub ai: AIConfig,
    pub server: ServerConfig,
}

/// Partial application configuration as read from the TOML file
#[derive(Deserialize, Debug, Default)]
pub struct PartialAppConfig {
    pub ai: Option<PartialAIConfig>,
    pub server: Option<PartialServerConfig>,
}

impl AppConfig {
    /// Load configuration from the user config file (if present) with
    /// environment variable overrides.
    ///
    /// The AI API key is read here, once, at startup. A missing key does not
    /// fail the load; unauthenticated model calls fail at invocation time.
    pub fn load() -> Result<Self, ConfigError> {
        let file_config = Self::load_config_file()?;
        let env_map: HashMap<String, String> = std::env::vars().collect();
        Self::from_sources(file_config, &env_map)
    }

    /// Assemble the configuration from an optional file config and an
    /// environment map. Split out from `load` so tests can inject both.
    pub fn from_sources(
        file_config: Option<PartialAppConfig>,
        env_map: &HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        let (file_ai, file_server) = match file_config {
            Some(partial) => (partial.ai, partial.server),
            None => (None, None),
        };

        Ok(AppConfig {
            ai: AIConfig::from_env_or_file(file_ai, env_map)?,
            server: ServerConfig::from_env_or_file(file_server, env_map)?,
        })
    }

    fn user_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("revai").join(CONFIG_FILE_NAME))
    }

    fn load_config_file() -> Result<Option<PartialAppConfig>, ConfigError> {
        match Self::user_config_path() {
            Some(path) if path.exists() => Self::read_config_file(&path).map(Some),
            _ => Ok(None),
        }
    }

    /// Read and parse a single TOML config file.
    fn read_config_file(path: &std::path::Path) -> Result<PartialAppConfig, ConfigError> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(display.clone(), e))?;
        toml::from_str(&content).map_err(|e| ConfigError::TomlParse(display, e))
    }
}
