use serde::Deserialize;
use std::collections::HashMap;

use crate::errors::ConfigError;

/// HTTP boundary configuration
#[derive(Deserialize, Debug, Clone)]
pub struct ServerConfig {
    pub listen_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

/// Partial server configuration for loading from files
#[derive(Deserialize, Debug, Default)]
pub struct PartialServerConfig {
    pub listen_addr: Option<String>,
}

impl ServerConfig {
    pub fn from_env_or_file(
        file_server_config: Option<PartialServerConfig>,
        env_map: &HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        let listen_addr = env_map
            .get("REVAI_LISTEN_ADDR")
            .cloned()
            .or_else(|| {
                file_server_config
                    .as_ref()
                    .and_then(|c| c.listen_addr.clone())
            })
            .unwrap_or_else(default_listen_addr);

        Ok(ServerConfig { listen_addr })
    }
}

fn default_listen_addr() -> String {
    "127.0.0.1:8000".to_string()
}
