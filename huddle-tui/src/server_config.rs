use crate::api::DEFAULT_SERVER_URL;
use crate::config::{ConfigManager, ServerConfig};
use anyhow::Result;

/// Environment variable naming the dashboard server
pub const SERVER_URL_ENV: &str = "HUDDLE_SERVER_URL";

/// Server configuration utility for managing server URL settings
pub struct ServerConfigManager {
    config_manager: ConfigManager,
}

impl ServerConfigManager {
    pub fn new(config_manager: ConfigManager) -> Self {
        Self { config_manager }
    }

    /// Determine the server URL to use based on priority:
    /// 1. CLI argument
    /// 2. `HUDDLE_SERVER_URL`
    /// 3. Saved configuration file
    /// 4. Local development default
    pub fn determine_server_url(&self, cli_override: Option<String>) -> Result<String> {
        if let Some(url) = cli_override {
            return Ok(url);
        }

        if let Ok(url) = std::env::var(SERVER_URL_ENV) {
            return Ok(url);
        }

        if let Some(config) = self.config_manager.load_server_config()? {
            return Ok(config.server_url);
        }

        Ok(DEFAULT_SERVER_URL.to_string())
    }

    /// Remember the server URL for the next run
    pub fn save_server_url(&self, server_url: String) -> Result<()> {
        let config = ServerConfig {
            server_url,
            last_updated: chrono::Utc::now(),
        };
        self.config_manager.save_server_config(&config)
    }
}
