use anyhow::{Context, Result};
use huddle_types::Theme;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Client preferences kept on disk between runs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub theme: Option<Theme>,
}

/// Server configuration stored locally
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub server_url: String,
    pub last_updated: chrono::DateTime<chrono::Utc>,
}

/// Configuration manager for the .huddle directory
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Config manager rooted at `~/.huddle`
    pub fn new() -> Result<Self> {
        let home_dir = dirs::home_dir().context("Could not determine home directory")?;
        Self::with_dir(home_dir.join(".huddle"))
    }

    /// Config manager rooted at an explicit directory, created if missing
    pub fn with_dir(config_dir: impl Into<PathBuf>) -> Result<Self> {
        let config_dir = config_dir.into();
        if !config_dir.exists() {
            fs::create_dir_all(&config_dir).context("Failed to create .huddle directory")?;
        }
        Ok(Self { config_dir })
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    fn preferences_file(&self) -> PathBuf {
        self.config_dir.join("preferences.json")
    }

    fn server_config_file(&self) -> PathBuf {
        self.config_dir.join("server_config.json")
    }

    pub fn save_preferences(&self, prefs: &Preferences) -> Result<()> {
        let json = serde_json::to_string_pretty(prefs).context("Failed to serialize preferences")?;
        fs::write(self.preferences_file(), json).context("Failed to write preferences file")?;
        Ok(())
    }

    pub fn load_preferences(&self) -> Result<Option<Preferences>> {
        let prefs_file = self.preferences_file();
        if !prefs_file.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&prefs_file).context("Failed to read preferences file")?;
        let prefs: Preferences = serde_json::from_str(&json).context("Failed to parse preferences")?;
        Ok(Some(prefs))
    }

    /// Locally saved theme, if any
    pub fn saved_theme(&self) -> Option<Theme> {
        match self.load_preferences() {
            Ok(prefs) => prefs.and_then(|p| p.theme),
            Err(e) => {
                log::warn!("Ignoring unreadable preferences: {}", e);
                None
            }
        }
    }

    pub fn save_theme(&self, theme: Theme) -> Result<()> {
        let mut prefs = self.load_preferences().ok().flatten().unwrap_or_default();
        prefs.theme = Some(theme);
        self.save_preferences(&prefs)
    }

    pub fn save_server_config(&self, config: &ServerConfig) -> Result<()> {
        let json = serde_json::to_string_pretty(config).context("Failed to serialize server config")?;
        fs::write(self.server_config_file(), json).context("Failed to write server config file")?;
        Ok(())
    }

    pub fn load_server_config(&self) -> Result<Option<ServerConfig>> {
        let config_file = self.server_config_file();
        if !config_file.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&config_file).context("Failed to read server config file")?;
        let config: ServerConfig = serde_json::from_str(&json).context("Failed to parse server config")?;
        Ok(Some(config))
    }
}
