use std::{fs, path::PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{
    bot_config::BotConfig, paths::ProjectPaths, server_config::ServerConfig,
    watcher_config::WatcherConfig,
};

#[derive(Debug)]
pub enum ConfigLoadError {
    NotFound,
    ParseError(String),
    IoError(String),
}

impl std::fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigLoadError::NotFound => write!(f, "Config file not found"),
            ConfigLoadError::ParseError(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigLoadError::IoError(msg) => write!(f, "IO error reading config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigLoadError {}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UltronConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub bot: BotConfig,

    #[serde(default)]
    pub watcher: WatcherConfig,
}

impl UltronConfig {
    pub fn config_path() -> PathBuf {
        let proj_paths = ProjectPaths::new("ultron").expect("Failed to determine config directory");
        proj_paths.config_dir().join("config.toml")
    }

    pub fn load() -> Result<Self, ConfigLoadError> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &PathBuf) -> Result<Self, ConfigLoadError> {
        if !path.exists() {
            return Err(ConfigLoadError::NotFound);
        }

        let content =
            fs::read_to_string(path).map_err(|e| ConfigLoadError::IoError(e.to_string()))?;
        let config =
            toml::from_str(&content).map_err(|e| ConfigLoadError::ParseError(e.to_string()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let path = Self::config_path();

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(&self)?;
        fs::write(&path, content)?;
        info!("Saved config to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = UltronConfig::default();
        assert_eq!(config.server.host, "localhost");
        assert_eq!(config.server.port, 25566);
        assert_eq!(config.bot.name, "IronManForever");
        assert_eq!(config.bot.home, [-4188.0, 59.0, 4259.0]);
        assert_eq!(config.watcher.poll_interval_secs, 2);
        assert_eq!(config.watcher.farm_timeout_secs, 300);
        assert_eq!(config.watcher.goto_timeout_secs, 300);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: UltronConfig = toml::from_str(
            r#"
            [bot]
            name = "TestBot"
            log_path = "/tmp/latest.log"
            "#,
        )
        .unwrap();
        assert_eq!(config.bot.name, "TestBot");
        assert_eq!(config.server.port, 25566);
        assert_eq!(config.bot.home, [-4188.0, 59.0, 4259.0]);
    }

    #[test]
    fn test_round_trip() {
        let config = UltronConfig::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: UltronConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.server.host, config.server.host);
        assert_eq!(parsed.bot.home, config.bot.home);
    }
}
