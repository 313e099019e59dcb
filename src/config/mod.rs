//! Configuration management for muse

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub chat: ChatConfig,
    pub puter: PuterConfig,
    pub mock: MockConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Backend used when the CLI does not name one ("puter" or "mock")
    pub default_backend: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            default_backend: "mock".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PuterConfig {
    pub base_url: String,
    pub model: String,
    /// Bearer token; `PUTER_API_TOKEN` overrides this
    pub api_token: Option<String>,
}

impl Default for PuterConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.puter.com".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_token: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MockConfig {
    /// Sleep for realistic per-operation delays, like the hosted service
    pub simulate_latency: bool,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            simulate_latency: false,
        }
    }
}

impl Config {
    /// Load configuration from the default location, or defaults if absent
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "muse") {
            let config_dir = proj_dirs.config_dir();
            std::fs::create_dir_all(config_dir)?;
            Ok(config_dir.join("config.toml"))
        } else {
            Ok(PathBuf::from("config.toml"))
        }
    }

    /// Save configuration to default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.chat.default_backend, "mock");
        assert_eq!(config.puter.base_url, "https://api.puter.com");
        assert!(!config.mock.simulate_latency);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [chat]
            default_backend = "puter"

            [puter]
            model = "gpt-4o"
            "#,
        )
        .unwrap();
        assert_eq!(config.chat.default_backend, "puter");
        assert_eq!(config.puter.model, "gpt-4o");
        assert_eq!(config.puter.base_url, "https://api.puter.com");
    }

    #[test]
    fn test_load_written_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        config.chat.default_backend = "puter".to_string();
        std::fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let loaded: Config = toml::from_str(&content).unwrap();
        assert_eq!(loaded.chat.default_backend, "puter");
    }

    #[test]
    fn test_round_trip() {
        let mut config = Config::default();
        config.mock.simulate_latency = true;
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert!(parsed.mock.simulate_latency);
    }
}
