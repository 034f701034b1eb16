use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserdeskConfig {
    /// Base URL of the users API, e.g. "http://localhost:8000/api"
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_api_url() -> String {
    userdesk::DEFAULT_API_URL.to_string()
}

impl Default for UserdeskConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
        }
    }
}

impl UserdeskConfig {
    fn config_dir() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join("userdesk"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("userdesk.log"))
    }

    /// Load config from disk. Returns default config if file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("Failed to parse config at {}", path.display()))
    }

    fn parse(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(&path, raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_default_api_url() {
        assert_eq!(UserdeskConfig::parse("").unwrap(), UserdeskConfig::default());
        assert_eq!(
            UserdeskConfig::default().api_url,
            "http://localhost:8000/api"
        );
    }

    #[test]
    fn api_url_is_read_from_file() {
        let config = UserdeskConfig::parse("api_url = \"https://users.internal/api\"\n").unwrap();
        assert_eq!(config.api_url, "https://users.internal/api");
    }
}
