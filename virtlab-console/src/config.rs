//! Console configuration
//!
//! Handles:
//! - Node service endpoint
//! - Polling cadence
//! - Cross-platform storage

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Environment override for the config file location, mainly for tests.
const CONFIG_PATH_ENV: &str = "VIRTLAB_CONSOLE_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    pub api: ApiConfig,
    pub poll: PollConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    pub interval_secs: u64,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://127.0.0.1:8000".to_string(),
            },
            poll: PollConfig { interval_secs: 5 },
        }
    }
}

impl ConsoleConfig {
    /// Load config from the OS-specific location, falling back to defaults
    /// when no file exists yet.
    pub async fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if config_path.exists() {
            let content = tokio::fs::read_to_string(&config_path)
                .await
                .with_context(|| format!("reading {}", config_path.display()))?;
            let config: ConsoleConfig = toml::from_str(&content)
                .with_context(|| format!("parsing {}", config_path.display()))?;
            Ok(config)
        } else {
            // First time setup - return default config
            Ok(Self::default())
        }
    }

    /// Save config to the OS-specific location.
    pub async fn save(&self) -> Result<()> {
        let config_path = Self::config_file_path()?;

        if let Some(parent) = config_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let content = toml::to_string_pretty(self)?;
        tokio::fs::write(&config_path, content)
            .await
            .with_context(|| format!("writing {}", config_path.display()))?;

        Ok(())
    }

    /// Get OS-specific config file path, honouring the env override.
    pub fn config_file_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let mut path = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;

        path.push("virtlab-console");
        path.push("config.toml");
        Ok(path)
    }

    /// Check if this is first-time setup
    pub fn is_first_time_setup() -> bool {
        Self::config_file_path()
            .map(|p| !p.exists())
            .unwrap_or(true)
    }

    /// Polling cadence as a duration. Zero is clamped to one second so the
    /// interval timer always has a positive period.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll.interval_secs.max(1))
    }
}
