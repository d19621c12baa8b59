// ABOUTME: Configuration file loading and option resolution for the sigkey CLI.
// ABOUTME: Precedence is flag > environment > ~/.config/sigkey/config.toml > default.

use anyhow::{Context, Result};
use serde::Deserialize;
use sigkey_github::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Operation deadline when neither flag nor config sets one.
pub const DEFAULT_DEADLINE_SECS: u64 = 60;

/// Contents of config.toml. Every key is optional.
#[derive(Deserialize, Default, Clone, PartialEq, Eq)]
pub struct FileConfig {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    /// Per-request HTTP timeout.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    /// Deadline for a whole command.
    #[serde(default)]
    pub deadline_secs: Option<u64>,
}

impl std::fmt::Debug for FileConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("deadline_secs", &self.deadline_secs)
            .finish()
    }
}

impl FileConfig {
    /// Returns the config directory path (~/.config/sigkey)
    pub fn config_dir() -> Result<PathBuf> {
        sigkey_log::config_dir().context("Could not determine home directory")
    }

    /// Returns the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load the default config file; a missing or unreadable file yields defaults.
    pub fn load() -> Self {
        Self::config_path()
            .ok()
            .filter(|p| p.exists())
            .and_then(|p| match Self::load_from(&p) {
                Ok(config) => Some(config),
                Err(e) => {
                    tracing::warn!(path = %p.display(), error = %e, "ignoring unreadable config file");
                    None
                }
            })
            .unwrap_or_default()
    }

    /// Load a specific config file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content).context("Failed to parse config")
    }
}

/// Fully resolved settings for one command.
#[derive(Debug, Clone)]
pub struct Settings {
    pub client: ClientConfig,
    pub deadline: Duration,
}

impl Settings {
    /// Merge command-line values (already merged with env by clap) over the file config.
    pub fn resolve(
        base_url: Option<String>,
        token: Option<String>,
        deadline_secs: Option<u64>,
        file: FileConfig,
    ) -> Self {
        let base_url = base_url
            .or(file.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let request_timeout = file
            .request_timeout_secs
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        // A zero deadline would cancel every command before it starts
        let deadline = deadline_secs
            .or(file.deadline_secs)
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_DEADLINE_SECS);

        let mut client = ClientConfig::new(base_url).with_timeout_secs(request_timeout);
        if let Some(token) = token.or(file.token).filter(|t| !t.trim().is_empty()) {
            client = client.with_token(token);
        }

        Self {
            client,
            deadline: Duration::from_secs(deadline),
        }
    }
}
