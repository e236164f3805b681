//! Configuration file support for kubedash

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::state::AuthStatus;

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub auth: AuthSettings,

    #[serde(default)]
    pub colors: Colors,

    #[serde(default)]
    pub behavior: Behavior,
}

/// Dashboard backend connection
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request socket timeout. Requests are never retried.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Login gate settings
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AuthSettings {
    /// Auth status at startup. Setting this to "ok" skips the login gate and
    /// is meant for local development only.
    #[serde(default)]
    pub initial_status: AuthStatus,

    /// Username pre-filled in the greeting when a token is given directly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_user: Option<String>,
}

/// Color settings
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Colors {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Behavior settings
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Behavior {
    #[serde(default = "default_true")]
    pub confirm_create: bool,

    #[serde(default = "default_true")]
    pub show_progress: bool,
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:5000/".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ServerSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            enabled: default_true(),
        }
    }
}

impl Default for Behavior {
    fn default() -> Self {
        Self {
            confirm_create: default_true(),
            show_progress: default_true(),
        }
    }
}

impl Settings {
    /// Load settings from the first config file found, or defaults when
    /// there is none. A file that exists but cannot be read is an error.
    pub fn try_load() -> Result<Self> {
        Self::load_optional(Self::find_config_file().as_deref())
    }

    /// Settings from `path`, or defaults when there is no file
    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let settings = Self::load_from_file(path)?;
                tracing::debug!("loaded settings from {}", path.display());
                Ok(settings)
            }
            None => Ok(Self::default()),
        }
    }

    /// Defaults in place of a broken config file. The error is handed back
    /// so it can be reported once logging is up.
    pub fn load_or_default() -> (Self, Option<anyhow::Error>) {
        Self::load_or_default_from(Self::find_config_file().as_deref())
    }

    pub fn load_or_default_from(path: Option<&Path>) -> (Self, Option<anyhow::Error>) {
        match Self::load_optional(path) {
            Ok(settings) => (settings, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Load settings from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(settings)
    }

    /// Find config file in standard locations
    /// Priority:
    /// 1. .kubedash.toml in current directory
    /// 2. ~/.config/kubedash/config.toml (XDG config directory)
    pub fn find_config_file() -> Option<PathBuf> {
        let local_config = PathBuf::from(".kubedash.toml");
        if local_config.exists() {
            return Some(local_config);
        }

        Self::user_config_path().filter(|p| p.exists())
    }

    /// `<config_dir>/kubedash/config.toml`
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("kubedash").join("config.toml"))
    }

    /// Save settings to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Generate example config file content
    pub fn example_config() -> String {
        r#"# kubedash configuration file
# Place this file at ~/.config/kubedash/config.toml or .kubedash.toml in your project

[server]
base_url = "http://localhost:5000/"
timeout_secs = 30

[auth]
# Auth status at startup: "pending", "ok" or "failed".
# "ok" skips the login gate; use it only against a local development backend.
initial_status = "pending"
# default_user = "admin"

[colors]
enabled = true

[behavior]
# Ask before sending a create-deployment request
confirm_create = true
show_progress = true
"#
        .to_string()
    }
}
