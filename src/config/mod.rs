//! Configuration management for ssodash

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::client::DEFAULT_BASE_URL;
use crate::error::{ConfigError, Result};
use crate::session::Credential;

/// Origin used for login URLs when none is configured
pub const DEFAULT_ORIGIN: &str = "http://localhost:5173";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// SSO service base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Origin the login URLs are built on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,

    /// Bearer credential from the last login
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub logged_in_as: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub logged_in_at: Option<DateTime<Utc>>,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// User preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Per-request HTTP timeout
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Upper bound on a create/update submission
    #[serde(default = "default_timeout_secs")]
    pub submit_timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            format: None,
            request_timeout_secs: default_timeout_secs(),
            submit_timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".ssodash").join("config.yaml"))
    }

    /// Explicit path if given, otherwise the default one
    pub fn resolve_path(explicit: Option<&str>) -> Result<PathBuf> {
        match explicit {
            Some(path) => Ok(PathBuf::from(path)),
            None => Self::default_path(),
        }
    }

    /// Load configuration, falling back to defaults when the file is absent
    pub fn load_at(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        config.validate()?;

        Ok(config)
    }

    /// Reject settings that would make every request time out at once.
    fn validate(&self) -> Result<()> {
        let timeouts = [
            ("request_timeout_secs", self.preferences.request_timeout_secs),
            ("submit_timeout_secs", self.preferences.submit_timeout_secs),
        ];
        for (key, secs) in timeouts {
            if secs == 0 {
                return Err(
                    ConfigError::Invalid(format!("preferences.{} must be at least 1", key)).into(),
                );
            }
        }
        Ok(())
    }

    /// Save configuration to a specific path
    pub fn save_at(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(path, contents)?;

        // The file holds a bearer token
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(path, perms)?;
        }

        Ok(())
    }

    /// Stored credential, if any
    pub fn credential(&self) -> Option<Credential> {
        self.token
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(Credential::new)
    }

    /// Record a successful login
    pub fn remember_login(&mut self, token: &str, email: &str) {
        self.token = Some(token.to_string());
        self.logged_in_as = Some(email.to_string());
        self.logged_in_at = Some(Utc::now());
    }

    /// Drop the stored credential. Returns whether one was stored.
    pub fn forget_login(&mut self) -> bool {
        self.logged_in_as = None;
        self.logged_in_at = None;
        self.token.take().is_some()
    }

    /// Base URL after applying an override
    pub fn base_url_or(&self, overridden: Option<&str>) -> String {
        overridden
            .or(self.base_url.as_deref())
            .unwrap_or(DEFAULT_BASE_URL)
            .to_string()
    }

    /// Origin after applying an override
    pub fn origin_or(&self, overridden: Option<&str>) -> String {
        overridden
            .or(self.origin.as_deref())
            .unwrap_or(DEFAULT_ORIGIN)
            .to_string()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.preferences.request_timeout_secs)
    }

    pub fn submit_timeout(&self) -> Duration {
        Duration::from_secs(self.preferences.submit_timeout_secs)
    }
}
