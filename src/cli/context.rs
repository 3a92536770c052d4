//! Command execution context
//!
//! Loads the config, applies flag overrides and builds the client and
//! session every networked command needs.

use std::path::PathBuf;
use std::sync::Arc;

use log::{debug, warn};

use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::SsoClient;
use crate::config::Config;
use crate::dashboard::{Dashboard, Navigator, SystemClipboard};
use crate::error::Result;
use crate::session::Session;

/// Context for command execution containing config, client, and runtime options.
pub struct CommandContext {
    pub config: Config,
    pub config_path: PathBuf,
    pub format: OutputFormat,
    pub client: Arc<SsoClient>,
    /// Session seeded from the stored token, if any
    pub session: Arc<Session>,
    pub origin: String,
}

impl CommandContext {
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config_path = Config::resolve_path(opts.config_ref())?;
        let config = Config::load_at(&config_path)?;

        let format = opts
            .format
            .or_else(|| {
                config
                    .preferences
                    .format
                    .as_deref()
                    .and_then(OutputFormat::from_preference)
            })
            .unwrap_or_default();

        let base_url = config.base_url_or(opts.base_url_ref());
        let origin = config.origin_or(opts.origin_ref());
        debug!("Using service {} and origin {}", base_url, origin);

        let client = Arc::new(SsoClient::new(base_url, config.request_timeout())?);
        let session = Arc::new(Session::new(config.credential()));

        Ok(Self {
            config,
            config_path,
            format,
            client,
            session,
            origin,
        })
    }

    /// Dashboard wired to this context's client, session and config file.
    pub fn dashboard(&self) -> Dashboard<SsoClient> {
        Dashboard::new(Arc::clone(&self.client), Arc::clone(&self.session))
            .with_navigator(Arc::new(ClearStoredLogin::new(self.config_path.clone())))
            .with_origin(self.origin.clone())
            .with_submit_timeout(self.config.submit_timeout())
            .with_clipboard(Arc::new(SystemClipboard::holding()))
    }

    pub fn save_config(&self) -> Result<()> {
        self.config.save_at(&self.config_path)
    }
}

/// Terminal counterpart of "go back to the login page": forget the stored
/// token. The failing command reports the sign-in hint itself.
pub struct ClearStoredLogin {
    config_path: PathBuf,
}

impl ClearStoredLogin {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }
}

impl Navigator for ClearStoredLogin {
    fn redirect_to_login(&self) {
        match Config::load_at(&self.config_path) {
            Ok(mut config) => {
                if config.forget_login() {
                    if let Err(e) = config.save_at(&self.config_path) {
                        warn!("Could not clear stored token: {}", e);
                    }
                }
            }
            Err(e) => warn!("Could not read config to clear token: {}", e),
        }
        debug!("Cleared stored login at {}", self.config_path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_navigator_clears_stored_token() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");

        let mut config = Config::default();
        config.base_url = Some("http://sso.test".to_string());
        config.remember_login("tok", "a@b.co");
        config.save_at(&path).unwrap();

        ClearStoredLogin::new(path.clone()).redirect_to_login();

        let reloaded = Config::load_at(&path).unwrap();
        assert!(reloaded.token.is_none());
        assert_eq!(reloaded.base_url.as_deref(), Some("http://sso.test"));
    }

    #[test]
    fn test_context_prefers_flags_over_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");

        let mut config = Config::default();
        config.base_url = Some("http://file.test".to_string());
        config.preferences.format = Some("json".to_string());
        config.save_at(&path).unwrap();

        let opts = GlobalOptions {
            config: Some(path.display().to_string()),
            base_url: Some("http://flag.test/".to_string()),
            ..Default::default()
        };
        let ctx = CommandContext::new(&opts).unwrap();

        assert_eq!(ctx.client.base_url(), "http://flag.test");
        assert_eq!(ctx.format, OutputFormat::Json);
        assert_eq!(ctx.origin, crate::config::DEFAULT_ORIGIN);
    }
}
