//! Global CLI options shared across all commands

use crate::cli::{Cli, OutputFormat};

/// Global flags, captured once after parsing.
///
/// Precedence is CLI flag > environment variable > config file > default.
/// This struct holds the flag/env layer; the config file is applied in
/// `CommandContext`.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format; `None` defers to the config file
    pub format: Option<OutputFormat>,

    /// Custom config file path (defaults to ~/.ssodash/config.yaml)
    pub config: Option<String>,

    /// SSO service base URL override
    pub base_url: Option<String>,

    /// Login URL origin override
    pub origin: Option<String>,
}

impl GlobalOptions {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            base_url: cli.base_url.clone(),
            origin: cli.origin.clone(),
        }
    }

    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    pub fn base_url_ref(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn origin_ref(&self) -> Option<&str> {
        self.origin.as_deref()
    }
}
