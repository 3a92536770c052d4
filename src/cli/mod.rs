//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod app;
pub mod args;
pub mod auth;
pub mod completions;
pub mod context;
pub mod password;
pub mod status;

pub use args::{GlobalOptions, OutputFormat};
pub use context::CommandContext;

/// ssodash - manage the applications registered with an SSO service
#[derive(Parser, Debug)]
#[command(name = "ssodash")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(long, global = true, env = "SSODASH_FORMAT", hide_env = true)]
    pub format: Option<OutputFormat>,

    /// Override config file location
    #[arg(long, global = true, env = "SSODASH_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// SSO service base URL
    #[arg(long, global = true, env = "SSODASH_BASE_URL", hide_env = true)]
    pub base_url: Option<String>,

    /// Origin used to build application login URLs
    #[arg(long, global = true, env = "SSODASH_ORIGIN", hide_env = true)]
    pub origin: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "SSODASH_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and store the session token
    Login {
        /// Account email (prompted if omitted)
        #[arg(long)]
        email: Option<String>,

        /// Account password (prompted if omitted)
        #[arg(long, env = "SSODASH_PASSWORD", hide_env = true)]
        password: Option<String>,
    },

    /// Forget the stored session token
    Logout,

    /// Show configuration and session status
    Status,

    /// Display version information
    Version,

    /// Manage registered applications
    #[command(subcommand)]
    App(AppCommands),

    /// Recover a forgotten password
    #[command(subcommand)]
    Password(PasswordCommands),

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Application subcommands
#[derive(Subcommand, Debug)]
pub enum AppCommands {
    /// List registered applications
    #[command(visible_alias = "ls")]
    List,

    /// Register a new application
    Create {
        /// Display name
        #[arg(long)]
        name: String,

        /// Callback URL the service redirects to after login
        #[arg(long)]
        callback_url: String,
    },

    /// Change an application's name or callback URL
    Update {
        /// Application ID
        id: String,

        /// New display name
        #[arg(long)]
        name: Option<String>,

        /// New callback URL
        #[arg(long)]
        callback_url: Option<String>,
    },

    /// Delete an application
    #[command(visible_alias = "rm")]
    Delete {
        /// Application ID
        id: String,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Copy an application's login URL to the clipboard
    CopyUrl {
        /// Application ID
        id: String,
    },
}

/// Password recovery subcommands
#[derive(Subcommand, Debug)]
pub enum PasswordCommands {
    /// Email a password reset link
    Forgot {
        /// Account email (prompted if omitted)
        #[arg(long)]
        email: Option<String>,
    },

    /// Set a new password using a reset link
    Reset {
        /// The full reset link from the email
        #[arg(long, conflicts_with_all = ["email", "token"])]
        link: Option<String>,

        /// Account email from the reset link
        #[arg(long, requires = "token")]
        email: Option<String>,

        /// Token from the reset link
        #[arg(long, requires = "email")]
        token: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_app_update() {
        let cli = Cli::try_parse_from(["ssodash", "app", "update", "42", "--name", "New"]).unwrap();
        match cli.command {
            Commands::App(AppCommands::Update {
                id,
                name,
                callback_url,
            }) => {
                assert_eq!(id, "42");
                assert_eq!(name.as_deref(), Some("New"));
                assert!(callback_url.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_reset_link_conflicts_with_email() {
        let result = Cli::try_parse_from([
            "ssodash",
            "password",
            "reset",
            "--link",
            "https://x.test/?email=a&token=b",
            "--email",
            "a@b.co",
            "--token",
            "t",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_reset_token_requires_email() {
        let result = Cli::try_parse_from(["ssodash", "password", "reset", "--token", "t"]);
        assert!(result.is_err());
    }
}
