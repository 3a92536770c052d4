//! ssodash - manage the applications registered with an SSO service

use clap::Parser;

mod cli;
mod client;
mod config;
mod dashboard;
mod error;
mod models;
mod output;
mod recovery;
mod session;
mod validation;

use cli::{AppCommands, Cli, Commands, GlobalOptions, PasswordCommands};
use error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// `--debug` forces debug output; otherwise `RUST_LOG`, defaulting to warnings.
fn init_logging(debug: bool) {
    let env = env_logger::Env::default().default_filter_or("warn");
    let mut builder = env_logger::Builder::from_env(env);
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Login { email, password } => cli::auth::login(email, password, &opts).await,
        Commands::Logout => cli::auth::logout(&opts),
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("ssodash version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::App(app_cmd) => match app_cmd {
            AppCommands::List => cli::app::list(&opts).await,
            AppCommands::Create { name, callback_url } => {
                cli::app::create(&name, &callback_url, &opts).await
            }
            AppCommands::Update {
                id,
                name,
                callback_url,
            } => cli::app::update(&id, name.as_deref(), callback_url.as_deref(), &opts).await,
            AppCommands::Delete { id, yes } => cli::app::delete(&id, yes, &opts).await,
            AppCommands::CopyUrl { id } => cli::app::copy_url(&id, &opts).await,
        },
        Commands::Password(password_cmd) => match password_cmd {
            PasswordCommands::Forgot { email } => cli::password::forgot(email, &opts).await,
            PasswordCommands::Reset { link, email, token } => {
                cli::password::reset(link, email, token, &opts).await
            }
        },
        Commands::Completion { shell } => cli::completions::run(shell),
    }
}
