//! Status command implementation

use chrono::Utc;
use colored::Colorize;

use crate::cli::{CommandContext, GlobalOptions};
use crate::error::Result;

/// Run the status command to display configuration and session status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    println!("{}\n", "ssodash Status".bold());

    let exists = ctx.config_path.exists();
    println!(
        "Config file: {}{}",
        ctx.config_path.display().to_string().cyan(),
        if exists { "" } else { " (not created yet)" }
    );
    println!("Service: {}", ctx.client.base_url().cyan());
    println!("Login URL origin: {}", ctx.origin.cyan());
    println!();

    match ctx.config.credential() {
        Some(credential) => {
            let who = ctx.config.logged_in_as.as_deref().unwrap_or("unknown account");
            println!("{} Signed in as {}", "✓".green(), who.bold());

            if let Some(at) = ctx.config.logged_in_at {
                println!("  Since {}", at.format("%Y-%m-%d %H:%M UTC"));
            }

            // The service is the authority; the claim is only a hint
            match credential.claimed_expiry() {
                Some(expiry) if expiry <= Utc::now() => {
                    println!(
                        "{} Token expired at {} (run 'ssodash login')",
                        "⚠".yellow(),
                        expiry.format("%Y-%m-%d %H:%M UTC")
                    );
                }
                Some(expiry) => {
                    let remaining = expiry.signed_duration_since(Utc::now());
                    println!(
                        "{} Token valid (expires in {}h {}m)",
                        "✓".green(),
                        remaining.num_hours(),
                        remaining.num_minutes() % 60
                    );
                }
                None => println!("{} Token expiry unknown", "○".dimmed()),
            }
        }
        None => {
            println!("{} Not signed in", "✗".red());
            println!("  → Run 'ssodash login' to sign in");
        }
    }

    println!();
    Ok(())
}
