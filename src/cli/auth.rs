//! Login and logout commands

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};
use log::debug;

use crate::cli::{CommandContext, GlobalOptions};
use crate::client::AuthApi;
use crate::error::Result;
use crate::output::print_success;
use crate::validation::validate_email;

/// Prompt for an email unless one was given
pub(crate) fn email_or_prompt(email: Option<String>) -> Result<String> {
    match email {
        Some(email) => Ok(email),
        None => Ok(Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Email")
            .interact_text()?),
    }
}

/// Run the login command
pub async fn login(
    email: Option<String>,
    password: Option<String>,
    opts: &GlobalOptions,
) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;

    let email = email_or_prompt(email)?;
    validate_email(&email)?;

    let password = match password {
        Some(password) => password,
        None => Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Password")
            .interact()?,
    };

    println!("{}", "Signing in...".cyan());
    let grant = ctx.client.login(&email, &password).await?;
    debug!("Signed in as {}", grant.email);

    ctx.config.remember_login(&grant.token, &grant.email);
    ctx.save_config()?;

    let who = grant.name.as_deref().unwrap_or(&grant.email);
    print_success(&format!("Signed in as {}", who));
    Ok(())
}

/// Run the logout command
pub fn logout(opts: &GlobalOptions) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;

    if ctx.config.forget_login() {
        ctx.save_config()?;
        print_success("Signed out");
    } else {
        println!("Not signed in.");
    }
    Ok(())
}
