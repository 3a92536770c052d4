//! Password recovery commands

use std::sync::Arc;

use dialoguer::{Password, theme::ColorfulTheme};

use crate::cli::auth::email_or_prompt;
use crate::cli::{CommandContext, GlobalOptions};
use crate::error::{Error, Result, ValidationError};
use crate::output::{print_failure, print_success};
use crate::recovery::{ResetCompleteForm, ResetContext, ResetRequestForm};

/// Run the password forgot command
pub async fn forgot(email: Option<String>, opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let mut form = ResetRequestForm::new(Arc::clone(&ctx.client));
    form.email = email_or_prompt(email)?;

    let result = form.submit().await;
    show(form.message(), form.error());
    result
}

/// Run the password reset command
pub async fn reset(
    link: Option<String>,
    email: Option<String>,
    token: Option<String>,
    opts: &GlobalOptions,
) -> Result<()> {
    let context = match (link, email, token) {
        (Some(link), _, _) => ResetContext::from_link(&link)?,
        (None, Some(email), Some(token)) => ResetContext::new(email, token),
        _ => {
            return Err(ValidationError::InvalidInput(
                "Pass --link, or both --email and --token".to_string(),
            )
            .into());
        }
    };

    let ctx = CommandContext::new(opts)?;
    let mut form = ResetCompleteForm::new(Arc::clone(&ctx.client), context);
    println!("Resetting password for {}", form.context().email());

    form.set_password(
        Password::with_theme(&ColorfulTheme::default())
            .with_prompt("New password")
            .interact()?,
    );
    form.set_confirm_password(
        Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Confirm new password")
            .interact()?,
    );

    if !form.can_submit() {
        let err: Error = form
            .confirm_error()
            .cloned()
            .unwrap_or(ValidationError::PasswordMismatch)
            .into();
        print_failure(&err.to_string());
        return Err(err);
    }

    let result = form.submit().await;
    show(form.message(), form.error());
    result
}

fn show(message: Option<&str>, error: Option<&str>) {
    if let Some(message) = message {
        print_success(message);
    }
    if let Some(error) = error {
        print_failure(error);
    }
}
