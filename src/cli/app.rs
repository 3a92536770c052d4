//! Application management commands

use dialoguer::{Confirm, theme::ColorfulTheme};

use crate::cli::{CommandContext, GlobalOptions};
use crate::client::SsoClient;
use crate::client::models::AppId;
use crate::dashboard::{Dashboard, LoadOutcome, SubmitOutcome, SystemClipboard, login_url};
use crate::error::{ApiError, Error, Result, ValidationError};
use crate::models::AppDisplay;
use crate::output::{self, print_failure, print_notification, print_rows};

/// Load the registry, turning every non-applied outcome into an error.
async fn load_registry(dashboard: &Dashboard<SsoClient>) -> Result<()> {
    let spinner = output::spinner("Loading applications...");
    let outcome = dashboard.load().await;
    spinner.finish_and_clear();

    match outcome {
        LoadOutcome::Applied(_) | LoadOutcome::Stale => Ok(()),
        LoadOutcome::SessionExpired => Err(ApiError::Unauthorized { message: None }.into()),
        LoadOutcome::Failed(err) => {
            report(dashboard).await;
            Err(err)
        }
    }
}

async fn report(dashboard: &Dashboard<SsoClient>) {
    if let Some(notification) = dashboard.notification().await {
        print_notification(&notification);
    }
}

/// Submit the open form with a spinner, then print what happened.
async fn submit_form(ctx: &CommandContext, dashboard: &Dashboard<SsoClient>) -> Result<()> {
    let spinner = output::spinner("Saving...");
    let outcome = dashboard.submit().await;
    spinner.finish_and_clear();

    report(dashboard).await;
    match outcome {
        SubmitOutcome::Saved(app) => print_rows(&[AppDisplay::new(&app, &ctx.origin)], ctx.format),
        SubmitOutcome::Rejected(invalid) => Err(invalid.into()),
        SubmitOutcome::Failed(err) => Err(err),
        SubmitOutcome::Ignored => Err(Error::Other("No form to submit".to_string())),
    }
}

/// Run the app list command
pub async fn list(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let dashboard = ctx.dashboard();
    load_registry(&dashboard).await?;

    let apps = dashboard.apps().await.unwrap_or_default();
    print_rows(&AppDisplay::from_apps(&apps, &ctx.origin), ctx.format)
}

/// Run the app create command
pub async fn create(name: &str, callback_url: &str, opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let dashboard = ctx.dashboard();

    dashboard.open_create().await?;
    dashboard
        .update_draft(|draft| {
            draft.name = name.to_string();
            draft.callback_url = callback_url.to_string();
        })
        .await?;

    submit_form(&ctx, &dashboard).await
}

/// Run the app update command. Fields left out keep their current value.
pub async fn update(
    id: &str,
    name: Option<&str>,
    callback_url: Option<&str>,
    opts: &GlobalOptions,
) -> Result<()> {
    if name.is_none() && callback_url.is_none() {
        return Err(ValidationError::InvalidInput(
            "Nothing to update: pass --name and/or --callback-url".to_string(),
        )
        .into());
    }

    let ctx = CommandContext::new(opts)?;
    let dashboard = ctx.dashboard();
    load_registry(&dashboard).await?;

    dashboard.open_edit(&AppId::new(id)).await?;
    dashboard
        .update_draft(|draft| {
            if let Some(name) = name {
                draft.name = name.to_string();
            }
            if let Some(url) = callback_url {
                draft.callback_url = url.to_string();
            }
        })
        .await?;

    submit_form(&ctx, &dashboard).await
}

/// Run the app delete command
pub async fn delete(id: &str, yes: bool, opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let dashboard = ctx.dashboard();
    let id = AppId::new(id);

    if !yes {
        load_registry(&dashboard).await?;
        let label = dashboard
            .apps()
            .await
            .and_then(|apps| apps.into_iter().find(|a| a.id == id))
            .map(|a| format!("'{}' ({})", a.name, a.id))
            .unwrap_or_else(|| id.to_string());

        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Delete application {}?", label))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let result = dashboard.delete(&id).await;
    report(&dashboard).await;
    result
}

/// Run the app copy-url command.
///
/// The URL is printed before copying, so a missing clipboard is not fatal.
pub async fn copy_url(id: &str, opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let dashboard = ctx.dashboard();
    let id = AppId::new(id);

    println!("{}", login_url(&ctx.origin, &id));
    let has_display = ["DISPLAY", "WAYLAND_DISPLAY"]
        .iter()
        .any(|var| std::env::var_os(var).is_some());
    if has_display && SystemClipboard::holding().holds_selection() {
        eprintln!("Holding the clipboard until something else is copied (Ctrl-C to stop)...");
    }

    match dashboard.copy_login_url(&id).await {
        Ok(_) => report(&dashboard).await,
        Err(_) => {
            report(&dashboard).await;
            print_failure("Copy the URL above instead");
        }
    }
    Ok(())
}
