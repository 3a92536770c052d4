//! Output formatting for CLI results

use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::dashboard::Notification;
use crate::error::Result;

pub mod json;
pub mod table;

/// Print rows as a table or as the JSON envelope.
pub fn print_rows<T: Tabled + Serialize>(rows: &[T], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", table::format_table(rows)),
        OutputFormat::Json => println!("{}", json::format_json(rows)?),
    }
    Ok(())
}

/// Print a dashboard notification to stderr.
pub fn print_notification(notification: &Notification) {
    if notification.is_error() {
        eprintln!("{} {}", "✗".red(), notification.message);
    } else {
        eprintln!("{} {}", "✓".green(), notification.message.green());
    }
}

pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.green());
}

pub fn print_failure(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Spinner on stderr; hidden when stderr is not a terminal.
pub fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}
