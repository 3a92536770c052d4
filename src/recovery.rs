//! Password recovery forms
//!
//! Two independent forms: one asks the service to email a reset link, the
//! other completes the reset with the email and token carried by that link.
//! Each submit takes `&mut self`, so a form cannot have two requests in
//! flight at once.

use std::sync::Arc;

use log::warn;
use reqwest::Url;

use crate::client::RecoveryApi;
use crate::error::{Error, Result, ValidationError};
use crate::validation::{confirmation_error, validate_email, validate_password};

pub const MSG_RESET_SENT: &str = "Password reset instructions have been sent to your email";
pub const MSG_RESET_SEND_FAILED: &str = "Failed to send reset email. Please try again.";
pub const MSG_RESET_DONE: &str =
    "Password reset successful. You can now login with your new password.";
pub const MSG_RESET_FAILED: &str = "Failed to reset password. Please try again.";
pub const MSG_UNEXPECTED: &str = "An error occurred. Please try again later.";

/// Text to show for a failed recovery call.
fn failure_text(err: &Error, fallback: &str) -> String {
    if err.as_api().is_some_and(|e| e.is_network()) {
        return MSG_UNEXPECTED.to_string();
    }
    err.server_message().unwrap_or(fallback).to_string()
}

/// Form that requests a reset email
pub struct ResetRequestForm<C> {
    client: Arc<C>,
    pub email: String,
    message: Option<String>,
    error: Option<String>,
}

impl<C: RecoveryApi> ResetRequestForm<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            email: String::new(),
            message: None,
            error: None,
        }
    }

    /// Confirmation shown after a successful request. It stays until the
    /// next submit.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Validate the email and ask the service to send the reset link.
    pub async fn submit(&mut self) -> Result<()> {
        self.message = None;
        self.error = None;

        if let Err(invalid) = validate_email(&self.email) {
            self.error = Some(invalid.to_string());
            return Err(invalid.into());
        }

        match self.client.request_password_reset(&self.email).await {
            Ok(()) => {
                self.message = Some(MSG_RESET_SENT.to_string());
                self.email.clear();
                Ok(())
            }
            Err(err) => {
                warn!("Password reset request failed: {}", err);
                self.error = Some(failure_text(&err, MSG_RESET_SEND_FAILED));
                Err(err)
            }
        }
    }
}

/// Email and token from a reset link. Read once, never changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetContext {
    email: String,
    token: String,
}

impl ResetContext {
    pub fn new(email: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            token: token.into(),
        }
    }

    /// Pull `email` and `token` out of the query string of a reset link.
    ///
    /// Emailed links are `host/complete-forget-password?email=..&token=..`
    /// with no scheme, so a link without one is read as `http://`.
    pub fn from_link(link: &str) -> Result<Self> {
        let link = link.trim();
        let absolute = if link.contains("://") {
            link.to_string()
        } else {
            format!("http://{}", link)
        };
        let url = Url::parse(&absolute)
            .map_err(|e| ValidationError::InvalidInput(format!("Invalid reset link: {}", e)))?;

        let param = |key: &str| {
            url.query_pairs()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.into_owned())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| {
                    ValidationError::InvalidInput(format!("Reset link has no {} parameter", key))
                })
        };

        Ok(Self::new(param("email")?, param("token")?))
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    #[allow(dead_code)]
    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Form that sets the new password
pub struct ResetCompleteForm<C> {
    client: Arc<C>,
    context: ResetContext,
    password: String,
    confirm_password: String,
    confirm_error: Option<ValidationError>,
    message: Option<String>,
    error: Option<String>,
}

impl<C: RecoveryApi> ResetCompleteForm<C> {
    pub fn new(client: Arc<C>, context: ResetContext) -> Self {
        Self {
            client,
            context,
            password: String::new(),
            confirm_password: String::new(),
            confirm_error: None,
            message: None,
            error: None,
        }
    }

    pub fn context(&self) -> &ResetContext {
        &self.context
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
        self.confirm_error = confirmation_error(&self.password, &self.confirm_password);
    }

    pub fn set_confirm_password(&mut self, confirmation: impl Into<String>) {
        self.confirm_password = confirmation.into();
        self.confirm_error = confirmation_error(&self.password, &self.confirm_password);
    }

    /// Live mismatch between the two password fields
    pub fn confirm_error(&self) -> Option<&ValidationError> {
        self.confirm_error.as_ref()
    }

    /// Submit is disabled while the confirmation does not match.
    pub fn can_submit(&self) -> bool {
        self.confirm_error.is_none()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Check the password policy and send the new password.
    pub async fn submit(&mut self) -> Result<()> {
        self.message = None;
        self.error = None;

        if let Err(invalid) = validate_password(&self.password, &self.confirm_password) {
            match invalid {
                ValidationError::PasswordMismatch => self.confirm_error = Some(invalid.clone()),
                _ => self.error = Some(invalid.to_string()),
            }
            return Err(invalid.into());
        }

        let result = self
            .client
            .complete_password_reset(&self.context.email, &self.context.token, &self.password)
            .await;

        match result {
            Ok(()) => {
                self.message = Some(MSG_RESET_DONE.to_string());
                self.password.clear();
                self.confirm_password.clear();
                self.confirm_error = None;
                Ok(())
            }
            Err(err) => {
                warn!("Password reset completion failed: {}", err);
                self.error = Some(failure_text(&err, MSG_RESET_FAILED));
                Err(err)
            }
        }
    }
}
