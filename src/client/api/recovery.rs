//! Password recovery API trait

use async_trait::async_trait;

use crate::error::Result;

/// Unauthenticated password recovery operations
#[async_trait]
pub trait RecoveryApi: Send + Sync {
    /// Ask the server to email a reset link to `email`.
    async fn request_password_reset(&self, email: &str) -> Result<()>;

    /// Set a new password using the token from the emailed link.
    ///
    /// The server consumes the token on success.
    async fn complete_password_reset(&self, email: &str, token: &str, password: &str)
    -> Result<()>;
}
