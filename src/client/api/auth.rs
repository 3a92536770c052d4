//! Authentication API trait

use async_trait::async_trait;

use crate::client::models::LoginGrant;
use crate::error::Result;

/// Authentication operations for the SSO service
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange email and password for a bearer token
    async fn login(&self, email: &str, password: &str) -> Result<LoginGrant>;
}
