//! Application registry API trait

use async_trait::async_trait;

use crate::client::models::{AppId, Application};
use crate::error::Result;
use crate::session::Credential;

/// Application CRUD operations for the SSO service
///
/// Every call is a single round trip. Nothing here retries; callers decide
/// what to do with a failure.
#[async_trait]
pub trait RegistryApi: Send + Sync {
    /// List every application owned by the signed-in account.
    ///
    /// Fails with `Unauthorized` when the credential is rejected.
    async fn list_applications(&self, credential: &Credential) -> Result<Vec<Application>>;

    /// Create an application. The server assigns the id.
    async fn create_application(
        &self,
        credential: &Credential,
        name: &str,
        callback_url: &str,
    ) -> Result<Application>;

    /// Replace the name and callback URL of an existing application.
    async fn update_application(
        &self,
        credential: &Credential,
        id: &AppId,
        name: &str,
        callback_url: &str,
    ) -> Result<Application>;

    /// Delete an application.
    async fn delete_application(&self, credential: &Credential, id: &AppId) -> Result<()>;
}
