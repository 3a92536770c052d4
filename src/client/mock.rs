//! Mock SSO service client for testing
//!
//! Provides an in-memory implementation of the API traits for unit testing
//! without making real API calls. It behaves like a tiny server: created
//! applications get sequential ids, updates and deletes of unknown ids fail
//! with `NotFound`.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::api::{AuthApi, RecoveryApi, RegistryApi};
use super::models::{AppId, Application, LoginGrant};
use crate::error::{ApiError, Result};
use crate::session::Credential;

/// Mock API client for testing.
///
/// Configure expected responses via builder methods, then use in tests.
///
/// # Example
/// ```ignore
/// let mock = MockSsoClient::new()
///     .with_apps(vec![Application::new("1", "Portal", "https://p.test/cb")]).await;
///
/// let apps = mock.list_applications(&credential).await?;
/// assert_eq!(apps.len(), 1);
/// ```
#[derive(Default)]
pub struct MockSsoClient {
    /// Server-side application store
    apps: Arc<Mutex<Vec<Application>>>,
    /// Last id handed out by create
    last_id: Arc<Mutex<u64>>,
    /// Scripted list responses, consumed in order before falling back to `apps`
    list_script: Arc<Mutex<VecDeque<(Duration, Vec<Application>)>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Artificial latency applied to every call
    delay: Arc<Mutex<Option<Duration>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Last reset completion received
    last_reset: Arc<Mutex<Option<CapturedReset>>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub login: usize,
    pub list_applications: usize,
    pub create_application: usize,
    pub update_application: usize,
    pub delete_application: usize,
    pub request_password_reset: usize,
    pub complete_password_reset: usize,
}

impl CallCounts {
    /// Get total number of API calls made.
    pub fn total(&self) -> usize {
        self.login
            + self.list_applications
            + self.create_application
            + self.update_application
            + self.delete_application
            + self.request_password_reset
            + self.complete_password_reset
    }
}

/// A captured reset completion for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedReset {
    pub email: String,
    pub token: String,
    pub password: String,
}

impl MockSsoClient {
    /// Create a new mock client with an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the server-side application store.
    pub async fn with_apps(self, apps: Vec<Application>) -> Self {
        *self.apps.lock().await = apps;
        self
    }

    /// Configure an error to return on the next API call.
    /// The error is consumed after one use.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Delay every call by `delay` before answering.
    pub async fn with_delay(self, delay: Duration) -> Self {
        *self.delay.lock().await = Some(delay);
        self
    }

    /// Queue a list response that resolves after `delay`.
    ///
    /// Scripted responses are served in order, one per `list_applications`
    /// call, so tests can make an earlier request resolve after a later one.
    pub async fn with_list_response(self, delay: Duration, apps: Vec<Application>) -> Self {
        self.list_script.lock().await.push_back((delay, apps));
        self
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Current server-side store.
    pub async fn stored_apps(&self) -> Vec<Application> {
        self.apps.lock().await.clone()
    }

    /// Last reset completion the mock received.
    pub async fn last_reset(&self) -> Option<CapturedReset> {
        self.last_reset.lock().await.clone()
    }

    /// Apply the configured delay, then consume a pending error.
    async fn check_error(&self) -> Result<()> {
        let delay = *self.delay.lock().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut error = self.error.lock().await;
        if let Some(e) = error.take() {
            return Err(e.into());
        }
        Ok(())
    }
}

// ============================================================================
// AuthApi Implementation
// ============================================================================

#[async_trait]
impl AuthApi for MockSsoClient {
    async fn login(&self, email: &str, _password: &str) -> Result<LoginGrant> {
        self.call_count.lock().await.login += 1;
        self.check_error().await?;

        Ok(LoginGrant {
            token: "mock-jwt-token".to_string(),
            email: email.to_string(),
            name: None,
        })
    }
}

// ============================================================================
// RegistryApi Implementation
// ============================================================================

#[async_trait]
impl RegistryApi for MockSsoClient {
    async fn list_applications(&self, _credential: &Credential) -> Result<Vec<Application>> {
        self.call_count.lock().await.list_applications += 1;

        let scripted = self.list_script.lock().await.pop_front();
        if let Some((delay, apps)) = scripted {
            tokio::time::sleep(delay).await;
            return Ok(apps);
        }

        self.check_error().await?;
        Ok(self.apps.lock().await.clone())
    }

    async fn create_application(
        &self,
        _credential: &Credential,
        name: &str,
        callback_url: &str,
    ) -> Result<Application> {
        self.call_count.lock().await.create_application += 1;
        self.check_error().await?;

        let mut last_id = self.last_id.lock().await;
        *last_id += 1;
        let app = Application::new(format!("a{}", *last_id), name, callback_url);
        self.apps.lock().await.push(app.clone());
        Ok(app)
    }

    async fn update_application(
        &self,
        _credential: &Credential,
        id: &AppId,
        name: &str,
        callback_url: &str,
    ) -> Result<Application> {
        self.call_count.lock().await.update_application += 1;
        self.check_error().await?;

        let mut apps = self.apps.lock().await;
        let app = apps
            .iter_mut()
            .find(|a| &a.id == id)
            .ok_or_else(|| ApiError::NotFound {
                message: Some("App not found".to_string()),
            })?;
        app.name = name.to_string();
        app.callback_url = callback_url.to_string();
        Ok(app.clone())
    }

    async fn delete_application(&self, _credential: &Credential, id: &AppId) -> Result<()> {
        self.call_count.lock().await.delete_application += 1;
        self.check_error().await?;

        let mut apps = self.apps.lock().await;
        let before = apps.len();
        apps.retain(|a| &a.id != id);
        if apps.len() == before {
            return Err(ApiError::NotFound {
                message: Some("App not found".to_string()),
            }
            .into());
        }
        Ok(())
    }
}

// ============================================================================
// RecoveryApi Implementation
// ============================================================================

#[async_trait]
impl RecoveryApi for MockSsoClient {
    async fn request_password_reset(&self, _email: &str) -> Result<()> {
        self.call_count.lock().await.request_password_reset += 1;
        self.check_error().await
    }

    async fn complete_password_reset(
        &self,
        email: &str,
        token: &str,
        password: &str,
    ) -> Result<()> {
        self.call_count.lock().await.complete_password_reset += 1;
        self.check_error().await?;

        *self.last_reset.lock().await = Some(CapturedReset {
            email: email.to_string(),
            token: token.to_string(),
            password: password.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn credential() -> Credential {
        Credential::new("t")
    }

    #[tokio::test]
    async fn test_mock_client_default_empty() {
        let mock = MockSsoClient::new();
        let apps = mock.list_applications(&credential()).await.unwrap();
        assert!(apps.is_empty());
    }

    #[tokio::test]
    async fn test_mock_create_assigns_sequential_ids() {
        let mock = MockSsoClient::new();
        let first = mock
            .create_application(&credential(), "X", "https://x.test/cb")
            .await
            .unwrap();
        let second = mock
            .create_application(&credential(), "Y", "https://y.test/cb")
            .await
            .unwrap();

        assert_eq!(first.id.as_str(), "a1");
        assert_eq!(second.id.as_str(), "a2");
        assert_eq!(mock.stored_apps().await.len(), 2);
    }

    #[tokio::test]
    async fn test_mock_client_with_error() {
        let mock = MockSsoClient::new()
            .with_error(ApiError::Unauthorized { message: None })
            .await;

        let result = mock.list_applications(&credential()).await;
        assert!(matches!(result, Err(Error::Api(ApiError::Unauthorized { .. }))));

        // Error is consumed
        assert!(mock.list_applications(&credential()).await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_delete_unknown_is_not_found() {
        let mock = MockSsoClient::new();
        let result = mock.delete_application(&credential(), &AppId::new("nope")).await;
        assert!(matches!(result, Err(Error::Api(ApiError::NotFound { .. }))));
    }

    #[tokio::test]
    async fn test_mock_client_call_counts() {
        let mock = MockSsoClient::new();
        let _ = mock.list_applications(&credential()).await;
        let _ = mock.request_password_reset("a@b.co").await;

        let counts = mock.call_counts().await;
        assert_eq!(counts.list_applications, 1);
        assert_eq!(counts.request_password_reset, 1);
        assert_eq!(counts.total(), 2);
    }

    #[tokio::test]
    async fn test_mock_scripted_list_then_store() {
        let stored = vec![Application::new("1", "Stored", "u")];
        let mock = MockSsoClient::new()
            .with_apps(stored.clone())
            .await
            .with_list_response(Duration::ZERO, vec![])
            .await;

        assert!(mock.list_applications(&credential()).await.unwrap().is_empty());
        assert_eq!(mock.list_applications(&credential()).await.unwrap(), stored);
    }
}
