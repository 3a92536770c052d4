//! SSO service API client implementation

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client as HttpClient, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use super::api::{AuthApi, RecoveryApi, RegistryApi};
use super::models::{AppId, Application, AppsPayload, DataEnvelope, ErrorBody, LoginGrant};
use crate::error::{ApiError, Result};
use crate::session::Credential;

/// Default SSO service base URL
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Version prefix shared by every endpoint
const API_PREFIX: &str = "/api/v1";

/// SSO service API client
pub struct SsoClient {
    http: HttpClient,
    base_url: String,
}

impl SsoClient {
    /// Create a new client for the service at `base_url`.
    ///
    /// `timeout` bounds each request; a request that exceeds it fails with
    /// a network error instead of hanging.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .user_agent(concat!("ssodash/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { http, base_url })
    }

    /// Base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    fn authorized(&self, method: Method, path: &str, credential: &Credential) -> RequestBuilder {
        self.http
            .request(method, self.url(path))
            .bearer_auth(credential.expose())
    }

    /// Send a request and return the body of a 2xx response.
    ///
    /// Any other status is translated into an [`ApiError`].
    async fn execute(&self, method: Method, path: &str, builder: RequestBuilder) -> Result<String> {
        debug!("{} {}{}", method, API_PREFIX, path);

        let response = builder.send().await.map_err(|e| {
            let err = ApiError::from(e);
            warn!("{} {} failed: {}", method, path, err);
            err
        })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if status.is_success() {
            return Ok(body);
        }

        let err = error_for_status(status, &body);
        warn!("{} {} returned {}: {}", method, path, status, err);
        Err(err.into())
    }
}

/// Map a non-success status and its body to an API error.
fn error_for_status(status: StatusCode, body: &str) -> ApiError {
    let message = ErrorBody::message_from(body);
    match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized { message },
        StatusCode::NOT_FOUND => ApiError::NotFound { message },
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ApiError::Validation { message }
        }
        status => ApiError::ServerError {
            status: status.as_u16(),
            message,
        },
    }
}

/// Decode a success body, reporting shape mismatches as invalid responses.
fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| {
        ApiError::InvalidResponse(format!("Failed to parse response: {}", e)).into()
    })
}

#[async_trait]
impl AuthApi for SsoClient {
    async fn login(&self, email: &str, password: &str) -> Result<LoginGrant> {
        let path = "/login";
        let builder = self
            .http
            .post(self.url(path))
            .form(&[("email", email), ("password", password)]);

        // A 401 here is a bad email/password pair, not a lost session
        let body = match self.execute(Method::POST, path, builder).await {
            Ok(body) => body,
            Err(crate::error::Error::Api(ApiError::Unauthorized { message })) => {
                return Err(ApiError::LoginRejected { message }.into());
            }
            Err(err) => return Err(err),
        };
        let envelope: DataEnvelope<LoginGrant> = decode(&body)?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl RegistryApi for SsoClient {
    async fn list_applications(&self, credential: &Credential) -> Result<Vec<Application>> {
        let path = "/app/";
        let builder = self.authorized(Method::GET, path, credential);

        let body = self.execute(Method::GET, path, builder).await?;
        let envelope: DataEnvelope<AppsPayload> = decode(&body)?;
        Ok(envelope.data.apps.unwrap_or_default())
    }

    async fn create_application(
        &self,
        credential: &Credential,
        name: &str,
        callback_url: &str,
    ) -> Result<Application> {
        let path = "/app/create";
        let builder = self
            .authorized(Method::POST, path, credential)
            .form(&[("name", name), ("callback_url", callback_url)]);

        let body = self.execute(Method::POST, path, builder).await?;
        let envelope: DataEnvelope<Application> = decode(&body)?;
        Ok(envelope.data)
    }

    async fn update_application(
        &self,
        credential: &Credential,
        id: &AppId,
        name: &str,
        callback_url: &str,
    ) -> Result<Application> {
        let path = format!("/app/{}", id);
        let builder = self
            .authorized(Method::PATCH, &path, credential)
            .form(&[("name", name), ("callback_url", callback_url)]);

        let body = self.execute(Method::PATCH, &path, builder).await?;
        let envelope: DataEnvelope<Application> = decode(&body)?;
        Ok(envelope.data)
    }

    async fn delete_application(&self, credential: &Credential, id: &AppId) -> Result<()> {
        let path = format!("/app/{}", id);
        let builder = self.authorized(Method::DELETE, &path, credential);

        self.execute(Method::DELETE, &path, builder).await?;
        Ok(())
    }
}

#[async_trait]
impl RecoveryApi for SsoClient {
    async fn request_password_reset(&self, email: &str) -> Result<()> {
        let path = "/forget-password";
        let builder = self.http.post(self.url(path)).form(&[("email", email)]);

        self.execute(Method::POST, path, builder).await?;
        Ok(())
    }

    async fn complete_password_reset(
        &self,
        email: &str,
        token: &str,
        password: &str,
    ) -> Result<()> {
        let path = "/reset-password";
        let builder = self.http.post(self.url(path)).form(&[
            ("email", email),
            ("token", token),
            ("password", password),
        ]);

        // The service reports bad or mismatched tokens as 400
        match self.execute(Method::POST, path, builder).await {
            Ok(_) => Ok(()),
            Err(crate::error::Error::Api(ApiError::Validation { message })) => {
                Err(ApiError::InvalidToken { message }.into())
            }
            Err(err) => Err(err),
        }
    }
}
