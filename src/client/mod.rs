//! SSO service API client

pub mod api;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod sso;

pub use api::{AuthApi, RecoveryApi, RegistryApi};
#[cfg(test)]
pub use mock::MockSsoClient;
pub use sso::{DEFAULT_BASE_URL, SsoClient};

