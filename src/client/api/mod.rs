//! API trait definitions split by responsibility
//!
//! This module organizes the SSO service surface into focused sub-traits:
//! - [`AuthApi`] - Credential issuance
//! - [`RegistryApi`] - Application CRUD
//! - [`RecoveryApi`] - Password reset request and completion

mod auth;
mod recovery;
mod registry;

pub use auth::AuthApi;
pub use recovery::RecoveryApi;
pub use registry::RegistryApi;
