//! SSO service data models
//!
//! Domain types exchanged with the SSO service, organized by resource.

mod app;
mod auth;
mod envelope;

pub use app::{AppId, Application};
pub use auth::LoginGrant;
pub use envelope::{AppsPayload, DataEnvelope, ErrorBody};
