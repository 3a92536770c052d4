//! Authentication models

use serde::{Deserialize, Serialize};

/// Successful login payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginGrant {
    /// Bearer token for subsequent requests
    pub token: String,

    /// Account email
    pub email: String,

    /// Account display name (not sent by every login path)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
