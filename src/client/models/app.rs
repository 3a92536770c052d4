//! Application models

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned application identifier.
///
/// The server emits ids as JSON integers, but the client treats them as
/// opaque strings so a change of id scheme does not ripple through.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct AppId(String);

impl AppId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[allow(dead_code)]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AppId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for AppId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl<'de> Deserialize<'de> for AppId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => AppId(n.to_string()),
            RawId::Text(s) => AppId(s),
        })
    }
}

/// Registered SSO application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    /// Application ID (server-assigned, immutable)
    pub id: AppId,

    /// Display name
    pub name: String,

    /// Where users are redirected after authentication
    pub callback_url: String,
}

impl Application {
    #[allow(dead_code)]
    pub fn new(id: impl Into<AppId>, name: impl Into<String>, callback_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            callback_url: callback_url.into(),
        }
    }
}
