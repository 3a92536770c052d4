//! Application display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::Application;
use crate::dashboard::login_url;

/// Application display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct AppDisplay {
    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "CALLBACK URL")]
    pub callback_url: String,

    /// URL users sign in through
    #[tabled(rename = "LOGIN URL")]
    pub login_url: String,
}

impl AppDisplay {
    pub fn new(app: &Application, origin: &str) -> Self {
        Self {
            id: app.id.to_string(),
            name: app.name.clone(),
            callback_url: app.callback_url.clone(),
            login_url: login_url(origin, &app.id),
        }
    }

    pub fn from_apps(apps: &[Application], origin: &str) -> Vec<Self> {
        apps.iter().map(|a| Self::new(a, origin)).collect()
    }
}
