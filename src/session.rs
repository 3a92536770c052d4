//! Bearer credential and the session that scopes it
//!
//! A [`Session`] is created from whatever token the config holds, handed to
//! the dashboard, and cleared when the service rejects the token. Nothing
//! reads the token from ambient state.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tokio::sync::RwLock;

/// Opaque bearer token
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token, for the `Authorization` header only.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Expiry claimed by the token if it is a JWT.
    ///
    /// Informational only: the client never refuses to send a token based on
    /// this, the service stays the judge of validity.
    pub fn claimed_expiry(&self) -> Option<DateTime<Utc>> {
        use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};

        #[derive(Deserialize)]
        struct Claims {
            exp: i64,
        }

        let payload = self.0.split('.').nth(1)?;
        let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
        let claims: Claims = serde_json::from_slice(&bytes).ok()?;
        DateTime::from_timestamp(claims.exp, 0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Holder for the current credential.
///
/// Set at login, cleared at logout or when the service answers 401.
#[derive(Debug, Default)]
pub struct Session {
    credential: RwLock<Option<Credential>>,
}

impl Session {
    pub fn new(credential: Option<Credential>) -> Self {
        Self {
            credential: RwLock::new(credential),
        }
    }

    /// Session with no credential.
    #[allow(dead_code)]
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub async fn credential(&self) -> Option<Credential> {
        self.credential.read().await.clone()
    }

    #[allow(dead_code)]
    pub async fn is_active(&self) -> bool {
        self.credential.read().await.is_some()
    }

    #[allow(dead_code)]
    pub async fn sign_in(&self, credential: Credential) {
        *self.credential.write().await = Some(credential);
    }

    /// Drop the credential. Returns whether one was held.
    pub async fn sign_out(&self) -> bool {
        self.credential.write().await.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt_with_payload(payload: &str) -> String {
        use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
        format!(
            "{}.{}.sig",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256"}"#),
            URL_SAFE_NO_PAD.encode(payload)
        )
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let cred = Credential::new("super-secret");
        assert!(!format!("{:?}", cred).contains("super-secret"));
    }

    #[test]
    fn test_claimed_expiry_from_jwt() {
        let cred = Credential::new(jwt_with_payload(r#"{"id":1,"exp":1900000000}"#));
        let expiry = cred.claimed_expiry().unwrap();
        assert_eq!(expiry.timestamp(), 1_900_000_000);
    }

    #[test]
    fn test_claimed_expiry_opaque_token() {
        assert!(Credential::new("opaque").claimed_expiry().is_none());
        assert!(Credential::new("a.%%%.c").claimed_expiry().is_none());
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let session = Session::anonymous();
        assert!(!session.is_active().await);
        assert!(!session.sign_out().await);

        session.sign_in(Credential::new("t")).await;
        assert!(session.is_active().await);
        assert_eq!(session.credential().await, Some(Credential::new("t")));

        assert!(session.sign_out().await);
        assert!(session.credential().await.is_none());
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let alice = Session::new(Some(Credential::new("alice")));
        let bob = Session::new(Some(Credential::new("bob")));

        alice.sign_out().await;

        assert!(!alice.is_active().await);
        assert_eq!(bob.credential().await, Some(Credential::new("bob")));
    }
}
