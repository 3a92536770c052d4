//! Response envelopes shared by every endpoint

use serde::Deserialize;

use super::Application;

/// Success envelope: `{"status": "success", "data": ...}`
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// Payload of the dashboard listing endpoint
#[derive(Debug, Deserialize)]
pub struct AppsPayload {
    /// `null` when the account has no applications yet
    #[serde(default)]
    pub apps: Option<Vec<Application>>,
}

/// Failure body: `{"status": "error", "message": ...}`
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Parse an error body, keeping only a non-blank message.
    pub fn message_from(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apps_payload_null_apps() {
        let env: DataEnvelope<AppsPayload> =
            serde_json::from_str(r#"{"status":"success","data":{"apps":null,"user":{"id":1}}}"#)
                .unwrap();
        assert!(env.data.apps.is_none());
    }

    #[test]
    fn test_error_body_message() {
        assert_eq!(
            ErrorBody::message_from(r#"{"status":"error","message":"App not found"}"#),
            Some("App not found".to_string())
        );
    }

    #[test]
    fn test_error_body_blank_or_garbage() {
        assert_eq!(ErrorBody::message_from(r#"{"message":"  "}"#), None);
        assert_eq!(ErrorBody::message_from("<html>502</html>"), None);
        assert_eq!(ErrorBody::message_from(""), None);
    }
}
