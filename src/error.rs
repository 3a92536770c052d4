//! Error types for the ssodash CLI

use thiserror::Error;

/// Result type alias for ssodash operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Operation failed: {0}")]
    Other(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

impl Error {
    /// The API error behind this error, if any.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }

    /// Whether this error means the session is missing or was rejected.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Api(ApiError::Unauthorized { .. }))
    }

    /// Message the server supplied for this failure, safe to show to the user.
    pub fn server_message(&self) -> Option<&str> {
        self.as_api().and_then(ApiError::server_message)
    }
}

fn detail(message: &Option<String>) -> &str {
    message.as_deref().unwrap_or("no details")
}

/// API-related errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Session is missing or expired. Run `ssodash login` to sign in again.")]
    Unauthorized { message: Option<String> },

    #[error("Sign-in rejected: {}", detail(.message))]
    LoginRejected { message: Option<String> },

    #[error("Resource not found: {}", detail(.message))]
    NotFound { message: Option<String> },

    #[error("Request rejected: {}", detail(.message))]
    Validation { message: Option<String> },

    #[error("Reset link is invalid or expired: {}", detail(.message))]
    InvalidToken { message: Option<String> },

    #[error("Server error ({status}): {}", detail(.message))]
    ServerError { status: u16, message: Option<String> },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// The `message` field the server put in its error body.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { message }
            | ApiError::LoginRejected { message }
            | ApiError::NotFound { message }
            | ApiError::Validation { message }
            | ApiError::InvalidToken { message }
            | ApiError::ServerError { message, .. } => message.as_deref(),
            ApiError::Network(_) | ApiError::InvalidResponse(_) => None,
        }
    }

    /// Whether the request never produced an HTTP response.
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Local input validation failures. These never reach the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Password must be at least {min} characters long")]
    PasswordTooShort { min: usize },

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Name and Callback URL are required")]
    MissingAppFields,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_unauthorized_message() {
        let err = ApiError::Unauthorized { message: None };
        assert!(err.to_string().contains("ssodash login"));
    }

    #[test]
    fn test_login_rejected_is_not_a_lost_session() {
        let err: Error = ApiError::LoginRejected { message: None }.into();
        assert!(!err.is_unauthorized());
        assert_eq!(err.to_string(), "Sign-in rejected: no details");
    }

    #[test]
    fn test_api_error_not_found_with_detail() {
        let err = ApiError::NotFound {
            message: Some("App not found".to_string()),
        };
        assert!(err.to_string().contains("App not found"));
    }

    #[test]
    fn test_api_error_not_found_without_detail() {
        let err = ApiError::NotFound { message: None };
        assert!(err.to_string().contains("no details"));
    }

    #[test]
    fn test_api_error_server_error() {
        let err = ApiError::ServerError {
            status: 500,
            message: Some("Error inserting the app".to_string()),
        };
        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("Error inserting the app"));
    }

    #[test]
    fn test_api_error_network() {
        let err = ApiError::Network("Connection refused".to_string());
        assert!(err.to_string().contains("Connection refused"));
        assert!(err.is_network());
        assert_eq!(err.server_message(), None);
    }

    #[test]
    fn test_server_message_passes_through() {
        let err: Error = ApiError::Validation {
            message: Some("Name and Callback URL are required".to_string()),
        }
        .into();
        assert_eq!(
            err.server_message(),
            Some("Name and Callback URL are required")
        );
    }

    #[test]
    fn test_is_unauthorized() {
        let err: Error = ApiError::Unauthorized { message: None }.into();
        assert!(err.is_unauthorized());

        let err: Error = ApiError::NotFound { message: None }.into();
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(
            ValidationError::InvalidEmail.to_string(),
            "Please enter a valid email address"
        );
        assert_eq!(
            ValidationError::PasswordTooShort { min: 8 }.to_string(),
            "Password must be at least 8 characters long"
        );
        assert_eq!(
            ValidationError::PasswordMismatch.to_string(),
            "Passwords do not match"
        );
    }

    #[test]
    fn test_error_from_validation_error() {
        let err: Error = ValidationError::MissingAppFields.into();
        match err {
            Error::Validation(ValidationError::MissingAppFields) => (),
            _ => panic!("Expected Error::Validation(MissingAppFields)"),
        }
    }

    #[test]
    fn test_config_error_from_yaml_error() {
        let yaml_str = "invalid: [yaml: content";
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let config_err: ConfigError = yaml_err.into();

        match config_err {
            ConfigError::ParseError(_) => (),
            _ => panic!("Expected ConfigError::ParseError"),
        }
    }
}
