//! Input validation
//!
//! Pure predicates that gate submissions before anything is sent. None of
//! these touch the network.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;

/// Minimum accepted password length, in characters
pub const MIN_PASSWORD_LEN: usize = 8;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Check that `email` looks like `local@domain.tld`.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if EMAIL_PATTERN.is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

/// Check the password policy, then that the confirmation matches.
pub fn validate_password(password: &str, confirmation: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    if password != confirmation {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

/// Live mismatch check, run whenever either password field changes.
///
/// An empty confirmation is not reported yet.
pub fn confirmation_error(password: &str, confirmation: &str) -> Option<ValidationError> {
    if !confirmation.is_empty() && password != confirmation {
        Some(ValidationError::PasswordMismatch)
    } else {
        None
    }
}

/// Both application fields must be filled in.
pub fn validate_app_fields(name: &str, callback_url: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() || callback_url.trim().is_empty() {
        return Err(ValidationError::MissingAppFields);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_examples() {
        assert!(validate_email("a@b.co").is_ok());
        assert_eq!(validate_email("a@b"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("abc"), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn test_email_rejects_whitespace_and_double_at() {
        assert!(validate_email("a b@c.de").is_err());
        assert!(validate_email("a@@c.de").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_password_too_short_regardless_of_match() {
        assert_eq!(
            validate_password("1234567", "1234567"),
            Err(ValidationError::PasswordTooShort { min: 8 })
        );
        assert_eq!(
            validate_password("1234567", "nope"),
            Err(ValidationError::PasswordTooShort { min: 8 })
        );
    }

    #[test]
    fn test_password_length_eight_mismatch() {
        assert_eq!(
            validate_password("12345678", "12345679"),
            Err(ValidationError::PasswordMismatch)
        );
    }

    #[test]
    fn test_password_length_eight_match() {
        assert!(validate_password("12345678", "12345678").is_ok());
    }

    #[test]
    fn test_password_counts_characters_not_bytes() {
        // 8 characters, 16 bytes
        let pw = "éééééééé";
        assert!(validate_password(pw, pw).is_ok());
        assert!(validate_password("éééé", "éééé").is_err());
    }

    #[test]
    fn test_confirmation_error() {
        assert_eq!(confirmation_error("secret12", ""), None);
        assert_eq!(confirmation_error("secret12", "secret12"), None);
        assert_eq!(
            confirmation_error("secret12", "secret1"),
            Some(ValidationError::PasswordMismatch)
        );
    }

    #[test]
    fn test_app_fields() {
        assert!(validate_app_fields("X", "https://x.test/cb").is_ok());
        assert_eq!(
            validate_app_fields("  ", "https://x.test/cb"),
            Err(ValidationError::MissingAppFields)
        );
        assert_eq!(
            validate_app_fields("X", ""),
            Err(ValidationError::MissingAppFields)
        );
    }
}
