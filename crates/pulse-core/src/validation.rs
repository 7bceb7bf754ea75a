//! Form-level validation for login and registration input.
//!
//! These checks run in front of [`SessionManager`](crate::session::SessionManager),
//! which itself only rejects empty fields.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

/// Minimum accepted display-name length, in characters.
pub const MIN_NAME_CHARS: usize = 2;
/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_CHARS: usize = 6;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"));

/// Form field a validation message refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Password,
}

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

/// All field errors from one form submission, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    fn push(&mut self, field: Field, message: &str) {
        self.errors.push(FieldError {
            field,
            message: message.to_string(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the message for `field`, if that field was rejected.
    pub fn message_for(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

fn check_name(name: &str, errors: &mut ValidationErrors) {
    if name.is_empty() {
        errors.push(Field::Name, "Name is required");
    } else if name.chars().count() < MIN_NAME_CHARS {
        errors.push(Field::Name, "Name must be at least 2 characters");
    }
}

fn check_email(email: &str, errors: &mut ValidationErrors) {
    if email.is_empty() {
        errors.push(Field::Email, "Email is required");
    } else if !EMAIL_PATTERN.is_match(email) {
        errors.push(Field::Email, "Email is invalid");
    }
}

/// Returns true when `email` has the `something@something.something` shape.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Validates a login form: email shape and a non-empty password.
pub fn validate_login(email: &str, password: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    check_email(email, &mut errors);
    if password.is_empty() {
        errors.push(Field::Password, "Password is required");
    }
    errors.into_result()
}

/// Validates a registration form.
///
/// Every field is checked so the caller can show all messages at once.
pub fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    check_name(name, &mut errors);
    check_email(email, &mut errors);
    if password.is_empty() {
        errors.push(Field::Password, "Password is required");
    } else if password.chars().count() < MIN_PASSWORD_CHARS {
        errors.push(Field::Password, "Password must be at least 6 characters");
    }
    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last@sub.example.org"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("missing-at.com"));
        assert!(!is_valid_email("a @b.com"));
    }

    #[test]
    fn test_validate_login_ok() {
        assert!(validate_login("a@b.com", "pw").is_ok());
    }

    #[test]
    fn test_validate_login_reports_both_fields() {
        let errors = validate_login("", "").unwrap_err();
        assert_eq!(errors.errors.len(), 2);
        assert_eq!(errors.message_for(Field::Email), Some("Email is required"));
        assert_eq!(
            errors.message_for(Field::Password),
            Some("Password is required")
        );
    }

    #[test]
    fn test_validate_registration_lengths() {
        let errors = validate_registration("J", "jane@x.com", "12345").unwrap_err();
        assert_eq!(errors.errors[0].field, Field::Name);
        assert_eq!(errors.errors[1].field, Field::Password);
        assert!(errors.message_for(Field::Email).is_none());
    }

    #[test]
    fn test_validate_registration_ok() {
        assert!(validate_registration("Jane", "jane@x.com", "secret").is_ok());
    }

    #[test]
    fn test_display_joins_messages() {
        let errors = validate_registration("", "bad", "secret").unwrap_err();
        assert_eq!(
            errors.to_string(),
            "name: Name is required; email: Email is invalid"
        );
    }
}
