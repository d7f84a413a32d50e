//! Input validation for stored values.

use std::fmt;

/// Validation error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Empty value where one is required.
    Empty(String),
    /// Value too long.
    TooLong {
        field: String,
        max: usize,
        actual: usize,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Empty(field) => write!(f, "{} cannot be empty", field),
            ValidationError::TooLong { field, max, actual } => {
                write!(f, "{} is too long ({} chars, max {})", field, actual, max)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Maximum allowed length for labels.
pub const MAX_LABEL_LENGTH: usize = 200;

/// Maximum allowed length for usernames.
pub const MAX_USERNAME_LENGTH: usize = 200;

/// Maximum allowed length for passwords and password values.
pub const MAX_SECRET_LENGTH: usize = 500;

/// Maximum allowed length for email addresses.
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Validate a credential/password label: non-empty after trimming, bounded.
pub fn validate_label(label: &str) -> Result<(), ValidationError> {
    validate_bounded("label", label, MAX_LABEL_LENGTH)
}

/// Validate a username.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    validate_bounded("username", username, MAX_USERNAME_LENGTH)
}

/// Validate a password or password value.
pub fn validate_secret(field: &str, secret: &str) -> Result<(), ValidationError> {
    validate_bounded(field, secret, MAX_SECRET_LENGTH)
}

/// Validate an email address for storage. Shape is the classifier's job;
/// the store only guards emptiness and length.
pub fn validate_email_address(address: &str) -> Result<(), ValidationError> {
    validate_bounded("email", address, MAX_EMAIL_LENGTH)
}

/// Validate that a required free-form field is non-empty after trimming.
pub fn validate_required(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty(field.to_string()));
    }
    Ok(())
}

fn validate_bounded(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    validate_required(field, value)?;

    let actual = value.chars().count();
    if actual > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
            actual,
        });
    }

    Ok(())
}
