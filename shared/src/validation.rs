//! Input validation helpers
//!
//! Centralized text length constants and the field rules enforced by the
//! `*Create::new` constructors. Every failure is a specific
//! [`ValidationError`] variant so callers can tell a blank name from a bad
//! phone number.

use crate::error::{AppError, ErrorCode};
use crate::models::ParseEnumError;
use thiserror::Error;
use validator::ValidateEmail;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: user, menu, subgroup, menu item, inventory item, customer
pub const MAX_NAME_LEN: usize = 200;

/// POS names are printed on receipts
pub const MAX_POS_NAME_LEN: usize = 64;

/// Descriptions, task text, free-form reservation times
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone, unit, category
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Minimum password length
pub const MIN_PASSWORD_LEN: usize = 7;

/// Phone numbers are exactly this many digits
pub const PHONE_DIGITS: usize = 10;

/// Field-level validation failure
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Required { field: &'static str },

    #[error("{field} is too long ({len} chars, max {max})")]
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: String },

    #[error("{field} must be {expected} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("'{value}' is not a valid email address")]
    InvalidEmail { value: String },

    #[error("'{value}' is not a valid phone number (10 digits, not starting with 0)")]
    InvalidPhone { value: String },

    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("password must contain at least one symbol")]
    PasswordMissingSymbol,

    #[error("{field} must be a number (got '{value}')")]
    NotANumber { field: &'static str, value: String },

    #[error("{field} '{value}' is listed more than once")]
    DuplicateValue { field: &'static str, value: String },

    #[error(transparent)]
    UnknownVariant(#[from] ParseEnumError),
}

impl ValidationError {
    /// Name of the offending field, when the failure is tied to one
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Required { field }
            | Self::TooLong { field, .. }
            | Self::Negative { field, .. }
            | Self::OutOfRange { field, .. }
            | Self::NotANumber { field, .. }
            | Self::DuplicateValue { field, .. } => Some(field),
            Self::InvalidEmail { .. } => Some("email"),
            Self::InvalidPhone { .. } => Some("phone"),
            Self::PasswordTooShort { .. } | Self::PasswordMissingSymbol => Some("password"),
            Self::UnknownVariant(e) => Some(e.domain),
        }
    }

    /// Error code this failure maps to
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Negative { field: "price", .. } | Self::OutOfRange { field: "price", .. } => {
                ErrorCode::MenuItemInvalidPrice
            }
            Self::Required { .. } => ErrorCode::RequiredField,
            Self::TooLong { .. } | Self::Negative { .. } | Self::OutOfRange { .. } => {
                ErrorCode::ValueOutOfRange
            }
            Self::InvalidEmail { .. } | Self::InvalidPhone { .. } | Self::NotANumber { .. } => {
                ErrorCode::InvalidFormat
            }
            Self::PasswordTooShort { .. } | Self::PasswordMissingSymbol => {
                ErrorCode::PasswordTooWeak
            }
            Self::DuplicateValue { .. } => ErrorCode::ValidationFailed,
            Self::UnknownVariant(e) => e.code,
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        let app = AppError::with_message(err.code(), err.to_string());
        match err.field() {
            Some(field) => app.with_detail("field", field),
            None => app,
        }
    }
}

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-blank and within the length limit.
pub fn validate_required_text(
    value: &str,
    field: &'static str,
    max_len: usize,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required { field });
    }
    check_len(value, field, max_len)
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &'static str,
    max_len: usize,
) -> Result<(), ValidationError> {
    if let Some(v) = value {
        check_len(v, field, max_len)?;
    }
    Ok(())
}

fn check_len(value: &str, field: &'static str, max_len: usize) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len > max_len {
        return Err(ValidationError::TooLong {
            field,
            len,
            max: max_len,
        });
    }
    Ok(())
}

/// Basic `local@domain.tld` check.
pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    let invalid = || ValidationError::InvalidEmail {
        value: value.to_string(),
    };
    if value.len() > MAX_EMAIL_LEN || !value.to_string().validate_email() {
        return Err(invalid());
    }
    // validator accepts bare hosts such as `localhost`
    let domain = value.rsplit_once('@').map(|(_, d)| d).unwrap_or_default();
    match domain.rsplit_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() => Ok(()),
        _ => Err(invalid()),
    }
}

/// Exactly ten ASCII digits, the first one non-zero.
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let mut chars = value.chars();
    let first_ok = matches!(chars.next(), Some('1'..='9'));
    let ok = first_ok && value.len() == PHONE_DIGITS && chars.all(|c| c.is_ascii_digit());
    if !ok {
        return Err(ValidationError::InvalidPhone {
            value: value.to_string(),
        });
    }
    Ok(())
}

/// At least [`MIN_PASSWORD_LEN`] characters including one non-word character.
pub fn validate_password(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    check_len(value, "password", MAX_PASSWORD_LEN)?;
    if value.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(ValidationError::PasswordMissingSymbol);
    }
    Ok(())
}

pub fn validate_non_negative(value: i64, field: &'static str) -> Result<(), ValidationError> {
    if value < 0 {
        return Err(ValidationError::Negative {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Prices must be finite and not below zero.
pub fn validate_price(value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::OutOfRange {
            field: "price",
            value: value.to_string(),
            expected: "a finite amount",
        });
    }
    if value < 0.0 {
        return Err(ValidationError::Negative {
            field: "price",
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Parse console input such as a quantity or an id.
pub fn parse_number<T: std::str::FromStr>(
    value: &str,
    field: &'static str,
) -> Result<T, ValidationError> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| ValidationError::NotANumber {
            field,
            value: value.to_string(),
        })
}
