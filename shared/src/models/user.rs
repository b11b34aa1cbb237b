//! User Model

use super::ParseEnumError;
use crate::error::ErrorCode;
use crate::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, ValidationError, validate_email,
    validate_password, validate_phone, validate_required_text,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// User role
///
/// The console used the codes 1 (admin), 2 (staff) and 3 (customer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Staff,
    Customer,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Staff, Role::Customer];

    /// Stored column value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Staff => "staff",
            Self::Customer => "customer",
        }
    }

    /// Console menu code
    pub fn code(&self) -> i64 {
        match self {
            Self::Admin => 1,
            Self::Staff => 2,
            Self::Customer => 3,
        }
    }

    pub fn from_code(code: i64) -> Result<Self, ParseEnumError> {
        Self::ALL
            .into_iter()
            .find(|r| r.code() == code)
            .ok_or_else(|| ParseEnumError::new("role", code.to_string(), ErrorCode::InvalidRole))
    }
}

impl FromStr for Role {
    type Err = ParseEnumError;

    /// Accepts the stored name (any case) or the console code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<i64>() {
            return Self::from_code(code);
        }
        Self::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseEnumError::new("role", s, ErrorCode::InvalidRole))
    }
}

impl TryFrom<String> for Role {
    type Error = ParseEnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User entity (password hash never serialized)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    #[cfg_attr(feature = "db", sqlx(try_from = "String"))]
    pub role: Role,
    pub email: String,
    pub phone: String,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_staff(&self) -> bool {
        self.role == Role::Staff
    }
}

/// Create user payload
///
/// Holds the plaintext password until the repository hashes it.
#[derive(Clone, Deserialize)]
pub struct UserCreate {
    pub username: String,
    pub password: String,
    pub role: Role,
    pub email: String,
    pub phone: String,
}

impl UserCreate {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        role: Role,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let data = Self {
            username: username.into().trim().to_string(),
            password: password.into(),
            role,
            email: email.into().trim().to_string(),
            phone: phone.into().trim().to_string(),
        };
        validate_required_text(&data.username, "username", MAX_NAME_LEN)?;
        validate_password(&data.password)?;
        validate_required_text(&data.email, "email", MAX_EMAIL_LEN)?;
        validate_email(&data.email)?;
        validate_required_text(&data.phone, "phone", MAX_SHORT_TEXT_LEN)?;
        validate_phone(&data.phone)?;
        Ok(data)
    }
}

impl fmt::Debug for UserCreate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCreate")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Result<UserCreate, ValidationError> {
        UserCreate::new(
            "maria",
            "secret!1",
            Role::Staff,
            "maria@example.com",
            "5551234567",
        )
    }

    #[test]
    fn test_role_codes() {
        assert_eq!(Role::from_code(1), Ok(Role::Admin));
        assert_eq!(Role::from_code(2), Ok(Role::Staff));
        assert_eq!(Role::from_code(3), Ok(Role::Customer));
        let err = Role::from_code(4).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidRole);
        assert_eq!(err.to_string(), "unknown role '4'");
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("STAFF".parse::<Role>(), Ok(Role::Staff));
        assert_eq!("3".parse::<Role>(), Ok(Role::Customer));
        assert!("manager".parse::<Role>().is_err());
        assert!(Role::try_from(String::new()).is_err());
    }

    #[test]
    fn test_user_create_valid() {
        let data = valid().unwrap();
        assert_eq!(data.username, "maria");
        assert_eq!(data.role, Role::Staff);
    }

    #[test]
    fn test_user_create_rejections() {
        assert_eq!(
            UserCreate::new(" ", "secret!1", Role::Staff, "a@b.com", "5551234567").unwrap_err(),
            ValidationError::Required { field: "username" }
        );
        assert!(matches!(
            UserCreate::new("maria", "short", Role::Staff, "a@b.com", "5551234567"),
            Err(ValidationError::PasswordTooShort { .. })
        ));
        assert!(matches!(
            UserCreate::new("maria", "secret!1", Role::Staff, "not-an-email", "5551234567"),
            Err(ValidationError::InvalidEmail { .. })
        ));
        assert!(matches!(
            UserCreate::new("maria", "secret!1", Role::Staff, "a@b.com", "0123456789"),
            Err(ValidationError::InvalidPhone { .. })
        ));
    }

    #[test]
    fn test_debug_redacts_password() {
        let debug = format!("{:?}", valid().unwrap());
        assert!(!debug.contains("secret!1"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_user_serialize_skips_hash() {
        let user = User {
            id: 1,
            username: "maria".into(),
            password_hash: "$argon2id$...".into(),
            role: Role::Admin,
            email: "maria@example.com".into(),
            phone: "5551234567".into(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(json.contains("\"role\":\"admin\""));
        assert!(user.is_admin());
        assert!(!user.is_staff());
    }
}
