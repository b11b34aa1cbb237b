//! Reservation Model

use super::ParseEnumError;
use crate::error::ErrorCode;
use crate::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, ValidationError, validate_email, validate_phone,
    validate_optional_text, validate_required_text,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reservation status (console codes 1/2/3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    #[default]
    Booked,
    Cancelled,
    Completed,
}

impl ReservationStatus {
    pub const ALL: [ReservationStatus; 3] = [Self::Booked, Self::Cancelled, Self::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Booked => "booked",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            Self::Booked => 1,
            Self::Cancelled => 2,
            Self::Completed => 3,
        }
    }

    pub fn from_code(code: i64) -> Result<Self, ParseEnumError> {
        Self::ALL
            .into_iter()
            .find(|s| s.code() == code)
            .ok_or_else(|| Self::unknown(code.to_string()))
    }

    fn unknown(value: String) -> ParseEnumError {
        ParseEnumError::new(
            "reservation status",
            value,
            ErrorCode::InvalidReservationStatus,
        )
    }
}

impl FromStr for ReservationStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<i64>() {
            return Self::from_code(code);
        }
        Self::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Self::unknown(s.to_string()))
    }
}

impl TryFrom<String> for ReservationStatus {
    type Error = ParseEnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reservation entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Reservation {
    pub id: i64,
    pub customer_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub table_id: i64,
    /// Free-text reservation time as entered
    pub date_time: String,
    #[cfg_attr(feature = "db", sqlx(try_from = "String"))]
    pub status: ReservationStatus,
}

/// Create reservation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationCreate {
    pub customer_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub table_id: i64,
    pub date_time: String,
    #[serde(default)]
    pub status: ReservationStatus,
}

impl ReservationCreate {
    pub fn new(
        customer_name: impl Into<String>,
        email: Option<String>,
        phone: Option<String>,
        table_id: i64,
        date_time: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let customer_name = customer_name.into().trim().to_string();
        let date_time = date_time.into().trim().to_string();
        let email = email.map(|e| e.trim().to_string()).filter(|e| !e.is_empty());
        let phone = phone.map(|p| p.trim().to_string()).filter(|p| !p.is_empty());

        validate_required_text(&customer_name, "customer_name", MAX_NAME_LEN)?;
        validate_optional_text(&email, "email", MAX_EMAIL_LEN)?;
        if let Some(email) = &email {
            validate_email(email)?;
        }
        if let Some(phone) = &phone {
            validate_phone(phone)?;
        }
        if table_id <= 0 {
            return Err(ValidationError::OutOfRange {
                field: "table_id",
                value: table_id.to_string(),
                expected: "a positive table id",
            });
        }
        validate_required_text(&date_time, "date_time", MAX_NOTE_LEN)?;

        Ok(Self {
            customer_name,
            email,
            phone,
            table_id,
            date_time,
            status: ReservationStatus::Booked,
        })
    }

    pub fn with_status(mut self, status: ReservationStatus) -> Self {
        self.status = status;
        self
    }
}
