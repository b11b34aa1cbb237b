//! Dining Table Model

use super::ParseEnumError;
use crate::error::ErrorCode;
use crate::validation::{ValidationError, validate_non_negative};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Table status (console codes 1 free / 2 occupied / 3 reserved)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableStatus {
    #[default]
    Free,
    Occupied,
    Reserved,
}

impl TableStatus {
    pub const ALL: [TableStatus; 3] = [Self::Free, Self::Occupied, Self::Reserved];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Occupied => "occupied",
            Self::Reserved => "reserved",
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            Self::Free => 1,
            Self::Occupied => 2,
            Self::Reserved => 3,
        }
    }

    pub fn from_code(code: i64) -> Result<Self, ParseEnumError> {
        Self::ALL
            .into_iter()
            .find(|s| s.code() == code)
            .ok_or_else(|| {
                ParseEnumError::new("table status", code.to_string(), ErrorCode::InvalidTableStatus)
            })
    }
}

impl FromStr for TableStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<i64>() {
            return Self::from_code(code);
        }
        Self::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseEnumError::new("table status", s, ErrorCode::InvalidTableStatus))
    }
}

impl TryFrom<String> for TableStatus {
    type Error = ParseEnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dining table entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DiningTable {
    pub id: i64,
    /// Number painted on the table, unique
    pub table_number: i64,
    pub capacity: i64,
    #[cfg_attr(feature = "db", sqlx(try_from = "String"))]
    pub status: TableStatus,
}

/// Create dining table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTableCreate {
    pub table_number: i64,
    pub capacity: i64,
    #[serde(default)]
    pub status: TableStatus,
}

impl DiningTableCreate {
    pub fn new(
        table_number: i64,
        capacity: i64,
        status: TableStatus,
    ) -> Result<Self, ValidationError> {
        validate_table_number(table_number)?;
        validate_non_negative(capacity, "capacity")?;
        Ok(Self {
            table_number,
            capacity,
            status,
        })
    }
}

/// Update dining table payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiningTableUpdate {
    pub table_number: Option<i64>,
    pub capacity: Option<i64>,
    pub status: Option<TableStatus>,
}

impl DiningTableUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(number) = self.table_number {
            validate_table_number(number)?;
        }
        if let Some(capacity) = self.capacity {
            validate_non_negative(capacity, "capacity")?;
        }
        Ok(())
    }
}

fn validate_table_number(number: i64) -> Result<(), ValidationError> {
    if number <= 0 {
        return Err(ValidationError::OutOfRange {
            field: "table_number",
            value: number.to_string(),
            expected: "greater than zero",
        });
    }
    Ok(())
}
