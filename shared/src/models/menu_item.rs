//! Menu Item Model

use super::ParseEnumError;
use crate::error::ErrorCode;
use crate::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, ValidationError, validate_optional_text,
    validate_price, validate_required_text,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether an item can currently be ordered (stored as 0/1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum Availability {
    Unavailable,
    #[default]
    Available,
}

impl Availability {
    pub fn flag(&self) -> i64 {
        match self {
            Self::Unavailable => 0,
            Self::Available => 1,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }
}

impl From<Availability> for i64 {
    fn from(value: Availability) -> Self {
        value.flag()
    }
}

impl From<bool> for Availability {
    fn from(value: bool) -> Self {
        if value {
            Self::Available
        } else {
            Self::Unavailable
        }
    }
}

impl TryFrom<i64> for Availability {
    type Error = ParseEnumError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Unavailable),
            1 => Ok(Self::Available),
            other => Err(ParseEnumError::new(
                "availability",
                other.to_string(),
                ErrorCode::ValueOutOfRange,
            )),
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => f.write_str("no"),
            Self::Available => f.write_str("yes"),
        }
    }
}

/// Menu item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: Option<String>,
    #[cfg_attr(feature = "db", sqlx(try_from = "i64"))]
    pub availability: Availability,
    pub menu_id: Option<i64>,
    pub subgroup_id: Option<i64>,
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: Option<String>,
    pub availability: Availability,
    pub menu_id: Option<i64>,
    pub subgroup_id: Option<i64>,
}

impl MenuItemCreate {
    /// Build a validated payload; `availability` must be 0 or 1.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        price: f64,
        category: Option<String>,
        availability: i64,
        menu_id: Option<i64>,
        subgroup_id: Option<i64>,
    ) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        validate_required_text(&name, "name", MAX_NAME_LEN)?;
        let description = non_blank(description);
        validate_optional_text(&description, "description", MAX_NOTE_LEN)?;
        validate_price(price)?;
        let category = non_blank(category);
        validate_optional_text(&category, "category", MAX_SHORT_TEXT_LEN)?;
        let availability = parse_availability(availability)?;
        Ok(Self {
            name,
            description,
            price,
            category,
            availability,
            menu_id,
            subgroup_id,
        })
    }
}

/// Update menu item payload (absent fields keep their value)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub availability: Option<Availability>,
}

impl MenuItemUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            validate_required_text(name, "name", MAX_NAME_LEN)?;
        }
        validate_optional_text(&self.description, "description", MAX_NOTE_LEN)?;
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        validate_optional_text(&self.category, "category", MAX_SHORT_TEXT_LEN)?;
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category.is_none()
            && self.availability.is_none()
    }
}

/// Map a raw 0/1 flag, rejecting everything else.
pub fn parse_availability(flag: i64) -> Result<Availability, ValidationError> {
    Availability::try_from(flag).map_err(|_| ValidationError::OutOfRange {
        field: "availability",
        value: flag.to_string(),
        expected: "0 or 1",
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
