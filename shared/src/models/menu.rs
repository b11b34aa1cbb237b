//! Menu Model
//!
//! A menu owns an ordered list of uniquely named subgroups ("Appetizers",
//! "Entrees", ...). Menu and subgroups are created together in one
//! transaction; subgroup order is insertion order.

use super::MenuItem;
use crate::validation::{MAX_NAME_LEN, MAX_POS_NAME_LEN, ValidationError, validate_required_text};
use serde::{Deserialize, Serialize};

/// Menu entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Menu {
    pub id: i64,
    pub name: String,
    /// Short name shown on the POS
    pub pos_name: String,
}

/// Menu subgroup entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuSubgroup {
    pub id: i64,
    pub menu_id: i64,
    pub subgroup_name: String,
}

/// Create menu payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuCreate {
    pub name: String,
    pub pos_name: String,
    /// Subgroup names in display order (may be empty)
    pub subgroups: Vec<String>,
}

impl MenuCreate {
    pub fn new<I, S>(
        name: impl Into<String>,
        pos_name: impl Into<String>,
        subgroups: I,
    ) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into().trim().to_string();
        let pos_name = pos_name.into().trim().to_string();
        validate_required_text(&name, "name", MAX_NAME_LEN)?;
        validate_required_text(&pos_name, "pos_name", MAX_POS_NAME_LEN)?;

        let mut names: Vec<String> = Vec::new();
        for raw in subgroups {
            let sub = raw.into().trim().to_string();
            validate_required_text(&sub, "subgroup_name", MAX_NAME_LEN)?;
            if names.contains(&sub) {
                return Err(ValidationError::DuplicateValue {
                    field: "subgroup_name",
                    value: sub,
                });
            }
            names.push(sub);
        }

        Ok(Self {
            name,
            pos_name,
            subgroups: names,
        })
    }
}

/// One subgroup of a menu together with its items (sorted by name)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuSection {
    pub subgroup: MenuSubgroup,
    pub items: Vec<MenuItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_create_keeps_order() {
        let menu = MenuCreate::new("Dinner", "DIN", ["Appetizers", " Entrees "]).unwrap();
        assert_eq!(menu.name, "Dinner");
        assert_eq!(menu.pos_name, "DIN");
        assert_eq!(menu.subgroups, vec!["Appetizers", "Entrees"]);
    }

    #[test]
    fn test_menu_create_empty_subgroups() {
        let menu = MenuCreate::new("Lunch", "LUN", Vec::<String>::new()).unwrap();
        assert!(menu.subgroups.is_empty());
    }

    #[test]
    fn test_menu_create_rejections() {
        assert_eq!(
            MenuCreate::new("", "DIN", ["A"]).unwrap_err(),
            ValidationError::Required { field: "name" }
        );
        assert_eq!(
            MenuCreate::new("Dinner", "  ", ["A"]).unwrap_err(),
            ValidationError::Required { field: "pos_name" }
        );
        assert_eq!(
            MenuCreate::new("Dinner", "DIN", ["A", ""]).unwrap_err(),
            ValidationError::Required {
                field: "subgroup_name"
            }
        );
        assert_eq!(
            MenuCreate::new("Dinner", "DIN", ["Mains", "Mains"]).unwrap_err(),
            ValidationError::DuplicateValue {
                field: "subgroup_name",
                value: "Mains".into()
            }
        );
    }
}
