//! Inventory Model

use crate::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, ValidationError, validate_non_negative,
    validate_required_text,
};
use serde::{Deserialize, Serialize};

/// Inventory item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct InventoryItem {
    pub id: i64,
    pub name: String,
    pub quantity: i64,
    pub unit: String,
    /// Reorder threshold
    pub threshold: i64,
    /// Last change (Unix millis)
    pub last_updated: i64,
}

impl InventoryItem {
    pub fn needs_reorder(&self) -> bool {
        needs_reorder(self.quantity, self.threshold)
    }
}

/// Stock is below the reorder threshold.
pub fn needs_reorder(quantity: i64, threshold: i64) -> bool {
    quantity < threshold
}

/// Create inventory item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryCreate {
    pub name: String,
    pub quantity: i64,
    pub unit: String,
    pub threshold: i64,
}

impl InventoryCreate {
    pub fn new(
        name: impl Into<String>,
        quantity: i64,
        unit: impl Into<String>,
        threshold: i64,
    ) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        let unit = unit.into().trim().to_string();
        validate_required_text(&name, "name", MAX_NAME_LEN)?;
        validate_non_negative(quantity, "quantity")?;
        validate_required_text(&unit, "unit", MAX_SHORT_TEXT_LEN)?;
        validate_non_negative(threshold, "threshold")?;
        Ok(Self {
            name,
            quantity,
            unit,
            threshold,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_reorder_matches_comparison() {
        for quantity in 0..=20 {
            for threshold in 0..=20 {
                assert_eq!(needs_reorder(quantity, threshold), quantity < threshold);
            }
        }
        assert!(!needs_reorder(i64::MAX, i64::MAX));
        assert!(needs_reorder(0, i64::MAX));
    }

    #[test]
    fn test_item_needs_reorder() {
        let mut item = InventoryItem {
            id: 1,
            name: "Flour".into(),
            quantity: 5,
            unit: "kg".into(),
            threshold: 5,
            last_updated: 0,
        };
        assert!(!item.needs_reorder());
        item.quantity = 4;
        assert!(item.needs_reorder());
    }

    #[test]
    fn test_create_rejections() {
        assert!(InventoryCreate::new("Flour", 10, "kg", 3).is_ok());
        assert_eq!(
            InventoryCreate::new(" ", 10, "kg", 3).unwrap_err(),
            ValidationError::Required { field: "name" }
        );
        assert!(matches!(
            InventoryCreate::new("Flour", -1, "kg", 3),
            Err(ValidationError::Negative { field: "quantity", .. })
        ));
        assert_eq!(
            InventoryCreate::new("Flour", 1, "", 3).unwrap_err(),
            ValidationError::Required { field: "unit" }
        );
        assert!(matches!(
            InventoryCreate::new("Flour", 1, "kg", -3),
            Err(ValidationError::Negative { field: "threshold", .. })
        ));
    }
}
