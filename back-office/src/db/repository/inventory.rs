//! Inventory Repository
//!
//! Stock items are addressed by their unique name.

use super::{Entity, RepoError, RepoResult, ensure_affected, insert_with_pool};
use crate::audit_log;
use shared::error::ErrorCode;
use shared::models::{InventoryCreate, InventoryItem};
use shared::util::now_millis;
use shared::validation::validate_non_negative;
use sqlx::AnyPool;

const INVENTORY_SELECT: &str = "SELECT item_id AS id, name, stock_quantity AS quantity, unit, \
     threshold, last_updated FROM Inventory";

pub async fn find_all(pool: &AnyPool) -> RepoResult<Vec<InventoryItem>> {
    let sql = format!("{INVENTORY_SELECT} ORDER BY name");
    let items = sqlx::query_as::<_, InventoryItem>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(items)
}

pub async fn find_by_name(pool: &AnyPool, name: &str) -> RepoResult<Option<InventoryItem>> {
    let sql = format!("{INVENTORY_SELECT} WHERE name = ?");
    let item = sqlx::query_as::<_, InventoryItem>(&sql)
        .bind(name)
        .fetch_optional(pool)
        .await?;
    Ok(item)
}

/// Items whose stock has fallen below their reorder threshold
pub async fn find_needing_reorder(pool: &AnyPool) -> RepoResult<Vec<InventoryItem>> {
    let sql = format!("{INVENTORY_SELECT} WHERE stock_quantity < threshold ORDER BY name");
    let items = sqlx::query_as::<_, InventoryItem>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(items)
}

pub async fn create(pool: &AnyPool, data: InventoryCreate) -> RepoResult<InventoryItem> {
    let insert = sqlx::query(
        "INSERT INTO Inventory (name, stock_quantity, unit, threshold, last_updated) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&data.name)
    .bind(data.quantity)
    .bind(&data.unit)
    .bind(data.threshold)
    .bind(now_millis());
    let id = insert_with_pool(pool, insert, Entity::InventoryItem)
        .await
        .map_err(|e| {
            e.or_conflict(
                ErrorCode::InventoryItemExists,
                format!("Inventory item '{}' already exists", data.name),
            )
        })?;
    tracing::info!(id, name = %data.name, quantity = data.quantity, "Inventory item created");

    find_by_name(pool, &data.name)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create inventory item".into()))
}

/// Set the stock level of a named item and stamp the change time.
pub async fn update_quantity_by_name(
    pool: &AnyPool,
    name: &str,
    quantity: i64,
) -> RepoResult<InventoryItem> {
    validate_non_negative(quantity, "quantity")?;
    let result = sqlx::query(
        "UPDATE Inventory SET stock_quantity = ?, last_updated = ? WHERE name = ?",
    )
    .bind(quantity)
    .bind(now_millis())
    .bind(name)
    .execute(pool)
    .await?;
    ensure_affected(&result, Entity::InventoryItem, name)?;

    let resource = format!("inventory:{name}");
    let quantity_text = quantity.to_string();
    audit_log!("update_stock", resource.as_str(), quantity_text.as_str());
    find_by_name(pool, name)
        .await?
        .ok_or_else(|| RepoError::not_found(Entity::InventoryItem, name))
}

pub async fn delete_by_name(pool: &AnyPool, name: &str) -> RepoResult<()> {
    let result = sqlx::query("DELETE FROM Inventory WHERE name = ?")
        .bind(name)
        .execute(pool)
        .await?;
    ensure_affected(&result, Entity::InventoryItem, name)?;
    let resource = format!("inventory:{name}");
    audit_log!("delete_inventory_item", resource.as_str());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    fn stock(name: &str, quantity: i64, threshold: i64) -> InventoryCreate {
        InventoryCreate::new(name, quantity, "kg", threshold).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let pool = test_pool().await;
        let before = now_millis();
        let item = create(&pool, stock("Flour", 20, 5)).await.unwrap();

        assert_eq!(item.name, "Flour");
        assert_eq!(item.quantity, 20);
        assert_eq!(item.unit, "kg");
        assert!(item.last_updated >= before);
        assert!(!item.needs_reorder());
        assert!(find_by_name(&pool, "Sugar").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_name() {
        let pool = test_pool().await;
        create(&pool, stock("Flour", 20, 5)).await.unwrap();
        let err = create(&pool, stock("Flour", 1, 0)).await.unwrap_err();
        assert!(matches!(
            err,
            RepoError::Conflict(ErrorCode::InventoryItemExists, _)
        ));
    }

    #[tokio::test]
    async fn test_reorder_list_is_strictly_below_threshold() {
        let pool = test_pool().await;
        create(&pool, stock("Flour", 4, 5)).await.unwrap();
        create(&pool, stock("Sugar", 5, 5)).await.unwrap();
        create(&pool, stock("Butter", 0, 2)).await.unwrap();
        create(&pool, stock("Salt", 9, 1)).await.unwrap();

        let low = find_needing_reorder(&pool).await.unwrap();
        let names: Vec<_> = low.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Butter", "Flour"]);
        assert!(low.iter().all(InventoryItem::needs_reorder));
        assert_eq!(find_all(&pool).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_update_quantity_by_name() {
        let pool = test_pool().await;
        create(&pool, stock("Flour", 20, 5)).await.unwrap();

        let updated = update_quantity_by_name(&pool, "Flour", 3).await.unwrap();
        assert_eq!(updated.quantity, 3);
        assert!(updated.needs_reorder());

        let err = update_quantity_by_name(&pool, "Flour", -1).await.unwrap_err();
        assert!(matches!(err, RepoError::Input(_)));
        let err = update_quantity_by_name(&pool, "Yeast", 1).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_by_name() {
        let pool = test_pool().await;
        create(&pool, stock("Flour", 20, 5)).await.unwrap();

        delete_by_name(&pool, "Flour").await.unwrap();
        assert!(find_by_name(&pool, "Flour").await.unwrap().is_none());
        assert!(delete_by_name(&pool, "Flour").await.unwrap_err().is_not_found());
    }
}
