//! Dining Table Repository
//!
//! Floor tables live in the `Tables` table; `table_number` is unique.

use super::{Entity, RepoError, RepoResult, ensure_affected, insert_with_pool};
use crate::audit_log;
use shared::error::ErrorCode;
use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate, TableStatus};
use sqlx::AnyPool;

const TABLE_SELECT: &str =
    "SELECT table_id AS id, table_number, capacity, status FROM Tables";

fn number_taken(number: impl std::fmt::Display) -> String {
    format!("Table number {number} already exists")
}

pub async fn find_all(pool: &AnyPool) -> RepoResult<Vec<DiningTable>> {
    let sql = format!("{TABLE_SELECT} ORDER BY table_number");
    let tables = sqlx::query_as::<_, DiningTable>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(tables)
}

pub async fn find_by_id(pool: &AnyPool, id: i64) -> RepoResult<Option<DiningTable>> {
    let sql = format!("{TABLE_SELECT} WHERE table_id = ?");
    let table = sqlx::query_as::<_, DiningTable>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(table)
}

pub async fn find_by_number(pool: &AnyPool, number: i64) -> RepoResult<Option<DiningTable>> {
    let sql = format!("{TABLE_SELECT} WHERE table_number = ?");
    let table = sqlx::query_as::<_, DiningTable>(&sql)
        .bind(number)
        .fetch_optional(pool)
        .await?;
    Ok(table)
}

pub async fn find_by_status(pool: &AnyPool, status: TableStatus) -> RepoResult<Vec<DiningTable>> {
    let sql = format!("{TABLE_SELECT} WHERE status = ? ORDER BY table_number");
    let tables = sqlx::query_as::<_, DiningTable>(&sql)
        .bind(status.as_str())
        .fetch_all(pool)
        .await?;
    Ok(tables)
}

pub async fn create(pool: &AnyPool, data: DiningTableCreate) -> RepoResult<DiningTable> {
    let insert = sqlx::query("INSERT INTO Tables (table_number, capacity, status) VALUES (?, ?, ?)")
        .bind(data.table_number)
        .bind(data.capacity)
        .bind(data.status.as_str());
    let id = insert_with_pool(pool, insert, Entity::Table)
        .await
        .map_err(|e| e.or_conflict(ErrorCode::TableNumberExists, number_taken(data.table_number)))?;
    tracing::info!(id, number = data.table_number, capacity = data.capacity, "Table created");

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create table".into()))
}

/// Partial update; absent fields keep their stored value.
pub async fn update(pool: &AnyPool, id: i64, data: DiningTableUpdate) -> RepoResult<DiningTable> {
    data.validate()?;
    let result = sqlx::query(
        "UPDATE Tables SET table_number = COALESCE(?, table_number), \
         capacity = COALESCE(?, capacity), status = COALESCE(?, status) WHERE table_id = ?",
    )
    .bind(data.table_number)
    .bind(data.capacity)
    .bind(data.status.map(|s| s.as_str()))
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| {
        let number = data
            .table_number
            .map(|n| n.to_string())
            .unwrap_or_default();
        RepoError::from(e).or_conflict(ErrorCode::TableNumberExists, number_taken(number))
    })?;
    ensure_affected(&result, Entity::Table, id)?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::not_found(Entity::Table, id))
}

pub async fn update_status(pool: &AnyPool, id: i64, status: TableStatus) -> RepoResult<()> {
    let result = sqlx::query("UPDATE Tables SET status = ? WHERE table_id = ?")
        .bind(status.as_str())
        .bind(id)
        .execute(pool)
        .await?;
    ensure_affected(&result, Entity::Table, id)?;
    tracing::debug!(id, status = %status, "Table status changed");
    Ok(())
}

/// Delete a table; tables with reservations are refused by the foreign key.
pub async fn delete(pool: &AnyPool, id: i64) -> RepoResult<()> {
    let result = sqlx::query("DELETE FROM Tables WHERE table_id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    ensure_affected(&result, Entity::Table, id)?;
    let resource = format!("table:{id}");
    audit_log!("delete_table", resource.as_str());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::reservation;
    use crate::db::test_pool;
    use shared::models::ReservationCreate;

    fn table(number: i64, capacity: i64, status: TableStatus) -> DiningTableCreate {
        DiningTableCreate::new(number, capacity, status).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let pool = test_pool().await;
        let created = create(&pool, table(12, 4, TableStatus::Free)).await.unwrap();

        assert_eq!(created.table_number, 12);
        assert_eq!(created.status, TableStatus::Free);
        let by_number = find_by_number(&pool, 12).await.unwrap().unwrap();
        assert_eq!(by_number.id, created.id);
        assert!(find_by_number(&pool, 13).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_number() {
        let pool = test_pool().await;
        create(&pool, table(1, 2, TableStatus::Free)).await.unwrap();
        let err = create(&pool, table(1, 6, TableStatus::Reserved)).await.unwrap_err();
        assert!(matches!(err, RepoError::Conflict(ErrorCode::TableNumberExists, _)));
    }

    #[tokio::test]
    async fn test_find_by_status_sorted() {
        let pool = test_pool().await;
        create(&pool, table(5, 2, TableStatus::Occupied)).await.unwrap();
        create(&pool, table(3, 2, TableStatus::Free)).await.unwrap();
        create(&pool, table(1, 2, TableStatus::Free)).await.unwrap();

        let free = find_by_status(&pool, TableStatus::Free).await.unwrap();
        let numbers: Vec<_> = free.iter().map(|t| t.table_number).collect();
        assert_eq!(numbers, vec![1, 3]);
        assert_eq!(find_all(&pool).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_update_and_status() {
        let pool = test_pool().await;
        let created = create(&pool, table(1, 2, TableStatus::Free)).await.unwrap();
        create(&pool, table(2, 2, TableStatus::Free)).await.unwrap();

        let updated = update(
            &pool,
            created.id,
            DiningTableUpdate {
                capacity: Some(8),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.capacity, 8);
        assert_eq!(updated.table_number, 1);

        let err = update(
            &pool,
            created.id,
            DiningTableUpdate {
                table_number: Some(2),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::Conflict(ErrorCode::TableNumberExists, _)));

        update_status(&pool, created.id, TableStatus::Occupied)
            .await
            .unwrap();
        let found = find_by_id(&pool, created.id).await.unwrap().unwrap();
        assert_eq!(found.status, TableStatus::Occupied);
        assert!(
            update_status(&pool, created.id + 10, TableStatus::Free)
                .await
                .unwrap_err()
                .is_not_found()
        );
    }

    #[tokio::test]
    async fn test_delete_refused_while_reserved() {
        let pool = test_pool().await;
        let created = create(&pool, table(1, 2, TableStatus::Reserved)).await.unwrap();
        let booking = ReservationCreate::new("Lee", None, None, created.id, "tonight").unwrap();
        let booking = reservation::create(&pool, booking).await.unwrap();

        let err = delete(&pool, created.id).await.unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));

        reservation::delete(&pool, booking.id).await.unwrap();
        delete(&pool, created.id).await.unwrap();
        assert!(find_by_id(&pool, created.id).await.unwrap().is_none());
    }
}
