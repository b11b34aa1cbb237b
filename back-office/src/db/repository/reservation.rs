//! Reservation Repository

use super::{Entity, RepoError, RepoResult, ensure_affected, insert_with_pool};
use crate::audit_log;
use shared::models::{Reservation, ReservationCreate, ReservationStatus};
use sqlx::AnyPool;

const RESERVATION_SELECT: &str = "SELECT reservation_id AS id, customer_name, email, phone, \
     table_id, date_time, status FROM Reservations";

pub async fn find_all(pool: &AnyPool) -> RepoResult<Vec<Reservation>> {
    let sql = format!("{RESERVATION_SELECT} ORDER BY reservation_id");
    let reservations = sqlx::query_as::<_, Reservation>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(reservations)
}

pub async fn find_by_id(pool: &AnyPool, id: i64) -> RepoResult<Option<Reservation>> {
    let sql = format!("{RESERVATION_SELECT} WHERE reservation_id = ?");
    let reservation = sqlx::query_as::<_, Reservation>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(reservation)
}

/// Insert a reservation; the table must exist.
pub async fn create(pool: &AnyPool, data: ReservationCreate) -> RepoResult<Reservation> {
    let insert = sqlx::query(
        "INSERT INTO Reservations (customer_name, email, phone, table_id, date_time, status) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&data.customer_name)
    .bind(&data.email)
    .bind(&data.phone)
    .bind(data.table_id)
    .bind(&data.date_time)
    .bind(data.status.as_str());
    let id = insert_with_pool(pool, insert, Entity::Reservation).await?;
    tracing::info!(
        id,
        table_id = data.table_id,
        customer = %data.customer_name,
        "Reservation created"
    );

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create reservation".into()))
}

pub async fn update_status(
    pool: &AnyPool,
    id: i64,
    status: ReservationStatus,
) -> RepoResult<Reservation> {
    let result = sqlx::query("UPDATE Reservations SET status = ? WHERE reservation_id = ?")
        .bind(status.as_str())
        .bind(id)
        .execute(pool)
        .await?;
    ensure_affected(&result, Entity::Reservation, id)?;

    let resource = format!("reservation:{id}");
    audit_log!("update_reservation_status", resource.as_str(), status.as_str());
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::not_found(Entity::Reservation, id))
}

pub async fn delete(pool: &AnyPool, id: i64) -> RepoResult<()> {
    let result = sqlx::query("DELETE FROM Reservations WHERE reservation_id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    ensure_affected(&result, Entity::Reservation, id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::dining_table;
    use crate::db::test_pool;
    use shared::models::{DiningTableCreate, TableStatus};

    async fn seed_table(pool: &AnyPool, number: i64) -> i64 {
        let data = DiningTableCreate::new(number, 4, TableStatus::Free).unwrap();
        dining_table::create(pool, data).await.unwrap().id
    }

    fn booking(name: &str, table_id: i64) -> ReservationCreate {
        ReservationCreate::new(
            name,
            Some("guest@example.com".into()),
            Some("5551234567".into()),
            table_id,
            "2024-06-01 19:30",
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_defaults_to_booked() {
        let pool = test_pool().await;
        let table_id = seed_table(&pool, 1).await;

        let created = create(&pool, booking("Lee", table_id)).await.unwrap();
        assert_eq!(created.status, ReservationStatus::Booked);
        assert_eq!(created.table_id, table_id);
        assert_eq!(created.date_time, "2024-06-01 19:30");
        assert_eq!(created.email.as_deref(), Some("guest@example.com"));
    }

    #[tokio::test]
    async fn test_optional_contact_is_null() {
        let pool = test_pool().await;
        let table_id = seed_table(&pool, 1).await;

        let data = ReservationCreate::new("Walk-in", None, Some("  ".into()), table_id, "today")
            .unwrap()
            .with_status(ReservationStatus::Completed);
        let created = create(&pool, data).await.unwrap();
        assert!(created.email.is_none());
        assert!(created.phone.is_none());
        assert_eq!(created.status, ReservationStatus::Completed);
    }

    #[tokio::test]
    async fn test_unknown_table_is_rejected() {
        let pool = test_pool().await;
        let err = create(&pool, booking("Lee", 42)).await.unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
        assert!(find_all(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_status() {
        let pool = test_pool().await;
        let table_id = seed_table(&pool, 1).await;
        let created = create(&pool, booking("Lee", table_id)).await.unwrap();

        let updated = update_status(&pool, created.id, ReservationStatus::Cancelled)
            .await
            .unwrap();
        assert_eq!(updated.status, ReservationStatus::Cancelled);

        let err = update_status(&pool, created.id + 1, ReservationStatus::Completed)
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(Entity::Reservation, _)));
    }

    #[tokio::test]
    async fn test_delete() {
        let pool = test_pool().await;
        let table_id = seed_table(&pool, 1).await;
        let created = create(&pool, booking("Lee", table_id)).await.unwrap();

        delete(&pool, created.id).await.unwrap();
        assert!(find_by_id(&pool, created.id).await.unwrap().is_none());
        assert!(delete(&pool, created.id).await.unwrap_err().is_not_found());
    }
}
