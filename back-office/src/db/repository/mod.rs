//! Repository Module
//!
//! One module per table, free async functions over an [`AnyPool`]. Reads
//! alias the table's key column to `id` so rows map straight onto the
//! shared models.
//!
//! [`AnyPool`]: sqlx::AnyPool

// Staff
pub mod staff_task;
pub mod user;

// Menu
pub mod menu;
pub mod menu_item;

// Floor
pub mod dining_table;
pub mod reservation;

// Stock
pub mod inventory;

use shared::ValidationError;
use shared::error::{AppError, ErrorCode};
use sqlx::any::{AnyArguments, AnyQueryResult};
use sqlx::query::Query;
use sqlx::{Any, AnyConnection, AnyPool};
use sqlx::error::ErrorKind;
use std::fmt;
use thiserror::Error;

/// Row kinds a lookup can miss
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    User,
    Menu,
    Subgroup,
    MenuItem,
    InventoryItem,
    Reservation,
    Table,
    StaffTask,
}

impl Entity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Menu => "Menu",
            Self::Subgroup => "Menu subgroup",
            Self::MenuItem => "Menu item",
            Self::InventoryItem => "Inventory item",
            Self::Reservation => "Reservation",
            Self::Table => "Table",
            Self::StaffTask => "Staff task",
        }
    }

    pub fn not_found_code(&self) -> ErrorCode {
        match self {
            Self::User => ErrorCode::UserNotFound,
            Self::Menu => ErrorCode::MenuNotFound,
            Self::Subgroup => ErrorCode::SubgroupNotFound,
            Self::MenuItem => ErrorCode::MenuItemNotFound,
            Self::InventoryItem => ErrorCode::InventoryItemNotFound,
            Self::Reservation => ErrorCode::ReservationNotFound,
            Self::Table => ErrorCode::TableNotFound,
            Self::StaffTask => ErrorCode::TaskNotFound,
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{0} {1} not found")]
    NotFound(Entity, String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    /// Business rule with its own error code (username taken, not staff, ...)
    #[error("{1}")]
    Conflict(ErrorCode, String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Input(#[from] ValidationError),

    #[error("Database unavailable: {0}")]
    Unavailable(String),

    /// A multi-statement unit failed and was rolled back
    #[error("Transaction rolled back: {0}")]
    Transaction(Box<RepoError>),

    #[error("Database error: {0}")]
    Database(String),
}

impl RepoError {
    pub fn not_found(entity: Entity, key: impl fmt::Display) -> Self {
        Self::NotFound(entity, key.to_string())
    }

    /// Turn a unique-key violation into a coded conflict; other errors pass through.
    pub fn or_conflict(self, code: ErrorCode, message: impl Into<String>) -> Self {
        match self {
            Self::Duplicate(_) => Self::Conflict(code, message.into()),
            other => other,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(..))
    }
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) => match db.kind() {
                ErrorKind::UniqueViolation => RepoError::Duplicate(db.message().to_string()),
                ErrorKind::ForeignKeyViolation => RepoError::Validation(format!(
                    "Related record constraint failed: {}",
                    db.message()
                )),
                ErrorKind::NotNullViolation | ErrorKind::CheckViolation => {
                    RepoError::Validation(db.message().to_string())
                }
                _ => RepoError::Database(err.to_string()),
            },
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => RepoError::Unavailable(err.to_string()),
            _ => RepoError::Database(err.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(entity, key) => AppError::with_message(
                entity.not_found_code(),
                format!("{} {} not found", entity, key),
            )
            .with_detail("key", key),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Conflict(code, msg) => AppError::with_message(code, msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Input(e) => e.into(),
            RepoError::Unavailable(msg) => {
                tracing::error!(error = %msg, "Database unavailable");
                AppError::database_unavailable(msg)
            }
            RepoError::Transaction(cause) => {
                let cause: AppError = (*cause).into();
                AppError::transaction_failed(format!("Changes were rolled back: {}", cause))
                    .with_detail("cause_code", cause.code.code())
            }
            RepoError::Database(msg) => {
                tracing::error!(error = %msg, "Repository database error");
                AppError::database(msg)
            }
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// An insert statement with its bound values
pub(crate) type InsertQuery<'q> = Query<'q, Any, AnyArguments<'q>>;

/// Run an insert and read the generated key on the same connection.
///
/// MySQL reports the key with the result. The SQLite driver behind `Any`
/// does not, so the key is read back with `last_insert_rowid()`, which is
/// per connection. A missing key is an error.
pub(crate) async fn insert_returning_id(
    conn: &mut AnyConnection,
    query: InsertQuery<'_>,
    entity: Entity,
) -> RepoResult<i64> {
    let result = query.execute(&mut *conn).await?;
    if let Some(id) = result.last_insert_id().filter(|id| *id > 0) {
        return Ok(id);
    }
    if conn.backend_name().eq_ignore_ascii_case("sqlite") {
        let id: i64 = sqlx::query_scalar("SELECT last_insert_rowid()")
            .fetch_one(&mut *conn)
            .await?;
        if id > 0 {
            return Ok(id);
        }
    }
    Err(RepoError::Database(format!(
        "No generated key returned for new {entity}"
    )))
}

/// [`insert_returning_id`] on a connection checked out for this insert only
pub(crate) async fn insert_with_pool(
    pool: &AnyPool,
    query: InsertQuery<'_>,
    entity: Entity,
) -> RepoResult<i64> {
    let mut conn = pool.acquire().await?;
    insert_returning_id(&mut conn, query, entity).await
}

/// Zero affected rows means the keyed row does not exist.
pub(crate) fn ensure_affected(
    result: &AnyQueryResult,
    entity: Entity,
    key: impl fmt::Display,
) -> RepoResult<()> {
    if result.rows_affected() == 0 {
        return Err(RepoError::not_found(entity, key));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_domain_code() {
        let err: AppError = RepoError::not_found(Entity::Reservation, 42).into();
        assert_eq!(err.code, ErrorCode::ReservationNotFound);
        assert_eq!(err.message, "Reservation 42 not found");
        assert_eq!(err.details.unwrap().get("key").unwrap(), "42");
    }

    #[test]
    fn test_or_conflict_only_rewrites_duplicates() {
        let err = RepoError::Duplicate("UNIQUE constraint failed".into())
            .or_conflict(ErrorCode::UsernameExists, "Username 'ana' already exists");
        assert!(matches!(err, RepoError::Conflict(ErrorCode::UsernameExists, _)));

        let err = RepoError::Validation("bad".into())
            .or_conflict(ErrorCode::UsernameExists, "Username 'ana' already exists");
        assert!(matches!(err, RepoError::Validation(_)));
    }

    #[test]
    fn test_transaction_error_keeps_cause_code() {
        let err = RepoError::Transaction(Box::new(RepoError::Duplicate("dup".into())));
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::TransactionFailed);
        assert_eq!(
            app.details.unwrap().get("cause_code").unwrap(),
            ErrorCode::AlreadyExists.code()
        );
    }

    #[test]
    fn test_pool_errors_are_unavailable() {
        assert!(matches!(
            RepoError::from(sqlx::Error::PoolTimedOut),
            RepoError::Unavailable(_)
        ));
        let app: AppError = RepoError::from(sqlx::Error::PoolClosed).into();
        assert_eq!(app.code, ErrorCode::DatabaseUnavailable);
    }

    fn table_insert(number: i64) -> InsertQuery<'static> {
        sqlx::query("INSERT INTO Tables (table_number, capacity, status) VALUES (?, ?, 'free')")
            .bind(number)
            .bind(4_i64)
    }

    #[tokio::test]
    async fn test_insert_returns_key_of_new_row() {
        let pool = crate::db::test_pool().await;
        let first = insert_with_pool(&pool, table_insert(1), Entity::Table)
            .await
            .unwrap();
        let second = insert_with_pool(&pool, table_insert(2), Entity::Table)
            .await
            .unwrap();
        assert_ne!(first, second);

        let number: i64 = sqlx::query_scalar("SELECT table_number FROM Tables WHERE table_id = ?")
            .bind(second)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(number, 2);
    }

    #[tokio::test]
    async fn test_insert_inside_transaction_returns_key() {
        let pool = crate::db::test_pool().await;
        let mut tx = pool.begin().await.unwrap();
        let id = insert_returning_id(&mut tx, table_insert(7), Entity::Table)
            .await
            .unwrap();
        tx.commit().await.unwrap();

        let number: i64 = sqlx::query_scalar("SELECT table_number FROM Tables WHERE table_id = ?")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(number, 7);
    }

    #[tokio::test]
    async fn test_duplicate_insert_is_reported() {
        let pool = crate::db::test_pool().await;
        insert_with_pool(&pool, table_insert(3), Entity::Table)
            .await
            .unwrap();
        let err = insert_with_pool(&pool, table_insert(3), Entity::Table)
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[test]
    fn test_input_error_keeps_validation_code() {
        let err = RepoError::from(ValidationError::Required { field: "name" });
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::RequiredField);
    }
}
