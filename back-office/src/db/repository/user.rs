//! User Repository

use super::{Entity, RepoError, RepoResult, ensure_affected, insert_with_pool};
use crate::audit_log;
use crate::auth::hash_password;
use shared::error::ErrorCode;
use shared::models::{Role, User, UserCreate};
use sqlx::AnyPool;

const USER_SELECT: &str =
    "SELECT user_id AS id, username, password_hash, role, email, phone FROM Users";

pub async fn find_all(pool: &AnyPool) -> RepoResult<Vec<User>> {
    let sql = format!("{USER_SELECT} ORDER BY user_id");
    let users = sqlx::query_as::<_, User>(&sql).fetch_all(pool).await?;
    Ok(users)
}

pub async fn find_by_id(pool: &AnyPool, id: i64) -> RepoResult<Option<User>> {
    let sql = format!("{USER_SELECT} WHERE user_id = ?");
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn find_by_username(pool: &AnyPool, username: &str) -> RepoResult<Option<User>> {
    let sql = format!("{USER_SELECT} WHERE username = ? LIMIT 1");
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// Users whose role is staff
pub async fn find_staff(pool: &AnyPool) -> RepoResult<Vec<User>> {
    let sql = format!("{USER_SELECT} WHERE role = ? ORDER BY user_id");
    let users = sqlx::query_as::<_, User>(&sql)
        .bind(Role::Staff.as_str())
        .fetch_all(pool)
        .await?;
    Ok(users)
}

/// Ids of all staff members, for task assignment pickers
pub async fn staff_ids(pool: &AnyPool) -> RepoResult<Vec<i64>> {
    let ids = sqlx::query_scalar::<_, i64>(
        "SELECT user_id FROM Users WHERE role = ? ORDER BY user_id",
    )
    .bind(Role::Staff.as_str())
    .fetch_all(pool)
    .await?;
    Ok(ids)
}

/// Insert a user; the plaintext password is hashed before it is written.
pub async fn create(pool: &AnyPool, data: UserCreate) -> RepoResult<User> {
    let password_hash = hash_password(&data.password)
        .map_err(|e| RepoError::Database(format!("Failed to hash password: {e}")))?;

    let insert = sqlx::query(
        "INSERT INTO Users (username, password_hash, role, email, phone) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&data.username)
    .bind(&password_hash)
    .bind(data.role.as_str())
    .bind(&data.email)
    .bind(&data.phone);
    let id = insert_with_pool(pool, insert, Entity::User)
        .await
        .map_err(|e| {
            e.or_conflict(
                ErrorCode::UsernameExists,
                format!("Username '{}' already exists", data.username),
            )
        })?;

    let resource = format!("user:{}", data.username);
    audit_log!("create_user", resource.as_str(), data.role.as_str());
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create user".into()))
}

pub async fn update_role(pool: &AnyPool, id: i64, role: Role) -> RepoResult<User> {
    let result = sqlx::query("UPDATE Users SET role = ? WHERE user_id = ?")
        .bind(role.as_str())
        .bind(id)
        .execute(pool)
        .await?;
    ensure_affected(&result, Entity::User, id)?;

    let resource = format!("user:{id}");
    audit_log!("update_role", resource.as_str(), role.as_str());
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::not_found(Entity::User, id))
}

pub async fn delete(pool: &AnyPool, id: i64) -> RepoResult<()> {
    let result = sqlx::query("DELETE FROM Users WHERE user_id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    ensure_affected(&result, Entity::User, id)?;
    let resource = format!("user:{id}");
    audit_log!("delete_user", resource.as_str());
    Ok(())
}
