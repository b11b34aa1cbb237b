//! Staff Task Repository
//!
//! Tasks can only be assigned to users with the staff role. A task starts in
//! the status chosen at assignment (`assigned` by default). Completing a task
//! stamps `completed_at`; moving it back to any other status clears it.

use super::{Entity, RepoError, RepoResult, ensure_affected, insert_with_pool, user};
use crate::audit_log;
use shared::error::ErrorCode;
use shared::models::{StaffTask, StaffTaskCreate, TaskStatus};
use shared::util::now_millis;
use sqlx::AnyPool;

const TASK_SELECT: &str = "SELECT task_id AS id, user_id, task_description AS description, \
     status, assigned_at, completed_at FROM Staff_Tasks";

pub async fn find_all(pool: &AnyPool) -> RepoResult<Vec<StaffTask>> {
    let sql = format!("{TASK_SELECT} ORDER BY task_id");
    let tasks = sqlx::query_as::<_, StaffTask>(&sql).fetch_all(pool).await?;
    Ok(tasks)
}

pub async fn find_by_id(pool: &AnyPool, id: i64) -> RepoResult<Option<StaffTask>> {
    let sql = format!("{TASK_SELECT} WHERE task_id = ?");
    let task = sqlx::query_as::<_, StaffTask>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(task)
}

/// Tasks assigned to one user, oldest first
pub async fn find_by_user(pool: &AnyPool, user_id: i64) -> RepoResult<Vec<StaffTask>> {
    let sql = format!("{TASK_SELECT} WHERE user_id = ? ORDER BY task_id");
    let tasks = sqlx::query_as::<_, StaffTask>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await?;
    Ok(tasks)
}

pub async fn task_ids(pool: &AnyPool) -> RepoResult<Vec<i64>> {
    let ids = sqlx::query_scalar::<_, i64>("SELECT task_id FROM Staff_Tasks ORDER BY task_id")
        .fetch_all(pool)
        .await?;
    Ok(ids)
}

/// Assign a task to a staff member.
pub async fn create(pool: &AnyPool, data: StaffTaskCreate) -> RepoResult<StaffTask> {
    let assignee = user::find_by_id(pool, data.user_id)
        .await?
        .ok_or_else(|| RepoError::not_found(Entity::User, data.user_id))?;
    if !assignee.is_staff() {
        return Err(RepoError::Conflict(
            ErrorCode::NotStaffMember,
            format!(
                "User '{}' has role {} and cannot be assigned tasks",
                assignee.username, assignee.role
            ),
        ));
    }

    let now = now_millis();
    let completed_at = data.status.is_completed().then_some(now);
    let insert = sqlx::query(
        "INSERT INTO Staff_Tasks (user_id, task_description, status, assigned_at, completed_at) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(data.user_id)
    .bind(&data.description)
    .bind(data.status.as_str())
    .bind(now)
    .bind(completed_at);
    let id = insert_with_pool(pool, insert, Entity::StaffTask).await?;

    let resource = format!("task:{id}");
    audit_log!("assign_task", resource.as_str(), data.description.as_str());
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create staff task".into()))
}

pub async fn update_status(pool: &AnyPool, id: i64, status: TaskStatus) -> RepoResult<StaffTask> {
    let completed_at = status.is_completed().then(now_millis);
    let result = sqlx::query("UPDATE Staff_Tasks SET status = ?, completed_at = ? WHERE task_id = ?")
        .bind(status.as_str())
        .bind(completed_at)
        .bind(id)
        .execute(pool)
        .await?;
    ensure_affected(&result, Entity::StaffTask, id)?;
    tracing::info!(id, status = %status, "Task status changed");

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::not_found(Entity::StaffTask, id))
}

pub async fn delete(pool: &AnyPool, id: i64) -> RepoResult<()> {
    let result = sqlx::query("DELETE FROM Staff_Tasks WHERE task_id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    ensure_affected(&result, Entity::StaffTask, id)
}
