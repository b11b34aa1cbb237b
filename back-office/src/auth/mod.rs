//! Authentication
//!
//! Console login against the `Users` table. Unknown usernames and wrong
//! passwords produce the same error.

mod password;

pub use password::{hash_password, verify_password};

use crate::db::repository::user;
use crate::security_log;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::User;
use sqlx::AnyPool;

/// Check a username/password pair and return the user.
pub async fn login(pool: &AnyPool, username: &str, password: &str) -> AppResult<User> {
    let found = user::find_by_username(pool, username.trim()).await?;
    check_credentials(found, password, username)
}

/// Passcode login by numeric user id; the password is still required.
pub async fn login_by_id(pool: &AnyPool, user_id: i64, password: &str) -> AppResult<User> {
    let found = user::find_by_id(pool, user_id).await?;
    check_credentials(found, password, &user_id.to_string())
}

fn check_credentials(found: Option<User>, password: &str, login_name: &str) -> AppResult<User> {
    let Some(user) = found else {
        security_log!(WARN, "login_failed", login = %login_name, reason = "unknown_user");
        return Err(AppError::invalid_credentials());
    };

    let valid = verify_password(password, &user.password_hash).map_err(|e| {
        tracing::error!(user_id = user.id, error = %e, "Stored password hash is unreadable");
        AppError::internal(format!("Password verification failed: {e}"))
    })?;
    if !valid {
        security_log!(WARN, "login_failed", login = %login_name, reason = "invalid_password");
        return Err(AppError::invalid_credentials());
    }

    security_log!(INFO, "login", user_id = user.id, role = %user.role);
    tracing::info!(user_id = user.id, username = %user.username, "User logged in");
    Ok(user)
}

/// The back office dashboard is admin-only.
pub fn require_admin(user: &User) -> AppResult<()> {
    if !user.is_admin() {
        security_log!(WARN, "permission_denied", user_id = user.id, role = %user.role);
        return Err(AppError::with_message(
            ErrorCode::AdminRequired,
            format!("User '{}' is not an administrator", user.username),
        ));
    }
    Ok(())
}
