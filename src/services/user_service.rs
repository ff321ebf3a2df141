// src/services/user_service.rs
use crate::error::{map_unique_violation, AppError, AppResult};
use crate::models::user::{CreateUser, UpdateUser, User, UserView};
use crate::services::auth_service;
use sqlx::SqlitePool;

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?1")
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn list(pool: &SqlitePool) -> AppResult<Vec<UserView>> {
    let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY username ASC")
        .fetch_all(pool)
        .await?;
    Ok(users.into_iter().map(UserView::from).collect())
}

pub async fn create(pool: &SqlitePool, payload: CreateUser) -> AppResult<UserView> {
    tracing::info!("creating user '{}'", payload.username);
    let password_hash = auth_service::hash_password(&payload.password).await?;

    let result = sqlx::query(
        "INSERT INTO users (username, password_hash, display_name, role)
         VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(payload.username.trim())
    .bind(&password_hash)
    .bind(payload.display_name.trim())
    .bind(&payload.role)
    .execute(pool)
    .await
    .map_err(|e| map_unique_violation(e, "username already taken"))?;

    let user = find_by_id(pool, result.last_insert_rowid())
        .await?
        .ok_or(AppError::Internal)?;
    tracing::info!("user '{}' created", user.username);
    Ok(user.into())
}

pub async fn update(pool: &SqlitePool, id: i64, payload: UpdateUser) -> AppResult<UserView> {
    let affected = sqlx::query(
        "UPDATE users
         SET username = ?1, display_name = ?2, role = ?3, updated_at = datetime('now')
         WHERE id = ?4",
    )
    .bind(payload.username.trim())
    .bind(payload.display_name.trim())
    .bind(&payload.role)
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| map_unique_violation(e, "username already taken"))?
    .rows_affected();

    if affected == 0 {
        return Err(AppError::NotFound("user"));
    }
    let user = find_by_id(pool, id).await?.ok_or(AppError::Internal)?;
    Ok(user.into())
}

pub async fn change_password(pool: &SqlitePool, id: i64, new_password: &str) -> AppResult<()> {
    let password_hash = auth_service::hash_password(new_password).await?;
    let affected = sqlx::query(
        "UPDATE users SET password_hash = ?1, updated_at = datetime('now') WHERE id = ?2",
    )
    .bind(&password_hash)
    .bind(id)
    .execute(pool)
    .await?
    .rows_affected();

    if affected == 0 {
        return Err(AppError::NotFound("user"));
    }
    tracing::info!("password changed for user id {}", id);
    Ok(())
}

pub async fn delete(pool: &SqlitePool, id: i64) -> AppResult<bool> {
    let affected = sqlx::query("DELETE FROM users WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?
        .rows_affected();
    Ok(affected > 0)
}

/// Creates the first admin account from ADMIN_USERNAME / ADMIN_PASSWORD when
/// the users table is empty. There is no self-service registration path.
pub async fn ensure_bootstrap_admin(pool: &SqlitePool) -> AppResult<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Ok(());
    }

    let username = std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
    let password = match std::env::var("ADMIN_PASSWORD") {
        Ok(p) if !p.is_empty() => p,
        _ => {
            tracing::warn!(
                "no users exist and ADMIN_PASSWORD is unset; admin login will be impossible"
            );
            return Ok(());
        }
    };

    let password_hash = auth_service::hash_password(&password).await?;
    sqlx::query(
        "INSERT INTO users (username, password_hash, display_name, role)
         VALUES (?1, ?2, ?3, 'admin')",
    )
    .bind(&username)
    .bind(&password_hash)
    .bind(&username)
    .execute(pool)
    .await?;
    tracing::info!("bootstrap admin '{}' created", username);
    Ok(())
}
