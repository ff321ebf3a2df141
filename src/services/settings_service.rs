// src/services/settings_service.rs
use crate::error::{AppError, AppResult};
use crate::models::settings::{Settings, SettingsPayload};
use sqlx::SqlitePool;

/// The settings row is seeded by the initial migration and never deleted.
pub async fn get(pool: &SqlitePool) -> AppResult<Settings> {
    let settings = sqlx::query_as::<_, Settings>("SELECT * FROM settings WHERE id = 1")
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound("settings"))?;
    Ok(settings)
}

pub async fn update(pool: &SqlitePool, payload: SettingsPayload) -> AppResult<Settings> {
    sqlx::query(
        "UPDATE settings SET
             site_name = ?1, tagline = ?2, contact_email = ?3,
             facebook_url = ?4, twitter_url = ?5, updated_at = datetime('now')
         WHERE id = 1",
    )
    .bind(payload.site_name.trim())
    .bind(&payload.tagline)
    .bind(payload.contact_email.trim())
    .bind(&payload.facebook_url)
    .bind(&payload.twitter_url)
    .execute(pool)
    .await?;

    get(pool).await
}
