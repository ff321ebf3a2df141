// src/web/admin_handlers.rs
//
// Admin endpoints that don't fit the generic CRUD shape: user management
// (password handling), the subscriber list and the settings singleton.

use crate::{
    error::{AppError, AppResult},
    models::settings::{Settings, SettingsPayload},
    models::subscriber::Subscriber,
    models::user::{ChangePassword, CreateUser, UpdateUser, UserView},
    services::{settings_service, subscriber_service, user_service},
    state::AppState,
    validate::Validate,
    web::crud::{ok, Envelope},
};
use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::json;

// --- Users (admin role required) ------------------------------------------

pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Envelope<Vec<UserView>>>> {
    Ok(ok(user_service::list(&state.db_pool).await?))
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUser>,
) -> AppResult<Json<Envelope<UserView>>> {
    payload.validate()?;
    Ok(ok(user_service::create(&state.db_pool, payload).await?))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateUser>,
) -> AppResult<Json<Envelope<UserView>>> {
    payload.validate()?;
    Ok(ok(user_service::update(&state.db_pool, id, payload).await?))
}

pub async fn change_password(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ChangePassword>,
) -> AppResult<Json<Envelope<serde_json::Value>>> {
    payload.validate()?;
    user_service::change_password(&state.db_pool, id, &payload.password).await?;
    Ok(ok(json!({ "changed": id })))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Envelope<serde_json::Value>>> {
    if !user_service::delete(&state.db_pool, id).await? {
        return Err(AppError::NotFound("user"));
    }
    tracing::info!("user {} deleted", id);
    Ok(ok(json!({ "deleted": id })))
}

// --- Subscribers (list and delete only) ------------------------------------

pub async fn list_subscribers(
    State(state): State<AppState>,
) -> AppResult<Json<Envelope<Vec<Subscriber>>>> {
    Ok(ok(subscriber_service::list(&state.db_pool).await?))
}

pub async fn delete_subscriber(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Envelope<serde_json::Value>>> {
    if !subscriber_service::delete(&state.db_pool, id).await? {
        return Err(AppError::NotFound("subscriber"));
    }
    Ok(ok(json!({ "deleted": id })))
}

// --- Settings (singleton) ---------------------------------------------------

pub async fn get_settings(State(state): State<AppState>) -> AppResult<Json<Envelope<Settings>>> {
    Ok(ok(settings_service::get(&state.db_pool).await?))
}

pub async fn update_settings(
    State(state): State<AppState>,
    Json(payload): Json<SettingsPayload>,
) -> AppResult<Json<Envelope<Settings>>> {
    payload.validate()?;
    Ok(ok(settings_service::update(&state.db_pool, payload).await?))
}
