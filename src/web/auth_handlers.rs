// src/web/auth_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::user::{LoginPayload, UserView},
    services::{auth_service, user_service},
    state::AppState,
    web::crud::{ok, Envelope},
};
use axum::{extract::State, Json};
use tower_sessions::Session;

// POST /api/auth/login
//
// Which of username/password failed is logged at debug level only; the
// client always sees the same "invalid credentials" rejection.
pub async fn handle_login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginPayload>,
) -> AppResult<Json<Envelope<UserView>>> {
    tracing::info!("login attempt for '{}'", payload.username);

    let user = match user_service::find_by_username(&state.db_pool, &payload.username).await? {
        Some(user) => user,
        None => {
            tracing::debug!("login failed: unknown username '{}'", payload.username);
            return Err(AppError::InvalidCredentials);
        }
    };

    if !auth_service::verify_password(&payload.password, &user.password_hash).await? {
        tracing::debug!("login failed: wrong password for '{}'", payload.username);
        return Err(AppError::InvalidCredentials);
    }

    // Fresh session id on privilege change.
    session
        .cycle_id()
        .await
        .map_err(|e| AppError::Session(format!("failed to cycle session id: {e}")))?;
    session
        .insert("user_id", user.id)
        .await
        .map_err(|e| AppError::Session(format!("failed to store identity: {e}")))?;

    tracing::info!("login succeeded for '{}'", user.username);
    Ok(ok(user.into()))
}

// POST /api/auth/logout
pub async fn handle_logout(session: Session) -> AppResult<Json<Envelope<serde_json::Value>>> {
    let user_id: Option<i64> = session.get("user_id").await.ok().flatten();
    session
        .delete()
        .await
        .map_err(|e| AppError::Session(format!("failed to destroy session: {e}")))?;

    match user_id {
        Some(id) => tracing::info!("user {} logged out", id),
        None => tracing::info!("anonymous session ended"),
    }
    Ok(ok(serde_json::Value::Null))
}

// GET /api/auth/me
//
// Answers 200 with `data: null` for anonymous callers so the client can
// settle its auth state without treating "not logged in" as a failure. A
// session naming a deleted user is flushed and treated as anonymous.
pub async fn current_user(
    State(state): State<AppState>,
    session: Session,
) -> AppResult<Json<Envelope<Option<UserView>>>> {
    let user_id: Option<i64> = session
        .get("user_id")
        .await
        .map_err(|e| AppError::Session(format!("failed to read session: {e}")))?;

    let Some(user_id) = user_id else {
        return Ok(ok(None));
    };

    match user_service::find_by_id(&state.db_pool, user_id).await? {
        Some(user) => Ok(ok(Some(user.into()))),
        None => {
            tracing::warn!("session references deleted user {}, flushing", user_id);
            session
                .flush()
                .await
                .map_err(|e| AppError::Session(format!("failed to flush session: {e}")))?;
            Ok(ok(None))
        }
    }
}
