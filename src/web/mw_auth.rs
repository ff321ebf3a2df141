// src/web/mw_auth.rs
use crate::{error::AppError, services::user_service, state::AppState};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tower_sessions::Session;

/// The authenticated user, injected into request extensions by
/// `require_auth` so downstream handlers never re-query it.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub crate::models::user::User);

/// Gate for the admin API. Loads the user id from the session and
/// re-fetches the user row on every request: a session whose user has been
/// deleted fails closed and the stale session is flushed.
pub async fn require_auth(
    State(state): State<AppState>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user_id = session
        .get::<i64>("user_id")
        .await
        .map_err(|e| AppError::Session(format!("failed to read session: {e}")))?;

    let Some(user_id) = user_id else {
        tracing::debug!("auth mw: no session identity, rejecting");
        return Err(AppError::Unauthorized);
    };

    match user_service::find_by_id(&state.db_pool, user_id).await? {
        Some(user) => {
            tracing::debug!("auth mw: '{}' authenticated", user.username);
            request.extensions_mut().insert(CurrentUser(user));
            Ok(next.run(request).await)
        }
        None => {
            tracing::warn!("auth mw: session references deleted user {}, flushing", user_id);
            session
                .flush()
                .await
                .map_err(|e| AppError::Session(format!("failed to flush session: {e}")))?;
            Err(AppError::Unauthorized)
        }
    }
}
