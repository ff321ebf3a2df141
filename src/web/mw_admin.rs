// src/web/mw_admin.rs
use crate::{error::AppError, web::mw_auth::CurrentUser};
use axum::{
    extract::{Extension, Request},
    middleware::Next,
    response::Response,
};

/// Restricts a route to users with the admin role. Must run after
/// `require_auth`, which injects `CurrentUser`.
pub async fn require_admin(
    Extension(current): Extension<CurrentUser>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if current.0.is_admin() {
        Ok(next.run(request).await)
    } else {
        tracing::warn!("admin mw: '{}' denied (role {})", current.0.username, current.0.role);
        Err(AppError::Forbidden)
    }
}
