// src/error.rs
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("database migration error: {0}")]
    SqlxMigrate(#[from] sqlx::migrate::MigrateError),

    #[error("environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("password processing failed")]
    PasswordHashing,

    // One message for both unknown-user and bad-password; which field
    // failed is only ever logged server-side.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("session error: {0}")]
    Session(String),

    #[error("validation failed")]
    Validation(BTreeMap<String, String>),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(String),

    #[error("template rendering failed: {0}")]
    Template(#[from] askama::Error),

    #[error("unexpected internal error")]
    Internal,

    #[error("not authenticated")]
    Unauthorized,

    #[error("insufficient permissions")]
    Forbidden,
}

// Every error leaves the server as the canonical JSON envelope:
// { "success": false, "message": "...", "fields": {...}? }
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        tracing::error!("request failed: {:?}", self);

        let (status, message, fields) = match self {
            AppError::Sqlx(_) | AppError::SqlxMigrate(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to access data".to_string(),
                None,
            ),
            AppError::EnvVar(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "server configuration error".to_string(),
                None,
            ),
            AppError::PasswordHashing => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to process credentials".to_string(),
                None,
            ),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "invalid username or password".to_string(),
                None,
            ),
            AppError::Session(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "session handling failed".to_string(),
                None,
            ),
            AppError::Validation(fields) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation failed".to_string(),
                Some(fields),
            ),
            AppError::NotFound(what) => {
                (StatusCode::NOT_FOUND, format!("{what} not found"), None)
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg, None),
            AppError::Template(_) | AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "an unexpected error occurred".to_string(),
                None,
            ),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "authentication required".to_string(),
                None,
            ),
            AppError::Forbidden => (
                StatusCode::FORBIDDEN,
                "insufficient permissions".to_string(),
                None,
            ),
        };

        let mut body = json!({ "success": false, "message": message });
        if let Some(fields) = fields {
            body["fields"] = json!(fields);
        }
        (status, Json(body)).into_response()
    }
}

pub type AppResult<T = ()> = Result<T, AppError>;

/// Maps a sqlite UNIQUE-constraint violation onto a 409 with a human
/// message; everything else passes through as a database error.
pub fn map_unique_violation(err: sqlx::Error, message: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        // SQLite unique violations: 19 (generic constraint), 1555/2067 (unique).
        if db_err
            .code()
            .map_or(false, |c| c == "19" || c == "1555" || c == "2067")
        {
            return AppError::Conflict(message.to_string());
        }
    }
    AppError::Sqlx(err)
}
