// src/web/crud.rs
//
// Turns any CrudResource into a full route set with the canonical
// response envelope. This is the single place the admin CRUD contract is
// implemented; entities only supply their queries.

use crate::error::{AppError, AppResult};
use crate::services::resource::{CrudResource, ListParams};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::json;

/// Canonical success envelope: `{ "success": true, "data": ... }`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
}

pub fn ok<T: Serialize>(data: T) -> Json<Envelope<T>> {
    Json(Envelope {
        success: true,
        data,
    })
}

pub fn resource_router<R: CrudResource>() -> Router<AppState> {
    Router::new()
        .route("/", get(list::<R>).post(create::<R>))
        .route(
            "/{id}",
            get(find::<R>).put(update::<R>).delete(remove::<R>),
        )
}

async fn list<R: CrudResource>(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Envelope<Vec<R::Entity>>>> {
    let items = R::list(&state.db_pool, &params).await?;
    Ok(ok(items))
}

async fn find<R: CrudResource>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Envelope<R::Entity>>> {
    let item = R::find(&state.db_pool, id)
        .await?
        .ok_or(AppError::NotFound(R::NAME))?;
    Ok(ok(item))
}

async fn create<R: CrudResource>(
    State(state): State<AppState>,
    Json(payload): Json<R::Payload>,
) -> AppResult<Json<Envelope<R::Entity>>> {
    let item = R::create(&state.db_pool, payload).await?;
    tracing::info!("{} created", R::NAME);
    Ok(ok(item))
}

async fn update<R: CrudResource>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<R::Payload>,
) -> AppResult<Json<Envelope<R::Entity>>> {
    let item = R::update(&state.db_pool, id, payload).await?;
    tracing::info!("{} {} updated", R::NAME, id);
    Ok(ok(item))
}

async fn remove<R: CrudResource>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Envelope<serde_json::Value>>> {
    if !R::delete(&state.db_pool, id).await? {
        return Err(AppError::NotFound(R::NAME));
    }
    tracing::info!("{} {} deleted", R::NAME, id);
    Ok(ok(json!({ "deleted": id })))
}
