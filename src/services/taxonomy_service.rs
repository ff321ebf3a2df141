// src/services/taxonomy_service.rs
//
// Countries, levels, categories and tags are the same resource over four
// tables; the macro stamps out one CrudResource per table.

use crate::error::{map_unique_violation, AppError, AppResult};
use crate::models::taxonomy::{Term, TermPayload};
use crate::services::resource::{CrudResource, ListParams, SlugSource};
use crate::validate::Validate;
use async_trait::async_trait;
use sqlx::SqlitePool;

impl SlugSource for TermPayload {
    fn slug_name(&self) -> &str {
        &self.name
    }
    fn slug_override(&self) -> Option<&str> {
        self.slug.as_deref()
    }
}

/// All terms of one taxonomy, ordered by name, for pickers and filters.
pub async fn list_all(pool: &SqlitePool, table: &str) -> AppResult<Vec<Term>> {
    // `table` is always one of the four compile-time names below.
    let sql = format!("SELECT * FROM {table} ORDER BY name ASC");
    let rows = sqlx::query_as::<_, Term>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

macro_rules! taxonomy_resource {
    ($resource:ident, $table:literal, $label:literal) => {
        pub struct $resource;

        #[async_trait]
        impl CrudResource for $resource {
            const NAME: &'static str = $label;
            type Entity = Term;
            type Payload = TermPayload;

            async fn list(pool: &SqlitePool, params: &ListParams) -> AppResult<Vec<Term>> {
                let q = params
                    .get("q")
                    .map(|q| q.trim().to_string())
                    .filter(|q| !q.is_empty());
                let rows = sqlx::query_as::<_, Term>(concat!(
                    "SELECT * FROM ",
                    $table,
                    " WHERE (?1 IS NULL OR name LIKE '%' || ?1 || '%')",
                    " ORDER BY name ASC"
                ))
                .bind(q)
                .fetch_all(pool)
                .await?;
                Ok(rows)
            }

            async fn find(pool: &SqlitePool, id: i64) -> AppResult<Option<Term>> {
                let row = sqlx::query_as::<_, Term>(concat!(
                    "SELECT * FROM ",
                    $table,
                    " WHERE id = ?1"
                ))
                .bind(id)
                .fetch_optional(pool)
                .await?;
                Ok(row)
            }

            async fn create(pool: &SqlitePool, payload: TermPayload) -> AppResult<Term> {
                payload.validate()?;
                let slug = payload.resolve_slug()?;
                let result = sqlx::query(concat!(
                    "INSERT INTO ",
                    $table,
                    " (name, slug, description) VALUES (?1, ?2, ?3)"
                ))
                .bind(payload.name.trim())
                .bind(&slug)
                .bind(&payload.description)
                .execute(pool)
                .await
                .map_err(|e| map_unique_violation(e, "slug already in use"))?;

                Self::find(pool, result.last_insert_rowid())
                    .await?
                    .ok_or(AppError::Internal)
            }

            async fn update(pool: &SqlitePool, id: i64, payload: TermPayload) -> AppResult<Term> {
                payload.validate()?;
                let slug = payload.resolve_slug()?;
                let affected = sqlx::query(concat!(
                    "UPDATE ",
                    $table,
                    " SET name = ?1, slug = ?2, description = ?3,",
                    " updated_at = datetime('now') WHERE id = ?4"
                ))
                .bind(payload.name.trim())
                .bind(&slug)
                .bind(&payload.description)
                .bind(id)
                .execute(pool)
                .await
                .map_err(|e| map_unique_violation(e, "slug already in use"))?
                .rows_affected();

                if affected == 0 {
                    return Err(AppError::NotFound(Self::NAME));
                }
                Self::find(pool, id).await?.ok_or(AppError::Internal)
            }

            async fn delete(pool: &SqlitePool, id: i64) -> AppResult<bool> {
                let affected = sqlx::query(concat!("DELETE FROM ", $table, " WHERE id = ?1"))
                    .bind(id)
                    .execute(pool)
                    .await?
                    .rows_affected();
                Ok(affected > 0)
            }
        }
    };
}

taxonomy_resource!(CountryResource, "countries", "country");
taxonomy_resource!(LevelResource, "levels", "level");
taxonomy_resource!(CategoryResource, "categories", "category");
taxonomy_resource!(TagResource, "tags", "tag");
