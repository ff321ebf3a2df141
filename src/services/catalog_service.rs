// src/services/catalog_service.rs
//
// Scholarship queries: the generic admin CRUD implementation plus the
// filtered listings the public site renders.

use crate::error::{map_unique_violation, AppError, AppResult};
use crate::models::scholarship::{Scholarship, ScholarshipFilter, ScholarshipPayload};
use crate::services::resource::{CrudResource, ListParams, SlugSource};
use crate::validate::Validate;
use async_trait::async_trait;
use sqlx::SqlitePool;

impl SlugSource for ScholarshipPayload {
    fn slug_name(&self) -> &str {
        &self.title
    }
    fn slug_override(&self) -> Option<&str> {
        self.slug.as_deref()
    }
}

// One statement covers every filter combination; NULL binds disable a
// clause. Taxonomies are matched by slug through their join.
const FILTERED_LIST_SQL: &str = "
    SELECT s.*
    FROM scholarships s
    LEFT JOIN countries  c ON s.country_id  = c.id
    LEFT JOIN levels     l ON s.level_id    = l.id
    LEFT JOIN categories g ON s.category_id = g.id
    WHERE (?1 IS NULL OR s.title LIKE '%' || ?1 || '%' OR s.summary LIKE '%' || ?1 || '%')
      AND (?2 IS NULL OR c.slug = ?2)
      AND (?3 IS NULL OR l.slug = ?3)
      AND (?4 IS NULL OR g.slug = ?4)
      AND (?5 IS NULL OR s.featured = ?5)
      AND (?6 IS NULL OR s.published = ?6)
    ORDER BY s.created_at DESC, s.id DESC
";

async fn filtered_list(
    pool: &SqlitePool,
    filter: &ScholarshipFilter,
    published_only: bool,
) -> AppResult<Vec<Scholarship>> {
    let rows = sqlx::query_as::<_, Scholarship>(FILTERED_LIST_SQL)
        .bind(filter.q.as_deref().map(str::trim).filter(|q| !q.is_empty()))
        .bind(filter.country.as_deref())
        .bind(filter.level.as_deref())
        .bind(filter.category.as_deref())
        .bind(filter.featured)
        .bind(published_only.then_some(true))
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Published scholarships for the public site, newest first.
pub async fn list_published(
    pool: &SqlitePool,
    filter: &ScholarshipFilter,
) -> AppResult<Vec<Scholarship>> {
    filtered_list(pool, filter, true).await
}

/// Featured published scholarships for the home page.
pub async fn featured(pool: &SqlitePool, limit: i64) -> AppResult<Vec<Scholarship>> {
    let rows = sqlx::query_as::<_, Scholarship>(
        "SELECT * FROM scholarships
         WHERE published = 1 AND featured = 1
         ORDER BY created_at DESC, id DESC
         LIMIT ?1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_published_by_slug(
    pool: &SqlitePool,
    slug: &str,
) -> AppResult<Option<Scholarship>> {
    let row = sqlx::query_as::<_, Scholarship>(
        "SELECT * FROM scholarships WHERE slug = ?1 AND published = 1",
    )
    .bind(slug)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

fn filter_from_params(params: &ListParams) -> ScholarshipFilter {
    ScholarshipFilter {
        q: params.get("q").cloned(),
        country: params.get("country").cloned(),
        level: params.get("level").cloned(),
        category: params.get("category").cloned(),
        featured: params.get("featured").and_then(|v| v.parse().ok()),
    }
}

pub struct ScholarshipResource;

#[async_trait]
impl CrudResource for ScholarshipResource {
    const NAME: &'static str = "scholarship";
    type Entity = Scholarship;
    type Payload = ScholarshipPayload;

    async fn list(pool: &SqlitePool, params: &ListParams) -> AppResult<Vec<Scholarship>> {
        filtered_list(pool, &filter_from_params(params), false).await
    }

    async fn find(pool: &SqlitePool, id: i64) -> AppResult<Option<Scholarship>> {
        let row = sqlx::query_as::<_, Scholarship>("SELECT * FROM scholarships WHERE id = ?1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    async fn create(pool: &SqlitePool, payload: ScholarshipPayload) -> AppResult<Scholarship> {
        payload.validate()?;
        let slug = payload.resolve_slug()?;

        let result = sqlx::query(
            "INSERT INTO scholarships
                 (title, slug, summary, body, country_id, level_id, category_id,
                  funding, deadline, apply_url, image_url, featured, published)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        )
        .bind(payload.title.trim())
        .bind(&slug)
        .bind(&payload.summary)
        .bind(&payload.body)
        .bind(payload.country_id)
        .bind(payload.level_id)
        .bind(payload.category_id)
        .bind(&payload.funding)
        .bind(payload.deadline)
        .bind(payload.apply_url.trim())
        .bind(&payload.image_url)
        .bind(payload.featured)
        .bind(payload.published)
        .execute(pool)
        .await
        .map_err(|e| map_unique_violation(e, "slug already in use"))?;

        Self::find(pool, result.last_insert_rowid())
            .await?
            .ok_or(AppError::Internal)
    }

    async fn update(
        pool: &SqlitePool,
        id: i64,
        payload: ScholarshipPayload,
    ) -> AppResult<Scholarship> {
        payload.validate()?;
        let slug = payload.resolve_slug()?;

        let affected = sqlx::query(
            "UPDATE scholarships SET
                 title = ?1, slug = ?2, summary = ?3, body = ?4, country_id = ?5,
                 level_id = ?6, category_id = ?7, funding = ?8, deadline = ?9,
                 apply_url = ?10, image_url = ?11, featured = ?12, published = ?13,
                 updated_at = datetime('now')
             WHERE id = ?14",
        )
        .bind(payload.title.trim())
        .bind(&slug)
        .bind(&payload.summary)
        .bind(&payload.body)
        .bind(payload.country_id)
        .bind(payload.level_id)
        .bind(payload.category_id)
        .bind(&payload.funding)
        .bind(payload.deadline)
        .bind(payload.apply_url.trim())
        .bind(&payload.image_url)
        .bind(payload.featured)
        .bind(payload.published)
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
        let affected = sqlx::query("DELETE FROM scholarships WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?
            .rows_affected();
        Ok(affected > 0)
    }
}
