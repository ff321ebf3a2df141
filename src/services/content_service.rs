// src/services/content_service.rs
//
// Posts, pages, partners and success stories: generic CRUD implementations
// plus the published-only queries the public site uses.

use crate::error::{map_unique_violation, AppError, AppResult};
use crate::models::page::{Page, PagePayload};
use crate::models::partner::{Partner, PartnerPayload};
use crate::models::post::{Post, PostPayload};
use crate::models::story::{Story, StoryPayload};
use crate::services::resource::{CrudResource, ListParams, SlugSource};
use crate::validate::Validate;
use async_trait::async_trait;
use sqlx::SqlitePool;

impl SlugSource for PostPayload {
    fn slug_name(&self) -> &str {
        &self.title
    }
    fn slug_override(&self) -> Option<&str> {
        self.slug.as_deref()
    }
}

impl SlugSource for PagePayload {
    fn slug_name(&self) -> &str {
        &self.title
    }
    fn slug_override(&self) -> Option<&str> {
        self.slug.as_deref()
    }
}

impl SlugSource for PartnerPayload {
    fn slug_name(&self) -> &str {
        &self.name
    }
    fn slug_override(&self) -> Option<&str> {
        self.slug.as_deref()
    }
}

impl SlugSource for StoryPayload {
    fn slug_name(&self) -> &str {
        &self.title
    }
    fn slug_override(&self) -> Option<&str> {
        self.slug.as_deref()
    }
}

// --- Public-site queries -------------------------------------------------

pub async fn published_posts(pool: &SqlitePool, q: Option<&str>) -> AppResult<Vec<Post>> {
    let rows = sqlx::query_as::<_, Post>(
        "SELECT * FROM posts
         WHERE published = 1
           AND (?1 IS NULL OR title LIKE '%' || ?1 || '%' OR excerpt LIKE '%' || ?1 || '%')
         ORDER BY created_at DESC, id DESC",
    )
    .bind(q.map(str::trim).filter(|q| !q.is_empty()))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_published_post(pool: &SqlitePool, slug: &str) -> AppResult<Option<Post>> {
    let row = sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE slug = ?1 AND published = 1")
        .bind(slug)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_published_page(pool: &SqlitePool, slug: &str) -> AppResult<Option<Page>> {
    let row = sqlx::query_as::<_, Page>("SELECT * FROM pages WHERE slug = ?1 AND published = 1")
        .bind(slug)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn all_partners(pool: &SqlitePool) -> AppResult<Vec<Partner>> {
    let rows = sqlx::query_as::<_, Partner>("SELECT * FROM partners ORDER BY name ASC")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn published_stories(pool: &SqlitePool) -> AppResult<Vec<Story>> {
    let rows = sqlx::query_as::<_, Story>(
        "SELECT * FROM success_stories WHERE published = 1 ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_published_story(pool: &SqlitePool, slug: &str) -> AppResult<Option<Story>> {
    let row = sqlx::query_as::<_, Story>(
        "SELECT * FROM success_stories WHERE slug = ?1 AND published = 1",
    )
    .bind(slug)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

// --- Admin CRUD resources ------------------------------------------------

pub struct PostResource;

#[async_trait]
impl CrudResource for PostResource {
    const NAME: &'static str = "post";
    type Entity = Post;
    type Payload = PostPayload;

    async fn list(pool: &SqlitePool, params: &ListParams) -> AppResult<Vec<Post>> {
        let q = params
            .get("q")
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty());
        let rows = sqlx::query_as::<_, Post>(
            "SELECT * FROM posts
             WHERE (?1 IS NULL OR title LIKE '%' || ?1 || '%')
             ORDER BY created_at DESC, id DESC",
        )
        .bind(q)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    async fn find(pool: &SqlitePool, id: i64) -> AppResult<Option<Post>> {
        let row = sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = ?1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    async fn create(pool: &SqlitePool, payload: PostPayload) -> AppResult<Post> {
        payload.validate()?;
        let slug = payload.resolve_slug()?;
        let result = sqlx::query(
            "INSERT INTO posts (title, slug, excerpt, body, image_url, published)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(payload.title.trim())
        .bind(&slug)
        .bind(&payload.excerpt)
        .bind(&payload.body)
        .bind(&payload.image_url)
        .bind(payload.published)
        .execute(pool)
        .await
        .map_err(|e| map_unique_violation(e, "slug already in use"))?;

        Self::find(pool, result.last_insert_rowid())
            .await?
            .ok_or(AppError::Internal)
    }

    async fn update(pool: &SqlitePool, id: i64, payload: PostPayload) -> AppResult<Post> {
        payload.validate()?;
        let slug = payload.resolve_slug()?;
        let affected = sqlx::query(
            "UPDATE posts SET title = ?1, slug = ?2, excerpt = ?3, body = ?4,
                 image_url = ?5, published = ?6, updated_at = datetime('now')
             WHERE id = ?7",
        )
        .bind(payload.title.trim())
        .bind(&slug)
        .bind(&payload.excerpt)
        .bind(&payload.body)
        .bind(&payload.image_url)
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
        let affected = sqlx::query("DELETE FROM posts WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?
            .rows_affected();
        Ok(affected > 0)
    }
}

pub struct PageResource;

#[async_trait]
impl CrudResource for PageResource {
    const NAME: &'static str = "page";
    type Entity = Page;
    type Payload = PagePayload;

    async fn list(pool: &SqlitePool, params: &ListParams) -> AppResult<Vec<Page>> {
        let q = params
            .get("q")
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty());
        let rows = sqlx::query_as::<_, Page>(
            "SELECT * FROM pages
             WHERE (?1 IS NULL OR title LIKE '%' || ?1 || '%')
             ORDER BY title ASC",
        )
        .bind(q)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    async fn find(pool: &SqlitePool, id: i64) -> AppResult<Option<Page>> {
        let row = sqlx::query_as::<_, Page>("SELECT * FROM pages WHERE id = ?1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    async fn create(pool: &SqlitePool, payload: PagePayload) -> AppResult<Page> {
        payload.validate()?;
        let slug = payload.resolve_slug()?;
        let result = sqlx::query(
            "INSERT INTO pages (title, slug, body, published) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(payload.title.trim())
        .bind(&slug)
        .bind(&payload.body)
        .bind(payload.published)
        .execute(pool)
        .await
        .map_err(|e| map_unique_violation(e, "slug already in use"))?;

        Self::find(pool, result.last_insert_rowid())
            .await?
            .ok_or(AppError::Internal)
    }

    async fn update(pool: &SqlitePool, id: i64, payload: PagePayload) -> AppResult<Page> {
        payload.validate()?;
        let slug = payload.resolve_slug()?;
        let affected = sqlx::query(
            "UPDATE pages SET title = ?1, slug = ?2, body = ?3, published = ?4,
                 updated_at = datetime('now')
             WHERE id = ?5",
        )
        .bind(payload.title.trim())
        .bind(&slug)
        .bind(&payload.body)
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
        let affected = sqlx::query("DELETE FROM pages WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?
            .rows_affected();
        Ok(affected > 0)
    }
}

pub struct PartnerResource;

#[async_trait]
impl CrudResource for PartnerResource {
    const NAME: &'static str = "partner";
    type Entity = Partner;
    type Payload = PartnerPayload;

    async fn list(pool: &SqlitePool, params: &ListParams) -> AppResult<Vec<Partner>> {
        let q = params
            .get("q")
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty());
        let rows = sqlx::query_as::<_, Partner>(
            "SELECT * FROM partners
             WHERE (?1 IS NULL OR name LIKE '%' || ?1 || '%')
             ORDER BY name ASC",
        )
        .bind(q)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    async fn find(pool: &SqlitePool, id: i64) -> AppResult<Option<Partner>> {
        let row = sqlx::query_as::<_, Partner>("SELECT * FROM partners WHERE id = ?1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    async fn create(pool: &SqlitePool, payload: PartnerPayload) -> AppResult<Partner> {
        payload.validate()?;
        let slug = payload.resolve_slug()?;
        let result = sqlx::query(
            "INSERT INTO partners (name, slug, logo_url, website_url)
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(payload.name.trim())
        .bind(&slug)
        .bind(payload.logo_url.trim())
        .bind(&payload.website_url)
        .execute(pool)
        .await
        .map_err(|e| map_unique_violation(e, "slug already in use"))?;

        Self::find(pool, result.last_insert_rowid())
            .await?
            .ok_or(AppError::Internal)
    }

    async fn update(pool: &SqlitePool, id: i64, payload: PartnerPayload) -> AppResult<Partner> {
        payload.validate()?;
        let slug = payload.resolve_slug()?;
        let affected = sqlx::query(
            "UPDATE partners SET name = ?1, slug = ?2, logo_url = ?3, website_url = ?4,
                 updated_at = datetime('now')
             WHERE id = ?5",
        )
        .bind(payload.name.trim())
        .bind(&slug)
        .bind(payload.logo_url.trim())
        .bind(&payload.website_url)
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
        let affected = sqlx::query("DELETE FROM partners WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?
            .rows_affected();
        Ok(affected > 0)
    }
}

pub struct StoryResource;

#[async_trait]
impl CrudResource for StoryResource {
    const NAME: &'static str = "success story";
    type Entity = Story;
    type Payload = StoryPayload;

    async fn list(pool: &SqlitePool, params: &ListParams) -> AppResult<Vec<Story>> {
        let q = params
            .get("q")
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty());
        let rows = sqlx::query_as::<_, Story>(
            "SELECT * FROM success_stories
             WHERE (?1 IS NULL OR title LIKE '%' || ?1 || '%' OR student_name LIKE '%' || ?1 || '%')
             ORDER BY created_at DESC, id DESC",
        )
        .bind(q)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    async fn find(pool: &SqlitePool, id: i64) -> AppResult<Option<Story>> {
        let row = sqlx::query_as::<_, Story>("SELECT * FROM success_stories WHERE id = ?1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    async fn create(pool: &SqlitePool, payload: StoryPayload) -> AppResult<Story> {
        payload.validate()?;
        let slug = payload.resolve_slug()?;
        let result = sqlx::query(
            "INSERT INTO success_stories (student_name, title, slug, body, image_url, published)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(payload.student_name.trim())
        .bind(payload.title.trim())
        .bind(&slug)
        .bind(&payload.body)
        .bind(&payload.image_url)
        .bind(payload.published)
        .execute(pool)
        .await
        .map_err(|e| map_unique_violation(e, "slug already in use"))?;

        Self::find(pool, result.last_insert_rowid())
            .await?
            .ok_or(AppError::Internal)
    }

    async fn update(pool: &SqlitePool, id: i64, payload: StoryPayload) -> AppResult<Story> {
        payload.validate()?;
        let slug = payload.resolve_slug()?;
        let affected = sqlx::query(
            "UPDATE success_stories SET student_name = ?1, title = ?2, slug = ?3,
                 body = ?4, image_url = ?5, published = ?6, updated_at = datetime('now')
             WHERE id = ?7",
        )
        .bind(payload.student_name.trim())
        .bind(payload.title.trim())
        .bind(&slug)
        .bind(&payload.body)
        .bind(&payload.image_url)
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
        let affected = sqlx::query("DELETE FROM success_stories WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?
            .rows_affected();
        Ok(affected > 0)
    }
}
