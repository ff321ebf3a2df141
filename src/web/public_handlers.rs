// src/web/public_handlers.rs
//
// Server-rendered public site. Every handler fetches the settings row for
// the shared layout, then its own published content.

use crate::{
    error::AppResult,
    models::scholarship::ScholarshipFilter,
    models::subscriber::SubscribePayload,
    services::{catalog_service, content_service, settings_service, subscriber_service, taxonomy_service},
    state::AppState,
    templates,
    validate::Validate,
};
use axum::{
    extract::{Form, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

fn not_found(settings: crate::models::settings::Settings) -> AppResult<Response> {
    let page = templates::NotFoundPage { settings };
    Ok((StatusCode::NOT_FOUND, templates::render(&page)?).into_response())
}

// GET /
pub async fn home(State(state): State<AppState>) -> AppResult<Response> {
    let pool = &state.db_pool;
    let page = templates::HomePage {
        settings: settings_service::get(pool).await?,
        featured: catalog_service::featured(pool, 6).await?,
        latest_posts: {
            let mut posts = content_service::published_posts(pool, None).await?;
            posts.truncate(4);
            posts
        },
        stories: {
            let mut stories = content_service::published_stories(pool).await?;
            stories.truncate(3);
            stories
        },
        partners: content_service::all_partners(pool).await?,
    };
    Ok(templates::render(&page)?.into_response())
}

// GET /scholarships?country=&level=&category=&q=
pub async fn scholarship_index(
    State(state): State<AppState>,
    Query(filter): Query<ScholarshipFilter>,
) -> AppResult<Response> {
    let pool = &state.db_pool;
    let page = templates::ScholarshipIndexPage {
        settings: settings_service::get(pool).await?,
        scholarships: catalog_service::list_published(pool, &filter).await?,
        countries: taxonomy_service::list_all(pool, "countries").await?,
        levels: taxonomy_service::list_all(pool, "levels").await?,
        categories: taxonomy_service::list_all(pool, "categories").await?,
        filter,
    };
    Ok(templates::render(&page)?.into_response())
}

// GET /scholarships/{slug}
pub async fn scholarship_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Response> {
    let pool = &state.db_pool;
    let settings = settings_service::get(pool).await?;
    match catalog_service::find_published_by_slug(pool, &slug).await? {
        Some(scholarship) => {
            let page = templates::ScholarshipDetailPage {
                settings,
                scholarship,
            };
            Ok(templates::render(&page)?.into_response())
        }
        None => not_found(settings),
    }
}

// GET /posts
pub async fn post_index(State(state): State<AppState>) -> AppResult<Response> {
    let pool = &state.db_pool;
    let page = templates::PostIndexPage {
        settings: settings_service::get(pool).await?,
        posts: content_service::published_posts(pool, None).await?,
    };
    Ok(templates::render(&page)?.into_response())
}

// GET /posts/{slug}
pub async fn post_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Response> {
    let pool = &state.db_pool;
    let settings = settings_service::get(pool).await?;
    match content_service::find_published_post(pool, &slug).await? {
        Some(post) => {
            let page = templates::PostDetailPage { settings, post };
            Ok(templates::render(&page)?.into_response())
        }
        None => not_found(settings),
    }
}

// GET /p/{slug} — editor-managed static pages (about, FAQ, ...).
pub async fn page_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Response> {
    let pool = &state.db_pool;
    let settings = settings_service::get(pool).await?;
    match content_service::find_published_page(pool, &slug).await? {
        Some(page) => {
            let page = templates::StaticPage { settings, page };
            Ok(templates::render(&page)?.into_response())
        }
        None => not_found(settings),
    }
}

// GET /stories
pub async fn story_index(State(state): State<AppState>) -> AppResult<Response> {
    let pool = &state.db_pool;
    let page = templates::StoryIndexPage {
        settings: settings_service::get(pool).await?,
        stories: content_service::published_stories(pool).await?,
    };
    Ok(templates::render(&page)?.into_response())
}

// GET /stories/{slug}
pub async fn story_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Response> {
    let pool = &state.db_pool;
    let settings = settings_service::get(pool).await?;
    match content_service::find_published_story(pool, &slug).await? {
        Some(story) => {
            let page = templates::StoryDetailPage { settings, story };
            Ok(templates::render(&page)?.into_response())
        }
        None => not_found(settings),
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

// GET /search?q=
//
// One query string fanned out to each content type; results render as
// tabs. Empty queries render the page with no results.
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Response> {
    let pool = &state.db_pool;
    let q = query.q.trim().to_string();

    let (scholarships, posts) = if q.is_empty() {
        (Vec::new(), Vec::new())
    } else {
        let filter = ScholarshipFilter {
            q: Some(q.clone()),
            ..Default::default()
        };
        (
            catalog_service::list_published(pool, &filter).await?,
            content_service::published_posts(pool, Some(&q)).await?,
        )
    };

    let page = templates::SearchPage {
        settings: settings_service::get(pool).await?,
        query: q,
        scholarships,
        posts,
    };
    Ok(templates::render(&page)?.into_response())
}

// POST /subscribe — newsletter capture from the site footer form.
pub async fn subscribe(
    State(state): State<AppState>,
    Form(payload): Form<SubscribePayload>,
) -> AppResult<Response> {
    let pool = &state.db_pool;
    let settings = settings_service::get(pool).await?;

    if payload.validate().is_err() {
        let page = templates::SubscribeResultPage {
            settings,
            ok: false,
            message: "يرجى إدخال بريد إلكتروني صالح.".to_string(),
        };
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, templates::render(&page)?).into_response());
    }

    let (_, created) = subscriber_service::subscribe(pool, &payload.email).await?;
    let message = if created {
        "تم الاشتراك بنجاح! ستصلك أحدث المنح على بريدك.".to_string()
    } else {
        "هذا البريد مشترك لدينا بالفعل.".to_string()
    };
    let page = templates::SubscribeResultPage {
        settings,
        ok: true,
        message,
    };
    Ok(templates::render(&page)?.into_response())
}
