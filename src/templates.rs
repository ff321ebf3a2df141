// src/templates.rs
use crate::error::AppResult;
use crate::models::{
    page::Page,
    partner::Partner,
    post::Post,
    scholarship::{Scholarship, ScholarshipFilter},
    settings::Settings,
    story::Story,
    taxonomy::Term,
};
use askama::Template;
use axum::response::Html;

pub fn render<T: Template>(template: &T) -> AppResult<Html<String>> {
    Ok(Html(template.render()?))
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomePage {
    pub settings: Settings,
    pub featured: Vec<Scholarship>,
    pub latest_posts: Vec<Post>,
    pub stories: Vec<Story>,
    pub partners: Vec<Partner>,
}

#[derive(Template)]
#[template(path = "scholarships.html")]
pub struct ScholarshipIndexPage {
    pub settings: Settings,
    pub scholarships: Vec<Scholarship>,
    pub countries: Vec<Term>,
    pub levels: Vec<Term>,
    pub categories: Vec<Term>,
    pub filter: ScholarshipFilter,
}

#[derive(Template)]
#[template(path = "scholarship_detail.html")]
pub struct ScholarshipDetailPage {
    pub settings: Settings,
    pub scholarship: Scholarship,
}

#[derive(Template)]
#[template(path = "posts.html")]
pub struct PostIndexPage {
    pub settings: Settings,
    pub posts: Vec<Post>,
}

#[derive(Template)]
#[template(path = "post_detail.html")]
pub struct PostDetailPage {
    pub settings: Settings,
    pub post: Post,
}

#[derive(Template)]
#[template(path = "page.html")]
pub struct StaticPage {
    pub settings: Settings,
    pub page: Page,
}

#[derive(Template)]
#[template(path = "stories.html")]
pub struct StoryIndexPage {
    pub settings: Settings,
    pub stories: Vec<Story>,
}

#[derive(Template)]
#[template(path = "story_detail.html")]
pub struct StoryDetailPage {
    pub settings: Settings,
    pub story: Story,
}

/// The aggregated search page: one query string, one tab per entity type.
/// No ranking; each tab is whatever its LIKE query returned.
#[derive(Template)]
#[template(path = "search.html")]
pub struct SearchPage {
    pub settings: Settings,
    pub query: String,
    pub scholarships: Vec<Scholarship>,
    pub posts: Vec<Post>,
}

#[derive(Template)]
#[template(path = "subscribe_result.html")]
pub struct SubscribeResultPage {
    pub settings: Settings,
    pub ok: bool,
    pub message: String,
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundPage {
    pub settings: Settings,
}
