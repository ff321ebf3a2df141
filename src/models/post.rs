// src/models/post.rs
use crate::error::AppResult;
use crate::validate::{FieldErrors, Validate};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub body: String,
    pub image_url: Option<String>,
    pub published: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostPayload {
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub published: bool,
}

impl Validate for PostPayload {
    fn validate(&self) -> AppResult<()> {
        let mut errs = FieldErrors::new();
        errs.require("title", &self.title);
        errs.max_len("title", &self.title, 300);
        errs.slug("slug", self.slug.as_deref());
        errs.max_len("excerpt", &self.excerpt, 1000);
        errs.finish()
    }
}
