// src/models/story.rs
use crate::error::AppResult;
use crate::validate::{FieldErrors, Validate};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A student success story shown on the public site.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Story {
    pub id: i64,
    pub student_name: String,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub image_url: Option<String>,
    pub published: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoryPayload {
    pub student_name: String,
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub published: bool,
}

impl Validate for StoryPayload {
    fn validate(&self) -> AppResult<()> {
        let mut errs = FieldErrors::new();
        errs.require("student_name", &self.student_name);
        errs.max_len("student_name", &self.student_name, 200);
        errs.require("title", &self.title);
        errs.max_len("title", &self.title, 300);
        errs.slug("slug", self.slug.as_deref());
        errs.finish()
    }
}
