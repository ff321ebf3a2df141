// src/models/page.rs
use crate::error::AppResult;
use crate::validate::{FieldErrors, Validate};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Page {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub published: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PagePayload {
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub published: bool,
}

impl Validate for PagePayload {
    fn validate(&self) -> AppResult<()> {
        let mut errs = FieldErrors::new();
        errs.require("title", &self.title);
        errs.max_len("title", &self.title, 300);
        errs.slug("slug", self.slug.as_deref());
        errs.finish()
    }
}
