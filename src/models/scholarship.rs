// src/models/scholarship.rs
use crate::error::AppResult;
use crate::validate::{FieldErrors, Validate};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const FUNDING_FULL: &str = "full";
pub const FUNDING_PARTIAL: &str = "partial";

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Scholarship {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub summary: String,
    pub body: String,
    pub country_id: Option<i64>,
    pub level_id: Option<i64>,
    pub category_id: Option<i64>,
    pub funding: String,
    pub deadline: Option<NaiveDate>,
    pub apply_url: String,
    pub image_url: Option<String>,
    pub featured: bool,
    pub published: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScholarshipPayload {
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub country_id: Option<i64>,
    #[serde(default)]
    pub level_id: Option<i64>,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default = "default_funding")]
    pub funding: String,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    pub apply_url: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub published: bool,
}

fn default_funding() -> String {
    FUNDING_FULL.to_string()
}

impl Validate for ScholarshipPayload {
    fn validate(&self) -> AppResult<()> {
        let mut errs = FieldErrors::new();
        errs.require("title", &self.title);
        errs.max_len("title", &self.title, 300);
        errs.slug("slug", self.slug.as_deref());
        errs.max_len("summary", &self.summary, 1000);
        errs.require("apply_url", &self.apply_url);
        errs.max_len("apply_url", &self.apply_url, 2000);
        if self.funding != FUNDING_FULL && self.funding != FUNDING_PARTIAL {
            errs.add("funding", "must be 'full' or 'partial'");
        }
        errs.finish()
    }
}

/// Query-string filters for scholarship listings, shared by the public
/// site and the admin list endpoint. Taxonomies filter by slug.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScholarshipFilter {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub featured: Option<bool>,
}
