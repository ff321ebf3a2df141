// src/models/taxonomy.rs
//
// Countries, levels, categories and tags all share one shape; they only
// differ by table. One model serves all four.

use crate::error::AppResult;
use crate::validate::{FieldErrors, Validate};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Term {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TermPayload {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: String,
}

impl Validate for TermPayload {
    fn validate(&self) -> AppResult<()> {
        let mut errs = FieldErrors::new();
        errs.require("name", &self.name);
        errs.max_len("name", &self.name, 200);
        errs.slug("slug", self.slug.as_deref());
        errs.max_len("description", &self.description, 2000);
        errs.finish()
    }
}
