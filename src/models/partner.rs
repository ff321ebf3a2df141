// src/models/partner.rs
use crate::error::AppResult;
use crate::validate::{FieldErrors, Validate};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Partner {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub logo_url: String,
    pub website_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PartnerPayload {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    pub logo_url: String,
    #[serde(default)]
    pub website_url: Option<String>,
}

impl Validate for PartnerPayload {
    fn validate(&self) -> AppResult<()> {
        let mut errs = FieldErrors::new();
        errs.require("name", &self.name);
        errs.max_len("name", &self.name, 200);
        errs.slug("slug", self.slug.as_deref());
        errs.require("logo_url", &self.logo_url);
        errs.max_len("logo_url", &self.logo_url, 2000);
        errs.finish()
    }
}
