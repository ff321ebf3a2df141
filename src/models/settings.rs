// src/models/settings.rs
use crate::error::AppResult;
use crate::validate::{FieldErrors, Validate};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Site appearance/settings. Single row, id is always 1.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Settings {
    pub id: i64,
    pub site_name: String,
    pub tagline: String,
    pub contact_email: String,
    pub facebook_url: Option<String>,
    pub twitter_url: Option<String>,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SettingsPayload {
    pub site_name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub contact_email: String,
    #[serde(default)]
    pub facebook_url: Option<String>,
    #[serde(default)]
    pub twitter_url: Option<String>,
}

impl Validate for SettingsPayload {
    fn validate(&self) -> AppResult<()> {
        let mut errs = FieldErrors::new();
        errs.require("site_name", &self.site_name);
        errs.max_len("site_name", &self.site_name, 200);
        errs.max_len("tagline", &self.tagline, 500);
        if !self.contact_email.trim().is_empty() {
            errs.email("contact_email", &self.contact_email);
        }
        errs.finish()
    }
}
