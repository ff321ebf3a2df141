// src/validate.rs
//
// Field-level validation run before any database work, so rejected input
// never reaches a query. Errors surface as a 422 with per-field messages.

use crate::error::{AppError, AppResult};
use crate::slug::is_valid_slug;
use std::collections::BTreeMap;

/// Implemented by every create/update payload.
pub trait Validate {
    fn validate(&self) -> AppResult<()>;
}

#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: BTreeMap<String, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        // First error per field wins, matching inline form display.
        self.errors
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn require(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, "this field is required");
        }
    }

    pub fn max_len(&mut self, field: &str, value: &str, max: usize) {
        if value.chars().count() > max {
            self.add(field, format!("must be at most {max} characters"));
        }
    }

    /// Accepts an optional explicit slug. `None`/empty means "derive from
    /// the name"; anything else must already be in canonical form.
    pub fn slug(&mut self, field: &str, value: Option<&str>) {
        if let Some(slug) = value {
            if !slug.is_empty() && !is_valid_slug(slug) {
                self.add(
                    field,
                    "must contain only lowercase latin letters, digits and single hyphens",
                );
            }
        }
    }

    pub fn email(&mut self, field: &str, value: &str) {
        let v = value.trim();
        let well_formed = v
            .split_once('@')
            .map_or(false, |(local, domain)| {
                !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
            });
        if !well_formed {
            self.add(field, "must be a valid email address");
        }
    }

    pub fn finish(self) -> AppResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self.errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_required_field_is_rejected() {
        let mut errs = FieldErrors::new();
        errs.require("title", "   ");
        let err = errs.finish().unwrap_err();
        match err {
            AppError::Validation(fields) => assert!(fields.contains_key("title")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn first_error_per_field_wins() {
        let mut errs = FieldErrors::new();
        errs.require("name", "");
        errs.max_len("name", "", 10);
        match errs.finish().unwrap_err() {
            AppError::Validation(fields) => {
                assert_eq!(fields["name"], "this field is required");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn slug_and_email_checks() {
        let mut errs = FieldErrors::new();
        errs.slug("slug", Some("ok-slug"));
        errs.slug("slug2", None);
        errs.email("email", "user@example.com");
        assert!(errs.finish().is_ok());

        let mut errs = FieldErrors::new();
        errs.slug("slug", Some("Bad Slug"));
        errs.email("email", "not-an-email");
        match errs.finish().unwrap_err() {
            AppError::Validation(fields) => {
                assert!(fields.contains_key("slug"));
                assert!(fields.contains_key("email"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
