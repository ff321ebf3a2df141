// src/services/resource.rs
//
// The one generic CRUD contract every admin resource goes through, instead
// of a copy per entity. A resource supplies its entity type, its payload
// type and the five database operations; the web layer (web/crud.rs) turns
// any implementor into a full set of routes.

use crate::error::{AppError, AppResult};
use crate::slug::slugify;
use crate::validate::Validate;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;
use std::collections::BTreeMap;
use std::collections::HashMap;

/// Raw query-string parameters for list endpoints. Each resource decides
/// which keys it honors; unknown keys are ignored.
pub type ListParams = HashMap<String, String>;

#[async_trait]
pub trait CrudResource: Send + Sync + 'static {
    /// Singular, human-readable name used in 404 messages and logs.
    const NAME: &'static str;

    type Entity: Serialize + Send + Sync;
    type Payload: DeserializeOwned + Validate + Send + Sync;

    async fn list(pool: &SqlitePool, params: &ListParams) -> AppResult<Vec<Self::Entity>>;
    async fn find(pool: &SqlitePool, id: i64) -> AppResult<Option<Self::Entity>>;
    async fn create(pool: &SqlitePool, payload: Self::Payload) -> AppResult<Self::Entity>;
    async fn update(pool: &SqlitePool, id: i64, payload: Self::Payload)
        -> AppResult<Self::Entity>;
    /// Returns whether a row was actually removed.
    async fn delete(pool: &SqlitePool, id: i64) -> AppResult<bool>;
}

/// Payloads with a name-derived slug. `resolve_slug` applies the
/// derived-field policy: an explicit slug wins, otherwise the slug is
/// derived from the name; a derivation that comes out empty (e.g. a purely
/// Arabic name) is a validation error asking for an explicit slug.
pub trait SlugSource {
    fn slug_name(&self) -> &str;
    fn slug_override(&self) -> Option<&str>;

    fn resolve_slug(&self) -> AppResult<String> {
        if let Some(slug) = self.slug_override().filter(|s| !s.is_empty()) {
            return Ok(slug.to_string());
        }
        let derived = slugify(self.slug_name());
        if derived.is_empty() {
            let mut fields = BTreeMap::new();
            fields.insert(
                "slug".to_string(),
                "name does not derive to a latin slug; provide one explicitly".to_string(),
            );
            return Err(AppError::Validation(fields));
        }
        Ok(derived)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named {
        name: String,
        slug: Option<String>,
    }

    impl SlugSource for Named {
        fn slug_name(&self) -> &str {
            &self.name
        }
        fn slug_override(&self) -> Option<&str> {
            self.slug.as_deref()
        }
    }

    #[test]
    fn explicit_slug_wins_over_derivation() {
        let n = Named {
            name: "Some Name".into(),
            slug: Some("custom".into()),
        };
        assert_eq!(n.resolve_slug().unwrap(), "custom");
    }

    #[test]
    fn empty_override_falls_back_to_derivation() {
        let n = Named {
            name: "Some Name".into(),
            slug: Some(String::new()),
        };
        assert_eq!(n.resolve_slug().unwrap(), "some-name");
    }

    #[test]
    fn arabic_only_name_requires_explicit_slug() {
        let n = Named {
            name: "منحة تركيا".into(),
            slug: None,
        };
        assert!(matches!(
            n.resolve_slug().unwrap_err(),
            AppError::Validation(_)
        ));
    }
}
