// src/slug.rs
//
// Slug derivation and the form-session auto-sync rule: the slug field
// tracks the name field until the user edits the slug by hand, after
// which it never auto-updates again for that form session.

/// Derives a URL slug from a human-readable name: lowercase, whitespace
/// runs become single hyphens, everything outside `[a-z0-9-]` is dropped,
/// hyphen runs collapse, edges are trimmed of hyphens.
///
/// Arabic (or any non-latin) input can legitimately produce an empty slug;
/// callers treat that as "explicit slug required".
pub fn slugify(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_hyphen = true; // suppress leading hyphens

    for ch in name.trim().chars() {
        if ch.is_whitespace() || ch == '-' || ch == '_' {
            if !last_hyphen {
                out.push('-');
                last_hyphen = true;
            }
            continue;
        }
        for lowered in ch.to_lowercase() {
            if lowered.is_ascii_lowercase() || lowered.is_ascii_digit() {
                out.push(lowered);
                last_hyphen = false;
            }
        }
    }

    while out.ends_with('-') {
        out.pop();
    }
    out
}

/// True when `slug` already satisfies `^[a-z0-9]+(-[a-z0-9]+)*$`.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Form state for a name + slug field pair.
#[derive(Debug, Clone, Default)]
pub struct SlugField {
    name: String,
    slug: String,
    diverged: bool,
}

impl SlugField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called on every keystroke in the name field. While the user has not
    /// touched the slug, the slug follows the name.
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
        if !self.diverged {
            self.slug = slugify(name);
        }
    }

    /// Called when the user edits the slug field directly. Setting the slug
    /// to anything other than the current derivation permanently opts this
    /// form session out of auto-sync.
    pub fn set_slug(&mut self, slug: &str) {
        self.slug = slug.to_string();
        if slug != slugify(&self.name) {
            self.diverged = true;
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_basic() {
        assert_eq!(slugify("Fully Funded PhD"), "fully-funded-phd");
        assert_eq!(slugify("  Master's   Degree  "), "masters-degree");
        assert_eq!(slugify("Top_10 Grants!"), "top-10-grants");
    }

    #[test]
    fn slugify_strips_non_latin_and_punctuation() {
        // Mixed Arabic/latin input keeps only the latin part.
        assert_eq!(slugify("دكتوراه Example  Title!!"), "example-title");
        // Pure Arabic derives to empty, which callers reject.
        assert_eq!(slugify("منحة تركيا"), "");
    }

    #[test]
    fn slugify_is_idempotent() {
        for name in ["Fully Funded PhD", "a--b", "دكتوراه Example  Title!!", "--x--"] {
            let once = slugify(name);
            assert_eq!(slugify(&once), once, "not idempotent for {name:?}");
        }
    }

    #[test]
    fn slugify_never_has_edge_or_double_hyphens() {
        for name in ["  -lead", "trail- ", "a  !!  b", "--", "!!!"] {
            let s = slugify(name);
            assert!(s.is_empty() || is_valid_slug(&s), "bad slug {s:?} from {name:?}");
        }
    }

    #[test]
    fn valid_slug_check() {
        assert!(is_valid_slug("a"));
        assert!(is_valid_slug("phd-2026"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("-a"));
        assert!(!is_valid_slug("a-"));
        assert!(!is_valid_slug("a--b"));
        assert!(!is_valid_slug("Aب"));
    }

    #[test]
    fn slug_tracks_name_until_manual_edit() {
        let mut field = SlugField::new();
        field.set_name("A");
        assert_eq!(field.slug(), "a");

        field.set_slug("custom");
        field.set_name("B");
        assert_eq!(field.slug(), "custom", "manual edit must stop auto-sync");
    }

    #[test]
    fn retyping_the_derived_slug_keeps_auto_sync() {
        let mut field = SlugField::new();
        field.set_name("Hello World");
        // User "edits" the slug but leaves it equal to the derivation.
        field.set_slug("hello-world");
        field.set_name("Other Name");
        assert_eq!(field.slug(), "other-name");
    }
}
