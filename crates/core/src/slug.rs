//! Product slug derivation and collision probing.

use std::collections::HashSet;

use crate::error::CoreError;

/// Maximum slug length (matches `products.slug VARCHAR(200)`).
pub const MAX_SLUG_LENGTH: usize = 200;

/// Fallback base used when a name contains no ASCII alphanumerics.
pub const FALLBACK_SLUG: &str = "product";

/// Derive a URL-safe slug from a product name.
///
/// Lowercases, replaces every run of non-alphanumeric characters with a
/// single hyphen, and trims hyphens from both ends. Names with nothing
/// slug-worthy fall back to [`FALLBACK_SLUG`].
pub fn slugify(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut prev_hyphen = true;

    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            result.push(c);
            prev_hyphen = false;
        } else if !prev_hyphen {
            result.push('-');
            prev_hyphen = true;
        }
    }

    let mut slug = result.trim_end_matches('-').to_string();
    if slug.len() > MAX_SLUG_LENGTH {
        slug.truncate(MAX_SLUG_LENGTH);
        slug = slug.trim_end_matches('-').to_string();
    }

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// Validate an explicitly supplied slug.
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.is_empty() {
        return Err(CoreError::Validation("slug: must not be empty".into()));
    }
    if slug.len() > MAX_SLUG_LENGTH {
        return Err(CoreError::Validation(format!(
            "slug: must be at most {MAX_SLUG_LENGTH} characters"
        )));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(CoreError::Validation(
            "slug: must contain only lowercase alphanumeric characters and hyphens".into(),
        ));
    }
    Ok(())
}

/// Room reserved for the longest suffix a probe can append (`-` and a `u64`).
const MAX_SUFFIX_LENGTH: usize = 21;

/// `base-{counter}`, with `base` shortened so the result fits in
/// [`MAX_SLUG_LENGTH`].
pub fn with_suffix(base: &str, counter: u64) -> String {
    let suffix = format!("-{counter}");
    let keep = base.len().min(MAX_SLUG_LENGTH.saturating_sub(suffix.len()));
    let stem = base.get(..keep).unwrap_or(base).trim_end_matches('-');
    format!("{stem}{suffix}")
}

/// Leading text shared by every candidate [`next_free_slug`] can return for
/// `base`. Existing slugs starting with it are the only possible collisions.
pub fn probe_prefix(base: &str) -> &str {
    let keep = base.len().min(MAX_SLUG_LENGTH - MAX_SUFFIX_LENGTH);
    base.get(..keep).unwrap_or(base)
}

/// Pick the first free slug for `base` given the slugs already taken.
///
/// Probes `base`, `base-1`, `base-2`, ... and returns the first candidate not
/// present in `taken`. Suffixed candidates are shortened by [`with_suffix`].
/// `taken` only needs the slugs starting with [`probe_prefix`]; anything else
/// is ignored.
pub fn next_free_slug<S: AsRef<str>>(base: &str, taken: &[S]) -> String {
    let taken: HashSet<&str> = taken.iter().map(AsRef::as_ref).collect();
    if !taken.contains(base) {
        return base.to_string();
    }

    let mut counter: u64 = 1;
    loop {
        let candidate = with_suffix(base, counter);
        if !taken.contains(candidate.as_str()) {
            return candidate;
        }
        counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_simple_name() {
        assert_eq!(slugify("Widget"), "widget");
    }

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("  Super -- Widget  Pro! "), "super-widget-pro");
    }

    #[test]
    fn slugify_drops_non_ascii() {
        assert_eq!(slugify("Café Über 2"), "caf-ber-2");
    }

    #[test]
    fn slugify_empty_falls_back() {
        assert_eq!(slugify("!!!"), FALLBACK_SLUG);
        assert_eq!(slugify(""), FALLBACK_SLUG);
    }

    #[test]
    fn slugify_truncates_long_names() {
        let name = "a".repeat(MAX_SLUG_LENGTH + 50);
        assert_eq!(slugify(&name).len(), MAX_SLUG_LENGTH);
    }

    #[test]
    fn next_free_slug_uses_base_when_free() {
        let taken: Vec<String> = vec![];
        assert_eq!(next_free_slug("widget", &taken), "widget");
    }

    #[test]
    fn next_free_slug_appends_first_free_suffix() {
        assert_eq!(next_free_slug("widget", &["widget"]), "widget-1");
        assert_eq!(
            next_free_slug("widget", &["widget", "widget-1", "widget-2"]),
            "widget-3"
        );
    }

    #[test]
    fn next_free_slug_fills_gaps() {
        assert_eq!(
            next_free_slug("widget", &["widget", "widget-2"]),
            "widget-1"
        );
    }

    #[test]
    fn sequential_probing_yields_increasing_suffixes() {
        let mut taken: Vec<String> = Vec::new();
        for expected in ["widget", "widget-1", "widget-2", "widget-3"] {
            let slug = next_free_slug("widget", &taken);
            assert_eq!(slug, expected);
            taken.push(slug);
        }
    }

    #[test]
    fn suffixed_slug_of_a_full_length_base_still_fits() {
        let base = "a".repeat(MAX_SLUG_LENGTH);
        let first = next_free_slug(&base, &[base.as_str()]);
        assert_eq!(first.len(), MAX_SLUG_LENGTH);
        assert_eq!(first, format!("{}-1", "a".repeat(MAX_SLUG_LENGTH - 2)));

        let second = next_free_slug(&base, &[base.clone(), first.clone()]);
        assert_eq!(second, format!("{}-2", "a".repeat(MAX_SLUG_LENGTH - 2)));
        assert!(validate_slug(&second).is_ok());
    }

    #[test]
    fn shortened_base_drops_dangling_hyphen() {
        let base = format!("{}-bb", "a".repeat(MAX_SLUG_LENGTH - 3));
        assert_eq!(
            with_suffix(&base, 1),
            format!("{}-1", "a".repeat(MAX_SLUG_LENGTH - 3))
        );
        assert_eq!(with_suffix(&base, 10).len(), MAX_SLUG_LENGTH);
    }

    #[test]
    fn every_candidate_starts_with_probe_prefix() {
        let base = format!("{}-bb", "a".repeat(MAX_SLUG_LENGTH - 3));
        let prefix = probe_prefix(&base);
        for counter in [1, 9, 10, 12_345, u64::MAX] {
            let candidate = with_suffix(&base, counter);
            assert!(candidate.len() <= MAX_SLUG_LENGTH);
            assert!(candidate.starts_with(prefix), "{candidate}");
        }
        assert_eq!(probe_prefix("widget"), "widget");
    }

    #[test]
    fn validate_slug_rejects_uppercase_and_spaces() {
        assert!(validate_slug("Widget").is_err());
        assert!(validate_slug("my widget").is_err());
        assert!(validate_slug("").is_err());
        assert!(validate_slug("widget-2").is_ok());
    }
}
