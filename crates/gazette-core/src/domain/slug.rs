//! Slug derivation for post addresses.

/// Maximum slug length, matching the `slug` column width.
pub const MAX_SLUG_LEN: usize = 250;

/// Derive a URL-safe slug from a post title.
///
/// Lower-cases the title, collapses every run of non-alphanumeric
/// characters into a single `-`, strips leading/trailing separators and
/// truncates to [`MAX_SLUG_LEN`]. Returns `None` when nothing survives
/// (e.g. an all-punctuation title) - callers must treat that as a
/// validation failure rather than invent a slug.
///
/// Derivation performs no collision avoidance. Two posts published on the
/// same date with the same derived slug violate the `(published date,
/// slug)` unique index and the write is rejected.
pub fn slugify(title: &str) -> Option<String> {
    let mut slug = String::with_capacity(title.len());
    let mut pending_separator = false;

    for ch in title.chars() {
        if ch.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            for lower in ch.to_lowercase() {
                slug.push(lower);
            }
        } else {
            pending_separator = true;
        }
    }

    if slug.is_empty() {
        return None;
    }

    if slug.len() > MAX_SLUG_LEN {
        // Truncate on a char boundary, then drop any trailing separator.
        let mut end = MAX_SLUG_LEN;
        while !slug.is_char_boundary(end) {
            end -= 1;
        }
        slug.truncate(end);
        while slug.ends_with('-') {
            slug.pop();
        }
    }

    Some(slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_joins_words() {
        assert_eq!(slugify("Hello World"), Some("hello-world".to_string()));
    }

    #[test]
    fn test_collapses_punctuation_runs() {
        assert_eq!(
            slugify("Rust: a  Blog -- Engine!"),
            Some("rust-a-blog-engine".to_string())
        );
    }

    #[test]
    fn test_strips_leading_and_trailing_separators() {
        assert_eq!(slugify("  ...Why Rust?  "), Some("why-rust".to_string()));
    }

    #[test]
    fn test_empty_derivation_is_none() {
        assert_eq!(slugify("!!!"), None);
        assert_eq!(slugify(""), None);
        assert_eq!(slugify("   "), None);
    }

    #[test]
    fn test_truncates_to_max_len() {
        let title = "a ".repeat(300);
        let slug = slugify(&title).unwrap();
        assert!(slug.len() <= MAX_SLUG_LEN);
        assert!(!slug.ends_with('-'));
    }

    #[test]
    fn test_unicode_titles_survive() {
        assert_eq!(slugify("Čaj über alles"), Some("čaj-über-alles".to_string()));
    }
}
