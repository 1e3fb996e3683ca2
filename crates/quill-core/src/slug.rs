//! Slug derivation - URL-safe identifiers for posts.

/// Normalize a raw string (usually a post title) into a URL-safe slug.
///
/// Lowercases, drops everything outside `[a-z0-9\s-]`, then collapses
/// whitespace runs and repeated hyphens into single hyphens with no
/// leading or trailing hyphen left over.
///
/// An input with no usable characters yields an empty string; rejecting
/// that is the caller's validation concern, not this function's.
pub fn slugify(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric() || ch.is_whitespace() || *ch == '-')
        .map(|ch| if ch.is_whitespace() { '-' } else { ch })
        .collect::<String>()
        .split('-')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_punctuation() {
        assert_eq!(slugify("My Amazing Post!"), "my-amazing-post");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(slugify("  Multiple   Spaces  "), "multiple-spaces");
    }

    #[test]
    fn test_empty_input_stays_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_collapses_repeated_hyphens() {
        assert_eq!(slugify("hello---world"), "hello-world");
        assert_eq!(slugify("- leading and trailing -"), "leading-and-trailing");
    }

    #[test]
    fn test_drops_non_ascii() {
        assert_eq!(slugify("Hello 世界"), "hello");
    }

    #[test]
    fn test_keeps_digits() {
        assert_eq!(slugify("Top 10 Crates of 2026"), "top-10-crates-of-2026");
    }
}
