use regex::Regex;

/// Strip configured noise patterns from an extracted value.
///
/// Every pattern is applied in order, with all of its matches replaced by the
/// empty string. Trimming only happens when `final_strip` is enabled, so a
/// substitution-only configuration keeps whatever whitespace the patterns
/// leave behind.
pub fn sanitize(raw: &str, patterns: &[Regex], final_strip: bool) -> String {
    let mut value = raw.to_string();
    for pattern in patterns {
        value = pattern.replace_all(&value, "").into_owned();
    }
    if final_strip {
        value.trim().to_string()
    } else {
        value
    }
}

/// Does an existing title count as missing or meaningless?
///
/// Patterns are tried in order and must match at the start of the title
/// (authors anchor the end with `$` themselves); matching is case-insensitive
/// by construction in [`crate::config::InferConfig::compile`]. An empty
/// pattern list means nothing is ever considered bad.
pub fn is_bad_title(title: &str, patterns: &[Regex]) -> bool {
    patterns
        .iter()
        .any(|p| p.find(title).is_some_and(|m| m.start() == 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::RegexBuilder;

    fn subs(patterns: &[&str]) -> Vec<Regex> {
        patterns.iter().map(|p| Regex::new(p).unwrap()).collect()
    }

    fn bad(patterns: &[&str]) -> Vec<Regex> {
        patterns
            .iter()
            .map(|p| RegexBuilder::new(p).case_insensitive(true).build().unwrap())
            .collect()
    }

    #[test]
    fn test_sanitize_substitutes_then_trims() {
        let patterns = subs(&[r"\[.*?\]"]);
        assert_eq!(sanitize("Song [Remix]", &patterns, true), "Song");
    }

    #[test]
    fn test_sanitize_without_final_strip_keeps_whitespace() {
        let patterns = subs(&[r"\[.*?\]"]);
        assert_eq!(sanitize("Song [Remix]", &patterns, false), "Song ");
    }

    #[test]
    fn test_sanitize_applies_patterns_in_order() {
        let patterns = subs(&[r"www\.\S+", r"\s{2,}"]);
        assert_eq!(sanitize("Song  www.example.com", &patterns, true), "Song");
    }

    #[test]
    fn test_sanitize_is_case_sensitive() {
        let patterns = subs(&["live"]);
        assert_eq!(sanitize("LIVE set live", &patterns, true), "LIVE set");
    }

    #[test]
    fn test_empty_title_is_bad_under_default_pattern() {
        assert!(is_bad_title("", &bad(&["^$"])));
        assert!(!is_bad_title("Intro", &bad(&["^$"])));
    }

    #[test]
    fn test_placeholder_track_title_is_bad() {
        let patterns = bad(&[r"\d+?\s?-?\s*track\s*\d+"]);
        assert!(is_bad_title("01 - Track 01", &patterns));
        assert!(is_bad_title("1 TRACK 1", &patterns));
        assert!(!is_bad_title("Fast Track Living", &patterns));
    }

    #[test]
    fn test_bad_title_patterns_anchor_at_start() {
        // No match at position 0, so the title stands.
        assert!(!is_bad_title("My untitled song", &bad(&["untitled"])));
        assert!(is_bad_title("Untitled song", &bad(&["untitled"])));
    }

    #[test]
    fn test_no_patterns_means_nothing_is_bad() {
        assert!(!is_bad_title("", &[]));
    }
}
