//! String utilities for the domain layer.

use regex::Regex;
use std::sync::OnceLock;

/// Truncate a string to a maximum length with ellipsis (UTF-8 safe)
///
/// Uses byte length for max_len but ensures truncation occurs at valid
/// UTF-8 character boundaries.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let target = max_len.saturating_sub(3);
        let mut end = target.min(s.len());
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

/// Remove complete HTML tags such as `<b>Nanite</b>` from generated
/// question text. A `<` with no closing `>` is ordinary text.
pub fn strip_html_tags(s: &str) -> String {
    static TAG: OnceLock<Regex> = OnceLock::new();
    let tag = TAG.get_or_init(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));
    tag.replace_all(s, "").into_owned()
}

/// Lowercase and collapse runs of whitespace into single spaces.
pub fn normalize_whitespace_lower(s: &str) -> String {
    s.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_multibyte() {
        // 'é' is 2 bytes; cutting inside it must back up
        assert_eq!(truncate("éééééé", 8), "éé...");
        assert_eq!(truncate("日本語テスト", 30), "日本語テスト");
    }

    #[test]
    fn test_strip_html_tags() {
        assert_eq!(strip_html_tags("Enable <b>Nanite</b> here"), "Enable Nanite here");
        assert_eq!(strip_html_tags("no tags"), "no tags");
        assert_eq!(strip_html_tags("x < 5"), "x < 5");
        assert_eq!(strip_html_tags("if a < b and c > d"), "if a  d");
        assert_eq!(strip_html_tags("<i>r.ScreenPercentage</i> < 100"), "r.ScreenPercentage < 100");
    }

    #[test]
    fn test_normalize_whitespace_lower() {
        assert_eq!(normalize_whitespace_lower("  Hello \n  World "), "hello world");
        assert_eq!(normalize_whitespace_lower(""), "");
    }
}
