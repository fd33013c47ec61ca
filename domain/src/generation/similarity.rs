//! Near-duplicate detection for question text

use crate::core::string::{normalize_whitespace_lower, strip_html_tags};
use crate::question::Question;
use std::collections::{BTreeSet, HashSet};

/// Similarity at or above which two questions count as duplicates
pub const DUPLICATE_THRESHOLD: f64 = 0.85;

/// Texts longer than this (in chars) are compared by word sets
const LONG_TEXT_CHARS: usize = 500;

fn normalize(s: &str) -> String {
    normalize_whitespace_lower(&strip_html_tags(s))
}

/// Similarity of two texts in `[0, 1]`
///
/// Case, HTML tags and whitespace runs are ignored. Short texts use
/// normalized Levenshtein distance, long ones word-set Jaccard.
pub fn text_similarity(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.len() > LONG_TEXT_CHARS || b_chars.len() > LONG_TEXT_CHARS {
        let words_a: BTreeSet<&str> = a.split(' ').collect();
        let words_b: BTreeSet<&str> = b.split(' ').collect();
        let union = words_a.union(&words_b).count();
        if union == 0 {
            return 0.0;
        }
        return words_a.intersection(&words_b).count() as f64 / union as f64;
    }

    let max_len = a_chars.len().max(b_chars.len());
    1.0 - levenshtein(&a_chars, &b_chars) as f64 / max_len as f64
}

/// Edit distance with a single rolling row
fn levenshtein(a: &[char], b: &[char]) -> usize {
    let mut row: Vec<usize> = (0..=a.len()).collect();
    for (j, cb) in b.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = j + 1;
        for (i, ca) in a.iter().enumerate() {
            let cost = usize::from(ca != cb);
            let next = (row[i] + 1).min(row[i + 1] + 1).min(diagonal + cost);
            diagonal = row[i + 1];
            row[i + 1] = next;
        }
    }
    row[a.len()]
}

/// Drop questions whose text is near-identical to an earlier one
pub fn remove_near_duplicates(questions: Vec<Question>, threshold: f64) -> Vec<Question> {
    let mut kept: Vec<Question> = Vec::with_capacity(questions.len());
    for q in questions {
        if !kept
            .iter()
            .any(|k| text_similarity(&k.question, &q.question) >= threshold)
        {
            kept.push(q);
        }
    }
    kept
}

/// Drop new questions that already exist by id or near-identical text
pub fn filter_new_questions(new: Vec<Question>, existing: &[Question], threshold: f64) -> Vec<Question> {
    let ids: HashSet<&str> = existing.iter().map(|q| q.id.as_str()).collect();
    new.into_iter()
        .filter(|q| !ids.contains(q.id.as_str()))
        .filter(|q| {
            !existing
                .iter()
                .any(|e| text_similarity(&e.question, &q.question) >= threshold)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_after_normalization() {
        assert_eq!(text_similarity("What is <b>Nanite</b>?", "what  is nanite?"), 1.0);
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(text_similarity("", "anything"), 0.0);
        assert_eq!(text_similarity("<b></b>", "anything"), 0.0);
    }

    #[test]
    fn test_levenshtein_ratio() {
        // one substitution in ten chars
        let s = text_similarity("abcdefghij", "abcdefghiX");
        assert!((s - 0.9).abs() < 1e-9);
        assert_eq!(levenshtein(&['k', 'i', 't', 't', 'e', 'n'], &['s', 'i', 't', 't', 'i', 'n', 'g']), 3);
    }

    #[test]
    fn test_long_text_uses_word_sets() {
        let base = "lumen ".repeat(120);
        let a = format!("{base} nanite");
        let b = format!("{base} niagara");
        // word sets {lumen, nanite} vs {lumen, niagara}
        let s = text_similarity(&a, &b);
        assert!((s - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_remove_near_duplicates_keeps_first() {
        let questions = vec![
            Question::new("1", "a", "Which renderer handles virtualized geometry?"),
            Question::new("2", "b", "Which renderer handles virtualised geometry?"),
            Question::new("3", "c", "What does Lumen compute?"),
        ];
        let kept = remove_near_duplicates(questions, DUPLICATE_THRESHOLD);
        let ids: Vec<&str> = kept.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_filter_new_questions() {
        let existing = vec![Question::new("1", "a", "What does Lumen compute?")];
        let new = vec![
            Question::new("1", "x", "Completely different text"),
            Question::new("2", "y", "What does lumen compute?"),
            Question::new("3", "z", "How are Niagara emitters spawned?"),
        ];
        let kept = filter_new_questions(new, &existing, DUPLICATE_THRESHOLD);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "3");
    }

    #[test]
    fn test_less_than_sign_keeps_following_text() {
        let a = "When r.ScreenPercentage < 100, which upscaler runs by default?";
        let b = "When r.ScreenPercentage < 100, what happens to the Lumen reflection resolution?";
        assert!(text_similarity(a, b) < DUPLICATE_THRESHOLD);

        let kept = remove_near_duplicates(
            vec![Question::new("1", "a", a), Question::new("2", "b", b)],
            DUPLICATE_THRESHOLD,
        );
        assert_eq!(kept.len(), 2);
    }
}
