//! Source grounding checks for generated questions
//!
//! A question is only as good as the documentation it cites. These checks
//! look at the cited URL, the quoted excerpt, and whether the correct option
//! actually shows up in that excerpt.
//!
//! Critical failures (bad URL, missing or junk excerpt) mark a question for
//! rejection. Everything else lowers the confidence and adds a warning.

use super::entities::Question;
use crate::core::string::strip_html_tags;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Every cited page must live under this prefix
pub const DOCS_BASE_URL: &str = "https://dev.epicgames.com/documentation/en-us/unreal-engine/";

/// Shortest excerpt that can plausibly ground an answer
pub const MIN_EXCERPT_CHARS: usize = 20;

const MISSING_URL: &str = "Missing documentation URL";

/// Pages known to exist; these skip the slug heuristics
const KNOWN_SLUGS: &[&str] = &[
    "nanite-virtualized-geometry-in-unreal-engine",
    "lumen-global-illumination-and-reflections-in-unreal-engine",
    "blueprints-visual-scripting-in-unreal-engine",
    "world-partition-in-unreal-engine",
    "virtual-shadow-maps-in-unreal-engine",
    "animation-blueprints-in-unreal-engine",
    "skeletal-mesh-animation-system-in-unreal-engine",
    "materials-in-unreal-engine",
    "material-editor-fundamentals",
    "static-mesh-editor-reference",
    "niagara-overview",
    "chaos-physics-overview",
    "landscape-outdoor-terrain-in-unreal-engine",
    "cinematics-and-movie-making-in-unreal-engine",
    "umg-ui-designer-for-unreal-engine",
];

/// Feature names whose pages usually end in `-in-unreal-engine`
const SUFFIX_TERMS: &[&str] = &[
    "nanite",
    "lumen",
    "niagara",
    "chaos",
    "blueprint",
    "landscape",
    "material",
    "animation",
    "skeletal",
    "world-partition",
    "virtual-shadow",
    "sequencer",
    "umg",
    "gameplay",
];

const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "do", "does", "did", "will", "would", "could", "should", "may", "might", "must", "shall",
    "can", "need", "dare", "to", "of", "in", "for", "on", "with", "at", "by", "from", "as",
    "into", "through", "during", "before", "after", "above", "below", "between", "under",
    "again", "further", "then", "once", "here", "there", "when", "where", "why", "how", "all",
    "each", "few", "more", "most", "other", "some", "such", "no", "not", "only", "own", "same",
    "so", "than", "too", "very", "just", "and", "but", "or", "because", "until", "while",
    "although", "this", "that", "these", "those", "used", "use", "using", "uses", "which",
    "what", "it", "its",
];

/// Outcome of one sub-check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub is_valid: bool,
    pub confidence: u8,
    pub warning: Option<String>,
}

impl CheckResult {
    fn valid(confidence: u8, warning: Option<String>) -> Self {
        Self {
            is_valid: true,
            confidence,
            warning,
        }
    }

    fn invalid(confidence: u8, warning: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            confidence,
            warning: Some(warning.into()),
        }
    }
}

/// Combined verdict for a question
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Validation {
    pub is_valid: bool,
    pub is_critical_failure: bool,
    /// 0-100, the lowest confidence any sub-check reported
    pub confidence: u8,
    pub warnings: Vec<String>,
}

/// Check that `url` points at a plausible documentation page.
pub fn check_source_url(url: Option<&str>) -> CheckResult {
    let Some(url) = url.map(str::trim).filter(|u| !u.is_empty()) else {
        return CheckResult::invalid(0, MISSING_URL);
    };
    let Some(rest) = url.strip_prefix(DOCS_BASE_URL) else {
        return CheckResult::invalid(0, "Not an Epic Games documentation URL");
    };

    let slug = rest.split(['#', '?']).next().unwrap_or_default();
    if slug.trim().is_empty() {
        return CheckResult::invalid(10, "URL has no specific page path");
    }

    static BAD_SLUG: OnceLock<Regex> = OnceLock::new();
    let bad_slug = BAD_SLUG.get_or_init(|| {
        Regex::new(r"^(unreal-engine(-\d+)?|ue\d+|[a-z]+)$|\s|[A-Z]").expect("slug pattern is valid")
    });
    if bad_slug.is_match(slug) {
        return CheckResult::invalid(20, format!("Invalid URL pattern: \"{slug}\""));
    }

    if KNOWN_SLUGS.contains(&slug) {
        return CheckResult::valid(100, None);
    }
    if SUFFIX_TERMS.iter().any(|t| slug.contains(t)) && !slug.ends_with("-in-unreal-engine") {
        return CheckResult::valid(
            60,
            Some("URL may be missing \"-in-unreal-engine\" suffix".to_string()),
        );
    }
    if slug.chars().count() < 10 {
        return CheckResult::valid(40, Some("URL slug seems too short".to_string()));
    }
    if slug.contains("--") {
        return CheckResult::invalid(30, "URL has double hyphens");
    }
    CheckResult::valid(70, None)
}

/// Lowercased content words of `text`, deduplicated in first-seen order.
fn key_terms(text: &str) -> Vec<String> {
    let cleaned: String = strip_html_tags(&text.to_lowercase())
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                ' '
            }
        })
        .collect();

    let mut seen = HashSet::new();
    cleaned
        .split_whitespace()
        .filter(|w| w.len() > 2 && !STOP_WORDS.contains(w))
        .filter(|w| seen.insert(*w))
        .map(str::to_string)
        .collect()
}

/// Check that the correct option's key terms appear in the source excerpt.
pub fn check_answer(question: &Question) -> CheckResult {
    let letter = question.correct.trim().to_uppercase();
    let excerpt = question.source_excerpt.as_deref().unwrap_or_default();
    if letter.is_empty() || excerpt.is_empty() {
        return CheckResult::invalid(0, "Missing CorrectLetter or SourceExcerpt");
    }

    let Some(answer) = question.options.get(&letter).filter(|a| !a.is_empty()) else {
        return CheckResult::invalid(0, format!("No option found for letter {letter}"));
    };

    let terms = key_terms(answer);
    let haystack = excerpt.to_lowercase();
    let matched = terms.iter().filter(|t| haystack.contains(t.as_str())).count();
    let confidence = if terms.is_empty() {
        0
    } else {
        (matched as f64 * 100.0 / terms.len() as f64).round() as u8
    };

    match confidence {
        0..=29 => CheckResult::invalid(
            confidence,
            format!("Answer \"{answer}\" not found in source excerpt"),
        ),
        30..=49 => CheckResult {
            is_valid: false,
            confidence,
            warning: Some(format!(
                "Low confidence: only {matched}/{} key terms matched",
                terms.len()
            )),
        },
        50..=69 => CheckResult::valid(
            confidence,
            Some("Moderate confidence: verify answer matches source".to_string()),
        ),
        _ => CheckResult::valid(confidence, None),
    }
}

/// Run every grounding check on `question`.
///
/// A missing URL is tolerated with a warning; any other URL problem, or a
/// missing, short, or purely numeric excerpt, is a critical failure. The
/// answer check only runs when nothing critical was found.
pub fn validate_question(question: &Question) -> Validation {
    let mut warnings = Vec::new();
    let mut critical = false;
    let mut confidence = 100u8;

    let url = check_source_url(question.source_url.as_deref());
    match (url.is_valid, url.warning) {
        (false, Some(w)) if w == MISSING_URL => {
            warnings.push(format!("Warning: {w}"));
            confidence = confidence.min(50);
        }
        (false, w) => {
            critical = true;
            warnings.push(format!("Critical: {}", w.unwrap_or_default()));
        }
        (true, Some(w)) => {
            warnings.push(w);
            confidence = confidence.min(url.confidence);
        }
        (true, None) => {}
    }

    match question.source_excerpt.as_deref() {
        None => {
            critical = true;
            warnings.push("Critical: Missing source excerpt".to_string());
        }
        Some(e) if e.chars().count() < MIN_EXCERPT_CHARS => {
            critical = true;
            warnings.push(format!("Critical: Source excerpt too short (\"{e}\")"));
        }
        Some(e) if e.trim().chars().all(|c| c.is_ascii_digit()) => {
            critical = true;
            warnings.push(format!("Critical: Invalid source excerpt (\"{e}\")"));
        }
        Some(_) => {}
    }

    if !critical {
        let answer = check_answer(question);
        if let Some(w) = answer.warning {
            warnings.push(w);
            confidence = confidence.min(answer.confidence);
        }
    }

    Validation {
        is_valid: !critical,
        is_critical_failure: critical,
        confidence,
        warnings,
    }
}
