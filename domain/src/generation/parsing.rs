//! Parsing of generator output into questions
//!
//! The generator is asked for a Markdown table with fourteen columns:
//!
//! ```text
//! | ID | Discipline | Type | Difficulty | Question | Answer | OptionA | OptionB | OptionC | OptionD | CorrectLetter | SourceURL | SourceExcerpt | QualityScore |
//! ```
//!
//! Models sometimes answer with a JSON array (or object) using the same
//! column names as keys instead. Both shapes are accepted.

use super::similarity::{DUPLICATE_THRESHOLD, remove_near_duplicates};
use crate::question::{DEFAULT_LANGUAGE, Question, QuestionStatus, QuestionType};
use serde::Deserialize;
use std::collections::BTreeMap;
use uuid::Uuid;

const DEFAULT_DISCIPLINE: &str = "General";
const DEFAULT_DIFFICULTY: &str = "Easy";

/// Values stamped onto every parsed question
#[derive(Debug, Clone)]
pub struct ParseDefaults {
    pub language: String,
    pub creator_name: Option<String>,
}

impl Default for ParseDefaults {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            creator_name: None,
        }
    }
}

/// One question as the generator wrote it, before validation
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct RawRow {
    discipline: Option<String>,
    #[serde(rename = "Type")]
    kind: Option<String>,
    difficulty: Option<String>,
    question: Option<String>,
    option_a: Option<String>,
    option_b: Option<String>,
    option_c: Option<String>,
    option_d: Option<String>,
    correct_letter: Option<String>,
    #[serde(rename = "SourceURL")]
    source_url: Option<String>,
    source_excerpt: Option<String>,
    quality_score: Option<serde_json::Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPayload {
    Many(Vec<RawRow>),
    One(RawRow),
}

/// Parse generator output into pending questions
///
/// Rows without question text or correct letter are skipped, as are
/// Multiple Choice rows whose options are bare letters. Near-duplicates
/// within the batch are removed.
pub fn parse_questions(text: &str, defaults: &ParseDefaults) -> Vec<Question> {
    let cleaned = strip_code_fences(text);
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Vec::new();
    }

    if cleaned.starts_with('[') || cleaned.starts_with('{') {
        if let Ok(payload) = serde_json::from_str::<RawPayload>(cleaned) {
            let rows = match payload {
                RawPayload::Many(rows) => rows,
                RawPayload::One(row) => vec![row],
            };
            let parsed: Vec<Question> = rows.into_iter().filter_map(|r| build(r, defaults)).collect();
            if !parsed.is_empty() {
                return remove_near_duplicates(parsed, DUPLICATE_THRESHOLD);
            }
        }
    }

    let parsed = cleaned
        .lines()
        .filter_map(table_row)
        .filter_map(|r| build(r, defaults))
        .collect();
    remove_near_duplicates(parsed, DUPLICATE_THRESHOLD)
}

/// Remove ```` ``` ```` fences along with their language tag
fn strip_code_fences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find("```") {
        out.push_str(&rest[..pos]);
        rest = &rest[pos + 3..];
        rest = rest.trim_start_matches(|c: char| c.is_ascii_alphabetic());
        rest = rest.strip_prefix('\n').unwrap_or(rest);
    }
    out.push_str(rest);
    out
}

fn is_separator(line: &str) -> bool {
    let leading = line.trim_start_matches('|').trim_start();
    let leading = leading.strip_prefix(':').unwrap_or(leading).trim_start();
    leading.starts_with('-')
        || line
            .split('|')
            .map(str::trim)
            .filter(|cell| !cell.is_empty())
            .any(|cell| cell.contains("--") && cell.chars().all(|c| c == '-' || c == ':' || c == ' '))
}

fn is_header(line: &str) -> bool {
    line.split('|').any(|cell| cell.trim().eq_ignore_ascii_case("id"))
}

/// Split one table line into a raw row, or `None` for non-data lines
fn table_row(line: &str) -> Option<RawRow> {
    let line = line.trim().replace('｜', "|");
    if line.is_empty() || line.matches('|').count() < 4 || is_header(&line) || is_separator(&line) {
        return None;
    }

    let mut cols: Vec<&str> = line.split('|').map(str::trim).collect();
    if cols.first() == Some(&"") {
        cols.remove(0);
    }
    if cols.last() == Some(&"") {
        cols.pop();
    }

    let col = |i: usize| cols.get(i).filter(|s| !s.is_empty()).map(|s| s.to_string());
    Some(RawRow {
        discipline: col(1),
        kind: col(2),
        difficulty: col(3),
        question: col(4),
        option_a: col(6),
        option_b: col(7),
        option_c: col(8),
        option_d: col(9),
        correct_letter: col(10),
        source_url: col(11),
        source_excerpt: col(12),
        quality_score: col(13).map(serde_json::Value::String),
    })
}

fn parse_score(value: &serde_json::Value) -> Option<u8> {
    let n = match value {
        serde_json::Value::Number(n) => n.as_u64()?,
        serde_json::Value::String(s) => {
            let digits: String = s
                .chars()
                .skip_while(|c| !c.is_ascii_digit())
                .take_while(|c| c.is_ascii_digit())
                .collect();
            digits.parse().ok()?
        }
        _ => return None,
    };
    Some(n.min(100) as u8)
}

fn is_bare_letter(option: &str) -> bool {
    let t = option.trim();
    t.len() == 1 && t.chars().all(|c| matches!(c.to_ascii_uppercase(), 'A'..='D'))
}

fn build(row: RawRow, defaults: &ParseDefaults) -> Option<Question> {
    let question = row.question.filter(|q| !q.trim().is_empty() && !q.contains("---"))?;
    let correct = row.correct_letter.filter(|c| !c.trim().is_empty())?;

    let question_type = match row.kind.as_deref() {
        Some(kind) if kind.to_lowercase().contains("true") => QuestionType::TrueFalse,
        _ => QuestionType::MultipleChoice,
    };

    let options: BTreeMap<String, String> = match question_type {
        QuestionType::TrueFalse => [("A", "TRUE"), ("B", "FALSE")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        QuestionType::MultipleChoice => {
            let options: BTreeMap<String, String> = [
                ("A", row.option_a),
                ("B", row.option_b),
                ("C", row.option_c),
                ("D", row.option_d),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.unwrap_or_default()))
            .collect();
            if options.values().any(|o| is_bare_letter(o)) {
                return None;
            }
            options
        }
    };

    Some(Question {
        id: Uuid::new_v4().to_string(),
        unique_id: Some(Uuid::new_v4().to_string()),
        question,
        options,
        correct: correct.trim().to_string(),
        discipline: row.discipline.unwrap_or_else(|| DEFAULT_DISCIPLINE.to_string()),
        difficulty: row.difficulty.unwrap_or_else(|| DEFAULT_DIFFICULTY.to_string()),
        question_type: Some(question_type.as_str().to_string()),
        language: Some(defaults.language.clone()),
        status: Some(QuestionStatus::Pending),
        quality_score: row.quality_score.as_ref().and_then(parse_score),
        source_url: row.source_url.filter(|u| !u.is_empty() && !u.contains(' ')),
        source_excerpt: row.source_excerpt.filter(|e| !e.is_empty()),
        creator_name: defaults.creator_name.clone(),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::{Category, Difficulty};

    const TABLE: &str = "\
```markdown
| ID | Discipline | Type | Difficulty | Question | Answer | OptionA | OptionB | OptionC | OptionD | CorrectLetter | SourceURL | SourceExcerpt | QualityScore |
|---|---|---|---|---|---|---|---|---|---|---|---|---|---|
| 1 | Technical Art | Multiple Choice | Easy | Which system renders <b>Nanite</b> meshes? | Nanite | Lumen | Nanite | Niagara | Chaos | B | https://dev.epicgames.com/documentation/nanite | Nanite is a virtualized geometry system | 92 |
| 2 | Technical Art | True/False | Easy | <b>Lumen</b> supports software ray tracing. | TRUE | TRUE | FALSE | | | A | not a url | Lumen can trace against distance fields | Score: 80 |
```";

    fn defaults() -> ParseDefaults {
        ParseDefaults {
            language: "French".to_string(),
            creator_name: Some("Sam".to_string()),
        }
    }

    #[test]
    fn test_parse_markdown_table() {
        let questions = parse_questions(TABLE, &defaults());
        assert_eq!(questions.len(), 2);

        let mc = &questions[0];
        assert_eq!(mc.correct, "B");
        assert_eq!(mc.options["D"], "Chaos");
        assert_eq!(mc.quality_score, Some(92));
        assert_eq!(mc.language.as_deref(), Some("French"));
        assert_eq!(mc.creator_name.as_deref(), Some("Sam"));
        assert!(mc.is_pending());
        assert_eq!(
            mc.category(),
            Some(Category::new(Difficulty::Easy, QuestionType::MultipleChoice))
        );

        let tf = &questions[1];
        assert_eq!(tf.options.len(), 2);
        assert_eq!(tf.options["A"], "TRUE");
        assert_eq!(tf.source_url, None);
        assert_eq!(tf.quality_score, Some(80));
    }

    #[test]
    fn test_fresh_ids_per_question() {
        let questions = parse_questions(TABLE, &defaults());
        assert_ne!(questions[0].id, questions[1].id);
        assert_ne!(questions[0].unique_id, questions[1].unique_id);
        assert_ne!(Some(questions[0].id.clone()), questions[0].unique_id);
    }

    #[test]
    fn test_skip_rows_without_question_or_answer() {
        let text = "\
| 1 | VFX | Multiple Choice | Easy | | x | a1 | b1 | c1 | d1 | A | | | |
| 2 | VFX | Multiple Choice | Easy | What spawns particles? | x | Niagara | Lumen | Chaos | Nanite | | | | |
| 3 | VFX | Multiple Choice | Easy | Which module emits sprites? | x | Spawn Rate | Lumen | Chaos | Nanite | A | | | |";
        let questions = parse_questions(text, &ParseDefaults::default());
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question, "Which module emits sprites?");
        assert_eq!(questions[0].language(), "English");
    }

    #[test]
    fn test_reject_single_letter_options() {
        let text = "| 1 | VFX | MC | Easy | Pick one | x | A | B | C | D | A | | | |";
        assert!(parse_questions(text, &ParseDefaults::default()).is_empty());
    }

    #[test]
    fn test_fullwidth_pipes_and_defaults() {
        let text = "｜ 1 ｜ ｜ Multiple Choice ｜ ｜ What is a Blueprint? ｜ x ｜ Script ｜ Mesh ｜ Light ｜ Sound ｜ A ｜";
        let questions = parse_questions(text, &ParseDefaults::default());
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].discipline, "General");
        assert_eq!(questions[0].difficulty, "Easy");
    }

    #[test]
    fn test_parse_json_array() {
        let text = r#"```json
[
  {"Discipline": "Animation", "Type": "True/False", "Difficulty": "Hard", "Question": "Control Rig runs in the Sequencer.", "CorrectLetter": "A", "QualityScore": 75},
  {"Discipline": "Animation", "Type": "Multiple Choice", "Difficulty": "Medium", "Question": "Which asset blends poses?", "OptionA": "Blend Space", "OptionB": "Material", "OptionC": "Texture", "OptionD": "Level", "CorrectLetter": "A", "SourceURL": "https://dev.epicgames.com/x"}
]
```"#;
        let questions = parse_questions(text, &ParseDefaults::default());
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].parsed_type(), Some(QuestionType::TrueFalse));
        assert_eq!(questions[0].quality_score, Some(75));
        assert_eq!(questions[1].options["A"], "Blend Space");
        assert_eq!(questions[1].source_url.as_deref(), Some("https://dev.epicgames.com/x"));
    }

    #[test]
    fn test_parse_single_json_object() {
        let text = r#"{"Question": "Nanite supports skeletal meshes.", "Type": "True/False", "CorrectLetter": "B"}"#;
        let questions = parse_questions(text, &ParseDefaults::default());
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].correct, "B");
    }

    #[test]
    fn test_invalid_json_falls_back_to_table() {
        let text = "[not json\n| 1 | VFX | MC | Easy | What emits particles? | x | Niagara | Lumen | Chaos | Nanite | A | | | |";
        let questions = parse_questions(text, &ParseDefaults::default());
        assert_eq!(questions.len(), 1);
    }

    #[test]
    fn test_near_duplicates_removed_within_batch() {
        let text = "\
| 1 | VFX | MC | Easy | Which system spawns particles? | x | Niagara | Lumen | Chaos | Nanite | A | | | |
| 2 | VFX | MC | Easy | Which system spawns particles ? | x | Niagara | Lumen | Chaos | Nanite | A | | | |";
        assert_eq!(parse_questions(text, &ParseDefaults::default()).len(), 1);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_questions("", &ParseDefaults::default()).is_empty());
        assert!(parse_questions("no table here", &ParseDefaults::default()).is_empty());
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n[1]\n```"), "[1]\n");
    }
}
