//! CSV review sheets
//!
//! Every field is quoted. Quotes inside values are dropped rather than
//! escaped, and markup and line breaks are flattened, so a row always stays
//! on one line in a spreadsheet import.

use crate::core::string::strip_html_tags;
use crate::question::{Question, QuestionType};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Column headers, in output order
pub const CSV_HEADERS: [&str; 27] = [
    "ID",
    "Question ID",
    "Discipline",
    "Type",
    "Difficulty",
    "Question",
    "Option A",
    "Option B",
    "Option C",
    "Option D",
    "Correct Answer",
    "Generation Date",
    "Source URL",
    "Source Excerpt",
    "Source Verified",
    "Human Verified",
    "Human Verified At",
    "Human Verified By",
    "Creator",
    "Reviewer",
    "Language",
    "Quality Score",
    "AI Critique",
    "Token Cost",
    "Status",
    "Rejection Reason",
    "Rejected At",
];

const DELIMITER: &str = ",";

/// Placeholder links from search grounding; never exported
const GROUNDING_REDIRECT: &str = "grounding-api";

/// Quote one value for the sheet.
pub fn csv_field(value: &str) -> String {
    let flattened: String = strip_html_tags(value)
        .chars()
        .map(|c| match c {
            '\u{200B}' | '\u{FEFF}' | '\u{00A0}' => ' ',
            c => c,
        })
        .filter(|c| !matches!(c, '\'' | '"'))
        .collect();
    let collapsed = flattened.split_whitespace().collect::<Vec<_>>().join(" ");
    format!("\"{collapsed}\"")
}

/// Renders questions into the review sheet layout
#[derive(Debug, Clone)]
pub struct CsvExport {
    pub creator: String,
    pub reviewer: String,
    /// Stamped into every row's `Generation Date`
    pub generation_date: NaiveDate,
    pub include_headers: bool,
}

impl CsvExport {
    pub fn new(
        creator: impl Into<String>,
        reviewer: impl Into<String>,
        generation_date: NaiveDate,
    ) -> Self {
        Self {
            creator: creator.into(),
            reviewer: reviewer.into(),
            generation_date,
            include_headers: true,
        }
    }

    pub fn without_headers(mut self) -> Self {
        self.include_headers = false;
        self
    }

    /// Render `questions` as CSV text, numbering rows from 1.
    pub fn render(&self, questions: &[Question]) -> String {
        let mut out = String::new();
        if self.include_headers {
            push_line(&mut out, CSV_HEADERS.iter().copied());
        }
        for (index, question) in questions.iter().enumerate() {
            let row = self.row(index + 1, question);
            push_line(&mut out, row.iter().map(String::as_str));
        }
        out
    }

    fn row(&self, number: usize, q: &Question) -> [String; 27] {
        let option = |letter: &str| q.options.get(letter).cloned().unwrap_or_default();
        let source_url = q
            .source_url
            .as_deref()
            .filter(|u| !u.contains(GROUNDING_REDIRECT))
            .unwrap_or_default();
        let question_type = q
            .parsed_type()
            .map(|t| t.as_str().to_string())
            .or_else(|| q.question_type.clone())
            .unwrap_or_default();
        let quality = q
            .critique_score
            .or(q.quality_score)
            .map(|s| s.to_string())
            .unwrap_or_default();

        [
            number.to_string(),
            q.unique_id.clone().unwrap_or_default(),
            q.discipline.clone(),
            question_type,
            level_label(q),
            q.question.clone(),
            option("A"),
            option("B"),
            option("C"),
            option("D"),
            q.correct.clone(),
            self.generation_date.format("%Y-%m-%d").to_string(),
            source_url.to_string(),
            q.source_excerpt.clone().unwrap_or_default(),
            "Unknown".to_string(),
            if q.human_verified { "Yes" } else { "No" }.to_string(),
            String::new(),
            String::new(),
            self.creator.clone(),
            self.reviewer.clone(),
            q.language().to_string(),
            quality,
            q.critique.clone().unwrap_or_default(),
            String::new(),
            q.effective_status().as_str().to_string(),
            q.rejection_reason.clone().unwrap_or_default(),
            q.rejected_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
        ]
    }
}

fn push_line<'a>(out: &mut String, fields: impl Iterator<Item = &'a str>) {
    let line = fields.map(csv_field).collect::<Vec<_>>().join(DELIMITER);
    out.push_str(&line);
    out.push('\n');
}

/// Difficulty level name, or the raw field when it does not parse
fn level_label(q: &Question) -> String {
    q.difficulty_level()
        .map(|d| d.as_str().to_string())
        .unwrap_or_else(|| q.difficulty.clone())
}

/// Group questions into sheets keyed `Language_Discipline_Level_Type`,
/// e.g. `English_Technical Art_Easy_MC`. Input order is kept within a group.
pub fn segment_questions(questions: &[Question]) -> BTreeMap<String, Vec<Question>> {
    let mut groups: BTreeMap<String, Vec<Question>> = BTreeMap::new();
    for q in questions {
        let kind = match q.parsed_type() {
            Some(QuestionType::TrueFalse) => "T/F",
            _ => "MC",
        };
        let key = format!("{}_{}_{}_{}", q.language(), q.discipline, level_label(q), kind);
        groups.entry(key).or_default().push(q.clone());
    }
    groups
}

/// File name for a segment: spaces and `&` joins become underscores,
/// slashes are dropped, and the date is appended as `YYYYMMDD`.
pub fn segment_file_name(key: &str, date: NaiveDate) -> String {
    let stem = key.replace(" & ", "_").replace(' ', "_").replace('/', "");
    format!("{stem}_{}.csv", date.format("%Y%m%d"))
}
