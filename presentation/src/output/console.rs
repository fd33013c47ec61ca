//! Console output formatter for questions, quotas and generation results

use colored::{ColoredString, Colorize};
use qgen_application::{ExportFile, FilteredView, GenerationOutcome};
use qgen_domain::core::string::{strip_html_tags, truncate};
use qgen_domain::{
    GenerationConfig, Question, QuestionStatus, QuotaCheck, QuotaStatus, StatusCounts,
    StatusFilter, Validation,
};
use serde::Serialize;

/// Width of the question column in list views
const QUESTION_WIDTH: usize = 60;

/// Width of quota progress bars
const BAR_WIDTH: usize = 20;

/// Formats command results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Status tabs with counts, the active one highlighted
    pub fn status_tabs(counts: &StatusCounts, active: StatusFilter) -> String {
        StatusFilter::ALL
            .iter()
            .map(|filter| {
                let label = format!("{} ({})", capitalize(filter.as_str()), counts.get(*filter));
                if *filter == active {
                    format!("[{}]", label).cyan().bold().to_string()
                } else {
                    label.dimmed().to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
    }

    /// The question list with tabs, a header and one row per question
    pub fn question_list(
        view: &FilteredView,
        rows: &[Question],
        active: StatusFilter,
        cursor: usize,
    ) -> String {
        let mut output = String::new();
        output.push_str(&Self::status_tabs(&view.counts, active));
        output.push_str("\n\n");

        if rows.is_empty() {
            output.push_str(&format!("{}\n", "No questions match the current filters.".dimmed()));
            return output;
        }

        output.push_str(&format!(
            "{}\n",
            format!(
                "{:>4}  {:<8}  {:<10}  {:<16}  {:<10}  {:<9}  {}",
                "#", "ID", "Language", "Discipline", "Difficulty", "Status", "Question"
            )
            .bold()
        ));

        for (i, q) in rows.iter().enumerate() {
            let marker = if i == cursor { ">" } else { " " };
            output.push_str(&format!(
                "{}{:>3}  {:<8}  {:<10}  {:<16}  {:<10}  {:<9}  {}\n",
                marker,
                i + 1,
                truncate(&q.id, 8),
                truncate(q.language(), 10),
                truncate(&q.discipline, 16),
                truncate(&q.difficulty, 10),
                status_label(q.effective_status()),
                truncate(&strip_html_tags(&q.question), QUESTION_WIDTH)
            ));
        }

        output.push_str(&format!(
            "\n{}\n",
            format!(
                "{} shown · {} variants after filters · {} in context",
                rows.len(),
                view.filtered.len(),
                view.context.len()
            )
            .dimmed()
        ));
        output
    }

    /// One question in full, followed by its other language variants
    pub fn question_detail(question: &Question, variants: &[&Question]) -> String {
        let mut output = String::new();
        output.push_str(&Self::header(&format!(
            "{} · {} · {}",
            question.discipline,
            question.difficulty,
            question.language()
        )));
        output.push('\n');

        output.push_str(&format!("{} {}\n", "ID:".cyan().bold(), question.id));
        output.push_str(&format!("{} {}\n", "Unique ID:".cyan().bold(), question.group_key()));
        output.push_str(&format!(
            "{} {}\n",
            "Status:".cyan().bold(),
            status_label(question.effective_status())
        ));
        if let Some(reason) = &question.rejection_reason {
            output.push_str(&format!("{} {}\n", "Rejection reason:".red().bold(), reason));
        }
        if let Some(creator) = &question.creator_name {
            output.push_str(&format!("{} {}\n", "Creator:".cyan().bold(), creator));
        }

        output.push_str(&format!("\n{}\n", strip_html_tags(&question.question).bold()));
        for (letter, text) in &question.options {
            if text.is_empty() {
                continue;
            }
            let line = format!("  {}. {}", letter, strip_html_tags(text));
            if *letter == question.correct {
                output.push_str(&format!("{}\n", line.green().bold()));
            } else {
                output.push_str(&format!("{}\n", line));
            }
        }

        if let Some(url) = &question.source_url {
            output.push_str(&format!("\n{} {}\n", "Source:".dimmed(), url));
        }
        if let Some(excerpt) = &question.source_excerpt {
            output.push_str(&format!("{} {}\n", "Excerpt:".dimmed(), excerpt));
        }
        if let Some(score) = question.quality_score {
            output.push_str(&format!("{} {}\n", "Quality score:".dimmed(), score));
        }
        if !question.tags.is_empty() {
            output.push_str(&format!("{} {}\n", "Tags:".dimmed(), question.tags.join(", ")));
        }

        if !variants.is_empty() {
            output.push_str(&Self::section_header("Other languages"));
            for v in variants {
                output.push_str(&format!(
                    "  {:<10} {:<9} {}  {}\n",
                    v.language(),
                    status_label(v.effective_status()),
                    v.id.dimmed(),
                    truncate(&strip_html_tags(&v.question), QUESTION_WIDTH)
                ));
            }
        }

        output.push_str(&Self::footer());
        output
    }

    /// Progress bars for every category and the total
    pub fn quota_status(status: &QuotaStatus) -> String {
        let mut output = String::new();
        output.push_str(&Self::header("Quota"));
        output.push('\n');

        for (category, entry) in &status.categories {
            output.push_str(&format!(
                "  {:<10} {} {:>3}/{:<3} {}\n",
                category.to_string(),
                progress_bar(entry.percentage),
                entry.current,
                entry.target,
                full_marker(entry.is_full)
            ));
        }
        output.push_str(&format!(
            "\n  {:<10} {} {:>3}/{:<3} {}\n",
            "Total".bold(),
            progress_bar(status.total.percentage),
            status.total.current,
            status.total.target,
            full_marker(status.total.is_full)
        ));

        output.push_str(&Self::footer());
        output
    }

    /// One-line summary of a quota check
    pub fn quota_check(check: &QuotaCheck) -> String {
        let mut line = if !check.allowed {
            format!("{} {}", "Blocked:".red().bold(), check.reason)
        } else if check.warning {
            format!("{} {}", "Warning:".yellow().bold(), check.reason)
        } else {
            format!("{} {}", "Quota OK:".green().bold(), check.reason)
        };
        if let Some(kind) = check.force_type {
            line.push_str(&format!(" {}", format!("(next: {})", kind).dimmed()));
        }
        line
    }

    /// Result of a generation run
    pub fn generation_outcome(outcome: &GenerationOutcome) -> String {
        match outcome {
            GenerationOutcome::Blocked(check) => Self::quota_check(check),
            GenerationOutcome::Generated {
                added,
                discarded,
                check,
            } => {
                let mut output = String::new();
                if check.warning {
                    output.push_str(&Self::quota_check(check));
                    output.push('\n');
                }
                output.push_str(&format!(
                    "{} {} new question(s) added for review",
                    "v".green(),
                    added.len()
                ));
                if *discarded > 0 {
                    output.push_str(&format!(
                        " {}",
                        format!("({} duplicate or over quota discarded)", discarded).dimmed()
                    ));
                }
                output.push('\n');
                for q in added {
                    output.push_str(&format!(
                        "  {} {}\n",
                        q.id.dimmed(),
                        truncate(&strip_html_tags(&q.question), QUESTION_WIDTH)
                    ));
                }
                output
            }
        }
    }

    /// Grounding report; clean questions get a single line
    pub fn validation_report(report: &[(Question, Validation)]) -> String {
        let mut output = String::new();
        let mut clean = 0;
        for (q, verdict) in report {
            let marker = if verdict.is_critical_failure {
                "x".red().bold()
            } else if verdict.warnings.is_empty() {
                clean += 1;
                "v".green()
            } else {
                "!".yellow().bold()
            };
            output.push_str(&format!(
                "{} {} {} {}\n",
                marker,
                q.id.dimmed(),
                format!("{:>3}%", verdict.confidence).bold(),
                truncate(&strip_html_tags(&q.question), QUESTION_WIDTH)
            ));
            for warning in &verdict.warnings {
                output.push_str(&format!("    {}\n", warning.dimmed()));
            }
        }
        output.push_str(&format!("{} of {} question(s) fully grounded\n", clean, report.len()));
        output
    }

    /// Files written by an export
    pub fn export_summary(files: &[ExportFile]) -> String {
        let mut output = String::new();
        for file in files {
            output.push_str(&format!(
                "{} {} {}\n",
                "v".green(),
                file.file_name,
                format!("({} rows)", file.rows).dimmed()
            ));
        }
        output
    }

    /// Stored generation settings
    pub fn settings(config: &GenerationConfig) -> String {
        let creator = if config.has_creator() {
            config.creator_name.normal()
        } else {
            "(not set)".yellow()
        };
        let rows: [(&str, ColoredString); 7] = [
            ("Discipline", config.discipline.normal()),
            ("Difficulty", config.difficulty.to_string().normal()),
            ("Language", config.language.normal()),
            ("Batch size", config.batch_size.to_string().normal()),
            ("Creator", creator),
            ("Model", config.model.normal()),
            ("Temperature", config.temperature.to_string().normal()),
        ];

        let mut output = String::new();
        for (label, value) in rows {
            output.push_str(&format!("{} {}\n", format!("{:<12}", label).cyan().bold(), value));
        }
        output
    }

    /// Format any serializable result as JSON
    pub fn format_json<T: Serialize + ?Sized>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("{}\n", "=".repeat(60).cyan())
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn status_label(status: QuestionStatus) -> ColoredString {
    let label = format!("{:<9}", status.as_str());
    match status {
        QuestionStatus::Pending => label.yellow(),
        QuestionStatus::Accepted => label.green(),
        QuestionStatus::Rejected => label.red(),
    }
}

fn progress_bar(percentage: u32) -> String {
    let filled = (percentage.min(100) as usize * BAR_WIDTH) / 100;
    let bar = format!("{}{}", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled));
    if percentage >= 100 {
        format!("[{}]", bar.red())
    } else {
        format!("[{}]", bar.green())
    }
}

fn full_marker(is_full: bool) -> ColoredString {
    if is_full { "FULL".red().bold() } else { "".normal() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qgen_domain::{BatchSize, DifficultySetting, QuestionType, QuotaTargets, quota_status, validate_generation};

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_status_tabs_show_counts() {
        plain();
        let questions = vec![
            Question::new("1", "a", "Q1"),
            Question::new("2", "b", "Q2").with_status(QuestionStatus::Accepted),
        ];
        let counts = StatusCounts::from_questions(&questions);
        let tabs = ConsoleFormatter::status_tabs(&counts, StatusFilter::Accepted);
        assert!(tabs.contains("Pending (1)"));
        assert!(tabs.contains("[Accepted (1)]"));
        assert!(tabs.contains("All (2)"));
    }

    #[test]
    fn test_question_list_strips_markup() {
        plain();
        let rows = vec![Question::new("1", "a", "Which system renders <b>Nanite</b> meshes?")];
        let view = FilteredView {
            context: rows.clone(),
            counts: StatusCounts::from_questions(&rows),
            filtered: rows.clone(),
            unique: rows.clone(),
        };
        let out = ConsoleFormatter::question_list(&view, &rows, StatusFilter::Pending, 0);
        assert!(out.contains("Which system renders Nanite meshes?"));
        assert!(out.contains(">  1"));
    }

    #[test]
    fn test_empty_list_message() {
        plain();
        let out = ConsoleFormatter::question_list(&FilteredView::default(), &[], StatusFilter::All, 0);
        assert!(out.contains("No questions match"));
    }

    #[test]
    fn test_quota_status_marks_full_categories() {
        plain();
        let questions: Vec<Question> = (0..2)
            .map(|i| Question::new(format!("{i}"), format!("u{i}"), "Q").with_difficulty("Easy MC"))
            .collect();
        let status = quota_status(&questions, &QuotaTargets::new(10, 2));
        let out = ConsoleFormatter::quota_status(&status);
        assert!(out.contains("Easy MC"));
        assert!(out.contains("FULL"));
        assert!(out.contains("  2/10"));
    }

    #[test]
    fn test_detail_marks_correct_option() {
        plain();
        let mut q = Question::new("1", "a", "Pick one");
        q.options = [("A", "Lumen"), ("B", "Nanite")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        q.correct = "B".to_string();
        let fr = Question::new("2", "a", "Choisissez").with_language("French");
        let out = ConsoleFormatter::question_detail(&q, &[&fr]);
        assert!(out.contains("B. Nanite"));
        assert!(out.contains("Other languages"));
        assert!(out.contains("French"));
    }

    #[test]
    fn test_json_output() {
        let json = ConsoleFormatter::format_json(&vec![Question::new("1", "a", "Q")]);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["uniqueId"], "a");
    }

    #[test]
    fn test_type_imbalance_names_next_type() {
        plain();
        let questions: Vec<Question> = (0..5)
            .map(|i| {
                Question::new(format!("{i}"), format!("u{i}"), "Q")
                    .with_difficulty("Easy")
                    .with_type(QuestionType::MultipleChoice)
                    .with_discipline("Technical Art")
            })
            .collect();
        let check = validate_generation(
            "Technical Art",
            &"Easy MC".parse::<DifficultySetting>().unwrap(),
            BatchSize::new(2),
            &questions,
            &QuotaTargets::new(100, 50),
        );
        let out = ConsoleFormatter::quota_check(&check);
        assert!(out.starts_with("Blocked:"));
        assert!(out.contains("(next: True/False)"));
    }

    #[test]
    fn test_validation_report_lists_warnings() {
        plain();
        let mut grounded = Question::new("1", "a", "Which system renders <b>Nanite</b> meshes?");
        grounded.correct = "A".to_string();
        grounded.options.insert("A".to_string(), "Nanite".to_string());
        grounded.source_url = Some(
            "https://dev.epicgames.com/documentation/en-us/unreal-engine/nanite-virtualized-geometry-in-unreal-engine"
                .to_string(),
        );
        grounded.source_excerpt = Some("Nanite is a virtualized geometry system.".to_string());
        let bare = Question::new("2", "b", "Unsourced");
        let report: Vec<(Question, Validation)> = [grounded, bare]
            .into_iter()
            .map(|q| {
                let v = qgen_domain::validate_question(&q);
                (q, v)
            })
            .collect();

        let output = ConsoleFormatter::validation_report(&report);
        assert!(output.contains("v 1 100% Which system renders Nanite meshes?"));
        assert!(output.contains("x 2"));
        assert!(output.contains("    Critical: Missing source excerpt"));
        assert!(output.ends_with("1 of 2 question(s) fully grounded\n"));
    }

    #[test]
    fn test_export_summary() {
        plain();
        let files = vec![ExportFile {
            file_name: "English_Animation_Easy_MC_20260314.csv".to_string(),
            rows: 3,
            content: String::new(),
        }];
        assert_eq!(
            ConsoleFormatter::export_summary(&files),
            "v English_Animation_Easy_MC_20260314.csv (3 rows)\n"
        );
    }
}
