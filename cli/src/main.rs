//! CLI entrypoint for ue5-qgen
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use qgen_application::{
    ExportQuestionsUseCase, ExportRequest, FilteringController, GenerateQuestionsUseCase, GenerationLogger, GenerationOutcome,
    GenerationProgress, LlmGateway, NoGenerationLogger, NoProgress, PreferenceStore,
    QuestionRepository, ReviewQuestionsUseCase, TranslateQuestionUseCase,
};
use qgen_domain::{AppMode, BatchSize, GenerationConfig, Question, ViewAction, quota_status};
use qgen_infrastructure::{ConfigLoader, FileConfig, GeminiGateway, JsonFileStore, JsonlGenerationLogger};
use qgen_presentation::{
    Cli, Command, ConsoleFormatter, OutputConfig, ProgressReporter, SettingsArgs, SimpleProgress,
};
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Everything a command handler needs
struct App {
    file_config: FileConfig,
    output: OutputConfig,
    store: Arc<JsonFileStore>,
    settings: GenerationConfig,
    app_mode: AppMode,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };

    let output = OutputConfig::resolve(
        cli.output.map(Into::into),
        file_config.output.format,
        file_config.output.color,
        cli.quiet,
    );
    output.apply();

    let data_dir = file_config.storage.resolve_data_dir();
    info!("Using data directory {}", data_dir.display());
    let store = Arc::new(JsonFileStore::new(data_dir));

    let settings = match store.load_config()? {
        Some(stored) => stored,
        None => file_config.generation.to_generation_config(),
    };

    let app = App {
        file_config,
        output,
        store,
        settings,
        app_mode: cli.mode.into(),
    };

    let command = cli.command.unwrap_or(Command::List {
        status: None,
        search: None,
        history: None,
        mine: false,
        tags: Vec::new(),
        sort: None,
        variants: false,
        settings: SettingsArgs::default(),
    });

    match command {
        Command::List {
            status,
            search,
            history,
            mine,
            tags,
            sort,
            variants,
            settings,
        } => {
            let mut controller = app.controller(&settings)?;
            if let Some(status) = status {
                controller.dispatch(ViewAction::SetFilterMode(status.into()));
            }
            if let Some(search) = search {
                controller.dispatch(ViewAction::SetSearchTerm(search));
            }
            if let Some(history) = history {
                controller.dispatch(ViewAction::SetShowHistory(history));
            }
            if mine {
                controller.dispatch(ViewAction::SetFilterByCreator(true));
            }
            if !tags.is_empty() {
                controller.dispatch(ViewAction::SetTags(tags.into_iter().collect()));
            }
            if let Some(sort) = sort {
                controller.dispatch(ViewAction::SetSortBy(sort.into()));
            }

            let view = controller.view();
            let rows = if variants { &view.filtered } else { &view.unique };
            let state = controller.state();
            if app.output.is_json() {
                let payload = json!({
                    "filter": state.filter_mode,
                    "counts": view.counts,
                    "questions": rows,
                });
                println!("{}", ConsoleFormatter::format_json(&payload));
            } else {
                print!(
                    "{}",
                    ConsoleFormatter::question_list(view, rows, state.filter_mode, state.review_cursor)
                );
            }
        }

        Command::Show { target, settings } => {
            let all = app.all_questions()?;
            let question = match all.iter().find(|q| q.id == target) {
                Some(q) => q.clone(),
                None => {
                    let position = parse_position(&target)?;
                    app.controller(&settings)?
                        .view()
                        .unique
                        .get(position - 1)
                        .cloned()
                        .ok_or_else(|| anyhow!("No question at position {}", position))?
                }
            };
            let variants: Vec<&Question> = all
                .iter()
                .filter(|q| q.group_key() == question.group_key() && q.id != question.id)
                .collect();

            if app.output.is_json() {
                let payload = json!({ "question": question, "variants": variants });
                println!("{}", ConsoleFormatter::format_json(&payload));
            } else {
                print!("{}", ConsoleFormatter::question_detail(&question, &variants));
            }
        }

        Command::Quota { history } => {
            let questions = if history {
                app.all_questions()?
            } else {
                app.store.load_questions()?
            };
            let status = quota_status(&questions, &app.file_config.quota.to_targets());
            if app.output.is_json() {
                println!("{}", ConsoleFormatter::format_json(&status));
            } else {
                print!("{}", ConsoleFormatter::quota_status(&status));
            }
        }

        Command::Generate { settings } => {
            let config = app.settings_with(&settings)?;
            let use_case = GenerateQuestionsUseCase::new(app.gateway()?, app.store.clone())
                .with_behavior(app.file_config.behavior())
                .with_generation_logger(app.generation_logger());

            let progress = app.progress();
            let outcome = use_case.execute(&config, progress.as_ref()).await?;

            if app.output.is_json() {
                let payload = match &outcome {
                    GenerationOutcome::Blocked(check) => json!({ "blocked": true, "check": check }),
                    GenerationOutcome::Generated {
                        added,
                        discarded,
                        check,
                    } => json!({
                        "blocked": false,
                        "check": check,
                        "discarded": discarded,
                        "added": added,
                    }),
                };
                println!("{}", ConsoleFormatter::format_json(&payload));
            } else {
                print!("{}", ConsoleFormatter::generation_outcome(&outcome));
            }
        }

        Command::Translate { id, language } => {
            let use_case = TranslateQuestionUseCase::new(app.gateway()?, app.store.clone())
                .with_behavior(app.file_config.behavior())
                .with_generation_logger(app.generation_logger());

            let progress = app.progress();
            let variant = use_case
                .execute(&id, &language, &app.settings, progress.as_ref())
                .await?;

            if app.output.is_json() {
                println!("{}", ConsoleFormatter::format_json(&variant));
            } else {
                print!("{}", ConsoleFormatter::question_detail(&variant, &[]));
            }
        }

        Command::Accept { id } => {
            app.review().accept(&id)?;
            app.report(&format!("Accepted {}", id));
        }

        Command::Reject { id, reason } => {
            app.review().reject(&id, reason)?;
            app.report(&format!("Rejected {}", id));
        }

        Command::Requeue { id } => {
            app.review().reset(&id)?;
            app.report(&format!("{} is pending again", id));
        }

        Command::Delete { id } => {
            let removed = app.review().delete(&id)?;
            app.report(&format!("Deleted {} ({})", removed.id, removed.language()));
        }

        Command::KickBack { unique_id } => {
            let touched = app.review().kick_back(&unique_id)?;
            app.report(&format!(
                "Sent {} variant(s) of {} back to review",
                touched, unique_id
            ));
        }

        Command::ClearPending { yes } => {
            let pending = app
                .store
                .load_questions()?
                .iter()
                .filter(|q| q.is_pending())
                .count();
            if !yes {
                bail!(
                    "Refusing to delete {} pending question(s) without --yes",
                    pending
                );
            }
            let removed = app.review().clear_pending()?;
            app.report(&format!("Deleted {} pending question(s)", removed));
        }

        Command::AcceptVerified { threshold } => {
            let ids = app.review().accept_verified(Some(threshold))?;
            if app.output.is_json() {
                println!("{}", ConsoleFormatter::format_json(&ids));
            } else {
                app.report(&format!(
                    "Accepted {} verified question(s) scoring {} or more",
                    ids.len(),
                    threshold
                ));
            }
        }

        Command::Settings { settings } => {
            let config = app.settings_with(&settings)?;
            if !settings.is_empty() {
                app.store.save_config(&config)?;
                info!("Saved generation settings");
            }
            if app.output.is_json() {
                println!("{}", ConsoleFormatter::format_json(&config));
            } else {
                print!("{}", ConsoleFormatter::settings(&config));
            }
        }

        Command::Import {
            file,
            historical,
            replace,
        } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let incoming: Vec<Question> = serde_json::from_str(&content)
                .with_context(|| format!("{} is not a JSON array of questions", file.display()))?;

            let existing = if replace {
                Vec::new()
            } else if historical {
                app.store.load_historical()?
            } else {
                app.store.load_questions()?
            };
            let (merged, added) = merge_questions(existing, incoming);

            if historical {
                app.store.save_historical(&merged)?;
            } else {
                app.store.save_questions(&merged)?;
            }
            app.report(&format!(
                "Imported {} question(s) into the {} list ({} total)",
                added,
                if historical { "historical" } else { "working" },
                merged.len()
            ));
        }

        Command::Export {
            dir,
            segmented,
            history,
            reviewer,
        } => {
            let creator = app.settings.creator_name.clone();
            let request = ExportRequest {
                reviewer: reviewer.unwrap_or_else(|| creator.clone()),
                creator,
                date: chrono::Local::now().date_naive(),
                include_history: history,
            };
            let repository: Arc<dyn QuestionRepository> = app.store.clone();
            let export = ExportQuestionsUseCase::new(repository);
            let files = if segmented {
                export.segmented(&request)?
            } else {
                vec![export.single(&request)?]
            };

            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
            for file in &files {
                let path = dir.join(&file.file_name);
                std::fs::write(&path, &file.content)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!("Wrote {} rows to {}", file.rows, path.display());
            }

            if app.output.is_json() {
                let names: Vec<&str> = files.iter().map(|f| f.file_name.as_str()).collect();
                println!("{}", ConsoleFormatter::format_json(&names));
            } else {
                print!("{}", ConsoleFormatter::export_summary(&files));
            }
        }

        Command::Validate { id, reject } => {
            let review = app.review();
            let report = review.validate(id.as_deref())?;
            if app.output.is_json() {
                let verdicts: Vec<_> = report
                    .iter()
                    .map(|(q, v)| json!({ "id": q.id, "validation": v }))
                    .collect();
                println!("{}", ConsoleFormatter::format_json(&verdicts));
            } else {
                print!("{}", ConsoleFormatter::validation_report(&report));
            }

            if reject {
                let ids = review.reject_ungrounded()?;
                app.report(&format!("Rejected {} ungrounded question(s)", ids.len()));
            }
        }

        Command::Reset { yes } => {
            if !yes {
                bail!("Factory reset deletes every stored question; pass --yes to confirm");
            }
            app.store.factory_reset()?;
            app.report("All stored questions, settings and preferences were removed");
        }
    }

    Ok(())
}

impl App {
    /// Stored settings with per-command overrides applied
    fn settings_with(&self, args: &SettingsArgs) -> Result<GenerationConfig> {
        let mut config = self.settings.clone();
        if let Some(discipline) = &args.discipline {
            config.discipline = discipline.clone();
        }
        if let Some(difficulty) = args.difficulty {
            config.difficulty = difficulty;
        }
        if let Some(language) = &args.language {
            config.language = language.clone();
        }
        if let Some(size) = args.batch_size {
            config.batch_size = BatchSize::try_new(usize::from(size))
                .ok_or_else(|| anyhow!("Batch size must be at least 1"))?;
        }
        if let Some(creator) = &args.creator {
            config.creator_name = creator.clone();
        }
        if let Some(model) = &args.model {
            config.model = model.clone();
        }
        if let Some(temperature) = args.temperature {
            config.temperature = temperature;
        }
        Ok(config)
    }

    fn all_questions(&self) -> Result<Vec<Question>> {
        let mut questions = self.store.load_questions()?;
        questions.extend(self.store.load_historical()?);
        Ok(questions)
    }

    fn controller(&self, args: &SettingsArgs) -> Result<FilteringController> {
        let preferences: Arc<dyn PreferenceStore> = self.store.clone();
        Ok(FilteringController::new(
            preferences,
            self.store.load_questions()?,
            self.store.load_historical()?,
            self.settings_with(args)?,
            self.app_mode,
        ))
    }

    fn gateway(&self) -> Result<Arc<dyn LlmGateway>> {
        let gemini = &self.file_config.gemini;
        let api_key = gemini.resolve_api_key().ok_or_else(|| {
            anyhow!(
                "No Gemini API key configured. Set {} or gemini.api_key in qgen.toml",
                gemini.api_key_env
            )
        })?;
        Ok(Arc::new(
            GeminiGateway::new(api_key)
                .with_endpoint(gemini.endpoint.clone())
                .with_max_retries(gemini.max_retries)
                .with_max_output_tokens(gemini.max_output_tokens),
        ))
    }

    fn generation_logger(&self) -> Arc<dyn GenerationLogger> {
        match &self.file_config.logging.generation_log {
            Some(path) => match JsonlGenerationLogger::new(path) {
                Some(logger) => Arc::new(logger),
                None => Arc::new(NoGenerationLogger),
            },
            None => Arc::new(NoGenerationLogger),
        }
    }

    fn progress(&self) -> Box<dyn GenerationProgress> {
        if self.output.show_progress {
            Box::new(ProgressReporter::new())
        } else if self.output.is_json() {
            Box::new(NoProgress)
        } else {
            Box::new(SimpleProgress)
        }
    }

    fn review(&self) -> ReviewQuestionsUseCase {
        let repository: Arc<dyn QuestionRepository> = self.store.clone();
        ReviewQuestionsUseCase::new(repository)
    }

    fn report(&self, message: &str) {
        if self.output.is_json() {
            println!("{}", json!({ "message": message }));
        } else {
            println!("{}", message);
        }
    }
}

/// 1-based list position given to `show` when `target` is not an id
fn parse_position(target: &str) -> Result<usize> {
    match target.parse::<usize>() {
        Ok(0) => bail!("Positions start at 1"),
        Ok(position) => Ok(position),
        Err(_) => bail!("No question with id '{}'", target),
    }
}

/// Append `incoming` to `existing`, skipping ids that are already stored
fn merge_questions(existing: Vec<Question>, incoming: Vec<Question>) -> (Vec<Question>, usize) {
    let mut seen: HashSet<String> = existing.iter().map(|q| q.id.clone()).collect();
    let mut merged = existing;
    let mut added = 0;
    for q in incoming {
        if seen.insert(q.id.clone()) {
            merged.push(q);
            added += 1;
        }
    }
    (merged, added)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_skips_known_ids() {
        let existing = vec![Question::new("1", "a", "Q1")];
        let incoming = vec![
            Question::new("1", "a", "Q1 again"),
            Question::new("2", "b", "Q2"),
            Question::new("2", "b", "Q2 twice"),
        ];
        let (merged, added) = merge_questions(existing, incoming);
        assert_eq!(added, 1);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].question, "Q1");
    }

    #[test]
    fn test_show_position_starts_at_one() {
        assert_eq!(parse_position("1").unwrap(), 1);
        assert_eq!(parse_position("12").unwrap(), 12);
        assert!(parse_position("0").unwrap_err().to_string().contains("start at 1"));
        assert!(parse_position("abc").unwrap_err().to_string().contains("'abc'"));
    }
}
