//! Generate Questions use case.
//!
//! Runs one generation batch end to end:
//!
//! 1. Load the latest questions and re-check the quota
//! 2. Render prompts and call the [`LlmGateway`]
//! 3. Parse, tag, drop duplicates of stored questions, cap at the quota
//! 4. Append and save
//!
//! A quota block is an outcome, not an error: nothing is sent and nothing is
//! stored.

use crate::config::BehaviorConfig;
use crate::ports::generation_logger::{GenerationEvent, GenerationLogger, NoGenerationLogger};
use crate::ports::llm_gateway::{GatewayError, GenerationRequest, LlmGateway};
use crate::ports::progress::GenerationProgress;
use crate::ports::question_repository::{QuestionRepository, StoreError};
use chrono::Utc;
use qgen_domain::{
    GenerationConfig, GenerationPrompt, ParseDefaults, Question, QuotaCheck, filter_new_questions,
    parse_questions, validate_generation,
};
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during generation
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("A creator name is required before generating")]
    MissingCreatorName,

    #[error("A generation batch is already running")]
    AlreadyRunning,

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Failed to parse generated questions")]
    NoQuestionsParsed,
}

/// Result of a generation attempt
#[derive(Debug, Clone)]
pub enum GenerationOutcome {
    /// The batch ran; `added` were stored
    Generated {
        added: Vec<Question>,
        /// Parsed questions dropped as duplicates or past the quota
        discarded: usize,
        check: QuotaCheck,
    },
    /// The quota refused the batch
    Blocked(QuotaCheck),
}

impl GenerationOutcome {
    pub fn added_count(&self) -> usize {
        match self {
            GenerationOutcome::Generated { added, .. } => added.len(),
            GenerationOutcome::Blocked(_) => 0,
        }
    }
}

/// Clears the in-flight flag when the batch ends, however it ends
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Use case for generating a batch of questions
pub struct GenerateQuestionsUseCase {
    gateway: Arc<dyn LlmGateway>,
    repository: Arc<dyn QuestionRepository>,
    logger: Arc<dyn GenerationLogger>,
    behavior: BehaviorConfig,
    in_flight: AtomicBool,
}

impl GenerateQuestionsUseCase {
    pub fn new(gateway: Arc<dyn LlmGateway>, repository: Arc<dyn QuestionRepository>) -> Self {
        Self {
            gateway,
            repository,
            logger: Arc::new(NoGenerationLogger),
            behavior: BehaviorConfig::default(),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn with_behavior(mut self, behavior: BehaviorConfig) -> Self {
        self.behavior = behavior;
        self
    }

    /// Create with a generation logger.
    pub fn with_generation_logger(mut self, logger: Arc<dyn GenerationLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Run one batch with the given settings
    pub async fn execute(
        &self,
        config: &GenerationConfig,
        progress: &dyn GenerationProgress,
    ) -> Result<GenerationOutcome, GenerateError> {
        if !config.has_creator() {
            return Err(GenerateError::MissingCreatorName);
        }
        let _guard = InFlight::acquire(&self.in_flight).ok_or(GenerateError::AlreadyRunning)?;

        let mut questions = self.repository.load_questions()?;
        let historical = self.repository.load_historical()?;
        let known: Vec<Question> = questions.iter().chain(historical.iter()).cloned().collect();

        let check = validate_generation(
            &config.discipline,
            &config.difficulty,
            config.batch_size,
            &known,
            &self.behavior.quota,
        );
        progress.on_quota_checked(&check);

        let Some(batch) = check.effective_batch() else {
            info!("Generation blocked: {}", check.reason);
            self.logger.log(GenerationEvent::new(
                "quota_blocked",
                json!({
                    "discipline": config.discipline,
                    "difficulty": config.difficulty.to_string(),
                    "reason": check.reason,
                }),
            ));
            return Ok(GenerationOutcome::Blocked(check));
        };
        if check.warning {
            warn!("{}", check.reason);
        }

        let request = GenerationRequest::new(
            GenerationPrompt::system(config, batch),
            GenerationPrompt::user(config, batch),
        )
        .with_config(config);

        info!(
            "Generating {} {} questions for {} in {}",
            batch, config.difficulty, config.discipline, config.language
        );
        self.logger.log(GenerationEvent::new(
            "generation_request",
            json!({
                "model": request.model,
                "discipline": config.discipline,
                "difficulty": config.difficulty.to_string(),
                "language": config.language,
                "batch_size": batch.get(),
            }),
        ));

        progress.on_request_start(&format!("Generating {} questions", batch));
        let result = self.send(&request).await;
        progress.on_request_complete(result.is_ok());
        let text = result?;

        let defaults = ParseDefaults {
            language: config.language.clone(),
            creator_name: Some(config.creator_name.clone()),
        };
        let parsed = parse_questions(&text, &defaults);
        if parsed.is_empty() {
            warn!("Generator output contained no parsable questions");
            return Err(GenerateError::NoQuestionsParsed);
        }
        let parsed_count = parsed.len();

        let mut added = filter_new_questions(parsed, &known, self.behavior.duplicate_threshold);
        // balanced plans round up and models overshoot; never store past the quota
        added.truncate(check.max_allowed);
        let discarded = parsed_count - added.len();
        let now = Utc::now();
        for q in &mut added {
            q.date_added = Some(now);
        }
        debug!("Parsed {}, keeping {}", parsed_count, added.len());

        questions.extend(added.iter().cloned());
        self.repository.save_questions(&questions)?;
        progress.on_questions_added(added.len());

        self.logger.log(GenerationEvent::new(
            "generation_result",
            json!({
                "parsed": parsed_count,
                "added": added.len(),
                "discarded": discarded,
            }),
        ));
        info!("Added {} questions ({} discarded)", added.len(), discarded);

        Ok(GenerationOutcome::Generated {
            added,
            discarded,
            check,
        })
    }

    async fn send(&self, request: &GenerationRequest) -> Result<String, GatewayError> {
        match self.behavior.timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.gateway.generate(request))
                .await
                .map_err(|_| GatewayError::Timeout)?,
            None => self.gateway.generate(request).await,
        }
    }
}
