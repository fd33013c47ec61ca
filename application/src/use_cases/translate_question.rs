//! Translate Question use case.
//!
//! Adds a new language variant of a stored question. The variant shares the
//! source's `uniqueId`, discipline, difficulty and type, so the unique filter
//! treats both as one logical question.

use crate::config::BehaviorConfig;
use crate::ports::generation_logger::{GenerationEvent, GenerationLogger, NoGenerationLogger};
use crate::ports::llm_gateway::{GatewayError, GenerationRequest, LlmGateway};
use crate::ports::progress::GenerationProgress;
use crate::ports::question_repository::{QuestionRepository, StoreError};
use chrono::Utc;
use qgen_domain::{GenerationConfig, GenerationPrompt, ParseDefaults, Question, QuestionStatus, parse_questions};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("Question not found: {0}")]
    QuestionNotFound(String),

    #[error("Question {unique_id} already has a {language} variant")]
    AlreadyTranslated { unique_id: String, language: String },

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Failed to parse translated question")]
    NoTranslationParsed,
}

/// Use case for translating one question into another language
pub struct TranslateQuestionUseCase {
    gateway: Arc<dyn LlmGateway>,
    repository: Arc<dyn QuestionRepository>,
    logger: Arc<dyn GenerationLogger>,
    behavior: BehaviorConfig,
}

impl TranslateQuestionUseCase {
    pub fn new(gateway: Arc<dyn LlmGateway>, repository: Arc<dyn QuestionRepository>) -> Self {
        Self {
            gateway,
            repository,
            logger: Arc::new(NoGenerationLogger),
            behavior: BehaviorConfig::default(),
        }
    }

    pub fn with_behavior(mut self, behavior: BehaviorConfig) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn with_generation_logger(mut self, logger: Arc<dyn GenerationLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Translate the question `id` into `target_language` and store the
    /// new variant
    pub async fn execute(
        &self,
        id: &str,
        target_language: &str,
        config: &GenerationConfig,
        progress: &dyn GenerationProgress,
    ) -> Result<Question, TranslateError> {
        let mut questions = self.repository.load_questions()?;
        let source = questions
            .iter()
            .find(|q| q.id == id)
            .cloned()
            .ok_or_else(|| TranslateError::QuestionNotFound(id.to_string()))?;

        let unique_id = source.group_key().to_string();
        if questions
            .iter()
            .any(|q| q.group_key() == unique_id && q.language() == target_language)
        {
            return Err(TranslateError::AlreadyTranslated {
                unique_id,
                language: target_language.to_string(),
            });
        }

        let request = GenerationRequest::new(
            GenerationPrompt::translate_system(&source, target_language),
            GenerationPrompt::translate_user(&source),
        )
        .with_config(config);

        info!(
            "Translating {} from {} to {}",
            source.id,
            source.language(),
            target_language
        );
        progress.on_request_start(&format!("Translating to {}", target_language));
        let result = match self.behavior.timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.gateway.generate(&request))
                .await
                .unwrap_or(Err(GatewayError::Timeout)),
            None => self.gateway.generate(&request).await,
        };
        progress.on_request_complete(result.is_ok());
        let text = result?;

        let defaults = ParseDefaults {
            language: target_language.to_string(),
            creator_name: source.creator_name.clone(),
        };
        let Some(parsed) = parse_questions(&text, &defaults).into_iter().next() else {
            warn!("Translation output for {} was not parsable", source.id);
            return Err(TranslateError::NoTranslationParsed);
        };

        let variant = Question {
            unique_id: Some(unique_id.clone()),
            discipline: source.discipline.clone(),
            difficulty: source.difficulty.clone(),
            question_type: source.question_type.clone(),
            correct: source.correct.clone(),
            source_url: source.source_url.clone(),
            language: Some(target_language.to_string()),
            status: Some(QuestionStatus::Accepted),
            creator_id: source.creator_id.clone(),
            tags: source.tags.clone(),
            date_added: Some(Utc::now()),
            ..parsed
        };

        questions.push(variant.clone());
        self.repository.save_questions(&questions)?;

        self.logger.log(GenerationEvent::new(
            "translation",
            json!({
                "source_id": source.id,
                "unique_id": unique_id,
                "from": source.language(),
                "to": target_language,
            }),
        ));
        Ok(variant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::progress::NoProgress;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    struct ScriptedGateway {
        responses: Mutex<VecDeque<Result<String, GatewayError>>>,
    }

    impl ScriptedGateway {
        fn new(responses: Vec<Result<String, GatewayError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
            }
        }
    }

    #[async_trait]
    impl LlmGateway for ScriptedGateway {
        async fn generate(&self, _request: &GenerationRequest) -> Result<String, GatewayError> {
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(GatewayError::EmptyResponse))
        }
    }

    struct MemoryRepository {
        questions: Mutex<Vec<Question>>,
    }

    impl QuestionRepository for MemoryRepository {
        fn load_questions(&self) -> Result<Vec<Question>, StoreError> {
            Ok(self.questions.lock().unwrap().clone())
        }

        fn save_questions(&self, questions: &[Question]) -> Result<(), StoreError> {
            *self.questions.lock().unwrap() = questions.to_vec();
            Ok(())
        }

        fn load_historical(&self) -> Result<Vec<Question>, StoreError> {
            Ok(Vec::new())
        }

        fn save_historical(&self, _questions: &[Question]) -> Result<(), StoreError> {
            Ok(())
        }

        fn load_config(&self) -> Result<Option<GenerationConfig>, StoreError> {
            Ok(None)
        }

        fn save_config(&self, _config: &GenerationConfig) -> Result<(), StoreError> {
            Ok(())
        }

        fn factory_reset(&self) -> Result<(), StoreError> {
            Ok(())
        }
    }

    // ==================== Helpers ====================

    const TRANSLATED: &str = r#"```json
{
  "Discipline": "Technical Art",
  "Type": "Multiple Choice",
  "Difficulty": "Easy",
  "Question": "Quel système affiche la géométrie virtualisée ?",
  "OptionA": "Lumen",
  "OptionB": "Nanite",
  "OptionC": "Niagara",
  "OptionD": "Chaos",
  "CorrectLetter": "B",
  "SourceURL": "https://dev.epicgames.com/documentation/nanite",
  "SourceExcerpt": "Nanite est un système de géométrie virtualisée"
}
```"#;

    fn repository() -> Arc<MemoryRepository> {
        let mut source = Question::new("1", "u-1", "Which system renders virtualized geometry?")
            .with_discipline("Technical Art")
            .with_difficulty("Easy MC")
            .with_creator("Sam")
            .with_status(QuestionStatus::Accepted);
        source.correct = "B".to_string();
        Arc::new(MemoryRepository {
            questions: Mutex::new(vec![source]),
        })
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_translation_appends_linked_variant() {
        let repo = repository();
        let gateway = Arc::new(ScriptedGateway::new(vec![Ok(TRANSLATED.to_string())]));
        let use_case = TranslateQuestionUseCase::new(gateway, repo.clone());

        let variant = use_case
            .execute("1", "French", &GenerationConfig::default(), &NoProgress)
            .await
            .unwrap();

        assert_eq!(variant.group_key(), "u-1");
        assert_eq!(variant.language(), "French");
        assert_eq!(variant.difficulty, "Easy MC");
        assert_eq!(variant.status, Some(QuestionStatus::Accepted));
        assert_eq!(variant.creator_name.as_deref(), Some("Sam"));
        assert!(variant.question.starts_with("Quel"));
        assert_ne!(variant.id, "1");

        let stored = repo.questions.lock().unwrap().clone();
        assert_eq!(stored.len(), 2);
    }

    #[tokio::test]
    async fn test_existing_variant_is_refused() {
        let repo = repository();
        let gateway = Arc::new(ScriptedGateway::new(vec![Ok(TRANSLATED.to_string())]));
        let use_case = TranslateQuestionUseCase::new(gateway, repo.clone());

        let result = use_case
            .execute("1", "English", &GenerationConfig::default(), &NoProgress)
            .await;
        assert!(matches!(result, Err(TranslateError::AlreadyTranslated { .. })));
        assert_eq!(repo.questions.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_id() {
        let use_case = TranslateQuestionUseCase::new(
            Arc::new(ScriptedGateway::new(vec![])),
            repository(),
        );
        let result = use_case
            .execute("missing", "French", &GenerationConfig::default(), &NoProgress)
            .await;
        assert!(matches!(result, Err(TranslateError::QuestionNotFound(id)) if id == "missing"));
    }

    #[tokio::test]
    async fn test_gateway_error_leaves_store_untouched() {
        let repo = repository();
        let gateway = Arc::new(ScriptedGateway::new(vec![Err(GatewayError::Unauthorized(
            "key rejected".to_string(),
        ))]));
        let use_case = TranslateQuestionUseCase::new(gateway, repo.clone());

        let result = use_case
            .execute("1", "German", &GenerationConfig::default(), &NoProgress)
            .await;
        match result {
            Err(TranslateError::Gateway(e)) => assert!(e.is_auth_error()),
            other => panic!("expected gateway error, got {:?}", other),
        }
        assert_eq!(repo.questions.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unparsable_translation() {
        let gateway = Arc::new(ScriptedGateway::new(vec![Ok("Désolé".to_string())]));
        let use_case = TranslateQuestionUseCase::new(gateway, repository());
        let result = use_case
            .execute("1", "French", &GenerationConfig::default(), &NoProgress)
            .await;
        assert!(matches!(result, Err(TranslateError::NoTranslationParsed)));
    }
}
