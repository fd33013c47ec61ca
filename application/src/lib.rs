//! Application layer for ue5-qgen
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::BehaviorConfig;
pub use ports::{
    generation_logger::{GenerationEvent, GenerationLogger, NoGenerationLogger},
    llm_gateway::{GatewayError, GenerationRequest, LlmGateway},
    preference_store::{NoPreferenceStore, PreferenceStore},
    progress::{GenerationProgress, NoProgress},
    question_repository::{QuestionRepository, StoreError},
};
pub use use_cases::export_questions::{
    ExportError, ExportFile, ExportQuestionsUseCase, ExportRequest,
};
pub use use_cases::filtering::{FilteredView, FilteringController};
pub use use_cases::generate_questions::{
    GenerateError, GenerateQuestionsUseCase, GenerationOutcome,
};
pub use use_cases::review_questions::{ReviewError, ReviewQuestionsUseCase};
pub use use_cases::translate_question::{TranslateError, TranslateQuestionUseCase};
