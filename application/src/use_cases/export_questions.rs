//! Export Questions use case.
//!
//! Renders the non-rejected questions into CSV review sheets, one sheet per
//! language, discipline, level and type.

use crate::ports::question_repository::{QuestionRepository, StoreError};
use chrono::NaiveDate;
use qgen_domain::{CsvExport, Question, segment_file_name, segment_questions};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during export
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("No accepted questions to export")]
    NothingToExport,

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

/// One rendered sheet
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    pub file_name: String,
    pub rows: usize,
    pub content: String,
}

/// What goes into an export
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub creator: String,
    pub reviewer: String,
    pub date: NaiveDate,
    /// Include historical questions alongside the working list
    pub include_history: bool,
}

/// Use case for rendering stored questions into review sheets
pub struct ExportQuestionsUseCase {
    repository: Arc<dyn QuestionRepository>,
}

impl ExportQuestionsUseCase {
    pub fn new(repository: Arc<dyn QuestionRepository>) -> Self {
        Self { repository }
    }

    fn exportable(&self, include_history: bool) -> Result<Vec<Question>, ExportError> {
        let mut questions = self.repository.load_questions()?;
        if include_history {
            questions.extend(self.repository.load_historical()?);
        }
        questions.retain(|q| !q.is_rejected());
        if questions.is_empty() {
            return Err(ExportError::NothingToExport);
        }
        Ok(questions)
    }

    /// Render one sheet per segment, ordered by segment key
    pub fn segmented(&self, request: &ExportRequest) -> Result<Vec<ExportFile>, ExportError> {
        let questions = self.exportable(request.include_history)?;
        let sheet = CsvExport::new(&request.creator, &request.reviewer, request.date);

        let files: Vec<ExportFile> = segment_questions(&questions)
            .into_iter()
            .map(|(key, group)| {
                debug!("Segment {} has {} questions", key, group.len());
                ExportFile {
                    file_name: segment_file_name(&key, request.date),
                    rows: group.len(),
                    content: sheet.render(&group),
                }
            })
            .collect();

        info!("Rendered {} segmented sheets", files.len());
        Ok(files)
    }

    /// Render every exportable question into a single sheet
    pub fn single(&self, request: &ExportRequest) -> Result<ExportFile, ExportError> {
        let questions = self.exportable(request.include_history)?;
        let sheet = CsvExport::new(&request.creator, &request.reviewer, request.date);
        Ok(ExportFile {
            file_name: format!("questions_{}.csv", request.date.format("%Y%m%d")),
            rows: questions.len(),
            content: sheet.render(&questions),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qgen_domain::{GenerationConfig, QuestionStatus, QuestionType};
    use std::sync::Mutex;

    struct MemoryRepository {
        questions: Vec<Question>,
        historical: Vec<Question>,
        history_reads: Mutex<usize>,
    }

    impl QuestionRepository for MemoryRepository {
        fn load_questions(&self) -> Result<Vec<Question>, StoreError> {
            Ok(self.questions.clone())
        }

        fn save_questions(&self, _questions: &[Question]) -> Result<(), StoreError> {
            Ok(())
        }

        fn load_historical(&self) -> Result<Vec<Question>, StoreError> {
            *self.history_reads.lock().unwrap() += 1;
            Ok(self.historical.clone())
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

    fn repo(questions: Vec<Question>, historical: Vec<Question>) -> Arc<MemoryRepository> {
        Arc::new(MemoryRepository {
            questions,
            historical,
            history_reads: Mutex::new(0),
        })
    }

    fn question(id: &str, kind: QuestionType, status: QuestionStatus) -> Question {
        Question::new(id, id, format!("Question {id}"))
            .with_discipline("Lighting & Rendering")
            .with_difficulty("Easy")
            .with_type(kind)
            .with_status(status)
    }

    fn request(include_history: bool) -> ExportRequest {
        ExportRequest {
            creator: "Ana".to_string(),
            reviewer: "Ben".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            include_history,
        }
    }

    #[test]
    fn test_segmented_skips_rejected() {
        let repo = repo(
            vec![
                question("1", QuestionType::MultipleChoice, QuestionStatus::Accepted),
                question("2", QuestionType::TrueFalse, QuestionStatus::Pending),
                question("3", QuestionType::TrueFalse, QuestionStatus::Rejected),
                question("4", QuestionType::MultipleChoice, QuestionStatus::Accepted),
            ],
            vec![],
        );
        let files = ExportQuestionsUseCase::new(repo.clone())
            .segmented(&request(false))
            .unwrap();

        assert_eq!(
            files.iter().map(|f| (f.file_name.as_str(), f.rows)).collect::<Vec<_>>(),
            vec![
                ("English_Lighting_Rendering_Easy_MC_20260314.csv", 2),
                ("English_Lighting_Rendering_Easy_TF_20260314.csv", 1),
            ]
        );
        // header plus one row per question
        assert_eq!(files[0].content.lines().count(), 3);
        assert!(!files[1].content.contains("Question 3"));
        assert_eq!(*repo.history_reads.lock().unwrap(), 0);
    }

    #[test]
    fn test_history_is_opt_in() {
        let repo = repo(
            vec![question("1", QuestionType::MultipleChoice, QuestionStatus::Accepted)],
            vec![question("h", QuestionType::MultipleChoice, QuestionStatus::Accepted)],
        );
        let file = ExportQuestionsUseCase::new(repo).single(&request(true)).unwrap();
        assert_eq!(file.rows, 2);
        assert_eq!(file.file_name, "questions_20260314.csv");
        assert!(file.content.contains("\"Question h\""));
    }

    #[test]
    fn test_nothing_to_export() {
        let repo = repo(
            vec![question("1", QuestionType::TrueFalse, QuestionStatus::Rejected)],
            vec![],
        );
        let err = ExportQuestionsUseCase::new(repo).segmented(&request(false)).unwrap_err();
        assert!(matches!(err, ExportError::NothingToExport));
    }
}
