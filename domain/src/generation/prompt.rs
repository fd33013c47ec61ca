//! Prompt templates for question generation and translation

use crate::config::GenerationConfig;
use crate::question::{Category, Difficulty, DifficultySetting, Question, QuestionType};
use crate::quota::BatchSize;
use serde_json::json;

/// Number of categories a balanced batch is spread over
const BALANCED_SPLIT: usize = 6;

/// How a batch is distributed over difficulties and types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPlan {
    /// Questions actually requested (rounded up for balanced batches)
    pub total: usize,
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
    pub multiple_choice: usize,
    pub true_false: usize,
}

impl BatchPlan {
    pub fn new(difficulty: &DifficultySetting, batch: BatchSize) -> Self {
        let n = batch.get();
        match difficulty {
            DifficultySetting::Balanced => {
                let per_category = n.div_ceil(BALANCED_SPLIT);
                let total = per_category * BALANCED_SPLIT;
                Self {
                    total,
                    easy: per_category * 2,
                    medium: per_category * 2,
                    hard: per_category * 2,
                    multiple_choice: per_category * 3,
                    true_false: per_category * 3,
                }
            }
            DifficultySetting::Category(Category {
                difficulty,
                question_type,
            }) => {
                let mut plan = Self {
                    total: n,
                    easy: 0,
                    medium: 0,
                    hard: 0,
                    multiple_choice: 0,
                    true_false: 0,
                };
                match difficulty {
                    Difficulty::Easy => plan.easy = n,
                    Difficulty::Medium => plan.medium = n,
                    Difficulty::Hard => plan.hard = n,
                }
                match question_type {
                    QuestionType::MultipleChoice => plan.multiple_choice = n,
                    QuestionType::TrueFalse => plan.true_false = n,
                }
                plan
            }
        }
    }
}

/// Templates for the generator prompts
pub struct GenerationPrompt;

impl GenerationPrompt {
    /// System prompt for a generation batch
    pub fn system(config: &GenerationConfig, batch: BatchSize) -> String {
        let plan = BatchPlan::new(&config.difficulty, batch);
        let (target_type, instruction) = match config.difficulty {
            DifficultySetting::Balanced => (
                "Multiple Choice and True/False".to_string(),
                format!(
                    "Generate approximately {} Easy, {} Medium, and {} Hard questions. Aim for {} Multiple Choice questions and {} True/False questions for a balanced batch.",
                    plan.easy, plan.medium, plan.hard, plan.multiple_choice, plan.true_false
                ),
            ),
            DifficultySetting::Category(category) => (
                format!("{} ONLY", category.question_type.as_str()),
                format!(
                    "Generate exactly {} questions of difficulty: {}.",
                    plan.total, category.difficulty
                ),
            ),
        };

        format!(
            r#"## Universal UE5 Scenario-Based Question Generator
Role: You are a senior Unreal Engine 5 technical writer. Create short, clear, scenario-driven questions in Simplified Technical English (STE).
**FORMATTING INSTRUCTION:** You MUST enclose key technical concepts (like Nanite, Lumen, Blueprints, Virtual Shadow Maps) in HTML bold tags (e.g., <b>Nanite</b>) in the Question and Answer columns.
Discipline: {discipline}
Target Language: {language}
Question Type: {target_type}
**LANGUAGE STRICTNESS:** Output ONLY in {language}. Do NOT provide bilingual text.
Question Format:
| ID | Discipline | Type | Difficulty | Question | Answer | OptionA | OptionB | OptionC | OptionD | CorrectLetter | SourceURL | SourceExcerpt | QualityScore |
- ID starts at 1.
- Difficulty levels: Easy / Medium / Hard.
- For True/False questions: OptionA=TRUE, OptionB=FALSE. CorrectLetter=A/B.
- QualityScore is your own 0-100 estimate of the question's accuracy and clarity.
- **CRITICAL RULE:** True/False questions must be a SINGLE assertion.
- **TYPE RULE:** If Question Type is 'Multiple Choice ONLY', do NOT generate True/False questions. If Question Type is 'True/False ONLY', do NOT generate Multiple Choice questions.
Sourcing:
1. Official Epic Games Documentation (dev.epicgames.com/documentation)
**FORBIDDEN SOURCES:** Do NOT use forums, Reddit, community wikis, or external video platforms like YouTube.
Output:
- **OUTPUT INSTRUCTION:** {instruction}"#,
            discipline = config.discipline,
            language = config.language,
            target_type = target_type,
            instruction = instruction,
        )
    }

    /// User prompt for a generation batch
    pub fn user(config: &GenerationConfig, batch: BatchSize) -> String {
        let plan = BatchPlan::new(&config.difficulty, batch);
        format!(
            "Generate {} scenario-based questions for {} in {}. Focus: {}. Ensure links work for the latest UE5 release.",
            plan.total, config.discipline, config.language, config.difficulty
        )
    }

    /// System prompt for translating one question
    pub fn translate_system(question: &Question, target_language: &str) -> String {
        format!(
            r#"You are a professional technical translator for Unreal Engine 5 documentation. Translate the provided JSON object from {} to {}.
CRITICAL RULES:
1. Return ONLY valid JSON. No markdown formatting, no explanations.
2. Translate ONLY: "Question", "OptionA", "OptionB", "OptionC", "OptionD", and "SourceExcerpt".
3. DO NOT translate: "Discipline", "Type", "Difficulty", "CorrectLetter", and "SourceURL".
4. Maintain exact JSON structure."#,
            question.language(),
            target_language
        )
    }

    /// User prompt carrying the question to translate
    pub fn translate_user(question: &Question) -> String {
        let option = |key: &str| question.options.get(key).cloned().unwrap_or_default();
        let payload = json!({
            "Discipline": question.discipline,
            "Type": question.question_type.clone().unwrap_or_default(),
            "Difficulty": question.difficulty,
            "Question": question.question,
            "OptionA": option("A"),
            "OptionB": option("B"),
            "OptionC": option("C"),
            "OptionD": option("D"),
            "CorrectLetter": question.correct,
            "SourceURL": question.source_url.clone().unwrap_or_default(),
            "SourceExcerpt": question.source_excerpt.clone().unwrap_or_default(),
        });
        let body = serde_json::to_string_pretty(&payload).unwrap_or_else(|_| payload.to_string());
        format!("Translate this object:\n{}", body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced_plan_rounds_up_to_six() {
        let plan = BatchPlan::new(&DifficultySetting::Balanced, BatchSize::new(10));
        assert_eq!(plan.total, 12);
        assert_eq!((plan.easy, plan.medium, plan.hard), (4, 4, 4));
        assert_eq!((plan.multiple_choice, plan.true_false), (6, 6));
    }

    #[test]
    fn test_category_plan() {
        let setting = DifficultySetting::Category(Category::new(Difficulty::Hard, QuestionType::TrueFalse));
        let plan = BatchPlan::new(&setting, BatchSize::new(5));
        assert_eq!(plan.total, 5);
        assert_eq!(plan.hard, 5);
        assert_eq!(plan.true_false, 5);
        assert_eq!(plan.easy + plan.medium + plan.multiple_choice, 0);
    }

    #[test]
    fn test_system_prompt_for_category() {
        let config = GenerationConfig {
            discipline: "Animation".to_string(),
            language: "German".to_string(),
            ..Default::default()
        };
        let prompt = GenerationPrompt::system(&config, BatchSize::new(4));
        assert!(prompt.contains("Discipline: Animation"));
        assert!(prompt.contains("Output ONLY in German"));
        assert!(prompt.contains("Question Type: Multiple Choice ONLY"));
        assert!(prompt.contains("Generate exactly 4 questions of difficulty: Easy."));
    }

    #[test]
    fn test_system_prompt_for_balanced() {
        let config = GenerationConfig {
            difficulty: DifficultySetting::Balanced,
            ..Default::default()
        };
        let prompt = GenerationPrompt::system(&config, BatchSize::new(6));
        assert!(prompt.contains("Multiple Choice and True/False"));
        assert!(prompt.contains("approximately 2 Easy, 2 Medium, and 2 Hard"));
        let user = GenerationPrompt::user(&config, BatchSize::new(6));
        assert!(user.contains("Focus: Balanced All"));
    }

    #[test]
    fn test_translate_prompts() {
        let mut q = Question::new("1", "u", "What does <b>Lumen</b> do?")
            .with_discipline("Lighting")
            .with_type(QuestionType::MultipleChoice);
        q.options.insert("A".to_string(), "Global illumination".to_string());
        q.correct = "A".to_string();

        let system = GenerationPrompt::translate_system(&q, "Japanese");
        assert!(system.contains("from English to Japanese"));

        let user = GenerationPrompt::translate_user(&q);
        let json_part = user.trim_start_matches("Translate this object:\n");
        let value: serde_json::Value = serde_json::from_str(json_part).unwrap();
        assert_eq!(value["OptionA"], "Global illumination");
        assert_eq!(value["OptionB"], "");
        assert_eq!(value["Type"], "Multiple Choice");
        assert_eq!(value["CorrectLetter"], "A");
    }
}
