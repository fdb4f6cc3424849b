use serde::{Deserialize, Serialize};

use super::question::{DifficultyMix, GeneratedQuestion, QuestionType};

#[derive(Clone, Debug, PartialEq)]
pub struct GenerationRequest {
    pub source_text: String,
    pub num_questions: usize,
    pub question_types: Vec<QuestionType>,
    pub difficulty_mix: DifficultyMix,
}

impl GenerationRequest {
    pub fn new(
        source_text: impl Into<String>,
        num_questions: usize,
        question_types: Vec<QuestionType>,
    ) -> Self {
        Self {
            source_text: source_text.into(),
            num_questions,
            question_types,
            difficulty_mix: DifficultyMix::default(),
        }
    }

    pub fn with_difficulty_mix(mut self, difficulty_mix: DifficultyMix) -> Self {
        self.difficulty_mix = difficulty_mix;
        self
    }
}

/// How one requested type fared during synthesis.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct TypeOutcome {
    pub question_type: QuestionType,
    pub requested: usize,
    pub produced: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GenerationReport {
    pub outcomes: Vec<TypeOutcome>,
    pub backfilled: usize,
    pub shortfall: usize,
}

impl GenerationReport {
    pub fn failed_types(&self) -> Vec<QuestionType> {
        self.outcomes
            .iter()
            .filter(|o| o.error.is_some())
            .map(|o| o.question_type)
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GenerationOutput {
    pub questions: Vec<GeneratedQuestion>,
    pub report: GenerationReport,
}
