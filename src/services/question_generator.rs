use std::sync::Arc;

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    config::DEFAULT_MIN_TEXT_LENGTH,
    constants::QuestionTemplates,
    errors::{AppError, AppResult},
    models::domain::{
        GenerationOutput, GenerationReport, GenerationRequest, QuestionType, TypeOutcome,
    },
    nlp::{LanguageEngine, TextAnalyzer},
    services::{
        difficulty,
        generators::{self, GenerationContext},
        reconciler,
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneratorSettings {
    pub min_text_length: usize,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            min_text_length: DEFAULT_MIN_TEXT_LENGTH,
        }
    }
}

/// The generation pipeline: analysis, per-type synthesis, count
/// reconciliation and difficulty assignment. Holds no per-call state.
pub struct QuestionGenerator {
    analyzer: TextAnalyzer,
    templates: QuestionTemplates,
    settings: GeneratorSettings,
}

impl QuestionGenerator {
    pub fn new(engine: Arc<dyn LanguageEngine>, settings: GeneratorSettings) -> AppResult<Self> {
        Ok(Self {
            analyzer: TextAnalyzer::new(engine)?,
            templates: QuestionTemplates::default(),
            settings,
        })
    }

    pub fn with_templates(mut self, templates: QuestionTemplates) -> Self {
        self.templates = templates;
        self
    }

    pub fn analyzer(&self) -> &TextAnalyzer {
        &self.analyzer
    }

    pub fn generate_with_entropy(&self, request: &GenerationRequest) -> AppResult<GenerationOutput> {
        self.generate(request, &mut StdRng::from_entropy())
    }

    pub fn generate<R: Rng + ?Sized>(
        &self,
        request: &GenerationRequest,
        rng: &mut R,
    ) -> AppResult<GenerationOutput> {
        if request.num_questions == 0 {
            return Err(AppError::ValidationError(
                "At least one question must be requested".to_string(),
            ));
        }
        if request.question_types.is_empty() {
            return Err(AppError::ValidationError(
                "At least one question type must be requested".to_string(),
            ));
        }
        if request.source_text.trim().chars().count() < self.settings.min_text_length {
            return Err(AppError::InputTooShort(format!(
                "Text is too short to generate questions. Need at least {} characters.",
                self.settings.min_text_length
            )));
        }

        let view = self
            .analyzer
            .analyze(&request.source_text, request.num_questions);
        if !view.has_usable_content() {
            return Err(AppError::InsufficientContent(
                "Could not extract enough content from text. The document may be too short or not contain suitable content for questions."
                    .to_string(),
            ));
        }

        let ctx = GenerationContext {
            view: &view,
            engine: self.analyzer.engine(),
            templates: &self.templates,
            source_text: &request.source_text,
        };

        let mut questions = Vec::with_capacity(request.num_questions);
        let mut report = GenerationReport::default();
        let counts = allocate_counts(request.num_questions, request.question_types.len());

        for (&question_type, &requested) in request.question_types.iter().zip(&counts) {
            let outcome = match generators::generate_for_type(question_type, &ctx, requested, rng) {
                Ok(generated) => {
                    let produced = generated.len();
                    questions.extend(generated);
                    TypeOutcome {
                        question_type,
                        requested,
                        produced,
                        error: None,
                    }
                }
                Err(e) => {
                    log::warn!("Failed to generate {} questions: {}", question_type, e);
                    TypeOutcome {
                        question_type,
                        requested,
                        produced: 0,
                        error: Some(e.to_string()),
                    }
                }
            };
            report.outcomes.push(outcome);
        }

        let existing_mcq = questions
            .iter()
            .filter(|q| q.question_type() == QuestionType::Mcq)
            .count();
        let reconciled = reconciler::reconcile(questions, request.num_questions, |needed| {
            // MCQ restarts from the first definition; the reconciler skips repeats
            generators::generate_for_type(QuestionType::Mcq, &ctx, needed + existing_mcq, rng)
        })?;
        report.backfilled = reconciled.backfilled;
        report.shortfall = reconciled.shortfall;

        let mut questions = reconciled.questions;
        difficulty::assign(&mut questions, &request.difficulty_mix, rng);

        log::info!(
            "Generated {} of {} questions ({} backfilled)",
            questions.len(),
            request.num_questions,
            report.backfilled
        );

        Ok(GenerationOutput { questions, report })
    }
}

/// `total / types` each, the remainder going one apiece to the first types.
pub fn allocate_counts(total: usize, types: usize) -> Vec<usize> {
    if types == 0 {
        return Vec::new();
    }
    let base = total / types;
    let remainder = total % types;
    (0..types)
        .map(|i| base + usize::from(i < remainder))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::generators::test_support::{engine, rng};

    fn generator() -> QuestionGenerator {
        QuestionGenerator::new(Arc::new(engine()), GeneratorSettings::default())
            .expect("generator should build")
    }

    #[test]
    fn test_remainder_goes_to_first_types() {
        assert_eq!(allocate_counts(10, 3), vec![4, 3, 3]);
        assert_eq!(allocate_counts(11, 3), vec![4, 4, 3]);
        assert_eq!(allocate_counts(2, 3), vec![1, 1, 0]);
        assert_eq!(allocate_counts(10, 2), vec![5, 5]);
    }

    #[test]
    fn test_rejects_empty_type_list() {
        let request = GenerationRequest::new("x".repeat(200), 5, Vec::new());
        let result = generator().generate(&request, &mut rng());
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_rejects_zero_questions() {
        let request = GenerationRequest::new("x".repeat(200), 0, vec![QuestionType::Mcq]);
        let result = generator().generate(&request, &mut rng());
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_minimum_length_counts_trimmed_characters() {
        let padded = format!("   {}   ", "a".repeat(99));
        let request = GenerationRequest::new(padded, 5, vec![QuestionType::Mcq]);
        let result = generator().generate(&request, &mut rng());
        assert!(matches!(result, Err(AppError::InputTooShort(_))));
    }

    #[test]
    fn test_minimum_length_comes_from_settings() {
        let generator = QuestionGenerator::new(
            Arc::new(engine()),
            GeneratorSettings { min_text_length: 10 },
        )
        .expect("generator should build");
        let request = GenerationRequest::new("@@@@ #### %%%%", 5, vec![QuestionType::Mcq]);

        let result = generator.generate(&request, &mut rng());
        assert!(matches!(result, Err(AppError::InsufficientContent(_))));
    }
}
