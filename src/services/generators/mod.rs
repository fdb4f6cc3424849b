//! One generator per question type. Each consumes the analyzed view and
//! returns at most `count` questions.

pub mod distractors;
pub mod fill_blank;
pub mod long_answer;
pub mod mcq;
pub mod programming;
pub mod short_answer;
pub mod true_false;

use std::ops::Range;

use rand::Rng;

use crate::{
    constants::QuestionTemplates,
    errors::AppResult,
    models::domain::{AnalyzedView, GeneratedQuestion, QuestionType},
    nlp::LanguageEngine,
};

/// Inputs shared by every generator during one generation call.
#[derive(Clone, Copy)]
pub struct GenerationContext<'a> {
    pub view: &'a AnalyzedView,
    pub engine: &'a dyn LanguageEngine,
    pub templates: &'a QuestionTemplates,
    pub source_text: &'a str,
}

pub fn generate_for_type<R: Rng + ?Sized>(
    question_type: QuestionType,
    ctx: &GenerationContext<'_>,
    count: usize,
    rng: &mut R,
) -> AppResult<Vec<GeneratedQuestion>> {
    if count == 0 {
        return Ok(Vec::new());
    }

    let mut questions = match question_type {
        QuestionType::Mcq => mcq::generate(ctx, count, rng)?,
        QuestionType::TrueFalse => true_false::generate(ctx, count, rng)?,
        QuestionType::ShortAnswer => short_answer::generate(ctx, count, rng)?,
        QuestionType::LongAnswer => long_answer::generate(ctx, count, rng)?,
        QuestionType::FillBlank => fill_blank::generate(ctx, count, rng)?,
        QuestionType::Programming => programming::generate(ctx, count)?,
    };
    questions.truncate(count);
    Ok(questions)
}

/// Replaces exactly the byte range `span` of `text` with `marker`.
pub(crate) fn blank_span(text: &str, span: Range<usize>, marker: &str) -> String {
    format!("{}{}{}", &text[..span.start], marker, &text[span.end..])
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use rand::{rngs::StdRng, SeedableRng};

    use crate::nlp::{Lexicon, RuleBasedEngine, TextAnalyzer};

    pub fn engine() -> RuleBasedEngine {
        RuleBasedEngine::new(Lexicon::english()).expect("engine should build")
    }

    pub fn analyzer() -> TextAnalyzer {
        TextAnalyzer::new(Arc::new(engine())).expect("analyzer should build")
    }

    pub fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }
}
