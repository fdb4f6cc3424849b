use rand::{seq::SliceRandom, Rng};

use super::{blank_span, GenerationContext};
use crate::{
    errors::AppResult,
    models::domain::{GeneratedQuestion, QuestionFormat},
    nlp::parse::Pos,
};

/// Facts with one content word blanked, then definitions with the term blanked.
pub fn generate<R: Rng + ?Sized>(
    ctx: &GenerationContext<'_>,
    count: usize,
    rng: &mut R,
) -> AppResult<Vec<GeneratedQuestion>> {
    let templates = ctx.templates;
    let marker = templates.blank_marker.as_str();
    let mut questions = Vec::with_capacity(count);

    for fact in &ctx.view.facts {
        if questions.len() >= count {
            break;
        }

        let parse = ctx.engine.parse(fact);
        let candidates: Vec<_> = parse
            .tokens
            .iter()
            .filter(|t| matches!(t.pos, Pos::Noun | Pos::ProperNoun | Pos::Numeral) && !t.is_stop)
            .collect();
        let Some(token) = candidates.choose(rng) else {
            continue;
        };

        questions.push(GeneratedQuestion::new(
            format!("Fill in the blank: {}", blank_span(&parse.text, token.start..token.end, marker)),
            QuestionFormat::FillBlank,
            token.text.clone(),
            Some(format!("Complete sentence: {}", fact)),
            templates.marks.fill_blank,
        )?);
    }

    for definition in &ctx.view.definitions {
        if questions.len() >= count {
            break;
        }

        let sentence = &definition.source_sentence;
        let Some(start) = sentence.find(&definition.term) else {
            continue;
        };
        let blanked = blank_span(sentence, start..start + definition.term.len(), marker);

        questions.push(GeneratedQuestion::new(
            format!("Fill in the blank: {}", blanked),
            QuestionFormat::FillBlank,
            definition.term.clone(),
            Some(format!("Complete sentence: {}", sentence)),
            templates.marks.fill_blank,
        )?);
    }

    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        constants::QuestionTemplates,
        models::domain::{AnalyzedView, Definition},
        services::generators::test_support::{engine, rng},
    };

    #[test]
    fn test_blanks_one_content_word_per_fact() {
        let engine = engine();
        let fact = "The library holds 12000 books and 300 maps from the early colonial period.";
        let view = AnalyzedView {
            facts: vec![fact.to_string()],
            ..AnalyzedView::default()
        };
        let templates = QuestionTemplates::default();
        let ctx = GenerationContext {
            view: &view,
            engine: &engine,
            templates: &templates,
            source_text: "",
        };

        let questions = generate(&ctx, 1, &mut rng()).expect("fill blank generation");

        assert_eq!(questions.len(), 1);
        let question = &questions[0];
        assert_eq!(question.question_text.matches("______").count(), 1);
        let restored = question
            .question_text
            .trim_start_matches("Fill in the blank: ")
            .replacen("______", &question.correct_answer, 1);
        assert_eq!(restored, fact);
    }

    #[test]
    fn test_falls_back_to_definitions() {
        let engine = engine();
        let view = AnalyzedView {
            definitions: vec![Definition {
                term: "Latency".to_string(),
                definition: "the delay before a transfer begins".to_string(),
                source_sentence: "Latency means the delay before a transfer begins.".to_string(),
            }],
            ..AnalyzedView::default()
        };
        let templates = QuestionTemplates::default();
        let ctx = GenerationContext {
            view: &view,
            engine: &engine,
            templates: &templates,
            source_text: "",
        };

        let questions = generate(&ctx, 3, &mut rng()).expect("fill blank generation");

        assert_eq!(questions.len(), 1);
        assert_eq!(
            questions[0].question_text,
            "Fill in the blank: ______ means the delay before a transfer begins."
        );
        assert_eq!(questions[0].correct_answer, "Latency");
    }
}
