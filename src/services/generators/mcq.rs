use rand::Rng;

use super::{blank_span, distractors::build_options, GenerationContext};
use crate::{
    errors::AppResult,
    models::domain::{GeneratedQuestion, QuestionFormat},
};

/// Definition questions first, then facts with their first entity blanked.
pub fn generate<R: Rng + ?Sized>(
    ctx: &GenerationContext<'_>,
    count: usize,
    rng: &mut R,
) -> AppResult<Vec<GeneratedQuestion>> {
    let templates = ctx.templates;
    let mut questions = Vec::with_capacity(count);

    for definition in ctx.view.definitions.iter().take(count) {
        let options = build_options(&definition.definition, templates, rng)?;
        questions.push(GeneratedQuestion::new(
            format!("What is {}?", definition.term),
            QuestionFormat::Mcq { options },
            definition.definition.clone(),
            Some(format!("Based on the definition: {}", definition.source_sentence)),
            templates.marks.mcq,
        )?);
    }

    for fact in &ctx.view.facts {
        if questions.len() >= count {
            break;
        }

        let parse = ctx.engine.parse(fact);
        let Some(entity) = parse.entities.first() else {
            continue;
        };
        let answer = parse.entity_text(entity).to_string();
        let blanked = blank_span(&parse.text, entity.start..entity.end, &templates.blank_marker);
        let options = build_options(&answer, templates, rng)?;

        questions.push(GeneratedQuestion::new(
            format!("Fill in the blank: {}", blanked),
            QuestionFormat::Mcq { options },
            answer,
            Some(format!("From the text: {}", fact)),
            templates.marks.mcq,
        )?);
    }

    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        constants::QuestionTemplates,
        models::domain::{AnalyzedView, Definition, QuestionType},
        services::generators::test_support::{engine, rng},
    };

    fn view() -> AnalyzedView {
        AnalyzedView {
            definitions: vec![Definition {
                term: "A stack".to_string(),
                definition: "collection that follows last in first out order".to_string(),
                source_sentence: "A stack is a collection that follows last in first out order."
                    .to_string(),
            }],
            facts: vec![
                "The first stack machine was designed in 1957 by a German computer scientist."
                    .to_string(),
            ],
            ..AnalyzedView::default()
        }
    }

    #[test]
    fn test_builds_definition_then_fact_questions() {
        let engine = engine();
        let view = view();
        let templates = QuestionTemplates::default();
        let ctx = GenerationContext {
            view: &view,
            engine: &engine,
            templates: &templates,
            source_text: "",
        };

        let questions = generate(&ctx, 5, &mut rng()).expect("mcq generation");

        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].question_text, "What is A stack?");
        assert_eq!(
            questions[1].question_text,
            "Fill in the blank: The first stack machine was designed in ______ by a German computer scientist."
        );
        assert_eq!(questions[1].correct_answer, "1957");
        for question in &questions {
            assert_eq!(question.question_type(), QuestionType::Mcq);
            let options = question.format.options();
            assert_eq!(options.len(), 4);
            assert_eq!(
                options.iter().filter(|o| **o == question.correct_answer).count(),
                1
            );
        }
    }

    #[test]
    fn test_respects_count() {
        let engine = engine();
        let view = view();
        let templates = QuestionTemplates::default();
        let ctx = GenerationContext {
            view: &view,
            engine: &engine,
            templates: &templates,
            source_text: "",
        };

        let questions = generate(&ctx, 1, &mut rng()).expect("mcq generation");
        assert_eq!(questions.len(), 1);
    }
}
