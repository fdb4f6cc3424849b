use rand::{seq::SliceRandom, Rng};

use super::GenerationContext;
use crate::{
    constants::templates::render,
    errors::AppResult,
    models::domain::{GeneratedQuestion, QuestionFormat},
};

/// Open-ended questions on distinct multi-word noun phrases from the key
/// sentences, in order of first appearance.
pub fn generate<R: Rng + ?Sized>(
    ctx: &GenerationContext<'_>,
    count: usize,
    rng: &mut R,
) -> AppResult<Vec<GeneratedQuestion>> {
    let templates = ctx.templates;
    let mut topics: Vec<String> = Vec::new();

    'sentences: for sentence in &ctx.view.key_sentences {
        let parse = ctx.engine.parse(sentence);
        for chunk in parse.sentences().flat_map(|s| s.noun_chunks()) {
            if chunk.word_count >= 2 && !topics.contains(&chunk.text) {
                topics.push(chunk.text);
                if topics.len() >= count {
                    break 'sentences;
                }
            }
        }
    }

    topics
        .into_iter()
        .map(|topic| {
            let verb = templates
                .long_answer_verbs
                .choose(rng)
                .map(String::as_str)
                .unwrap_or("Discuss");
            GeneratedQuestion::new(
                format!("{} {}.", verb, topic),
                QuestionFormat::LongAnswer,
                render(&templates.long_answer_placeholder, &topic),
                Some(templates.long_answer_explanation.clone()),
                templates.marks.long_answer,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        constants::QuestionTemplates,
        models::domain::AnalyzedView,
        services::generators::test_support::{engine, rng},
    };

    #[test]
    fn test_asks_about_distinct_topics() {
        let engine = engine();
        let view = AnalyzedView {
            key_sentences: vec![
                "The compiler produces efficient machine code.".to_string(),
                "The compiler checks every type annotation.".to_string(),
            ],
            ..AnalyzedView::default()
        };
        let templates = QuestionTemplates::default();
        let ctx = GenerationContext {
            view: &view,
            engine: &engine,
            templates: &templates,
            source_text: "",
        };

        let questions = generate(&ctx, 5, &mut rng()).expect("long answer generation");
        let answers: Vec<&str> = questions.iter().map(|q| q.correct_answer.as_str()).collect();

        assert_eq!(
            answers,
            vec![
                "A comprehensive answer should cover the key aspects of The compiler as discussed in the material.",
                "A comprehensive answer should cover the key aspects of efficient machine code as discussed in the material.",
                "A comprehensive answer should cover the key aspects of every type annotation as discussed in the material.",
            ]
        );
        assert!(questions[1].question_text.ends_with(" efficient machine code."));
        assert!(questions.iter().all(|q| q.suggested_marks == 5.0));
    }
}
