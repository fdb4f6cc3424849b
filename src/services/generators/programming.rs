use super::GenerationContext;
use crate::{
    constants::templates::render,
    errors::AppResult,
    models::domain::{GeneratedQuestion, QuestionFormat},
};

/// Period-separated fragments of the source that mention a coding action.
pub fn generate(ctx: &GenerationContext<'_>, count: usize) -> AppResult<Vec<GeneratedQuestion>> {
    let templates = ctx.templates;

    ctx.source_text
        .split('.')
        .map(|fragment| fragment.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase())
        .filter(|fragment| {
            templates
                .programming_keywords
                .iter()
                .any(|keyword| fragment.contains(keyword.as_str()))
        })
        .take(count)
        .map(|task| {
            GeneratedQuestion::new(
                render(&templates.programming_prompt, &task),
                QuestionFormat::Programming,
                templates.programming_answer.clone(),
                Some(templates.programming_explanation.clone()),
                templates.marks.programming,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        constants::QuestionTemplates, models::domain::AnalyzedView,
        services::generators::test_support::engine,
    };

    #[test]
    fn test_turns_coding_sentences_into_tasks() {
        let engine = engine();
        let view = AnalyzedView::default();
        let templates = QuestionTemplates::default();
        let ctx = GenerationContext {
            view: &view,
            engine: &engine,
            templates: &templates,
            source_text: "Sorting matters. Implement a Merge Sort\n  routine. Trees grow. Write a \
                           function that reverses a list.",
        };

        let questions = generate(&ctx, 5).expect("programming generation");

        let texts: Vec<&str> = questions.iter().map(|q| q.question_text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "Write a program to implement a merge sort routine",
                "Write a program to write a function that reverses a list",
            ]
        );
        assert!(questions.iter().all(|q| q.suggested_marks == 10.0));
    }
}
