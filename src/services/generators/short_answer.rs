use rand::{seq::SliceRandom, Rng};

use super::GenerationContext;
use crate::{
    constants::templates::render,
    errors::AppResult,
    models::domain::{GeneratedQuestion, QuestionFormat},
};

pub fn generate<R: Rng + ?Sized>(
    ctx: &GenerationContext<'_>,
    count: usize,
    rng: &mut R,
) -> AppResult<Vec<GeneratedQuestion>> {
    let templates = ctx.templates;
    let mut questions = Vec::with_capacity(count);

    for definition in ctx.view.definitions.iter().take(count) {
        let question_text = match templates.definition_prompts.choose(rng) {
            Some(prompt) => render(prompt, &definition.term),
            None => format!("Define {}.", definition.term),
        };
        questions.push(GeneratedQuestion::new(
            question_text,
            QuestionFormat::ShortAnswer,
            definition.definition.clone(),
            Some(format!("Expected answer: {}", definition.definition)),
            templates.marks.short_definition,
        )?);
    }

    let remaining = count.saturating_sub(questions.len());
    for sentence in ctx.view.key_sentences.iter().take(remaining) {
        questions.push(GeneratedQuestion::new(
            statement_to_question(sentence),
            QuestionFormat::ShortAnswer,
            sentence.clone(),
            Some(format!("Expected answer should cover: {}", sentence)),
            templates.marks.short_sentence,
        )?);
    }

    Ok(questions)
}

pub fn statement_to_question(statement: &str) -> String {
    let statement = statement.trim();

    if let Some(rest) = statement.strip_prefix("The ") {
        format!("What is {}?", rest.trim_end_matches('.'))
    } else if let Some((subject, _)) = statement.split_once(" is ") {
        format!("What is {}?", subject)
    } else {
        format!("Explain: {}", statement)
    }
}
