use rand::Rng;

use super::GenerationContext;
use crate::{
    errors::AppResult,
    models::domain::{GeneratedQuestion, QuestionFormat, FALSE_OPTION, TRUE_OPTION},
};

pub fn generate<R: Rng + ?Sized>(
    ctx: &GenerationContext<'_>,
    count: usize,
    rng: &mut R,
) -> AppResult<Vec<GeneratedQuestion>> {
    let marks = ctx.templates.marks.true_false;

    ctx.view
        .facts
        .iter()
        .take(count)
        .map(|fact| {
            if rng.gen_bool(0.5) {
                GeneratedQuestion::new(
                    format!("True or False: {}", fact),
                    QuestionFormat::TrueFalse,
                    TRUE_OPTION,
                    Some(ctx.templates.true_statement_explanation.clone()),
                    marks,
                )
            } else {
                GeneratedQuestion::new(
                    format!("True or False: {}", false_statement(fact)),
                    QuestionFormat::TrueFalse,
                    FALSE_OPTION,
                    Some(format!("The correct statement is: {}", fact)),
                    marks,
                )
            }
        })
        .collect()
}

/// Negates every " is " (or else " are "), falling back to a prefix.
pub fn false_statement(statement: &str) -> String {
    if statement.contains(" is ") {
        statement.replace(" is ", " is not ")
    } else if statement.contains(" are ") {
        statement.replace(" are ", " are not ")
    } else {
        format!("It is incorrect that {}", statement.to_lowercase())
    }
}
