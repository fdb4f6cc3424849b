use std::collections::HashSet;

use crate::{
    errors::{AppError, AppResult},
    models::domain::GeneratedQuestion,
    services::fingerprint::fingerprint,
};

#[derive(Debug)]
pub struct Reconciliation {
    pub questions: Vec<GeneratedQuestion>,
    pub backfilled: usize,
    pub shortfall: usize,
}

/// Brings `questions` to exactly `target` items: surplus is cut from the end,
/// a deficit is filled once from `backfill` with candidates whose text is not
/// already present. A remaining deficit is accepted and reported.
pub fn reconcile<F>(
    mut questions: Vec<GeneratedQuestion>,
    target: usize,
    backfill: F,
) -> AppResult<Reconciliation>
where
    F: FnOnce(usize) -> AppResult<Vec<GeneratedQuestion>>,
{
    let mut backfilled = 0;

    if questions.len() > target {
        questions.truncate(target);
    } else if questions.len() < target {
        let needed = target - questions.len();
        match backfill(needed) {
            Ok(candidates) => {
                let mut seen: HashSet<_> =
                    questions.iter().map(|q| fingerprint(&q.question_text)).collect();
                for candidate in candidates {
                    if backfilled == needed {
                        break;
                    }
                    if seen.insert(fingerprint(&candidate.question_text)) {
                        questions.push(candidate);
                        backfilled += 1;
                    }
                }
            }
            Err(e) => log::warn!("Backfill failed: {}", e),
        }
    }

    if questions.is_empty() {
        return Err(AppError::EmptyResult(
            "Failed to generate any questions. Please check if the document has sufficient text content."
                .to_string(),
        ));
    }

    let shortfall = target - questions.len();
    if shortfall > 0 {
        log::warn!(
            "Generated {} of {} requested questions; content exhausted",
            questions.len(),
            target
        );
    }

    Ok(Reconciliation {
        questions,
        backfilled,
        shortfall,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::QuestionFormat;

    fn question(text: &str) -> GeneratedQuestion {
        GeneratedQuestion::new(text, QuestionFormat::LongAnswer, "answer", None, 5.0)
            .expect("valid question")
    }

    fn texts(r: &Reconciliation) -> Vec<&str> {
        r.questions.iter().map(|q| q.question_text.as_str()).collect()
    }

    #[test]
    fn test_truncates_surplus_keeping_order() {
        let qs = vec![question("One?"), question("Two?"), question("Three?")];
        let result = reconcile(qs, 2, |_| panic!("no backfill on surplus")).expect("reconciled");

        assert_eq!(texts(&result), vec!["One?", "Two?"]);
        assert_eq!(result.backfilled, 0);
        assert_eq!(result.shortfall, 0);
    }

    #[test]
    fn test_backfills_skipping_duplicates() {
        let qs = vec![question("One?")];
        let result = reconcile(qs, 3, |needed| {
            assert_eq!(needed, 2);
            Ok(vec![question("one?"), question("Two?"), question("Three?"), question("Four?")])
        })
        .expect("reconciled");

        assert_eq!(texts(&result), vec!["One?", "Two?", "Three?"]);
        assert_eq!(result.backfilled, 2);
        assert_eq!(result.shortfall, 0);
    }

    #[test]
    fn test_accepts_shortfall_when_content_runs_out() {
        let qs = vec![question("One?")];
        let result = reconcile(qs, 4, |_| Ok(vec![question("Two?")])).expect("reconciled");

        assert_eq!(result.questions.len(), 2);
        assert_eq!(result.shortfall, 2);
    }

    #[test]
    fn test_failed_backfill_is_not_fatal() {
        let qs = vec![question("One?")];
        let result = reconcile(qs, 2, |_| Err(AppError::InternalError("boom".to_string())))
            .expect("reconciled");

        assert_eq!(result.questions.len(), 1);
        assert_eq!(result.shortfall, 1);
    }

    #[test]
    fn test_empty_result_is_an_error() {
        let result = reconcile(Vec::new(), 3, |_| Ok(Vec::new()));
        assert!(matches!(result, Err(AppError::EmptyResult(_))));
    }
}
