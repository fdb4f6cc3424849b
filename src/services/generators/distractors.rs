use rand::{seq::SliceRandom, Rng};

use crate::{
    constants::QuestionTemplates,
    errors::{AppError, AppResult},
};

const SHUFFLE_ATTEMPTS: usize = 8;

/// Wrong answers for `correct`: word shuffles when it has more than three
/// words, numbered placeholders otherwise or when shuffling keeps colliding.
pub fn distractors<R: Rng + ?Sized>(
    correct: &str,
    count: usize,
    templates: &QuestionTemplates,
    rng: &mut R,
) -> Vec<String> {
    let words: Vec<&str> = correct.split_whitespace().collect();
    let normalized = words.join(" ");
    let mut out: Vec<String> = Vec::with_capacity(count);

    for n in 1..=count {
        let shuffled = if words.len() > 3 {
            (0..SHUFFLE_ATTEMPTS).find_map(|_| {
                let mut candidate = words.clone();
                candidate.shuffle(rng);
                let candidate = candidate.join(" ");
                (candidate != normalized && candidate != correct && !out.contains(&candidate))
                    .then_some(candidate)
            })
        } else {
            None
        };

        let distractor = shuffled
            .unwrap_or_else(|| format!("{} {}", templates.distractor_placeholder, n));
        out.push(distractor);
    }

    out
}

/// The correct answer plus three distractors, randomly placed in slots A-D.
pub fn build_options<R: Rng + ?Sized>(
    correct: &str,
    templates: &QuestionTemplates,
    rng: &mut R,
) -> AppResult<[String; 4]> {
    let mut options = vec![correct.to_string()];
    options.extend(distractors(correct, 3, templates, rng));
    options.shuffle(rng);

    options
        .try_into()
        .map_err(|_| AppError::InternalError("Expected exactly four options".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::generators::test_support::rng;

    #[test]
    fn test_short_answers_get_numbered_placeholders() {
        let templates = QuestionTemplates::default();
        let result = distractors("Paris", 3, &templates, &mut rng());

        assert_eq!(
            result,
            vec![
                "Alternative definition 1",
                "Alternative definition 2",
                "Alternative definition 3"
            ]
        );
    }

    #[test]
    fn test_long_answers_get_distinct_shuffles() {
        let templates = QuestionTemplates::default();
        let correct = "a structure that stores ordered keys";
        let result = distractors(correct, 3, &templates, &mut rng());

        assert_eq!(result.len(), 3);
        for (i, d) in result.iter().enumerate() {
            assert_ne!(d, correct);
            assert!(!result[i + 1..].contains(d));
        }
    }

    #[test]
    fn test_options_hold_the_correct_answer_once() {
        let templates = QuestionTemplates::default();
        let correct = "a collection that follows last in first out order";

        for seed in 0..20u64 {
            let mut rng = <rand::rngs::StdRng as rand::SeedableRng>::seed_from_u64(seed);
            let options = build_options(correct, &templates, &mut rng).expect("four options");
            assert_eq!(options.iter().filter(|o| o.as_str() == correct).count(), 1);
        }
    }
}
