use rand::{seq::SliceRandom, Rng};

use crate::models::domain::{DifficultyLevel, DifficultyMix, GeneratedQuestion};

/// Label counts for `total` questions: easy and medium are floored, hard
/// takes whatever is left.
pub fn allocate(total: usize, mix: &DifficultyMix) -> (usize, usize, usize) {
    let easy = floor_share(total, mix.easy).min(total);
    let medium = floor_share(total, mix.medium).min(total - easy);
    (easy, medium, total - easy - medium)
}

/// Stamps every question with a difficulty, in allocated proportions and
/// random positions.
pub fn assign<R: Rng + ?Sized>(questions: &mut [GeneratedQuestion], mix: &DifficultyMix, rng: &mut R) {
    let (easy, medium, hard) = allocate(questions.len(), mix);

    let mut labels: Vec<DifficultyLevel> = std::iter::repeat(DifficultyLevel::Easy)
        .take(easy)
        .chain(std::iter::repeat(DifficultyLevel::Medium).take(medium))
        .chain(std::iter::repeat(DifficultyLevel::Hard).take(hard))
        .collect();
    labels.shuffle(rng);

    for (i, question) in questions.iter_mut().enumerate() {
        question.difficulty = labels.get(i).copied().unwrap_or(DifficultyLevel::Medium);
    }
}

fn floor_share(total: usize, weight: f64) -> usize {
    // negative and NaN weights saturate to zero
    (total as f64 * weight).floor() as usize
}
