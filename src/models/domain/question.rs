use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

pub const TRUE_OPTION: &str = "True";
pub const FALSE_OPTION: &str = "False";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Mcq,
    TrueFalse,
    ShortAnswer,
    LongAnswer,
    FillBlank,
    Programming,
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QuestionType::Mcq => "mcq",
            QuestionType::TrueFalse => "true_false",
            QuestionType::ShortAnswer => "short_answer",
            QuestionType::LongAnswer => "long_answer",
            QuestionType::FillBlank => "fill_blank",
            QuestionType::Programming => "programming",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyLevel {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DifficultyLevel::Easy => "easy",
            DifficultyLevel::Medium => "medium",
            DifficultyLevel::Hard => "hard",
        };
        f.write_str(name)
    }
}

/// Requested proportions of each difficulty. Weights need not sum to 1.0.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct DifficultyMix {
    pub easy: f64,
    pub medium: f64,
    pub hard: f64,
}

impl Default for DifficultyMix {
    fn default() -> Self {
        Self {
            easy: 0.4,
            medium: 0.4,
            hard: 0.2,
        }
    }
}

/// Shape of a question, tagged by type. Only multiple choice carries its own
/// option list; true/false always offers the fixed pair.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "question_type", rename_all = "snake_case")]
pub enum QuestionFormat {
    Mcq { options: [String; 4] },
    TrueFalse,
    ShortAnswer,
    LongAnswer,
    FillBlank,
    Programming,
}

impl QuestionFormat {
    pub fn question_type(&self) -> QuestionType {
        match self {
            QuestionFormat::Mcq { .. } => QuestionType::Mcq,
            QuestionFormat::TrueFalse => QuestionType::TrueFalse,
            QuestionFormat::ShortAnswer => QuestionType::ShortAnswer,
            QuestionFormat::LongAnswer => QuestionType::LongAnswer,
            QuestionFormat::FillBlank => QuestionType::FillBlank,
            QuestionFormat::Programming => QuestionType::Programming,
        }
    }

    pub fn options(&self) -> Vec<&str> {
        match self {
            QuestionFormat::Mcq { options } => options.iter().map(String::as_str).collect(),
            QuestionFormat::TrueFalse => vec![TRUE_OPTION, FALSE_OPTION],
            _ => Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct GeneratedQuestion {
    pub question_text: String,
    #[serde(flatten)]
    pub format: QuestionFormat,
    #[serde(default)]
    pub difficulty: DifficultyLevel,
    pub correct_answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    pub suggested_marks: f64,
}

impl GeneratedQuestion {
    /// Builds a question, rejecting records whose fields disagree with the
    /// format. Difficulty starts at the default and is stamped later.
    pub fn new(
        question_text: impl Into<String>,
        format: QuestionFormat,
        correct_answer: impl Into<String>,
        explanation: Option<String>,
        suggested_marks: f64,
    ) -> AppResult<Self> {
        let question = Self {
            question_text: question_text.into(),
            format,
            difficulty: DifficultyLevel::default(),
            correct_answer: correct_answer.into(),
            explanation,
            suggested_marks,
        };
        question.validate()?;
        Ok(question)
    }

    pub fn question_type(&self) -> QuestionType {
        self.format.question_type()
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.question_text.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Question text cannot be empty".to_string(),
            ));
        }
        if self.correct_answer.trim().is_empty() {
            return Err(AppError::ValidationError(format!(
                "Question '{}' has no correct answer",
                self.question_text
            )));
        }
        if !self.suggested_marks.is_finite() || self.suggested_marks <= 0.0 {
            return Err(AppError::ValidationError(format!(
                "Suggested marks must be positive, got {}",
                self.suggested_marks
            )));
        }

        match &self.format {
            QuestionFormat::Mcq { options } => {
                if options.iter().any(|o| o.trim().is_empty()) {
                    return Err(AppError::ValidationError(
                        "Multiple choice options cannot be empty".to_string(),
                    ));
                }
                for (i, option) in options.iter().enumerate() {
                    if options[i + 1..].contains(option) {
                        return Err(AppError::ValidationError(format!(
                            "Duplicate multiple choice option '{}'",
                            option
                        )));
                    }
                }
                if !options.contains(&self.correct_answer) {
                    return Err(AppError::ValidationError(
                        "Correct answer must be one of the options".to_string(),
                    ));
                }
            }
            QuestionFormat::TrueFalse => {
                if self.correct_answer != TRUE_OPTION && self.correct_answer != FALSE_OPTION {
                    return Err(AppError::ValidationError(format!(
                        "True/false answer must be '{}' or '{}'",
                        TRUE_OPTION, FALSE_OPTION
                    )));
                }
            }
            _ => {}
        }

        Ok(())
    }
}
