use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{
    DifficultyLevel, QuestionType, StoredQuestion, TextComplexity,
};

#[derive(Debug, Clone, Serialize)]
pub struct QuestionResponseDto {
    pub id: String,
    pub document_id: String,
    pub question_text: String,
    pub question_type: QuestionType,
    pub difficulty: DifficultyLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option_a: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option_b: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option_c: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option_d: Option<String>,
    pub correct_answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    pub suggested_marks: f64,
    pub hash_signature: String,
    pub is_duplicate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<StoredQuestion> for QuestionResponseDto {
    fn from(stored: StoredQuestion) -> Self {
        let mut options = stored
            .question
            .format
            .options()
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>()
            .into_iter();
        let question = stored.question;

        QuestionResponseDto {
            id: stored.id,
            document_id: stored.document_id,
            question_type: question.question_type(),
            question_text: question.question_text,
            difficulty: question.difficulty,
            option_a: options.next(),
            option_b: options.next(),
            option_c: options.next(),
            option_d: options.next(),
            correct_answer: question.correct_answer,
            explanation: question.explanation,
            suggested_marks: question.suggested_marks,
            hash_signature: stored.hash_signature.to_string(),
            is_duplicate: stored.is_duplicate,
            created_at: stored.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentInsightsDto {
    pub document_id: String,
    pub topics: Vec<String>,
    pub complexity: TextComplexity,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::domain::{GeneratedQuestion, QuestionFormat},
        services::fingerprint::fingerprint,
    };

    fn stored(question: GeneratedQuestion) -> StoredQuestion {
        StoredQuestion {
            id: "q-1".to_string(),
            document_id: "doc-1".to_string(),
            hash_signature: fingerprint(&question.question_text),
            question,
            is_duplicate: false,
            created_at: Some(Utc::now()),
        }
    }

    #[test]
    fn test_mcq_options_flatten_to_slots() {
        let question = GeneratedQuestion::new(
            "What is a queue?",
            QuestionFormat::Mcq {
                options: [
                    "first in first out list".to_string(),
                    "a tree".to_string(),
                    "a heap".to_string(),
                    "a graph".to_string(),
                ],
            },
            "first in first out list",
            None,
            1.0,
        )
        .expect("valid question");

        let dto: QuestionResponseDto = stored(question).into();
        assert_eq!(dto.question_type, QuestionType::Mcq);
        assert_eq!(dto.option_a.as_deref(), Some("first in first out list"));
        assert_eq!(dto.option_d.as_deref(), Some("a graph"));
    }

    #[test]
    fn test_true_false_exposes_two_options() {
        let question = GeneratedQuestion::new(
            "True or False: Water boils at 100 degrees.",
            QuestionFormat::TrueFalse,
            "True",
            None,
            0.5,
        )
        .expect("valid question");

        let dto: QuestionResponseDto = stored(question).into();
        assert_eq!(dto.option_a.as_deref(), Some("True"));
        assert_eq!(dto.option_b.as_deref(), Some("False"));
        assert!(dto.option_c.is_none());

        let json = serde_json::to_value(&dto).expect("serializable");
        assert!(json.get("option_c").is_none());
        assert_eq!(json["question_type"], "true_false");
    }
}
