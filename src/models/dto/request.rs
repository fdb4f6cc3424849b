use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{
    DifficultyLevel, DifficultyMix, GenerationRequest, QuestionFilter, QuestionType,
};

fn default_num_questions() -> usize {
    10
}

fn default_question_types() -> Vec<QuestionType> {
    vec![QuestionType::Mcq, QuestionType::ShortAnswer]
}

fn default_easy() -> f64 {
    0.4
}

fn default_medium() -> f64 {
    0.4
}

fn default_hard() -> f64 {
    0.2
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct GenerateQuestionsRequestDto {
    #[validate(length(min = 1, message = "document_id is required"))]
    pub document_id: String,

    /// Restricts generation to these topics' descriptions.
    #[serde(default)]
    pub topic_ids: Option<Vec<String>>,

    #[serde(default = "default_num_questions")]
    #[validate(range(min = 1, max = 100))]
    pub num_questions: usize,

    #[serde(default = "default_question_types")]
    #[validate(length(min = 1, message = "At least one question type is required"))]
    pub question_types: Vec<QuestionType>,

    #[serde(default = "default_easy")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub difficulty_easy: f64,

    #[serde(default = "default_medium")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub difficulty_medium: f64,

    #[serde(default = "default_hard")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub difficulty_hard: f64,
}

impl GenerateQuestionsRequestDto {
    pub fn new(document_id: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            topic_ids: None,
            num_questions: default_num_questions(),
            question_types: default_question_types(),
            difficulty_easy: default_easy(),
            difficulty_medium: default_medium(),
            difficulty_hard: default_hard(),
        }
    }

    pub fn difficulty_mix(&self) -> DifficultyMix {
        DifficultyMix {
            easy: self.difficulty_easy,
            medium: self.difficulty_medium,
            hard: self.difficulty_hard,
        }
    }

    /// Non-empty topic ids, if the caller restricted generation to topics.
    pub fn requested_topics(&self) -> Option<&[String]> {
        self.topic_ids.as_deref().filter(|ids| !ids.is_empty())
    }

    pub fn to_generation_request(&self, source_text: impl Into<String>) -> GenerationRequest {
        GenerationRequest::new(
            source_text,
            self.num_questions,
            self.question_types.clone(),
        )
        .with_difficulty_mix(self.difficulty_mix())
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InsightsParams {
    #[validate(range(min = 1, max = 50))]
    pub num_topics: Option<usize>,
}

impl InsightsParams {
    pub fn num_topics(&self) -> usize {
        self.num_topics.unwrap_or(10)
    }
}

fn default_limit() -> i64 {
    100
}

/// Query string for listing stored questions.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ListQuestionsParams {
    #[serde(default)]
    pub skip: u64,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 1000))]
    pub limit: i64,
    pub question_type: Option<QuestionType>,
    pub difficulty: Option<DifficultyLevel>,
    pub document_id: Option<String>,
}

impl ListQuestionsParams {
    pub fn filter(&self) -> QuestionFilter {
        QuestionFilter {
            question_type: self.question_type,
            difficulty: self.difficulty,
            document_id: self.document_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_defaults_apply_when_fields_missing() {
        let request: GenerateQuestionsRequestDto =
            serde_json::from_str(r#"{ "document_id": "doc-1" }"#).expect("valid json");

        assert_eq!(request.num_questions, 10);
        assert_eq!(
            request.question_types,
            vec![QuestionType::Mcq, QuestionType::ShortAnswer]
        );
        assert_eq!(request.difficulty_mix(), DifficultyMix::default());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_question_types_parse_snake_case() {
        let request: GenerateQuestionsRequestDto = serde_json::from_str(
            r#"{ "document_id": "doc-1", "question_types": ["true_false", "fill_blank"] }"#,
        )
        .expect("valid json");

        assert_eq!(
            request.question_types,
            vec![QuestionType::TrueFalse, QuestionType::FillBlank]
        );
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let mut request = GenerateQuestionsRequestDto::new("doc-1");
        request.num_questions = 0;
        assert!(request.validate().is_err());

        let mut request = GenerateQuestionsRequestDto::new("doc-1");
        request.question_types.clear();
        assert!(request.validate().is_err());

        let mut request = GenerateQuestionsRequestDto::new("doc-1");
        request.difficulty_hard = 1.5;
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_empty_topic_list_means_whole_document() {
        let mut request = GenerateQuestionsRequestDto::new("doc-1");
        request.topic_ids = Some(Vec::new());
        assert!(request.requested_topics().is_none());
    }

    #[test]
    fn test_list_params_defaults_and_filter() {
        let params: ListQuestionsParams =
            serde_json::from_str(r#"{ "difficulty": "hard" }"#).expect("valid json");

        assert_eq!(params.skip, 0);
        assert_eq!(params.limit, 100);
        assert!(params.validate().is_ok());
        assert_eq!(
            params.filter(),
            QuestionFilter {
                difficulty: Some(DifficultyLevel::Hard),
                ..QuestionFilter::default()
            }
        );
    }

    #[test]
    fn test_list_params_reject_zero_limit() {
        let params: ListQuestionsParams =
            serde_json::from_str(r#"{ "limit": 0 }"#).expect("valid json");
        assert!(params.validate().is_err());
    }
}
