use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::services::fingerprint::ContentFingerprint;

use super::question::{DifficultyLevel, GeneratedQuestion, QuestionType};

/// An uploaded source document. Text extraction happens upstream; only
/// processed documents carry usable `extracted_text`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Document {
    pub id: String,
    pub filename: String,
    pub owner_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_text: Option<String>,
    pub is_processed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Topic {
    pub id: String,
    pub name: String,
    pub document_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A generated question as persisted, keyed by its content fingerprint.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct StoredQuestion {
    pub id: String,
    pub document_id: String,
    #[serde(flatten)]
    pub question: GeneratedQuestion,
    pub hash_signature: ContentFingerprint,
    pub is_duplicate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Optional constraints for listing stored questions; unset fields match all.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuestionFilter {
    pub question_type: Option<QuestionType>,
    pub difficulty: Option<DifficultyLevel>,
    pub document_id: Option<String>,
}

impl QuestionFilter {
    pub fn matches(&self, stored: &StoredQuestion) -> bool {
        self.question_type
            .map_or(true, |t| stored.question.question_type() == t)
            && self
                .difficulty
                .map_or(true, |d| stored.question.difficulty == d)
            && self
                .document_id
                .as_ref()
                .map_or(true, |id| stored.document_id == *id)
    }
}
