use std::collections::HashSet;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::{FindOptions, IndexOptions},
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{QuestionFilter, StoredQuestion},
    services::fingerprint::ContentFingerprint,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn insert_many(&self, questions: Vec<StoredQuestion>) -> AppResult<Vec<StoredQuestion>>;

    /// The subset of `fingerprints` already held by stored questions.
    async fn existing_fingerprints(
        &self,
        fingerprints: &[ContentFingerprint],
    ) -> AppResult<HashSet<ContentFingerprint>>;

    async fn find(
        &self,
        filter: &QuestionFilter,
        skip: u64,
        limit: i64,
    ) -> AppResult<Vec<StoredQuestion>>;

    async fn find_by_id(&self, id: &str) -> AppResult<Option<StoredQuestion>>;

    /// Returns false when no question had this id.
    async fn delete(&self, id: &str) -> AppResult<bool>;
}

pub struct MongoQuestionRepository {
    collection: Collection<StoredQuestion>,
}

impl MongoQuestionRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for questions collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();
        // not unique: duplicates are stored and flagged
        let hash_index = IndexModel::builder()
            .keys(doc! { "hash_signature": 1 })
            .options(
                IndexOptions::builder()
                    .name("hash_signature".to_string())
                    .build(),
            )
            .build();

        let document_index = IndexModel::builder()
            .keys(doc! { "document_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("document_id".to_string())
                    .build(),
            )
            .build();

        self.collection
            .create_indexes([id_index, hash_index, document_index])
            .await?;

        log::info!("Successfully created indexes for questions collection");
        Ok(())
    }
}

#[async_trait]
impl QuestionRepository for MongoQuestionRepository {
    async fn insert_many(&self, questions: Vec<StoredQuestion>) -> AppResult<Vec<StoredQuestion>> {
        if questions.is_empty() {
            return Ok(questions);
        }
        self.collection.insert_many(&questions).await?;
        Ok(questions)
    }

    async fn existing_fingerprints(
        &self,
        fingerprints: &[ContentFingerprint],
    ) -> AppResult<HashSet<ContentFingerprint>> {
        if fingerprints.is_empty() {
            return Ok(HashSet::new());
        }

        let hashes: Vec<&str> = fingerprints.iter().map(ContentFingerprint::as_str).collect();
        let cursor = self
            .collection
            .find(doc! { "hash_signature": { "$in": hashes } })
            .await?;
        let found: Vec<StoredQuestion> = cursor.try_collect().await?;

        Ok(found.into_iter().map(|q| q.hash_signature).collect())
    }

    async fn find(
        &self,
        filter: &QuestionFilter,
        skip: u64,
        limit: i64,
    ) -> AppResult<Vec<StoredQuestion>> {
        let find_options = FindOptions::builder()
            .skip(Some(skip))
            .limit(Some(limit))
            .build();

        let cursor = self
            .collection
            .find(filter_document(filter))
            .with_options(find_options)
            .await?;
        let items: Vec<StoredQuestion> = cursor.try_collect().await?;
        Ok(items)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<StoredQuestion>> {
        let question = self.collection.find_one(doc! { "id": id }).await?;
        Ok(question)
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}

fn filter_document(filter: &QuestionFilter) -> Document {
    let mut query = Document::new();
    if let Some(question_type) = filter.question_type {
        query.insert("question_type", question_type.to_string());
    }
    if let Some(difficulty) = filter.difficulty {
        query.insert("difficulty", difficulty.to_string());
    }
    if let Some(document_id) = &filter.document_id {
        query.insert("document_id", document_id.as_str());
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::{DifficultyLevel, QuestionType};

    #[test]
    fn test_empty_filter_selects_all() {
        assert!(filter_document(&QuestionFilter::default()).is_empty());
    }

    #[test]
    fn test_filter_uses_stored_field_names() {
        let filter = QuestionFilter {
            question_type: Some(QuestionType::FillBlank),
            difficulty: Some(DifficultyLevel::Hard),
            document_id: Some("doc-1".to_string()),
        };

        assert_eq!(
            filter_document(&filter),
            doc! {
                "question_type": "fill_blank",
                "difficulty": "hard",
                "document_id": "doc-1",
            }
        );
    }
}
