use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::Topic};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TopicRepository: Send + Sync {
    /// Topics among `ids` that belong to `document_id`.
    async fn find_by_ids_for_document(&self, ids: &[String], document_id: &str)
        -> AppResult<Vec<Topic>>;
}

pub struct MongoTopicRepository {
    collection: Collection<Topic>,
}

impl MongoTopicRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for topics collection");

        let document_index = IndexModel::builder()
            .keys(doc! { "document_id": 1, "id": 1 })
            .build();

        self.collection.create_index(document_index).await?;

        log::info!("Successfully created indexes for topics collection");
        Ok(())
    }
}

#[async_trait]
impl TopicRepository for MongoTopicRepository {
    async fn find_by_ids_for_document(
        &self,
        ids: &[String],
        document_id: &str,
    ) -> AppResult<Vec<Topic>> {
        let filter = doc! { "id": { "$in": ids.to_vec() }, "document_id": document_id };
        let cursor = self.collection.find(filter).await?;
        let topics: Vec<Topic> = cursor.try_collect().await?;
        Ok(topics)
    }
}
