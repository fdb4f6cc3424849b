use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::Document};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Document>>;
}

pub struct MongoDocumentRepository {
    collection: Collection<Document>,
}

impl MongoDocumentRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for documents collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;

        log::info!("Successfully created indexes for documents collection");
        Ok(())
    }
}

#[async_trait]
impl DocumentRepository for MongoDocumentRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Document>> {
        let document = self.collection.find_one(doc! { "id": id }).await?;
        Ok(document)
    }
}
