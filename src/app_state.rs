use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    nlp::RuleBasedEngine,
    repositories::{MongoDocumentRepository, MongoQuestionRepository, MongoTopicRepository},
    services::{QuestionGenerator, QuestionService},
};

#[derive(Clone)]
pub struct AppState {
    pub question_service: Arc<QuestionService>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Builds the analysis engine before touching the database, so a bad
    /// lexicon stops startup before any connection is made.
    pub async fn new(config: Config) -> AppResult<Self> {
        let engine = RuleBasedEngine::from_config(&config)?;
        let generator = Arc::new(QuestionGenerator::new(
            Arc::new(engine),
            config.generator_settings(),
        )?);
        log::info!("Language engine ready");

        let db = Database::connect(&config).await?;

        let document_repository = Arc::new(MongoDocumentRepository::new(
            &db,
            &config.documents_collection,
        ));
        document_repository.ensure_indexes().await?;

        let topic_repository = Arc::new(MongoTopicRepository::new(&db, &config.topics_collection));
        topic_repository.ensure_indexes().await?;

        let question_repository = Arc::new(MongoQuestionRepository::new(
            &db,
            &config.questions_collection,
        ));
        question_repository.ensure_indexes().await?;

        let question_service = Arc::new(QuestionService::new(
            generator,
            document_repository,
            topic_repository,
            question_repository,
        ));

        Ok(Self::from_parts(question_service, config))
    }

    pub fn from_parts(question_service: Arc<QuestionService>, config: Config) -> Self {
        Self {
            question_service,
            config: Arc::new(config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_app_state_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AppState>();
    }
}
