pub mod document_repository;
pub mod question_repository;
pub mod topic_repository;

pub use document_repository::{DocumentRepository, MongoDocumentRepository};
pub use question_repository::{MongoQuestionRepository, QuestionRepository};
pub use topic_repository::{MongoTopicRepository, TopicRepository};
