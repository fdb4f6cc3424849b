pub mod difficulty;
pub mod fingerprint;
pub mod generators;
pub mod question_generator;
pub mod question_service;
pub mod reconciler;

pub use question_generator::{GeneratorSettings, QuestionGenerator};
pub use question_service::QuestionService;
