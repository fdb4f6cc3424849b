pub mod analysis;
pub mod document;
pub mod generation;
pub mod question;
pub use analysis::{AnalyzedView, Definition, Entity, EntityLabel, Relationship, TextComplexity};
pub use document::{Document, QuestionFilter, StoredQuestion, Topic};
pub use generation::{GenerationOutput, GenerationReport, GenerationRequest, TypeOutcome};
pub use question::{
    DifficultyLevel, DifficultyMix, GeneratedQuestion, QuestionFormat, QuestionType, FALSE_OPTION,
    TRUE_OPTION,
};
