pub mod analyzer;
pub mod engine;
pub mod lexicon;
pub mod parse;

pub use analyzer::TextAnalyzer;
pub use engine::{LanguageEngine, RuleBasedEngine};
pub use lexicon::Lexicon;
