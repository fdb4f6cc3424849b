use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityLabel {
    Person,
    Org,
    Gpe,
    Date,
    Money,
    Percent,
    Quantity,
    Cardinal,
    Misc,
}

impl EntityLabel {
    /// Labels that anchor a sentence as a measurable fact.
    pub fn is_measure(&self) -> bool {
        matches!(
            self,
            EntityLabel::Quantity | EntityLabel::Percent | EntityLabel::Money
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Definition {
    pub term: String,
    pub definition: String,
    pub source_sentence: String,
}

/// A named span with character offsets into the analyzed text.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
    pub start_offset: usize,
    pub end_offset: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Relationship {
    pub subject: String,
    pub verb: String,
    pub object: String,
    pub source_sentence: String,
}

/// Everything the synthesizer consumes, derived fresh from one source text.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct AnalyzedView {
    pub definitions: Vec<Definition>,
    pub facts: Vec<String>,
    pub key_sentences: Vec<String>,
    pub entities: Vec<Entity>,
    pub relationships: Vec<Relationship>,
}

impl AnalyzedView {
    pub fn has_usable_content(&self) -> bool {
        !self.definitions.is_empty() || !self.facts.is_empty() || !self.key_sentences.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct TextComplexity {
    pub avg_sentence_length: f64,
    pub avg_word_length: f64,
    pub complex_word_ratio: f64,
    pub total_sentences: usize,
    pub total_words: usize,
}
