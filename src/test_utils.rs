#[cfg(test)]
pub mod fixtures {
    use std::sync::Arc;

    use crate::{
        models::domain::Document,
        nlp::{Lexicon, RuleBasedEngine},
        services::question_generator::{GeneratorSettings, QuestionGenerator},
    };

    /// Three definitions, five numeric facts and a few plain sentences.
    pub const SAMPLE_PASSAGE: &str = "A binary search tree is a data structure that keeps its keys in sorted order. \
        Hashing refers to the mapping of keys to positions in a table. \
        Amortized cost means the average cost of an operation over a long sequence of operations. \
        The first binary search trees were described in 1960 by several independent research groups. \
        A balanced tree with 1000000 keys needs only about 20 comparisons to find any single key. \
        Early hash tables were used in 1953 inside assemblers written for the IBM 701 computer. \
        Red black trees guarantee that the height of a tree stays below 2 times the logarithm of its size. \
        Modern databases store 500 million rows in indexes that combine trees with hash tables. \
        Engineers often compare these structures before they pick the right structure for a new system. \
        Each structure makes different trade offs between memory use, speed and simplicity of code.";

    pub fn engine() -> RuleBasedEngine {
        RuleBasedEngine::new(Lexicon::english()).expect("engine should build")
    }

    pub fn generator() -> QuestionGenerator {
        QuestionGenerator::new(Arc::new(engine()), GeneratorSettings::default())
            .expect("generator should build")
    }

    pub fn processed_document(id: &str) -> Document {
        Document {
            id: id.to_string(),
            filename: format!("{}.pdf", id),
            owner_id: "owner-1".to_string(),
            extracted_text: Some(SAMPLE_PASSAGE.to_string()),
            is_processed: true,
            created_at: None,
        }
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::nlp::TextAnalyzer;

    #[test]
    fn test_sample_passage_has_definitions_and_facts() {
        let analyzer =
            TextAnalyzer::new(std::sync::Arc::new(engine())).expect("analyzer should build");

        assert_eq!(analyzer.extract_definitions(SAMPLE_PASSAGE).len(), 3);
        assert_eq!(analyzer.extract_facts(SAMPLE_PASSAGE).len(), 5);
    }

    #[test]
    fn test_processed_document_fixture() {
        let document = processed_document("doc-7");
        assert!(document.is_processed);
        assert_eq!(document.filename, "doc-7.pdf");
    }
}
