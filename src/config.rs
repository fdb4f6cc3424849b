use std::env;

use crate::services::question_generator::GeneratorSettings;

pub const DEFAULT_MIN_TEXT_LENGTH: usize = 100;

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub documents_collection: String,
    pub topics_collection: String,
    pub questions_collection: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub lexicon_path: Option<String>,
    pub min_text_length: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME").unwrap_or_else(|_| "autoq-local".to_string()),
            documents_collection: env::var("DOCUMENTS_COLLECTION")
                .unwrap_or_else(|_| "documents".to_string()),
            topics_collection: env::var("TOPICS_COLLECTION")
                .unwrap_or_else(|_| "topics".to_string()),
            questions_collection: env::var("QUESTIONS_COLLECTION")
                .unwrap_or_else(|_| "questions".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            lexicon_path: env::var("NLP_LEXICON_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty()),
            min_text_length: env::var("MIN_TEXT_LENGTH")
                .ok()
                .and_then(|n| n.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_MIN_TEXT_LENGTH),
        }
    }

    pub fn generator_settings(&self) -> GeneratorSettings {
        GeneratorSettings {
            min_text_length: self.min_text_length,
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "autoq-test".to_string(),
            documents_collection: "documents".to_string(),
            topics_collection: "topics".to_string(),
            questions_collection: "questions".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            lexicon_path: None,
            min_text_length: DEFAULT_MIN_TEXT_LENGTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env_with_defaults() {
        let config = Config::from_env();

        // Should use env vars if set, or fall back to defaults
        assert!(!config.mongo_conn_string.is_empty());
        assert!(!config.mongo_db_name.is_empty());
        assert!(config.min_text_length > 0);
    }

    #[test]
    fn test_test_config() {
        let config = Config::test_config();

        assert_eq!(config.mongo_db_name, "autoq-test");
        assert_eq!(config.questions_collection, "questions");
        assert!(config.lexicon_path.is_none());
    }

    #[test]
    fn test_generator_settings_follow_config() {
        let mut config = Config::test_config();
        config.min_text_length = 250;

        assert_eq!(config.generator_settings().min_text_length, 250);
    }
}
