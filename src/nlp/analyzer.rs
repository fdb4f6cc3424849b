use std::collections::HashMap;
use std::sync::Arc;

use regex::Regex;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{
        AnalyzedView, Definition, Entity, EntityLabel, Relationship, TextComplexity,
    },
};

use super::engine::LanguageEngine;
use super::parse::{Parse, Sentence};

/// Verbs that make a sentence good question material.
pub const IMPORTANT_VERBS: &[&str] = &[
    "is", "are", "was", "were", "define", "explain", "describe", "calculate", "determine",
    "show", "prove", "demonstrate",
];

/// Tried in order; the first match in a sentence wins.
const DEFINITION_PATTERNS: &[&str] = &[
    r"(?i)(.+?)\s+is\s+(?:a|an|the)\s+(.+?)[.,]",
    r"(?i)(.+?)\s+refers to\s+(.+?)[.,]",
    r"(?i)(.+?)\s+means\s+(.+?)[.,]",
    r"(?i)(.+?)\s+can be defined as\s+(.+?)[.,]",
];

const MAX_KEY_SENTENCES: usize = 20;
const MIN_FACT_WORDS: usize = 10;
const MAX_FACT_WORDS: usize = 40;

pub struct TextAnalyzer {
    engine: Arc<dyn LanguageEngine>,
    definition_patterns: Vec<Regex>,
}

impl TextAnalyzer {
    pub fn new(engine: Arc<dyn LanguageEngine>) -> AppResult<Self> {
        let definition_patterns = DEFINITION_PATTERNS
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| {
                AppError::EngineUnavailable(format!("definition pattern failed to compile: {}", e))
            })?;

        Ok(Self {
            engine,
            definition_patterns,
        })
    }

    pub fn engine(&self) -> &dyn LanguageEngine {
        self.engine.as_ref()
    }

    /// Derives every view from a single parse, capped by the request size.
    pub fn analyze(&self, text: &str, num_questions: usize) -> AnalyzedView {
        let parse = self.engine.parse(text);
        let cap = num_questions.saturating_mul(2);

        let mut definitions = self.definitions_in(&parse);
        definitions.truncate(cap);
        let mut facts = facts_in(&parse);
        facts.truncate(cap);
        let mut entities = entities_in(&parse);
        entities.truncate(cap);
        let mut relationships = relationships_in(&parse);
        relationships.truncate(num_questions);

        let view = AnalyzedView {
            definitions,
            facts,
            key_sentences: key_sentences_in(&parse, cap.min(MAX_KEY_SENTENCES)),
            entities,
            relationships,
        };

        log::debug!(
            "Analyzed {} sentences: {} definitions, {} facts, {} key sentences, {} entities, {} relationships",
            parse.sentences.len(),
            view.definitions.len(),
            view.facts.len(),
            view.key_sentences.len(),
            view.entities.len(),
            view.relationships.len()
        );

        view
    }

    /// Suitability of one sentence as question material; zero excludes it.
    pub fn score_sentence(&self, sentence: &str) -> f64 {
        score(&self.engine.parse(sentence).as_sentence())
    }

    pub fn extract_key_sentences(&self, text: &str, top_n: usize) -> Vec<String> {
        key_sentences_in(&self.engine.parse(text), top_n)
    }

    pub fn extract_definitions(&self, text: &str) -> Vec<Definition> {
        self.definitions_in(&self.engine.parse(text))
    }

    pub fn extract_facts(&self, text: &str) -> Vec<String> {
        facts_in(&self.engine.parse(text))
    }

    pub fn extract_entities(&self, text: &str) -> Vec<Entity> {
        entities_in(&self.engine.parse(text))
    }

    pub fn extract_relationships(&self, text: &str) -> Vec<Relationship> {
        relationships_in(&self.engine.parse(text))
    }

    /// Distinct multi-word noun phrases in order of first appearance.
    pub fn noun_phrases(&self, text: &str) -> Vec<String> {
        let mut seen = Vec::new();
        for phrase in noun_phrases_in(&self.engine.parse(text)) {
            if !seen.contains(&phrase) {
                seen.push(phrase);
            }
        }
        seen
    }

    /// Most frequent noun phrases first; ties keep first-seen order.
    pub fn identify_topics(&self, text: &str, num_topics: usize) -> Vec<String> {
        let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
        let mut surfaces: Vec<String> = Vec::new();

        for phrase in noun_phrases_in(&self.engine.parse(text)) {
            let key = phrase.to_lowercase();
            let entry = counts.entry(key).or_insert_with(|| {
                surfaces.push(phrase.clone());
                (0, surfaces.len() - 1)
            });
            entry.0 += 1;
        }

        let mut ranked: Vec<(usize, usize)> = counts.into_values().collect();
        ranked.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        ranked
            .into_iter()
            .take(num_topics)
            .map(|(_, index)| surfaces[index].clone())
            .collect()
    }

    pub fn text_complexity(&self, text: &str) -> TextComplexity {
        let parse = self.engine.parse(text);
        let words: Vec<&str> = parse
            .tokens
            .iter()
            .filter(|t| t.is_word())
            .map(|t| t.text.as_str())
            .collect();
        let total_sentences = parse.sentences.len();
        let total_words = words.len();

        if total_words == 0 {
            return TextComplexity {
                total_sentences,
                ..TextComplexity::default()
            };
        }

        let char_total: usize = words.iter().map(|w| w.chars().count()).sum();
        let complex = words.iter().filter(|w| w.chars().count() > 6).count();

        TextComplexity {
            avg_sentence_length: total_words as f64 / total_sentences.max(1) as f64,
            avg_word_length: char_total as f64 / total_words as f64,
            complex_word_ratio: complex as f64 / total_words as f64,
            total_sentences,
            total_words,
        }
    }

    fn definitions_in(&self, parse: &Parse) -> Vec<Definition> {
        parse
            .sentences()
            .filter_map(|sentence| {
                let text = sentence.text();
                let captures = self
                    .definition_patterns
                    .iter()
                    .find_map(|pattern| pattern.captures(&text))?;
                let term = captures.get(1)?.as_str().trim().to_string();
                let definition = captures.get(2)?.as_str().trim().to_string();
                if term.is_empty() || definition.is_empty() {
                    return None;
                }
                Some(Definition {
                    term,
                    definition,
                    source_sentence: text.clone(),
                })
            })
            .collect()
    }
}

fn score(sentence: &Sentence<'_>) -> f64 {
    let tokens = sentence.tokens();
    let words = tokens.iter().filter(|t| t.is_word()).count();

    let mut score = if (10..=30).contains(&words) {
        2.0
    } else if (5..10).contains(&words) || (31..=50).contains(&words) {
        1.0
    } else {
        return 0.0;
    };

    score += 0.5 * sentence.entities().count() as f64;
    score += tokens
        .iter()
        .filter(|t| {
            t.pos.is_verbal()
                && (IMPORTANT_VERBS.contains(&t.lemma.as_str())
                    || IMPORTANT_VERBS.contains(&t.lower.as_str()))
        })
        .count() as f64;
    if tokens.iter().any(|t| t.like_num) {
        score += 0.5;
    }

    score
}

fn key_sentences_in(parse: &Parse, top_n: usize) -> Vec<String> {
    let mut scored: Vec<(String, f64)> = parse
        .sentences()
        .map(|sentence| (sentence.text(), score(&sentence)))
        .filter(|(_, score)| *score > 0.0)
        .collect();

    // stable: equal scores keep document order
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.into_iter().take(top_n).map(|(text, _)| text).collect()
}

fn facts_in(parse: &Parse) -> Vec<String> {
    parse
        .sentences()
        .filter(|sentence| {
            let has_number = sentence.tokens().iter().any(|t| t.like_num);
            let anchored = sentence
                .entities()
                .any(|e| e.label == EntityLabel::Date || e.label.is_measure());
            (has_number || anchored)
                && (MIN_FACT_WORDS..=MAX_FACT_WORDS).contains(&sentence.word_count())
        })
        .map(|sentence| sentence.text())
        .collect()
}

fn entities_in(parse: &Parse) -> Vec<Entity> {
    parse
        .entities
        .iter()
        .map(|e| Entity {
            text: parse.entity_text(e).to_string(),
            label: e.label,
            start_offset: parse.char_offset(e.start),
            end_offset: parse.char_offset(e.end),
        })
        .collect()
}

fn relationships_in(parse: &Parse) -> Vec<Relationship> {
    parse
        .sentences()
        .filter_map(|sentence| {
            let triple = sentence.triple()?;
            Some(Relationship {
                subject: triple.subject,
                verb: triple.verb,
                object: triple.object,
                source_sentence: sentence.text(),
            })
        })
        .collect()
}

fn noun_phrases_in(parse: &Parse) -> Vec<String> {
    parse
        .sentences()
        .flat_map(|sentence| sentence.noun_chunks())
        .filter(|chunk| chunk.word_count >= 2 && chunk.text.chars().count() > 5)
        .map(|chunk| chunk.text)
        .collect()
}
