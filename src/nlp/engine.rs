use std::ops::Range;

use regex::Regex;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    models::domain::EntityLabel,
};

use super::lexicon::{is_currency_word, is_month, is_number_word, is_org_keyword, Lexicon};
use super::parse::{EntitySpan, Parse, Pos, SentenceSpan, Token};

const TOKEN_PATTERN: &str =
    r"\d+(?:[.,]\d+)*(?:[A-Za-z]+)?|[\p{L}\p{N}]+(?:['’\-.][\p{L}\p{N}]+)*|\S";

const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "ive", "able", "ible", "less", "ical", "ish"];
const LOCATION_PREPOSITIONS: &[&str] = &["in", "at", "from", "near", "across", "throughout"];
const SCALE_WORDS: &[&str] = &["thousand", "million", "billion", "trillion"];

/// Text-analysis capability the analyzer runs on. Implementations are shared
/// read-only between requests.
pub trait LanguageEngine: Send + Sync {
    fn parse(&self, text: &str) -> Parse;
}

pub struct RuleBasedEngine {
    lexicon: Lexicon,
    token_pattern: Regex,
}

impl RuleBasedEngine {
    pub fn new(lexicon: Lexicon) -> AppResult<Self> {
        let token_pattern = Regex::new(TOKEN_PATTERN).map_err(|e| {
            AppError::EngineUnavailable(format!("tokenizer pattern failed to compile: {}", e))
        })?;

        Ok(Self {
            lexicon,
            token_pattern,
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        let lexicon = match &config.lexicon_path {
            Some(path) => Lexicon::load(path)?,
            None => Lexicon::english(),
        };
        Self::new(lexicon)
    }

    fn segment(&self, text: &str, raw: &[(usize, usize)]) -> Vec<Range<usize>> {
        let word = |i: usize| &text[raw[i].0..raw[i].1];
        let mut ranges = Vec::new();
        let mut first = 0;
        let mut i = 0;

        while i < raw.len() {
            let mut end = i + 1;
            let boundary = if is_terminal(word(i)) && !self.follows_abbreviation(text, raw, i) {
                while end < raw.len() && is_closer(word(end)) {
                    end += 1;
                }
                end == raw.len() || opens_sentence(word(end))
            } else {
                end < raw.len() && text[raw[i].1..raw[end].0].matches('\n').count() >= 2
            };

            if boundary || end == raw.len() {
                ranges.push(first..end);
                first = end;
            }
            i = end;
        }

        ranges
    }

    fn follows_abbreviation(&self, text: &str, raw: &[(usize, usize)], i: usize) -> bool {
        if i == 0 || raw[i - 1].1 != raw[i].0 {
            return false;
        }
        let previous = &text[raw[i - 1].0..raw[i - 1].1];
        let mut chars = previous.chars();
        let single_initial = matches!((chars.next(), chars.next()), (Some(c), None) if c.is_uppercase());
        single_initial || self.lexicon.is_abbreviation(&previous.to_lowercase())
    }

    fn tag(
        &self,
        word: &str,
        lower: &str,
        previous: Option<&Token>,
        next: Option<&str>,
        sentence_initial: bool,
    ) -> (Pos, String) {
        if is_like_num(word, lower) {
            return (Pos::Numeral, lower.to_string());
        }
        if !word.chars().any(char::is_alphanumeric) {
            let pos = if is_symbol(word) {
                Pos::Symbol
            } else {
                Pos::Punctuation
            };
            return (pos, lower.to_string());
        }

        let capitalized = word.chars().next().is_some_and(char::is_uppercase);
        if capitalized && is_month(lower) {
            return (Pos::ProperNoun, lower.to_string());
        }
        if let Some(tagged) = self.lexicon.closed_class(lower) {
            return tagged;
        }
        if capitalized {
            let next_capitalized = next.is_some_and(|n| {
                n.chars().next().is_some_and(char::is_uppercase)
                    && !self.lexicon.is_stopword(&n.to_lowercase())
            });
            if is_acronym(word) || !sentence_initial || next_capitalized {
                return (Pos::ProperNoun, word.to_string());
            }
        }

        let after_modifier = previous.is_some_and(|p| {
            matches!(p.pos, Pos::Determiner | Pos::Adjective | Pos::Numeral)
        });
        let after_aux = previous.is_some_and(|p| p.pos == Pos::Aux);

        if let Some(lemma) = self.lexicon.verb_lemma(lower) {
            if after_modifier {
                return (Pos::Noun, lower.to_string());
            }
            return (Pos::Verb, lemma.to_string());
        }
        if lower.len() > 4 && lower.ends_with("ly") {
            return (Pos::Adverb, lower.to_string());
        }
        if ADJECTIVE_SUFFIXES.iter().any(|s| lower.ends_with(s)) && lower.len() > 5 {
            return (Pos::Adjective, lower.to_string());
        }
        if lower.len() > 4 && lower.ends_with("ed") {
            let pos = if after_modifier {
                Pos::Adjective
            } else {
                Pos::Verb
            };
            return (pos, lower[..lower.len() - 2].to_string());
        }
        if lower.len() > 5 && lower.ends_with("ing") && after_aux {
            return (Pos::Verb, lower[..lower.len() - 3].to_string());
        }

        (Pos::Noun, lower.to_string())
    }

    fn recognize_entities(&self, tokens: &[Token], sentence: Range<usize>) -> Vec<EntitySpan> {
        let mut entities = Vec::new();
        let mut i = sentence.start;

        while i < sentence.end {
            if let Some((label, len)) = self.match_measure(tokens, i, sentence.end) {
                entities.push(span(tokens, label, i..i + len));
                i += len;
                continue;
            }

            if tokens[i].pos == Pos::ProperNoun {
                let mut j = i + 1;
                loop {
                    if j < sentence.end && tokens[j].pos == Pos::ProperNoun && !is_month(&tokens[j].lower) {
                        j += 1;
                    } else if j + 1 < sentence.end
                        && tokens[j].lower == "of"
                        && tokens[j + 1].pos == Pos::ProperNoun
                    {
                        j += 2;
                    } else {
                        break;
                    }
                }
                let label = self.proper_noun_label(tokens, i..j);
                entities.push(span(tokens, label, i..j));
                i = j;
                continue;
            }

            i += 1;
        }

        entities
    }

    /// Dates, money, percentages, quantities and bare numbers starting at `i`.
    fn match_measure(&self, tokens: &[Token], i: usize, end: usize) -> Option<(EntityLabel, usize)> {
        let token = &tokens[i];
        let next = tokens.get(i + 1).filter(|_| i + 1 < end);

        if matches!(token.text.as_str(), "$" | "€" | "£") {
            if !next.is_some_and(|n| n.like_num) {
                return None;
            }
            let scaled = tokens
                .get(i + 2)
                .filter(|_| i + 2 < end)
                .is_some_and(|t| SCALE_WORDS.contains(&t.lower.as_str()));
            return Some((EntityLabel::Money, if scaled { 3 } else { 2 }));
        }

        if token.pos == Pos::ProperNoun && is_month(&token.lower) {
            let mut len = 1;
            if next.is_some_and(|n| n.like_num) {
                len += 1;
                let comma = tokens.get(i + 2).filter(|_| i + 2 < end);
                let year = tokens.get(i + 3).filter(|_| i + 3 < end);
                if comma.is_some_and(|c| c.text == ",") && year.is_some_and(|y| is_year(&y.text)) {
                    len += 2;
                }
            }
            return Some((EntityLabel::Date, len));
        }

        if !token.like_num || !token.text.starts_with(|c: char| c.is_ascii_digit()) {
            return None;
        }

        if let Some(next) = next {
            if is_ordinal(&token.lower) && next.lower == "century" {
                return Some((EntityLabel::Date, 2));
            }
            if next.text == "%" || next.lower == "percent" {
                return Some((EntityLabel::Percent, 2));
            }
            if is_currency_word(&next.lower) {
                return Some((EntityLabel::Money, 2));
            }
            if self.lexicon.is_unit(&next.lower) {
                return Some((EntityLabel::Quantity, 2));
            }
            if next.pos == Pos::ProperNoun && is_month(&next.lower) {
                let year = tokens.get(i + 2).filter(|_| i + 2 < end);
                let len = if year.is_some_and(|y| is_year(&y.text)) { 3 } else { 2 };
                return Some((EntityLabel::Date, len));
            }
        }

        if is_year(&token.text) || is_decade(&token.text) {
            return Some((EntityLabel::Date, 1));
        }

        Some((EntityLabel::Cardinal, 1))
    }

    fn proper_noun_label(&self, tokens: &[Token], run: Range<usize>) -> EntityLabel {
        if tokens[run.clone()].iter().any(|t| is_org_keyword(&t.lower)) {
            return EntityLabel::Org;
        }
        if run.len() == 1 && is_acronym(&tokens[run.start].text) {
            return EntityLabel::Org;
        }
        let after_location_preposition = run.start > 0
            && LOCATION_PREPOSITIONS.contains(&tokens[run.start - 1].lower.as_str());
        if after_location_preposition {
            return EntityLabel::Gpe;
        }
        if run.len() >= 2 {
            return EntityLabel::Person;
        }
        EntityLabel::Misc
    }
}

impl LanguageEngine for RuleBasedEngine {
    fn parse(&self, text: &str) -> Parse {
        let raw: Vec<(usize, usize)> = self
            .token_pattern
            .find_iter(text)
            .map(|m| (m.start(), m.end()))
            .collect();
        let sentence_ranges = self.segment(text, &raw);

        let mut tokens: Vec<Token> = Vec::with_capacity(raw.len());
        for range in &sentence_ranges {
            for i in range.clone() {
                let (start, end) = raw[i];
                let word = &text[start..end];
                let lower = word.to_lowercase();
                let previous = if i > range.start { tokens.last() } else { None };
                let next = raw.get(i + 1).filter(|_| i + 1 < range.end).map(|(s, e)| &text[*s..*e]);
                let (pos, lemma) = self.tag(word, &lower, previous, next, i == range.start);

                tokens.push(Token {
                    text: word.to_string(),
                    is_stop: self.lexicon.is_stopword(&lower),
                    is_punct: pos == Pos::Punctuation,
                    like_num: pos == Pos::Numeral,
                    lower,
                    lemma,
                    pos,
                    start,
                    end,
                });
            }
        }

        let entities = sentence_ranges
            .iter()
            .flat_map(|range| self.recognize_entities(&tokens, range.clone()))
            .collect();

        Parse {
            text: text.to_string(),
            tokens,
            sentences: sentence_ranges
                .into_iter()
                .map(|tokens| SentenceSpan { tokens })
                .collect(),
            entities,
        }
    }
}

fn span(tokens: &[Token], label: EntityLabel, range: Range<usize>) -> EntitySpan {
    EntitySpan {
        label,
        start: tokens[range.start].start,
        end: tokens[range.end - 1].end,
        tokens: range,
    }
}

fn is_terminal(word: &str) -> bool {
    matches!(word, "." | "!" | "?" | "…")
}

fn is_closer(word: &str) -> bool {
    matches!(word, "\"" | "'" | ")" | "]" | "”" | "’" | "»")
}

fn opens_sentence(word: &str) -> bool {
    word.chars().next().is_some_and(|c| {
        c.is_uppercase() || c.is_ascii_digit() || matches!(c, '"' | '\'' | '(' | '[' | '“' | '‘')
    })
}

fn is_symbol(word: &str) -> bool {
    word.chars()
        .all(|c| matches!(c, '$' | '€' | '£' | '%' | '&' | '+' | '=' | '<' | '>' | '#' | '@'))
}

fn is_acronym(word: &str) -> bool {
    word.chars().count() >= 2
        && word.chars().any(|c| c.is_alphabetic())
        && word.chars().all(|c| c.is_uppercase() || c.is_ascii_digit())
}

fn is_like_num(word: &str, lower: &str) -> bool {
    if word.starts_with(|c: char| c.is_ascii_digit()) {
        let suffix = word.trim_start_matches(|c: char| c.is_ascii_digit() || c == '.' || c == ',');
        return matches!(suffix, "" | "s" | "st" | "nd" | "rd" | "th");
    }
    is_number_word(lower)
}

fn is_ordinal(lower: &str) -> bool {
    ["st", "nd", "rd", "th"].iter().any(|s| lower.ends_with(s))
}

fn is_year(text: &str) -> bool {
    text.len() == 4
        && text.chars().all(|c| c.is_ascii_digit())
        && text.parse::<u32>().is_ok_and(|y| (1000..=2100).contains(&y))
}

fn is_decade(text: &str) -> bool {
    text.strip_suffix('s').is_some_and(|y| is_year(y) && y.ends_with('0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> RuleBasedEngine {
        RuleBasedEngine::new(Lexicon::english()).expect("engine should build")
    }

    fn sentence_texts(parse: &Parse) -> Vec<String> {
        parse.sentences().map(|s| s.text()).collect()
    }

    #[test]
    fn test_segments_on_terminal_punctuation() {
        let parse = engine().parse("Heat flows outward. Does it stop? It never stops!");
        assert_eq!(
            sentence_texts(&parse),
            vec!["Heat flows outward.", "Does it stop?", "It never stops!"]
        );
    }

    #[test]
    fn test_does_not_split_after_abbreviations_or_decimals() {
        let parse = engine().parse("Dr. Smith measured 3.14 units, e.g. in water. Then he left.");
        assert_eq!(parse.sentences.len(), 2);
        assert!(sentence_texts(&parse)[0].contains("3.14"));
    }

    #[test]
    fn test_splits_on_blank_lines() {
        let parse = engine().parse("Chapter One\n\nThe cell is the basic unit of life.");
        assert_eq!(parse.sentences.len(), 2);
    }

    #[test]
    fn test_rejoins_wrapped_lines_with_single_spaces() {
        let parse = engine().parse("The mitochondria\nproduces energy.");
        assert_eq!(sentence_texts(&parse), vec!["The mitochondria produces energy."]);
    }

    #[test]
    fn test_tags_numbers_verbs_and_punctuation() {
        let parse = engine().parse("The algorithm sorted 42 items.");
        let pos: Vec<Pos> = parse.tokens.iter().map(|t| t.pos).collect();

        assert_eq!(
            pos,
            vec![
                Pos::Determiner,
                Pos::Noun,
                Pos::Verb,
                Pos::Numeral,
                Pos::Noun,
                Pos::Punctuation
            ]
        );
        assert_eq!(parse.tokens[2].lemma, "sort");
        assert!(parse.tokens[3].like_num);
        assert!(parse.tokens[5].is_punct);
    }

    #[test]
    fn test_recognizes_measures_and_dates() {
        let parse = engine().parse(
            "In 1969 the rocket burned 2000 kg of fuel, cost $ 355 million and used 40 % of its budget on March 3, 1970.",
        );
        let labels: Vec<(EntityLabel, &str)> = parse
            .entities
            .iter()
            .map(|e| (e.label, parse.entity_text(e)))
            .collect();

        assert!(labels.contains(&(EntityLabel::Date, "1969")));
        assert!(labels.contains(&(EntityLabel::Quantity, "2000 kg")));
        assert!(labels.contains(&(EntityLabel::Money, "$ 355 million")));
        assert!(labels.contains(&(EntityLabel::Percent, "40 %")));
        assert!(labels.contains(&(EntityLabel::Date, "March 3, 1970")));
    }

    #[test]
    fn test_recognizes_proper_noun_runs() {
        let parse = engine().parse(
            "The theory was proposed by Alan Turing at the University of Manchester while living in London.",
        );
        let labels: Vec<(EntityLabel, &str)> = parse
            .entities
            .iter()
            .map(|e| (e.label, parse.entity_text(e)))
            .collect();

        assert!(labels.contains(&(EntityLabel::Person, "Alan Turing")));
        assert!(labels.contains(&(EntityLabel::Org, "University of Manchester")));
        assert!(labels.contains(&(EntityLabel::Gpe, "London")));
    }

    #[test]
    fn test_extracts_noun_chunks_and_triples() {
        let parse = engine().parse("The compiler produces efficient machine code.");
        let sentence = parse.sentences().next().expect("one sentence");

        let chunks: Vec<String> = sentence.noun_chunks().into_iter().map(|c| c.text).collect();
        assert_eq!(chunks, vec!["The compiler", "efficient machine code"]);

        let triple = sentence.triple().expect("subject-verb-object");
        assert_eq!(triple.subject, "compiler");
        assert_eq!(triple.verb, "produces");
        assert_eq!(triple.object, "code");
    }

    #[test]
    fn test_symbol_soup_has_no_words() {
        let parse = engine().parse("#$%&*@! ~~ ^^ ## !! ??");
        assert!(parse
            .tokens
            .iter()
            .all(|t| matches!(t.pos, Pos::Punctuation | Pos::Symbol)));
        assert!(parse.entities.is_empty());
    }
}
