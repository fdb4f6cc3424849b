use std::ops::Range;

use crate::models::domain::EntityLabel;

/// Coarse part-of-speech tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pos {
    Noun,
    ProperNoun,
    Verb,
    Aux,
    Adjective,
    Adverb,
    Numeral,
    Determiner,
    Adposition,
    Pronoun,
    Conjunction,
    Particle,
    Punctuation,
    Symbol,
}

impl Pos {
    pub fn is_nominal(&self) -> bool {
        matches!(self, Pos::Noun | Pos::ProperNoun)
    }

    pub fn is_verbal(&self) -> bool {
        matches!(self, Pos::Verb | Pos::Aux)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub lower: String,
    pub lemma: String,
    pub pos: Pos,
    /// Byte span in the parsed text.
    pub start: usize,
    pub end: usize,
    pub is_stop: bool,
    pub is_punct: bool,
    pub like_num: bool,
}

impl Token {
    /// Anything but punctuation and symbols.
    pub fn is_word(&self) -> bool {
        !matches!(self.pos, Pos::Punctuation | Pos::Symbol)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntitySpan {
    pub label: EntityLabel,
    pub tokens: Range<usize>,
    /// Byte span in the parsed text.
    pub start: usize,
    pub end: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentenceSpan {
    pub tokens: Range<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NounChunk {
    pub text: String,
    pub tokens: Range<usize>,
    pub word_count: usize,
}

/// Subject, verb and object around a sentence's main verb.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Triple {
    pub subject: String,
    pub verb: String,
    pub object: String,
}

/// Output of a language engine over one text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Parse {
    pub text: String,
    pub tokens: Vec<Token>,
    pub sentences: Vec<SentenceSpan>,
    pub entities: Vec<EntitySpan>,
}

impl Parse {
    pub fn sentences(&self) -> impl Iterator<Item = Sentence<'_>> {
        self.sentences.iter().map(move |span| Sentence {
            parse: self,
            tokens: span.tokens.clone(),
        })
    }

    /// The parse viewed as a single sentence, whatever its segmentation.
    pub fn as_sentence(&self) -> Sentence<'_> {
        Sentence {
            parse: self,
            tokens: 0..self.tokens.len(),
        }
    }

    pub fn entity_text(&self, entity: &EntitySpan) -> &str {
        &self.text[entity.start..entity.end]
    }

    /// Character offset of a byte offset.
    pub fn char_offset(&self, byte: usize) -> usize {
        self.text[..byte].chars().count()
    }

    /// Token texts joined with single spaces wherever the source had any
    /// whitespace, so wrapped lines read as one line.
    pub fn span_text(&self, tokens: Range<usize>) -> String {
        let mut out = String::new();
        let mut previous_end: Option<usize> = None;
        for token in &self.tokens[tokens] {
            if let Some(end) = previous_end {
                if token.start > end {
                    out.push(' ');
                }
            }
            out.push_str(&token.text);
            previous_end = Some(token.end);
        }
        out
    }
}

#[derive(Clone, Debug)]
pub struct Sentence<'a> {
    parse: &'a Parse,
    tokens: Range<usize>,
}

impl<'a> Sentence<'a> {
    pub fn text(&self) -> String {
        self.parse.span_text(self.tokens.clone())
    }

    pub fn tokens(&self) -> &'a [Token] {
        &self.parse.tokens[self.tokens.clone()]
    }

    pub fn entities(&self) -> impl Iterator<Item = &'a EntitySpan> + 'a {
        let range = self.tokens.clone();
        let parse = self.parse;
        parse
            .entities
            .iter()
            .filter(move |e| e.tokens.start >= range.start && e.tokens.end <= range.end)
    }

    /// Words as the whitespace-split count of the rendered sentence.
    pub fn word_count(&self) -> usize {
        self.text().split_whitespace().count()
    }

    /// Runs of `[det] (adj|num|noun|propn)* (noun|propn)`.
    pub fn noun_chunks(&self) -> Vec<NounChunk> {
        let tokens = &self.parse.tokens;
        let mut chunks = Vec::new();
        let mut i = self.tokens.start;

        while i < self.tokens.end {
            let opens = matches!(
                tokens[i].pos,
                Pos::Determiner
                    | Pos::Adjective
                    | Pos::Numeral
                    | Pos::Noun
                    | Pos::ProperNoun
            );
            if !opens {
                i += 1;
                continue;
            }

            let mut j = i + 1;
            while j < self.tokens.end
                && matches!(
                    tokens[j].pos,
                    Pos::Adjective | Pos::Numeral | Pos::Noun | Pos::ProperNoun
                )
            {
                j += 1;
            }

            match (i..j).rev().find(|&k| tokens[k].pos.is_nominal()) {
                Some(last) => {
                    let range = i..last + 1;
                    chunks.push(NounChunk {
                        text: self.parse.span_text(range.clone()),
                        word_count: range.len(),
                        tokens: range,
                    });
                    i = last + 1;
                }
                None => i = j,
            }
        }

        chunks
    }

    /// Subject and direct object of the first lexical verb, when both are
    /// adjacent noun phrases.
    pub fn triple(&self) -> Option<Triple> {
        let tokens = &self.parse.tokens;
        let verb = self.tokens.clone().find(|&i| tokens[i].pos == Pos::Verb)?;

        let subject = (self.tokens.start..verb)
            .rev()
            .find(|&i| !matches!(tokens[i].pos, Pos::Adverb | Pos::Aux | Pos::Particle))
            .filter(|&i| tokens[i].pos.is_nominal() || tokens[i].pos == Pos::Pronoun)?;

        let mut k = verb + 1;
        while k < self.tokens.end && matches!(tokens[k].pos, Pos::Adverb | Pos::Particle) {
            k += 1;
        }
        let object_start = k;
        while k < self.tokens.end
            && matches!(
                tokens[k].pos,
                Pos::Determiner | Pos::Adjective | Pos::Numeral | Pos::Noun | Pos::ProperNoun
            )
        {
            k += 1;
        }
        let object = (object_start..k)
            .rev()
            .find(|&i| tokens[i].pos.is_nominal())?;

        Some(Triple {
            subject: tokens[subject].text.clone(),
            verb: tokens[verb].text.clone(),
            object: tokens[object].text.clone(),
        })
    }
}
