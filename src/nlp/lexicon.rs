use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::errors::{AppError, AppResult};

use super::parse::Pos;

const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "either",
    "else", "every", "few", "for", "from", "further", "had", "has", "have", "having", "he", "her",
    "here", "hers", "herself", "him", "himself", "his", "how", "however", "i", "if", "in", "into",
    "is", "it", "its", "itself", "just", "may", "me", "might", "more", "most", "must", "my",
    "myself", "neither", "no", "nor", "not", "now", "of", "off", "on", "once", "one", "only",
    "or", "other", "our", "ours", "ourselves", "out", "over", "own", "same", "several", "she",
    "should", "so", "some", "such", "than", "that", "the", "their", "theirs", "them",
    "themselves", "then", "there", "these", "they", "this", "those", "through", "thus", "to",
    "too", "under", "until", "up", "upon", "us", "very", "was", "we", "were", "what", "when",
    "where", "whether", "which", "while", "who", "whom", "whose", "why", "will", "with", "within",
    "without", "would", "yet", "you", "your", "yours", "yourself", "yourselves",
];

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "each", "every", "some", "any", "no",
    "all", "both", "either", "neither", "another", "such", "several", "many", "much", "most",
    "few",
];

const PREPOSITIONS: &[&str] = &[
    "about", "above", "across", "after", "against", "along", "among", "around", "as", "at",
    "before", "behind", "below", "beneath", "beside", "between", "beyond", "by", "despite",
    "down", "during", "except", "for", "from", "in", "inside", "into", "like", "near", "of",
    "off", "on", "onto", "out", "outside", "over", "per", "since", "through", "throughout",
    "toward", "towards", "under", "unlike", "until", "upon", "via", "with", "within", "without",
];

const PRONOUNS: &[&str] = &[
    "i", "me", "my", "mine", "you", "your", "yours", "he", "him", "his", "she", "her", "hers",
    "it", "its", "we", "us", "our", "ours", "they", "them", "their", "theirs", "itself",
    "themselves", "himself", "herself", "who", "whom", "whose", "which", "what", "there",
];

const CONJUNCTIONS: &[&str] = &[
    "and", "or", "but", "nor", "yet", "so", "because", "although", "though", "while", "whereas",
    "if", "unless", "when", "whenever", "where", "whether", "than", "that",
];

const PARTICLES: &[&str] = &["to", "not", "n't"];

const AUXILIARIES: &[(&str, &str)] = &[
    ("is", "be"), ("are", "be"), ("was", "be"), ("were", "be"), ("be", "be"), ("been", "be"),
    ("being", "be"), ("am", "be"), ("has", "have"), ("have", "have"), ("had", "have"),
    ("having", "have"), ("do", "do"), ("does", "do"), ("did", "do"), ("can", "can"),
    ("could", "could"), ("may", "may"), ("might", "might"), ("must", "must"),
    ("shall", "shall"), ("should", "should"), ("will", "will"), ("would", "would"),
];

const ADVERBS: &[&str] = &[
    "also", "often", "always", "never", "sometimes", "usually", "still", "already", "even",
    "only", "then", "thus", "therefore", "however", "now", "here", "very", "too", "just",
    "again", "almost", "first", "later", "soon", "together",
];

const BASE_VERBS: &[&str] = &[
    "absorb", "accept", "achieve", "add", "affect", "allow", "analyze", "apply", "arrange",
    "assign", "attach", "build", "calculate", "call", "carry", "cause", "change", "check",
    "choose", "classify", "collect", "combine", "compare", "compile", "complete", "compute",
    "connect", "consist", "consume", "contain", "control", "convert", "cover", "create",
    "decrease", "define", "deliver", "demonstrate", "depend", "derive", "describe", "design",
    "destroy", "detect", "determine", "develop", "discover", "divide", "eat", "emit", "enable",
    "encode", "ensure", "establish", "estimate", "evaluate", "examine", "execute", "exist",
    "expand", "explain", "express", "extend", "extract", "fill", "find", "follow", "form",
    "generate", "give", "grow", "handle", "help", "hold", "identify", "implement", "improve",
    "include", "increase", "indicate", "influence", "introduce", "invent", "involve", "join",
    "keep", "lead", "learn", "link", "live", "locate", "lose", "maintain", "make", "manage",
    "measure", "merge", "move", "multiply", "need", "observe", "obtain", "occur", "operate",
    "orbit", "organize", "perform", "predict", "prevent", "produce", "prove", "provide",
    "publish", "reach", "read", "receive", "record", "reduce", "refer", "reflect", "release",
    "rely", "remain", "remove", "replace", "represent", "require", "resolve", "return", "reveal",
    "run", "save", "search", "select", "send", "separate", "serve", "show", "solve", "sort",
    "split", "start", "store", "study", "support", "take", "test", "transfer", "transform",
    "translate", "travel", "traverse", "treat", "use", "validate", "vary", "verify", "visit",
    "win", "write",
];

const IRREGULAR_VERBS: &[(&str, &str)] = &[
    ("began", "begin"), ("begun", "begin"), ("begin", "begin"), ("begins", "begin"),
    ("became", "become"), ("become", "become"), ("becomes", "become"), ("broke", "break"),
    ("broken", "break"), ("built", "build"), ("chose", "choose"), ("chosen", "choose"),
    ("drove", "drive"), ("driven", "drive"), ("ate", "eat"), ("eaten", "eat"), ("fell", "fall"),
    ("fallen", "fall"), ("found", "find"), ("gave", "give"), ("given", "give"), ("grew", "grow"),
    ("grown", "grow"), ("held", "hold"), ("kept", "keep"), ("knew", "know"), ("known", "know"),
    ("knows", "know"), ("led", "lead"), ("lost", "lose"), ("made", "make"), ("meant", "mean"),
    ("mean", "mean"), ("means", "mean"), ("ran", "run"), ("rose", "rise"), ("risen", "rise"),
    ("saw", "see"), ("seen", "see"), ("sees", "see"), ("sent", "send"), ("shown", "show"),
    ("proven", "prove"), ("split", "split"), ("took", "take"), ("taken", "take"), ("won", "win"),
    ("wrote", "write"), ("written", "write"), ("read", "read"),
];

const NUMBER_WORDS: &[&str] = &[
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
    "hundred", "thousand", "million", "billion", "trillion", "dozen",
];

pub const MONTHS: &[&str] = &[
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december",
];

const CURRENCY_WORDS: &[&str] = &[
    "dollar", "dollars", "euro", "euros", "pound", "pounds", "cent", "cents", "yen", "rupee",
    "rupees",
];

const UNITS: &[&str] = &[
    "mm", "cm", "m", "km", "meter", "meters", "metre", "metres", "kilometer", "kilometers",
    "mile", "miles", "foot", "feet", "inch", "inches", "g", "kg", "mg", "gram", "grams",
    "kilogram", "kilograms", "ton", "tons", "tonne", "tonnes", "l", "ml", "liter", "liters",
    "litre", "litres", "degree", "degrees", "kelvin", "celsius", "fahrenheit", "hz", "khz", "mhz",
    "ghz", "watt", "watts", "kw", "volt", "volts", "joule", "joules", "calorie", "calories",
    "byte", "bytes", "kb", "mb", "gb", "tb", "bit", "bits", "second", "seconds", "minute",
    "minutes", "hour", "hours", "day", "days", "week", "weeks", "month", "months", "year",
    "years", "nanometers", "micrometers", "acres", "hectares",
];

const ORG_KEYWORDS: &[&str] = &[
    "university", "institute", "college", "company", "corporation", "corp", "inc", "ltd",
    "association", "society", "organization", "organisation", "agency", "department",
    "laboratory", "laboratories", "foundation", "council", "committee", "bank", "ministry",
];

const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "e.g", "i.e", "fig", "no",
    "vol", "approx", "dept", "est", "al", "cf", "ca",
];

/// Optional additions loaded from a JSON file at startup.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LexiconExtension {
    #[serde(default)]
    pub stopwords: Vec<String>,
    #[serde(default)]
    pub verbs: Vec<String>,
    #[serde(default)]
    pub units: Vec<String>,
    #[serde(default)]
    pub abbreviations: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct Lexicon {
    stopwords: HashSet<String>,
    verb_forms: HashMap<String, String>,
    units: HashSet<String>,
    abbreviations: HashSet<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::english()
    }
}

impl Lexicon {
    pub fn english() -> Self {
        let mut lexicon = Self {
            stopwords: to_set(STOPWORDS),
            verb_forms: HashMap::new(),
            units: to_set(UNITS),
            abbreviations: to_set(ABBREVIATIONS),
        };
        for verb in BASE_VERBS {
            lexicon.add_verb(verb);
        }
        for (form, lemma) in IRREGULAR_VERBS {
            lexicon
                .verb_forms
                .insert(form.to_string(), lemma.to_string());
        }
        lexicon
    }

    /// Built-in English lexicon extended by the JSON file at `path`.
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            AppError::EngineUnavailable(format!(
                "lexicon '{}' could not be read: {}",
                path.display(),
                e
            ))
        })?;
        let extension: LexiconExtension = serde_json::from_str(&raw).map_err(|e| {
            AppError::EngineUnavailable(format!(
                "lexicon '{}' is malformed: {}",
                path.display(),
                e
            ))
        })?;

        let mut lexicon = Self::english();
        lexicon.extend(extension);
        log::info!("Loaded lexicon extension from {}", path.display());
        Ok(lexicon)
    }

    pub fn extend(&mut self, extension: LexiconExtension) {
        self.stopwords
            .extend(extension.stopwords.iter().map(|w| w.to_lowercase()));
        for verb in &extension.verbs {
            self.add_verb(&verb.to_lowercase());
        }
        self.units
            .extend(extension.units.iter().map(|w| w.to_lowercase()));
        self.abbreviations
            .extend(extension.abbreviations.iter().map(|w| w.to_lowercase()));
    }

    fn add_verb(&mut self, base: &str) {
        for form in inflections(base) {
            self.verb_forms
                .entry(form)
                .or_insert_with(|| base.to_string());
        }
    }

    pub fn is_stopword(&self, lower: &str) -> bool {
        self.stopwords.contains(lower)
    }

    pub fn verb_lemma(&self, lower: &str) -> Option<&str> {
        self.verb_forms.get(lower).map(String::as_str)
    }

    pub fn is_unit(&self, lower: &str) -> bool {
        self.units.contains(lower)
    }

    pub fn is_abbreviation(&self, lower: &str) -> bool {
        self.abbreviations.contains(lower)
    }

    /// Part of speech and lemma for closed-class words.
    pub fn closed_class(&self, lower: &str) -> Option<(Pos, String)> {
        if let Some((_, lemma)) = AUXILIARIES.iter().find(|(form, _)| *form == lower) {
            return Some((Pos::Aux, lemma.to_string()));
        }
        let pos = if DETERMINERS.contains(&lower) {
            Pos::Determiner
        } else if PARTICLES.contains(&lower) {
            Pos::Particle
        } else if PRONOUNS.contains(&lower) {
            Pos::Pronoun
        } else if PREPOSITIONS.contains(&lower) {
            Pos::Adposition
        } else if CONJUNCTIONS.contains(&lower) {
            Pos::Conjunction
        } else if ADVERBS.contains(&lower) {
            Pos::Adverb
        } else {
            return None;
        };
        Some((pos, lower.to_string()))
    }
}

pub fn is_number_word(lower: &str) -> bool {
    NUMBER_WORDS.contains(&lower)
}

pub fn is_month(lower: &str) -> bool {
    MONTHS.contains(&lower)
}

pub fn is_currency_word(lower: &str) -> bool {
    CURRENCY_WORDS.contains(&lower)
}

pub fn is_org_keyword(lower: &str) -> bool {
    ORG_KEYWORDS.contains(&lower)
}

fn to_set(words: &[&str]) -> HashSet<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn ends_with_consonant_y(word: &str) -> bool {
    let bytes = word.as_bytes();
    bytes.len() >= 2
        && bytes[bytes.len() - 1] == b'y'
        && !matches!(bytes[bytes.len() - 2], b'a' | b'e' | b'i' | b'o' | b'u')
}

/// Regular inflections of a base verb: base, third person, past, gerund.
fn inflections(base: &str) -> Vec<String> {
    let stem_y = base.strip_suffix('y').unwrap_or(base);

    let third = if ["s", "sh", "ch", "x", "z", "o"]
        .iter()
        .any(|s| base.ends_with(s))
    {
        format!("{}es", base)
    } else if ends_with_consonant_y(base) {
        format!("{}ies", stem_y)
    } else {
        format!("{}s", base)
    };

    let past = if base.ends_with('e') {
        format!("{}d", base)
    } else if ends_with_consonant_y(base) {
        format!("{}ied", stem_y)
    } else {
        format!("{}ed", base)
    };

    let gerund = if base.ends_with("ie") {
        format!("{}ying", &base[..base.len() - 2])
    } else if base.ends_with('e') && !base.ends_with("ee") {
        format!("{}ing", &base[..base.len() - 1])
    } else {
        format!("{}ing", base)
    };

    vec![base.to_string(), third, past, gerund]
}
