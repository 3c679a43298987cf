//! Synonym-based field renaming and casing helpers.

use std::collections::HashMap;

use indexmap::IndexSet;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde_json::{Map, Value};

use crate::constants::synonyms::SIMILARITY_THRESHOLD;
use crate::types::{FieldKey, Word};

/// One synonym suggestion from the lexical service.
#[derive(Clone, Debug, PartialEq)]
pub struct SynonymCandidate {
    /// Suggested replacement word.
    pub text: Word,
    /// Path-similarity score against the first returned candidate, on a
    /// 0–1 scale.
    pub similarity: f64,
}

impl SynonymCandidate {
    /// Create a candidate with its similarity score.
    pub fn new(text: impl Into<Word>, similarity: f64) -> Self {
        Self {
            text: text.into(),
            similarity,
        }
    }
}

/// Lexical synonym service consumed by field renaming.
///
/// An empty candidate list is valid and means the word is unknown.
/// Safe for concurrent reads from multiple workers.
pub trait SynonymLexicon: Send + Sync {
    /// Synonym candidates for a single word, most canonical first.
    fn synonyms_of(&self, word: &str) -> Vec<SynonymCandidate>;
}

/// In-memory lexicon for tests and small corpora.
///
/// Lookups are case-insensitive; entries are stored under lowercase keys.
#[derive(Clone, Debug, Default)]
pub struct StaticLexicon {
    entries: HashMap<Word, Vec<SynonymCandidate>>,
}

impl StaticLexicon {
    /// Create an empty lexicon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register candidates (text, similarity) for one word.
    pub fn with_entry<I, S>(mut self, word: impl Into<Word>, candidates: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<Word>,
    {
        self.entries.insert(
            word.into().to_lowercase(),
            candidates
                .into_iter()
                .map(|(text, similarity)| SynonymCandidate::new(text, similarity))
                .collect(),
        );
        self
    }
}

impl SynonymLexicon for StaticLexicon {
    fn synonyms_of(&self, word: &str) -> Vec<SynonymCandidate> {
        self.entries
            .get(&word.to_lowercase())
            .cloned()
            .unwrap_or_default()
    }
}

/// Split a mixed-case field name into constituent words.
///
/// A word is an uppercase run (stopping before an uppercase that opens a
/// lowercase run), a letter followed by a lowercase run, or a
/// hyphen-led lowercase run. Characters outside those shapes are
/// dropped.
pub fn camel_case_split(key: &str) -> Vec<Word> {
    let chars: Vec<char> = key.chars().collect();
    let mut words = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if !(c.is_ascii_alphabetic() || c == '-') {
            i += 1;
            continue;
        }
        let j = i + 1;
        if j < chars.len() && chars[j].is_ascii_lowercase() {
            let mut end = j;
            while end < chars.len() && chars[end].is_ascii_lowercase() {
                end += 1;
            }
            words.push(chars[i..end].iter().collect());
            i = end;
            continue;
        }
        let mut end = j;
        while end < chars.len() && chars[end].is_ascii_uppercase() {
            end += 1;
        }
        if end > j && end < chars.len() && chars[end].is_ascii_lowercase() {
            // The final uppercase letter opens the next word.
            end -= 1;
        }
        if end == j {
            // Single leading character; valid only before an uppercase
            // letter or the end of the key.
            if j >= chars.len() || chars[j].is_ascii_uppercase() {
                words.push(c.to_string());
            }
            i = j;
            continue;
        }
        words.push(chars[i..end].iter().collect());
        i = end;
    }
    words
}

/// Rename a field to a randomly chosen synonym-based variant.
///
/// Each constituent word is replaced by a uniformly drawn candidate whose
/// similarity clears the threshold, or kept (title-cased) when the
/// lexicon offers nothing usable — an unknown word never fails the
/// rename. Words recombine by bare concatenation with underscores
/// stripped and the first character lower-cased.
pub fn randomize_key<R: Rng + ?Sized>(
    lexicon: &dyn SynonymLexicon,
    key: &str,
    rng: &mut R,
) -> FieldKey {
    let words = camel_case_split(key);
    if words.is_empty() {
        return key.to_string();
    }
    let mut combined = String::with_capacity(key.len());
    for word in &words {
        combined.push_str(&title_case(&pick_synonym(lexicon, word, rng)));
    }
    combined.retain(|c| c != '_');
    lowercase_first(&combined)
}

fn pick_synonym<R: Rng + ?Sized>(
    lexicon: &dyn SynonymLexicon,
    word: &str,
    rng: &mut R,
) -> Word {
    let pool: IndexSet<Word> = lexicon
        .synonyms_of(word)
        .into_iter()
        .filter(|candidate| candidate.similarity > SIMILARITY_THRESHOLD)
        .map(|candidate| candidate.text)
        .collect();
    let pool: Vec<Word> = pool.into_iter().collect();
    pool.choose(rng).cloned().unwrap_or_else(|| word.to_string())
}

fn title_case(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut prev_alpha = false;
    for c in word.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Rewrite a mixed-case key to underscore-separated lower case.
pub fn camel_to_snake(key: &str) -> FieldKey {
    let chars: Vec<char> = key.chars().collect();
    let mut out = String::with_capacity(key.len() + 4);
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            let prev = chars[i - 1];
            let opens_lower_run = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if prev.is_ascii_lowercase() || prev.is_ascii_digit() || opens_lower_run {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
    }
    out
}

/// Recursively rewrite every mapping key to snake case, through nested
/// mappings and sequences; other values pass through untouched.
pub fn snake_case_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut converted = Map::with_capacity(map.len());
            for (key, child) in map {
                converted.insert(camel_to_snake(key), snake_case_keys(child));
            }
            Value::Object(converted)
        }
        Value::Array(items) => Value::Array(items.iter().map(snake_case_keys).collect()),
        other => other.clone(),
    }
}
