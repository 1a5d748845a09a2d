//! Keyword predicates over normalized input.
//!
//! Two primitive tests exist: substring containment on the lower-cased
//! message, and exact membership in its token set. `Any` and `All` combine
//! them.

use std::collections::HashSet;

/// A message prepared once for predicate evaluation.
#[derive(Debug, Clone)]
pub struct NormalizedInput {
    lower: String,
    words: HashSet<String>,
}

impl NormalizedInput {
    /// Trim and lower-case `text`, then tokenize on whitespace.
    ///
    /// Every token is stored as-is and, if different, with surrounding ASCII
    /// punctuation stripped, so `"vc?"` answers both `"vc?"` and `"vc"`.
    pub fn new(text: &str) -> Self {
        let lower = text.trim().to_lowercase();
        let mut words = HashSet::new();

        for token in lower.split_whitespace() {
            let bare = token.trim_matches(|c: char| c.is_ascii_punctuation());
            if !bare.is_empty() && bare != token {
                words.insert(bare.to_string());
            }
            words.insert(token.to_string());
        }

        Self { lower, words }
    }

    pub fn lower(&self) -> &str {
        &self.lower
    }

    pub fn is_empty(&self) -> bool {
        self.lower.is_empty()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lower.contains(needle)
    }

    pub fn has_word(&self, word: &str) -> bool {
        self.words.contains(word)
    }
}

/// A boolean test deciding whether a static answer applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Substring of the lower-cased message
    Contains(&'static str),
    /// Exact token of the lower-cased message
    Word(&'static str),
    /// At least one inner predicate holds
    Any(Vec<Predicate>),
    /// Every inner predicate holds
    All(Vec<Predicate>),
}

impl Predicate {
    /// `Any` of `Contains` for each needle.
    pub fn contains_any(needles: &[&'static str]) -> Self {
        Self::Any(needles.iter().copied().map(Self::Contains).collect())
    }

    pub fn matches(&self, input: &NormalizedInput) -> bool {
        match self {
            Self::Contains(needle) => input.contains(needle),
            Self::Word(word) => input.has_word(word),
            Self::Any(inner) => inner.iter().any(|p| p.matches(input)),
            Self::All(inner) => inner.iter().all(|p| p.matches(input)),
        }
    }

    /// Every keyword this predicate mentions, in declaration order.
    pub fn terms(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        self.collect_terms(&mut out);
        out
    }

    fn collect_terms(&self, out: &mut Vec<&'static str>) {
        match self {
            Self::Contains(term) | Self::Word(term) => out.push(*term),
            Self::Any(inner) | Self::All(inner) => {
                for p in inner {
                    p.collect_terms(out);
                }
            }
        }
    }
}
