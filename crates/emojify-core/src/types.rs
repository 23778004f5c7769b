//! Domain types shared by the index, ranker, and orchestrator.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

/// Dense vector for a word or an emoji. All embeddings compared against
/// each other must come from the same provider.
pub type Embedding = Vec<f32>;

/// Default number of suggestions returned per token.
pub const DEFAULT_TOP_K: usize = 5;

/// Coarse grammatical category attached to every annotated token.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Other,
}

impl Category {
    /// The four content-word categories; the default request when a caller
    /// asks for nothing in particular.
    pub const CONTENT: [Category; 4] = [Category::Noun, Category::Verb, Category::Adjective, Category::Adverb];

    pub fn content_words() -> BTreeSet<Category> {
        Self::CONTENT.into_iter().collect()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Noun => "NOUN",
            Category::Verb => "VERB",
            Category::Adjective => "ADJ",
            Category::Adverb => "ADV",
            Category::Other => "OTHER",
        };
        f.write_str(s)
    }
}

impl FromStr for Category {
    type Err = crate::error::Error;

    /// Accepts both the long names and the short universal tags
    /// (`ADJ`, `ADV`, `PROPN`, `AUX`, ...). Unknown tags map to `Other`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        if upper.is_empty() {
            return Err(crate::error::Error::InvalidConfig("empty category tag".to_string()));
        }
        Ok(match upper.as_str() {
            "NOUN" | "N" | "PROPN" => Category::Noun,
            "VERB" | "V" => Category::Verb,
            "ADJECTIVE" | "ADJ" => Category::Adjective,
            "ADVERB" | "ADV" => Category::Adverb,
            _ => Category::Other,
        })
    }
}

/// One token produced by a [`crate::traits::TokenAnnotator`].
///
/// `span` is the byte range of `text` inside the annotated input; it is what
/// lets callers put an emoji after the right occurrence of a repeated word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedToken {
    pub text: String,
    pub category: Category,
    pub span: Range<usize>,
    pub lemma: Option<String>,
}

impl AnnotatedToken {
    pub fn new(text: impl Into<String>, category: Category, span: Range<usize>) -> Self {
        Self { text: text.into(), category, span, lemma: None }
    }

    pub fn with_lemma(mut self, lemma: impl Into<String>) -> Self {
        self.lemma = Some(lemma.into());
        self
    }
}

/// A single ranked candidate. Higher `score` is better.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub emoji: String,
    pub score: f32,
}

/// At most K suggestions, descending by score, ties in index order.
pub type SuggestionResult = Vec<Suggestion>;

/// How descriptive-word vectors become an emoji's representation.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Aggregation {
    /// Unweighted mean of every resolvable word across all phrases.
    #[default]
    MeanPooled,
    /// One mean vector per phrase; an emoji scores its best phrase.
    MaxPhrase,
    /// Emoji vectors read directly from a pretrained emoji table.
    Precomputed,
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Aggregation::MeanPooled => "mean-pooled",
            Aggregation::MaxPhrase => "max-phrase",
            Aggregation::Precomputed => "precomputed",
        };
        f.write_str(s)
    }
}

impl FromStr for Aggregation {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "mean-pooled" | "mean" => Ok(Aggregation::MeanPooled),
            "max-phrase" | "max" => Ok(Aggregation::MaxPhrase),
            "precomputed" => Ok(Aggregation::Precomputed),
            other => Err(crate::error::Error::InvalidConfig(format!("unknown aggregation strategy '{other}'"))),
        }
    }
}
