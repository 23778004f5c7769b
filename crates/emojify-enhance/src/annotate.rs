//! Rule-based token annotator.
//!
//! Splits text on Unicode word boundaries (UAX #29) and assigns a coarse
//! category from, in order: an optional tag dictionary, closed-class word
//! lists, the previous token, and suffix heuristics. Nouns are the fallback.
//! Good enough to pick content words out of short sentences; swap in a real
//! tagger through [`TokenAnnotator`] when accuracy matters.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use unicode_segmentation::UnicodeSegmentation;

use emojify_core::error::{Error, Result};
use emojify_core::traits::TokenAnnotator;
use emojify_core::types::{AnnotatedToken, Category};

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "my", "your", "his", "her", "its", "our", "their",
    "some", "any", "no", "every", "each", "all", "both", "either", "neither", "much", "many", "few",
];
const SUBJECT_PRONOUNS: &[&str] = &["i", "you", "he", "she", "it", "we", "they"];
const OTHER_PRONOUNS: &[&str] = &[
    "me", "him", "us", "them", "mine", "yours", "hers", "ours", "theirs", "myself", "yourself", "himself",
    "herself", "itself", "ourselves", "themselves", "who", "whom", "whose", "which", "what", "someone",
    "something", "anyone", "anything", "everyone", "everything", "nobody", "nothing",
];
const PREPOSITIONS: &[&str] = &[
    "of", "in", "on", "at", "by", "for", "with", "about", "against", "between", "into", "through", "during",
    "before", "after", "above", "below", "from", "up", "down", "out", "off", "over", "under", "to", "than",
    "near", "without", "within", "across", "behind", "beside", "toward", "towards", "upon", "onto",
];
const CONJUNCTIONS: &[&str] = &[
    "and", "or", "but", "nor", "so", "yet", "if", "because", "while", "although", "though", "unless", "since",
    "when", "where", "whether", "as",
];
const AUXILIARIES: &[&str] = &[
    "am", "is", "are", "was", "were", "be", "been", "being", "do", "does", "did", "have", "has", "had",
    "will", "would", "can", "could", "shall", "should", "may", "might", "must", "'s", "'re", "'m", "'ll",
    "'ve", "'d", "n't", "not",
];
const ADVERBS: &[&str] = &[
    "very", "really", "always", "never", "often", "sometimes", "too", "also", "just", "quite", "here", "there",
    "now", "then", "today", "tomorrow", "yesterday", "soon", "almost", "again", "still", "already", "well",
    "fast", "hard", "together", "away", "home",
];
const ADJECTIVES: &[&str] = &[
    "good", "bad", "big", "small", "happy", "sad", "new", "old", "great", "little", "hot", "cold", "red",
    "blue", "green", "yellow", "black", "white", "young", "long", "short", "high", "low", "nice", "pretty",
    "cute", "funny", "angry", "tired", "hungry", "sweet", "warm", "cool", "dark", "bright", "quick", "slow",
];

#[derive(Debug, Clone, Default)]
pub struct RuleAnnotator {
    dictionary: HashMap<String, Category>,
}

impl RuleAnnotator {
    pub fn new() -> Self { Self::default() }

    /// Load `word<TAB>TAG` overrides (`NOUN`, `VERB`, `ADJ`, `ADV`, anything
    /// else is `OTHER`). Blank lines and `#` comments are skipped.
    pub fn with_dictionary(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let mut annotator = Self::new();
        for (i, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') { continue; }
            let Some((word, tag)) = line.split_once('\t') else {
                return Err(Error::LexiconMalformed {
                    path: path.to_path_buf(),
                    line: i + 1,
                    reason: "expected word<TAB>TAG".to_string(),
                });
            };
            let category = tag.parse::<Category>().map_err(|e| Error::LexiconMalformed {
                path: path.to_path_buf(),
                line: i + 1,
                reason: e.to_string(),
            })?;
            annotator.insert(word, category);
        }
        tracing::info!(path = %path.display(), words = annotator.dictionary.len(), "loaded tag dictionary");
        Ok(annotator)
    }

    pub fn insert(&mut self, word: &str, category: Category) {
        self.dictionary.insert(word.trim().to_lowercase(), category);
    }

    fn categorize(&self, word: &str, lower: &str, prev: Option<&str>) -> Category {
        if !word.chars().any(char::is_alphabetic) { return Category::Other; }
        if let Some(&c) = self.dictionary.get(lower) { return c; }
        let closed = [DETERMINERS, SUBJECT_PRONOUNS, OTHER_PRONOUNS, PREPOSITIONS, CONJUNCTIONS, AUXILIARIES];
        if closed.iter().any(|list| list.contains(&lower)) { return Category::Other; }
        if ADVERBS.contains(&lower) { return Category::Adverb; }
        if ADJECTIVES.contains(&lower) { return Category::Adjective; }

        let after_subject_or_to = prev.is_some_and(|p| SUBJECT_PRONOUNS.contains(&p) || p == "to" || AUXILIARIES.contains(&p));
        if after_subject_or_to && !lower.ends_with("ly") { return Category::Verb; }
        by_suffix(lower)
    }
}

fn by_suffix(lower: &str) -> Category {
    let n = lower.chars().count();
    let ends = |suffixes: &[&str]| suffixes.iter().any(|s| lower.ends_with(s) && n > s.len() + 2);
    if ends(&["ly"]) { return Category::Adverb; }
    if ends(&["tion", "sion", "ment", "ness", "ity", "ship", "ism", "hood"]) { return Category::Noun; }
    if ends(&["ous", "ful", "ive", "able", "ible", "less", "ish", "ic", "ary"]) { return Category::Adjective; }
    if ends(&["ing", "ed", "ize", "ise", "ify"]) { return Category::Verb; }
    Category::Noun
}

/// Naive inflection stripping for nouns and verbs; `None` when the word is
/// already its own base form.
fn lemmatize(lower: &str, category: Category) -> Option<String> {
    let n = lower.len();
    let lemma = match category {
        Category::Noun | Category::Verb if lower.ends_with("ies") && n > 4 => format!("{}y", &lower[..n - 3]),
        Category::Noun | Category::Verb
            if ["sses", "xes", "ches", "shes", "zes"].iter().any(|s| lower.ends_with(s)) =>
        {
            lower[..n - 2].to_string()
        }
        Category::Verb if lower.ends_with("ing") && n > 5 => lower[..n - 3].to_string(),
        Category::Verb if lower.ends_with("ed") && n > 4 => lower[..n - 2].to_string(),
        Category::Noun | Category::Verb if lower.ends_with('s') && !lower.ends_with("ss") && n > 3 => {
            lower[..n - 1].to_string()
        }
        _ => return None,
    };
    Some(lemma)
}

impl TokenAnnotator for RuleAnnotator {
    fn annotate(&self, text: &str) -> anyhow::Result<Vec<AnnotatedToken>> {
        let mut tokens = Vec::new();
        let mut prev: Option<String> = None;
        for (start, segment) in text.split_word_bound_indices() {
            if segment.trim().is_empty() { continue; }
            let lower = segment.to_lowercase();
            let category = self.categorize(segment, &lower, prev.as_deref());
            let mut token = AnnotatedToken::new(segment, category, start..start + segment.len());
            if let Some(lemma) = lemmatize(&lower, category) { token = token.with_lemma(lemma); }
            tokens.push(token);
            prev = Some(lower);
        }
        Ok(tokens)
    }
}
