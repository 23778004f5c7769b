//! Sentence-level emoji suggestions.
//!
//! [`EnhancementOrchestrator`] annotates text, ranks the tokens whose
//! category was requested, and returns every token in its original position
//! so callers can place chosen emoji back into the text with
//! [`Enhancement::apply`].

use anyhow::{bail, Result};
use rayon::prelude::*;
use serde::Serialize;

use emojify_core::error::Error;
use emojify_core::traits::{EmbeddingProvider, TokenAnnotator};
use emojify_core::types::{AnnotatedToken, Category, SuggestionResult, DEFAULT_TOP_K};
use emojify_index::{EmojiEmbeddingIndex, SimilarityRanker};

pub mod annotate;

pub use annotate::RuleAnnotator;

#[derive(Debug, Clone, Copy)]
pub struct EnhanceOptions {
    pub top_k: usize,
    /// Rank the tokens of one sentence on the rayon pool. Results are
    /// identical to the sequential path.
    pub parallel: bool,
}

impl Default for EnhanceOptions {
    fn default() -> Self { Self { top_k: DEFAULT_TOP_K, parallel: false } }
}

/// A token and its ranked emoji; empty when the token was not requested or
/// has no embedding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenSuggestions {
    pub token: AnnotatedToken,
    pub suggestions: SuggestionResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enhancement {
    pub text: String,
    pub tokens: Vec<TokenSuggestions>,
}

/// Put `emoji` directly after the token at `position` in [`Enhancement::tokens`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub position: usize,
    pub emoji: String,
}

impl Selection {
    pub fn new(position: usize, emoji: impl Into<String>) -> Self { Self { position, emoji: emoji.into() } }
}

impl Enhancement {
    /// Positions and tokens that received at least one suggestion.
    pub fn candidates(&self) -> impl Iterator<Item = (usize, &TokenSuggestions)> {
        self.tokens.iter().enumerate().filter(|(_, t)| !t.suggestions.is_empty())
    }

    /// Insert each selected emoji after its token's byte span. Edits are
    /// positional, so a word that occurs twice is only changed where chosen.
    /// Several selections on one token are inserted in the order given.
    pub fn apply(&self, selections: &[Selection]) -> Result<String> {
        let mut inserts: Vec<(usize, &str)> = Vec::with_capacity(selections.len());
        for sel in selections {
            let Some(tok) = self.tokens.get(sel.position) else {
                bail!("selection refers to token {} but the sentence has {} tokens", sel.position, self.tokens.len());
            };
            let at = tok.token.span.end;
            if at > self.text.len() || !self.text.is_char_boundary(at) {
                bail!("token {} span {:?} does not fit the text", sel.position, tok.token.span);
            }
            inserts.push((at, sel.emoji.as_str()));
        }
        inserts.sort_by_key(|(at, _)| *at);

        let extra: usize = inserts.iter().map(|(_, e)| e.len()).sum();
        let mut out = String::with_capacity(self.text.len() + extra);
        let mut last = 0;
        for (at, emoji) in inserts {
            out.push_str(&self.text[last..at]);
            out.push_str(emoji);
            last = at;
        }
        out.push_str(&self.text[last..]);
        Ok(out)
    }
}

pub struct EnhancementOrchestrator<A, P>
where
    A: TokenAnnotator,
    P: EmbeddingProvider,
{
    annotator: A,
    provider: P,
    index: EmojiEmbeddingIndex,
    ranker: SimilarityRanker,
    parallel: bool,
}

impl<A, P> EnhancementOrchestrator<A, P>
where
    A: TokenAnnotator,
    P: EmbeddingProvider,
{
    /// Fails if `index` was built in a different embedding space than `provider`.
    pub fn new(annotator: A, provider: P, index: EmojiEmbeddingIndex, options: EnhanceOptions) -> Result<Self, Error> {
        index.ensure_compatible(&provider)?;
        Ok(Self { annotator, provider, index, ranker: SimilarityRanker::new(options.top_k), parallel: options.parallel })
    }

    pub fn index(&self) -> &EmojiEmbeddingIndex { &self.index }

    pub fn enhance(&self, text: &str, categories: &[Category]) -> Result<Enhancement> {
        let annotated = self.annotator.annotate(text)?;
        let rank_one = |token: AnnotatedToken| {
            let suggestions = if categories.contains(&token.category) { self.suggest(&token) } else { Vec::new() };
            TokenSuggestions { token, suggestions }
        };
        let tokens: Vec<TokenSuggestions> = if self.parallel {
            annotated.into_par_iter().map(rank_one).collect()
        } else {
            annotated.into_iter().map(rank_one).collect()
        };
        tracing::debug!(
            tokens = tokens.len(),
            with_suggestions = tokens.iter().filter(|t| !t.suggestions.is_empty()).count(),
            "enhanced text"
        );
        Ok(Enhancement { text: text.to_string(), tokens })
    }

    /// Ranks the first of surface form, lowercased form, and lemma that the
    /// provider knows. Unknown tokens get no suggestions.
    pub fn suggest(&self, token: &AnnotatedToken) -> SuggestionResult {
        let lower = token.text.to_lowercase();
        let forms = [Some(token.text.as_str()), Some(lower.as_str()), token.lemma.as_deref()];
        for form in forms.into_iter().flatten() {
            if let Some(v) = self.provider.lookup(form) {
                return self.ranker.rank(&v, &self.index);
            }
        }
        tracing::debug!(token = %token.text, "no embedding for token");
        Vec::new()
    }
}
