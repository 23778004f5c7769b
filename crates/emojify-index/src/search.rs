use emojify_core::traits::EmbeddingProvider;
use emojify_core::types::{Aggregation, Suggestion, SuggestionResult, DEFAULT_TOP_K};

use crate::index::EmojiEmbeddingIndex;

/// Cosine similarity clamped to [-1, 1]. Zero-norm, empty, or
/// length-mismatched inputs score 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.is_empty() || a.len() != b.len() { return 0.0; }
    let (mut dot, mut na, mut nb) = (0f32, 0f32, 0f32);
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        na += x * x;
        nb += y * y;
    }
    if na == 0.0 || nb == 0.0 { return 0.0; }
    let sim = dot / (na.sqrt() * nb.sqrt());
    if sim.is_finite() { sim.clamp(-1.0, 1.0) } else { 0.0 }
}

/// Linear-scan top-K over an [`EmojiEmbeddingIndex`].
#[derive(Debug, Clone, Copy)]
pub struct SimilarityRanker { k: usize }

impl Default for SimilarityRanker {
    fn default() -> Self { Self { k: DEFAULT_TOP_K } }
}

impl SimilarityRanker {
    pub fn new(k: usize) -> Self { Self { k } }

    pub fn k(&self) -> usize { self.k }

    /// Scores every entry (best vector wins, floored at 0 for max-phrase
    /// indexes), sorts descending with a stable
    /// sort so equal scores keep index order, and keeps the first K.
    pub fn rank(&self, query: &[f32], index: &EmojiEmbeddingIndex) -> SuggestionResult {
        if self.k == 0 || index.is_empty() { return Vec::new(); }
        if query.len() != index.dim() {
            tracing::warn!(query_dim = query.len(), index_dim = index.dim(), "query dimension does not match index");
            return Vec::new();
        }
        // Max-phrase scores start at 0, so an emoji with only opposed phrases scores 0.
        let floor = if index.aggregation() == Aggregation::MaxPhrase { 0.0 } else { f32::NEG_INFINITY };
        let mut scored: Vec<Suggestion> = index
            .entries()
            .iter()
            .map(|entry| Suggestion {
                emoji: entry.emoji.clone(),
                score: entry.vectors.iter().map(|v| cosine_similarity(query, v)).fold(floor, f32::max),
            })
            .collect();
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(self.k);
        scored
    }

    /// Look `word` up and rank it; an unknown word yields no suggestions.
    pub fn rank_word<P>(&self, word: &str, provider: &P, index: &EmojiEmbeddingIndex) -> SuggestionResult
    where
        P: EmbeddingProvider + ?Sized,
    {
        match provider.lookup(word) {
            Some(v) => self.rank(&v, index),
            None => {
                tracing::debug!(word, "no embedding for word");
                Vec::new()
            }
        }
    }
}
