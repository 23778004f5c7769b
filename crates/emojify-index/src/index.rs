use serde::{Deserialize, Serialize};

use emojify_core::error::{Error, Result};
use emojify_core::traits::EmbeddingProvider;
use emojify_core::types::{Aggregation, Embedding};
use emojify_embed::{l2_norm, WordVectors};

/// One emoji and its representation. `mean-pooled` and `precomputed`
/// entries hold exactly one vector; `max-phrase` holds one per phrase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub emoji: String,
    pub vectors: Vec<Embedding>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GapReason {
    /// The lexicon lists no phrases for the emoji.
    NoPhrases,
    /// None of the descriptive words are known to the provider.
    NoKnownWords,
    /// Every candidate vector had zero norm.
    DegenerateVector,
}

/// An emoji left out of the index, kept so coverage can be audited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageGap {
    pub emoji: String,
    pub reason: GapReason,
    /// Descriptive words that were looked up (0 for precomputed tables).
    pub words_tried: usize,
}

/// Emoji → vector table queried by the ranker. Read-only once built;
/// entry order is lexicon (or file) order and breaks ranking ties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmojiEmbeddingIndex {
    provider_id: String,
    dim: usize,
    aggregation: Aggregation,
    entries: Vec<IndexEntry>,
    coverage_gaps: Vec<CoverageGap>,
}

impl EmojiEmbeddingIndex {
    pub(crate) fn new(provider_id: &str, dim: usize, aggregation: Aggregation) -> Self {
        Self { provider_id: provider_id.to_string(), dim, aggregation, entries: Vec::new(), coverage_gaps: Vec::new() }
    }

    pub(crate) fn push_entry(&mut self, emoji: &str, vectors: Vec<Embedding>) {
        debug_assert!(!vectors.is_empty());
        self.entries.push(IndexEntry { emoji: emoji.to_string(), vectors });
    }

    pub(crate) fn push_gap(&mut self, emoji: &str, reason: GapReason, words_tried: usize) {
        tracing::warn!(emoji, ?reason, words_tried, "emoji excluded from index");
        self.coverage_gaps.push(CoverageGap { emoji: emoji.to_string(), reason, words_tried });
    }

    /// Index straight from an emoji-keyed vector table (e.g. a pretrained
    /// emoji2vec/emojional file). Rows keep file order; zero rows are gaps.
    /// The table must live in the same space as `provider`.
    pub fn from_emoji_vectors<P>(table: &WordVectors, provider: &P) -> Result<Self>
    where
        P: EmbeddingProvider + ?Sized,
    {
        if table.dim() != provider.dim() {
            return Err(Error::DimensionMismatch { expected: provider.dim(), got: table.dim() });
        }
        let mut index = Self::new(provider.provider_id(), provider.dim(), Aggregation::Precomputed);
        for (emoji, vector) in table.iter() {
            if l2_norm(vector) > 0.0 {
                index.push_entry(emoji, vec![vector.to_vec()]);
            } else {
                index.push_gap(emoji, GapReason::DegenerateVector, 0);
            }
        }
        tracing::info!(indexed = index.len(), excluded = index.coverage_gaps.len(), "loaded precomputed emoji vectors");
        Ok(index)
    }

    pub fn provider_id(&self) -> &str { &self.provider_id }
    pub fn dim(&self) -> usize { self.dim }
    pub fn aggregation(&self) -> Aggregation { self.aggregation }
    pub fn entries(&self) -> &[IndexEntry] { &self.entries }
    pub fn coverage_gaps(&self) -> &[CoverageGap] { &self.coverage_gaps }
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn get(&self, emoji: &str) -> Option<&IndexEntry> {
        self.entries.iter().find(|e| e.emoji == emoji)
    }

    /// The single representative vector of a mean-pooled/precomputed entry
    /// (the first phrase vector under max-phrase).
    pub fn embedding(&self, emoji: &str) -> Option<&[f32]> {
        self.get(emoji).and_then(|e| e.vectors.first()).map(Vec::as_slice)
    }

    /// Check that queries from `provider` are comparable with this index.
    pub fn ensure_compatible<P>(&self, provider: &P) -> Result<()>
    where
        P: EmbeddingProvider + ?Sized,
    {
        if provider.dim() != self.dim {
            return Err(Error::DimensionMismatch { expected: self.dim, got: provider.dim() });
        }
        if provider.provider_id() != self.provider_id {
            return Err(Error::StaleIndex(format!(
                "index built with '{}', provider is '{}'",
                self.provider_id,
                provider.provider_id()
            )));
        }
        Ok(())
    }
}
