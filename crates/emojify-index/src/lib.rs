//! Emoji embedding index: offline build, on-disk cache, and top-K ranking.
//!
//! Typical flow:
//! 1) Load the lexicon and an embedding provider
//! 2) `IndexBuilder::build` (or `strategy::load_or_build` to reuse the cache)
//! 3) `SimilarityRanker::rank` per query vector

pub mod cache;
pub mod index;
pub mod index_build;
pub mod search;
pub mod strategy;

pub use index::{CoverageGap, EmojiEmbeddingIndex, GapReason, IndexEntry};
pub use index_build::IndexBuilder;
pub use search::{cosine_similarity, SimilarityRanker};
pub use strategy::{load_or_build, CachePolicy};
