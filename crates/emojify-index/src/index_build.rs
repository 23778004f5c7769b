//! Offline construction of the emoji index from a lexicon and a provider.
//!
//! For every lexicon entry the phrases are split into words, each word is
//! looked up, unknown words are dropped, and the survivors are aggregated:
//! 1) `mean-pooled`: one unweighted mean over every known word of every phrase
//! 2) `max-phrase`: one mean per phrase; the ranker scores the best phrase
//!
//! Emoji left with nothing to aggregate are excluded and recorded as
//! coverage gaps; the build itself keeps going.

use indicatif::{ProgressBar, ProgressStyle};

use emojify_core::error::{Error, Result};
use emojify_core::lexicon::{EmojiLexicon, LexiconEntry};
use emojify_core::traits::EmbeddingProvider;
use emojify_core::types::{Aggregation, Embedding};
use emojify_embed::{l2_norm, mean_pool, phrase_words};

use crate::index::{EmojiEmbeddingIndex, GapReason};

pub struct IndexBuilder {
    aggregation: Aggregation,
    show_progress: bool,
}

impl IndexBuilder {
    pub fn new(aggregation: Aggregation) -> Self { Self { aggregation, show_progress: false } }

    pub fn with_progress(mut self, show: bool) -> Self { self.show_progress = show; self }

    pub fn build<P>(&self, lexicon: &EmojiLexicon, provider: &P) -> Result<EmojiEmbeddingIndex>
    where
        P: EmbeddingProvider + ?Sized,
    {
        if self.aggregation == Aggregation::Precomputed {
            return Err(Error::InvalidConfig(
                "precomputed indexes are loaded from an emoji vector table, not built".to_string(),
            ));
        }
        let dim = provider.dim();
        let mut index = EmojiEmbeddingIndex::new(provider.provider_id(), dim, self.aggregation);
        let pb = self.progress_bar(lexicon.len());

        for entry in lexicon.iter() {
            pb.set_message(entry.emoji.clone());
            let (vectors, words_tried) = self.aggregate(entry, provider, dim)?;
            let vectors: Vec<Embedding> = vectors.into_iter().filter(|v| l2_norm(v) > 0.0).collect();
            if !vectors.is_empty() {
                index.push_entry(&entry.emoji, vectors);
            } else if entry.phrases.is_empty() {
                index.push_gap(&entry.emoji, GapReason::NoPhrases, 0);
            } else if self.had_known_word(entry, provider) {
                index.push_gap(&entry.emoji, GapReason::DegenerateVector, words_tried);
            } else {
                index.push_gap(&entry.emoji, GapReason::NoKnownWords, words_tried);
            }
            pb.inc(1);
        }

        pb.finish_and_clear();
        tracing::info!(
            strategy = %self.aggregation,
            provider = provider.provider_id(),
            indexed = index.len(),
            excluded = index.coverage_gaps().len(),
            "built emoji index"
        );
        Ok(index)
    }

    /// Candidate vectors for one entry plus the number of words looked up.
    fn aggregate<P>(&self, entry: &LexiconEntry, provider: &P, dim: usize) -> Result<(Vec<Embedding>, usize)>
    where
        P: EmbeddingProvider + ?Sized,
    {
        let mut words_tried = 0usize;
        let mut all_words = Vec::new();
        let mut per_phrase = Vec::new();
        for phrase in &entry.phrases {
            let mut known = Vec::new();
            for word in phrase_words(phrase) {
                words_tried += 1;
                let Some(v) = provider.lookup(word) else { continue };
                if v.len() != dim { return Err(Error::DimensionMismatch { expected: dim, got: v.len() }); }
                known.push(v);
            }
            match self.aggregation {
                Aggregation::MaxPhrase => per_phrase.extend(mean_pool(&known)),
                _ => all_words.extend(known),
            }
        }
        let vectors = match self.aggregation {
            Aggregation::MaxPhrase => per_phrase,
            _ => mean_pool(&all_words).into_iter().collect(),
        };
        Ok((vectors, words_tried))
    }

    fn had_known_word<P>(&self, entry: &LexiconEntry, provider: &P) -> bool
    where
        P: EmbeddingProvider + ?Sized,
    {
        entry.phrases.iter().flat_map(|p| phrase_words(p)).any(|w| provider.lookup(w).is_some())
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.show_progress { return ProgressBar::hidden(); }
        let pb = ProgressBar::new(len as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} emoji ({percent}%) {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    }
}
