//! Pick the index source named by the configured strategy, using the cache
//! when it is still valid for the current provider and lexicon.

use anyhow::{Context, Result};

use emojify_core::config::EnhancerSettings;
use emojify_core::error::Error;
use emojify_core::lexicon::EmojiLexicon;
use emojify_core::traits::EmbeddingProvider;
use emojify_core::types::Aggregation;
use emojify_embed::WordVectors;

use crate::cache;
use crate::index::EmojiEmbeddingIndex;
use crate::index_build::IndexBuilder;

/// Whether an existing cache may be reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    #[default]
    Reuse,
    Rebuild,
}

pub fn load_or_build<P>(settings: &EnhancerSettings, provider: &P, policy: CachePolicy) -> Result<EmojiEmbeddingIndex>
where
    P: EmbeddingProvider + ?Sized,
{
    if settings.strategy == Aggregation::Precomputed {
        let path = settings
            .emoji_vectors_path
            .as_deref()
            .ok_or_else(|| Error::InvalidConfig("strategy 'precomputed' requires emoji_vectors_path".to_string()))?;
        let table = WordVectors::load(path, None)
            .with_context(|| format!("loading emoji vectors from {}", path.display()))?;
        return Ok(EmojiEmbeddingIndex::from_emoji_vectors(&table, provider)?);
    }

    let lexicon = EmojiLexicon::load_with_header(&settings.lexicon_path, settings.lexicon_header)
        .with_context(|| format!("loading lexicon from {}", settings.lexicon_path.display()))?;
    let fingerprint = cache::lexicon_fingerprint(&lexicon);

    if let (Some(path), CachePolicy::Reuse) = (settings.index_cache_path.as_deref(), policy) {
        if path.exists() {
            match cache::load_validated(path, provider, settings.strategy, Some(&fingerprint)) {
                Ok(index) => {
                    tracing::info!(path = %path.display(), entries = index.len(), "using cached index");
                    return Ok(index);
                }
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "ignoring index cache; rebuilding"),
            }
        }
    }

    let index = IndexBuilder::new(settings.strategy)
        .with_progress(settings.show_progress)
        .build(&lexicon, provider)?;

    if let Some(path) = settings.index_cache_path.as_deref() {
        // Caching is an optimisation; a failed write only costs a rebuild next time.
        if let Err(e) = cache::save(&index, Some(&fingerprint), path) {
            tracing::warn!(path = %path.display(), error = %e, "could not write index cache");
        }
    }
    Ok(index)
}
