//! Word-vector providers: pretrained tables on disk plus a hashed stand-in.

use anyhow::{Context, Result};

use emojify_core::config::EnhancerSettings;
use emojify_core::traits::EmbeddingProvider;

pub mod hashed;
pub mod pool;
pub mod table;
pub mod tokenize;

pub use hashed::HashedProvider;
pub use pool::{l2_norm, l2_normalize, mean_pool};
pub use table::WordVectors;
pub use tokenize::phrase_words;

/// Dimensionality of the hashed stand-in, matching the common 300-d tables.
pub const FAKE_EMBEDDING_DIM: usize = 300;

pub fn use_fake_embeddings() -> bool {
    std::env::var("APP_USE_FAKE_EMBEDDINGS")
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// The provider named by `settings`, or the hashed provider when
/// `APP_USE_FAKE_EMBEDDINGS=1`.
pub fn get_default_provider(settings: &EnhancerSettings) -> Result<Box<dyn EmbeddingProvider>> {
    if use_fake_embeddings() {
        tracing::info!(dim = FAKE_EMBEDDING_DIM, "using hashed embeddings");
        return Ok(Box::new(HashedProvider::new(FAKE_EMBEDDING_DIM)));
    }
    let table = WordVectors::load(&settings.vectors_path, settings.vectors_limit)
        .with_context(|| format!("loading word vectors from {}", settings.vectors_path.display()))?;
    Ok(Box::new(table))
}
