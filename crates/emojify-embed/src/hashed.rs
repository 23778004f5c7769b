use std::hash::{Hash, Hasher};

use twox_hash::XxHash64;

use emojify_core::traits::EmbeddingProvider;
use emojify_core::types::Embedding;

use crate::pool::l2_normalize;

/// Deterministic provider for tests and offline development.
///
/// Hashes the character trigrams of `<word>` into `dim` buckets, so words
/// that share spelling share direction. Any word containing an alphanumeric
/// character is "known"; everything else is out of vocabulary.
pub struct HashedProvider { dim: usize, id: String }

impl HashedProvider {
    pub fn new(dim: usize) -> Self {
        Self { dim, id: format!("hashed:trigram:d{dim}") }
    }
}

impl EmbeddingProvider for HashedProvider {
    fn provider_id(&self) -> &str { &self.id }
    fn dim(&self) -> usize { self.dim }

    fn lookup(&self, word: &str) -> Option<Embedding> {
        if self.dim == 0 || !word.chars().any(char::is_alphanumeric) { return None; }
        let padded: Vec<char> = std::iter::once('<').chain(word.to_lowercase().chars()).chain(std::iter::once('>')).collect();
        let mut v = vec![0f32; self.dim];
        for (i, gram) in padded.windows(3.min(padded.len())).enumerate() {
            let mut hasher = XxHash64::with_seed(0);
            gram.hash(&mut hasher);
            let h = hasher.finish();
            let idx = (h as usize) % self.dim;
            let val = (((h >> 32) as u32) as f32) / (u32::MAX as f32);
            v[idx] += val + (i as f32 % 3.0) * 0.01;
        }
        l2_normalize(&mut v);
        Some(v)
    }
}
