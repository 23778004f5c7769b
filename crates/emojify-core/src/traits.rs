use crate::types::{AnnotatedToken, Embedding};

/// Word-vector source shared by index construction and query time.
pub trait EmbeddingProvider: Send + Sync {
    /// Stable identifier for the table/model (e.g. `word2vec:GoogleNews:d300`).
    fn provider_id(&self) -> &str;
    /// Embedding dimensionality (D).
    fn dim(&self) -> usize;
    /// Vector for `word`, or `None` when the word is out of vocabulary.
    fn lookup(&self, word: &str) -> Option<Embedding>;
}

/// Splits text into tokens tagged with a coarse grammatical category.
pub trait TokenAnnotator: Send + Sync {
    fn annotate(&self, text: &str) -> anyhow::Result<Vec<AnnotatedToken>>;
}

impl<T: EmbeddingProvider + ?Sized> EmbeddingProvider for Box<T> {
    fn provider_id(&self) -> &str { (**self).provider_id() }
    fn dim(&self) -> usize { (**self).dim() }
    fn lookup(&self, word: &str) -> Option<Embedding> { (**self).lookup(word) }
}

impl<T: TokenAnnotator + ?Sized> TokenAnnotator for Box<T> {
    fn annotate(&self, text: &str) -> anyhow::Result<Vec<AnnotatedToken>> { (**self).annotate(text) }
}
