//! On-disk cache of a built index.
//!
//! The file is a single JSON document: format version, the blake3
//! fingerprint of the lexicon it was built from, and the index itself
//! (provider id, dim, aggregation, ordered entries, coverage gaps). Writes
//! go through a temp file in the target directory and are renamed into place.

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

use emojify_core::error::{Error, Result};
use emojify_core::lexicon::EmojiLexicon;
use emojify_core::traits::EmbeddingProvider;
use emojify_core::types::Aggregation;

use crate::index::EmojiEmbeddingIndex;

pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct CachedIndex {
    format_version: u32,
    lexicon_fingerprint: Option<String>,
    index: EmojiEmbeddingIndex,
}

/// Content hash of a lexicon: emoji, phrases, and their order.
pub fn lexicon_fingerprint(lexicon: &EmojiLexicon) -> String {
    let mut hasher = blake3::Hasher::new();
    for entry in lexicon.iter() {
        hasher.update(entry.emoji.as_bytes());
        hasher.update(&[0x1f]);
        for phrase in &entry.phrases {
            hasher.update(phrase.as_bytes());
            hasher.update(&[0x1e]);
        }
        hasher.update(&[0x1d]);
    }
    hasher.finalize().to_hex().to_string()
}

pub fn save(index: &EmojiEmbeddingIndex, lexicon_fingerprint: Option<&str>, path: &Path) -> Result<()> {
    let parent_dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent_dir).map_err(|e| Error::io(parent_dir, e))?;

    let cached = CachedIndex {
        format_version: FORMAT_VERSION,
        lexicon_fingerprint: lexicon_fingerprint.map(str::to_string),
        index: index.clone(),
    };
    let temp_file = NamedTempFile::new_in(parent_dir).map_err(|e| Error::io(parent_dir, e))?;
    {
        let mut writer = BufWriter::new(&temp_file);
        serde_json::to_writer(&mut writer, &cached)
            .map_err(|e| Error::io(path, std::io::Error::new(std::io::ErrorKind::Other, e)))?;
        writer.flush().map_err(|e| Error::io(path, e))?;
    }
    temp_file.persist(path).map_err(|e| Error::io(path, e.error))?;
    tracing::info!(path = %path.display(), entries = index.len(), "saved index cache");
    Ok(())
}

/// Read a cached index and the lexicon fingerprint stored with it.
pub fn load(path: &Path) -> Result<(EmojiEmbeddingIndex, Option<String>)> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let cached: CachedIndex = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| Error::StaleIndex(format!("{}: unreadable cache: {e}", path.display())))?;
    if cached.format_version != FORMAT_VERSION {
        return Err(Error::StaleIndex(format!(
            "{}: format version {} (expected {FORMAT_VERSION})",
            path.display(),
            cached.format_version
        )));
    }
    Ok((cached.index, cached.lexicon_fingerprint))
}

/// Load a cache only if it matches the provider, strategy, and lexicon that
/// would be used to rebuild it; otherwise `Error::StaleIndex`.
pub fn load_validated<P>(
    path: &Path,
    provider: &P,
    aggregation: Aggregation,
    lexicon_fingerprint: Option<&str>,
) -> Result<EmojiEmbeddingIndex>
where
    P: EmbeddingProvider + ?Sized,
{
    let (index, stored_fingerprint) = load(path)?;
    index.ensure_compatible(provider).map_err(|e| Error::StaleIndex(e.to_string()))?;
    if index.aggregation() != aggregation {
        return Err(Error::StaleIndex(format!("cache built with '{}', requested '{aggregation}'", index.aggregation())));
    }
    if lexicon_fingerprint.is_some() && stored_fingerprint.as_deref() != lexicon_fingerprint {
        return Err(Error::StaleIndex("lexicon changed since the cache was built".to_string()));
    }
    Ok(index)
}
