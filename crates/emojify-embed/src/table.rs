//! In-memory word-vector table loaded from word2vec or GloVe files.
//!
//! Supported layouts:
//! - word2vec text: `<count> <dim>` header, then `word f1 ... fD` per line
//! - GloVe text: same rows without the header
//! - word2vec binary (`.bin`): `<count> <dim>\n`, then per word the UTF-8
//!   word, a space, and D little-endian f32 values, optionally followed by `\n`

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use emojify_core::error::{Error, Result};
use emojify_core::traits::EmbeddingProvider;
use emojify_core::types::Embedding;

pub struct WordVectors {
    id: String,
    dim: usize,
    vocab: Vec<String>,
    index: HashMap<String, usize>,
    /// Flattened [vocab.len() * dim] matrix, rows in file order.
    matrix: Vec<f32>,
}

impl WordVectors {
    fn empty(id: String, dim: usize) -> Self {
        Self { id, dim, vocab: Vec::new(), index: HashMap::new(), matrix: Vec::new() }
    }

    /// Build a table from `(word, vector)` pairs. A repeated word keeps its
    /// first vector.
    pub fn from_entries<I, W>(id: impl Into<String>, dim: usize, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (W, Vec<f32>)>,
        W: Into<String>,
    {
        if dim == 0 { return Err(Error::InvalidConfig("vector dimension cannot be zero".to_string())); }
        let mut table = Self::empty(id.into(), dim);
        for (word, vector) in entries { table.push(word.into(), &vector)?; }
        Ok(table)
    }

    fn push(&mut self, word: String, vector: &[f32]) -> Result<()> {
        if vector.len() != self.dim {
            return Err(Error::DimensionMismatch { expected: self.dim, got: vector.len() });
        }
        if self.index.contains_key(&word) { return Ok(()); }
        self.index.insert(word.clone(), self.vocab.len());
        self.vocab.push(word);
        self.matrix.extend_from_slice(vector);
        Ok(())
    }

    /// Load a table from disk; `.bin` selects the binary word2vec reader.
    /// `limit` caps how many rows are read.
    pub fn load(path: &Path, limit: Option<usize>) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ProviderUnavailable(format!("vector file not found: {}", path.display())));
        }
        let start = Instant::now();
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let reader = BufReader::new(file);
        let stem = path.file_stem().map(|s| s.to_string_lossy().to_string()).unwrap_or_default();
        let binary = path.extension().and_then(|s| s.to_str()).is_some_and(|e| e.eq_ignore_ascii_case("bin"));
        let table = if binary {
            read_binary(reader, &stem, limit).map_err(|e| annotate(path, e))?
        } else {
            read_text(reader, &stem, limit).map_err(|e| annotate(path, e))?
        };
        tracing::info!(
            path = %path.display(),
            words = table.len(),
            dim = table.dim,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "loaded word vectors"
        );
        Ok(table)
    }

    pub fn vector(&self, word: &str) -> Option<&[f32]> {
        self.index.get(word).map(|&i| &self.matrix[i * self.dim..(i + 1) * self.dim])
    }

    /// Rows in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f32])> {
        self.vocab.iter().zip(self.matrix.chunks_exact(self.dim)).map(|(w, v)| (w.as_str(), v))
    }

    pub fn len(&self) -> usize { self.vocab.len() }
    pub fn is_empty(&self) -> bool { self.vocab.is_empty() }
}

impl EmbeddingProvider for WordVectors {
    fn provider_id(&self) -> &str { &self.id }
    fn dim(&self) -> usize { self.dim }
    fn lookup(&self, word: &str) -> Option<Embedding> { self.vector(word).map(<[f32]>::to_vec) }
}

fn annotate(path: &Path, err: Error) -> Error {
    match err {
        Error::ProviderUnavailable(msg) => Error::ProviderUnavailable(format!("{}: {msg}", path.display())),
        Error::Io { source, .. } => Error::io(path, source),
        other => other,
    }
}

fn table_id(kind: &str, stem: &str, dim: usize) -> String { format!("{kind}:{stem}:d{dim}") }

fn parse_header(line: &str) -> Option<(usize, usize)> {
    let mut parts = line.split_whitespace();
    let count = parts.next()?.parse().ok()?;
    let dim = parts.next()?.parse().ok()?;
    if parts.next().is_some() { return None; }
    Some((count, dim))
}

fn read_text<R: BufRead>(reader: R, stem: &str, limit: Option<usize>) -> Result<WordVectors> {
    let limit = limit.unwrap_or(usize::MAX);
    let mut table: Option<WordVectors> = None;
    let mut seen_data = false;
    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| Error::io(stem, e))?;
        let line_no = i + 1;
        let line = if seen_data { line.as_str() } else { line.trim_start_matches('\u{feff}') };
        if line.trim().is_empty() { continue; }
        if !std::mem::replace(&mut seen_data, true) {
            if let Some((_, dim)) = parse_header(line) {
                table = Some(WordVectors::empty(table_id("word2vec", stem, dim), dim));
                continue;
            }
        }
        if table.as_ref().is_some_and(|t| t.len() >= limit) { break; }
        let mut parts = line.split_whitespace();
        let Some(word) = parts.next() else { continue };
        let values = parts
            .map(str::parse::<f32>)
            .collect::<std::result::Result<Vec<f32>, _>>()
            .map_err(|e| Error::ProviderUnavailable(format!("line {line_no}: {e}")))?;
        let table = table.get_or_insert_with(|| WordVectors::empty(table_id("glove", stem, values.len()), values.len()));
        if table.dim == 0 {
            return Err(Error::ProviderUnavailable(format!("line {line_no}: row has no vector values")));
        }
        table.push(word.to_string(), &values)?;
    }
    table.ok_or_else(|| Error::ProviderUnavailable("vector file is empty".to_string()))
}

fn read_binary<R: BufRead>(mut reader: R, stem: &str, limit: Option<usize>) -> Result<WordVectors> {
    let mut header = String::new();
    reader.read_line(&mut header).map_err(|e| Error::io(stem, e))?;
    let (count, dim) = parse_header(&header)
        .ok_or_else(|| Error::ProviderUnavailable(format!("bad word2vec header: {:?}", header.trim())))?;
    if dim == 0 { return Err(Error::ProviderUnavailable("word2vec header declares dim 0".to_string())); }
    let mut table = WordVectors::empty(table_id("word2vec", stem, dim), dim);
    let mut raw = vec![0u8; dim * 4];
    let mut values = vec![0f32; dim];
    for _ in 0..count.min(limit.unwrap_or(usize::MAX)) {
        let mut word = Vec::new();
        reader.read_until(b' ', &mut word).map_err(|e| Error::io(stem, e))?;
        if word.last() != Some(&b' ') {
            return Err(Error::ProviderUnavailable(format!("truncated file after {} words", table.len())));
        }
        word.pop();
        // Rows may be separated by a newline that the next word would otherwise absorb.
        let word = String::from_utf8_lossy(&word).trim_start_matches('\n').to_string();
        reader.read_exact(&mut raw).map_err(|e| Error::io(stem, e))?;
        for (v, bytes) in values.iter_mut().zip(raw.chunks_exact(4)) {
            *v = f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        }
        table.push(word, &values)?;
    }
    Ok(table)
}
