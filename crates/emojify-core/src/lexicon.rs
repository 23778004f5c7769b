//! Emoji lexicon: each emoji with the phrases that describe it.
//!
//! Two on-disk layouts are accepted:
//! - `.csv`: one row per emoji, `emoji,phrase,phrase,...` (ragged rows,
//!   RFC 4180 quoting, optional header row)
//! - `.tsv` / `.txt`: one row per phrase, `phrase<TAB>emoji`
//!
//! Emoji keep the order in which they were first seen; that order is the
//! tie-breaker for ranking, so loading must be deterministic.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Whether the first CSV row names the columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CsvHeader {
    /// Skip the first row when its first cell reads like a column name
    /// (ASCII letters, digits, `_`, `-`, spaces) rather than an emoji.
    #[default]
    Detect,
    Present,
    Absent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexiconEntry {
    pub emoji: String,
    pub phrases: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct EmojiLexicon {
    entries: Vec<LexiconEntry>,
    by_emoji: HashMap<String, usize>,
}

impl EmojiLexicon {
    pub fn new() -> Self { Self::default() }

    pub fn from_entries<E, P, S>(entries: E) -> Self
    where
        E: IntoIterator<Item = (S, P)>,
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut lexicon = Self::new();
        for (emoji, phrases) in entries {
            let emoji = emoji.into();
            lexicon.ensure_emoji(&emoji);
            for phrase in phrases { lexicon.insert(&emoji, phrase); }
        }
        lexicon
    }

    /// Add `phrase` to `emoji`, creating the entry if needed. Repeated
    /// phrases are kept so their words weigh more in the mean.
    pub fn insert(&mut self, emoji: &str, phrase: impl Into<String>) {
        let phrase = phrase.into();
        let phrase = phrase.trim();
        let idx = self.ensure_emoji(emoji);
        if phrase.is_empty() { return; }
        self.entries[idx].phrases.push(phrase.to_string());
    }

    fn ensure_emoji(&mut self, emoji: &str) -> usize {
        if let Some(&idx) = self.by_emoji.get(emoji) { return idx; }
        let idx = self.entries.len();
        self.entries.push(LexiconEntry { emoji: emoji.to_string(), phrases: Vec::new() });
        self.by_emoji.insert(emoji.to_string(), idx);
        idx
    }

    pub fn extend(&mut self, other: EmojiLexicon) {
        for entry in other.entries {
            self.ensure_emoji(&entry.emoji);
            for phrase in entry.phrases { self.insert(&entry.emoji, phrase); }
        }
    }

    pub fn get(&self, emoji: &str) -> Option<&LexiconEntry> {
        self.by_emoji.get(emoji).map(|&i| &self.entries[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &LexiconEntry> { self.entries.iter() }
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Load a lexicon file, or every lexicon file below a directory (sorted by path).
    pub fn load(path: &Path) -> Result<Self> { Self::load_with_header(path, CsvHeader::Detect) }

    pub fn load_with_header(path: &Path, header: CsvHeader) -> Result<Self> {
        if !path.exists() { return Err(Error::LexiconMissing(path.to_path_buf())); }
        if path.is_dir() {
            let files = list_lexicon_files(path);
            if files.is_empty() { return Err(Error::LexiconMissing(path.to_path_buf())); }
            let mut lexicon = Self::new();
            for file in &files { lexicon.extend(Self::load_file(file, header)?); }
            tracing::info!(dir = %path.display(), files = files.len(), emoji = lexicon.len(), "loaded lexicon directory");
            return Ok(lexicon);
        }
        let lexicon = Self::load_file(path, header)?;
        tracing::info!(path = %path.display(), emoji = lexicon.len(), "loaded lexicon");
        Ok(lexicon)
    }

    fn load_file(path: &Path, header: CsvHeader) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        if is_csv(path) { Self::parse_csv_with_header(&content, path, header) } else { Self::parse_tsv(&content, path) }
    }

    /// `emoji,phrase,phrase,...` with the header row detected.
    pub fn parse_csv(content: &str, origin: &Path) -> Result<Self> {
        Self::parse_csv_with_header(content, origin, CsvHeader::Detect)
    }

    /// Empty cells are skipped, as are rows whose first cell starts with `#`
    /// (the keycap emoji `#️⃣` excepted).
    pub fn parse_csv_with_header(content: &str, origin: &Path, header: CsvHeader) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(content.as_bytes());
        let mut lexicon = Self::new();
        let mut first = true;
        for record in reader.records() {
            let record = record.map_err(|e| {
                let line = e.position().map_or(0, |p| p.line() as usize);
                malformed(origin, line, e.to_string())
            })?;
            let line = record_line(&record);
            let emoji = record.get(0).unwrap_or("");
            if is_comment(emoji) || record.iter().all(str::is_empty) { continue; }
            if std::mem::take(&mut first) && skips_header(header, emoji) { continue; }
            if emoji.is_empty() { return Err(malformed(origin, line, "missing emoji in first column".to_string())); }
            lexicon.ensure_emoji(emoji);
            for phrase in record.iter().skip(1) { lexicon.insert(emoji, phrase); }
        }
        Ok(lexicon)
    }

    /// `phrase<TAB>emoji`, one phrase per row.
    pub fn parse_tsv(content: &str, origin: &Path) -> Result<Self> {
        let mut lexicon = Self::new();
        for (line_no, line) in data_lines(content) {
            let fields: Vec<&str> = line.split('\t').collect();
            let [phrase, emoji] = fields.as_slice() else {
                return Err(malformed(origin, line_no, format!("expected 2 tab-separated fields, found {}", fields.len())));
            };
            let (phrase, emoji) = (phrase.trim(), emoji.trim());
            if phrase.is_empty() || emoji.is_empty() {
                return Err(malformed(origin, line_no, "empty phrase or emoji".to_string()));
            }
            lexicon.insert(emoji, phrase);
        }
        Ok(lexicon)
    }
}

fn malformed(path: &Path, line: usize, reason: String) -> Error {
    Error::LexiconMalformed { path: path.to_path_buf(), line, reason }
}

fn is_csv(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()).is_some_and(|e| e.eq_ignore_ascii_case("csv"))
}

/// Non-blank, non-comment lines with 1-based line numbers.
fn data_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim_end_matches('\r')))
        .filter(|(_, l)| !l.trim().is_empty() && !l.trim_start().starts_with('#'))
}

fn record_line(record: &StringRecord) -> usize {
    record.position().map_or(0, |p| p.line() as usize)
}

fn is_comment(cell: &str) -> bool {
    let mut chars = cell.chars();
    chars.next() == Some('#') && !matches!(chars.next(), Some('\u{fe0f}' | '\u{20e3}'))
}

fn skips_header(header: CsvHeader, first_cell: &str) -> bool {
    match header {
        CsvHeader::Present => true,
        CsvHeader::Absent => false,
        CsvHeader::Detect => {
            !first_cell.is_empty()
                && first_cell.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | ' '))
        }
    }
}

fn list_lexicon_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(root).into_iter().filter_map(|e| e.ok()).filter(|e| e.file_type().is_file()) {
        let path = entry.path();
        let ext = path.extension().and_then(|s| s.to_str()).map(str::to_ascii_lowercase);
        if matches!(ext.as_deref(), Some("csv" | "tsv" | "txt")) { files.push(path.to_path_buf()); }
    }
    files.sort();
    files
}
