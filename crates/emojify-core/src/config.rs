//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars
//! (nested keys separated by `__`, e.g. `APP_ENHANCER__TOP_K=3`). Provides
//! helpers to expand `~` and `${VAR}` and to resolve relative paths against
//! the directory the config files were read from.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::lexicon::CsvHeader;
use crate::types::{Aggregation, DEFAULT_TOP_K};

pub struct Config {
    figment: Figment,
    base_dir: PathBuf,
}

impl Config {
    /// Load from the current working directory using `RUST_ENV` (default `dev`).
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_from(Path::new("."), &env_name)
    }

    pub fn load_from(base_dir: &Path, env_name: &str) -> anyhow::Result<Self> {
        let mut figment = Figment::new().merge(Toml::file(base_dir.join("config.toml")));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file(base_dir.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(base_dir.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(base_dir.join("config.test.toml"))),
            other => tracing::debug!(env = other, "no environment overlay for this RUST_ENV"),
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment, base_dir: base_dir.to_path_buf() };
        config.settings()?.validate()?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    /// The `[enhancer]` section with every path resolved against the config
    /// directory. A missing section yields the defaults.
    pub fn settings(&self) -> anyhow::Result<EnhancerSettings> {
        let settings: EnhancerSettings = if self.figment.contains("enhancer") {
            self.get("enhancer")?
        } else {
            EnhancerSettings::default()
        };
        Ok(settings.resolved(&self.base_dir))
    }
}

/// Runtime options for index construction and enhancement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EnhancerSettings {
    /// Lexicon file (`.csv` / `.tsv` / `.txt`) or a directory of them.
    pub lexicon_path: PathBuf,
    /// Header handling for CSV lexicons: `detect`, `present` or `absent`.
    pub lexicon_header: CsvHeader,
    /// Pretrained word-vector table (word2vec text/binary or GloVe text).
    pub vectors_path: PathBuf,
    /// Read at most this many vectors from `vectors_path`.
    pub vectors_limit: Option<usize>,
    /// Emoji-keyed vector table, required by the `precomputed` strategy.
    pub emoji_vectors_path: Option<PathBuf>,
    /// Where the built index is cached; `None` disables caching.
    pub index_cache_path: Option<PathBuf>,
    pub strategy: Aggregation,
    pub top_k: usize,
    /// Rank tokens of one sentence on the rayon pool.
    pub parallel: bool,
    /// Optional `word<TAB>TAG` file consulted by the rule-based annotator.
    pub tag_dictionary_path: Option<PathBuf>,
    pub show_progress: bool,
}

impl Default for EnhancerSettings {
    fn default() -> Self {
        Self {
            lexicon_path: PathBuf::from("data/emojional_dictionary.csv"),
            lexicon_header: CsvHeader::Detect,
            vectors_path: PathBuf::from("models/GoogleNews-vectors-negative300.bin"),
            vectors_limit: None,
            emoji_vectors_path: None,
            index_cache_path: Some(PathBuf::from("models/emoji_index.json")),
            strategy: Aggregation::MeanPooled,
            top_k: DEFAULT_TOP_K,
            parallel: false,
            tag_dictionary_path: None,
            show_progress: true,
        }
    }
}

impl EnhancerSettings {
    pub fn validate(&self) -> Result<(), Error> {
        if self.top_k == 0 {
            return Err(Error::InvalidConfig("enhancer.top_k must be at least 1".to_string()));
        }
        if self.strategy == Aggregation::Precomputed && self.emoji_vectors_path.is_none() {
            return Err(Error::InvalidConfig(
                "strategy 'precomputed' requires enhancer.emoji_vectors_path".to_string(),
            ));
        }
        Ok(())
    }

    fn resolved(mut self, base: &Path) -> Self {
        let fix = |p: &Path| resolve_with_base(base, p.to_string_lossy());
        self.lexicon_path = fix(&self.lexicon_path);
        self.vectors_path = fix(&self.vectors_path);
        self.emoji_vectors_path = self.emoji_vectors_path.as_deref().map(fix);
        self.index_cache_path = self.index_cache_path.as_deref().map(fix);
        self.tag_dictionary_path = self.tag_dictionary_path.as_deref().map(fix);
        self
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    // Expand env vars first
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    // Expand ~ at start
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
