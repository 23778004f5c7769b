//! Shared plumbing for the `emojify` and `emojify-index` binaries.

use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};

use emojify_core::config::{Config, EnhancerSettings};
use emojify_core::traits::EmbeddingProvider;
use emojify_core::types::Category;
use emojify_embed::get_default_provider;
use emojify_enhance::{EnhanceOptions, Enhancement, EnhancementOrchestrator, RuleAnnotator, Selection};
use emojify_index::{load_or_build, CachePolicy};

pub type Engine = EnhancementOrchestrator<RuleAnnotator, Box<dyn EmbeddingProvider>>;

/// Log to stderr; `RUST_LOG` overrides the default `info` level.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnhanceArgs {
    pub text: String,
    pub categories: Vec<Category>,
    pub json: bool,
    pub interactive: bool,
    pub rebuild_index: bool,
}

pub const USAGE: &str = "Usage: emojify [-n|--nouns] [-v|--verbs] [-adj|--adjectives] [-adv|--adverbs] \
[--json] [--no-interactive] [--rebuild-index] <text...>";

/// Category flags combine; with none given every content category is used.
pub fn parse_enhance_args<I, S>(args: I) -> Result<EnhanceArgs>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut categories = Vec::new();
    let mut words = Vec::new();
    let (mut json, mut interactive, mut rebuild_index) = (false, true, false);
    for arg in args.into_iter().map(Into::into) {
        let category = match arg.as_str() {
            "-n" | "--nouns" => Some(Category::Noun),
            "-v" | "--verbs" => Some(Category::Verb),
            "-adj" | "--adjectives" => Some(Category::Adjective),
            "-adv" | "--adverbs" => Some(Category::Adverb),
            "--json" => { json = true; None }
            "--no-interactive" => { interactive = false; None }
            "--rebuild-index" => { rebuild_index = true; None }
            "--" => None,
            flag if flag.starts_with('-') && flag.len() > 1 => bail!("unknown flag '{flag}'\n{USAGE}"),
            _ => { words.push(arg); None }
        };
        if let Some(c) = category {
            if !categories.contains(&c) { categories.push(c); }
        }
    }
    if words.is_empty() { bail!("no text given\n{USAGE}"); }
    if categories.is_empty() { categories = Category::CONTENT.to_vec(); }
    // --json never prompts.
    if json { interactive = false; }
    Ok(EnhanceArgs { text: words.join(" "), categories, json, interactive, rebuild_index })
}

/// Provider, index (cached or rebuilt) and annotator wired per `settings`.
pub fn build_engine(settings: &EnhancerSettings, policy: CachePolicy) -> Result<Engine> {
    let provider = get_default_provider(settings)?;
    let index = load_or_build(settings, &provider, policy)?;
    let annotator = match settings.tag_dictionary_path.as_deref() {
        Some(path) => RuleAnnotator::with_dictionary(path)
            .with_context(|| format!("loading tag dictionary from {}", path.display()))?,
        None => RuleAnnotator::new(),
    };
    let options = EnhanceOptions { top_k: settings.top_k, parallel: settings.parallel };
    tracing::info!(emoji = index.len(), gaps = index.coverage_gaps().len(), top_k = settings.top_k, "engine ready");
    Ok(EnhancementOrchestrator::new(annotator, provider, index, options)?)
}

pub fn load_settings() -> Result<EnhancerSettings> {
    let config = Config::load().context("loading configuration")?;
    config.settings()
}

/// Offer each token's suggestions and collect the picks. The last numbered
/// option rejects all; unreadable answers are asked again, end of input
/// rejects the remaining tokens.
pub fn prompt_selections<R, W>(enhancement: &Enhancement, mut input: R, mut output: W) -> Result<Vec<Selection>>
where
    R: BufRead,
    W: Write,
{
    let mut selections = Vec::new();
    for (position, entry) in enhancement.candidates() {
        let options = &entry.suggestions;
        let reject = options.len() + 1;
        writeln!(output, "Options for {}:", entry.token.text)?;
        for (i, s) in options.iter().enumerate() {
            writeln!(output, "{}. {} ({:.2})", i + 1, s.emoji, s.score)?;
        }
        writeln!(output, "{reject}. Reject all")?;
        loop {
            write!(output, "Enter your choice (number): ")?;
            output.flush()?;
            let mut line = String::new();
            if input.read_line(&mut line)? == 0 { return Ok(selections); }
            match line.trim().parse::<usize>() {
                Ok(n) if n == reject => break,
                Ok(n) if (1..reject).contains(&n) => {
                    selections.push(Selection::new(position, options[n - 1].emoji.clone()));
                    break;
                }
                _ => writeln!(output, "Please enter a number from 1 to {reject}.")?,
            }
        }
    }
    Ok(selections)
}
