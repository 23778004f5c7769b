use std::env;

use emojify_cli::{init_tracing, load_settings};
use emojify_embed::get_default_provider;
use emojify_index::{load_or_build, CachePolicy};

fn main() -> anyhow::Result<()> {
    init_tracing();
    let mut policy = CachePolicy::Reuse;
    let mut list_gaps = false;
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--rebuild" | "-r" => policy = CachePolicy::Rebuild,
            "--gaps" => list_gaps = true,
            other => { eprintln!("Unknown argument: {other}\nUsage: emojify-index [--rebuild] [--gaps]"); std::process::exit(2); }
        }
    }
    let settings = load_settings().map_err(|e| { eprintln!("Error loading config: {e}"); e })?;

    println!("Emoji Index Builder\n===================");
    println!("Strategy: {}", settings.strategy);
    println!("Lexicon: {}", settings.lexicon_path.display());
    if let Some(p) = &settings.index_cache_path { println!("Cache: {}", p.display()); }

    let provider = get_default_provider(&settings)?;
    let index = load_or_build(&settings, &provider, policy)?;

    println!("\n✅ Index ready: {} emoji, dim {}, provider {}", index.len(), index.dim(), index.provider_id());
    println!("⚠️  Coverage gaps: {}", index.coverage_gaps().len());
    if list_gaps {
        for gap in index.coverage_gaps() {
            println!("  {} {:?} ({} words tried)", gap.emoji, gap.reason, gap.words_tried);
        }
    }
    Ok(())
}
