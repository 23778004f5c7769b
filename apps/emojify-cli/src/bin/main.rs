use std::env;
use std::io;

use emojify_cli::{build_engine, init_tracing, load_settings, parse_enhance_args, prompt_selections};
use emojify_index::CachePolicy;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = match parse_enhance_args(env::args().skip(1)) {
        Ok(a) => a,
        Err(e) => { eprintln!("{e}"); std::process::exit(2); }
    };
    let settings = load_settings().map_err(|e| { eprintln!("Error loading config: {e}"); e })?;
    let policy = if args.rebuild_index { CachePolicy::Rebuild } else { CachePolicy::Reuse };
    let engine = build_engine(&settings, policy)?;

    let enhancement = engine.enhance(&args.text, &args.categories)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&enhancement)?);
        return Ok(());
    }
    if !args.interactive {
        for (_, entry) in enhancement.candidates() {
            let options: Vec<String> = entry.suggestions.iter().map(|s| format!("{} ({:.2})", s.emoji, s.score)).collect();
            println!("{}: {}", entry.token.text, options.join("  "));
        }
        return Ok(());
    }

    let selections = prompt_selections(&enhancement, io::stdin().lock(), io::stdout())?;
    println!("Revised text: {}", enhancement.apply(&selections)?);
    Ok(())
}
