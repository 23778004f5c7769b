use std::fs;
use std::path::Path;
use tempfile::TempDir;

use emojify_core::config::{resolve_with_base, Config};
use emojify_core::error::Error;
use emojify_core::lexicon::{CsvHeader, EmojiLexicon};
use emojify_core::types::{Aggregation, Category};

#[test]
fn csv_lexicon_keeps_row_order_and_skips_header() {
    let content = "emoji,word1,word2\n🍎,red fruit,\"apple, fresh\"\n# comment\n\n🚗,fast vehicle,car\n";
    let lex = EmojiLexicon::parse_csv(content, Path::new("lex.csv")).expect("parse");

    let emoji: Vec<&str> = lex.iter().map(|e| e.emoji.as_str()).collect();
    assert_eq!(emoji, vec!["🍎", "🚗"]);
    assert_eq!(lex.get("🍎").unwrap().phrases, vec!["red fruit", "apple, fresh"]);
    assert_eq!(lex.get("🚗").unwrap().phrases, vec!["fast vehicle", "car"]);
}

#[test]
fn csv_lexicon_skips_empty_cells_but_keeps_repeated_phrases() {
    let content = "😀,happy,,happy,grin\n";
    let lex = EmojiLexicon::parse_csv(content, Path::new("lex.csv")).expect("parse");
    assert_eq!(lex.get("😀").unwrap().phrases, vec!["happy", "happy", "grin"]);
}

#[test]
fn csv_quoted_cell_may_span_lines() {
    let lex = EmojiLexicon::parse_csv("🍎,\"red\nfruit\",apple\n🚗,car\n", Path::new("lex.csv")).expect("parse");
    assert_eq!(lex.get("🍎").unwrap().phrases, vec!["red\nfruit", "apple"]);
    assert_eq!(lex.get("🚗").unwrap().phrases, vec!["car"]);
}

#[test]
fn csv_header_can_be_forced_or_disabled() {
    let content = "symbol,description\n🍎,red fruit\n";
    let detected = EmojiLexicon::parse_csv(content, Path::new("lex.csv")).unwrap();
    assert_eq!(detected.len(), 1);

    let as_data = "🍎,red fruit\n🚗,car\n";
    let forced = EmojiLexicon::parse_csv_with_header(as_data, Path::new("lex.csv"), CsvHeader::Present).unwrap();
    assert!(forced.get("🍎").is_none());
    assert_eq!(forced.len(), 1);

    let absent = EmojiLexicon::parse_csv_with_header(content, Path::new("lex.csv"), CsvHeader::Absent).unwrap();
    assert_eq!(absent.len(), 2);
    assert!(absent.get("symbol").is_some());
}

#[test]
fn keycap_hash_row_is_not_a_comment() {
    let lex = EmojiLexicon::parse_csv("# notes\n#️⃣,number sign\n", Path::new("lex.csv")).unwrap();
    let emoji: Vec<&str> = lex.iter().map(|e| e.emoji.as_str()).collect();
    assert_eq!(emoji, vec!["#️⃣"]);
}

#[test]
fn csv_row_without_phrases_still_creates_entry() {
    let lex = EmojiLexicon::parse_csv("🫥\n", Path::new("lex.csv")).expect("parse");
    assert_eq!(lex.len(), 1);
    assert!(lex.get("🫥").unwrap().phrases.is_empty());
}

#[test]
fn csv_row_without_emoji_reports_line_number() {
    let content = "🍎,red fruit\n\"\",orphan phrase\n";
    let err = EmojiLexicon::parse_csv(content, Path::new("lex.csv")).unwrap_err();
    match err {
        Error::LexiconMalformed { line, .. } => assert_eq!(line, 2),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn tsv_lexicon_groups_phrases_by_emoji() {
    let content = "red fruit\t🍎\nfast vehicle\t🚗\nrapid car\t🚗\ngreen apple\t🍎\n";
    let lex = EmojiLexicon::parse_tsv(content, Path::new("dict.txt")).expect("parse");
    let emoji: Vec<&str> = lex.iter().map(|e| e.emoji.as_str()).collect();
    assert_eq!(emoji, vec!["🍎", "🚗"]);
    assert_eq!(lex.get("🍎").unwrap().phrases, vec!["red fruit", "green apple"]);
}

#[test]
fn tsv_row_with_wrong_field_count_is_malformed() {
    let err = EmojiLexicon::parse_tsv("ok\t🍎\nbroken line\n", Path::new("dict.txt")).unwrap_err();
    assert!(matches!(err, Error::LexiconMalformed { line: 2, .. }), "got {err}");
}

#[test]
fn missing_lexicon_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let err = EmojiLexicon::load(&tmp.path().join("nope.csv")).unwrap_err();
    assert!(matches!(err, Error::LexiconMissing(_)));
}

#[test]
fn directory_lexicon_merges_files_in_path_order() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    fs::create_dir_all(dir.join("b")).unwrap();
    fs::write(dir.join("b/more.tsv"), "speedy car\t🚗\nsun\t☀️\n").unwrap();
    fs::write(dir.join("a.csv"), "🚗,fast vehicle\n🍎,red fruit\n").unwrap();
    fs::write(dir.join("notes.md"), "ignored").unwrap();

    let lex = EmojiLexicon::load(dir).expect("load dir");
    let emoji: Vec<&str> = lex.iter().map(|e| e.emoji.as_str()).collect();
    assert_eq!(emoji, vec!["🚗", "🍎", "☀️"]);
    assert_eq!(lex.get("🚗").unwrap().phrases, vec!["fast vehicle", "speedy car"]);
}

#[test]
fn config_defaults_when_files_absent() {
    let tmp = TempDir::new().unwrap();
    let config = Config::load_from(tmp.path(), "test").expect("config");
    let settings = config.settings().expect("settings");
    assert_eq!(settings.top_k, 5);
    assert_eq!(settings.strategy, Aggregation::MeanPooled);
    assert_eq!(settings.lexicon_path, tmp.path().join("data/emojional_dictionary.csv"));
}

#[test]
fn config_env_overlay_overrides_base_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("config.toml"),
        "[enhancer]\nlexicon_path = \"lex/dict.tsv\"\ntop_k = 3\nstrategy = \"mean-pooled\"\n",
    )
    .unwrap();
    fs::write(tmp.path().join("config.test.toml"), "[enhancer]\nstrategy = \"max-phrase\"\n").unwrap();

    let config = Config::load_from(tmp.path(), "test").expect("config");
    let settings = config.settings().expect("settings");
    assert_eq!(settings.top_k, 3);
    assert_eq!(settings.strategy, Aggregation::MaxPhrase);
    assert_eq!(settings.lexicon_path, tmp.path().join("lex/dict.tsv"));
    assert_eq!(settings.lexicon_header, CsvHeader::Detect);
}

#[test]
fn config_reads_lexicon_header_mode() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), "[enhancer]\nlexicon_header = \"present\"\n").unwrap();
    let settings = Config::load_from(tmp.path(), "test").unwrap().settings().unwrap();
    assert_eq!(settings.lexicon_header, CsvHeader::Present);
}

#[test]
fn config_rejects_zero_top_k() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), "[enhancer]\ntop_k = 0\n").unwrap();
    assert!(Config::load_from(tmp.path(), "test").is_err());
}

#[test]
fn precomputed_strategy_requires_emoji_vectors() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), "[enhancer]\nstrategy = \"precomputed\"\n").unwrap();
    assert!(Config::load_from(tmp.path(), "test").is_err());
}

#[test]
fn absolute_paths_are_not_rebased() {
    let base = Path::new("/srv/app");
    assert_eq!(resolve_with_base(base, "/data/lex.csv"), Path::new("/data/lex.csv"));
    assert_eq!(resolve_with_base(base, "lex.csv"), Path::new("/srv/app/lex.csv"));
}

#[test]
fn category_tags_parse_from_short_and_long_forms() {
    assert_eq!("ADJ".parse::<Category>().unwrap(), Category::Adjective);
    assert_eq!("adverb".parse::<Category>().unwrap(), Category::Adverb);
    assert_eq!("PROPN".parse::<Category>().unwrap(), Category::Noun);
    assert_eq!("DET".parse::<Category>().unwrap(), Category::Other);
    assert!("".parse::<Category>().is_err());
}
