use std::io::Cursor;

use emojify_cli::{parse_enhance_args, prompt_selections};
use emojify_core::types::{AnnotatedToken, Category, Suggestion};
use emojify_enhance::{Enhancement, TokenSuggestions};

fn suggestion(emoji: &str, score: f32) -> Suggestion { Suggestion { emoji: emoji.to_string(), score } }

fn two_dogs() -> Enhancement {
    let text = "dog and dog";
    let token = |s: &str, c, start: usize| AnnotatedToken::new(s, c, start..start + s.len());
    Enhancement {
        text: text.to_string(),
        tokens: vec![
            TokenSuggestions { token: token("dog", Category::Noun, 0), suggestions: vec![suggestion("🐶", 0.9), suggestion("🐕", 0.8)] },
            TokenSuggestions { token: token("and", Category::Other, 4), suggestions: vec![] },
            TokenSuggestions { token: token("dog", Category::Noun, 8), suggestions: vec![suggestion("🐶", 0.9), suggestion("🐕", 0.8)] },
        ],
    }
}

#[test]
fn category_flags_combine() {
    let args = parse_enhance_args(["-n", "--adverbs", "run", "fast"]).unwrap();
    assert_eq!(args.categories, vec![Category::Noun, Category::Adverb]);
    assert_eq!(args.text, "run fast");
    assert!(args.interactive);
}

#[test]
fn no_flags_means_every_content_category() {
    let args = parse_enhance_args(["hello"]).unwrap();
    assert_eq!(args.categories, Category::CONTENT.to_vec());
}

#[test]
fn json_disables_prompting() {
    let args = parse_enhance_args(["--json", "hi"]).unwrap();
    assert!(args.json);
    assert!(!args.interactive);
}

#[test]
fn missing_text_and_unknown_flags_fail() {
    assert!(parse_enhance_args(["-n"]).is_err());
    assert!(parse_enhance_args(["--bogus", "text"]).is_err());
}

#[test]
fn prompt_collects_picks_per_position() {
    let enhancement = two_dogs();
    let mut out = Vec::new();
    let picks = prompt_selections(&enhancement, Cursor::new("3\n2\n"), &mut out).unwrap();
    assert_eq!(enhancement.apply(&picks).unwrap(), "dog and dog🐕");

    let shown = String::from_utf8(out).unwrap();
    assert!(shown.contains("Options for dog:"));
    assert!(shown.contains("1. 🐶 (0.90)"));
    assert!(shown.contains("3. Reject all"));
}

#[test]
fn prompt_retries_bad_input_and_stops_at_eof() {
    let enhancement = two_dogs();
    let mut out = Vec::new();
    let picks = prompt_selections(&enhancement, Cursor::new("seven\n9\n1\n"), &mut out).unwrap();
    assert_eq!(picks.len(), 1);
    assert_eq!(picks[0].position, 0);
    assert_eq!(enhancement.apply(&picks).unwrap(), "dog🐶 and dog");
    assert!(String::from_utf8(out).unwrap().contains("Please enter a number from 1 to 3."));
}
