use emojify_core::lexicon::EmojiLexicon;
use emojify_core::types::{Aggregation, Category};
use emojify_embed::{HashedProvider, WordVectors};
use emojify_enhance::{EnhanceOptions, EnhancementOrchestrator, RuleAnnotator, Selection};
use emojify_index::IndexBuilder;

fn vectors() -> WordVectors {
    WordVectors::from_entries(
        "test:d3",
        3,
        vec![
            ("red", vec![1.0, 0.0, 0.0]),
            ("fruit", vec![0.8, 0.2, 0.0]),
            ("fast", vec![0.0, 1.0, 0.0]),
            ("vehicle", vec![0.0, 0.8, 0.2]),
            ("dog", vec![0.0, 0.1, 1.0]),
            ("apple", vec![0.9, 0.1, 0.05]),
            ("like", vec![0.3, 0.3, 0.3]),
        ],
    )
    .unwrap()
}

fn orchestrator(options: EnhanceOptions) -> EnhancementOrchestrator<RuleAnnotator, WordVectors> {
    let provider = vectors();
    let lexicon = EmojiLexicon::from_entries(vec![
        ("🍎", vec!["red fruit"]),
        ("🚗", vec!["fast vehicle"]),
        ("🐶", vec!["dog"]),
    ]);
    let index = IndexBuilder::new(Aggregation::MeanPooled).build(&lexicon, &provider).unwrap();
    EnhancementOrchestrator::new(RuleAnnotator::new(), provider, index, options).unwrap()
}

#[test]
fn nouns_only_keeps_positions_and_suggests_for_apples() {
    let engine = orchestrator(EnhanceOptions::default());
    let result = engine.enhance("She likes apples.", &[Category::Noun]).expect("enhance");

    assert_eq!(result.text, "She likes apples.");
    let words: Vec<&str> = result.tokens.iter().map(|t| t.token.text.as_str()).collect();
    assert_eq!(words, vec!["She", "likes", "apples", "."]);

    let non_empty: Vec<&str> = result.candidates().map(|(_, t)| t.token.text.as_str()).collect();
    assert_eq!(non_empty, vec!["apples"]);
    assert_eq!(result.tokens[2].suggestions[0].emoji, "🍎");
    assert!(result.tokens[2].suggestions.len() <= 5);
}

#[test]
fn requested_verbs_use_the_lemma() {
    let engine = orchestrator(EnhanceOptions::default());
    let result = engine.enhance("She likes apples.", &[Category::Verb]).unwrap();
    assert!(!result.tokens[1].suggestions.is_empty(), "'likes' resolves through lemma 'like'");
    assert!(result.tokens[2].suggestions.is_empty());
}

#[test]
fn unknown_words_yield_empty_suggestions_without_error() {
    let engine = orchestrator(EnhanceOptions::default());
    let result = engine.enhance("She likes zeppelins.", &Category::CONTENT).unwrap();
    assert_eq!(result.tokens.len(), 4);
    assert!(result.tokens[2].suggestions.is_empty());
}

#[test]
fn surface_form_falls_back_to_lowercase() {
    let engine = orchestrator(EnhanceOptions::default());
    let result = engine.enhance("Apple", &[Category::Noun]).unwrap();
    assert_eq!(result.tokens[0].suggestions[0].emoji, "🍎");
}

#[test]
fn apply_targets_the_selected_occurrence() {
    let engine = orchestrator(EnhanceOptions::default());
    let result = engine.enhance("The dog saw the dog.", &[Category::Noun]).unwrap();
    let dogs: Vec<usize> = result.candidates().map(|(i, _)| i).collect();
    assert_eq!(dogs, vec![1, 4]);

    assert_eq!(result.apply(&[Selection::new(4, "🐶")]).unwrap(), "The dog saw the dog🐶.");
    assert_eq!(result.apply(&[Selection::new(1, "🐶")]).unwrap(), "The dog🐶 saw the dog.");
    assert_eq!(
        result.apply(&[Selection::new(4, "🐕"), Selection::new(1, "🐶")]).unwrap(),
        "The dog🐶 saw the dog🐕."
    );
    assert_eq!(result.apply(&[]).unwrap(), "The dog saw the dog.");
}

#[test]
fn apply_rejects_unknown_positions() {
    let engine = orchestrator(EnhanceOptions::default());
    let result = engine.enhance("She likes apples.", &[Category::Noun]).unwrap();
    assert!(result.apply(&[Selection::new(99, "🍎")]).is_err());
}

#[test]
fn parallel_matches_sequential() {
    let provider = HashedProvider::new(32);
    let lexicon = EmojiLexicon::from_entries(vec![
        ("😀", vec!["happy face"]),
        ("🐶", vec!["dog puppy"]),
        ("🌧️", vec!["rain cloud"]),
        ("🏃", vec!["run running"]),
    ]);
    let index = IndexBuilder::new(Aggregation::MeanPooled).build(&lexicon, &provider).unwrap();
    let text = "The happy dog runs quickly through the cold rain with another dog.";

    let seq = EnhancementOrchestrator::new(RuleAnnotator::new(), HashedProvider::new(32), index.clone(), EnhanceOptions { top_k: 3, parallel: false }).unwrap();
    let par = EnhancementOrchestrator::new(RuleAnnotator::new(), provider, index, EnhanceOptions { top_k: 3, parallel: true }).unwrap();

    let a = seq.enhance(text, &Category::CONTENT).unwrap();
    let b = par.enhance(text, &Category::CONTENT).unwrap();
    assert_eq!(a, b);
    assert!(a.tokens.iter().all(|t| t.suggestions.len() <= 3));
}

#[test]
fn orchestrator_rejects_index_from_other_space() {
    let provider = vectors();
    let index = IndexBuilder::new(Aggregation::MeanPooled)
        .build(&EmojiLexicon::from_entries(vec![("🍎", vec!["red fruit"])]), &provider)
        .unwrap();
    let err = EnhancementOrchestrator::new(RuleAnnotator::new(), HashedProvider::new(3), index, EnhanceOptions::default());
    assert!(err.is_err());
}
