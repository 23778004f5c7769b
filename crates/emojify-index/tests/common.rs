#![allow(dead_code)]

use emojify_core::lexicon::EmojiLexicon;
use emojify_embed::WordVectors;

/// Hand-crafted 3-d space: "apple" sits near red/fruit, far from fast/vehicle.
pub fn fruit_and_car_vectors() -> WordVectors {
    WordVectors::from_entries(
        "test:fruit-car:d3",
        3,
        vec![
            ("red", vec![1.0, 0.0, 0.0]),
            ("fruit", vec![0.8, 0.2, 0.0]),
            ("fast", vec![0.0, 1.0, 0.0]),
            ("vehicle", vec![0.0, 0.8, 0.2]),
            ("apple", vec![0.9, 0.1, 0.05]),
            ("truck", vec![0.05, 0.9, 0.1]),
        ],
    )
    .unwrap()
}

pub fn fruit_and_car_lexicon() -> EmojiLexicon {
    EmojiLexicon::from_entries(vec![("🍎", vec!["red fruit"]), ("🚗", vec!["fast vehicle"])])
}
