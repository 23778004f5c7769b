/// Words of a descriptive phrase. Phrases are split on whitespace only; a
/// word carrying punctuation simply fails the vocabulary lookup.
pub fn phrase_words(phrase: &str) -> impl Iterator<Item = &str> {
    phrase.split_whitespace()
}
