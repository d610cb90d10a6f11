//! Text preparation
//!
//! Reads lesson files and turns them into cleaned sentences.

pub mod sanitize;
pub mod sentences;

pub use sanitize::sanitize_sentence;
pub use sentences::{read_text, split_sentences};

/// Split text into sentences, sanitizing each one when `strip_emojis` is set.
/// Sentences that sanitize to nothing are dropped.
pub fn prepare_sentences(text: &str, strip_emojis: bool) -> Vec<String> {
    let sentences = split_sentences(text);
    if !strip_emojis {
        return sentences;
    }
    sentences
        .iter()
        .map(|s| sanitize_sentence(s))
        .filter(|s| !s.is_empty())
        .collect()
}
