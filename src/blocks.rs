//! Block grouping
//!
//! Coalesces consecutive same-language sentences into blocks.

use crate::lang::{classify, Language, LanguageDetector};
use std::collections::BTreeSet;

/// A maximal run of consecutive sentences sharing one language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub lang: Language,
    pub sentences: Vec<String>,
}

/// Classify each sentence independently, preserving order
pub fn classify_sentences(
    detector: &dyn LanguageDetector,
    sentences: Vec<String>,
) -> Vec<(Language, String)> {
    sentences
        .into_iter()
        .map(|s| (classify(detector, &s), s))
        .collect()
}

/// Group tagged sentences into blocks. Never yields an empty block.
pub fn group_blocks(tagged: Vec<(Language, String)>) -> Vec<Block> {
    let mut blocks: Vec<Block> = Vec::new();
    for (lang, sentence) in tagged {
        match blocks.last_mut() {
            Some(block) if block.lang == lang => block.sentences.push(sentence),
            _ => blocks.push(Block {
                lang,
                sentences: vec![sentence],
            }),
        }
    }
    blocks
}

/// Languages that actually occur in a list of blocks
pub fn languages_present(blocks: &[Block]) -> BTreeSet<Language> {
    blocks.iter().map(|b| b.lang).collect()
}
