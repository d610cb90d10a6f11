//! Sentence splitting
//!
//! Deliberately simple: a sentence ends at a run of `.`, `!` or `?`
//! followed by whitespace.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::path::Path;

lazy_static! {
    static ref PARAGRAPH_BREAK: Regex = Regex::new(r"([.!?]?)[^\S\n]*\n\s*").unwrap();
    static ref SENTENCE_END: Regex = Regex::new(r"[.!?]+\s+").unwrap();
}

/// Read a UTF-8 file, replacing undecodable bytes
pub fn read_text(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Turn every newline run into a sentence boundary
fn join_paragraphs(text: &str) -> String {
    PARAGRAPH_BREAK
        .replace_all(text, |caps: &Captures| {
            if caps[1].is_empty() {
                ". ".to_string()
            } else {
                format!("{} ", &caps[1])
            }
        })
        .into_owned()
}

/// Split text into trimmed sentences longer than one character,
/// keeping terminal punctuation attached
pub fn split_sentences(text: &str) -> Vec<String> {
    let text = join_paragraphs(text);
    let mut sentences = Vec::new();
    let mut start = 0;

    for m in SENTENCE_END.find_iter(&text) {
        let punct_len = m.as_str().trim_end().len();
        push_fragment(&mut sentences, &text[start..m.start() + punct_len]);
        start = m.end();
    }
    push_fragment(&mut sentences, &text[start..]);

    sentences
}

fn push_fragment(sentences: &mut Vec<String>, fragment: &str) {
    let fragment = fragment.trim();
    if fragment.chars().count() > 1 {
        sentences.push(fragment.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_basic() {
        assert_eq!(
            split_sentences("Hello there. Привет всем. How are you?"),
            vec!["Hello there.", "Привет всем.", "How are you?"]
        );
    }

    #[test]
    fn test_split_keeps_punctuation_runs() {
        assert_eq!(
            split_sentences("Really?! Yes... Fine"),
            vec!["Really?!", "Yes...", "Fine"]
        );
    }

    #[test]
    fn test_no_split_without_whitespace() {
        assert_eq!(split_sentences("Version 1.5 is out."), vec!["Version 1.5 is out."]);
    }

    #[test]
    fn test_paragraphs_become_boundaries() {
        assert_eq!(
            split_sentences("Title\n\nFirst line.\r\n  Second line\nThird"),
            vec!["Title.", "First line.", "Second line.", "Third"]
        );
    }

    #[test]
    fn test_short_fragments_discarded() {
        assert_eq!(split_sentences("Ok. ! ?"), vec!["Ok."]);
        assert!(split_sentences("   \n\n  ").is_empty());
    }

    #[test]
    fn test_read_text_is_lossy() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bad.txt");
        std::fs::write(&path, b"Hi \xff there.").expect("write");
        let text = read_text(&path).expect("read");
        assert!(text.starts_with("Hi "));
        assert!(text.ends_with(" there."));
    }
}
