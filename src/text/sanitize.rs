//! Sentence sanitizer for emoji and exotic symbols

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Anything that is not Latin, Latin-extended, Cyrillic, a digit,
    /// whitespace or common punctuation
    static ref DISALLOWED: Regex = Regex::new(
        r#"[^0-9A-Za-z\u{00C0}-\u{024F}\u{0400}-\u{052F}\s.,!?;:'"()\-«»„“”‘’…—–]"#
    )
    .unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref LEADING_PUNCT: Regex = Regex::new(r#"^[\s.,!?;:'"()\-«»„“”‘’…—–]+"#).unwrap();
}

/// Strip emoji and symbols, collapse whitespace and drop leading punctuation.
/// Returns an empty string when nothing speakable remains.
pub fn sanitize_sentence(sentence: &str) -> String {
    let cleaned = DISALLOWED.replace_all(sentence, " ");
    let collapsed = WHITESPACE.replace_all(&cleaned, " ");
    let trimmed = LEADING_PUNCT.replace(collapsed.trim(), "");
    trimmed.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_emoji() {
        assert_eq!(sanitize_sentence("Great job! 🎉"), "Great job!");
        assert_eq!(sanitize_sentence("Hello👋world."), "Hello world.");
    }

    #[test]
    fn test_keeps_cyrillic_and_latin_extended() {
        assert_eq!(sanitize_sentence("Привіт, їжак!"), "Привіт, їжак!");
        assert_eq!(sanitize_sentence("Café «naïve» — ok."), "Café «naïve» — ok.");
    }

    #[test]
    fn test_removes_leading_punctuation() {
        assert_eq!(sanitize_sentence("— Yes, sir."), "Yes, sir.");
        assert_eq!(sanitize_sentence("...and then."), "and then.");
    }

    #[test]
    fn test_symbols_and_other_scripts_removed() {
        assert_eq!(sanitize_sentence("Price: 5 € #deal"), "Price: 5 deal");
        assert_eq!(sanitize_sentence("日本語 text."), "text.");
    }

    #[test]
    fn test_becomes_empty() {
        assert_eq!(sanitize_sentence("🔥🔥🔥"), "");
        assert_eq!(sanitize_sentence(" ?! "), "");
    }
}
