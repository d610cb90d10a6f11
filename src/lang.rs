//! Language tags and per-sentence classification

use serde::{Deserialize, Serialize};
use std::fmt;
use whatlang::Lang;

/// Language tag assigned to every sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Ru,
    Uk,
}

impl Language {
    /// Fixed order used by the suffix policy
    pub const ALL: [Language; 3] = [Language::En, Language::Ru, Language::Uk];

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ru => "ru",
            Language::Uk => "uk",
        }
    }

    /// Map a detector code to a tag by prefix, defaulting to English
    pub fn from_detected(code: &str) -> Self {
        let code = code.trim().to_lowercase();
        if code.starts_with("ru") {
            Language::Ru
        } else if code.starts_with("uk") {
            Language::Uk
        } else {
            Language::En
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Statistical language detector
///
/// `None` signals a detection failure.
pub trait LanguageDetector: Send + Sync {
    fn detect(&self, text: &str) -> Option<String>;
}

/// Classify one sentence without any context from its neighbours
pub fn classify(detector: &dyn LanguageDetector, sentence: &str) -> Language {
    detector
        .detect(sentence)
        .map(|code| Language::from_detected(&code))
        .unwrap_or(Language::En)
}

/// Detector backed by `whatlang`, restricted to the supported languages
pub struct WhatlangDetector {
    inner: whatlang::Detector,
}

impl Default for WhatlangDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl WhatlangDetector {
    pub fn new() -> Self {
        Self {
            inner: whatlang::Detector::with_allowlist(vec![Lang::Eng, Lang::Rus, Lang::Ukr]),
        }
    }
}

impl LanguageDetector for WhatlangDetector {
    fn detect(&self, text: &str) -> Option<String> {
        self.inner.detect_lang(text).map(|lang| lang.code().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Option<&'static str>);

    impl LanguageDetector for Fixed {
        fn detect(&self, _text: &str) -> Option<String> {
            self.0.map(str::to_string)
        }
    }

    #[test]
    fn test_prefix_normalization() {
        assert_eq!(Language::from_detected("ru"), Language::Ru);
        assert_eq!(Language::from_detected("rus"), Language::Ru);
        assert_eq!(Language::from_detected("uk"), Language::Uk);
        assert_eq!(Language::from_detected("ukr"), Language::Uk);
        assert_eq!(Language::from_detected("en-US"), Language::En);
        assert_eq!(Language::from_detected("bg"), Language::En);
        assert_eq!(Language::from_detected(""), Language::En);
    }

    #[test]
    fn test_detector_failure_defaults_to_english() {
        assert_eq!(classify(&Fixed(None), "???"), Language::En);
        assert_eq!(classify(&Fixed(Some("ukr")), "x"), Language::Uk);
    }

    #[test]
    fn test_whatlang_detector() {
        let detector = WhatlangDetector::new();
        assert_eq!(
            classify(
                &detector,
                "The quick brown fox jumps over the lazy dog and then runs far away."
            ),
            Language::En
        );
        assert_eq!(
            classify(&detector, "Мы были в школе вчера, и было очень интересно."),
            Language::Ru
        );
        assert_eq!(
            classify(&detector, "Ми були в школі вчора, і було дуже цікаво."),
            Language::Uk
        );
    }

    #[test]
    fn test_serde_codes() {
        let json = serde_json::to_string(&Language::Uk).expect("serialize");
        assert_eq!(json, "\"uk\"");
        let parsed: Language = serde_json::from_str("\"ru\"").expect("deserialize");
        assert_eq!(parsed, Language::Ru);
        assert!(serde_json::from_str::<Language>("\"de\"").is_err());
    }
}
