pub mod mock_synth;

pub use mock_synth::MockSynthesizer;

use lessonvox::config::Config;
use lessonvox::lang::LanguageDetector;
use std::path::{Path, PathBuf};

/// Detector that decides by script: Ukrainian-only letters mean `uk`,
/// other Cyrillic means `ru`, Latin means `en`
pub struct ScriptDetector;

impl LanguageDetector for ScriptDetector {
    fn detect(&self, text: &str) -> Option<String> {
        if text.chars().any(|c| "іїєґІЇЄҐ".contains(c)) {
            Some("uk".to_string())
        } else if text.chars().any(|c| ('\u{0400}'..='\u{04FF}').contains(&c)) {
            Some("ru".to_string())
        } else if text.chars().any(|c| c.is_ascii_alphabetic()) {
            Some("en".to_string())
        } else {
            None
        }
    }
}

/// Config with short voice names so outputs are easy to assert on
#[allow(dead_code)]
pub fn test_config() -> Config {
    Config {
        voice_en: "en-main".to_string(),
        voice_ru: "ru-main".to_string(),
        voice_uk: "uk-main".to_string(),
        alt_voices_en: vec!["en-alt".to_string()],
        alt_voices_ru: vec!["ru-alt".to_string()],
        alt_voices_uk: vec!["uk-alt".to_string()],
        pause: 300,
        ..Config::default()
    }
}

/// Write a lesson file into `dir`
#[allow(dead_code)]
pub fn write_lesson(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("Failed to write lesson");
    path
}

/// Read an output file as text (mock audio is UTF-8)
#[allow(dead_code)]
pub fn read_output(path: &Path) -> String {
    let bytes = std::fs::read(path).expect("Failed to read output");
    String::from_utf8(bytes).expect("Mock audio should be UTF-8")
}

/// All `.mp3` files in `dir`, sorted
#[allow(dead_code)]
pub fn mp3_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("Failed to read dir")
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".mp3"))
        .collect();
    names.sort();
    names
}
