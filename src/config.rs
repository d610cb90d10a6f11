use crate::error::{BatchError, BatchResult};
use crate::lang::Language;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File name of the config, looked up next to the executable
pub const CONFIG_FILE_NAME: &str = "tts_config.json";

/// Per-language filename suffix rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuffixRule {
    #[serde(default)]
    pub enabled: bool,
    /// Empty means the language's `_xx` suffix
    #[serde(default)]
    pub suffix: String,
}

impl SuffixRule {
    /// `_en` / `_ru` / `_uk` rule, enabled only for English
    pub fn default_for(lang: Language) -> Self {
        Self {
            enabled: lang == Language::En,
            suffix: format!("_{}", lang.code()),
        }
    }
}

/// Voices tried for one language, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoicePlan {
    pub primary: String,
    pub fallbacks: Vec<String>,
    pub strict: bool,
}

impl VoicePlan {
    /// A single voice with no fallback
    pub fn only(voice: &str) -> Self {
        Self {
            primary: voice.to_string(),
            fallbacks: Vec::new(),
            strict: true,
        }
    }

    /// Voices to attempt: the primary, then fallbacks unless strict.
    /// A voice is never attempted twice.
    pub fn candidates(&self) -> Vec<&str> {
        let mut voices = vec![self.primary.as_str()];
        if !self.strict {
            for voice in &self.fallbacks {
                if !voices.contains(&voice.as_str()) {
                    voices.push(voice.as_str());
                }
            }
        }
        voices
    }
}

/// Batch run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // Inputs (required: a missing key stays empty and fails validation)
    #[serde(default)]
    pub inputs: Vec<String>,
    pub recursive_inputs: bool,
    pub extensions: Vec<String>,

    // Languages
    pub enable_languages: Vec<Language>,
    pub suffix_filters: BTreeMap<Language, SuffixRule>,

    // Voices
    pub voice_en: String,
    pub voice_ru: String,
    pub voice_uk: String,
    pub alt_voices_en: Vec<String>,
    pub alt_voices_ru: Vec<String>,
    pub alt_voices_uk: Vec<String>,
    pub en_strict_no_fallback: bool,
    pub ru_strict_no_fallback: bool,
    pub uk_strict_no_fallback: bool,

    // Speech
    pub rate: i32,
    pub pause: u32,
    pub strip_emojis: bool,

    // Output
    pub multi_en_outputs: bool,

    // Backend
    pub tts_command: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inputs: vec!["lessons/*.txt".to_string()],
            recursive_inputs: false,
            extensions: vec![".txt".to_string(), ".md".to_string()],
            enable_languages: vec![Language::En, Language::Ru],
            suffix_filters: Language::ALL
                .into_iter()
                .map(|lang| (lang, SuffixRule::default_for(lang)))
                .collect(),
            voice_en: "en-US-AriaNeural".to_string(),
            voice_ru: "ru-RU-SvetlanaNeural".to_string(),
            voice_uk: "uk-UA-PolinaNeural".to_string(),
            alt_voices_en: vec![
                "en-US-GuyNeural".to_string(),
                "en-GB-SoniaNeural".to_string(),
            ],
            alt_voices_ru: vec!["ru-RU-DmitryNeural".to_string()],
            alt_voices_uk: vec!["uk-UA-OstapNeural".to_string()],
            en_strict_no_fallback: false,
            ru_strict_no_fallback: false,
            uk_strict_no_fallback: false,
            rate: 0,
            pause: 300,
            strip_emojis: true,
            multi_en_outputs: false,
            tts_command: "edge-tts".to_string(),
        }
    }
}

/// Outcome of looking for the config file
#[derive(Debug)]
pub enum ConfigLoad {
    Loaded(Config),
    /// No config existed; a template was written and the run must stop
    TemplateWritten(PathBuf),
}

impl Config {
    /// Load config from `path`, or write a defaulted template if it is missing
    pub fn load_or_init(path: &Path) -> BatchResult<ConfigLoad> {
        if !path.exists() {
            Config::default().save(path)?;
            return Ok(ConfigLoad::TemplateWritten(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::parse(&content).map_err(|e| BatchError::ConfigMalformed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(ConfigLoad::Loaded(config))
    }

    /// Parse config JSON, filling missing keys with defaults
    pub fn parse(content: &str) -> serde_json::Result<Self> {
        let mut config: Config = serde_json::from_str(content)?;
        config.normalize();
        Ok(config)
    }

    /// Save config as pretty-printed UTF-8 JSON
    pub fn save(&self, path: &Path) -> BatchResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject configs the run cannot start with
    pub fn validate(&self) -> BatchResult<()> {
        if self.inputs.iter().all(|raw| raw.trim().is_empty()) {
            return Err(BatchError::NoInputs);
        }
        Ok(())
    }

    fn normalize(&mut self) {
        let mut seen = Vec::with_capacity(self.enable_languages.len());
        for lang in self.enable_languages.drain(..) {
            if !seen.contains(&lang) {
                seen.push(lang);
            }
        }
        self.enable_languages = seen;

        for ext in &mut self.extensions {
            let lowered = ext.trim().to_lowercase();
            *ext = if lowered.is_empty() || lowered.starts_with('.') {
                lowered
            } else {
                format!(".{}", lowered)
            };
        }
        self.extensions.retain(|ext| !ext.is_empty());

        // User rules override the defaults per language, never wholesale
        for lang in Language::ALL {
            let rule = self
                .suffix_filters
                .entry(lang)
                .or_insert_with(|| SuffixRule::default_for(lang));
            if rule.suffix.trim().is_empty() {
                rule.suffix = SuffixRule::default_for(lang).suffix;
            }
        }
    }

    /// Primary voice, fallbacks and strict flag for a language
    pub fn voice_plan(&self, lang: Language) -> VoicePlan {
        let (primary, fallbacks, strict) = match lang {
            Language::En => (
                &self.voice_en,
                &self.alt_voices_en,
                self.en_strict_no_fallback,
            ),
            Language::Ru => (
                &self.voice_ru,
                &self.alt_voices_ru,
                self.ru_strict_no_fallback,
            ),
            Language::Uk => (
                &self.voice_uk,
                &self.alt_voices_uk,
                self.uk_strict_no_fallback,
            ),
        };
        VoicePlan {
            primary: primary.clone(),
            fallbacks: fallbacks.clone(),
            strict,
        }
    }
}

/// Default config location: `<exe-dir>/tts_config.json`
pub fn config_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_FILE_NAME)
}

/// Directory that relative inputs are resolved against
pub fn base_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
