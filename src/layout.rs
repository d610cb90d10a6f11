//! Output Layout
//!
//! Single-file mode writes one MP3 per input. Per-EN-voice mode writes one
//! MP3 per alternative English voice, with Russian and Ukrainian blocks
//! rendered the same way in every variant.

use crate::blocks::Block;
use crate::config::{Config, VoicePlan};
use crate::error::{BatchError, BatchResult};
use crate::lang::Language;
use crate::tts::{glue_sentences, render_block, SpeechSynthesizer};
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// How output files are laid out for an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    SingleFile,
    PerEnglishVoice,
}

impl OutputMode {
    pub fn from_config(config: &Config) -> Self {
        if config.multi_en_outputs {
            OutputMode::PerEnglishVoice
        } else {
            OutputMode::SingleFile
        }
    }
}

/// Everything needed to render one input file
#[derive(Debug, Clone)]
pub struct RenderJob {
    pub input: PathBuf,
    pub active: BTreeSet<Language>,
    pub mode: OutputMode,
    /// Blocks already filtered to `active`, in input order
    pub blocks: Vec<Block>,
}

impl RenderJob {
    pub fn new(input: &Path, active: BTreeSet<Language>, mode: OutputMode, blocks: Vec<Block>) -> Self {
        let blocks = blocks
            .into_iter()
            .filter(|b| active.contains(&b.lang))
            .collect();
        Self {
            input: input.to_path_buf(),
            active,
            mode,
            blocks,
        }
    }

    fn stem(&self) -> String {
        self.input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Why a per-EN-voice job produced nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanOutSkip {
    NoAltEnglishVoices,
    EnglishInactive,
    NoEnglishBlocks,
}

impl fmt::Display for FanOutSkip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            FanOutSkip::NoAltEnglishVoices => "alt_voices_en is empty",
            FanOutSkip::EnglishInactive => "English is not active for this file",
            FanOutSkip::NoEnglishBlocks => "file has no English blocks",
        };
        f.write_str(reason)
    }
}

/// Result of rendering one output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputReport {
    pub path: PathBuf,
    pub rendered: usize,
    pub failed: usize,
}

/// Result of rendering a job
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutOutcome {
    Written(Vec<OutputReport>),
    Skipped(FanOutSkip),
}

/// Single-file output path: the input with an `.mp3` extension
pub fn single_output_path(input: &Path) -> PathBuf {
    input.with_extension("mp3")
}

/// Per-voice output path: `<stem>__<voice>.mp3` next to the input
pub fn voice_output_path(input: &Path, voice: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}__{}.mp3", stem, voice))
}

/// Renders jobs through a synthesizer using the run's config
pub struct Renderer<'a> {
    config: &'a Config,
    synth: &'a dyn SpeechSynthesizer,
}

impl<'a> Renderer<'a> {
    pub fn new(config: &'a Config, synth: &'a dyn SpeechSynthesizer) -> Self {
        Self { config, synth }
    }

    pub async fn render(&self, job: &RenderJob) -> BatchResult<LayoutOutcome> {
        match job.mode {
            OutputMode::SingleFile => {
                let report = self.render_single(job).await?;
                Ok(LayoutOutcome::Written(report.into_iter().collect()))
            }
            OutputMode::PerEnglishVoice => self.render_per_english_voice(job).await,
        }
    }

    /// One MP3 per input, every language using its own voice plan
    pub async fn render_single(&self, job: &RenderJob) -> BatchResult<Option<OutputReport>> {
        let output = single_output_path(&job.input);
        truncate(&output).await?;

        if job.blocks.is_empty() {
            return Ok(None);
        }

        let report = self
            .render_blocks(&job.blocks, &output, |lang| self.config.voice_plan(lang))
            .await?;
        Ok(Some(report))
    }

    /// One MP3 per alternative English voice, English never falling back
    pub async fn render_per_english_voice(&self, job: &RenderJob) -> BatchResult<LayoutOutcome> {
        if let Some(skip) = self.fan_out_skip(job) {
            return Ok(LayoutOutcome::Skipped(skip));
        }

        let stem = job.stem();
        let mut reports = Vec::with_capacity(self.config.alt_voices_en.len());
        for voice in &self.config.alt_voices_en {
            let output = voice_output_path(&job.input, voice);
            info!("🎙️ {} variant '{}' -> {}", stem, voice, output.display());

            match self.render_variant(job, voice, &output).await {
                Ok(report) => reports.push(report),
                Err(e) if e.aborts_file() => warn!("⚠️ Skipping variant '{}': {}", voice, e),
                Err(e) => return Err(e),
            }
        }
        Ok(LayoutOutcome::Written(reports))
    }

    async fn render_variant(
        &self,
        job: &RenderJob,
        voice: &str,
        output: &Path,
    ) -> BatchResult<OutputReport> {
        truncate(output).await?;
        self.render_blocks(&job.blocks, output, |lang| match lang {
            Language::En => VoicePlan::only(voice),
            other => self.config.voice_plan(other),
        })
        .await
    }

    fn fan_out_skip(&self, job: &RenderJob) -> Option<FanOutSkip> {
        if self.config.alt_voices_en.is_empty() {
            Some(FanOutSkip::NoAltEnglishVoices)
        } else if !job.active.contains(&Language::En) {
            Some(FanOutSkip::EnglishInactive)
        } else if !job.blocks.iter().any(|b| b.lang == Language::En) {
            Some(FanOutSkip::NoEnglishBlocks)
        } else {
            None
        }
    }

    async fn render_blocks<F>(
        &self,
        blocks: &[Block],
        output: &Path,
        plan_for: F,
    ) -> BatchResult<OutputReport>
    where
        F: Fn(Language) -> VoicePlan,
    {
        let mut report = OutputReport {
            path: output.to_path_buf(),
            rendered: 0,
            failed: 0,
        };

        for (index, block) in blocks.iter().enumerate() {
            let text = glue_sentences(&block.sentences, self.config.pause);
            if text.is_empty() {
                continue;
            }
            info!(
                "🧩 Block {} [{}]: {} sentence(s), {} chars",
                index + 1,
                block.lang,
                block.sentences.len(),
                text.chars().count()
            );

            let plan = plan_for(block.lang);
            match render_block(self.synth, &text, &plan, self.config.rate, output).await {
                Ok(voice) => {
                    info!("✅ Block {} rendered by '{}'", index + 1, voice);
                    report.rendered += 1;
                }
                Err(e) if e.aborts_file() => return Err(e),
                Err(e) => {
                    warn!("❌ Block {} [{}] failed: {}", index + 1, block.lang, e);
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }
}

/// Create or empty an output file
async fn truncate(path: &Path) -> BatchResult<()> {
    tokio::fs::File::create(path)
        .await
        .map(|_| ())
        .map_err(|source| BatchError::OutputOpen {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(lang: Language, sentences: &[&str]) -> Block {
        Block {
            lang,
            sentences: sentences.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_output_paths() {
        let input = Path::new("/lessons/unit1_en.txt");
        assert_eq!(single_output_path(input), PathBuf::from("/lessons/unit1_en.mp3"));
        assert_eq!(
            voice_output_path(input, "en-US-GuyNeural"),
            PathBuf::from("/lessons/unit1_en__en-US-GuyNeural.mp3")
        );
    }

    #[test]
    fn test_job_filters_to_active_languages() {
        let job = RenderJob::new(
            Path::new("a.txt"),
            BTreeSet::from([Language::En]),
            OutputMode::SingleFile,
            vec![
                block(Language::En, &["One."]),
                block(Language::Ru, &["Два."]),
                block(Language::En, &["Three."]),
            ],
        );
        assert_eq!(job.blocks.len(), 2);
        assert!(job.blocks.iter().all(|b| job.active.contains(&b.lang)));
    }

    #[test]
    fn test_mode_from_config() {
        let mut config = Config::default();
        assert_eq!(OutputMode::from_config(&config), OutputMode::SingleFile);
        config.multi_en_outputs = true;
        assert_eq!(OutputMode::from_config(&config), OutputMode::PerEnglishVoice);
    }
}
