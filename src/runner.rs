//! Run Orchestrator
//!
//! Processes resolved input files one at a time through
//! prepare -> classify -> group -> suffix policy -> layout.

use crate::blocks::{classify_sentences, group_blocks, languages_present};
use crate::config::Config;
use crate::error::{BatchError, BatchResult};
use crate::inputs::InputResolver;
use crate::lang::LanguageDetector;
use crate::layout::{FanOutSkip, LayoutOutcome, OutputMode, RenderJob, Renderer};
use crate::policy::active_languages;
use crate::text::{prepare_sentences, read_text};
use crate::tts::SpeechSynthesizer;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Why a file produced no output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    EmptyFile,
    NoSentences,
    NoBlocks,
    NoActiveLanguages,
    FanOut(FanOutSkip),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::EmptyFile => f.write_str("file is empty"),
            SkipReason::NoSentences => f.write_str("no sentences found"),
            SkipReason::NoBlocks => f.write_str("no language blocks"),
            SkipReason::NoActiveLanguages => {
                f.write_str("none of the active languages occur in the file")
            }
            SkipReason::FanOut(skip) => write!(f, "per-EN-voice mode: {}", skip),
        }
    }
}

/// What happened to a single input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Rendered {
        outputs: Vec<PathBuf>,
        blocks_rendered: usize,
        blocks_failed: usize,
    },
    Skipped(SkipReason),
}

/// Totals for a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub files_processed: usize,
    pub files_skipped: usize,
    pub files_failed: usize,
    pub outputs_written: usize,
    pub blocks_rendered: usize,
    pub blocks_failed: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Rendered {
                outputs,
                blocks_rendered,
                blocks_failed,
            } => {
                self.files_processed += 1;
                self.outputs_written += outputs.len();
                self.blocks_rendered += blocks_rendered;
                self.blocks_failed += blocks_failed;
            }
            FileOutcome::Skipped(_) => self.files_skipped += 1,
        }
    }
}

/// Batch runner holding the run's read-only config and collaborators
pub struct Runner<'a> {
    config: &'a Config,
    detector: &'a dyn LanguageDetector,
    synth: &'a dyn SpeechSynthesizer,
}

impl<'a> Runner<'a> {
    pub fn new(
        config: &'a Config,
        detector: &'a dyn LanguageDetector,
        synth: &'a dyn SpeechSynthesizer,
    ) -> Self {
        Self {
            config,
            detector,
            synth,
        }
    }

    /// Resolve configured inputs against `base_dir`
    pub fn resolve_inputs(&self, base_dir: &Path) -> BatchResult<Vec<PathBuf>> {
        self.config.validate()?;
        let resolver = InputResolver::new(
            base_dir,
            &self.config.extensions,
            self.config.recursive_inputs,
        );
        let files = resolver.resolve(&self.config.inputs);
        if files.is_empty() {
            return Err(BatchError::NoFiles);
        }
        Ok(files)
    }

    /// Process every file strictly in order. Per-file failures never stop the run.
    pub async fn run(&self, files: &[PathBuf]) -> RunSummary {
        let mut summary = RunSummary::default();
        for (index, path) in files.iter().enumerate() {
            info!("📄 [{}/{}] {}", index + 1, files.len(), path.display());
            match self.process_file(path).await {
                Ok(outcome) => {
                    if let FileOutcome::Skipped(reason) = &outcome {
                        warn!("⏭️ Skipping {}: {}", path.display(), reason);
                    }
                    summary.record(&outcome);
                }
                Err(e) => {
                    warn!("❌ {} aborted: {}", path.display(), e);
                    summary.files_failed += 1;
                }
            }
        }
        summary
    }

    /// Run one file through the whole chain
    pub async fn process_file(&self, path: &Path) -> BatchResult<FileOutcome> {
        let text = read_text(path)?;
        if text.trim().is_empty() {
            return Ok(FileOutcome::Skipped(SkipReason::EmptyFile));
        }

        let sentences = prepare_sentences(&text, self.config.strip_emojis);
        if sentences.is_empty() {
            return Ok(FileOutcome::Skipped(SkipReason::NoSentences));
        }

        let blocks = group_blocks(classify_sentences(self.detector, sentences));
        if blocks.is_empty() {
            return Ok(FileOutcome::Skipped(SkipReason::NoBlocks));
        }

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let active = active_languages(
            &stem,
            &self.config.enable_languages,
            &self.config.suffix_filters,
        );
        let present = languages_present(&blocks);
        if active.is_disjoint(&present) {
            return Ok(FileOutcome::Skipped(SkipReason::NoActiveLanguages));
        }

        let active_list: Vec<&str> = active.iter().map(|l| l.code()).collect();
        info!(
            "🌐 {} block(s), active languages: {}",
            blocks.len(),
            active_list.join(", ")
        );

        let job = RenderJob::new(path, active, OutputMode::from_config(self.config), blocks);
        let renderer = Renderer::new(self.config, self.synth);
        let outcome = match renderer.render(&job).await? {
            LayoutOutcome::Skipped(skip) => FileOutcome::Skipped(SkipReason::FanOut(skip)),
            LayoutOutcome::Written(reports) => FileOutcome::Rendered {
                blocks_rendered: reports.iter().map(|r| r.rendered).sum(),
                blocks_failed: reports.iter().map(|r| r.failed).sum(),
                outputs: reports.into_iter().map(|r| r.path).collect(),
            },
        };
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_record() {
        let mut summary = RunSummary::default();
        summary.record(&FileOutcome::Rendered {
            outputs: vec![PathBuf::from("a.mp3"), PathBuf::from("b.mp3")],
            blocks_rendered: 4,
            blocks_failed: 1,
        });
        summary.record(&FileOutcome::Skipped(SkipReason::EmptyFile));
        assert_eq!(summary.files_processed, 1);
        assert_eq!(summary.files_skipped, 1);
        assert_eq!(summary.outputs_written, 2);
        assert_eq!(summary.blocks_rendered, 4);
        assert_eq!(summary.blocks_failed, 1);
    }

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(
            SkipReason::FanOut(FanOutSkip::NoEnglishBlocks).to_string(),
            "per-EN-voice mode: file has no English blocks"
        );
    }
}
