//! TTS (Text-to-Speech) Driver
//!
//! Renders one block at a time through a streaming synthesizer, appending
//! audio to the output file and walking fallback voices on failure.

use crate::config::VoicePlan;
use crate::error::{BatchError, BatchResult};
use anyhow::Result;
use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;
use std::path::Path;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

pub mod edge;
pub mod glue;

pub use glue::{format_rate, glue_sentences, pause_commas, pause_separator};

/// One record from a synthesis stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthChunk {
    /// Encoded audio bytes, written to the output
    Audio(Vec<u8>),
    /// Any non-audio record (word boundaries and the like), ignored
    Metadata(String),
}

/// A single synthesis call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    pub text: String,
    pub voice: String,
    /// Encoded rate, e.g. `+0%`
    pub rate: String,
}

pub type ChunkStream = BoxStream<'static, Result<SynthChunk>>;

/// Trait for streaming speech synthesizers
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync + std::fmt::Debug {
    /// Start synthesis and return the chunk stream
    async fn stream(&self, request: &SynthesisRequest) -> Result<ChunkStream>;

    /// Get the backend name
    fn name(&self) -> &str;
}

/// Render one glued block, trying voices from `plan` in order.
///
/// Audio is appended to `output`. Returns the voice that produced audio,
/// or the error of the last attempted voice.
pub async fn render_block(
    synth: &dyn SpeechSynthesizer,
    text: &str,
    plan: &VoicePlan,
    rate: i32,
    output: &Path,
) -> BatchResult<String> {
    let rate = format_rate(rate);
    let mut last_error = None;

    for voice in plan.candidates() {
        let request = SynthesisRequest {
            text: text.to_string(),
            voice: voice.to_string(),
            rate: rate.clone(),
        };
        match synthesize_to_file(synth, &request, output).await {
            Ok(bytes) => {
                debug!("Voice '{}' wrote {} bytes to {}", voice, bytes, output.display());
                return Ok(voice.to_string());
            }
            Err(e) if e.aborts_file() => return Err(e),
            Err(e) => {
                warn!("⚠️ {}", e);
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| BatchError::Synthesis {
        voice: plan.primary.clone(),
        message: "no voice configured".to_string(),
    }))
}

/// Stream one request into `output`, returning the audio byte count
async fn synthesize_to_file(
    synth: &dyn SpeechSynthesizer,
    request: &SynthesisRequest,
    output: &Path,
) -> BatchResult<usize> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(output)
        .await
        .map_err(|source| BatchError::OutputOpen {
            path: output.to_path_buf(),
            source,
        })?;

    let synthesis_error = |message: String| BatchError::Synthesis {
        voice: request.voice.clone(),
        message,
    };

    let mut stream = synth
        .stream(request)
        .await
        .map_err(|e| synthesis_error(format!("{:#}", e)))?;

    let mut audio_chunks = 0usize;
    let mut bytes = 0usize;
    while let Some(chunk) = stream.next().await {
        match chunk.map_err(|e| synthesis_error(format!("{:#}", e)))? {
            SynthChunk::Audio(data) => {
                file.write_all(&data).await?;
                audio_chunks += 1;
                bytes += data.len();
            }
            SynthChunk::Metadata(kind) => debug!("Skipping '{}' record", kind),
        }
    }
    file.flush().await?;

    if audio_chunks == 0 {
        return Err(BatchError::EmptyStream {
            voice: request.voice.clone(),
        });
    }
    Ok(bytes)
}
