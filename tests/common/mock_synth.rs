//! Mock Speech Synthesizer for Testing
//!
//! Records every request and emits `<voice:text>` as audio.

use anyhow::Result;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use lessonvox::tts::{ChunkStream, SpeechSynthesizer, SynthChunk, SynthesisRequest};
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
pub struct MockSynthesizer {
    /// All requests, in call order
    pub requests: Arc<Mutex<Vec<SynthesisRequest>>>,
    /// Voices whose stream carries no audio
    pub silent_voices: Vec<String>,
    /// Voices that fail before streaming
    pub broken_voices: Vec<String>,
}

impl MockSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn silent(mut self, voice: &str) -> Self {
        self.silent_voices.push(voice.to_string());
        self
    }

    pub fn broken(mut self, voice: &str) -> Self {
        self.broken_voices.push(voice.to_string());
        self
    }

    /// `(voice, text)` of every request
    pub fn calls(&self) -> Vec<(String, String)> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| (r.voice.clone(), r.text.clone()))
            .collect()
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSynthesizer {
    async fn stream(&self, request: &SynthesisRequest) -> Result<ChunkStream> {
        self.requests.lock().unwrap().push(request.clone());

        if self.broken_voices.contains(&request.voice) {
            return Err(anyhow::anyhow!("Mock synthesis failure"));
        }

        let mut chunks = vec![Ok(SynthChunk::Metadata("WordBoundary".to_string()))];
        if !self.silent_voices.contains(&request.voice) {
            // Two audio chunks to exercise ordered appends
            let audio = format!("<{}:{}>", request.voice, request.text).into_bytes();
            let mid = audio.len() / 2;
            chunks.push(Ok(SynthChunk::Audio(audio[..mid].to_vec())));
            chunks.push(Ok(SynthChunk::Audio(audio[mid..].to_vec())));
        }
        Ok(stream::iter(chunks).boxed())
    }

    fn name(&self) -> &str {
        "mock"
    }
}
