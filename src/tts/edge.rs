//! edge-tts backend calling the command-line tool
//!
//! The block text is fed through stdin (`--file=/dev/stdin`) so it is not
//! bound by the per-argument size limit. The tool writes MP3 to stdout when
//! no `--write-media` is given; stdout is forwarded as audio chunks in the
//! order received.

use super::{ChunkStream, SpeechSynthesizer, SynthChunk, SynthesisRequest};
use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::stream;
use futures::StreamExt;
use std::process::Stdio;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, ChildStdout, Command};
use tokio::task::JoinHandle;
use tracing::{debug, info};

const READ_CHUNK: usize = 16 * 1024;

#[derive(Debug, Clone)]
pub struct EdgeTtsCli {
    program: String,
}

impl EdgeTtsCli {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }

    fn args(request: &SynthesisRequest) -> Vec<String> {
        vec![
            format!("--voice={}", request.voice),
            format!("--rate={}", request.rate),
            "--file=/dev/stdin".to_string(),
        ]
    }
}

/// Reader state threaded through the chunk stream
struct Pipe {
    child: Child,
    stdout: ChildStdout,
    stderr: Option<JoinHandle<String>>,
    program: String,
    done: bool,
}

#[async_trait]
impl SpeechSynthesizer for EdgeTtsCli {
    async fn stream(&self, request: &SynthesisRequest) -> Result<ChunkStream> {
        info!("📢 {} speaking with '{}'", self.program, request.voice);

        let mut child = Command::new(&self.program)
            .args(Self::args(request))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("Failed to spawn {}", self.program))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| anyhow::anyhow!("{} stdout not captured", self.program))?;

        // Writer and stderr drain run alongside the stdout reader so no pipe fills up
        if let Some(mut stdin) = child.stdin.take() {
            let text = request.text.clone();
            let program = self.program.clone();
            tokio::spawn(async move {
                if let Err(e) = stdin.write_all(text.as_bytes()).await {
                    debug!("Writing text to {} stdin failed: {}", program, e);
                }
                // Dropping stdin closes it and signals end of text
            });
        }

        let stderr = child.stderr.take().map(|mut err| {
            let program = self.program.clone();
            tokio::spawn(async move { read_all(&mut err, &program).await })
        });

        let pipe = Pipe {
            child,
            stdout,
            stderr,
            program: self.program.clone(),
            done: false,
        };

        Ok(stream::unfold(pipe, next_chunk).boxed())
    }

    fn name(&self) -> &str {
        "edge-tts"
    }
}

async fn next_chunk(mut pipe: Pipe) -> Option<(Result<SynthChunk>, Pipe)> {
    if pipe.done {
        return None;
    }

    let mut buf = vec![0u8; READ_CHUNK];
    match pipe.stdout.read(&mut buf).await {
        Ok(0) => {
            pipe.done = true;
            let status = match finish(&mut pipe).await {
                Ok(()) => return None,
                Err(e) => e,
            };
            Some((Err(status), pipe))
        }
        Ok(n) => {
            buf.truncate(n);
            debug!("Read {} audio bytes from {}", n, pipe.program);
            Some((Ok(SynthChunk::Audio(buf)), pipe))
        }
        Err(e) => {
            pipe.done = true;
            let err = anyhow::Error::new(e).context(format!("Reading {} output", pipe.program));
            Some((Err(err), pipe))
        }
    }
}

/// Wait for the child and turn a failed exit into an error
async fn finish(pipe: &mut Pipe) -> Result<()> {
    let status = pipe.child.wait().await?;
    let stderr = match pipe.stderr.take() {
        Some(task) => task.await.unwrap_or_else(|e| {
            debug!("{} stderr task failed: {}", pipe.program, e);
            String::new()
        }),
        None => String::new(),
    };
    if status.success() {
        return Ok(());
    }
    let detail = stderr.lines().last().unwrap_or("").trim().to_string();
    Err(anyhow::anyhow!(
        "{} exited with {}{}",
        pipe.program,
        status,
        if detail.is_empty() {
            String::new()
        } else {
            format!(": {}", detail)
        }
    ))
}

async fn read_all<R: AsyncRead + Unpin>(reader: &mut R, program: &str) -> String {
    let mut bytes = Vec::new();
    if let Err(e) = reader.read_to_end(&mut bytes).await {
        debug!("Reading {} stderr failed: {}", program, e);
    }
    String::from_utf8_lossy(&bytes).into_owned()
}
