//! LessonVox Error Types
//!
//! Central error type shared by the loader, resolver and TTS driver.

use std::path::PathBuf;
use thiserror::Error;

/// Central error type for LessonVox
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Config file {path} is malformed: {message}")]
    ConfigMalformed { path: PathBuf, message: String },

    #[error("Config has no 'inputs' entries")]
    NoInputs,

    #[error("No input files matched the configured inputs")]
    NoFiles,

    #[error("Voice '{voice}' produced no audio")]
    EmptyStream { voice: String },

    #[error("Voice '{voice}' failed: {message}")]
    Synthesis { voice: String, message: String },

    #[error("Cannot open output {path}: {source}")]
    OutputOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl BatchError {
    /// Errors that make the current output file unusable
    pub fn aborts_file(&self) -> bool {
        matches!(self, BatchError::OutputOpen { .. })
    }
}

/// Result type alias for LessonVox operations
pub type BatchResult<T> = Result<T, BatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_output_open_aborts_file() {
        let open = BatchError::OutputOpen {
            path: PathBuf::from("x.mp3"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(open.aborts_file());
        assert!(!BatchError::EmptyStream {
            voice: "v".to_string()
        }
        .aborts_file());
    }

    #[test]
    fn test_messages_name_the_voice() {
        let err = BatchError::Synthesis {
            voice: "en-US-AriaNeural".to_string(),
            message: "exit status 1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Voice 'en-US-AriaNeural' failed: exit status 1"
        );
    }
}
