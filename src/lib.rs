//! LessonVox Library
//!
//! Batch pipeline that turns multilingual (English, Russian, Ukrainian)
//! lesson text into MP3 narration, one language block at a time.

pub mod blocks;
pub mod config;
pub mod error;
pub mod inputs;
pub mod lang;
pub mod layout;
pub mod policy;
pub mod runner;
pub mod text;
pub mod tts;

pub use error::{BatchError, BatchResult};
