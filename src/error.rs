//! Crate-wide error type.
//!
//! Internal helpers propagate these with `?`; the collaborator surfaces
//! (favorites storage, AI service, audio device) turn them into neutral
//! values and log them instead of handing them to the UI.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// File I/O errors (favorites storage, local streams, log directory).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("AI service returned status {0}")]
    AiStatus(u16),

    #[error("AI response had no text")]
    EmptyAiResponse,

    #[error("no AI API key configured")]
    MissingApiKey,

    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    /// The media device refused to start playback (no output, thread gone).
    #[error("playback rejected: {0}")]
    PlaybackRejected(String),

    /// Fetching or decoding a stream failed.
    #[error("media error: {0}")]
    Media(String),
}
