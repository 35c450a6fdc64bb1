//! Messages exchanged with the audio thread.

use crate::error::Result;
use crate::playback::MediaEvent;

#[derive(Debug)]
pub enum AudioCmd {
    /// Replace the current stream with `url`, tagged with `load_id`.
    Load { load_id: u64, url: String },
    /// Start output now, or as soon as the pending stream is ready.
    Play,
    Pause,
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

/// Everything the audio thread receives: UI commands and finished fetches.
#[derive(Debug)]
pub(super) enum Inbox {
    Cmd(AudioCmd),
    Fetched { load_id: u64, result: Result<Vec<u8>> },
}

/// A device event tagged with the load it belongs to.
pub(super) type TaggedEvent = (u64, MediaEvent);
