use crate::catalog::Track;
use crate::error::Result;

/// The audio device the controller commands.
///
/// `load` replaces whatever was loaded and leaves it paused. `play` may be
/// refused by the device; the controller treats a refusal as "not playing".
pub trait MediaSource {
    fn load(&mut self, url: &str);
    fn play(&mut self) -> Result<()>;
    fn pause(&mut self);
}

/// Events reported by the media device.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Position and total length in seconds; `duration` is NaN when unknown.
    Progress { position: f64, duration: f64 },
    /// The stream could not be fetched or decoded.
    Error(String),
    /// The current stream played to its end.
    Ended,
    /// The device started or stopped output on its own.
    PlayState(bool),
}

/// Coarse player state as shown to MPRIS and the status line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Transient view of the player.
#[derive(Debug, Clone, Default)]
pub struct PlaybackSession {
    pub current_track: Option<Track>,
    pub playing: bool,
    /// Fraction of the current track played, in `[0, 1]`.
    pub progress: f64,
    pub error_message: Option<String>,
    pub elapsed_secs: f64,
    pub total_secs: Option<f64>,
}

impl PlaybackSession {
    pub fn state(&self) -> PlaybackState {
        match (&self.current_track, self.playing) {
            (None, _) => PlaybackState::Stopped,
            (Some(_), true) => PlaybackState::Playing,
            (Some(_), false) => PlaybackState::Paused,
        }
    }

    pub fn is_current(&self, track: &Track) -> bool {
        self.current_track
            .as_ref()
            .map(|t| t.same_as(track))
            .unwrap_or(false)
    }
}
