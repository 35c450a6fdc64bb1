use tracing::{debug, warn};

use crate::catalog::Track;

use super::navigator::{Direction, advance};
use super::types::{MediaSource, PlaybackSession};

/// Message shown in the player when the device reports a media error.
pub const PLAYBACK_ERROR_MESSAGE: &str = "Sorry, this recitation could not be played right now.";

/// Mediates between the intended current track and the media device.
///
/// Owns the device exclusively: nothing else loads or plays on it.
pub struct PlaybackController<M: MediaSource> {
    media: M,
    session: PlaybackSession,
    has_selected: bool,
}

impl<M: MediaSource> PlaybackController<M> {
    pub fn new(media: M) -> Self {
        Self {
            media,
            session: PlaybackSession::default(),
            has_selected: false,
        }
    }

    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.session.current_track.as_ref()
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    /// Make `track` current and load it. The first selection after startup
    /// stays paused; later selections try to start playback right away.
    pub fn select_track(&mut self, track: Track) {
        debug!(title = %track.title, url = %track.stream_url, "selecting track");
        let url = track.stream_url.clone();
        self.session.current_track = Some(track);
        self.session.error_message = None;
        self.session.progress = 0.0;
        self.session.elapsed_secs = 0.0;
        self.session.total_secs = None;
        self.media.load(&url);

        if !self.has_selected {
            self.has_selected = true;
            self.session.playing = false;
            return;
        }
        self.start();
    }

    pub fn toggle_play_pause(&mut self) {
        if self.session.error_message.is_some() || self.session.current_track.is_none() {
            return;
        }
        if self.session.playing {
            self.media.pause();
            self.session.playing = false;
        } else {
            self.start();
        }
    }

    fn start(&mut self) {
        match self.media.play() {
            Ok(()) => self.session.playing = true,
            Err(e) => {
                debug!(error = %e, "play attempt rejected");
                self.session.playing = false;
            }
        }
    }

    pub fn on_progress(&mut self, position: f64, duration: f64) {
        self.session.progress = if duration.is_finite() && duration > 0.0 && position.is_finite() {
            (position / duration).clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.session.elapsed_secs = if position.is_finite() { position.max(0.0) } else { 0.0 };
        self.session.total_secs = (duration.is_finite() && duration > 0.0).then_some(duration);
    }

    /// The device could not fetch or decode the stream. Sticky until `retry`.
    pub fn on_playback_error(&mut self) {
        warn!(
            url = ?self.session.current_track.as_ref().map(|t| t.stream_url.as_str()),
            "playback error"
        );
        self.session.error_message = Some(PLAYBACK_ERROR_MESSAGE.to_string());
        self.session.playing = false;
    }

    /// Clear the error and reload the current stream without playing it.
    pub fn retry(&mut self) {
        self.session.error_message = None;
        if let Some(track) = &self.session.current_track {
            debug!(url = %track.stream_url, "retrying stream");
            self.media.load(&track.stream_url);
        }
    }

    /// The current track ended: advance to the next one in `active_playlist`.
    ///
    /// With nothing to advance to the track stays current, paused, and is
    /// reloaded so the next play starts it from the beginning.
    pub fn on_natural_completion(&mut self, active_playlist: &[Track]) -> Option<Track> {
        self.session.playing = false;
        let Some(next) = advance(Direction::Next, active_playlist, self.current_track()).cloned()
        else {
            if let Some(track) = &self.session.current_track {
                debug!(url = %track.stream_url, "end of playlist, rewinding");
                self.media.load(&track.stream_url);
            }
            self.session.progress = 0.0;
            self.session.elapsed_secs = 0.0;
            return None;
        };
        self.select_track(next.clone());
        Some(next)
    }

    /// Mirror a play/pause transition the device reports on its own.
    pub fn on_external_play_state_change(&mut self, is_playing: bool) {
        self.session.playing = is_playing && self.session.error_message.is_none();
    }
}
