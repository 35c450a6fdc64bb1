use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::config::AudioSettings;
use crate::error::{Error, Result};
use crate::playback::{MediaEvent, MediaSource};

use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, Inbox, TaggedEvent};

/// Handle to the audio thread.
///
/// Every `load` gets a fresh id; events from earlier loads are dropped by
/// `poll_events`, so a late "ended" from a replaced stream is never seen.
pub struct AudioPlayer {
    tx: Sender<Inbox>,
    events: Receiver<TaggedEvent>,
    load_id: u64,
    output_failed: Arc<AtomicBool>,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioPlayer {
    pub fn new(audio_settings: AudioSettings) -> Self {
        let (tx, rx) = mpsc::channel::<Inbox>();
        let (event_tx, event_rx) = mpsc::channel::<TaggedEvent>();
        let output_failed = Arc::new(AtomicBool::new(false));

        let audio_handle = spawn_audio_thread(
            rx,
            tx.clone(),
            event_tx,
            output_failed.clone(),
            audio_settings,
        );

        Self {
            tx,
            events: event_rx,
            load_id: 0,
            output_failed,
            join: Mutex::new(Some(audio_handle)),
        }
    }

    /// Drain pending device events that belong to the current load.
    pub fn poll_events(&self) -> Vec<MediaEvent> {
        current_events(self.load_id, self.events.try_iter())
    }

    fn send(&self, cmd: AudioCmd) -> std::result::Result<(), mpsc::SendError<Inbox>> {
        self.tx.send(Inbox::Cmd(cmd))
    }

    pub fn quit_softly(&self, fade_out: Duration) {
        let _ = self.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

/// Keep the events tagged with `load_id`, in order.
pub(super) fn current_events(
    load_id: u64,
    events: impl IntoIterator<Item = TaggedEvent>,
) -> Vec<MediaEvent> {
    events
        .into_iter()
        .filter(|(id, _)| *id == load_id)
        .map(|(_, event)| event)
        .collect()
}

impl MediaSource for AudioPlayer {
    fn load(&mut self, url: &str) {
        self.load_id += 1;
        let _ = self.send(AudioCmd::Load {
            load_id: self.load_id,
            url: url.to_string(),
        });
    }

    fn play(&mut self) -> Result<()> {
        if self.output_failed.load(Ordering::SeqCst) {
            return Err(Error::PlaybackRejected("no audio output device".to_string()));
        }
        self.send(AudioCmd::Play)
            .map_err(|_| Error::PlaybackRejected("audio thread stopped".to_string()))
    }

    fn pause(&mut self) {
        let _ = self.send(AudioCmd::Pause);
    }
}
