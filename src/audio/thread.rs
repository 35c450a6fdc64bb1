use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use reqwest::blocking::Client;
use rodio::{OutputStream, OutputStreamBuilder, Sink, Source};
use tracing::{debug, error, warn};

use crate::config::AudioSettings;
use crate::playback::MediaEvent;

use super::stream::{decode, fetch_stream};
use super::types::{AudioCmd, Inbox, TaggedEvent};

const TICK: Duration = Duration::from_millis(200);

/// What is loaded on the device right now.
#[derive(Default)]
struct Deck {
    load_id: u64,
    sink: Option<Sink>,
    total: Option<Duration>,
    /// Play was requested before the stream finished loading.
    want_play: bool,
}

impl Deck {
    fn playing(&self) -> bool {
        self.sink.as_ref().map(|s| !s.is_paused()).unwrap_or(false)
    }

    fn clear(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.total = None;
        self.want_play = false;
    }
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<Inbox>,
    inbox_tx: Sender<Inbox>,
    events: Sender<TaggedEvent>,
    output_failed: Arc<AtomicBool>,
    audio_settings: AudioSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(mut s) => {
                // rodio logs to stderr when OutputStream is dropped, which
                // would scribble over the TUI.
                s.log_on_drop(false);
                Some(s)
            }
            Err(e) => {
                error!(error = %e, "no audio output device; playback disabled");
                output_failed.store(true, Ordering::SeqCst);
                None
            }
        };

        let client = match Client::builder()
            .timeout(Duration::from_secs(audio_settings.fetch_timeout_secs))
            .build()
        {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "falling back to default HTTP client");
                Client::new()
            }
        };

        let mut deck = Deck::default();
        let emit = |load_id: u64, event: MediaEvent| {
            let _ = events.send((load_id, event));
        };

        loop {
            match rx.recv_timeout(TICK) {
                Ok(Inbox::Cmd(cmd)) => match cmd {
                    AudioCmd::Load { load_id, url } => {
                        deck.clear();
                        deck.load_id = load_id;
                        debug!(load_id, %url, "fetching stream");

                        let client = client.clone();
                        let inbox_tx = inbox_tx.clone();
                        thread::spawn(move || {
                            let result = fetch_stream(&client, &url);
                            let _ = inbox_tx.send(Inbox::Fetched { load_id, result });
                        });
                    }

                    AudioCmd::Play => match deck.sink.as_ref() {
                        Some(s) => s.play(),
                        None => deck.want_play = true,
                    },

                    AudioCmd::Pause => {
                        deck.want_play = false;
                        if let Some(s) = deck.sink.as_ref() {
                            s.pause();
                        }
                    }

                    AudioCmd::Quit { fade_out_ms } => {
                        if let Some(s) = deck.sink.as_ref() {
                            // Fade out gently before stopping.
                            fade_out_sink(s, fade_out_ms);
                        }
                        deck.clear();
                        break;
                    }
                },

                Ok(Inbox::Fetched { load_id, result }) => {
                    if load_id != deck.load_id {
                        debug!(load_id, "dropping superseded stream");
                        continue;
                    }
                    let Some(stream) = stream.as_ref() else {
                        continue;
                    };
                    match result.and_then(decode) {
                        Ok(source) => {
                            let started = attach_source(stream, &mut deck, source, &audio_settings);
                            if started {
                                emit(load_id, MediaEvent::PlayState(true));
                            }
                        }
                        Err(e) => {
                            warn!(load_id, error = %e, "stream failed to load");
                            deck.clear();
                            emit(load_id, MediaEvent::Error(e.to_string()));
                        }
                    }
                }

                Err(RecvTimeoutError::Timeout) => {
                    if !deck.playing() {
                        continue;
                    }
                    let Some(sink) = deck.sink.as_ref() else {
                        continue;
                    };
                    if sink.empty() {
                        let load_id = deck.load_id;
                        deck.clear();
                        emit(load_id, MediaEvent::Ended);
                    } else {
                        let position = sink.get_pos().as_secs_f64();
                        let duration = deck.total.map(|d| d.as_secs_f64()).unwrap_or(f64::NAN);
                        emit(deck.load_id, MediaEvent::Progress { position, duration });
                    }
                }

                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}

/// Put a decoded stream on a fresh paused sink. Returns true when playback
/// started immediately because play was already requested.
fn attach_source<S>(stream: &OutputStream, deck: &mut Deck, source: S, settings: &AudioSettings) -> bool
where
    S: Source + Send + 'static,
{
    deck.total = source.total_duration();

    let sink = Sink::connect_new(stream.mixer());
    sink.pause();
    sink.set_volume(settings.volume);
    sink.append(source);

    let start = deck.want_play;
    if start {
        sink.play();
    }
    deck.want_play = false;
    deck.sink = Some(sink);
    start
}

fn fade_out_sink(sink: &Sink, fade_out_ms: u64) {
    if fade_out_ms == 0 || sink.is_paused() {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    let start = sink.volume();
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(start * (1.0 - t));
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}
