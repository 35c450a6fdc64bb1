//! Audio device: a `rodio`-backed `MediaSource` running on its own thread.
//!
//! The UI thread talks to it through `AudioPlayer`, which sends commands and
//! drains device events. Streams are fetched whole (HTTP or local file) on a
//! helper thread, decoded, and handed to a paused sink.

mod player;
mod stream;
mod thread;
mod types;

pub use player::AudioPlayer;
