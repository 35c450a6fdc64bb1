//! Playback core: the controller that owns the current track and drives the
//! media device, and the navigator that picks next/previous tracks.

mod controller;
mod navigator;
mod types;

pub use controller::{PLAYBACK_ERROR_MESSAGE, PlaybackController};
pub use navigator::{Direction, advance};
pub use types::*;

#[cfg(test)]
mod tests;
