//! Application state: tabs, cursor, search, reciter view, daily reflection,
//! favorites and the playback controller, plus the transitions the runtime
//! drives from keys, MPRIS, device events and AI responses.

mod model;
mod types;

pub use model::*;
pub use types::*;

#[cfg(test)]
mod tests;
