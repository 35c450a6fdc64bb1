//! Settings for the player: audio output, the AI collaborator, storage
//! locations, search policy, UI text and logging.
//!
//! Values come from an optional TOML file with `TILAWA__*` environment
//! variables layered on top.

mod load;
mod schema;

pub use schema::*;
