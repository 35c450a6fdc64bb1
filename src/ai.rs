//! Generative-AI collaborator: daily reflection, smart search and reciter
//! track listings.
//!
//! The service is a black box to the player. Every call returns a neutral
//! value (None / empty list) on failure, and calls run off the UI thread
//! through the `dispatch` module, which tags them with generation tickets so
//! superseded results can be discarded.

mod client;
mod dispatch;
mod prompts;
mod types;
mod validation;

pub use client::GeminiClient;
pub use dispatch::*;
pub use types::*;
pub use validation::QueryGate;
