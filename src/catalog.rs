//! Static reference data and the `Track` type.
//!
//! The catalog holds the curated surahs and reciters shipped with the app,
//! plus the conversions that turn AI results into playable tracks.

mod data;
mod model;

pub use data::{filter_catalog, reciters, surahs};
pub use model::*;
