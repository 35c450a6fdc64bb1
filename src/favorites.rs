//! Favorites: an order-preserving set of tracks keyed by stream URL, and the
//! durable key-value storage it is persisted to.

mod set;
mod store;

pub use set::*;
pub use store::*;

#[cfg(test)]
mod tests;
