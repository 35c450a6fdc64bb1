use tracing::{debug, warn};

use crate::catalog::Track;

use super::store::KeyValueStore;

/// Ordered, deduplicated-by-`stream_url` collection of tracks.
#[derive(Debug, Clone, Default)]
pub struct FavoritesSet {
    tracks: Vec<Track>,
}

impl FavoritesSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, stream_url: &str) -> bool {
        self.tracks.iter().any(|t| t.stream_url == stream_url)
    }

    /// Remove `track` if present (by URL), otherwise append it.
    /// Returns true when the track is a favorite afterwards.
    pub fn toggle(&mut self, track: &Track) -> bool {
        if let Some(pos) = self.tracks.iter().position(|t| t.same_as(track)) {
            self.tracks.remove(pos);
            false
        } else {
            self.tracks.push(track.clone());
            true
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn serialize(&self) -> String {
        // Vec<Track> of plain strings and numbers always serializes.
        serde_json::to_string(&self.tracks).unwrap_or_else(|_| "[]".to_string())
    }

    /// Parse a stored JSON array. Corrupt input yields an empty set; repeated
    /// URLs keep their first occurrence.
    pub fn deserialize(raw: &str) -> Self {
        let parsed: Vec<Track> = match serde_json::from_str(raw) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "discarding unreadable favorites");
                return Self::default();
            }
        };

        let mut set = Self::default();
        for track in parsed {
            if !set.contains(&track.stream_url) {
                set.tracks.push(track);
            }
        }
        set
    }
}

/// A `FavoritesSet` bound to the storage slot it is persisted in.
///
/// Every mutation rewrites the whole stored value before returning.
pub struct Favorites {
    set: FavoritesSet,
    store: Box<dyn KeyValueStore>,
    key: String,
}

impl Favorites {
    /// Load the set stored under `key`; a missing or corrupt value is empty.
    pub fn load(store: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let set = match store.get(&key) {
            Ok(Some(raw)) => FavoritesSet::deserialize(&raw),
            Ok(None) => FavoritesSet::new(),
            Err(e) => {
                warn!(error = %e, key = %key, "failed to read favorites");
                FavoritesSet::new()
            }
        };
        if set.is_empty() {
            debug!(key = %key, "no saved favorites");
        } else {
            debug!(count = set.len(), "favorites loaded");
        }
        Self { set, store, key }
    }

    pub fn contains(&self, stream_url: &str) -> bool {
        self.set.contains(stream_url)
    }

    pub fn tracks(&self) -> &[Track] {
        self.set.tracks()
    }

    /// Toggle `track` and persist. A failed write is logged; the in-memory
    /// set stays authoritative for this session.
    pub fn toggle(&mut self, track: &Track) -> bool {
        let now_favorite = self.set.toggle(track);
        if let Err(e) = self.store.set(&self.key, &self.set.serialize()) {
            warn!(error = %e, key = %self.key, "failed to persist favorites");
        }
        now_favorite
    }
}
