use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::ai::{SearchResult, TrackRef};

const PLACEHOLDER_ARTWORK_BASE: &str = "https://picsum.photos/seed/";

/// Revelation category of a surah.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Meccan,
    Medinan,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Self::Meccan => "Meccan",
            Self::Medinan => "Medinan",
        }
    }
}

/// A playable recitation.
///
/// Identity is `stream_url`: two tracks with the same URL are the same track
/// regardless of `id`, which is random for tracks built from AI results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: u32,
    pub title: String,
    pub subtitle: String,
    #[serde(default)]
    pub category: Category,
    pub stream_url: String,
    #[serde(default)]
    pub artwork_url: String,
    #[serde(default)]
    pub verses_count: u16,
}

impl Track {
    /// True when both tracks point at the same stream.
    pub fn same_as(&self, other: &Track) -> bool {
        self.stream_url == other.stream_url
    }

    /// Build an ephemeral track from a smart-search hit.
    pub fn from_search_result(result: &SearchResult) -> Self {
        Self::ephemeral(&result.title, &result.reciter, &result.url)
    }

    /// Build an ephemeral track from one entry of a reciter's track list.
    pub fn from_track_ref(track: &TrackRef, reciter_name: &str) -> Self {
        Self::ephemeral(&track.title, reciter_name, &track.url)
    }

    fn ephemeral(title: &str, reciter: &str, url: &str) -> Self {
        Self {
            id: rand::random::<u32>(),
            title: title.trim().to_string(),
            subtitle: reciter.trim().to_string(),
            category: Category::Meccan,
            stream_url: url.trim().to_string(),
            artwork_url: placeholder_artwork(reciter.trim()),
            verses_count: 0,
        }
    }
}

/// A reciter shown on the reciters tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reciter {
    pub id: &'static str,
    pub name: &'static str,
    pub style: &'static str,
    pub image: &'static str,
}

/// Placeholder artwork URL seeded by the reciter name (percent-encoded).
pub fn placeholder_artwork(seed: &str) -> String {
    let Ok(mut url) = Url::parse(PLACEHOLDER_ARTWORK_BASE) else {
        return String::new();
    };
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push(seed).push("800").push("800");
    }
    url.to_string()
}
