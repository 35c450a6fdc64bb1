use serde::{Deserialize, Serialize};

/// A short verse with translation and commentary for the home panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyReflection {
    pub verse: String,
    pub translation: String,
    pub reflection: String,
    pub surah_name: String,
}

/// One smart-search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub reciter: String,
    pub url: String,
    #[serde(default)]
    pub source: String,
}

/// One entry of a reciter's complete recitation listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRef {
    pub title: String,
    pub url: String,
    #[serde(rename = "type", default = "audio_kind")]
    pub kind: String,
}

fn audio_kind() -> String {
    "audio".to_string()
}

/// A list reply is accepted either as a bare array or wrapped in `results`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Listing<T> {
    Bare(Vec<T>),
    Wrapped { results: Vec<T> },
}

impl<T> Listing<T> {
    pub(crate) fn into_vec(self) -> Vec<T> {
        match self {
            Self::Bare(v) => v,
            Self::Wrapped { results } => results,
        }
    }
}

/// The three calls the UI makes to the AI collaborator.
///
/// Implementations must not fail: errors become `None` or an empty list.
pub trait RecitationService: Send + Sync {
    fn daily_reflection(&self) -> Option<DailyReflection>;
    fn search_recitations(&self, query: &str) -> Vec<SearchResult>;
    fn reciter_mushaf(&self, reciter_name: &str) -> Vec<TrackRef>;
}

/// A service that answers every call with the neutral value. Used when the
/// HTTP client cannot be built.
#[derive(Debug, Clone, Copy, Default)]
pub struct Offline;

impl RecitationService for Offline {
    fn daily_reflection(&self) -> Option<DailyReflection> {
        None
    }

    fn search_recitations(&self, _query: &str) -> Vec<SearchResult> {
        Vec::new()
    }

    fn reciter_mushaf(&self, _reciter_name: &str) -> Vec<TrackRef> {
        Vec::new()
    }
}
