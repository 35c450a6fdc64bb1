use crate::ai::{DailyReflection, SearchResult};
use crate::catalog::{Reciter, Track};

/// The three top-level views.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Surahs,
    Reciters,
    Favorites,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Surahs, Tab::Reciters, Tab::Favorites];

    pub fn title(self) -> &'static str {
        match self {
            Self::Surahs => "Surahs",
            Self::Reciters => "Reciters",
            Self::Favorites => "Favorites",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::Surahs => 0,
            Self::Reciters => 1,
            Self::Favorites => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing into the search box.
    Search,
}

/// Why a smart search produced nothing to show.
///
/// Both reasons render the same notice; they stay distinct for logs and tests.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// The query hit the denylist and was never sent.
    Forbidden,
    /// The service answered with no usable results.
    NoResults,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum SearchState {
    #[default]
    Idle,
    Searching,
    Results(Vec<SearchResult>),
    Rejected(RejectReason),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReflectionState {
    Loading,
    Ready(DailyReflection),
    Unavailable,
}

impl ReflectionState {
    /// The reflection to display, falling back to a built-in verse.
    pub fn shown(&self) -> Option<DailyReflection> {
        match self {
            Self::Loading => None,
            Self::Ready(r) => Some(r.clone()),
            Self::Unavailable => Some(fallback_reflection()),
        }
    }
}

pub fn fallback_reflection() -> DailyReflection {
    DailyReflection {
        verse: "فَإِنَّ مَعَ الْعُسْرِ يُسْرًا".to_string(),
        translation: "For indeed, with hardship will be ease.".to_string(),
        reflection: "بشرى ربانية بأن كل ضيق يعقبه اتساع، وكل كربة تنتهي بفرج قريب بإذن الله."
            .to_string(),
        surah_name: "الشرح".to_string(),
    }
}

/// A reciter opened from the reciters tab, with its fetched tracks.
#[derive(Clone, Debug)]
pub struct ReciterView {
    pub reciter: &'static Reciter,
    pub tracks: Vec<Track>,
    pub loading: bool,
}

/// One line of the main list.
#[derive(Clone, Debug)]
pub enum Row {
    Track(Track),
    Reciter(&'static Reciter),
    Result(SearchResult),
}

impl Row {
    /// The track this row plays, converting search hits on the fly.
    pub fn track(&self) -> Option<Track> {
        match self {
            Self::Track(t) => Some(t.clone()),
            Self::Result(r) => Some(Track::from_search_result(r)),
            Self::Reciter(_) => None,
        }
    }

    pub fn stream_url(&self) -> Option<&str> {
        match self {
            Self::Track(t) => Some(&t.stream_url),
            Self::Result(r) => Some(r.url.trim()),
            Self::Reciter(_) => None,
        }
    }
}
