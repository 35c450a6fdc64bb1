use std::sync::LazyLock;

use super::model::{Category, Reciter, Track};

struct SurahEntry {
    id: u32,
    name: &'static str,
    english_name: &'static str,
    verses: u16,
    category: Category,
    artwork_seed: &'static str,
}

const STREAM_BASE: &str = "https://server8.mp3quran.net/afs";

const SURAH_ENTRIES: [SurahEntry; 6] = [
    SurahEntry {
        id: 1,
        name: "الفاتحة",
        english_name: "Al-Fatiha",
        verses: 7,
        category: Category::Meccan,
        artwork_seed: "fatiha",
    },
    SurahEntry {
        id: 18,
        name: "الكهف",
        english_name: "Al-Kahf",
        verses: 110,
        category: Category::Meccan,
        artwork_seed: "kahf",
    },
    SurahEntry {
        id: 36,
        name: "يس",
        english_name: "Ya-Sin",
        verses: 83,
        category: Category::Meccan,
        artwork_seed: "yasin",
    },
    SurahEntry {
        id: 55,
        name: "الرحمن",
        english_name: "Ar-Rahman",
        verses: 78,
        category: Category::Medinan,
        artwork_seed: "rahman",
    },
    SurahEntry {
        id: 56,
        name: "الواقعة",
        english_name: "Al-Waqi'a",
        verses: 96,
        category: Category::Meccan,
        artwork_seed: "waqia",
    },
    SurahEntry {
        id: 67,
        name: "الملك",
        english_name: "Al-Mulk",
        verses: 30,
        category: Category::Meccan,
        artwork_seed: "mulk",
    },
];

static SURAHS: LazyLock<Vec<Track>> = LazyLock::new(|| {
    SURAH_ENTRIES
        .iter()
        .map(|e| Track {
            id: e.id,
            title: e.name.to_string(),
            subtitle: e.english_name.to_string(),
            category: e.category,
            stream_url: format!("{STREAM_BASE}/{:03}.mp3", e.id),
            artwork_url: format!("https://picsum.photos/seed/{}/800/800", e.artwork_seed),
            verses_count: e.verses,
        })
        .collect()
});

static RECITERS: [Reciter; 3] = [
    Reciter {
        id: "afs",
        name: "مشاري العفاسي",
        style: "Murattal",
        image: "https://picsum.photos/seed/mishary/200/200",
    },
    Reciter {
        id: "sudais",
        name: "عبد الرحمن السديس",
        style: "Haram",
        image: "https://picsum.photos/seed/sudais/200/200",
    },
    Reciter {
        id: "shuraim",
        name: "سعود الشريم",
        style: "Classic",
        image: "https://picsum.photos/seed/shuraim/200/200",
    },
];

/// The curated surahs, in display order. The first one is the startup track.
pub fn surahs() -> &'static [Track] {
    &SURAHS
}

pub fn reciters() -> &'static [Reciter] {
    &RECITERS
}

/// Surahs whose Arabic title contains `query`, or whose subtitle contains it
/// ignoring case. A blank query keeps everything.
pub fn filter_catalog(query: &str) -> Vec<Track> {
    let query = query.trim();
    if query.is_empty() {
        return surahs().to_vec();
    }

    let query_lower = query.to_lowercase();
    surahs()
        .iter()
        .filter(|t| t.title.contains(query) || t.subtitle.to_lowercase().contains(&query_lower))
        .cloned()
        .collect()
}
