//! Prompt text and response schemas for the three AI calls.

use serde_json::{Value, json};

pub(super) const REFLECTION_PROMPT: &str = "Give me one short, uplifting verse of the Holy Quran \
in Arabic, its English translation, a brief and graceful reflection on it written in Arabic, \
and the name of the surah it comes from. Reply with JSON only.";

pub(super) fn search_prompt(query: &str) -> String {
    format!(
        "Find distinguished Quran recitations matching \"{query}\". \
Every `url` must be a direct, working link to an audio file that starts with http and ends \
with .mp3, playable by a plain audio element. Never return YouTube links or web pages. \
Prefer mp3quran.net, tvquran.com and islamway.net. Reply with a JSON array of objects with \
`title` (surah name), `reciter`, `url` and `source` (site name)."
    )
}

pub(super) fn mushaf_prompt(reciter_name: &str) -> String {
    format!(
        "List the complete recited Quran (mushaf) by the reciter \"{reciter_name}\". \
Every `url` must be a direct link to the MP3 file itself (for example \
server8.mp3quran.net/.../001.mp3), never a web page, and must end with .mp3. \
Search the mp3quran.net, islamway.net and tvquran.com catalogs. Reply with a JSON array of \
objects with `title` (surah name), `url` and `type` set to \"audio\"."
    )
}

pub(super) fn reflection_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "verse": { "type": "STRING" },
            "translation": { "type": "STRING" },
            "reflection": { "type": "STRING" },
            "surahName": { "type": "STRING" }
        },
        "required": ["verse", "translation", "reflection", "surahName"]
    })
}

pub(super) fn search_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "title": { "type": "STRING", "description": "surah name" },
                "reciter": { "type": "STRING", "description": "reciter name" },
                "url": { "type": "STRING", "description": "direct MP3 link ending in .mp3" },
                "source": { "type": "STRING", "description": "source site name" }
            },
            "required": ["title", "reciter", "url", "source"]
        }
    })
}

pub(super) fn mushaf_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "title": { "type": "STRING", "description": "surah name" },
                "url": { "type": "STRING", "description": "direct MP3 link ending in .mp3" },
                "type": { "type": "STRING", "enum": ["audio"] }
            },
            "required": ["title", "url", "type"]
        }
    })
}
