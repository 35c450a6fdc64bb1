use std::env;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::config::AiSettings;
use crate::error::{Error, Result};

use super::prompts;
use super::types::{DailyReflection, Listing, RecitationService, SearchResult, TrackRef};

/// `RecitationService` backed by a Gemini-style `generateContent` endpoint.
pub struct GeminiClient {
    http: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    search_grounding: bool,
}

#[derive(Debug, Deserialize)]
pub(super) struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate.
    pub(super) fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.trim().is_empty() { None } else { Some(text) }
    }
}

impl GeminiClient {
    /// Build a client from settings. The API key comes from `ai.api_key`, or
    /// from the environment variable named by `ai.api_key_env`.
    pub fn new(settings: &AiSettings) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        let api_key = settings
            .api_key
            .clone()
            .or_else(|| env::var(&settings.api_key_env).ok())
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        if api_key.is_none() {
            warn!(env = %settings.api_key_env, "no AI API key configured; smart features disabled");
        }

        Ok(Self {
            http,
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            api_key,
            search_grounding: settings.search_grounding,
        })
    }

    fn generate<T: DeserializeOwned>(&self, prompt: &str, schema: Value, grounded: bool) -> Result<T> {
        let key = self.api_key.as_deref().ok_or(Error::MissingApiKey)?;
        let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);
        let body = request_body(prompt, schema, grounded && self.search_grounding);

        debug!(model = %self.model, grounded, "AI request started");
        let response = self
            .http
            .post(url)
            .query(&[("key", key)])
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::AiStatus(status.as_u16()));
        }

        let envelope: GenerateResponse = response.json()?;
        let text = envelope.text().ok_or(Error::EmptyAiResponse)?;
        Ok(serde_json::from_str(extract_json(&text))?)
    }
}

/// Build the request body. Grounded requests cannot carry a response schema,
/// so they rely on the prompt asking for JSON.
pub(super) fn request_body(prompt: &str, schema: Value, grounded: bool) -> Value {
    let mut body = json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
    });

    if grounded {
        body["tools"] = json!([{ "google_search": {} }]);
    } else {
        body["generationConfig"] = json!({
            "responseMimeType": "application/json",
            "responseSchema": schema,
        });
    }
    body
}

/// Strip a Markdown code fence (```json ... ```) around a JSON reply.
pub(super) fn extract_json(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Trim every url and drop hits that have none.
pub(super) fn usable_results(results: Vec<SearchResult>) -> Vec<SearchResult> {
    results
        .into_iter()
        .filter_map(|mut r| {
            r.url = r.url.trim().to_string();
            (!r.url.is_empty()).then_some(r)
        })
        .collect()
}

pub(super) fn usable_track_refs(refs: Vec<TrackRef>) -> Vec<TrackRef> {
    refs.into_iter()
        .filter_map(|mut t| {
            t.url = t.url.trim().to_string();
            (!t.url.is_empty()).then_some(t)
        })
        .collect()
}

impl RecitationService for GeminiClient {
    fn daily_reflection(&self) -> Option<DailyReflection> {
        match self.generate(prompts::REFLECTION_PROMPT, prompts::reflection_schema(), false) {
            Ok(reflection) => Some(reflection),
            Err(e) => {
                warn!(error = %e, "daily reflection request failed");
                None
            }
        }
    }

    fn search_recitations(&self, query: &str) -> Vec<SearchResult> {
        let prompt = prompts::search_prompt(query);
        match self.generate::<Listing<SearchResult>>(&prompt, prompts::search_schema(), true) {
            Ok(listing) => usable_results(listing.into_vec()),
            Err(e) => {
                warn!(error = %e, query, "recitation search failed");
                Vec::new()
            }
        }
    }

    fn reciter_mushaf(&self, reciter_name: &str) -> Vec<TrackRef> {
        let prompt = prompts::mushaf_prompt(reciter_name);
        match self.generate::<Listing<TrackRef>>(&prompt, prompts::mushaf_schema(), true) {
            Ok(listing) => usable_track_refs(listing.into_vec()),
            Err(e) => {
                warn!(error = %e, reciter = reciter_name, "reciter track listing failed");
                Vec::new()
            }
        }
    }
}
