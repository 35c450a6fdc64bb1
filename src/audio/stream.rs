//! Fetching and decoding of recitation streams.

use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

use reqwest::blocking::Client;
use rodio::Decoder;

use crate::error::{Error, Result};

/// Local file path for `url`, or `None` when it is an HTTP(S) address.
///
/// Accepts `file://` URLs and bare paths.
pub(super) fn local_path(url: &str) -> Option<PathBuf> {
    let lower = url.trim().to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return None;
    }
    let trimmed = url.trim();
    Some(PathBuf::from(trimmed.strip_prefix("file://").unwrap_or(trimmed)))
}

/// Download (or read) the whole stream into memory.
pub(super) fn fetch_stream(client: &Client, url: &str) -> Result<Vec<u8>> {
    if let Some(path) = local_path(url) {
        return Ok(fs::read(path)?);
    }

    let response = client.get(url).send()?.error_for_status()?;
    Ok(response.bytes()?.to_vec())
}

pub(super) fn decode(bytes: Vec<u8>) -> Result<Decoder<Cursor<Vec<u8>>>> {
    if bytes.is_empty() {
        return Err(Error::Media("empty stream".to_string()));
    }
    Decoder::new(Cursor::new(bytes)).map_err(|e| Error::Media(e.to_string()))
}
