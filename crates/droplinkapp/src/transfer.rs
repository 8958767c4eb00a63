//! # Import / Export
//!
//! Export is the full collection as pretty-printed JSON. Import is the reverse, but
//! the input is untrusted, so it runs through a small validation machine:
//!
//! ```text
//! Idle → Parsing → { Valid | InvalidJson | InvalidShape } → Idle
//! ```
//!
//! - `InvalidJson`: the text does not decode. Reported as `Invalid JSON format`.
//! - `InvalidShape`: decoded, but not an array, or an element breaks the schema.
//! - `Valid`: every element became a [`Link`]; the caller may replace the collection.
//!
//! Nothing is written here. Storage only happens after a `Valid` verdict.
//!
//! ## Element Schema
//!
//! | Field | Rule |
//! |-------|------|
//! | `id` | required string (integers accepted and stringified), unique in the payload |
//! | `url` | required non-empty string, scheme-normalized |
//! | `title` | optional string, defaults to the url |
//! | `tags` | optional array of strings, defaults to `[]`, deduped |
//! | `createdAt` | optional string, defaults to the import time |

use crate::error::{DroplinkError, Result};
use crate::model::{normalize_tags, normalize_url, timestamp, Link, LinkDraft};
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{Map, Value};
use std::collections::HashSet;

pub const INVALID_JSON: &str = "Invalid JSON format";
pub const INVALID_SHAPE: &str = "Invalid format: Data must be an array of links";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportState {
    Idle,
    Parsing,
    Valid,
    InvalidJson,
    InvalidShape,
}

/// Drives one import input through the validation states.
#[derive(Debug)]
pub struct ImportMachine {
    state: ImportState,
    trace: Vec<ImportState>,
}

impl Default for ImportMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportMachine {
    pub fn new() -> Self {
        Self {
            state: ImportState::Idle,
            trace: vec![ImportState::Idle],
        }
    }

    pub fn state(&self) -> ImportState {
        self.state
    }

    /// States visited during the last `run`, starting and ending at `Idle`.
    pub fn trace(&self) -> &[ImportState] {
        &self.trace
    }

    fn enter(&mut self, state: ImportState) {
        self.state = state;
        self.trace.push(state);
    }

    pub fn run(&mut self, text: &str, now: DateTime<Utc>) -> Result<Vec<Link>> {
        self.trace = vec![ImportState::Idle];
        self.enter(ImportState::Parsing);

        let verdict = match serde_json::from_str::<Value>(text) {
            Err(_) => {
                self.enter(ImportState::InvalidJson);
                Err(DroplinkError::ImportFormat(INVALID_JSON.to_string()))
            }
            Ok(value) => match validate_array(value, now) {
                Ok(links) => {
                    self.enter(ImportState::Valid);
                    Ok(links)
                }
                Err(e) => {
                    self.enter(ImportState::InvalidShape);
                    Err(e)
                }
            },
        };

        self.enter(ImportState::Idle);
        verdict
    }
}

/// Parses an exported collection. Fails with `ImportFormat` on any problem.
pub fn parse_links(text: &str) -> Result<Vec<Link>> {
    ImportMachine::new().run(text, Utc::now())
}

/// What an import text turned out to contain.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportPayload {
    /// A full collection to replace the stored one.
    Links(Vec<Link>),
    /// A single `{title, url}` object, to be added rather than imported.
    Single(LinkDraft),
}

/// Higher-layer entry point: recognizes a lone link object before falling back to
/// the collection path.
pub fn classify(text: &str, now: DateTime<Utc>) -> Result<ImportPayload> {
    if let Ok(Value::Object(obj)) = serde_json::from_str::<Value>(text) {
        if let Some(Value::String(url)) = obj.get("url") {
            let title = obj
                .get("title")
                .and_then(Value::as_str)
                .map(str::to_string);
            let tags = obj
                .get("tags")
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();
            return Ok(ImportPayload::Single(
                LinkDraft::new(url.clone(), title).with_tags(tags),
            ));
        }
    }
    ImportMachine::new()
        .run(text, now)
        .map(ImportPayload::Links)
}

fn validate_array(value: Value, now: DateTime<Utc>) -> Result<Vec<Link>> {
    let items = match value {
        Value::Array(items) => items,
        _ => return Err(DroplinkError::ImportFormat(INVALID_SHAPE.to_string())),
    };

    let stamp = timestamp(now);
    let mut seen = HashSet::new();
    let mut links = Vec::with_capacity(items.len());
    for (i, item) in items.into_iter().enumerate() {
        let position = i + 1;
        let link = validate_element(position, item, &stamp)?;
        if !seen.insert(link.id.clone()) {
            return Err(invalid(position, &format!("duplicate id {}", link.id)));
        }
        links.push(link);
    }
    Ok(links)
}

fn validate_element(position: usize, value: Value, stamp: &str) -> Result<Link> {
    let obj = match value {
        Value::Object(obj) => obj,
        _ => return Err(invalid(position, "expected an object")),
    };

    let id = match obj.get("id") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        Some(Value::Number(n)) if n.is_u64() || n.is_i64() => n.to_string(),
        Some(_) => return Err(invalid(position, "id must be a non-empty string")),
        None => return Err(invalid(position, "missing id")),
    };

    let url = match obj.get("url") {
        Some(Value::String(s)) if !s.trim().is_empty() => normalize_url(s),
        Some(_) => return Err(invalid(position, "url must be a non-empty string")),
        None => return Err(invalid(position, "missing url")),
    };

    let title = match optional_string(&obj, "title") {
        Ok(Some(t)) => t,
        Ok(None) => url.clone(),
        Err(()) => return Err(invalid(position, "title must be a string")),
    };

    let tags = match obj.get("tags") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => {
            let mut tags = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::String(s) => tags.push(s.as_str()),
                    _ => return Err(invalid(position, "tags must be strings")),
                }
            }
            normalize_tags(tags)
        }
        Some(_) => return Err(invalid(position, "tags must be an array")),
    };

    let created_at = match optional_string(&obj, "createdAt") {
        Ok(Some(c)) => c,
        Ok(None) => stamp.to_string(),
        Err(()) => return Err(invalid(position, "createdAt must be a string")),
    };

    Ok(Link {
        id,
        url,
        title,
        tags,
        created_at,
    })
}

fn optional_string(obj: &Map<String, Value>, key: &str) -> std::result::Result<Option<String>, ()> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(()),
    }
}

fn invalid(position: usize, reason: &str) -> DroplinkError {
    DroplinkError::ImportFormat(format!("Invalid link at position {}: {}", position, reason))
}

/// Serializes the collection with two-space indentation.
pub fn export_json(links: &[Link]) -> Result<String> {
    Ok(serde_json::to_string_pretty(links)?)
}

/// Download name for an export made on `date`: `airdrop-links-YYYY-MM-DD.json`.
pub fn export_filename(date: NaiveDate) -> String {
    format!("airdrop-links-{}.json", date.format("%Y-%m-%d"))
}
