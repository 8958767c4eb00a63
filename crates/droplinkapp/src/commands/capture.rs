//! # Capture
//!
//! A host event ("save this link", "save this page") becomes a repository command.
//! [`plan`] is pure: given the current collection and settings it decides between
//! adding and reporting a duplicate. [`run`] reads the collection, plans, and applies.
//!
//! Duplicates are matched on the normalized url, so `example.com/x` and
//! `https://example.com/x` are the same link. Bulk import does not go through
//! here and may still introduce duplicate urls.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DroplinkError, Result};
use crate::index::{DisplayIndex, DisplayLink};
use crate::model::{normalize_url, Link, Settings};
use crate::store::link_store::LinkStore;
use crate::store::BlobStore;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureRequest {
    pub url: String,
    pub title: Option<String>,
}

impl CaptureRequest {
    pub fn new(url: impl Into<String>, title: Option<String>) -> Self {
        Self {
            url: url.into(),
            title,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureCommand {
    Add {
        url: String,
        title: String,
        tags: Vec<String>,
    },
    Duplicate(DisplayLink),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    Saved(DisplayLink),
    Duplicate(DisplayLink),
}

impl CaptureOutcome {
    /// Converts to a command result. Notifications are only attached when enabled.
    pub fn into_result(self, settings: &Settings) -> CmdResult {
        let (link, message) = match self {
            CaptureOutcome::Saved(link) => {
                let message = CmdMessage::success(format!("Link saved: {}", link.link.title));
                (link, message)
            }
            CaptureOutcome::Duplicate(link) => {
                let message = CmdMessage::info(format!(
                    "Link already saved ({}): {}",
                    link.index, link.link.url
                ));
                (link, message)
            }
        };
        let mut result = CmdResult::default().with_affected_links(vec![link]);
        if settings.notifications_enabled {
            result.add_message(message);
        }
        result
    }
}

/// Decides what a capture should do without touching storage.
pub fn plan(links: &[Link], settings: &Settings, request: &CaptureRequest) -> CaptureCommand {
    let url = normalize_url(&request.url);
    if let Some(pos) = links.iter().position(|l| normalize_url(&l.url) == url) {
        return CaptureCommand::Duplicate(DisplayLink {
            index: DisplayIndex(pos + 1),
            link: links[pos].clone(),
        });
    }

    let title = request
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| url.clone());

    CaptureCommand::Add {
        url,
        title,
        tags: settings.default_tags(),
    }
}

pub fn run<B: BlobStore>(
    store: &mut LinkStore<B>,
    settings: &Settings,
    request: &CaptureRequest,
) -> Result<CaptureOutcome> {
    if request.url.trim().is_empty() {
        return Err(DroplinkError::InvalidUrl("URL cannot be empty".to_string()));
    }
    let links = store.list()?;
    match plan(&links, settings, request) {
        CaptureCommand::Duplicate(existing) => {
            info!(url = %existing.link.url, "capture skipped, already saved");
            Ok(CaptureOutcome::Duplicate(existing))
        }
        CaptureCommand::Add { url, title, tags } => {
            let link = store.add(&url, title, tags)?;
            info!(id = %link.id, url = %link.url, "link captured");
            Ok(CaptureOutcome::Saved(DisplayLink {
                index: DisplayIndex(links.len() + 1),
                link,
            }))
        }
    }
}
