//! Add a link from a form: title and url are validated before anything is stored.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DroplinkError, Result};
use crate::index::{DisplayIndex, DisplayLink};
use crate::model::{normalize_tags, normalize_url, LinkDraft, Settings};
use crate::store::link_store::LinkStore;
use crate::store::BlobStore;
use url::Url;

pub fn run<B: BlobStore>(
    store: &mut LinkStore<B>,
    settings: &Settings,
    draft: LinkDraft,
) -> Result<CmdResult> {
    let url = validate_url(&draft.url)?;
    let title = match draft.title {
        Some(title) => validate_title(&title)?,
        None => url.clone(),
    };
    let tags = match normalize_tags(&draft.tags) {
        tags if tags.is_empty() => settings.default_tags(),
        tags => tags,
    };

    let link = store.add(&url, title, tags)?;
    let index = DisplayIndex(store.list()?.len());

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Link added ({}): {}",
        index, link.title
    )));
    Ok(result.with_affected_links(vec![DisplayLink { index, link }]))
}

/// Adds `https://` when no scheme is present, then requires a parseable url with a host.
pub fn validate_url(input: &str) -> Result<String> {
    if input.trim().is_empty() {
        return Err(DroplinkError::InvalidUrl("URL cannot be empty".to_string()));
    }
    let url = normalize_url(input);
    match Url::parse(&url) {
        Ok(parsed) if parsed.host_str().is_some_and(|h| !h.is_empty()) => Ok(url),
        _ => Err(DroplinkError::InvalidUrl(url)),
    }
}

pub fn validate_title(input: &str) -> Result<String> {
    let title = input.trim();
    if title.is_empty() {
        return Err(DroplinkError::Api("Title cannot be empty".to_string()));
    }
    Ok(title.to_string())
}
