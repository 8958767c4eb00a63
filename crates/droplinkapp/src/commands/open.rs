//! # Batch-Open
//!
//! Opening many links is a two-step exchange so commands never prompt:
//!
//! 1. [`plan`] decides which links to open and whether the user must confirm.
//! 2. The caller asks (or not) and hands the answer to [`execute`], which drives a
//!    host-provided [`TabOpener`].
//!
//! ## Two Policies
//!
//! | Source | Over the limit |
//! |--------|----------------|
//! | [`OpenSource::ContextMenu`] | truncated to `maxTabsToOpen`, never asks |
//! | [`OpenSource::Dashboard`] | opens the full selection, asks first when `confirmBeforeOpening` |
//!
//! Tabs open in the background (`active = false`), one per link, in selection order.
//! A failing tab is reported and the rest still open.

use crate::commands::get::{apply_filter, LinkFilter};
use crate::commands::helpers::{indexed_links, resolve_selectors};
use crate::commands::{links_word, CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::{DisplayLink, LinkSelector};
use crate::model::Settings;
use crate::store::link_store::LinkStore;
use crate::store::BlobStore;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenSource {
    Dashboard,
    ContextMenu,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenPlan {
    pub links: Vec<DisplayLink>,
    pub needs_confirmation: bool,
    /// How many selected links were dropped by truncation.
    pub truncated: usize,
}

/// Host side effect: open one url in a new tab.
pub trait TabOpener {
    fn open_url(&mut self, url: &str, active: bool) -> Result<()>;
}

impl<T: TabOpener + ?Sized> TabOpener for &mut T {
    fn open_url(&mut self, url: &str, active: bool) -> Result<()> {
        (**self).open_url(url, active)
    }
}

pub fn plan(selection: Vec<DisplayLink>, settings: &Settings, source: OpenSource) -> OpenPlan {
    let max = settings.max_tabs_to_open.max(1) as usize;
    match source {
        OpenSource::ContextMenu => {
            let truncated = selection.len().saturating_sub(max);
            let mut links = selection;
            links.truncate(max);
            OpenPlan {
                links,
                needs_confirmation: false,
                truncated,
            }
        }
        OpenSource::Dashboard => OpenPlan {
            needs_confirmation: settings.confirm_before_opening && selection.len() > max,
            links: selection,
            truncated: 0,
        },
    }
}

/// The "open N tabs" host message: keeps the first `max_tabs` urls.
pub fn truncate_urls(urls: &[String], max_tabs: usize) -> Vec<String> {
    urls.iter().take(max_tabs).cloned().collect()
}

/// Resolves the selection (or every link when `selectors` is empty), narrows it
/// to the links matching `filter`, and plans. "Open all" on a filtered view
/// therefore opens only what the view shows.
pub fn prepare<B: BlobStore>(
    store: &LinkStore<B>,
    settings: &Settings,
    selectors: &[LinkSelector],
    filter: &LinkFilter,
    source: OpenSource,
) -> Result<OpenPlan> {
    let selection = if selectors.is_empty() {
        indexed_links(store)?
    } else {
        resolve_selectors(store, selectors)?
    };
    Ok(plan(apply_filter(selection, filter), settings, source))
}

/// Opens the planned links. With a required confirmation denied, nothing opens.
pub fn execute<O: TabOpener>(plan: OpenPlan, confirmed: bool, mut opener: O) -> CmdResult {
    let mut result = CmdResult::default();

    if plan.needs_confirmation && !confirmed {
        result.add_message(CmdMessage::info("Opening cancelled"));
        return result;
    }

    if plan.links.is_empty() {
        result.add_message(CmdMessage::info("No links to open"));
        return result;
    }

    let mut opened = Vec::with_capacity(plan.links.len());
    for dl in plan.links {
        match opener.open_url(&dl.link.url, false) {
            Ok(()) => opened.push(dl),
            Err(e) => {
                warn!(url = %dl.link.url, error = %e, "failed to open tab");
                result.add_message(CmdMessage::warning(format!(
                    "Could not open ({}) {}: {}",
                    dl.index, dl.link.url, e
                )));
            }
        }
    }

    info!(opened = opened.len(), truncated = plan.truncated, "batch open finished");
    result.add_message(CmdMessage::success(format!(
        "Opened {} {}",
        opened.len(),
        links_word(opened.len())
    )));
    if plan.truncated > 0 {
        result.add_message(CmdMessage::info(format!(
            "{} more {} skipped by the tab limit",
            plan.truncated,
            links_word(plan.truncated)
        )));
    }
    result.with_affected_links(opened)
}
