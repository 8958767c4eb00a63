//! Batch tagging.
//!
//! - `add_tag`: append a tag to every selected link that lacks it
//! - `remove_tag`: drop a tag from every selected link that has it
//!
//! Both are idempotent; repeating a call changes nothing and reports so.

use crate::commands::helpers::{ids, indexed_links, resolve_selectors};
use crate::commands::{links_word, CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::{DisplayLink, LinkSelector};
use crate::store::link_store::LinkStore;
use crate::store::BlobStore;

pub fn add_tag<B: BlobStore>(
    store: &mut LinkStore<B>,
    selectors: &[LinkSelector],
    tag: &str,
) -> Result<CmdResult> {
    let resolved = resolve_selectors(store, selectors)?;
    let changed = store.add_tag(&ids(&resolved), tag)?;

    let mut result = CmdResult::default();
    if changed > 0 {
        result.add_message(CmdMessage::success(format!(
            "Added tag [{}] to {} {}",
            tag.trim(),
            changed,
            links_word(changed)
        )));
    } else {
        result.add_message(CmdMessage::info(format!(
            "All selected links already have tag [{}]",
            tag.trim()
        )));
    }
    Ok(result.with_affected_links(refreshed(store, &resolved)?))
}

pub fn remove_tag<B: BlobStore>(
    store: &mut LinkStore<B>,
    selectors: &[LinkSelector],
    tag: &str,
) -> Result<CmdResult> {
    let resolved = resolve_selectors(store, selectors)?;
    let changed = store.remove_tag(&ids(&resolved), tag)?;

    let mut result = CmdResult::default();
    if changed > 0 {
        result.add_message(CmdMessage::success(format!(
            "Removed tag [{}] from {} {}",
            tag.trim(),
            changed,
            links_word(changed)
        )));
    } else {
        result.add_message(CmdMessage::info(format!(
            "No selected link has tag [{}]",
            tag.trim()
        )));
    }
    Ok(result.with_affected_links(refreshed(store, &resolved)?))
}

// Re-reads the selected links so callers see their post-operation tags.
fn refreshed<B: BlobStore>(
    store: &LinkStore<B>,
    selected: &[DisplayLink],
) -> Result<Vec<DisplayLink>> {
    let current = indexed_links(store)?;
    Ok(selected
        .iter()
        .filter_map(|s| current.iter().find(|c| c.link.id == s.link.id).cloned())
        .collect())
}
