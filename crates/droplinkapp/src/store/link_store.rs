//! # Link Repository
//!
//! [`LinkStore`] is the single writer of the persisted `links` array. Every mutation
//! reads the whole array, computes the new array and writes it back as one value.
//!
//! ## Writer Discipline
//!
//! Mutating methods take `&mut self`. Within one process the borrow checker
//! therefore serializes read-modify-write cycles: two `add` calls can never both
//! read the pre-mutation array and clobber each other. Hosts that need to share
//! a store between threads wrap it in a mutex, which keeps that property.
//!
//! Two *processes* pointed at the same backend still race at the blob boundary:
//! the later write wins and the earlier append is lost. The filesystem backend
//! renames atomically, which prevents torn files but not lost updates.
//!
//! ## Import Replaces
//!
//! [`LinkStore::import`] overwrites the whole collection with the imported
//! array. It does not merge. Callers that want a merge must build the merged
//! array themselves and call [`LinkStore::replace_all`].

use super::{BlobStore, Entries, LINKS_KEY};
use crate::error::{DroplinkError, Result};
use crate::model::{normalize_tags, normalize_url, Link};
use crate::transfer;
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, info};

pub struct LinkStore<B: BlobStore> {
    backend: B,
}

impl<B: BlobStore> LinkStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Current collection in insertion order. An absent key is an empty collection.
    pub fn list(&self) -> Result<Vec<Link>> {
        let mut found = self.backend.get(&[LINKS_KEY])?;
        let mut links: Vec<Link> = match found.remove(LINKS_KEY) {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(value) => serde_json::from_value(value)?,
        };
        for link in links.iter_mut().filter(|l| l.title.is_empty()) {
            link.title = link.url.clone();
        }
        Ok(links)
    }

    fn save(&mut self, links: &[Link]) -> Result<()> {
        let mut entries = Entries::new();
        entries.insert(LINKS_KEY.to_string(), serde_json::to_value(links)?);
        self.backend.set(entries)?;
        debug!(count = links.len(), "links saved");
        Ok(())
    }

    /// Appends a new link with a fresh id and timestamp. No duplicate-url check.
    pub fn add(
        &mut self,
        url: &str,
        title: impl Into<String>,
        tags: Vec<String>,
    ) -> Result<Link> {
        let mut links = self.list()?;
        let link = Link::new(url, title, tags);
        links.push(link.clone());
        self.save(&links)?;
        debug!(id = %link.id, url = %link.url, "link added");
        Ok(link)
    }

    /// Replaces the element with the same id. Returns false if none matched,
    /// in which case nothing is written.
    pub fn update(&mut self, link: Link) -> Result<bool> {
        let mut links = self.list()?;
        let Some(slot) = links.iter_mut().find(|l| l.id == link.id) else {
            debug!(id = %link.id, "update skipped, id not found");
            return Ok(false);
        };
        *slot = Link {
            url: normalize_url(&link.url),
            tags: normalize_tags(&link.tags),
            ..link
        };
        self.save(&links)?;
        Ok(true)
    }

    /// Removes the link with `id`. Returns the number removed (0 or 1).
    pub fn delete(&mut self, id: &str) -> Result<usize> {
        self.delete_many(&[id])
    }

    /// Removes every link whose id is in `ids`; unknown ids are ignored.
    pub fn delete_many<I: AsRef<str>>(&mut self, ids: &[I]) -> Result<usize> {
        let targets: HashSet<&str> = ids.iter().map(|i| i.as_ref()).collect();
        let mut links = self.list()?;
        let before = links.len();
        links.retain(|l| !targets.contains(l.id.as_str()));
        let removed = before - links.len();
        if removed > 0 {
            self.save(&links)?;
        }
        Ok(removed)
    }

    /// Appends `tag` to each selected link that lacks it. Returns how many changed.
    pub fn add_tag<I: AsRef<str>>(&mut self, ids: &[I], tag: &str) -> Result<usize> {
        let tag = non_empty_tag(tag)?;
        self.retag(ids, |link| link.add_tag(tag))
    }

    /// Removes `tag` from each selected link. Returns how many changed.
    pub fn remove_tag<I: AsRef<str>>(&mut self, ids: &[I], tag: &str) -> Result<usize> {
        let tag = non_empty_tag(tag)?;
        self.retag(ids, |link| link.remove_tag(tag))
    }

    fn retag<I, F>(&mut self, ids: &[I], mut apply: F) -> Result<usize>
    where
        I: AsRef<str>,
        F: FnMut(&mut Link) -> bool,
    {
        let targets: HashSet<&str> = ids.iter().map(|i| i.as_ref()).collect();
        let mut links = self.list()?;
        let changed = links
            .iter_mut()
            .filter(|l| targets.contains(l.id.as_str()))
            .map(|l| apply(l))
            .filter(|c| *c)
            .count();
        if changed > 0 {
            self.save(&links)?;
        }
        Ok(changed)
    }

    /// Pretty-printed JSON of the whole collection.
    pub fn export(&self) -> Result<String> {
        transfer::export_json(&self.list()?)
    }

    /// Validates `json_text` and replaces the entire collection with it.
    /// On any format error the stored collection is left untouched.
    pub fn import(&mut self, json_text: &str) -> Result<Vec<Link>> {
        let links = transfer::parse_links(json_text)?;
        self.import_links(&links)?;
        Ok(links)
    }

    /// Replaces the collection with already validated links and returns how many
    /// stored links were dropped. An unreadable stored array counts as empty so a
    /// good import can always recover it.
    pub fn import_links(&mut self, links: &[Link]) -> Result<usize> {
        let previous = self.list().map(|found| found.len()).unwrap_or(0);
        self.replace_all(links)?;
        info!(previous, imported = links.len(), "collection replaced by import");
        Ok(previous)
    }

    /// Overwrites the collection wholesale.
    pub fn replace_all(&mut self, links: &[Link]) -> Result<()> {
        self.save(links)
    }
}

fn non_empty_tag(tag: &str) -> Result<&str> {
    let tag = tag.trim();
    if tag.is_empty() {
        return Err(DroplinkError::Api("Tag cannot be empty".to_string()));
    }
    Ok(tag)
}
