//! # Link Identifiers: Id vs Display Index
//!
//! Every link has an opaque id (a UUID for links created here, anything for links
//! that came in through import). Ids are awkward to type, so the UI numbers links.
//!
//! ## Canonical Ordering
//!
//! The display index of a link is its 1-based position in the full, unfiltered
//! collection, which is insertion order. Filtering never renumbers: when a search
//! shows only the third link, it is still shown as `3`, and `droplink delete 3`
//! still targets it.
//!
//! ## Selectors
//!
//! - `3`: one index
//! - `2-5`: an inclusive range
//! - anything else: a raw link id
//!
//! Parsing lives in [`parse_selector`]; resolving selectors against the stored
//! collection lives in [`crate::commands::helpers`].

use crate::model::Link;
use serde::Serialize;
use std::fmt;

/// 1-based position of a link in the full collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DisplayIndex(pub usize);

impl fmt::Display for DisplayIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// User input naming one or more links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkSelector {
    Index(DisplayIndex),
    Range(DisplayIndex, DisplayIndex),
    Id(String),
}

impl fmt::Display for LinkSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkSelector::Index(i) => write!(f, "{}", i),
            LinkSelector::Range(start, end) => write!(f, "{}-{}", start, end),
            LinkSelector::Id(id) => write!(f, "{}", id),
        }
    }
}

/// A link paired with its canonical display index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayLink {
    pub index: DisplayIndex,
    pub link: Link,
}

/// Numbers the collection 1..N in stored order.
///
/// Always build display lists through this function so a link keeps the same
/// number in every view.
pub fn index_links(links: Vec<Link>) -> Vec<DisplayLink> {
    links
        .into_iter()
        .enumerate()
        .map(|(i, link)| DisplayLink {
            index: DisplayIndex(i + 1),
            link,
        })
        .collect()
}

/// Parses one selector argument.
///
/// Pure digits become an index, `a-b` with digit endpoints a range. Anything else
/// is treated as a raw id, so UUIDs (which contain `-`) fall through untouched.
pub fn parse_selector(s: &str) -> Result<LinkSelector, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Empty selector".to_string());
    }

    if is_digits(s) {
        return parse_index(s).map(LinkSelector::Index);
    }

    if let Some((start, end)) = s.split_once('-') {
        if is_digits(start) && is_digits(end) {
            let start = parse_index(start)?;
            let end = parse_index(end)?;
            if start > end {
                return Err(format!("Invalid range: {} is after {}", start, end));
            }
            return Ok(LinkSelector::Range(start, end));
        }
    }

    Ok(LinkSelector::Id(s.to_string()))
}

/// Parses every argument, stopping at the first bad one.
pub fn parse_selectors<I, S>(inputs: I) -> Result<Vec<LinkSelector>, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    inputs
        .into_iter()
        .map(|s| parse_selector(s.as_ref()))
        .collect()
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_index(s: &str) -> Result<DisplayIndex, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("Indexes start at 1".to_string()),
        Ok(n) => Ok(DisplayIndex(n)),
        Err(_) => Err(format!("Invalid index: {}", s)),
    }
}
