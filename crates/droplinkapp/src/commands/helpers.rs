use crate::error::{DroplinkError, Result};
use crate::index::{index_links, DisplayIndex, DisplayLink, LinkSelector};
use crate::store::link_store::LinkStore;
use crate::store::BlobStore;
use std::collections::HashSet;
use tracing::debug;

pub fn indexed_links<B: BlobStore>(store: &LinkStore<B>) -> Result<Vec<DisplayLink>> {
    Ok(index_links(store.list()?))
}

/// Resolves selectors to links in selection order, each link at most once.
pub fn resolve_selectors<B: BlobStore>(
    store: &LinkStore<B>,
    selectors: &[LinkSelector],
) -> Result<Vec<DisplayLink>> {
    let indexed = indexed_links(store)?;
    let resolved = resolve_in(&indexed, selectors)?;
    debug!(
        selectors = selectors.len(),
        resolved = resolved.len(),
        "selectors resolved"
    );
    Ok(resolved)
}

pub fn resolve_in(indexed: &[DisplayLink], selectors: &[LinkSelector]) -> Result<Vec<DisplayLink>> {
    let mut seen = HashSet::new();
    let mut results = Vec::new();
    let mut push = |dl: &DisplayLink, results: &mut Vec<DisplayLink>| {
        if seen.insert(dl.link.id.clone()) {
            results.push(dl.clone());
        }
    };

    for selector in selectors {
        match selector {
            LinkSelector::Index(index) => {
                // Numeric ids from older exports are tried when the index is out of range.
                let found = by_index(indexed, *index).or_else(|| by_id(indexed, &index.to_string()));
                match found {
                    Some(dl) => push(dl, &mut results),
                    None => {
                        return Err(DroplinkError::Api(format!("Index {} not found", index)));
                    }
                }
            }
            LinkSelector::Range(start, end) => {
                if end.0 > indexed.len() {
                    return Err(DroplinkError::Api(format!(
                        "Range end {} is past the last link ({})",
                        end,
                        indexed.len()
                    )));
                }
                for dl in indexed.iter().take(end.0).skip(start.0.saturating_sub(1)) {
                    push(dl, &mut results);
                }
            }
            LinkSelector::Id(id) => match by_id(indexed, id) {
                Some(dl) => push(dl, &mut results),
                None => return Err(DroplinkError::Api(format!("No link with id {}", id))),
            },
        }
    }

    Ok(results)
}

fn by_index(indexed: &[DisplayLink], index: DisplayIndex) -> Option<&DisplayLink> {
    indexed.iter().find(|dl| dl.index == index)
}

fn by_id<'a>(indexed: &'a [DisplayLink], id: &str) -> Option<&'a DisplayLink> {
    indexed.iter().find(|dl| dl.link.id == id)
}

/// Ids of the resolved links, in order.
pub fn ids(links: &[DisplayLink]) -> Vec<String> {
    links.iter().map(|dl| dl.link.id.clone()).collect()
}
