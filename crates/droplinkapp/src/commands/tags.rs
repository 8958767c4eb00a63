use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::Link;
use crate::store::link_store::LinkStore;
use crate::store::BlobStore;
use std::collections::BTreeSet;

/// Every tag in use, sorted and without duplicates.
pub fn available_tags(links: &[Link]) -> Vec<String> {
    links
        .iter()
        .flat_map(|l| l.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn run<B: BlobStore>(store: &LinkStore<B>) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    result.tags = available_tags(&store.list()?);
    Ok(result)
}
