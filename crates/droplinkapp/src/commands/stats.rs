use crate::commands::tags::available_tags;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::Link;
use crate::store::link_store::LinkStore;
use crate::store::BlobStore;
use serde::Serialize;

/// Dashboard summary card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkStats {
    pub total: usize,
    pub unique_tags: usize,
    /// `createdAt` of the newest link.
    pub latest_added: Option<String>,
}

pub fn compute(links: &[Link]) -> LinkStats {
    // Unparseable timestamps from imports still count, compared as text.
    let latest_added = links
        .iter()
        .max_by(|a, b| match (a.created_at_parsed(), b.created_at_parsed()) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Greater,
            (None, Some(_)) => std::cmp::Ordering::Less,
            (None, None) => a.created_at.cmp(&b.created_at),
        })
        .map(|l| l.created_at.clone());

    LinkStats {
        total: links.len(),
        unique_tags: available_tags(links).len(),
        latest_added,
    }
}

pub fn run<B: BlobStore>(store: &LinkStore<B>) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    result.stats = Some(compute(&store.list()?));
    Ok(result)
}
