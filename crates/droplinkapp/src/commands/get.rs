use crate::commands::helpers::indexed_links;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::DisplayLink;
use crate::model::Link;
use crate::store::link_store::LinkStore;
use crate::store::BlobStore;

/// Dashboard filter. Both parts are optional; an empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkFilter {
    /// Case-insensitive substring of title or url.
    pub search: Option<String>,
    /// Match links carrying ANY of these tags.
    pub tags: Vec<String>,
}

impl LinkFilter {
    pub fn matches(&self, link: &Link) -> bool {
        self.matches_search(link) && self.matches_tags(link)
    }

    fn matches_search(&self, link: &Link) -> bool {
        let term = match self.search.as_deref().map(str::trim) {
            None | Some("") => return true,
            Some(term) => term.to_lowercase(),
        };
        link.title.to_lowercase().contains(&term) || link.url.to_lowercase().contains(&term)
    }

    fn matches_tags(&self, link: &Link) -> bool {
        self.tags.is_empty() || self.tags.iter().any(|t| link.has_tag(t))
    }
}

/// Keeps matching links without renumbering them.
pub fn apply_filter(indexed: Vec<DisplayLink>, filter: &LinkFilter) -> Vec<DisplayLink> {
    indexed
        .into_iter()
        .filter(|dl| filter.matches(&dl.link))
        .collect()
}

pub fn run<B: BlobStore>(store: &LinkStore<B>, filter: &LinkFilter) -> Result<CmdResult> {
    let listed = apply_filter(indexed_links(store)?, filter);
    Ok(CmdResult::default().with_listed_links(listed))
}
