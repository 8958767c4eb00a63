use crate::commands::create::{validate_title, validate_url};
use crate::commands::helpers::resolve_selectors;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DroplinkError, Result};
use crate::index::{DisplayLink, LinkSelector};
use crate::model::normalize_tags;
use crate::store::link_store::LinkStore;
use crate::store::BlobStore;

/// Fields to change on one link. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkUpdate {
    pub title: Option<String>,
    pub url: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl LinkUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.url.is_none() && self.tags.is_none()
    }
}

/// Edits the link named by `selector`. Id and `createdAt` never change.
pub fn run<B: BlobStore>(
    store: &mut LinkStore<B>,
    selector: &LinkSelector,
    changes: LinkUpdate,
) -> Result<CmdResult> {
    if changes.is_empty() {
        return Err(DroplinkError::Api("Nothing to update".to_string()));
    }

    let resolved = resolve_selectors(store, std::slice::from_ref(selector))?;
    let [target] = resolved.as_slice() else {
        return Err(DroplinkError::Api(format!(
            "Edit needs exactly one link, {} selects {}",
            selector,
            resolved.len()
        )));
    };

    let mut link = target.link.clone();
    if let Some(title) = changes.title {
        link.title = validate_title(&title)?;
    }
    if let Some(url) = changes.url {
        link.url = validate_url(&url)?;
    }
    if let Some(tags) = changes.tags {
        link.tags = normalize_tags(tags);
    }

    let mut result = CmdResult::default();
    if store.update(link.clone())? {
        result.add_message(CmdMessage::success(format!(
            "Link updated ({}): {}",
            target.index, link.title
        )));
        result.affected_links.push(DisplayLink {
            index: target.index,
            link,
        });
    } else {
        // Removed between resolve and write.
        result.add_message(CmdMessage::warning(format!(
            "Link {} no longer exists, nothing updated",
            link.id
        )));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::DisplayIndex;
    use crate::store::mem_backend::MemBackend;

    fn store_with_one() -> LinkStore<MemBackend> {
        let mut store = LinkStore::new(MemBackend::new());
        store.add("a.com", "A", vec!["x".into()]).unwrap();
        store
    }

    #[test]
    fn edits_title_and_keeps_identity() {
        let mut store = store_with_one();
        let before = store.list().unwrap()[0].clone();

        let result = run(
            &mut store,
            &LinkSelector::Index(DisplayIndex(1)),
            LinkUpdate {
                title: Some("Renamed".into()),
                ..Default::default()
            },
        )
        .unwrap();

        let after = &store.list().unwrap()[0];
        assert_eq!(after.title, "Renamed");
        assert_eq!(after.id, before.id);
        assert_eq!(after.created_at, before.created_at);
        assert_eq!(result.affected_links[0].index, DisplayIndex(1));
    }

    #[test]
    fn url_is_normalized_and_tags_deduped() {
        let mut store = store_with_one();
        run(
            &mut store,
            &LinkSelector::Index(DisplayIndex(1)),
            LinkUpdate {
                url: Some("b.com".into()),
                tags: Some(vec!["y".into(), "y".into(), " ".into()]),
                ..Default::default()
            },
        )
        .unwrap();
        let link = &store.list().unwrap()[0];
        assert_eq!(link.url, "https://b.com");
        assert_eq!(link.tags, vec!["y"]);
    }

    #[test]
    fn rejects_empty_update_and_bad_input() {
        let mut store = store_with_one();
        let sel = LinkSelector::Index(DisplayIndex(1));
        assert!(run(&mut store, &sel, LinkUpdate::default()).is_err());
        assert!(run(
            &mut store,
            &sel,
            LinkUpdate {
                title: Some("".into()),
                ..Default::default()
            }
        )
        .is_err());
        assert_eq!(store.list().unwrap()[0].title, "A");
    }

    #[test]
    fn range_selecting_many_is_rejected() {
        let mut store = store_with_one();
        store.add("b.com", "B", vec![]).unwrap();
        let err = run(
            &mut store,
            &LinkSelector::Range(DisplayIndex(1), DisplayIndex(2)),
            LinkUpdate {
                title: Some("Both".into()),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("exactly one"));
    }
}
