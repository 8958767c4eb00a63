use crate::commands::helpers::{ids, resolve_selectors};
use crate::commands::{links_word, CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::LinkSelector;
use crate::store::link_store::LinkStore;
use crate::store::BlobStore;

pub fn run<B: BlobStore>(store: &mut LinkStore<B>, selectors: &[LinkSelector]) -> Result<CmdResult> {
    let resolved = resolve_selectors(store, selectors)?;
    let removed = store.delete_many(&ids(&resolved))?;

    let mut result = CmdResult::default();
    for dl in &resolved {
        result.add_message(CmdMessage::success(format!(
            "Link deleted ({}): {}",
            dl.index, dl.link.title
        )));
    }
    if removed < resolved.len() {
        result.add_message(CmdMessage::warning(format!(
            "{} of {} {} were already gone",
            resolved.len() - removed,
            resolved.len(),
            links_word(resolved.len())
        )));
    }
    Ok(result.with_affected_links(resolved))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{parse_selectors, DisplayIndex};
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn delete_many_leaves_only_unselected() {
        let mut store = LinkStore::new(MemBackend::new());
        store.add("a.com", "A", vec!["a".into()]).unwrap();
        store.add("b.com", "B", vec!["b".into()]).unwrap();
        let third = store
            .add("c.com", "C", vec!["a".into(), "b".into()])
            .unwrap();

        let result = run(&mut store, &parse_selectors(["1-2"]).unwrap()).unwrap();
        assert_eq!(result.affected_links.len(), 2);
        assert_eq!(store.list().unwrap(), vec![third]);
    }

    #[test]
    fn remaining_links_are_renumbered_after_delete() {
        let mut store = LinkStore::new(MemBackend::new());
        store.add("a.com", "A", vec![]).unwrap();
        store.add("b.com", "B", vec![]).unwrap();
        run(&mut store, &[LinkSelector::Index(DisplayIndex(1))]).unwrap();

        let listed = crate::commands::get::run(&store, &Default::default())
            .unwrap()
            .listed_links;
        assert_eq!(listed[0].link.title, "B");
        assert_eq!(listed[0].index, DisplayIndex(1));
    }

    #[test]
    fn unknown_selector_fails_without_deleting() {
        let mut store = LinkStore::new(MemBackend::new());
        store.add("a.com", "A", vec![]).unwrap();
        assert!(run(&mut store, &[LinkSelector::Id("ghost".into())]).is_err());
        assert_eq!(store.list().unwrap().len(), 1);
    }
}
