//! Property tests for the link collection.
//!
//! - sequential adds come back in insertion order with unique ids
//! - tagging twice equals tagging once
//! - export followed by import leaves the collection equal
//! - deleting an unknown id changes nothing

use droplinkapp::store::link_store::LinkStore;
use droplinkapp::store::mem_backend::MemBackend;
use proptest::prelude::*;
use std::collections::HashSet;

fn arb_entry() -> impl Strategy<Value = (String, String, Vec<String>)> {
    (
        "(https?://)?[a-z]{3,12}\\.[a-z]{2,4}(/[a-z0-9_-]{0,12})?",
        "[A-Za-z0-9 ]{1,30}",
        prop::collection::vec("[a-z]{1,8}", 0..4),
    )
}

fn seeded(entries: &[(String, String, Vec<String>)]) -> LinkStore<MemBackend> {
    let mut store = LinkStore::new(MemBackend::new());
    for (url, title, tags) in entries {
        store.add(url, title.clone(), tags.clone()).unwrap();
    }
    store
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn adds_preserve_order_and_unique_ids(entries in prop::collection::vec(arb_entry(), 0..20)) {
        let mut store = LinkStore::new(MemBackend::new());
        let mut added = Vec::new();
        for (url, title, tags) in &entries {
            added.push(store.add(url, title.clone(), tags.clone()).unwrap());
        }

        let listed = store.list().unwrap();
        prop_assert_eq!(&listed, &added);

        let ids: HashSet<&str> = listed.iter().map(|l| l.id.as_str()).collect();
        prop_assert_eq!(ids.len(), listed.len());
        for link in &listed {
            let lower = link.url.to_ascii_lowercase();
            prop_assert!(lower.starts_with("http://") || lower.starts_with("https://"));
        }
    }

    #[test]
    fn add_tag_is_idempotent(
        entries in prop::collection::vec(arb_entry(), 1..10),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 1..5),
        tag in "[a-z]{1,8}",
    ) {
        let mut store = seeded(&entries);
        let links = store.list().unwrap();
        let ids: Vec<String> = picks.iter().map(|p| links[p.index(links.len())].id.clone()).collect();

        store.add_tag(&ids, &tag).unwrap();
        let once = store.list().unwrap();
        store.add_tag(&ids, &tag).unwrap();
        let twice = store.list().unwrap();

        prop_assert_eq!(&once, &twice);
        for link in &once {
            let count = link.tags.iter().filter(|t| *t == &tag).count();
            prop_assert!(count <= 1);
            if ids.contains(&link.id) {
                prop_assert_eq!(count, 1);
            }
        }
    }

    #[test]
    fn export_then_import_is_identity(entries in prop::collection::vec(arb_entry(), 0..15)) {
        let mut store = seeded(&entries);
        let before = store.list().unwrap();

        let text = store.export().unwrap();
        store.import(&text).unwrap();

        prop_assert_eq!(store.list().unwrap(), before);
    }

    #[test]
    fn deleting_unknown_id_changes_nothing(
        entries in prop::collection::vec(arb_entry(), 0..10),
        ghost in "ghost-[a-z0-9]{4,10}",
    ) {
        let mut store = seeded(&entries);
        let before = store.list().unwrap();
        prop_assert_eq!(store.delete(&ghost).unwrap(), 0);
        prop_assert_eq!(store.list().unwrap(), before);
    }
}
