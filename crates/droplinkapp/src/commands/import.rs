//! Import entry point for UI clients.
//!
//! A pasted or loaded text is either a full export (array) or one link object.
//! The object form is routed to [`create`](super::create) and appends; the array
//! form replaces the whole collection.

use crate::commands::{create, links_word, CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::index_links;
use crate::model::Settings;
use crate::store::link_store::LinkStore;
use crate::store::BlobStore;
use crate::transfer::{classify, ImportPayload};
use chrono::Utc;

pub fn run<B: BlobStore>(
    store: &mut LinkStore<B>,
    settings: &Settings,
    text: &str,
) -> Result<CmdResult> {
    match classify(text, Utc::now())? {
        ImportPayload::Single(draft) => create::run(store, settings, draft),
        ImportPayload::Links(links) => {
            let previous = store.import_links(&links)?;

            let mut result = CmdResult::default();
            if previous > 0 {
                result.add_message(CmdMessage::warning(format!(
                    "Replaced {} existing {}",
                    previous,
                    links_word(previous)
                )));
            }
            result.add_message(CmdMessage::success(format!(
                "Imported {} {}",
                links.len(),
                links_word(links.len())
            )));
            Ok(result.with_affected_links(index_links(links)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::error::DroplinkError;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn array_replaces_and_warns() {
        let mut store = LinkStore::new(MemBackend::new());
        store.add("old.com", "Old", vec![]).unwrap();

        let result = run(
            &mut store,
            &Settings::default(),
            r#"[{"id":"a","url":"new.com","title":"New"},{"id":"b","url":"https://two.com"}]"#,
        )
        .unwrap();

        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert!(result.messages[0].content.contains("Replaced 1 existing link"));
        let links = store.list().unwrap();
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].url, "https://new.com");
        assert_eq!(links[1].title, "https://two.com");
    }

    #[test]
    fn single_object_is_added_not_imported() {
        let mut store = LinkStore::new(MemBackend::new());
        store.add("old.com", "Old", vec![]).unwrap();

        run(
            &mut store,
            &Settings::default(),
            r#"{"title":"Fresh","url":"fresh.io"}"#,
        )
        .unwrap();

        let links = store.list().unwrap();
        assert_eq!(links.len(), 2);
        assert_eq!(links[1].url, "https://fresh.io");
        assert_eq!(links[1].tags, vec!["Airdrop"]);
    }

    #[test]
    fn bad_text_leaves_collection_untouched() {
        let mut store = LinkStore::new(MemBackend::new());
        store.add("old.com", "Old", vec![]).unwrap();
        let before = store.list().unwrap();

        for text in ["not json", r#"{"a":1}"#, r#"[{"url":"x.com"}]"#] {
            let err = run(&mut store, &Settings::default(), text).unwrap_err();
            assert!(matches!(err, DroplinkError::ImportFormat(_)));
        }
        assert_eq!(store.list().unwrap(), before);
    }
}
