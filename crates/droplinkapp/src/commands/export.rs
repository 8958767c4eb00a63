use crate::commands::{links_word, CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::link_store::LinkStore;
use crate::store::BlobStore;
use crate::transfer::export_filename;
use chrono::NaiveDate;

/// Serializes the collection. The text lands in `result.export`; the suggested
/// file name is the first message.
pub fn run<B: BlobStore>(store: &LinkStore<B>, today: NaiveDate) -> Result<CmdResult> {
    let count = store.list()?.len();
    let text = store.export()?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(export_filename(today)));
    result.add_message(CmdMessage::success(format!(
        "Exported {} {}",
        count,
        links_word(count)
    )));
    result.export = Some(text);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn export_carries_text_and_filename() {
        let mut store = LinkStore::new(MemBackend::new());
        store.add("a.com", "A", vec![]).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();

        let result = run(&store, today).unwrap();
        assert_eq!(result.messages[0].content, "airdrop-links-2024-05-06.json");
        let text = result.export.unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 1);
    }

    #[test]
    fn empty_collection_exports_empty_array() {
        let store = LinkStore::new(MemBackend::new());
        let today = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
        assert_eq!(run(&store, today).unwrap().export.as_deref(), Some("[]"));
    }
}
