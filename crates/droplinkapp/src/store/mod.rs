//! # Storage Layer
//!
//! Droplink persists everything through an opaque key/value [`BlobStore`] supplied
//! by the host: browser extension local storage, a page's persistent storage, or
//! a directory on disk for the CLI. Values are JSON documents.
//!
//! ## Layout
//!
//! | Key | Value |
//! |-----|-------|
//! | `links` | JSON array of [`Link`](crate::model::Link) |
//! | `settings` | JSON object, see [`Settings`](crate::model::Settings) |
//! | `backupLinks` | Snapshot of `links` written by the backup scheduler |
//! | `lastBackup` | Epoch milliseconds of the last snapshot |
//!
//! ## Whole-Blob Writes
//!
//! The link collection is one value. [`LinkStore`](link_store::LinkStore) reads the
//! full array, computes the new array and writes it back in a single `set`. There is
//! no row-level update at this layer.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: one `<key>.json` file per key, atomic writes.
//! - [`mem_backend::MemBackend`]: in-memory, for tests and embedding.

use crate::error::Result;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

pub mod fs_backend;
pub mod link_store;
pub mod mem_backend;
pub mod settings_store;

pub const LINKS_KEY: &str = "links";
pub const SETTINGS_KEY: &str = "settings";
pub const BACKUP_LINKS_KEY: &str = "backupLinks";
pub const LAST_BACKUP_KEY: &str = "lastBackup";

/// Key/value pairs read from or written to a [`BlobStore`].
pub type Entries = BTreeMap<String, Value>;

/// One key's transition, delivered to change listeners after a successful `set`.
#[derive(Debug, Clone, PartialEq)]
pub struct StorageChange {
    pub key: String,
    pub old_value: Option<Value>,
    pub new_value: Value,
}

pub type ChangeListener = Box<dyn Fn(&[StorageChange])>;

/// Registered change listeners of one backend.
#[derive(Default)]
pub(crate) struct Listeners(RefCell<Vec<Rc<dyn Fn(&[StorageChange])>>>);

impl Listeners {
    pub(crate) fn push(&self, listener: ChangeListener) {
        self.0.borrow_mut().push(Rc::from(listener));
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Calls the listeners registered before this call, in order. The list is
    /// not borrowed while they run, so a listener may subscribe or write.
    pub(crate) fn notify(&self, changes: &[StorageChange]) {
        let current: Vec<_> = self.0.borrow().clone();
        for listener in current {
            listener(changes);
        }
    }
}

/// Abstract interface for the host key/value store.
pub trait BlobStore {
    /// Fetch the given keys. Keys with no stored value are absent from the result.
    fn get(&self, keys: &[&str]) -> Result<Entries>;

    /// Store every entry, overwriting prior values.
    fn set(&self, entries: Entries) -> Result<()>;

    /// Register a change listener. Returns false if the backend cannot notify.
    fn subscribe(&self, _listener: ChangeListener) -> bool {
        false
    }
}

impl<B: BlobStore + ?Sized> BlobStore for &B {
    fn get(&self, keys: &[&str]) -> Result<Entries> {
        (**self).get(keys)
    }

    fn set(&self, entries: Entries) -> Result<()> {
        (**self).set(entries)
    }

    fn subscribe(&self, listener: ChangeListener) -> bool {
        (**self).subscribe(listener)
    }
}

impl<B: BlobStore + ?Sized> BlobStore for Rc<B> {
    fn get(&self, keys: &[&str]) -> Result<Entries> {
        (**self).get(keys)
    }

    fn set(&self, entries: Entries) -> Result<()> {
        (**self).set(entries)
    }

    fn subscribe(&self, listener: ChangeListener) -> bool {
        (**self).subscribe(listener)
    }
}

/// Computes the change records for `entries` against the values they replace.
pub(crate) fn diff_changes(previous: &Entries, entries: &Entries) -> Vec<StorageChange> {
    entries
        .iter()
        .map(|(key, value)| StorageChange {
            key: key.clone(),
            old_value: previous.get(key).cloned(),
            new_value: value.clone(),
        })
        .collect()
}
