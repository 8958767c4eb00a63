use super::{diff_changes, BlobStore, ChangeListener, Entries, Listeners};
use crate::error::{DroplinkError, Result};
use std::cell::RefCell;
use tracing::debug;

/// In-memory blob store.
///
/// Uses `RefCell` for interior mutability since droplink is single-threaded.
/// This keeps the `BlobStore` trait on `&self`, the same shape as the host's
/// asynchronous `get`/`set` pair.
#[derive(Default)]
pub struct MemBackend {
    values: RefCell<Entries>,
    listeners: Listeners,
    simulate_write_error: RefCell<bool>,
    simulate_unavailable: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Make every read and write fail as if the host store were gone.
    pub fn set_simulate_unavailable(&self, simulate: bool) {
        *self.simulate_unavailable.borrow_mut() = simulate;
    }

    /// Snapshot of everything stored, for assertions.
    pub fn snapshot(&self) -> Entries {
        self.values.borrow().clone()
    }

    fn check_available(&self) -> Result<()> {
        if *self.simulate_unavailable.borrow() {
            return Err(DroplinkError::StorageUnavailable(
                "Simulated storage outage".to_string(),
            ));
        }
        Ok(())
    }
}

impl BlobStore for MemBackend {
    fn get(&self, keys: &[&str]) -> Result<Entries> {
        self.check_available()?;
        let values = self.values.borrow();
        Ok(keys
            .iter()
            .filter_map(|k| values.get(*k).map(|v| (k.to_string(), v.clone())))
            .collect())
    }

    fn set(&self, entries: Entries) -> Result<()> {
        self.check_available()?;
        if *self.simulate_write_error.borrow() {
            return Err(DroplinkError::StorageUnavailable(
                "Simulated write error".to_string(),
            ));
        }

        let changes = {
            let mut values = self.values.borrow_mut();
            let changes = diff_changes(&values, &entries);
            values.extend(entries);
            changes
        };
        debug!(keys = changes.len(), "memory store updated");

        // Borrow released before notifying so listeners may read the store.
        self.listeners.notify(&changes);
        Ok(())
    }

    fn subscribe(&self, listener: ChangeListener) -> bool {
        self.listeners.push(listener);
        true
    }
}
