use super::{diff_changes, BlobStore, ChangeListener, Entries, Listeners};
use crate::error::{DroplinkError, Result};
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

/// Directory-backed blob store: each key lives in `<root>/<key>.json`.
pub struct FsBackend {
    root: PathBuf,
    listeners: Listeners,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            listeners: Listeners::default(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `key`.
    pub fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    fn ensure_root(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(|e| {
                DroplinkError::StorageUnavailable(format!(
                    "cannot create {}: {}",
                    self.root.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    fn read_key(&self, key: &str) -> Result<Option<Value>> {
        let path = self.key_path(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DroplinkError::Io(e)),
        }
    }

    fn write_key(&self, key: &str, value: &Value) -> Result<()> {
        let content = serde_json::to_string_pretty(value)?;

        // Atomic write: temp file then rename over the target
        let tmp_file = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        fs::write(&tmp_file, content)?;
        fs::rename(&tmp_file, self.key_path(key))?;
        Ok(())
    }
}

impl BlobStore for FsBackend {
    fn get(&self, keys: &[&str]) -> Result<Entries> {
        let mut found = Entries::new();
        for key in keys {
            if let Some(value) = self.read_key(key)? {
                found.insert(key.to_string(), value);
            }
        }
        debug!(root = %self.root.display(), requested = keys.len(), found = found.len(), "read keys");
        Ok(found)
    }

    fn set(&self, entries: Entries) -> Result<()> {
        self.ensure_root()?;

        let has_listeners = !self.listeners.is_empty();
        let previous = if has_listeners {
            let keys: Vec<&str> = entries.keys().map(String::as_str).collect();
            self.get(&keys)?
        } else {
            Entries::new()
        };

        for (key, value) in &entries {
            self.write_key(key, value)?;
        }
        debug!(root = %self.root.display(), keys = entries.len(), "wrote keys");

        if has_listeners {
            let changes = diff_changes(&previous, &entries);
            self.listeners.notify(&changes);
        }
        Ok(())
    }

    fn subscribe(&self, listener: ChangeListener) -> bool {
        self.listeners.push(listener);
        true
    }
}
