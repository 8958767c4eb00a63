use super::{BlobStore, Entries, SETTINGS_KEY};
use crate::error::Result;
use crate::model::Settings;
use serde_json::Value;
use tracing::debug;

/// Loads and saves the singleton [`Settings`] record.
///
/// The store does not validate. Clamping happens in [`crate::config`] before a
/// record reaches [`SettingsStore::save`].
pub struct SettingsStore<B: BlobStore> {
    backend: B,
}

impl<B: BlobStore> SettingsStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Persisted settings, or the defaults when nothing is stored yet.
    pub fn load(&self) -> Result<Settings> {
        let mut found = self.backend.get(&[SETTINGS_KEY])?;
        match found.remove(SETTINGS_KEY) {
            None | Some(Value::Null) => Ok(Settings::default()),
            Some(value) => Ok(serde_json::from_value(value)?),
        }
    }

    /// Overwrites the stored record wholesale.
    pub fn save(&self, settings: &Settings) -> Result<()> {
        let mut entries = Entries::new();
        entries.insert(SETTINGS_KEY.to_string(), serde_json::to_value(settings)?);
        self.backend.set(entries)?;
        debug!("settings saved");
        Ok(())
    }

    /// Writes the defaults if no record exists. Returns true when it wrote.
    pub fn ensure_initialized(&self) -> Result<bool> {
        if self.backend.get(&[SETTINGS_KEY])?.contains_key(SETTINGS_KEY) {
            return Ok(false);
        }
        self.save(&Settings::default())?;
        Ok(true)
    }
}
