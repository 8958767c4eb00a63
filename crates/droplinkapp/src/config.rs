//! # Settings Access
//!
//! Settings live in the blob store under `settings` (see [`crate::store::settings_store`]).
//! This module is the UI-facing layer on top: it reads and writes individual fields
//! by their persisted camelCase name and applies the clamping the store leaves out.
//!
//! ## Available Settings
//!
//! | Key | Default | Rule on `set` |
//! |-----|---------|---------------|
//! | `maxTabsToOpen` | `10` | integer, clamped into `1..=50` |
//! | `defaultTag` | `Airdrop` | trimmed, blank resets to `Airdrop` |
//! | `autoBackup` | `false` | bool |
//! | `backupFrequency` | `7` | integer days, clamped into `1..=30` |
//! | `notificationsEnabled` | `true` | bool |
//! | `confirmBeforeOpening` | `true` | bool |

use crate::model::{Settings, DEFAULT_TAG};

pub const MIN_TABS: u32 = 1;
pub const MAX_TABS: u32 = 50;
pub const MIN_BACKUP_FREQUENCY: u32 = 1;
pub const MAX_BACKUP_FREQUENCY: u32 = 30;

pub const KEYS: [&str; 6] = [
    "maxTabsToOpen",
    "defaultTag",
    "autoBackup",
    "backupFrequency",
    "notificationsEnabled",
    "confirmBeforeOpening",
];

impl Settings {
    /// Current value of `key` rendered as text, or `None` for an unknown key.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "maxTabsToOpen" => self.max_tabs_to_open.to_string(),
            "defaultTag" => self.default_tag.clone(),
            "autoBackup" => self.auto_backup.to_string(),
            "backupFrequency" => self.backup_frequency.to_string(),
            "notificationsEnabled" => self.notifications_enabled.to_string(),
            "confirmBeforeOpening" => self.confirm_before_opening.to_string(),
            _ => return None,
        };
        Some(value)
    }

    /// Parses `value` into the field named `key`, clamping numeric fields.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "maxTabsToOpen" => {
                self.max_tabs_to_open = parse_number(key, value)?.clamp(MIN_TABS, MAX_TABS);
            }
            "defaultTag" => {
                let tag = value.trim();
                self.default_tag = if tag.is_empty() {
                    DEFAULT_TAG.to_string()
                } else {
                    tag.to_string()
                };
            }
            "autoBackup" => self.auto_backup = parse_bool(key, value)?,
            "backupFrequency" => {
                self.backup_frequency = parse_number(key, value)?
                    .clamp(MIN_BACKUP_FREQUENCY, MAX_BACKUP_FREQUENCY);
            }
            "notificationsEnabled" => self.notifications_enabled = parse_bool(key, value)?,
            "confirmBeforeOpening" => self.confirm_before_opening = parse_bool(key, value)?,
            _ => return Err(format!("Unknown setting: {}", key)),
        }
        Ok(())
    }

    /// Every setting as `(key, value)` pairs in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        KEYS.iter()
            .filter_map(|k| self.get(k).map(|v| (*k, v)))
            .collect()
    }
}

// Negative input clamps to the minimum instead of failing.
fn parse_number(key: &str, value: &str) -> Result<u32, String> {
    let n: i64 = value
        .trim()
        .parse()
        .map_err(|_| format!("{} expects a whole number, got '{}'", key, value))?;
    Ok(n.clamp(0, u32::MAX as i64) as u32)
}

fn parse_bool(key: &str, value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(format!("{} expects true or false, got '{}'", key, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_known_and_unknown_keys() {
        let settings = Settings::default();
        assert_eq!(settings.get("maxTabsToOpen").as_deref(), Some("10"));
        assert_eq!(settings.get("defaultTag").as_deref(), Some("Airdrop"));
        assert_eq!(settings.get("nope"), None);
    }

    #[test]
    fn max_tabs_is_clamped() {
        let mut settings = Settings::default();
        settings.set("maxTabsToOpen", "0").unwrap();
        assert_eq!(settings.max_tabs_to_open, 1);
        settings.set("maxTabsToOpen", "500").unwrap();
        assert_eq!(settings.max_tabs_to_open, 50);
        settings.set("maxTabsToOpen", "-4").unwrap();
        assert_eq!(settings.max_tabs_to_open, 1);
        settings.set("maxTabsToOpen", "12").unwrap();
        assert_eq!(settings.max_tabs_to_open, 12);
    }

    #[test]
    fn backup_frequency_is_clamped_to_a_month() {
        let mut settings = Settings::default();
        settings.set("backupFrequency", "0").unwrap();
        assert_eq!(settings.backup_frequency, 1);
        settings.set("backupFrequency", "90").unwrap();
        assert_eq!(settings.backup_frequency, 30);
        settings.set("backupFrequency", "14").unwrap();
        assert_eq!(settings.backup_frequency, 14);
    }

    #[test]
    fn bools_accept_common_spellings() {
        let mut settings = Settings::default();
        settings.set("autoBackup", "yes").unwrap();
        assert!(settings.auto_backup);
        settings.set("notificationsEnabled", "OFF").unwrap();
        assert!(!settings.notifications_enabled);
        assert!(settings.set("confirmBeforeOpening", "maybe").is_err());
    }

    #[test]
    fn blank_default_tag_resets() {
        let mut settings = Settings::default();
        settings.set("defaultTag", "  Testnet ").unwrap();
        assert_eq!(settings.default_tag, "Testnet");
        settings.set("defaultTag", " ").unwrap();
        assert_eq!(settings.default_tag, "Airdrop");
    }

    #[test]
    fn unknown_key_and_bad_number_fail() {
        let mut settings = Settings::default();
        assert!(settings.set("theme", "dark").is_err());
        assert!(settings.set("maxTabsToOpen", "many").is_err());
    }

    #[test]
    fn entries_cover_every_key() {
        let entries = Settings::default().entries();
        assert_eq!(entries.len(), KEYS.len());
        assert_eq!(entries[0], ("maxTabsToOpen", "10".to_string()));
    }
}
