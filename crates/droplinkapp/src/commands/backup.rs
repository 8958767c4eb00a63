//! # Backup Scheduler
//!
//! A periodic check copies the `links` array to `backupLinks` and stamps
//! `lastBackup` (epoch milliseconds). The host decides how often to call
//! [`run_if_due`]; this module only decides whether a snapshot is due.
//!
//! The snapshot and its timestamp are written in one `set`. There is no restore:
//! recovering means exporting `backupLinks` by hand.

use crate::commands::{links_word, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Settings;
use crate::store::link_store::LinkStore;
use crate::store::{BlobStore, Entries, BACKUP_LINKS_KEY, LAST_BACKUP_KEY, LINKS_KEY};
use serde_json::Value;
use tracing::info;

pub const DAY_MS: i64 = 86_400_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupOutcome {
    Disabled,
    NotDue { next_due_ms: i64 },
    Completed { count: usize },
}

impl BackupOutcome {
    pub fn into_result(self) -> CmdResult {
        let mut result = CmdResult::default();
        let message = match self {
            BackupOutcome::Disabled => {
                CmdMessage::info("Automatic backup is off (set autoBackup or use --force)")
            }
            BackupOutcome::NotDue { next_due_ms } => {
                CmdMessage::info(format!("Backup not due until {}", format_ms(next_due_ms)))
            }
            BackupOutcome::Completed { count } => CmdMessage::success(format!(
                "Backed up {} {}",
                count,
                links_word(count)
            )),
        };
        result.add_message(message);
        result
    }
}

/// Millisecond timestamp of the last snapshot, 0 if none.
pub fn last_backup<B: BlobStore>(backend: &B) -> Result<i64> {
    let found = backend.get(&[LAST_BACKUP_KEY])?;
    Ok(found.get(LAST_BACKUP_KEY).and_then(Value::as_i64).unwrap_or(0))
}

/// Snapshots the collection when enabled (or forced) and strictly more than
/// `backupFrequency` days have passed since the last snapshot.
pub fn run_if_due<B: BlobStore>(
    store: &LinkStore<B>,
    settings: &Settings,
    now_ms: i64,
    force: bool,
) -> Result<BackupOutcome> {
    if !settings.auto_backup && !force {
        return Ok(BackupOutcome::Disabled);
    }

    let backend = store.backend();
    let last = last_backup(backend)?;
    let interval = i64::from(settings.backup_frequency.max(1)) * DAY_MS;
    if !force && now_ms - last <= interval {
        return Ok(BackupOutcome::NotDue {
            next_due_ms: last + interval,
        });
    }

    let links = backend
        .get(&[LINKS_KEY])?
        .remove(LINKS_KEY)
        .unwrap_or_else(|| Value::Array(Vec::new()));
    let count = links.as_array().map(Vec::len).unwrap_or(0);

    let mut entries = Entries::new();
    entries.insert(BACKUP_LINKS_KEY.to_string(), links);
    entries.insert(LAST_BACKUP_KEY.to_string(), Value::from(now_ms));
    backend.set(entries)?;

    info!(count, now_ms, "backup written");
    Ok(BackupOutcome::Completed { count })
}

fn format_ms(ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| ms.to_string())
}
