use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DroplinkError, Result};
use crate::store::settings_store::SettingsStore;
use crate::store::BlobStore;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run<B: BlobStore>(store: &SettingsStore<B>, action: ConfigAction) -> Result<CmdResult> {
    let mut settings = store.load()?;
    match action {
        ConfigAction::ShowAll => Ok(CmdResult::default().with_settings(settings)),
        ConfigAction::ShowKey(key) => match settings.get(&key) {
            Some(value) => {
                let mut result = CmdResult::default();
                result.add_message(CmdMessage::info(value));
                Ok(result)
            }
            None => Err(DroplinkError::Api(format!("Unknown setting: {}", key))),
        },
        ConfigAction::Set(key, value) => {
            settings.set(&key, &value).map_err(DroplinkError::Api)?;
            store.save(&settings)?;
            let shown = settings.get(&key).unwrap_or(value);
            let mut result = CmdResult::default().with_settings(settings);
            result.add_message(CmdMessage::success(format!("{} set to {}", key, shown)));
            Ok(result)
        }
    }
}
