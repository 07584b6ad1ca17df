use tracing::{debug, warn};

use super::types::Settings;
use crate::error::{Result, WebUiError};
use crate::store::{KeyValueStore, SETTINGS_KEY};

/// Reads the persisted settings record. `Ok(None)` when nothing was saved yet.
pub fn load_settings(store: &dyn KeyValueStore) -> Result<Option<Settings>> {
    let raw = match store.get(SETTINGS_KEY)? {
        Some(raw) => raw,
        None => return Ok(None),
    };
    let settings = serde_json::from_str::<Settings>(&raw).map_err(|source| {
        warn!(key = SETTINGS_KEY, "stored settings are not a valid record");
        WebUiError::Corrupt {
            key: SETTINGS_KEY.to_string(),
            source,
        }
    })?;
    debug!(?settings, "loaded settings");
    Ok(Some(settings))
}

pub fn save_settings(store: &dyn KeyValueStore, settings: &Settings) -> Result<()> {
    let serialized = serde_json::to_string(settings)?;
    store.set(SETTINGS_KEY, &serialized)?;
    debug!("saved settings");
    Ok(())
}
