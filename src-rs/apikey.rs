use tracing::debug;

use crate::error::Result;
use crate::store::{KeyValueStore, API_KEY_KEY};

/// The stored key, stored verbatim. An empty string is a valid stored value.
pub fn load_api_key(store: &dyn KeyValueStore) -> Result<Option<String>> {
    store.get(API_KEY_KEY)
}

pub fn save_api_key(store: &dyn KeyValueStore, key: &str) -> Result<()> {
    store.set(API_KEY_KEY, key)?;
    debug!(empty = key.is_empty(), "saved api key");
    Ok(())
}
