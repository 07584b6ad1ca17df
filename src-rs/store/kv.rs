use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{Result, WebUiError};

/// String-keyed, string-valued persistence the controller writes through.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

#[derive(Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let map = self.values.read().map_err(|_| WebUiError::Lock)?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.values.write().map_err(|_| WebUiError::Lock)?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
