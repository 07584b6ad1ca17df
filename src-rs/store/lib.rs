pub mod file;
pub mod kv;

pub use file::FileStore;
pub use kv::{KeyValueStore, MemoryStore};

pub const SETTINGS_KEY: &str = "browserUseSettings";
pub const HISTORY_KEY: &str = "browserUseHistory";
pub const API_KEY_KEY: &str = "browserUseApiKey";
