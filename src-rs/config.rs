use std::path::PathBuf;
use std::time::Duration;

use crate::helpers::{env_opt, env_or, env_u64};

pub const DEFAULT_FRAME_URL: &str = "https://browser-use.com";
pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_TICK_MS: u64 = 2000;

#[derive(Clone, Debug)]
pub struct ShellConfig {
    pub data_dir: PathBuf,
    pub tick_interval: Duration,
    pub frame_url: String,
    pub model: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            tick_interval: Duration::from_millis(DEFAULT_TICK_MS),
            frame_url: DEFAULT_FRAME_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl ShellConfig {
    pub fn from_env() -> Self {
        let data_dir = env_opt("AGENT_WEBUI_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);
        Self {
            data_dir,
            tick_interval: Duration::from_millis(env_u64("AGENT_WEBUI_TICK_MS", DEFAULT_TICK_MS)),
            frame_url: env_or("AGENT_WEBUI_FRAME_URL", DEFAULT_FRAME_URL.to_string()),
            model: env_or("AGENT_WEBUI_MODEL", DEFAULT_MODEL.to_string()),
        }
    }

    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join("local_storage.json")
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("agent-webui")
}
