use serde::{Deserialize, Serialize};

/// Tunable run parameters. Persisted wholesale as one camelCase JSON object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub max_steps: u32,
    pub max_actions_per_step: u32,
    pub viewport_expansion: i32,
    pub enable_memory: bool,
    pub memory_interval: u32,
    pub generate_gif: bool,
    pub save_conversation: bool,
    pub output_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_steps: 25,
            max_actions_per_step: 10,
            viewport_expansion: 500,
            enable_memory: true,
            memory_interval: 10,
            generate_gif: false,
            save_conversation: false,
            output_path: "./output".to_string(),
        }
    }
}
