pub mod apikey;
pub mod clipboard;
pub mod config;
pub mod controller;
pub mod error;
pub mod frame;
pub mod helpers;
pub mod output;
pub mod result;

#[path = "history/lib.rs"]
pub mod history;
#[path = "runner/lib.rs"]
pub mod runner;
#[path = "settings/lib.rs"]
pub mod settings;
#[path = "store/lib.rs"]
pub mod store;

pub use clipboard::{Clipboard, MemoryClipboard};
pub use config::ShellConfig;
pub use controller::Controller;
pub use error::{Result, WebUiError};
pub use output::{OutputEntry, OutputLog, Severity};
pub use result::{SettingsOutcome, StartOutcome};
