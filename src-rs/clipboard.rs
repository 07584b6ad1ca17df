use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{Result, WebUiError};

#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<()>;
}

/// Process-local clipboard. Used for headless sessions and tests; can be
/// built to refuse every write.
#[derive(Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
    refusal: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refusing(reason: &str) -> Self {
        Self {
            contents: Mutex::new(None),
            refusal: Some(reason.to_string()),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok()?.clone()
    }
}

#[async_trait]
impl Clipboard for MemoryClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        if let Some(reason) = &self.refusal {
            return Err(WebUiError::Clipboard(reason.clone()));
        }
        let mut slot = self.contents.lock().map_err(|_| WebUiError::Lock)?;
        *slot = Some(text.to_string());
        Ok(())
    }
}
