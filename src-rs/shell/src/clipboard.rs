use agent_webui_rs::{Clipboard, Result, WebUiError};
use async_trait::async_trait;

/// The desktop clipboard. `arboard` blocks, so writes run on the blocking pool.
pub struct SystemClipboard;

#[async_trait]
impl Clipboard for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        let text = text.to_string();
        tokio::task::spawn_blocking(move || {
            let mut clipboard =
                arboard::Clipboard::new().map_err(|err| WebUiError::Clipboard(err.to_string()))?;
            clipboard
                .set_text(text)
                .map_err(|err| WebUiError::Clipboard(err.to_string()))
        })
        .await
        .map_err(|err| WebUiError::Clipboard(err.to_string()))?
    }
}
