mod cli;
mod clipboard;
mod render;
mod repl;

use std::sync::Arc;

use agent_webui_rs::runner::TokioScheduler;
use agent_webui_rs::store::{FileStore, KeyValueStore, MemoryStore};
use agent_webui_rs::{Clipboard, Controller, MemoryClipboard};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use clipboard::SystemClipboard;
use repl::REPL;

#[tokio::main]
async fn main() {
    let config = cli::parse_config();
    init_tracing(&config.log_level);
    if let Err(err) = run(config).await {
        render::error(&err.to_string());
        std::process::exit(1);
    }
}

async fn run(config: cli::CLIConfig) -> agent_webui_rs::Result<()> {
    let store: Arc<dyn KeyValueStore> = if config.memory {
        Arc::new(MemoryStore::new())
    } else {
        let path = config.shell.storage_path();
        info!(path = %path.display(), "using file store");
        Arc::new(FileStore::open(path)?)
    };
    let clipboard: Arc<dyn Clipboard> = if config.no_clipboard {
        Arc::new(MemoryClipboard::new())
    } else {
        Arc::new(SystemClipboard)
    };

    let (tx, ticks) = mpsc::unbounded_channel();
    let mut controller = Controller::new(
        config.shell.clone(),
        store,
        clipboard,
        Arc::new(TokioScheduler::new(tx)),
    );
    controller.load()?;

    let mut repl = REPL::new(controller);
    repl.run(ticks).await
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
