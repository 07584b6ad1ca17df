use std::path::PathBuf;
use std::time::Duration;

use agent_webui_rs::ShellConfig;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "agent-webui", about = "Terminal front end for the agent web UI shell")]
struct Args {
    /// Directory holding local_storage.json.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Milliseconds between simulated steps.
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Model selected at startup.
    #[arg(long)]
    model: Option<String>,

    /// Keep everything in memory; nothing is written to disk.
    #[arg(long)]
    memory: bool,

    /// Copy output into an in-process buffer instead of the system clipboard.
    #[arg(long)]
    no_clipboard: bool,

    /// Log level used when RUST_LOG is unset.
    #[arg(long, env = "AGENT_WEBUI_LOG", default_value = "warn")]
    log_level: String,
}

#[derive(Clone, Debug)]
pub struct CLIConfig {
    pub shell: ShellConfig,
    pub memory: bool,
    pub no_clipboard: bool,
    pub log_level: String,
}

pub fn parse_config() -> CLIConfig {
    let args = Args::parse();
    let mut shell = ShellConfig::from_env();
    if let Some(dir) = args.data_dir {
        shell.data_dir = dir;
    }
    if let Some(ms) = args.tick_ms {
        shell.tick_interval = Duration::from_millis(ms);
    }
    if let Some(model) = args.model {
        shell.model = model;
    }
    CLIConfig {
        shell,
        memory: args.memory,
        no_clipboard: args.no_clipboard,
        log_level: args.log_level,
    }
}
