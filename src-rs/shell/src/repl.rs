use agent_webui_rs::helpers::{parse_on_off, EXAMPLE_TASKS};
use agent_webui_rs::output::LogCursor;
use agent_webui_rs::runner::{RunOption, Tick};
use agent_webui_rs::settings::SettingField;
use agent_webui_rs::{Controller, Result, SettingsOutcome, StartOutcome};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, warn};

use crate::render;

pub struct REPL {
    pub controller: Controller,
    cursor: LogCursor,
}

impl REPL {
    pub fn new(controller: Controller) -> Self {
        Self {
            controller,
            cursor: LogCursor::default(),
        }
    }

    pub async fn run(&mut self, mut ticks: UnboundedReceiver<Tick>) -> Result<()> {
        render::banner(&self.controller);
        self.flush_output();
        render::prompt();

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let line = match line? {
                        Some(line) => line,
                        None => break,
                    };
                    match self.handle_line(line.trim()).await {
                        Ok(true) => break,
                        Ok(false) => {}
                        Err(err) => warn!(error = %err, "command failed"),
                    }
                    self.flush_output();
                    render::prompt();
                }
                Some(tick) = ticks.recv() => {
                    if self.controller.on_tick(tick) {
                        println!();
                        self.flush_output();
                        render::prompt();
                    }
                }
            }
        }
        Ok(())
    }

    fn flush_output(&mut self) {
        let batch = self.controller.output().read_new(&mut self.cursor);
        render::new_entries(batch);
    }

    async fn handle_line(&mut self, line: &str) -> Result<bool> {
        if line.is_empty() {
            return Ok(false);
        }
        if !line.starts_with('/') {
            self.controller.set_task_input(line);
            render::info("task set, /run to start");
            return Ok(false);
        }

        let mut parts = line.splitn(2, ' ');
        let cmd = parts.next().unwrap_or("").trim_start_matches('/');
        let rest = parts.next().unwrap_or("").trim();
        debug!(cmd, "command");
        match cmd {
            "exit" | "quit" => return Ok(true),
            "help" => render::help(),
            "task" => {
                if rest.is_empty() {
                    render::info(&format!("task: {}", self.controller.controls().task_input));
                } else {
                    self.controller.set_task_input(rest);
                    render::info("task set");
                }
            }
            "run" => {
                if !rest.is_empty() {
                    self.controller.set_task_input(rest);
                }
                if let StartOutcome::Started { total_steps, .. } = self.controller.run()? {
                    debug!(total_steps, "run accepted");
                }
            }
            "cancel" => {
                self.controller.cancel();
            }
            "status" => render::status(&self.controller),
            "models" => render::models(&self.controller.controls().model),
            "model" => {
                if rest.is_empty() {
                    render::info(&format!("model: {}", self.controller.controls().model));
                } else {
                    self.controller.select_model(rest);
                    render::info(&format!(
                        "model: {} ({})",
                        rest,
                        self.controller.controls().provider_note
                    ));
                }
            }
            "key" => {
                self.controller.set_api_key_input(rest);
                render::info("api key field updated, /savekey to store it");
            }
            "savekey" => self.controller.save_api_key()?,
            "option" => self.handle_option(rest),
            "settings" => self.handle_settings(rest)?,
            "set" => self.handle_set(rest),
            "history" => render::history(&self.controller.history_rows()),
            "pick" => self.handle_pick(rest),
            "examples" => self.handle_examples(rest),
            "output" => render::all_entries(self.controller.output().entries()),
            "copy" => self.controller.copy_output().await,
            "clear" => self.controller.clear_output(),
            "frame" => render::frame(&self.controller.controls().frame),
            "refresh" => {
                if !self.controller.refresh_frame() {
                    render::info("nothing to refresh");
                }
                render::frame(&self.controller.controls().frame);
            }
            "fullscreen" => match self.controller.request_fullscreen() {
                Some(api) => render::info(&format!("fullscreen via {:?} api", api)),
                None => render::info("fullscreen not supported"),
            },
            _ => render::info("unknown command, type /help"),
        }
        Ok(false)
    }

    fn handle_option(&mut self, rest: &str) {
        let mut parts = rest.split_whitespace();
        let option = match parts.next().and_then(RunOption::parse) {
            Some(option) => option,
            None => {
                render::error("usage: /option <headless|security|vision> [on|off]");
                return;
            }
        };
        match parts.next() {
            None => {
                self.controller.toggle_option(option);
            }
            Some(value) => match parse_on_off(value) {
                Some(flag) => self.controller.set_option(option, flag),
                None => {
                    render::error("invalid flag, use on or off");
                    return;
                }
            },
        }
        render::info(&format!("options: {}", self.controller.controls().options.summary()));
    }

    fn handle_settings(&mut self, rest: &str) -> Result<()> {
        match rest {
            "" => render::settings(self.controller.settings(), self.controller.controls()),
            "open" => {
                self.controller.open_settings();
                render::settings(self.controller.settings(), self.controller.controls());
            }
            "close" => {
                self.controller.close_settings();
                render::info("settings closed");
            }
            "save" => {
                if let SettingsOutcome::Rejected(reason) = self.controller.save_settings()? {
                    debug!(reason = %reason, "settings rejected");
                }
            }
            "reset" => self.controller.reset_settings()?,
            _ => render::error("usage: /settings [open|close|save|reset]"),
        }
        Ok(())
    }

    fn handle_set(&mut self, rest: &str) {
        let mut parts = rest.splitn(2, ' ');
        let name = parts.next().unwrap_or("");
        let value = parts.next().unwrap_or("").trim();
        let field = match SettingField::parse(name) {
            Some(field) => field,
            None => {
                let names: Vec<&str> = SettingField::ALL.iter().map(|f| f.name()).collect();
                render::error(&format!("unknown field, expected one of: {}", names.join(", ")));
                return;
            }
        };
        if !self.controller.controls().settings_open {
            self.controller.open_settings();
        }
        match self.controller.edit_setting(field, value) {
            Ok(()) => render::info(&format!("{} = {} (unsaved)", field.name(), value)),
            Err(err) => render::error(&err.to_string()),
        }
    }

    fn handle_pick(&mut self, rest: &str) {
        let rows = self.controller.history_rows();
        let row = rest
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|idx| rows.get(idx));
        match row {
            Some(row) => {
                self.controller.select_history(&row.id);
                render::info(&format!("task: {}", self.controller.controls().task_input));
            }
            None => render::error("usage: /pick <n>, see /history"),
        }
    }

    fn handle_examples(&mut self, rest: &str) {
        if rest.is_empty() {
            render::examples(EXAMPLE_TASKS);
            return;
        }
        let picked = rest
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .map_or(false, |idx| self.controller.use_example(idx));
        if picked {
            render::info(&format!("task: {}", self.controller.controls().task_input));
        } else {
            render::error("usage: /examples [n]");
        }
    }
}
