use std::io::{self, Write};

use agent_webui_rs::controller::Controls;
use agent_webui_rs::frame::BrowserFrame;
use agent_webui_rs::helpers::MODELS;
use agent_webui_rs::history::HistoryRow;
use agent_webui_rs::output::NewEntries;
use agent_webui_rs::settings::{SettingField, Settings};
use agent_webui_rs::{Controller, OutputEntry, Severity};

pub fn banner(controller: &Controller) {
    let controls = controller.controls();
    println!("Browser-Use Web UI (terminal)");
    println!("Model: {}  ({})", controls.model, controls.provider_note);
    if controls.api_key_input.is_empty() {
        println!("No API key saved. Use /key <value> then /savekey.");
    }
    println!("Type a task, then /run. Type /help for commands.");
}

pub fn prompt() {
    print!("> ");
    let _ = io::stdout().flush();
}

pub fn help() {
    println!("Commands:");
    println!("  /help                        Show commands");
    println!("  /exit | /quit                Exit");
    println!("  <text> | /task <text>        Set the task");
    println!("  /run [text]                  Run the task (Ctrl+Enter)");
    println!("  /cancel                      Stop the running task");
    println!("  /status                      Show run state and controls");
    println!("  /models                      List models");
    println!("  /model [name]                Show or select the model");
    println!("  /key <value>                 Fill the API key field");
    println!("  /savekey                     Save the API key");
    println!("  /option <name> [on|off]      headless, security, vision");
    println!("  /settings [open|close|save|reset]");
    println!("  /set <field> <value>         Edit a settings field");
    println!("  /history                     List recent tasks");
    println!("  /pick <n>                    Load history entry n");
    println!("  /examples [n]                List or load an example task");
    println!("  /output                      Reprint the output panel");
    println!("  /copy                        Copy output to clipboard");
    println!("  /clear                       Clear output");
    println!("  /frame | /refresh | /fullscreen");
}

pub fn entry(entry: &OutputEntry) {
    let tag = match entry.severity {
        Severity::Info => "info",
        Severity::Success => " ok ",
        Severity::Warning => "warn",
        Severity::Error => "fail",
    };
    match &entry.action {
        Some(action) => println!("[{}] {} {}  ({})", entry.time, tag, entry.message, action),
        None => println!("[{}] {} {}", entry.time, tag, entry.message),
    }
}

pub fn new_entries(batch: NewEntries<'_>) {
    if batch.restarted {
        println!("---");
    }
    for item in batch.entries {
        entry(item);
    }
}

pub fn all_entries(entries: &[OutputEntry]) {
    if entries.is_empty() {
        println!("no output");
        return;
    }
    for item in entries {
        entry(item);
    }
}

pub fn history(rows: &[HistoryRow]) {
    if rows.is_empty() {
        println!("no history");
        return;
    }
    for (idx, row) in rows.iter().enumerate() {
        let marker = if row.active { "*" } else { " " };
        println!("{}{:>2}. {}", marker, idx + 1, row.label);
    }
}

pub fn examples(tasks: &[&str]) {
    for (idx, task) in tasks.iter().enumerate() {
        println!(" {:>2}. {}", idx + 1, task);
    }
}

pub fn models(current: &str) {
    for model in MODELS {
        let marker = if *model == current { "*" } else { " " };
        println!("{} {}", marker, model);
    }
}

pub fn settings(saved: &Settings, controls: &Controls) {
    let form = &controls.settings_form;
    println!(
        "settings ({}):",
        if controls.settings_open { "panel open" } else { "panel closed" }
    );
    let rows = [
        (SettingField::MaxSteps, form.max_steps.clone(), saved.max_steps.to_string()),
        (
            SettingField::MaxActions,
            form.max_actions.clone(),
            saved.max_actions_per_step.to_string(),
        ),
        (
            SettingField::ViewportExpansion,
            form.viewport_expansion.clone(),
            saved.viewport_expansion.to_string(),
        ),
        (
            SettingField::EnableMemory,
            on_off(form.enable_memory).to_string(),
            on_off(saved.enable_memory).to_string(),
        ),
        (
            SettingField::MemoryInterval,
            form.memory_interval.clone(),
            saved.memory_interval.to_string(),
        ),
        (
            SettingField::GenerateGif,
            on_off(form.generate_gif).to_string(),
            on_off(saved.generate_gif).to_string(),
        ),
        (
            SettingField::SaveConversation,
            on_off(form.save_conversation).to_string(),
            on_off(saved.save_conversation).to_string(),
        ),
        (SettingField::OutputPath, form.output_path.clone(), saved.output_path.clone()),
    ];
    for (field, edited, stored) in rows {
        if edited == stored {
            println!("  {:<20} {}", field.name(), edited);
        } else {
            println!("  {:<20} {} (saved: {})", field.name(), edited, stored);
        }
    }
}

pub fn status(controller: &Controller) {
    let controls = controller.controls();
    let run = controller.run_control();
    println!("status:");
    match controller.progress() {
        Some((done, total)) => println!("  run: running, {}/{} steps", done, total),
        None => println!("  run: idle"),
    }
    println!("  button: {}{}", run.label, if run.disabled { " (disabled)" } else { "" });
    println!("  model: {}  ({})", controls.model, controls.provider_note);
    println!(
        "  api key: {}",
        if controls.api_key_input.is_empty() { "empty" } else { "set" }
    );
    println!("  task: {}", controls.task_input);
    println!("  options: {}", controls.options.summary());
}

pub fn frame(frame: &BrowserFrame) {
    if !frame.is_visible() {
        println!("browser: placeholder");
        return;
    }
    println!(
        "browser: {} (loads: {}, fullscreen: {})",
        frame.src().unwrap_or("about:blank"),
        frame.loads(),
        frame
            .fullscreen()
            .map(|api| format!("{:?}", api))
            .unwrap_or_else(|| "off".to_string())
    );
}

pub fn info(msg: &str) {
    println!("{}", msg);
}

pub fn error(msg: &str) {
    eprintln!("error: {}", msg);
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}
