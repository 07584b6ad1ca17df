use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::apikey::{load_api_key, save_api_key};
use crate::clipboard::Clipboard;
use crate::config::ShellConfig;
use crate::error::{Result, WebUiError};
use crate::frame::{BrowserFrame, FullscreenApi};
use crate::helpers::{provider_note, EXAMPLE_TASKS};
use crate::history::{HistoryRow, TaskHistory};
use crate::output::{OutputLog, Severity};
use crate::result::{SettingsOutcome, StartOutcome};
use crate::runner::{
    ActiveRun, RunControl, RunId, RunOption, RunOptions, RunPhase, RunState, Scheduler, StepEvent,
    StepPlan, Tick,
};
use crate::settings::{load_settings, save_settings, FormError, SettingField, Settings, SettingsForm};
use crate::store::KeyValueStore;

#[derive(Default)]
pub struct AppState {
    pub run: RunState,
    pub settings: Settings,
    pub history: TaskHistory,
}

#[derive(Clone, Debug)]
pub struct Controls {
    pub model: String,
    pub provider_note: String,
    pub api_key_input: String,
    pub task_input: String,
    pub settings_form: SettingsForm,
    pub settings_open: bool,
    pub options: RunOptions,
    pub frame: BrowserFrame,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Enter,
    Char(char),
    Other,
}

/// A key pressed while the task input has focus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub ctrl: bool,
}

impl KeyPress {
    pub fn ctrl_enter() -> Self {
        Self {
            key: Key::Enter,
            ctrl: true,
        }
    }
}

pub struct Controller {
    config: ShellConfig,
    state: AppState,
    controls: Controls,
    output: OutputLog,
    store: Arc<dyn KeyValueStore>,
    clipboard: Arc<dyn Clipboard>,
    scheduler: Arc<dyn Scheduler>,
    rng: StdRng,
    last_run: RunId,
}

impl Controller {
    pub fn new(
        config: ShellConfig,
        store: Arc<dyn KeyValueStore>,
        clipboard: Arc<dyn Clipboard>,
        scheduler: Arc<dyn Scheduler>,
    ) -> Self {
        let settings = Settings::default();
        let controls = Controls {
            model: config.model.clone(),
            provider_note: provider_note(&config.model).unwrap_or_default().to_string(),
            api_key_input: String::new(),
            task_input: String::new(),
            settings_form: SettingsForm::from_settings(&settings),
            settings_open: false,
            options: RunOptions::default(),
            frame: BrowserFrame::default(),
        };
        Self {
            config,
            state: AppState {
                settings,
                ..AppState::default()
            },
            controls,
            output: OutputLog::new(),
            store,
            clipboard,
            scheduler,
            rng: StdRng::from_entropy(),
            last_run: 0,
        }
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Unparseable stored values are reported and their state keeps defaults.
    pub fn load(&mut self) -> Result<()> {
        if let Some(key) = load_api_key(self.store.as_ref())? {
            self.controls.api_key_input = key;
        }

        match load_settings(self.store.as_ref()) {
            Ok(Some(settings)) => {
                self.controls.settings_form = SettingsForm::from_settings(&settings);
                self.state.settings = settings;
            }
            Ok(None) => {}
            Err(err @ WebUiError::Corrupt { .. }) => {
                warn!(error = %err, "keeping default settings");
                self.output.error(format!("Could not read saved settings: {}", err));
            }
            Err(err) => return Err(err),
        }

        match self.state.history.load(self.store.as_ref()) {
            Ok(()) => {}
            Err(err @ WebUiError::Corrupt { .. }) => {
                warn!(error = %err, "starting with empty history");
                self.output.error(format!("Could not read task history: {}", err));
            }
            Err(err) => return Err(err),
        }

        debug!(history = self.state.history.len(), "controller state loaded");
        Ok(())
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn output(&self) -> &OutputLog {
        &self.output
    }

    pub fn settings(&self) -> &Settings {
        &self.state.settings
    }

    pub fn is_running(&self) -> bool {
        self.state.run.is_running()
    }

    pub fn current_task_id(&self) -> Option<&str> {
        self.state.run.current_task_id.as_deref()
    }

    pub fn run_control(&self) -> RunControl {
        RunControl::for_state(&self.state.run)
    }

    pub fn history_rows(&self) -> Vec<HistoryRow> {
        self.state.history.rows(self.current_task_id())
    }

    pub fn progress(&self) -> Option<(u32, u32)> {
        self.state
            .run
            .active()
            .map(|run| (run.plan.step() - 1, run.plan.total()))
    }

    pub fn select_model(&mut self, model: &str) {
        self.controls.model = model.to_string();
        if let Some(note) = provider_note(model) {
            self.controls.provider_note = note.to_string();
        }
    }

    pub fn set_api_key_input(&mut self, value: &str) {
        self.controls.api_key_input = value.to_string();
    }

    pub fn save_api_key(&mut self) -> Result<()> {
        let saved = save_api_key(self.store.as_ref(), &self.controls.api_key_input);
        self.report_store_failure("API key", saved)?;
        self.output.success("API key saved successfully");
        Ok(())
    }

    pub fn open_settings(&mut self) {
        self.controls.settings_open = true;
    }

    pub fn close_settings(&mut self) {
        self.controls.settings_open = false;
    }

    pub fn edit_setting(&mut self, field: SettingField, value: &str) -> std::result::Result<(), FormError> {
        self.controls.settings_form.set(field, value)
    }

    /// Invalid input is reported and leaves stored and in-memory settings alone.
    pub fn save_settings(&mut self) -> Result<SettingsOutcome> {
        let settings = match self.controls.settings_form.to_settings() {
            Ok(settings) => settings,
            Err(err) => {
                let reason = err.to_string();
                self.output.error(format!("Invalid settings: {}", reason));
                return Ok(SettingsOutcome::Rejected(reason));
            }
        };
        let saved = save_settings(self.store.as_ref(), &settings);
        self.report_store_failure("settings", saved)?;
        self.state.settings = settings;
        self.controls.settings_open = false;
        self.output.success("Settings saved successfully");
        Ok(SettingsOutcome::Saved)
    }

    pub fn reset_settings(&mut self) -> Result<()> {
        let defaults = Settings::default();
        let saved = save_settings(self.store.as_ref(), &defaults);
        self.report_store_failure("settings", saved)?;
        self.controls.settings_form = SettingsForm::from_settings(&defaults);
        self.state.settings = defaults;
        self.output.info("Settings reset to defaults");
        Ok(())
    }

    pub fn set_task_input(&mut self, text: &str) {
        self.controls.task_input = text.to_string();
    }

    pub fn use_example(&mut self, idx: usize) -> bool {
        match EXAMPLE_TASKS.get(idx) {
            Some(task) => {
                self.controls.task_input = task.to_string();
                true
            }
            None => false,
        }
    }

    pub fn set_option(&mut self, option: RunOption, value: bool) {
        self.controls.options.set(option, value);
    }

    pub fn toggle_option(&mut self, option: RunOption) -> bool {
        let value = !self.controls.options.get(option);
        self.controls.options.set(option, value);
        value
    }

    pub fn select_history(&mut self, id: &str) -> bool {
        let task = match self.state.history.get(id) {
            Some(entry) => entry.task.clone(),
            None => return false,
        };
        self.controls.task_input = task;
        self.state.run.current_task_id = Some(id.to_string());
        true
    }

    /// Ctrl+Enter in the task input runs the task.
    pub fn on_task_key(&mut self, press: KeyPress) -> Result<Option<StartOutcome>> {
        if press.key == Key::Enter && press.ctrl {
            return self.run().map(Some);
        }
        Ok(None)
    }

    pub fn run(&mut self) -> Result<StartOutcome> {
        let task = self.controls.task_input.clone();
        let api_key = self.controls.api_key_input.clone();
        self.start(&task, &api_key)
    }

    pub fn start(&mut self, task: &str, api_key: &str) -> Result<StartOutcome> {
        if self.state.run.is_running() {
            self.output.warning("A task is already running");
            return Ok(StartOutcome::AlreadyRunning);
        }

        let task = task.trim();
        if task.is_empty() {
            self.output.error("Please enter a task");
            return Ok(StartOutcome::MissingTask);
        }
        if api_key.trim().is_empty() {
            self.output.error("Please enter an API key");
            return Ok(StartOutcome::MissingApiKey);
        }

        let added = self.state.history.add(self.store.as_ref(), task);
        let task_id = self.report_store_failure("task history", added)?;
        self.output.reset();
        self.state.run.current_task_id = Some(task_id.clone());

        self.controls.frame.show();
        self.output.info("Starting browser-use agent...");
        self.output.info(format!("Task: {}", task));

        let total_steps = self.simulate_run(task_id.clone());
        Ok(StartOutcome::Started {
            task_id,
            total_steps,
        })
    }

    fn report_store_failure<T>(&mut self, what: &str, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            warn!(error = %err, what, "store write failed");
            self.output.error(format!("Failed to save {}: {}", what, err));
        }
        result
    }

    fn simulate_run(&mut self, task_id: String) -> u32 {
        self.output.info(format!(
            "Using model: {}. Browser options: {}",
            self.controls.model,
            self.controls.options.summary()
        ));
        self.controls.frame.navigate(&self.config.frame_url);

        let plan = StepPlan::random(&mut self.rng);
        let total = plan.total();
        self.last_run += 1;
        let id = self.last_run;
        let ticker = self.scheduler.every(id, self.config.tick_interval);
        info!(run = id, task_id = %task_id, total, "run started");

        self.state.run.phase = RunPhase::Running(ActiveRun {
            id,
            task_id,
            plan,
            ticker,
        });
        total
    }

    /// Ticks for any run but the active one are ignored.
    pub fn on_tick(&mut self, tick: Tick) -> bool {
        let run = match &mut self.state.run.phase {
            RunPhase::Running(run) if run.id == tick.run => run,
            _ => {
                debug!(run = tick.run, "ignoring stale tick");
                return false;
            }
        };

        let event = run.plan.advance(&mut self.rng);
        match &event {
            StepEvent::Step { .. } => {
                self.output.append(event.message(), Severity::Info, event.action());
            }
            StepEvent::Finished => {
                self.output.success(event.message());
                if let Some(run) = self.finish_run() {
                    info!(run = run.id, task_id = %run.task_id, "run completed");
                }
            }
        }
        true
    }

    pub fn cancel(&mut self) -> bool {
        match self.finish_run() {
            Some(run) => {
                info!(run = run.id, task_id = %run.task_id, "run cancelled");
                self.output.warning("Task cancelled");
                true
            }
            None => {
                self.output.info("No task is running");
                false
            }
        }
    }

    fn finish_run(&mut self) -> Option<ActiveRun> {
        match std::mem::replace(&mut self.state.run.phase, RunPhase::Idle) {
            RunPhase::Running(mut run) => {
                run.ticker.cancel();
                Some(run)
            }
            RunPhase::Idle => None,
        }
    }

    pub fn clear_output(&mut self) {
        self.output.clear();
    }

    pub async fn copy_output(&mut self) {
        let clipboard = self.clipboard.clone();
        self.output.copy(clipboard.as_ref()).await;
    }

    pub fn refresh_frame(&mut self) -> bool {
        self.controls.frame.refresh()
    }

    pub fn request_fullscreen(&mut self) -> Option<FullscreenApi> {
        self.controls.frame.request_fullscreen()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::runner::scheduler::manual::ManualScheduler;
    use crate::runner::ACTIONS;
    use crate::store::{MemoryStore, HISTORY_KEY, SETTINGS_KEY};
    use std::time::Duration;

    struct Harness {
        controller: Controller,
        store: Arc<MemoryStore>,
        scheduler: Arc<ManualScheduler>,
    }

    fn harness_with(store: Arc<MemoryStore>) -> Harness {
        let scheduler = Arc::new(ManualScheduler::default());
        let controller = Controller::new(
            ShellConfig::default(),
            store.clone(),
            Arc::new(MemoryClipboard::new()),
            scheduler.clone(),
        )
        .with_rng(StdRng::seed_from_u64(42));
        Harness {
            controller,
            store,
            scheduler,
        }
    }

    fn harness() -> Harness {
        harness_with(Arc::new(MemoryStore::new()))
    }

    fn messages(controller: &Controller) -> Vec<String> {
        controller
            .output()
            .entries()
            .iter()
            .map(|entry| entry.message.clone())
            .collect()
    }

    fn drive_to_completion(controller: &mut Controller, run: RunId) -> usize {
        let mut ticks = 0;
        while controller.is_running() {
            assert!(controller.on_tick(Tick { run }));
            ticks += 1;
            assert!(ticks <= 8, "run never finished");
        }
        ticks
    }

    #[test]
    fn full_run_logs_banner_steps_and_completion() {
        let mut h = harness();
        let outcome = h.controller.start("Book a flight to Paris", "sk-test").unwrap();
        let total = match outcome {
            StartOutcome::Started { total_steps, .. } => total_steps,
            other => panic!("unexpected outcome {:?}", other),
        };
        assert!((3..=7).contains(&total));
        assert!(h.controller.is_running());
        assert_eq!(
            h.controller.run_control(),
            RunControl {
                disabled: true,
                label: "Running..."
            }
        );
        assert!(h.controller.controls().frame.is_visible());
        assert_eq!(h.controller.controls().frame.src(), Some("https://browser-use.com"));
        assert_eq!(h.scheduler.count(), 1);

        let ticks = drive_to_completion(&mut h.controller, 1);
        assert_eq!(ticks as u32, total + 1);

        let entries = h.controller.output().entries();
        assert_eq!(entries[0].message, "Starting browser-use agent...");
        assert_eq!(entries[1].message, "Task: Book a flight to Paris");
        assert_eq!(
            entries[2].message,
            "Using model: gpt-4o. Browser options: Headless, Security enabled, Vision enabled"
        );
        let steps = &entries[3..entries.len() - 1];
        assert_eq!(steps.len() as u32, total);
        for (idx, entry) in steps.iter().enumerate() {
            assert!(entry.message.starts_with(&format!("Step {}/{}: ", idx + 1, total)));
            let action = entry.action.as_deref().unwrap();
            let label = action.strip_prefix("Action: ").unwrap();
            assert!(ACTIONS.iter().any(|phrase| phrase.to_lowercase() == label));
        }
        let last = entries.last().unwrap();
        assert_eq!(last.message, "Task completed successfully!");
        assert_eq!(last.severity, Severity::Success);

        assert!(!h.controller.is_running());
        assert_eq!(h.controller.run_control().label, "Run Task");
        assert!(h.scheduler.cancelled(1));
    }

    #[test]
    fn second_start_while_running_only_warns() {
        let mut h = harness();
        h.controller.start("Book a flight to Paris", "sk-test").unwrap();
        let before_history = h.controller.state().history.entries().to_vec();
        let before_log = h.controller.output().len();
        let before_current = h.controller.current_task_id().map(str::to_string);

        let outcome = h.controller.start("Another task", "sk-test").unwrap();

        assert_eq!(outcome, StartOutcome::AlreadyRunning);
        assert_eq!(h.controller.state().history.entries(), before_history.as_slice());
        assert_eq!(h.controller.current_task_id().map(str::to_string), before_current);
        assert!(h.controller.is_running());
        assert_eq!(h.controller.output().len(), before_log + 1);
        let last = h.controller.output().entries().last().unwrap();
        assert_eq!(last.message, "A task is already running");
        assert_eq!(last.severity, Severity::Warning);
        assert_eq!(h.scheduler.count(), 1);
    }

    #[test]
    fn missing_task_or_key_is_rejected() {
        let mut h = harness();

        assert_eq!(h.controller.start("   ", "sk-test").unwrap(), StartOutcome::MissingTask);
        assert_eq!(
            h.controller.start("Book a flight", "").unwrap(),
            StartOutcome::MissingApiKey
        );

        assert_eq!(
            messages(&h.controller),
            vec!["Please enter a task", "Please enter an API key"]
        );
        assert!(h
            .controller
            .output()
            .entries()
            .iter()
            .all(|entry| entry.severity == Severity::Error));
        assert!(!h.controller.is_running());
        assert!(h.controller.state().history.is_empty());
        assert_eq!(h.store.get(HISTORY_KEY).unwrap(), None);
        assert_eq!(h.controller.current_task_id(), None);
    }

    #[test]
    fn run_uses_control_values_and_trims_task() {
        let mut h = harness();
        h.controller.set_task_input("  Check the weather in Oslo \n");
        h.controller.set_api_key_input("sk-test");
        h.controller.select_model("claude-3-5-sonnet-latest");
        h.controller.set_option(RunOption::Headless, false);

        assert!(h.controller.run().unwrap().is_started());
        assert_eq!(
            messages(&h.controller)[1..3],
            [
                "Task: Check the weather in Oslo".to_string(),
                "Using model: claude-3-5-sonnet-latest. Browser options: Visible, Security enabled, Vision enabled"
                    .to_string(),
            ]
        );
        assert_eq!(h.controller.state().history.entries()[0].task, "Check the weather in Oslo");
    }

    #[test]
    fn start_clears_previous_output() {
        let mut h = harness();
        h.controller.save_api_key().unwrap();
        h.controller.start("one", "sk-test").unwrap();
        assert_eq!(messages(&h.controller)[0], "Starting browser-use agent...");
    }

    #[test]
    fn cancel_returns_to_idle_and_drops_stale_ticks() {
        let mut h = harness();
        h.controller.start("Book a flight to Paris", "sk-test").unwrap();
        assert!(h.controller.on_tick(Tick { run: 1 }));

        assert!(h.controller.cancel());
        assert!(!h.controller.is_running());
        assert!(h.scheduler.cancelled(1));
        let last = h.controller.output().entries().last().unwrap();
        assert_eq!(last.message, "Task cancelled");
        assert_eq!(last.severity, Severity::Warning);

        let len = h.controller.output().len();
        assert!(!h.controller.on_tick(Tick { run: 1 }));
        assert_eq!(h.controller.output().len(), len);

        assert!(!h.controller.cancel());
        assert_eq!(
            h.controller.output().entries().last().unwrap().message,
            "No task is running"
        );
    }

    #[test]
    fn new_run_ignores_ticks_of_the_previous_one() {
        let mut h = harness();
        h.controller.start("first", "sk-test").unwrap();
        drive_to_completion(&mut h.controller, 1);
        h.controller.start("second", "sk-test").unwrap();

        let len = h.controller.output().len();
        assert!(!h.controller.on_tick(Tick { run: 1 }));
        assert_eq!(h.controller.output().len(), len);
        assert!(h.controller.on_tick(Tick { run: 2 }));
        assert_eq!(h.controller.progress().map(|(done, _)| done), Some(1));
    }

    #[test]
    fn ctrl_enter_runs_and_other_keys_do_not() {
        let mut h = harness();
        h.controller.set_task_input("Book a flight");
        h.controller.set_api_key_input("sk-test");

        let plain = KeyPress {
            key: Key::Enter,
            ctrl: false,
        };
        assert_eq!(h.controller.on_task_key(plain).unwrap(), None);
        let letter = KeyPress {
            key: Key::Char('a'),
            ctrl: true,
        };
        assert_eq!(h.controller.on_task_key(letter).unwrap(), None);
        assert!(!h.controller.is_running());

        let outcome = h.controller.on_task_key(KeyPress::ctrl_enter()).unwrap();
        assert!(outcome.unwrap().is_started());
        assert!(h.controller.is_running());
    }

    #[test]
    fn history_selection_fills_task_input() {
        let mut h = harness();
        h.controller.start("Find a recipe for pancakes and list the ingredients", "k").unwrap();
        drive_to_completion(&mut h.controller, 1);
        let first = h.controller.current_task_id().unwrap().to_string();
        h.controller.start("Book a flight", "k").unwrap();
        drive_to_completion(&mut h.controller, 2);

        let rows = h.controller.history_rows();
        assert!(rows[0].active);
        assert!(!rows[1].active);
        assert_eq!(rows[1].label, "Find a recipe for pancakes and...");

        assert!(h.controller.select_history(&first));
        assert_eq!(
            h.controller.controls().task_input,
            "Find a recipe for pancakes and list the ingredients"
        );
        let rows = h.controller.history_rows();
        assert!(!rows[0].active);
        assert!(rows[1].active);

        assert!(!h.controller.select_history("missing"));
    }

    #[test]
    fn history_never_exceeds_ten() {
        let mut h = harness();
        for idx in 0..12 {
            h.controller.start(&format!("task {}", idx), "k").unwrap();
            h.controller.cancel();
        }
        assert_eq!(h.controller.state().history.len(), 10);
        assert_eq!(h.controller.state().history.entries()[0].task, "task 11");
    }

    #[test]
    fn settings_save_persists_and_closes_panel() {
        let mut h = harness();
        h.controller.open_settings();
        h.controller.edit_setting(SettingField::MaxSteps, "50").unwrap();
        h.controller.edit_setting(SettingField::SaveConversation, "on").unwrap();

        assert_eq!(h.controller.save_settings().unwrap(), SettingsOutcome::Saved);
        assert!(!h.controller.controls().settings_open);
        assert_eq!(h.controller.settings().max_steps, 50);
        assert!(h.controller.settings().save_conversation);
        let last = h.controller.output().entries().last().unwrap();
        assert_eq!(last.message, "Settings saved successfully");
        assert_eq!(last.severity, Severity::Success);

        let mut fresh = harness_with(h.store.clone());
        fresh.controller.load().unwrap();
        assert_eq!(fresh.controller.settings().max_steps, 50);
        assert_eq!(fresh.controller.controls().settings_form.max_steps, "50");
    }

    #[test]
    fn invalid_settings_are_rejected_without_side_effects() {
        let mut h = harness();
        h.controller.open_settings();
        h.controller.edit_setting(SettingField::ViewportExpansion, "wide").unwrap();

        let outcome = h.controller.save_settings().unwrap();
        assert!(matches!(outcome, SettingsOutcome::Rejected(_)));
        assert!(h.controller.controls().settings_open);
        assert_eq!(h.controller.settings(), &Settings::default());
        assert_eq!(h.store.get(SETTINGS_KEY).unwrap(), None);
        assert_eq!(
            h.controller.output().entries().last().unwrap().severity,
            Severity::Error
        );
    }

    #[test]
    fn reset_then_load_gives_exact_defaults() {
        let mut h = harness();
        h.controller.edit_setting(SettingField::MaxActions, "3").unwrap();
        h.controller.edit_setting(SettingField::OutputPath, "/srv").unwrap();
        h.controller.save_settings().unwrap();

        h.controller.reset_settings().unwrap();
        assert_eq!(h.controller.settings(), &Settings::default());
        assert_eq!(
            h.controller.controls().settings_form,
            SettingsForm::from_settings(&Settings::default())
        );
        assert_eq!(
            h.controller.output().entries().last().unwrap().message,
            "Settings reset to defaults"
        );

        let mut fresh = harness_with(h.store.clone());
        fresh.controller.load().unwrap();
        assert_eq!(fresh.controller.settings(), &Settings::default());
    }

    #[test]
    fn api_key_round_trips_through_the_store() {
        let mut h = harness();
        h.controller.set_api_key_input("sk-live");
        h.controller.save_api_key().unwrap();
        assert_eq!(
            h.controller.output().entries().last().unwrap().message,
            "API key saved successfully"
        );

        let mut fresh = harness_with(h.store.clone());
        assert_eq!(fresh.controller.controls().api_key_input, "");
        fresh.controller.load().unwrap();
        assert_eq!(fresh.controller.controls().api_key_input, "sk-live");
    }

    #[test]
    fn corrupt_stored_values_fall_back_to_defaults() {
        let store = Arc::new(MemoryStore::new());
        store.set(SETTINGS_KEY, "not json").unwrap();
        store.set(HISTORY_KEY, "{}").unwrap();

        let mut h = harness_with(store);
        h.controller.load().unwrap();

        assert_eq!(h.controller.settings(), &Settings::default());
        assert!(h.controller.state().history.is_empty());
        let errors: Vec<_> = h
            .controller
            .output()
            .entries()
            .iter()
            .filter(|entry| entry.severity == Severity::Error)
            .collect();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].message.starts_with("Could not read saved settings"));
        assert!(errors[1].message.starts_with("Could not read task history"));
    }

    #[test]
    fn provider_note_keeps_last_known_provider() {
        let mut h = harness();
        assert_eq!(h.controller.controls().provider_note, "For OpenAI models");
        h.controller.select_model("gemini-2.0-flash");
        assert_eq!(h.controller.controls().provider_note, "For Google models");
        h.controller.select_model("mystery-model");
        assert_eq!(h.controller.controls().model, "mystery-model");
        assert_eq!(h.controller.controls().provider_note, "For Google models");
    }

    #[test]
    fn ticks_are_scheduled_at_the_configured_interval() {
        let mut h = harness();
        h.controller.start("Book a flight", "k").unwrap();
        let scheduled = h.scheduler.scheduled.lock().unwrap();
        assert_eq!(scheduled[0].1, Duration::from_millis(2000));
    }

    #[tokio::test]
    async fn copy_and_clear_report_in_the_log() {
        let mut h = harness();
        h.controller.clear_output();
        h.controller.copy_output().await;
        assert_eq!(
            messages(&h.controller),
            vec!["Output cleared", "Output copied to clipboard"]
        );
    }

    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(WebUiError::Storage(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }
    }

    fn read_only_controller() -> Controller {
        Controller::new(
            ShellConfig::default(),
            Arc::new(ReadOnlyStore),
            Arc::new(MemoryClipboard::new()),
            Arc::new(ManualScheduler::default()),
        )
    }

    #[test]
    fn start_with_unwritable_history_keeps_log_and_stays_idle() {
        let mut controller = read_only_controller();
        controller.clear_output();

        assert!(controller.start("Book a flight", "sk-test").is_err());

        assert!(!controller.is_running());
        assert!(controller.state().history.is_empty());
        assert_eq!(controller.current_task_id(), None);
        assert!(!controller.controls().frame.is_visible());
        let entries = controller.output().entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "Output cleared");
        assert_eq!(entries[1].severity, Severity::Error);
        assert!(entries[1].message.starts_with("Failed to save task history: "));
    }

    #[test]
    fn unwritable_settings_and_key_are_reported() {
        let mut controller = read_only_controller();
        controller.open_settings();
        controller.edit_setting(SettingField::MaxSteps, "50").unwrap();

        assert!(controller.save_settings().is_err());
        assert_eq!(controller.settings(), &Settings::default());
        assert!(controller.controls().settings_open);

        assert!(controller.reset_settings().is_err());
        assert_eq!(controller.controls().settings_form.max_steps, "50");

        controller.set_api_key_input("sk-live");
        assert!(controller.save_api_key().is_err());

        assert_eq!(
            messages(&controller),
            vec![
                "Failed to save settings: storage error: read-only",
                "Failed to save settings: storage error: read-only",
                "Failed to save API key: storage error: read-only",
            ]
        );
    }

    #[test]
    fn example_presets_fill_task_input() {
        let mut h = harness();
        assert!(h.controller.use_example(1));
        assert_eq!(h.controller.controls().task_input, EXAMPLE_TASKS[1]);
        assert!(!h.controller.use_example(EXAMPLE_TASKS.len()));
        assert_eq!(h.controller.controls().task_input, EXAMPLE_TASKS[1]);
        assert!(h.controller.output().is_empty());
    }

    #[test]
    fn frame_controls_follow_the_run() {
        let mut h = harness();
        assert!(!h.controller.refresh_frame());
        h.controller.start("Book a flight", "k").unwrap();
        assert!(h.controller.refresh_frame());
        assert_eq!(h.controller.request_fullscreen(), Some(FullscreenApi::Standard));
    }
}
