use super::plan::StepPlan;
use super::scheduler::ScheduledTask;

pub type RunId = u64;

/// One timer firing for a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tick {
    pub run: RunId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOption {
    Headless,
    DisableSecurity,
    UseVision,
}

impl RunOption {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "headless" => Some(RunOption::Headless),
            "security" | "disable-security" => Some(RunOption::DisableSecurity),
            "vision" | "use-vision" => Some(RunOption::UseVision),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub headless: bool,
    pub disable_security: bool,
    pub use_vision: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            headless: true,
            disable_security: false,
            use_vision: true,
        }
    }
}

impl RunOptions {
    pub fn get(&self, option: RunOption) -> bool {
        match option {
            RunOption::Headless => self.headless,
            RunOption::DisableSecurity => self.disable_security,
            RunOption::UseVision => self.use_vision,
        }
    }

    pub fn set(&mut self, option: RunOption, value: bool) {
        match option {
            RunOption::Headless => self.headless = value,
            RunOption::DisableSecurity => self.disable_security = value,
            RunOption::UseVision => self.use_vision = value,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{}, {}, {}",
            if self.headless { "Headless" } else { "Visible" },
            if self.disable_security {
                "Security disabled"
            } else {
                "Security enabled"
            },
            if self.use_vision {
                "Vision enabled"
            } else {
                "Vision disabled"
            }
        )
    }
}

pub struct ActiveRun {
    pub id: RunId,
    pub task_id: String,
    pub plan: StepPlan,
    pub ticker: Box<dyn ScheduledTask>,
}

pub enum RunPhase {
    Idle,
    Running(ActiveRun),
}

/// Transient run bookkeeping; never persisted.
pub struct RunState {
    pub phase: RunPhase,
    pub current_task_id: Option<String>,
}

impl Default for RunState {
    fn default() -> Self {
        Self {
            phase: RunPhase::Idle,
            current_task_id: None,
        }
    }
}

impl RunState {
    pub fn is_running(&self) -> bool {
        matches!(self.phase, RunPhase::Running(_))
    }

    pub fn active(&self) -> Option<&ActiveRun> {
        match &self.phase {
            RunPhase::Running(run) => Some(run),
            RunPhase::Idle => None,
        }
    }
}

/// What the run button looks like.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunControl {
    pub disabled: bool,
    pub label: &'static str,
}

impl RunControl {
    pub fn for_state(state: &RunState) -> Self {
        if state.is_running() {
            Self {
                disabled: true,
                label: "Running...",
            }
        } else {
            Self {
                disabled: false,
                label: "Run Task",
            }
        }
    }
}
