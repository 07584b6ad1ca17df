pub mod plan;
pub mod scheduler;
pub mod types;

pub use plan::{action_label, StepEvent, StepPlan, ACTIONS};
pub use scheduler::{ScheduledTask, Scheduler, TickerHandle, TokioScheduler};
pub use types::{ActiveRun, RunControl, RunId, RunOption, RunOptions, RunPhase, RunState, Tick};
