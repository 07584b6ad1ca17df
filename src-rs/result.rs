/// How a run request was handled. Only `Started` changes any state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StartOutcome {
    Started { task_id: String, total_steps: u32 },
    AlreadyRunning,
    MissingTask,
    MissingApiKey,
}

impl StartOutcome {
    pub fn is_started(&self) -> bool {
        matches!(self, StartOutcome::Started { .. })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SettingsOutcome {
    Saved,
    Rejected(String),
}
