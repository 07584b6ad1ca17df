use rand::seq::SliceRandom;
use rand::Rng;

pub const ACTIONS: [&str; 7] = [
    "Navigating to website...",
    "Analyzing page content...",
    "Clicking on element...",
    "Filling form field...",
    "Scrolling down...",
    "Extracting information...",
    "Switching to new tab...",
];

pub const MIN_STEPS: u32 = 3;
pub const MAX_STEPS: u32 = 7;

/// Text before the first colon, lowercased.
pub fn action_label(phrase: &str) -> String {
    phrase.split(':').next().unwrap_or_default().to_lowercase()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepEvent {
    Step {
        index: u32,
        total: u32,
        phrase: &'static str,
    },
    Finished,
}

impl StepEvent {
    pub fn message(&self) -> String {
        match self {
            StepEvent::Step { index, total, phrase } => format!("Step {}/{}: {}", index, total, phrase),
            StepEvent::Finished => "Task completed successfully!".to_string(),
        }
    }

    pub fn action(&self) -> Option<String> {
        match self {
            StepEvent::Step { phrase, .. } => Some(format!("Action: {}", action_label(phrase))),
            StepEvent::Finished => None,
        }
    }
}

/// Progress through one simulated run. Each `advance` is one tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepPlan {
    step: u32,
    total: u32,
}

impl StepPlan {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::with_total(rng.gen_range(MIN_STEPS..=MAX_STEPS))
    }

    pub fn with_total(total: u32) -> Self {
        Self { step: 1, total }
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    pub fn advance<R: Rng>(&mut self, rng: &mut R) -> StepEvent {
        if self.step > self.total {
            return StepEvent::Finished;
        }
        let phrase = ACTIONS.choose(rng).copied().unwrap_or(ACTIONS[0]);
        let event = StepEvent::Step {
            index: self.step,
            total: self.total,
            phrase,
        };
        self.step += 1;
        event
    }
}
