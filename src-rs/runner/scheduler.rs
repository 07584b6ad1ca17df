use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::debug;

use super::types::{RunId, Tick};

/// Produces periodic [`Tick`]s for a run until cancelled.
pub trait Scheduler: Send + Sync {
    fn every(&self, run: RunId, period: Duration) -> Box<dyn ScheduledTask>;
}

pub trait ScheduledTask: Send {
    fn cancel(&mut self);
}

/// Spawns one tokio task per run that sleeps `period` and then sends a tick,
/// so the first tick arrives one period after scheduling.
pub struct TokioScheduler {
    tx: UnboundedSender<Tick>,
}

impl TokioScheduler {
    pub fn new(tx: UnboundedSender<Tick>) -> Self {
        Self { tx }
    }
}

impl Scheduler for TokioScheduler {
    fn every(&self, run: RunId, period: Duration) -> Box<dyn ScheduledTask> {
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            loop {
                tokio::time::sleep(period).await;
                if tx.send(Tick { run }).is_err() {
                    debug!(run, "tick receiver dropped");
                    break;
                }
            }
        });
        Box::new(TickerHandle { handle })
    }
}

/// Aborts the ticking task on cancel or drop.
pub struct TickerHandle {
    handle: JoinHandle<()>,
}

impl ScheduledTask for TickerHandle {
    fn cancel(&mut self) {
        self.handle.abort();
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
pub(crate) mod manual {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use super::{ScheduledTask, Scheduler};
    use crate::runner::types::RunId;

    /// Records schedules without running a timer; tests deliver ticks by hand.
    #[derive(Default)]
    pub struct ManualScheduler {
        pub scheduled: Mutex<Vec<(RunId, Duration, Arc<AtomicBool>)>>,
    }

    impl ManualScheduler {
        pub fn cancelled(&self, run: RunId) -> bool {
            self.scheduled
                .lock()
                .unwrap()
                .iter()
                .any(|(id, _, flag)| *id == run && flag.load(Ordering::SeqCst))
        }

        pub fn count(&self) -> usize {
            self.scheduled.lock().unwrap().len()
        }
    }

    struct ManualTask(Arc<AtomicBool>);

    impl ScheduledTask for ManualTask {
        fn cancel(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    impl Scheduler for ManualScheduler {
        fn every(&self, run: RunId, period: Duration) -> Box<dyn ScheduledTask> {
            let flag = Arc::new(AtomicBool::new(false));
            self.scheduled.lock().unwrap().push((run, period, flag.clone()));
            Box::new(ManualTask(flag))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn ticks_arrive_each_period_until_cancelled() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let scheduler = TokioScheduler::new(tx);
        let mut task = scheduler.every(4, Duration::from_secs(2));

        let start = tokio::time::Instant::now();
        assert_eq!(rx.recv().await, Some(Tick { run: 4 }));
        assert!(start.elapsed() >= Duration::from_secs(2));
        assert!(start.elapsed() < Duration::from_secs(3));
        assert_eq!(rx.recv().await, Some(Tick { run: 4 }));
        assert!(start.elapsed() >= Duration::from_secs(4));
        assert!(start.elapsed() < Duration::from_secs(5));

        task.cancel();
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(rx.try_recv().is_err());
    }
}
