use std::sync::Mutex;
use std::time::Duration;

use crate::domain::ports::scheduler::{Scheduler, Task};

/// Scheduler driven by the caller. Nothing runs until [`ManualScheduler::tick`].
#[derive(Default)]
pub struct ManualScheduler {
    tasks: Mutex<Vec<(Duration, Task)>>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn task_count(&self) -> usize {
        self.lock().len()
    }

    /// Interval each task was registered with, in registration order.
    #[must_use]
    pub fn intervals(&self) -> Vec<Duration> {
        self.lock().iter().map(|(interval, _)| *interval).collect()
    }

    /// Fire one tick of every registered task and wait for all runs.
    pub async fn tick(&self) {
        let runs: Vec<_> = self.lock().iter().map(|(_, task)| (task)()).collect();
        for run in runs {
            run.await;
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(Duration, Task)>> {
        self.tasks
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, interval: Duration, task: Task) {
        self.lock().push((interval, task));
    }
}
