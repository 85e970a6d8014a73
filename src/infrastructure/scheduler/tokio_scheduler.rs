use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::domain::ports::scheduler::{Scheduler, Task};

/// Runtime-backed scheduler.
///
/// Every tick spawns the task on its own so a slow run never delays the
/// next one. Ticks missed while the runtime was busy are skipped rather than
/// replayed in a burst.
#[derive(Default)]
pub struct TokioScheduler {
    handles: std::sync::Mutex<Vec<JoinHandle<()>>>,
}

impl TokioScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop every loop started by this scheduler. Runs already in flight
    /// finish on their own.
    pub fn shutdown(&self) {
        let mut handles = self
            .handles
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        for handle in handles.drain(..) {
            handle.abort();
        }
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, interval: Duration, task: Task) {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                tokio::spawn((task)());
            }
        });
        self.handles
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(handle);
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}
