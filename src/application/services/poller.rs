use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::domain::entities::dashboard_view::DashboardView;
use crate::domain::entities::notification::Notification;
use crate::domain::ports::notifier::Notifier;
use crate::domain::ports::scheduler::{Scheduler, Task};
use crate::domain::ports::source::{FetchError, StatsSource};
use crate::domain::ports::view::ViewSink;
use crate::domain::rules::AlertEvaluator;

/// Result of a single poll cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollCycleResult {
    /// Order in which the cycle was issued, starting at 1
    pub sequence: u64,
    /// Notifications handed to the notifier
    pub notifications: usize,
    /// False when the response was dropped as stale
    pub rendered: bool,
}

/// Orchestrates a poll cycle: fetch → evaluate → render → notify.
pub struct PollerService {
    source: Arc<dyn StatsSource>,
    evaluator: AlertEvaluator,
    notifier: Arc<dyn Notifier>,
    view: Arc<dyn ViewSink>,
    drop_stale: bool,
    issued: AtomicU64,
    applied: Mutex<u64>,
}

impl PollerService {
    #[must_use]
    pub fn new(
        source: Arc<dyn StatsSource>,
        evaluator: AlertEvaluator,
        notifier: Arc<dyn Notifier>,
        view: Arc<dyn ViewSink>,
    ) -> Self {
        Self {
            source,
            evaluator,
            notifier,
            view,
            drop_stale: true,
            issued: AtomicU64::new(0),
            applied: Mutex::new(0),
        }
    }

    /// When disabled, a slow response may overwrite the result of a newer
    /// cycle (last to complete wins).
    #[must_use]
    pub const fn with_stale_drop(mut self, drop_stale: bool) -> Self {
        self.drop_stale = drop_stale;
        self
    }

    #[must_use]
    pub const fn evaluator(&self) -> &AlertEvaluator {
        &self.evaluator
    }

    /// Run a single poll cycle.
    ///
    /// A failed fetch leaves the evaluator state and the rendered view
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns the `FetchError` of this cycle. Callers driving the poller on
    /// a schedule log it and move on.
    pub async fn run_once(&self) -> Result<PollCycleResult, FetchError> {
        let sequence = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let snapshot = self.source.fetch().await?;

        let notifications = {
            let mut applied = self.applied.lock().unwrap_or_else(PoisonError::into_inner);
            if self.drop_stale && sequence < *applied {
                tracing::debug!(
                    sequence,
                    latest = *applied,
                    "Dropping stale detection response"
                );
                return Ok(PollCycleResult {
                    sequence,
                    notifications: 0,
                    rendered: false,
                });
            }
            *applied = (*applied).max(sequence);

            let notifications = self.evaluator.process(&snapshot);
            self.view.render(DashboardView::project(&snapshot));
            notifications
        };

        if !notifications.is_empty() {
            tracing::debug!("{} notification(s) raised", notifications.len());
        }
        self.dispatch(&notifications);

        Ok(PollCycleResult {
            sequence,
            notifications: notifications.len(),
            rendered: true,
        })
    }

    fn dispatch(&self, notifications: &[Notification]) {
        for notification in notifications {
            if let Err(e) = self.notifier.notify(notification) {
                tracing::warn!("Notification failed: {e}");
            }
        }
    }

    /// Hand the poll cycle to `scheduler`. The first cycle runs immediately,
    /// then every `interval`.
    pub fn start(self: &Arc<Self>, scheduler: &dyn Scheduler, interval: Duration) {
        let service = Arc::clone(self);
        let task: Task = Arc::new(move || {
            let service = Arc::clone(&service);
            Box::pin(async move {
                if let Err(e) = service.run_once().await {
                    tracing::warn!("Poll cycle failed: {e}");
                }
            })
        });
        tracing::info!("Polling every {} ms", interval.as_millis());
        scheduler.schedule(interval, task);
    }
}
