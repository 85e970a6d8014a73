use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::application::services::poller::PollerService;
use crate::domain::entities::dashboard_view::DashboardView;
use crate::domain::ports::view::ViewSink;
use crate::infrastructure::scheduler::TokioScheduler;

/// View sink for headless runs: nothing to draw, so the view is logged.
pub struct LoggingViewSink;

impl ViewSink for LoggingViewSink {
    fn render(&self, view: DashboardView) {
        tracing::debug!(
            total = view.total,
            classes = view.rows.len(),
            motion = view.motion.label(),
            "Dashboard updated"
        );
    }
}

/// Run the poller until it receives a SIGINT signal (Ctrl+C) via
/// [`tokio::signal::ctrl_c()`].
///
/// Failed cycles are logged by the poller and never stop the daemon.
///
/// # Errors
///
/// Returns an error if the Ctrl+C handler cannot be installed.
pub async fn run_daemon(service: Arc<PollerService>, interval: Duration) -> anyhow::Result<()> {
    run_until(service, interval, async {
        tokio::signal::ctrl_c().await?;
        tracing::info!("Shutdown signal received");
        Ok(())
    })
    .await?;
    println!("\nStopping lookout...");
    Ok(())
}

/// Poll on `interval` until `shutdown` resolves.
///
/// # Errors
///
/// Propagates the error returned by `shutdown`.
pub async fn run_until<F>(
    service: Arc<PollerService>,
    interval: Duration,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = anyhow::Result<()>>,
{
    tracing::info!("Daemon started (interval: {} ms)", interval.as_millis());
    let scheduler = TokioScheduler::new();
    service.start(&scheduler, interval);

    let outcome = shutdown.await;
    scheduler.shutdown();
    outcome
}
