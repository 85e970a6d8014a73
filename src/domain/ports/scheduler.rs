use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

/// Future produced by one run of a scheduled task
pub type TaskFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Repeating unit of work. Called once per tick.
pub type Task = Arc<dyn Fn() -> TaskFuture + Send + Sync>;

/// Drives tasks on a fixed period. Implementations decide where ticks come
/// from: a runtime timer in production, the test itself otherwise.
pub trait Scheduler: Send + Sync {
    /// Run `task` every `interval`, starting with an immediate tick.
    /// Ticks do not wait for earlier runs to finish.
    fn schedule(&self, interval: Duration, task: Task);
}
