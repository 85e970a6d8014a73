pub mod manual;
pub mod tokio_scheduler;

pub use manual::ManualScheduler;
pub use tokio_scheduler::TokioScheduler;
