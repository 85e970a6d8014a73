pub mod notifier;
pub mod scheduler;
pub mod source;
pub mod view;

pub use notifier::{NotificationError, Notifier, TonePlayer};
pub use scheduler::{Scheduler, Task, TaskFuture};
pub use source::{FetchError, StatsSource};
pub use view::ViewSink;
