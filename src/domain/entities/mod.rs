pub mod banner;
pub mod dashboard_view;
pub mod notification;
pub mod snapshot;

pub use banner::{Banner, BannerBoard};
pub use dashboard_view::{ClassRow, DashboardView, MotionBadge};
pub use notification::Notification;
pub use snapshot::DetectionSnapshot;
