use crate::domain::entities::dashboard_view::DashboardView;

/// Receives the freshly projected view after every successful cycle
pub trait ViewSink: Send + Sync {
    fn render(&self, view: DashboardView);
}
