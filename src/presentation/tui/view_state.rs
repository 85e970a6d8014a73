use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Local};

use crate::domain::entities::dashboard_view::DashboardView;
use crate::domain::ports::view::ViewSink;

/// Latest dashboard view, shared between the poller and the draw loop
#[derive(Debug, Default)]
pub struct TuiViewState {
    latest: Mutex<Option<(DashboardView, DateTime<Local>)>>,
}

impl TuiViewState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent view and the local time it arrived, if any cycle succeeded yet
    #[must_use]
    pub fn latest(&self) -> Option<(DashboardView, DateTime<Local>)> {
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ViewSink for TuiViewState {
    fn render(&self, view: DashboardView) {
        *self.latest.lock().unwrap_or_else(PoisonError::into_inner) = Some((view, Local::now()));
    }
}
