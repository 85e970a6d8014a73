use serde::{Deserialize, Serialize};

use super::snapshot::DetectionSnapshot;

/// Two-state motion indicator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotionBadge {
    Active,
    #[default]
    Inactive,
}

impl MotionBadge {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Active => "Motion detected",
            Self::Inactive => "No motion",
        }
    }

    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self {
            Self::Active => "status-active",
            Self::Inactive => "status-inactive",
        }
    }
}

/// One line of the class breakdown (`class-item`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRow {
    pub class: String,
    pub count: u32,
}

/// Everything the dashboard shows for one snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardView {
    pub total: u32,
    pub rows: Vec<ClassRow>,
    pub motion: MotionBadge,
}

impl DashboardView {
    /// Project a snapshot into its view. The class list is rebuilt from
    /// scratch each time, never patched.
    #[must_use]
    pub fn project(snapshot: &DetectionSnapshot) -> Self {
        Self {
            total: snapshot.total,
            rows: snapshot
                .classes
                .iter()
                .map(|(class, count)| ClassRow {
                    class: class.clone(),
                    count: *count,
                })
                .collect(),
            motion: if snapshot.motion_detected {
                MotionBadge::Active
            } else {
                MotionBadge::Inactive
            },
        }
    }

    /// Fill level of the total-count gauge against `threshold`
    #[must_use]
    pub fn threshold_ratio(&self, threshold: u32) -> f64 {
        threshold_ratio(self.total, threshold)
    }
}

/// How far `total` has gone towards `threshold`, clamped to `0.0..=1.0`.
/// A zero threshold is crossed by any detection.
#[must_use]
pub fn threshold_ratio(total: u32, threshold: u32) -> f64 {
    if threshold == 0 {
        if total == 0 {
            0.0
        } else {
            1.0
        }
    } else {
        (f64::from(total) / f64::from(threshold)).clamp(0.0, 1.0)
    }
}

impl From<&DetectionSnapshot> for DashboardView {
    fn from(snapshot: &DetectionSnapshot) -> Self {
        Self::project(snapshot)
    }
}
