use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One poll cycle's detection payload, as served by `GET /detection_stats`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionSnapshot {
    /// Number of objects in the last analysed frame
    pub total: u32,
    /// Per-class object counts, ordered by class name
    #[serde(default)]
    pub classes: BTreeMap<String, u32>,
    /// State of the motion sensor when the payload was produced
    #[serde(default)]
    pub motion_detected: bool,
}

impl DetectionSnapshot {
    #[must_use]
    pub fn count_of(&self, class: &str) -> u32 {
        self.classes.get(class).copied().unwrap_or(0)
    }
}
