use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Alert configuration, fixed for the whole session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertRules {
    /// A banner is raised on every cycle where `total` is strictly above this value
    pub object_threshold: u32,
    /// Classes singled out for special handling (currently detection only)
    pub watched_classes: BTreeSet<String>,
    /// Speak an announcement when motion starts
    pub motion_alert_enabled: bool,
    /// Master switch for the speech sink
    pub voice_enabled: bool,
}

impl Default for AlertRules {
    fn default() -> Self {
        Self {
            object_threshold: 5,
            watched_classes: BTreeSet::new(),
            motion_alert_enabled: true,
            voice_enabled: true,
        }
    }
}
