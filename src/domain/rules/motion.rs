use crate::domain::entities::notification::Notification;
use crate::domain::entities::snapshot::DetectionSnapshot;
use crate::domain::value_objects::alert_rules::AlertRules;

use super::{EvaluatorState, Rule};

pub const MOTION_ANNOUNCEMENT: &str = "Motion detected";

/// Speaks once when motion starts. Sustained motion (or sustained calm)
/// stays silent.
pub struct MotionEdgeRule;

impl Rule for MotionEdgeRule {
    fn name(&self) -> &'static str {
        "motion_edge"
    }

    fn evaluate(
        &self,
        snapshot: &DetectionSnapshot,
        rules: &AlertRules,
        state: &EvaluatorState,
    ) -> Vec<Notification> {
        if rules.motion_alert_enabled && snapshot.motion_detected && !state.last_motion_state {
            vec![Notification::speech(MOTION_ANNOUNCEMENT)]
        } else {
            vec![]
        }
    }
}
