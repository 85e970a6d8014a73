use crate::domain::entities::notification::Notification;
use crate::domain::entities::snapshot::DetectionSnapshot;
use crate::domain::value_objects::alert_rules::AlertRules;
use crate::domain::value_objects::severity::Severity;

use super::{EvaluatorState, Rule};

/// Raises a danger banner on every cycle where the object count is above
/// the threshold. Not edge-triggered.
pub struct ObjectThresholdRule;

impl Rule for ObjectThresholdRule {
    fn name(&self) -> &'static str {
        "object_threshold"
    }

    fn evaluate(
        &self,
        snapshot: &DetectionSnapshot,
        rules: &AlertRules,
        _state: &EvaluatorState,
    ) -> Vec<Notification> {
        if snapshot.total > rules.object_threshold {
            vec![Notification::banner(
                format!("High object count: {} objects detected", snapshot.total),
                Severity::Danger,
            )]
        } else {
            vec![]
        }
    }
}
