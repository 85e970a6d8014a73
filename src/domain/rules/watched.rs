use crate::domain::entities::notification::Notification;
use crate::domain::entities::snapshot::DetectionSnapshot;
use crate::domain::value_objects::alert_rules::AlertRules;

use super::{EvaluatorState, Rule};

/// Watched classes present in the snapshot, in class order
#[must_use]
pub fn watched_hits<'a>(snapshot: &'a DetectionSnapshot, rules: &AlertRules) -> Vec<&'a str> {
    snapshot
        .classes
        .keys()
        .filter(|class| rules.watched_classes.contains(class.as_str()))
        .map(String::as_str)
        .collect()
}

/// Hook for watched classes. Hits are logged; no notification is emitted yet.
pub struct WatchedClassRule;

impl Rule for WatchedClassRule {
    fn name(&self) -> &'static str {
        "watched_class"
    }

    fn evaluate(
        &self,
        snapshot: &DetectionSnapshot,
        rules: &AlertRules,
        _state: &EvaluatorState,
    ) -> Vec<Notification> {
        let hits = watched_hits(snapshot, rules);
        if !hits.is_empty() {
            tracing::debug!(classes = ?hits, "watched classes present");
        }
        vec![]
    }
}
