use crate::domain::entities::notification::Notification;
use crate::domain::entities::snapshot::DetectionSnapshot;
use crate::domain::value_objects::alert_rules::AlertRules;

use super::{EvaluatorState, Rule};

/// `"N label"`, with an `s` appended when N > 1
#[must_use]
pub fn pluralize(count: u32, label: &str) -> String {
    if count > 1 {
        format!("{count} {label}s")
    } else {
        format!("{count} {label}")
    }
}

/// Build `"Detected: 2 dogs, 1 cat"`. `None` when nothing is listed.
#[must_use]
pub fn format_announcement<'a, I>(entries: I) -> Option<String>
where
    I: IntoIterator<Item = (&'a str, u32)>,
{
    let parts: Vec<String> = entries
        .into_iter()
        .map(|(label, count)| pluralize(count, label))
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(format!("Detected: {}", parts.join(", ")))
    }
}

/// Classes that are new or whose count went up since the last announcement
#[must_use]
pub fn increased_classes<'a>(
    snapshot: &'a DetectionSnapshot,
    state: &EvaluatorState,
) -> Vec<(&'a str, u32)> {
    snapshot
        .classes
        .iter()
        .filter(|(class, count)| {
            state
                .last_announced_counts
                .get(class.as_str())
                .map_or(true, |previous| *count > previous)
        })
        .map(|(class, count)| (class.as_str(), *count))
        .collect()
}

/// One combined announcement listing every class that appeared or grew
pub struct ClassAnnouncementRule;

impl Rule for ClassAnnouncementRule {
    fn name(&self) -> &'static str {
        "class_announcement"
    }

    fn evaluate(
        &self,
        snapshot: &DetectionSnapshot,
        _rules: &AlertRules,
        state: &EvaluatorState,
    ) -> Vec<Notification> {
        format_announcement(increased_classes(snapshot, state))
            .map(Notification::speech)
            .into_iter()
            .collect()
    }
}
