use notify_rust::{Notification as DesktopNotification, Timeout, Urgency};

use crate::domain::entities::notification::Notification;
use crate::domain::ports::notifier::{NotificationError, Notifier};
use crate::domain::value_objects::severity::Severity;

const MAX_BODY_CHARS: usize = 250;
const BANNER_TIMEOUT_MS: u32 = 5_000;

/// Mirrors banners as desktop notifications. Speech is left to the voice engine.
pub struct DesktopNotifier;

impl DesktopNotifier {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, notification: &Notification) -> Result<(), NotificationError> {
        let Notification::Banner { message, severity } = notification else {
            return Ok(());
        };

        let summary = format!("{} Lookout", severity.emoji());
        let body = truncate(&escape_markup(message), MAX_BODY_CHARS);

        DesktopNotification::new()
            .summary(&summary)
            .body(&body)
            .urgency(severity_to_urgency(*severity))
            .timeout(Timeout::Milliseconds(BANNER_TIMEOUT_MS))
            .show()
            .map_err(|_| {
                NotificationError::ChannelUnavailable(
                    "desktop notification server unreachable".to_string(),
                )
            })?;

        Ok(())
    }
}

#[must_use]
const fn severity_to_urgency(severity: Severity) -> Urgency {
    match severity {
        Severity::Danger => Urgency::Critical,
        Severity::Warning => Urgency::Normal,
        Severity::Info => Urgency::Low,
    }
}

// Truncates on Unicode scalar values (not grapheme clusters).
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_owned()
    } else {
        let mut result: String = s.chars().take(max_chars - 1).collect();
        result.push('\u{2026}');
        result
    }
}

fn escape_markup(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
