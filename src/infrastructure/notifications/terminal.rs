use std::borrow::Cow;

use chrono::Local;
use colored::Colorize;

use crate::domain::entities::notification::Notification;
use crate::domain::ports::notifier::{NotificationError, Notifier};
use crate::domain::value_objects::severity::Severity;

/// Prints notifications to stdout, for headless runs
pub struct TerminalNotifier;

impl TerminalNotifier {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for TerminalNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: &Notification) -> Result<(), NotificationError> {
        println!("{}", format_line(notification, &Local::now().format("%H:%M:%S").to_string()));
        Ok(())
    }
}

fn format_line(notification: &Notification, time: &str) -> String {
    match notification {
        Notification::Banner { message, severity } => format!(
            "{} {} {}",
            time.dimmed(),
            severity_badge(*severity),
            sanitize(message).bold()
        ),
        Notification::Speech { text } => format!(
            "{} {} {}",
            time.dimmed(),
            " \u{1f50a} ".on_cyan().black(),
            sanitize(text).cyan()
        ),
    }
}

/// Strip ANSI escape sequences and C0/C1 control characters from a string,
/// preserving only printable content, newlines, and tabs.
fn sanitize(s: &str) -> Cow<'_, str> {
    if s.bytes()
        .any(|b| matches!(b, 0x00..=0x08 | 0x0B..=0x0C | 0x0E..=0x1F | 0x7F))
    {
        Cow::Owned(
            s.chars()
                .filter(|&c| !matches!(c as u32, 0x00..=0x08 | 0x0B..=0x0C | 0x0E..=0x1F | 0x7F))
                .collect(),
        )
    } else {
        Cow::Borrowed(s)
    }
}

#[must_use]
fn severity_badge(severity: Severity) -> String {
    let label = format!(" {} {} ", severity.emoji(), severity.to_string().to_uppercase());
    match severity {
        Severity::Danger => label.on_red().white().bold().to_string(),
        Severity::Warning => label.on_yellow().black().bold().to_string(),
        Severity::Info => label.on_blue().white().to_string(),
    }
}
