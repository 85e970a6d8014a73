use serde::{Deserialize, Serialize};

use crate::domain::value_objects::severity::Severity;

/// Side effect requested by the alert evaluator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Notification {
    /// Spoken announcement
    Speech { text: String },
    /// Visual banner, accompanied by a tone of the same severity
    Banner { message: String, severity: Severity },
}

impl Notification {
    #[must_use]
    pub fn speech(text: impl Into<String>) -> Self {
        Self::Speech { text: text.into() }
    }

    #[must_use]
    pub fn banner(message: impl Into<String>, severity: Severity) -> Self {
        Self::Banner {
            message: message.into(),
            severity,
        }
    }

    /// Text carried by the notification, whatever its kind
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Speech { text } => text,
            Self::Banner { message, .. } => message,
        }
    }
}
