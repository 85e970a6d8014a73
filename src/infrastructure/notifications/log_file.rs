use std::io::Write;
use std::path::PathBuf;

use chrono::Utc;

use crate::domain::entities::notification::Notification;
use crate::domain::ports::notifier::{NotificationError, Notifier};

/// Appends every notification to a JSON-lines file
pub struct LogFileNotifier {
    path: PathBuf,
}

impl LogFileNotifier {
    #[must_use]
    pub fn new(path: &str) -> Self {
        let expanded = shellexpand::tilde(path);
        Self {
            path: PathBuf::from(expanded.as_ref()),
        }
    }

    fn append_json_line(&self, value: &serde_json::Value) -> Result<(), NotificationError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                NotificationError::SendFailed(format!("cannot create log directory: {e}"))
            })?;
        }

        let json = serde_json::to_string(value)
            .map_err(|e| NotificationError::SendFailed(format!("JSON serialization failed: {e}")))?;

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| NotificationError::SendFailed(format!("cannot open log file: {e}")))?;

        writeln!(file, "{json}")
            .map_err(|e| NotificationError::SendFailed(format!("cannot write log file: {e}")))
    }
}

impl Notifier for LogFileNotifier {
    fn notify(&self, notification: &Notification) -> Result<(), NotificationError> {
        let mut entry = serde_json::to_value(notification)
            .map_err(|e| NotificationError::SendFailed(format!("JSON serialization failed: {e}")))?;
        if let Some(object) = entry.as_object_mut() {
            object.insert(
                "timestamp".to_string(),
                serde_json::Value::String(Utc::now().to_rfc3339()),
            );
        }
        self.append_json_line(&entry)
    }
}
