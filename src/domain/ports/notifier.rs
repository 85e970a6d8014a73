use thiserror::Error;

use crate::domain::entities::notification::Notification;
use crate::domain::value_objects::tone::Tone;

#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("failed to send notification: {0}")]
    SendFailed(String),
    #[error("notification channel unavailable: {0}")]
    ChannelUnavailable(String),
}

pub trait Notifier: Send + Sync {
    /// Deliver a notification. Sinks ignore the kinds they do not handle.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError` if the notification fails to send
    /// or the channel is unavailable.
    fn notify(&self, notification: &Notification) -> Result<(), NotificationError>;
}

pub trait TonePlayer: Send + Sync {
    /// Play a short tone. Each call owns its own audio pipeline.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError` if the audio pipeline cannot be set up.
    fn play(&self, tone: Tone) -> Result<(), NotificationError>;
}
