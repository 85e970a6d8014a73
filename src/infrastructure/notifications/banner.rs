use std::sync::Arc;

use chrono::Utc;

use crate::domain::entities::banner::BannerBoard;
use crate::domain::entities::notification::Notification;
use crate::domain::ports::notifier::{NotificationError, Notifier, TonePlayer};
use crate::domain::value_objects::tone::Tone;

/// Posts banners to the shared alert area and plays the matching tone
pub struct BannerNotifier {
    board: Arc<BannerBoard>,
    tone: Arc<dyn TonePlayer>,
}

impl BannerNotifier {
    #[must_use]
    pub fn new(board: Arc<BannerBoard>, tone: Arc<dyn TonePlayer>) -> Self {
        Self { board, tone }
    }
}

impl Notifier for BannerNotifier {
    fn notify(&self, notification: &Notification) -> Result<(), NotificationError> {
        let Notification::Banner { message, severity } = notification else {
            return Ok(());
        };

        let id = self.board.raise(message, *severity, Utc::now());
        tracing::debug!(id, %severity, "banner raised");
        self.tone.play(Tone::for_severity(*severity))
    }
}

/// Tone player that stays silent
pub struct SilentTonePlayer;

impl TonePlayer for SilentTonePlayer {
    fn play(&self, _tone: Tone) -> Result<(), NotificationError> {
        Ok(())
    }
}
