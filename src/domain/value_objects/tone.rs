use std::time::Duration;

use super::severity::Severity;

/// Frequency used for `Danger` banners
pub const DANGER_FREQUENCY_HZ: u32 = 800;
/// Frequency used for every other severity
pub const DEFAULT_FREQUENCY_HZ: u32 = 400;
/// Length of every alert tone
pub const TONE_DURATION: Duration = Duration::from_millis(200);

/// A short sine tone played alongside a banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tone {
    pub frequency_hz: u32,
    pub duration: Duration,
}

impl Tone {
    #[must_use]
    pub const fn for_severity(severity: Severity) -> Self {
        let frequency_hz = match severity {
            Severity::Danger => DANGER_FREQUENCY_HZ,
            Severity::Info | Severity::Warning => DEFAULT_FREQUENCY_HZ,
        };
        Self {
            frequency_hz,
            duration: TONE_DURATION,
        }
    }
}
