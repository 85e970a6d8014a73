use std::io::ErrorKind;
use std::process::{Child, Command, Stdio};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::entities::notification::Notification;
use crate::domain::ports::notifier::{NotificationError, Notifier};

/// Default voice engine binary
pub const DEFAULT_SPEECH_COMMAND: &str = "espeak-ng";

/// Voice parameters, relative to the engine defaults (1.0 = unchanged)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceSettings {
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
    pub locale: &'static str,
}

pub const VOICE: VoiceSettings = VoiceSettings {
    rate: 1.0,
    pitch: 1.0,
    volume: 1.0,
    locale: "en-US",
};

impl VoiceSettings {
    /// Arguments understood by espeak / espeak-ng
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn espeak_args(&self) -> Vec<String> {
        // espeak defaults: 175 wpm, pitch 50, amplitude 100
        let words_per_minute = (175.0 * self.rate).round().max(80.0) as u32;
        let pitch = (50.0 * self.pitch).round().clamp(0.0, 99.0) as u32;
        let amplitude = (100.0 * self.volume).round().clamp(0.0, 200.0) as u32;
        vec![
            "-v".to_string(),
            self.locale.to_lowercase(),
            "-s".to_string(),
            words_per_minute.to_string(),
            "-p".to_string(),
            pitch.to_string(),
            "-a".to_string(),
            amplitude.to_string(),
        ]
    }
}

/// Program and leading arguments; the text is passed as the last argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl SpeechCommand {
    #[must_use]
    pub fn espeak(program: &str) -> Self {
        Self {
            program: program.to_string(),
            args: VOICE.espeak_args(),
        }
    }
}

/// Speaks announcements through an external voice engine.
///
/// At most one utterance is audible: a new request kills the one in flight.
/// A missing engine binary turns every call into a no-op.
pub struct SpeechNotifier {
    command: SpeechCommand,
    enabled: bool,
    current: Mutex<Option<Child>>,
}

impl SpeechNotifier {
    #[must_use]
    pub const fn new(command: SpeechCommand, enabled: bool) -> Self {
        Self {
            command,
            enabled,
            current: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn espeak(program: &str, enabled: bool) -> Self {
        Self::new(SpeechCommand::espeak(program), enabled)
    }

    fn lock(&self) -> MutexGuard<'_, Option<Child>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// PID of the utterance still playing, if any
    #[must_use]
    pub fn in_flight(&self) -> Option<u32> {
        let mut current = self.lock();
        match current.as_mut().map(Child::try_wait) {
            Some(Ok(None)) => current.as_ref().map(Child::id),
            Some(_) => {
                *current = None;
                None
            }
            None => None,
        }
    }

    /// Speak `text`, cancelling whatever is being spoken.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError::SendFailed` if the engine exists but
    /// cannot be started.
    pub fn speak(&self, text: &str) -> Result<(), NotificationError> {
        if !self.enabled {
            return Ok(());
        }

        let mut current = self.lock();
        if let Some(previous) = current.take() {
            cancel(previous);
        }

        let spawned = Command::new(&self.command.program)
            .args(&self.command.args)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            Ok(child) => {
                tracing::debug!(pid = child.id(), %text, "speaking");
                *current = Some(child);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(
                    program = %self.command.program,
                    "voice engine not installed, skipping announcement"
                );
                Ok(())
            }
            Err(e) => Err(NotificationError::SendFailed(format!(
                "failed to start voice engine: {e}"
            ))),
        }
    }
}

fn cancel(mut child: Child) {
    if matches!(child.try_wait(), Ok(None)) {
        if let Err(e) = child.kill() {
            tracing::debug!("failed to cancel utterance: {e}");
        }
    }
    let _ = child.wait();
}

impl Drop for SpeechNotifier {
    fn drop(&mut self) {
        if let Some(child) = self.lock().take() {
            cancel(child);
        }
    }
}

impl Notifier for SpeechNotifier {
    fn notify(&self, notification: &Notification) -> Result<(), NotificationError> {
        match notification {
            Notification::Speech { text } => self.speak(text),
            Notification::Banner { .. } => Ok(()),
        }
    }
}
