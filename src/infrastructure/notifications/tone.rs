use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

use crate::domain::ports::notifier::{NotificationError, TonePlayer};
use crate::domain::value_objects::tone::Tone;

pub const DEFAULT_TONE_COMMAND: &str = "aplay";
pub const SAMPLE_RATE: u32 = 22_050;
const AMPLITUDE: f64 = 0.4;
const FADE_SAMPLES: usize = 220;

/// Render `tone` as a 16-bit mono PCM WAV file
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn synthesize_wav(tone: Tone, sample_rate: u32) -> Vec<u8> {
    let sample_count = (u128::from(sample_rate) * tone.duration.as_millis() / 1000) as usize;
    let data_len = (sample_count * 2) as u32;

    let mut wav = Vec::with_capacity(44 + sample_count * 2);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&1u16.to_le_bytes()); // mono
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&(sample_rate * 2).to_le_bytes());
    wav.extend_from_slice(&2u16.to_le_bytes());
    wav.extend_from_slice(&16u16.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());

    let step = std::f64::consts::TAU * f64::from(tone.frequency_hz) / f64::from(sample_rate);
    for i in 0..sample_count {
        // short linear ramps avoid clicks at both ends
        let edge = i.min(sample_count - 1 - i);
        let envelope = (edge as f64 / FADE_SAMPLES as f64).min(1.0);
        let value = (step * i as f64).sin() * AMPLITUDE * envelope;
        let sample = (value * f64::from(i16::MAX)) as i16;
        wav.extend_from_slice(&sample.to_le_bytes());
    }
    wav
}

/// Plays tones by piping a WAV file into an audio player (`aplay -q -`).
/// Every call spawns its own player and reaps it when playback ends.
pub struct CommandTonePlayer {
    program: String,
    args: Vec<String>,
}

impl CommandTonePlayer {
    #[must_use]
    pub fn new(program: &str, args: Vec<String>) -> Self {
        Self {
            program: program.to_string(),
            args,
        }
    }

    #[must_use]
    pub fn aplay(program: &str) -> Self {
        Self::new(program, vec!["-q".to_string(), "-".to_string()])
    }
}

impl TonePlayer for CommandTonePlayer {
    fn play(&self, tone: Tone) -> Result<(), NotificationError> {
        let spawned = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(program = %self.program, "audio player not installed, skipping tone");
                return Ok(());
            }
            Err(e) => {
                return Err(NotificationError::ChannelUnavailable(format!(
                    "failed to start audio player: {e}"
                )))
            }
        };

        let wav = synthesize_wav(tone, SAMPLE_RATE);
        let stdin = child.stdin.take();
        std::thread::spawn(move || {
            if let Some(mut stdin) = stdin {
                if let Err(e) = stdin.write_all(&wav) {
                    tracing::debug!("tone playback interrupted: {e}");
                }
            }
            let _ = child.wait();
        });
        Ok(())
    }
}
