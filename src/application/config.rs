use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::entities::banner::DEFAULT_BANNER_TTL_MS;
use crate::domain::value_objects::alert_rules::AlertRules;

/// Top-level application configuration loaded from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub rules: RulesConfig,
    #[serde(default)]
    pub speech: SpeechConfig,
    #[serde(default)]
    pub tone: ToneConfig,
    #[serde(default)]
    pub banner: BannerConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
}

/// Backend endpoint and poll cadence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
    #[serde(default = "default_true")]
    pub drop_stale_responses: bool,
}

/// Alert rules applied to every snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(default = "default_object_threshold")]
    pub object_threshold: u32,
    #[serde(default)]
    pub watched_classes: Vec<String>,
    #[serde(default = "default_true")]
    pub motion_alert_enabled: bool,
    #[serde(default = "default_true")]
    pub voice_enabled: bool,
}

/// Voice engine invoked for spoken announcements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    #[serde(default = "default_speech_command")]
    pub command: String,
}

/// Audio player fed with synthesized alert tones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToneConfig {
    #[serde(default = "default_tone_command")]
    pub command: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerConfig {
    #[serde(default = "default_banner_ttl")]
    pub ttl_ms: u64,
}

/// Extra output channels: terminal lines, desktop popups, log file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    #[serde(default = "default_true")]
    pub terminal: bool,
    #[serde(default)]
    pub desktop: bool,
    #[serde(default)]
    pub log_file: Option<String>,
}

// --- Defaults ---

fn default_endpoint() -> String {
    "http://127.0.0.1:5000".into()
}

const fn default_poll_interval() -> u64 {
    500
}

const fn default_request_timeout() -> u64 {
    2_000
}

const fn default_true() -> bool {
    true
}

const fn default_object_threshold() -> u32 {
    5
}

fn default_speech_command() -> String {
    crate::infrastructure::notifications::speech::DEFAULT_SPEECH_COMMAND.into()
}

fn default_tone_command() -> String {
    crate::infrastructure::notifications::tone::DEFAULT_TONE_COMMAND.into()
}

const fn default_banner_ttl() -> u64 {
    DEFAULT_BANNER_TTL_MS.unsigned_abs()
}

// --- Default impls ---

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            poll_interval_ms: default_poll_interval(),
            request_timeout_ms: default_request_timeout(),
            drop_stale_responses: default_true(),
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            object_threshold: default_object_threshold(),
            watched_classes: Vec::new(),
            motion_alert_enabled: default_true(),
            voice_enabled: default_true(),
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            command: default_speech_command(),
        }
    }
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            command: default_tone_command(),
            enabled: default_true(),
        }
    }
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            ttl_ms: default_banner_ttl(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            terminal: default_true(),
            desktop: false,
            log_file: None,
        }
    }
}

impl GeneralConfig {
    /// Poll period, never shorter than 1 ms
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        if self.poll_interval_ms == 0 {
            Duration::from_millis(1)
        } else {
            Duration::from_millis(self.poll_interval_ms)
        }
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

// --- AppConfig methods ---

impl AppConfig {
    /// Load config from default path or create default config file
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined,
    /// the file cannot be read, or the TOML content is invalid.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_or_create(&path)
    }

    /// Load from a specific path, or create a default config file if missing
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is invalid,
    /// or the default config file cannot be written.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            tracing::info!("Created default config at {}", path.display());
            Ok(config)
        }
    }

    /// Load from a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML content is invalid.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content).context("Failed to parse config file")
    }

    /// Save config to a specific path, creating parent directories if needed
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created,
    /// serialization fails, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Default location: `<config dir>/lookout/config.toml`
    ///
    /// # Errors
    ///
    /// Returns an error if the platform has no config directory.
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join("lookout").join("config.toml"))
    }
}

impl From<&RulesConfig> for AlertRules {
    fn from(config: &RulesConfig) -> Self {
        let watched_classes: BTreeSet<String> = config
            .watched_classes
            .iter()
            .map(|class| class.trim())
            .filter(|class| !class.is_empty())
            .map(str::to_string)
            .collect();

        Self {
            object_threshold: config.object_threshold,
            watched_classes,
            motion_alert_enabled: config.motion_alert_enabled,
            voice_enabled: config.voice_enabled,
        }
    }
}
