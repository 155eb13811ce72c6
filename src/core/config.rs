use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{HostmonError, Result};

/// Settings file used when none is given on the command line
pub const DEFAULT_SETTINGS_PATH: &str = "data_storage/settings/settings.json";

pub const DEFAULT_CPU_INTERVAL_SECS: f64 = 0.1;

/// User settings, persisted as JSON. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seconds the CPU load measurement observes the cores
    pub cpu_percent_interval: f64,
    pub video_format: String,
    pub fps: u32,
    pub monitor_resolution: String,
    /// Kept for the settings file; the terminal has no always-on-top mode
    pub topmost: String,
    pub start_recording: String,
    pub minimalize: String,
    pub screenshot: String,
    /// Delay between two display refreshes
    pub refresh_interval_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cpu_percent_interval: DEFAULT_CPU_INTERVAL_SECS,
            video_format: "mp4".to_string(),
            fps: 30,
            monitor_resolution: "1920x1080".to_string(),
            topmost: "<Control-t>".to_string(),
            start_recording: "<Control-r>".to_string(),
            minimalize: "<Control-m>".to_string(),
            screenshot: "<Control-s>".to_string(),
            refresh_interval_ms: 1000,
        }
    }
}

impl Settings {
    /// Load settings, falling back to defaults when the file is missing or
    /// unreadable. Never fails.
    pub fn load_from(path: &Path) -> Self {
        match Self::try_load_from(path) {
            Ok(settings) => settings,
            Err(HostmonError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("Settings file not found: {}", path.display());
                Settings::default()
            }
            Err(e) => {
                log::warn!(
                    "Error reading settings file {}: {}; using defaults",
                    path.display(),
                    e
                );
                Settings::default()
            }
        }
    }

    pub fn try_load_from(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data)?;
        Ok(())
    }

    pub fn poll_config(&self) -> Result<PollConfig> {
        PollConfig::from_secs(self.cpu_percent_interval)
    }

    /// Poll configuration, or the default one if the stored interval is invalid
    pub fn poll_config_or_default(&self) -> PollConfig {
        self.poll_config().unwrap_or_else(|e| {
            log::warn!("{}; using {}s", e, DEFAULT_CPU_INTERVAL_SECS);
            PollConfig::default()
        })
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms.max(1))
    }

    pub fn recording(&self) -> RecordingSettings {
        RecordingSettings {
            video_format: self.video_format.clone(),
            fps: self.fps,
            monitor_resolution: self.monitor_resolution.clone(),
        }
    }

    pub fn key_bindings(&self) -> KeyBindings {
        KeyBindings {
            start_recording: KeyBinding::parse(&self.start_recording),
            minimalize: KeyBinding::parse(&self.minimalize),
            screenshot: KeyBinding::parse(&self.screenshot),
        }
    }
}

/// Make sure a usable settings file exists at `path`.
///
/// A missing file or one holding invalid JSON is (re)written with the
/// defaults. Returns `true` only when the file already existed and holds
/// exactly the defaults.
pub fn ensure_settings_file(path: &Path) -> Result<bool> {
    let defaults = Settings::default();

    if !path.is_file() {
        defaults.save_to(path)?;
        return Ok(false);
    }

    let data = fs::read_to_string(path)?;
    match serde_json::from_str::<serde_json::Value>(&data) {
        Ok(value) => Ok(value == serde_json::to_value(&defaults)?),
        Err(e) => {
            log::warn!(
                "Invalid JSON in settings file {}: {}; restoring defaults",
                path.display(),
                e
            );
            defaults.save_to(path)?;
            Ok(false)
        }
    }
}

pub fn default_settings_path() -> PathBuf {
    PathBuf::from(DEFAULT_SETTINGS_PATH)
}

/// Sampling parameters handed to the CPU sensor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PollConfig {
    cpu_interval: Duration,
}

impl PollConfig {
    /// Interval must be a positive, finite number of seconds
    pub fn from_secs(secs: f64) -> Result<Self> {
        if !secs.is_finite() || secs <= 0.0 {
            return Err(HostmonError::config(format!(
                "cpu_percent_interval must be > 0, got {}",
                secs
            )));
        }
        Ok(Self {
            cpu_interval: Duration::from_secs_f64(secs),
        })
    }

    pub fn cpu_interval(&self) -> Duration {
        self.cpu_interval
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            cpu_interval: Duration::from_secs_f64(DEFAULT_CPU_INTERVAL_SECS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingSettings {
    pub video_format: String,
    pub fps: u32,
    pub monitor_resolution: String,
}

impl Default for RecordingSettings {
    fn default() -> Self {
        Settings::default().recording()
    }
}

/// A single key chord such as `<Control-t>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub ctrl: bool,
    pub key: char,
}

impl KeyBinding {
    /// Parse `<Control-x>`, `<x>` or a bare `x`. Letters are matched
    /// case-insensitively and stored lowercase.
    pub fn parse(chord: &str) -> Option<Self> {
        let chord = chord.trim();
        let inner = chord
            .strip_prefix('<')
            .and_then(|s| s.strip_suffix('>'))
            .unwrap_or(chord);

        let (ctrl, key) = match inner.rsplit_once('-') {
            Some((modifier, key)) => {
                let ctrl = matches!(modifier.to_ascii_lowercase().as_str(), "control" | "ctrl");
                if !ctrl {
                    return None;
                }
                (true, key)
            }
            None => (false, inner),
        };

        let mut chars = key.chars();
        let c = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        Some(Self {
            ctrl,
            key: c.to_ascii_lowercase(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyBindings {
    pub start_recording: Option<KeyBinding>,
    pub minimalize: Option<KeyBinding>,
    pub screenshot: Option<KeyBinding>,
}
