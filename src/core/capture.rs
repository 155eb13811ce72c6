//! Screen recording and screenshots through ffmpeg.
//!
//! Independent of the metrics pipeline. The only lifecycle promise is that a
//! started recording is always stopped, at the latest when the recorder is
//! dropped.

use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use crate::core::config::RecordingSettings;
use crate::error::{HostmonError, Result};

/// Locate ffmpeg on the PATH
pub fn find_ffmpeg() -> Result<PathBuf> {
    which::which("ffmpeg")
        .map_err(|e| HostmonError::capture(format!("ffmpeg not found in PATH: {}", e)))
}

/// ffmpeg input format and device for the local screen
fn grab_input() -> (&'static str, String) {
    #[cfg(windows)]
    {
        ("gdigrab", "desktop".to_string())
    }
    #[cfg(not(windows))]
    {
        (
            "x11grab",
            std::env::var("DISPLAY").unwrap_or_else(|_| ":0.0".to_string()),
        )
    }
}

pub fn recording_args(
    settings: &RecordingSettings,
    format: &str,
    input: &str,
    output: &Path,
) -> Vec<OsString> {
    vec![
        "-video_size".into(),
        settings.monitor_resolution.clone().into(),
        "-framerate".into(),
        settings.fps.to_string().into(),
        "-f".into(),
        format.into(),
        "-i".into(),
        input.into(),
        output.as_os_str().to_owned(),
    ]
}

pub fn screenshot_args(
    settings: &RecordingSettings,
    format: &str,
    input: &str,
    output: &Path,
) -> Vec<OsString> {
    vec![
        "-loglevel".into(),
        "error".into(),
        "-video_size".into(),
        settings.monitor_resolution.clone().into(),
        "-f".into(),
        format.into(),
        "-i".into(),
        input.into(),
        "-frames:v".into(),
        "1".into(),
        "-y".into(),
        output.as_os_str().to_owned(),
    ]
}

pub fn recording_file_name(settings: &RecordingSettings, now: chrono::NaiveDateTime) -> String {
    format!(
        "output_{}.{}",
        now.format("%Y-%m-%d_%H-%M-%S"),
        settings.video_format
    )
}

pub fn screenshot_file_name(unix_secs: i64) -> String {
    format!("screenshot_{}.png", unix_secs)
}

/// Records the screen into `<output_dir>/output_<timestamp>.<ext>`
pub struct ScreenRecorder {
    settings: RecordingSettings,
    output_dir: PathBuf,
    child: Option<Child>,
    output: Option<PathBuf>,
}

impl ScreenRecorder {
    pub fn new(settings: RecordingSettings, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            settings,
            output_dir: output_dir.into(),
            child: None,
            output: None,
        }
    }

    pub fn is_recording(&self) -> bool {
        self.child.is_some()
    }

    /// Spawn ffmpeg. Fails if a recording is already running.
    pub fn start(&mut self) -> Result<PathBuf> {
        if self.is_recording() {
            return Err(HostmonError::capture("Recording already in progress"));
        }

        let ffmpeg = find_ffmpeg()?;
        fs::create_dir_all(&self.output_dir)?;
        let output = self.output_dir.join(recording_file_name(
            &self.settings,
            chrono::Local::now().naive_local(),
        ));

        let (format, input) = grab_input();
        log::info!("Starting recording...");
        log::info!("Output Path: {}", output.display());

        let child = Command::new(ffmpeg)
            .args(recording_args(&self.settings, format, &input, &output))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| HostmonError::capture(format!("Failed to start ffmpeg: {}", e)))?;

        self.child = Some(child);
        self.output = Some(output.clone());
        log::info!("Recording process started.");
        Ok(output)
    }

    /// Ask ffmpeg to finish the file and wait for it. No-op when idle.
    pub fn stop(&mut self) -> Result<Option<PathBuf>> {
        let Some(mut child) = self.child.take() else {
            return Ok(None);
        };
        let output = self.output.take();

        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(b"q").and_then(|_| stdin.flush()) {
                Ok(()) => {}
                // ffmpeg already exited
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {}
                Err(e) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(e.into());
                }
            }
        }

        child.wait()?;
        log::info!("Stop Recording");
        Ok(output)
    }
}

impl Drop for ScreenRecorder {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            log::warn!("Failed to stop recording: {}", e);
        }
    }
}

/// Single-frame captures into `<output_dir>/screenshot_<unix>.png`
pub struct Screenshot {
    settings: RecordingSettings,
    output_dir: PathBuf,
}

impl Screenshot {
    pub fn new(settings: RecordingSettings, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            settings,
            output_dir: output_dir.into(),
        }
    }

    pub fn take(&self) -> Result<PathBuf> {
        let ffmpeg = find_ffmpeg()?;
        fs::create_dir_all(&self.output_dir)?;
        let path = self
            .output_dir
            .join(screenshot_file_name(chrono::Utc::now().timestamp()));

        let (format, input) = grab_input();
        let result = Command::new(ffmpeg)
            .args(screenshot_args(&self.settings, format, &input, &path))
            .stdin(Stdio::null())
            .output()
            .map_err(|e| HostmonError::capture(format!("Failed to run ffmpeg: {}", e)))?;

        if !result.status.success() {
            return Err(HostmonError::capture(format!(
                "Failed to capture screenshot: {}",
                String::from_utf8_lossy(&result.stderr).trim()
            )));
        }

        log::info!("Screenshot taken.");
        Ok(path)
    }
}
