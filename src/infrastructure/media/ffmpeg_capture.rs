//! FFmpeg-based capture adapter
//!
//! Records the default input device straight into an MP3 file. The capture
//! runs until `stop_capture` interrupts ffmpeg, which then finalizes the file.
//! `stop_capture` returns only after ffmpeg has exited.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncReadExt;
use tokio::process::{Child, Command};
use tokio::sync::{oneshot, Mutex};
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::application::ports::{Completion, MediaCapture};
use crate::domain::config::{
    AppConfig, DEFAULT_BITRATE, DEFAULT_INPUT_DEVICE, DEFAULT_INPUT_FORMAT,
};
use crate::domain::error::CaptureError;
use crate::domain::recording::RecordingLocation;

/// Capture sample rate (Hz)
const SAMPLE_RATE: &str = "44100";

/// How long an interrupted ffmpeg may take to finalize before it is killed
const STOP_GRACE: Duration = Duration::from_secs(5);

/// Stop request carrying the acknowledgement sent once ffmpeg has exited
type StopRequest = oneshot::Sender<()>;

/// Input and encoder settings for ffmpeg
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FfmpegSettings {
    pub input_format: String,
    pub input_device: String,
    pub bitrate: String,
}

impl FfmpegSettings {
    /// Settings from the merged app config
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            input_format: config.input_format_or_default().to_string(),
            input_device: config.input_device_or_default().to_string(),
            bitrate: config.bitrate_or_default().to_string(),
        }
    }
}

impl Default for FfmpegSettings {
    fn default() -> Self {
        Self {
            input_format: DEFAULT_INPUT_FORMAT.to_string(),
            input_device: DEFAULT_INPUT_DEVICE.to_string(),
            bitrate: DEFAULT_BITRATE.to_string(),
        }
    }
}

/// FFmpeg capture, one recording at a time
pub struct FfmpegCapture {
    settings: FfmpegSettings,
    /// Stop request channel to the running capture's watcher
    active: Arc<Mutex<Option<oneshot::Sender<StopRequest>>>>,
}

impl FfmpegCapture {
    /// Create a new FFmpeg capture
    pub fn new(settings: FfmpegSettings) -> Self {
        Self {
            settings,
            active: Arc::new(Mutex::new(None)),
        }
    }

    /// Build FFmpeg args for recording
    fn build_ffmpeg_args(settings: &FfmpegSettings, output_path: &Path) -> Vec<String> {
        vec![
            "-hide_banner".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            "-f".to_string(),
            settings.input_format.clone(),
            "-i".to_string(),
            settings.input_device.clone(),
            "-ac".to_string(),
            "1".to_string(), // Mono
            "-ar".to_string(),
            SAMPLE_RATE.to_string(),
            "-c:a".to_string(),
            "libmp3lame".to_string(),
            "-b:a".to_string(),
            settings.bitrate.clone(),
            "-y".to_string(), // Overwrite output
            output_path.to_string_lossy().to_string(),
        ]
    }

    /// Spawn FFmpeg process
    fn spawn_ffmpeg(args: &[String]) -> Result<Child, CaptureError> {
        let mut command = Command::new("ffmpeg");
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        // Keep terminal Ctrl+C away from ffmpeg; the screen stops it itself
        #[cfg(unix)]
        command.process_group(0);

        command
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    CaptureError::FfmpegNotFound
                } else {
                    CaptureError::StartFailed(e.to_string())
                }
            })
    }

    /// Ask FFmpeg to finish writing and exit
    #[cfg(unix)]
    fn interrupt(child: &mut Child) -> Result<(), CaptureError> {
        use nix::sys::signal::{self, Signal};
        use nix::unistd::Pid;

        if let Some(id) = child.id() {
            signal::kill(Pid::from_raw(id as i32), Signal::SIGINT)
                .map_err(|e| CaptureError::StopFailed(format!("Signal failed: {}", e)))?;
        }
        Ok(())
    }

    #[cfg(not(unix))]
    fn interrupt(child: &mut Child) -> Result<(), CaptureError> {
        child
            .start_kill()
            .map_err(|e| CaptureError::StopFailed(e.to_string()))
    }

    /// Last line FFmpeg wrote to stderr
    async fn stderr_tail(child: &mut Child) -> String {
        let mut buf = Vec::new();
        if let Some(mut stderr) = child.stderr.take() {
            let _ = stderr.read_to_end(&mut buf).await;
        }
        String::from_utf8_lossy(&buf)
            .lines()
            .last()
            .unwrap_or("unknown error")
            .to_string()
    }

    /// Turn the FFmpeg exit into a capture result
    async fn capture_result(
        child: &mut Child,
        status: std::io::Result<ExitStatus>,
        stop_requested: bool,
        output_path: &Path,
    ) -> Result<(), CaptureError> {
        let status =
            status.map_err(|e| CaptureError::Failed(format!("FFmpeg failed: {}", e)))?;

        // An interrupted ffmpeg exits non-zero even when the file is complete
        if !status.success() && !stop_requested {
            let tail = Self::stderr_tail(child).await;
            return Err(CaptureError::Failed(format!(
                "FFmpeg exited with error: {}",
                tail
            )));
        }

        let size = fs::metadata(output_path)
            .await
            .map(|m| m.len())
            .unwrap_or(0);
        if size == 0 {
            return Err(CaptureError::Failed("Recording file is empty".to_string()));
        }
        Ok(())
    }

    /// Interrupt FFmpeg and wait for it to finalize the file
    async fn finish(child: &mut Child, output_path: &Path) -> Result<(), CaptureError> {
        if let Err(e) = Self::interrupt(child) {
            let _ = child.kill().await;
            return Err(e);
        }
        match timeout(STOP_GRACE, child.wait()).await {
            Ok(status) => Self::capture_result(child, status, true, output_path).await,
            Err(_) => {
                warn!(path = %output_path.display(), "FFmpeg did not exit after interrupt, killing");
                let _ = child.kill().await;
                Err(CaptureError::StopFailed(
                    "FFmpeg did not finish writing in time".to_string(),
                ))
            }
        }
    }

    /// Own the FFmpeg process until it exits, then report once
    async fn watch(
        mut child: Child,
        stop_rx: oneshot::Receiver<StopRequest>,
        output_path: PathBuf,
        done_tx: oneshot::Sender<Result<(), CaptureError>>,
    ) {
        let (result, ack) = tokio::select! {
            status = child.wait() => {
                (Self::capture_result(&mut child, status, false, &output_path).await, None)
            }
            request = stop_rx => {
                (Self::finish(&mut child, &output_path).await, request.ok())
            }
        };
        debug!(path = %output_path.display(), ok = result.is_ok(), "FFmpeg exited");
        let _ = done_tx.send(result);
        if let Some(ack) = ack {
            let _ = ack.send(());
        }
    }
}

impl Default for FfmpegCapture {
    fn default() -> Self {
        Self::new(FfmpegSettings::default())
    }
}

#[async_trait]
impl MediaCapture for FfmpegCapture {
    async fn start_capture(
        &self,
        location: &RecordingLocation,
    ) -> Result<Completion<CaptureError>, CaptureError> {
        let mut active = self.active.lock().await;
        // A closed sender means the previous watcher has already finished
        if active.as_ref().is_some_and(|tx| !tx.is_closed()) {
            return Err(CaptureError::StartFailed(
                "Capture already in progress".to_string(),
            ));
        }

        let output_path = location.path().to_path_buf();
        let args = Self::build_ffmpeg_args(&self.settings, &output_path);
        let child = Self::spawn_ffmpeg(&args)?;

        let (stop_tx, stop_rx) = oneshot::channel();
        let (done_tx, done_rx) = oneshot::channel();
        tokio::spawn(Self::watch(child, stop_rx, output_path, done_tx));

        *active = Some(stop_tx);
        Ok(done_rx)
    }

    async fn stop_capture(&self) -> Result<(), CaptureError> {
        let stop_tx = self
            .active
            .lock()
            .await
            .take()
            .ok_or(CaptureError::NotCapturing)?;

        let (ack_tx, ack_rx) = oneshot::channel();
        stop_tx
            .send(ack_tx)
            .map_err(|_| CaptureError::NotCapturing)?;

        // The watcher acknowledges after ffmpeg exits; a dropped ack means it is gone too
        let _ = ack_rx.await;
        Ok(())
    }
}
