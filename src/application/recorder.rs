//! Recording session use case
//!
//! Sequences permission, output directory and the media facilities behind
//! the three screen operations: start, stop and play.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::domain::config::DEFAULT_DIRECTORY_NAME;
use crate::domain::error::{
    CaptureError, DirectoryError, PermissionError, PlaybackError, RecorderError,
};
use crate::domain::recording::RecordingLocation;
use crate::domain::session::{
    CaptureOutcome, Controls, RecorderSession, SessionSnapshot, Status,
};

use super::permission::PermissionGate;
use super::ports::{
    Capability, Clock, Completion, MediaCapture, MediaPlayer, NotificationIcon, Notifier,
    OutputDirectory, RecorderView,
};

/// Title used for desktop notifications
const NOTIFY_TITLE: &str = "Voice Recorder";

/// Configuration for the recorder
#[derive(Debug, Clone)]
pub struct RecorderConfig {
    /// Subdirectory of the output root that receives recordings
    pub directory_name: String,
    /// Whether alerts are also sent as desktop notifications
    pub enable_notify: bool,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            directory_name: DEFAULT_DIRECTORY_NAME.to_string(),
            enable_notify: false,
        }
    }
}

/// Result of a start request
#[derive(Debug, Clone)]
pub enum StartOutcome {
    /// Capture is running into the given location
    Started(RecordingLocation),
    /// A capture was already running or being set up
    AlreadyRecording,
    /// The start sequence failed before capture began
    Failed(RecorderError),
}

/// Result of a play request
#[derive(Debug, Clone)]
pub enum PlayOutcome {
    /// Playback of the given location has begun
    Playing(RecordingLocation),
    /// Nothing has been recorded yet
    NothingToPlay,
    /// The player refused to start
    Failed(PlaybackError),
}

/// Pushes session changes to the view and raises alerts.
/// Shared with completion watchers.
struct Feedback<V, N> {
    view: Arc<V>,
    notifier: Arc<N>,
    enable_notify: bool,
}

impl<V, N> Clone for Feedback<V, N> {
    fn clone(&self) -> Self {
        Self {
            view: Arc::clone(&self.view),
            notifier: Arc::clone(&self.notifier),
            enable_notify: self.enable_notify,
        }
    }
}

impl<V: RecorderView, N: Notifier> Feedback<V, N> {
    fn render(&self, session: &RecorderSession) {
        self.view.set_controls(session.controls());
        self.view.show_status(session.status());
    }

    fn status(&self, status: &Status) {
        self.view.show_status(status);
    }

    async fn alert(&self, message: &str) {
        self.view.alert(message);
        self.notify(message, NotificationIcon::Error).await;
    }

    async fn notify(&self, message: &str, icon: NotificationIcon) {
        if !self.enable_notify {
            return;
        }
        if let Err(e) = self.notifier.notify(NOTIFY_TITLE, message, icon).await {
            debug!(error = %e, ?icon, "Notification not shown");
        }
    }
}

/// Recording session controller
pub struct RecordingSessionController<D, M, P, V, N>
where
    D: OutputDirectory,
    M: MediaCapture,
    P: MediaPlayer,
    V: RecorderView,
    N: Notifier,
{
    directory: D,
    permissions: PermissionGate,
    capture: M,
    player: P,
    clock: Box<dyn Clock>,
    feedback: Feedback<V, N>,
    session: Arc<Mutex<RecorderSession>>,
    watchers: Mutex<JoinSet<()>>,
    config: RecorderConfig,
}

impl<D, M, P, V, N> RecordingSessionController<D, M, P, V, N>
where
    D: OutputDirectory,
    M: MediaCapture,
    P: MediaPlayer,
    V: RecorderView + 'static,
    N: Notifier + 'static,
{
    /// Create a new controller in idle state
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        directory: D,
        permissions: PermissionGate,
        capture: M,
        player: P,
        view: Arc<V>,
        notifier: N,
        clock: Box<dyn Clock>,
        config: RecorderConfig,
    ) -> Self {
        Self {
            directory,
            permissions,
            capture,
            player,
            clock,
            feedback: Feedback {
                view,
                notifier: Arc::new(notifier),
                enable_notify: config.enable_notify,
            },
            session: Arc::new(Mutex::new(RecorderSession::new())),
            watchers: Mutex::new(JoinSet::new()),
            config,
        }
    }

    /// Push the current controls and status to the view
    pub async fn present(&self) {
        let session = self.session.lock().await;
        self.feedback.render(&session);
    }

    /// Copy of the current session state
    pub async fn snapshot(&self) -> SessionSnapshot {
        self.session.lock().await.snapshot()
    }

    /// Check if currently recording
    pub async fn is_recording(&self) -> bool {
        self.session.lock().await.is_recording()
    }

    /// Resolve the output root and make sure the recordings subdirectory exists
    pub async fn ensure_output_directory(&self) -> Result<PathBuf, DirectoryError> {
        let root = self.directory.resolve_root().await?;
        let dir = self
            .directory
            .get_or_create_subdirectory(&root, &self.config.directory_name)
            .await?;
        debug!(path = %dir.display(), "Output directory ready");
        Ok(dir)
    }

    /// Make sure audio capture is permitted, asking the user if needed
    pub async fn ensure_capture_permission(&self) -> Result<(), PermissionError> {
        self.permissions.ensure(Capability::Microphone).await
    }

    /// Start a new recording.
    ///
    /// Permission is requested before the recording flag is checked, so a
    /// second start while recording still goes through the permission step.
    pub async fn start(&self) -> StartOutcome {
        let owns_start = self.session.lock().await.begin_start();

        if let Err(e) = self.ensure_capture_permission().await {
            return self.fail_start(owns_start, e.into()).await;
        }

        {
            let mut session = self.session.lock().await;
            if !owns_start || session.is_recording() {
                session.set_status(Status::AlreadyRecording);
                self.feedback.status(session.status());
                return StartOutcome::AlreadyRecording;
            }
            session.set_controls(Controls::RECORDING);
            self.feedback.view.set_controls(Controls::RECORDING);
        }

        let (location, completion) = match self.begin_capture().await {
            Ok(started) => started,
            Err(e) => return self.fail_start(true, e).await,
        };

        let generation = {
            let mut session = self.session.lock().await;
            let generation = session.capture_started(location.clone());
            self.feedback.render(&session);
            generation
        };
        info!(path = %location, generation, "Recording started");
        self.feedback
            .notify("Recording started", NotificationIcon::Recording)
            .await;

        self.watch_capture(generation, completion).await;
        StartOutcome::Started(location)
    }

    /// Stop the running recording.
    ///
    /// Returns false when nothing was recording, in which case nothing changes.
    pub async fn stop(&self) -> bool {
        let stopping = self.session.lock().await.begin_stop();
        let Some(generation) = stopping else {
            debug!("Stop ignored, no capture in progress");
            return false;
        };

        let result = self.capture.stop_capture().await;

        {
            let mut session = self.session.lock().await;
            session.finish_stop();
            self.feedback.render(&session);
        }

        match result {
            Ok(()) => info!(generation, "Recording stopped"),
            Err(e) => {
                warn!(generation, error = %e, "Capture did not stop cleanly");
                self.feedback
                    .alert(&format!("Error stopping recording: {}", e))
                    .await;
            }
        }
        true
    }

    /// Play back the most recent recording.
    ///
    /// Playback is not tracked: several playbacks may overlap and controls
    /// are left as they are.
    pub async fn play(&self) -> PlayOutcome {
        let location = {
            let mut session = self.session.lock().await;
            match session.last_recording().cloned() {
                Some(location) => location,
                None => {
                    session.set_status(Status::NothingToPlay);
                    self.feedback.status(session.status());
                    return PlayOutcome::NothingToPlay;
                }
            }
        };

        let completion = match self.player.play(&location).await {
            Ok(completion) => completion,
            Err(e) => {
                error!(path = %location, error = %e, "Playback failed");
                self.set_status(Status::PlaybackFailed).await;
                self.feedback
                    .alert(&format!("Playback failed: {}", e))
                    .await;
                return PlayOutcome::Failed(e);
            }
        };

        self.set_status(Status::Playing).await;
        self.watch_playback(location.clone(), completion).await;
        PlayOutcome::Playing(location)
    }

    /// Wait until every outstanding capture and playback completion has
    /// been handled.
    pub async fn settle(&self) {
        let mut watchers = self.watchers.lock().await;
        while let Some(joined) = watchers.join_next().await {
            if let Err(e) = joined {
                warn!(error = %e, "Completion watcher ended abnormally");
            }
        }
    }

    async fn begin_capture(
        &self,
    ) -> Result<(RecordingLocation, Completion<CaptureError>), RecorderError> {
        let dir = self.ensure_output_directory().await?;
        let location = RecordingLocation::at(&dir, self.clock.now_millis());
        debug!(path = %location, "Recording path");
        let completion = self.capture.start_capture(&location).await?;
        Ok((location, completion))
    }

    async fn fail_start(&self, owns_start: bool, err: RecorderError) -> StartOutcome {
        let message = err.to_string();
        error!(error = %message, "Recording error");
        {
            let mut session = self.session.lock().await;
            if owns_start {
                session.abort_start(message.clone());
                self.feedback.render(&session);
            } else {
                // Another start owns the session; report without touching its controls
                session.set_status(Status::Error(message.clone()));
                self.feedback.status(session.status());
            }
        }
        self.feedback
            .alert(&format!("Error starting recording: {}", message))
            .await;
        StartOutcome::Failed(err)
    }

    async fn set_status(&self, status: Status) {
        let mut session = self.session.lock().await;
        session.set_status(status);
        self.feedback.status(session.status());
    }

    async fn watch_capture(&self, generation: u64, completion: Completion<CaptureError>) {
        let session = Arc::clone(&self.session);
        let feedback = self.feedback.clone();

        self.spawn_watcher(async move {
            let result = completion.await.unwrap_or_else(|_| {
                Err(CaptureError::Failed(
                    "capture ended without reporting a result".to_string(),
                ))
            });
            let outcome = if result.is_ok() {
                CaptureOutcome::Saved
            } else {
                CaptureOutcome::Failed
            };

            let applied = {
                let mut session = session.lock().await;
                let applied = session.complete_capture(generation, outcome);
                if applied {
                    feedback.render(&session);
                }
                applied
            };

            match result {
                Ok(()) if applied => info!(generation, "Recording completed successfully"),
                Ok(()) => debug!(generation, "Ignoring stale capture completion"),
                Err(e) if applied => {
                    error!(generation, error = %e, "Recording failed");
                    feedback.alert(&format!("Recording failed: {}", e)).await;
                }
                Err(e) => warn!(generation, error = %e, "Superseded capture reported failure"),
            }
        })
        .await;
    }

    async fn watch_playback(
        &self,
        location: RecordingLocation,
        completion: Completion<PlaybackError>,
    ) {
        let session = Arc::clone(&self.session);
        let feedback = self.feedback.clone();

        self.spawn_watcher(async move {
            let result = completion.await.unwrap_or_else(|_| {
                Err(PlaybackError::Failed(
                    "playback ended without reporting a result".to_string(),
                ))
            });

            let status = if result.is_ok() {
                Status::PlaybackFinished
            } else {
                Status::PlaybackFailed
            };
            {
                let mut session = session.lock().await;
                session.set_status(status);
                feedback.status(session.status());
            }

            match result {
                Ok(()) => info!(path = %location, "Playback completed"),
                Err(e) => {
                    error!(path = %location, error = %e, "Playback failed");
                    feedback.alert(&format!("Playback failed: {}", e)).await;
                }
            }
        })
        .await;
    }

    async fn spawn_watcher<F>(&self, task: F)
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let mut watchers = self.watchers.lock().await;
        // Reap finished watchers so the set does not grow for the screen lifetime
        while watchers.try_join_next().is_some() {}
        watchers.spawn(task);
    }
}
