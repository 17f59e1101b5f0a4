//! Recorder screen runner

use std::env;
use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use crate::application::ports::{ConfigStore, Notifier, PermissionFacility};
use crate::application::{PermissionGate, RecorderConfig, RecordingSessionController};
use crate::domain::config::AppConfig;
use crate::infrastructure::{
    create_notifier, AnswerSlot, CpalCaptureProbe, DataDirectory, FfmpegCapture, RodioPlayer,
    SystemClock, TerminalPermissionPrompt, XdgConfigStore,
};

use super::args::ScreenOptions;
use super::presenter::Presenter;
use super::screen::{ScreenCommand, TerminalView};
use super::signals::ShutdownSignal;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Environment variable overriding the output root
pub const OUTPUT_ROOT_ENV: &str = "VOICE_RECORDER_OUTPUT_ROOT";

/// How long shutdown waits for outstanding completions
const SETTLE_TIMEOUT: Duration = Duration::from_secs(5);

type ScreenController = RecordingSessionController<
    DataDirectory,
    FfmpegCapture,
    RodioPlayer,
    TerminalView,
    Box<dyn Notifier>,
>;

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins unless `-v` was given.
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "voice_recorder=warn",
        1 => "voice_recorder=debug",
        _ => "voice_recorder=trace",
    };
    let filter = if verbosity > 0 {
        EnvFilter::new(level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Run the interactive recorder screen until quit, end of input or a
/// shutdown signal
pub async fn run_screen(options: ScreenOptions) -> ExitCode {
    let presenter = Arc::new(Presenter::new());

    let mut shutdown = match ShutdownSignal::listen() {
        Ok(signal) => signal,
        Err(e) => {
            presenter.error(&format!("Failed to setup signal handler: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let answers = AnswerSlot::new();
    let controller = Arc::new(build_controller(
        &options,
        Arc::clone(&presenter),
        answers.clone(),
    ));

    presenter.help();
    controller.present().await;

    let mut commands = JoinSet::new();
    let code = run_loop(
        &controller,
        &answers,
        &presenter,
        &mut shutdown,
        &mut commands,
    )
    .await;
    shut_down(&controller, commands).await;

    ExitCode::from(code)
}

fn build_controller(
    options: &ScreenOptions,
    presenter: Arc<Presenter>,
    answers: AnswerSlot,
) -> ScreenController {
    // A prompt needs someone at the keyboard to answer it
    let facility: Option<Box<dyn PermissionFacility>> =
        if options.permission_prompt && std::io::stdin().is_terminal() {
            Some(Box::new(TerminalPermissionPrompt::new(answers)))
        } else {
            debug!("No permission prompt, capture probe only");
            None
        };
    let permissions = PermissionGate::new(facility, Some(Box::new(CpalCaptureProbe::new())));

    let directory = match &options.output_root {
        Some(root) => DataDirectory::with_root(root.clone()),
        None => DataDirectory::new(),
    };

    RecordingSessionController::new(
        directory,
        permissions,
        FfmpegCapture::new(options.ffmpeg.clone()),
        RodioPlayer::new(),
        Arc::new(TerminalView::new(Arc::clone(&presenter))),
        create_notifier(options.notify),
        Box::new(SystemClock),
        RecorderConfig {
            directory_name: options.directory_name.clone(),
            enable_notify: options.notify,
        },
    )
}

/// Read commands from stdin and dispatch them
async fn run_loop(
    controller: &Arc<ScreenController>,
    answers: &AnswerSlot,
    presenter: &Presenter,
    shutdown: &mut ShutdownSignal,
    commands: &mut JoinSet<()>,
) -> u8 {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        while commands.try_join_next().is_some() {}

        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    // A waiting permission prompt gets the line first
                    let Some(line) = answers.offer(line) else {
                        continue;
                    };
                    if line.trim().is_empty() {
                        continue;
                    }
                    match line.parse::<ScreenCommand>() {
                        Ok(ScreenCommand::Quit) => return EXIT_SUCCESS,
                        Ok(command) => dispatch(controller, presenter, commands, command).await,
                        Err(e) => presenter.warn(&e.to_string()),
                    }
                }
                Ok(None) => {
                    debug!("End of input");
                    return EXIT_SUCCESS;
                }
                Err(e) => {
                    presenter.error(&format!("Failed to read input: {}", e));
                    return EXIT_ERROR;
                }
            },
            _ = shutdown.recv() => return EXIT_SUCCESS,
        }
    }
}

/// Run one screen command.
///
/// Start, stop and play run as their own tasks so that a slow permission
/// prompt or directory check never blocks the next command.
async fn dispatch(
    controller: &Arc<ScreenController>,
    presenter: &Presenter,
    commands: &mut JoinSet<()>,
    command: ScreenCommand,
) {
    let controller = Arc::clone(controller);
    match command {
        ScreenCommand::Start => {
            commands.spawn(async move {
                controller.start().await;
            });
        }
        ScreenCommand::Stop => {
            commands.spawn(async move {
                controller.stop().await;
            });
        }
        ScreenCommand::Play => {
            commands.spawn(async move {
                controller.play().await;
            });
        }
        ScreenCommand::Status => presenter.snapshot(&controller.snapshot().await),
        ScreenCommand::Help => presenter.help(),
        ScreenCommand::Quit => {}
    }
}

/// Finish typed commands, stop an active recording and give completions
/// a chance to land
async fn shut_down(controller: &ScreenController, mut commands: JoinSet<()>) {
    let drained = tokio::time::timeout(SETTLE_TIMEOUT, async {
        while commands.join_next().await.is_some() {}
    })
    .await;
    if drained.is_err() {
        warn!("Abandoning commands still in progress");
        commands.abort_all();
    }

    if controller.is_recording().await {
        controller.stop().await;
    }
    if tokio::time::timeout(SETTLE_TIMEOUT, controller.settle())
        .await
        .is_err()
    {
        warn!("Gave up waiting for outstanding completions");
    }
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "Ignoring unreadable config file");
            AppConfig::empty()
        }
    };

    merge_config(file_config, env_config(), cli_config)
}

/// Config taken from the environment
fn env_config() -> AppConfig {
    AppConfig {
        output_root: env::var(OUTPUT_ROOT_ENV).ok().filter(|s| !s.is_empty()),
        ..Default::default()
    }
}

/// Merge: defaults < file < env < cli
fn merge_config(file: AppConfig, env: AppConfig, cli: AppConfig) -> AppConfig {
    AppConfig::defaults().merge(file).merge(env).merge(cli)
}
