//! Voice Recorder CLI entry point

use std::process::ExitCode;

use clap::Parser;

use voice_recorder::cli::{
    handle_config_command, init_logging, load_merged_config, run_screen, Cli, Commands,
    Presenter, ScreenOptions, EXIT_ERROR,
};
use voice_recorder::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let presenter = Presenter::new();
    let cli_config = cli.to_config();

    if let Some(Commands::Config { action }) = cli.command {
        let store = XdgConfigStore::new();
        if let Err(e) = handle_config_command(action, &store, &presenter).await {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    let config = load_merged_config(cli_config).await;
    run_screen(ScreenOptions::from_config(&config)).await
}
