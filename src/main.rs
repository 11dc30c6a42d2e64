// logdeck - operator console for a remote process's log stream
//
// Connects to a server's WebSocket log stream, shows each line as it arrives,
// and sends start/stop commands to the server's HTTP control API.
//
// Architecture:
// - Session: connection state machine and the operator log
// - Transport: WebSocket adapter (tokio-tungstenite) feeding notices over a channel
// - Control: HTTP client (reqwest) for start/stop
// - Frontends: TUI (ratatui), headless stdout streaming, one-shot commands

mod cli;
mod config;
mod control;
mod headless;
mod logging;
mod session;
mod transport;
mod tui;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use headless::{EntryPrinter, OutputFormat};
use logging::{DiagnosticsBuffer, Sink};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Config subcommands exit early
    if let Some(Commands::Config { show, path, reset }) = cli.command {
        cli::handle_config(&cli, show, path, reset)?;
        return Ok(ExitCode::SUCCESS);
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let mut config = Config::load()?;
    cli.apply_overrides(&mut config);

    let control_command = cli.command.as_ref().and_then(Commands::control);

    // In TUI mode: capture logs to the diagnostics panel (prevents garbling the display)
    // Otherwise: stderr, keeping stdout for the operator log
    let diagnostics = DiagnosticsBuffer::new();
    let sink = if config.enable_tui && control_command.is_none() {
        Sink::Panel(diagnostics.clone())
    } else {
        Sink::Stderr
    };
    // The guard must be kept alive for the duration of the program to flush file logs
    let _file_guard = logging::init(&config, sink)?;

    tracing::debug!(
        url = %config.endpoint.stream_url(),
        api = %config.endpoint.api_url(),
        "Configuration loaded"
    );

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let mut printer = EntryPrinter::new(std::io::stdout(), format, config.error_marker.clone());

    if let Some(command) = control_command {
        let ok = headless::send_once(&config, command, &mut printer).await?;
        return Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE });
    }

    if config.enable_tui {
        tracing::info!("Starting TUI");
        tui::run_tui(config, diagnostics).await?;
    } else {
        headless::stream(&config, &mut printer).await?;
    }

    tracing::info!("Shutdown complete");
    Ok(ExitCode::SUCCESS)
}
