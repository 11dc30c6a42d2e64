// Headless frontends - no terminal UI
//
// `stream` connects straight away and prints the operator log to stdout as it
// grows, as plain `[time] message` lines or as JSON lines. `send_once` runs a
// single control command and prints its two entries. Both drive the same
// `Session` as the TUI; tracing goes to stderr so stdout stays clean.

use crate::config::Config;
use crate::control::{Command, HttpControlClient};
use crate::session::{ConnectionState, LogBuffer, LogEntry, Session};
use crate::transport::ws::WsConnector;
use crate::transport::{TransportEvent, TransportNotice};
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use tokio::sync::mpsc;

/// How entries are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Serialize)]
struct JsonLine<'a> {
    #[serde(flatten)]
    entry: &'a LogEntry,
    error: bool,
}

/// Writes each log entry once, following buffer resets
pub struct EntryPrinter<W: Write> {
    out: W,
    format: OutputFormat,
    error_marker: String,
    /// Buffer generation the `printed` count refers to
    generation: u64,
    printed: usize,
}

impl<W: Write> EntryPrinter<W> {
    pub fn new(out: W, format: OutputFormat, error_marker: impl Into<String>) -> Self {
        Self {
            out,
            format,
            error_marker: error_marker.into(),
            generation: 0,
            printed: 0,
        }
    }

    /// Print entries added since the last call
    pub fn print_new(&mut self, logs: &LogBuffer) -> Result<()> {
        if logs.generation() != self.generation {
            // Cleared by a new connection: start over from the top
            self.generation = logs.generation();
            self.printed = 0;
        }

        let fresh = logs.entries().get(self.printed..).unwrap_or_default();
        for entry in fresh {
            self.write_entry(entry)?;
        }
        self.printed = logs.len();
        self.out.flush().context("Failed to flush output")?;
        Ok(())
    }

    fn write_entry(&mut self, entry: &LogEntry) -> Result<()> {
        match self.format {
            OutputFormat::Text => {
                writeln!(self.out, "{}", entry.display_line()).context("Failed to write entry")?
            }
            OutputFormat::Json => {
                let line = JsonLine {
                    entry,
                    error: entry.is_error(&self.error_marker),
                };
                let json = serde_json::to_string(&line).context("Failed to encode entry")?;
                writeln!(self.out, "{}", json).context("Failed to write entry")?;
            }
        }
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

type Notices = mpsc::UnboundedReceiver<TransportNotice>;

fn new_session(config: &Config) -> Result<(Session<WsConnector>, Notices)> {
    let (notice_tx, notice_rx) = mpsc::unbounded_channel();
    let session = Session::new(
        WsConnector::new(notice_tx),
        config.session_settings(),
        config.timestamper()?,
    );
    Ok((session, notice_rx))
}

/// Stream the operator log until the connection closes.
///
/// The first Ctrl+C asks for a manual disconnect; a second one, or one while
/// the stream is not open, stops immediately.
pub async fn stream<W: Write>(config: &Config, printer: &mut EntryPrinter<W>) -> Result<()> {
    let (mut session, mut notice_rx) = new_session(config)?;
    let mut interrupted = false;

    tracing::info!(url = %config.endpoint.stream_url(), "Streaming in headless mode");
    session.connect();
    printer.print_new(session.logs())?;

    loop {
        tokio::select! {
            notice = notice_rx.recv() => {
                let Some(notice) = notice else { break };
                let closed = matches!(notice.event, TransportEvent::Closed { .. });
                session.handle_notice(notice);
                printer.print_new(session.logs())?;

                if closed && session.state() == ConnectionState::Disconnected {
                    break;
                }
            }

            signal = tokio::signal::ctrl_c() => {
                signal.context("Failed to listen for Ctrl+C")?;
                if interrupted || session.state() != ConnectionState::Connected {
                    tracing::info!("Interrupted, exiting");
                    break;
                }
                interrupted = true;
                session.disconnect();
            }
        }
    }

    Ok(())
}

/// Run one control command and print the attempt and outcome entries.
/// Returns false when the outcome is error-marked.
pub async fn send_once<W: Write>(
    config: &Config,
    command: Command,
    printer: &mut EntryPrinter<W>,
) -> Result<bool> {
    let (mut session, _notice_rx) = new_session(config)?;
    let control = HttpControlClient::new(config.endpoint.api_url());

    session.send_command(&control, command).await;
    printer.print_new(session.logs())?;

    let failed = session
        .logs()
        .last()
        .is_some_and(|entry| session.is_error(entry));
    Ok(!failed)
}
