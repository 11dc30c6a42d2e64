// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - The event loop (keyboard input, timer ticks, transport notices and
//   control outcomes)
// - Rendering the UI

pub mod app;
pub mod components;
pub mod scroll;
pub mod theme;
pub mod traits;
pub mod ui;

use crate::config::Config;
use crate::control::{CommandOutcome, HttpControlClient};
use crate::logging::DiagnosticsBuffer;
use crate::session::{ConnectionState, Session};
use crate::transport::ws::WsConnector;
use crate::transport::{Connector, TransportEvent, TransportNotice};
use anyhow::{Context, Result};
use app::{Action, App};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;
use traits::{Handled, Interactive};

/// Run the TUI
///
/// Sets up the terminal, runs the event loop, and restores the terminal
/// when done, even if the loop failed.
pub async fn run_tui(config: Config, diagnostics: DiagnosticsBuffer) -> Result<()> {
    let (notice_tx, mut notice_rx) = mpsc::unbounded_channel::<TransportNotice>();
    let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel::<CommandOutcome>();

    let session = Session::new(
        WsConnector::new(notice_tx),
        config.session_settings(),
        config.timestamper()?,
    );
    let control = HttpControlClient::new(config.endpoint.api_url());
    let mut app = App::new(&config, session, control, outcome_tx, diagnostics);

    if config.auto_connect {
        app.perform(Action::Connect);
    }

    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let tick = Duration::from_millis(config.tui.tick_ms);
    let result = run_event_loop(
        &mut terminal,
        &mut app,
        &mut notice_rx,
        &mut outcome_rx,
        tick,
    )
    .await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    if !close_stream(&mut app.session, &mut notice_rx, CLOSE_WAIT).await {
        tracing::debug!("Exiting without a confirmed close");
    }

    result
}

/// How long quitting waits for the server to acknowledge a manual close
const CLOSE_WAIT: Duration = Duration::from_millis(500);

/// Request a normal closure and apply notices until the held connection
/// reports closed. Returns false when nothing was live or `wait` ran out.
async fn close_stream<C: Connector>(
    session: &mut Session<C>,
    notice_rx: &mut mpsc::UnboundedReceiver<TransportNotice>,
    wait: Duration,
) -> bool {
    if session.state() != ConnectionState::Connected {
        return false;
    }
    let Some(id) = session.connection_id() else {
        return false;
    };
    session.disconnect();

    let settled = tokio::time::timeout(wait, async {
        while let Some(notice) = notice_rx.recv().await {
            let done = notice.connection == id
                && matches!(notice.event, TransportEvent::Closed { .. });
            session.handle_notice(notice);
            if done {
                return true;
            }
        }
        false
    })
    .await;

    settled.unwrap_or(false)
}

/// Main event loop
///
/// Waits on whichever comes first: keyboard input, a redraw tick, a transport
/// notice or a settled control request.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    notice_rx: &mut mpsc::UnboundedReceiver<TransportNotice>,
    outcome_rx: &mut mpsc::UnboundedReceiver<CommandOutcome>,
    tick: Duration,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(tick);

    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Ok(Event::Key(key_event)) = event::read() {
                        handle_key_event(app, key_event);
                    }
                }
            } => {}

            _ = tick_interval.tick() => {
                app.tick();
            }

            Some(notice) = notice_rx.recv() => {
                app.apply_notice(notice);
            }

            Some(outcome) = outcome_rx.recv() => {
                app.apply_outcome(outcome);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
/// Layered dispatch: Global → Logs panel → Actions
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    // Terminals that report releases would otherwise trigger twice
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    if handle_global_keys(app, &key_event) {
        return;
    }

    if app.logs_panel.handle_key(key_event) == Handled::Yes {
        return;
    }

    if let KeyCode::Char(c) = key_event.code {
        if let Some(action) = Action::from_key(c) {
            app.perform(action);
        }
    }
}

/// Keys that work regardless of connection state - returns true if handled
fn handle_global_keys(app: &mut App, key_event: &KeyEvent) -> bool {
    match key_event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            app.should_quit = true;
            true
        }
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            true
        }
        KeyCode::Char('l') | KeyCode::Char('L') => {
            app.toggle_diagnostics();
            true
        }
        KeyCode::Char('t') | KeyCode::Char('T') => {
            app.cycle_theme();
            true
        }
        KeyCode::Char('y') => {
            app.copy_selection();
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::clock::{FixedClock, Timestamper};
    use crate::session::SessionSettings;
    use crate::transport::NORMAL_CLOSURE;
    use chrono::DateTime;
    use futures::StreamExt;
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;
    use tokio_tungstenite::tungstenite::Message;

    fn session_for(
        url: String,
    ) -> (Session<WsConnector>, mpsc::UnboundedReceiver<TransportNotice>) {
        let (notice_tx, notice_rx) = mpsc::unbounded_channel();
        let clock = FixedClock(DateTime::parse_from_rfc3339("2024-05-01T08:15:00+02:00").unwrap());
        let settings = SessionSettings {
            stream_url: url,
            ..SessionSettings::default()
        };
        let session = Session::new(
            WsConnector::new(notice_tx),
            settings,
            Timestamper::new(clock, chrono::Locale::fr_FR),
        );
        (session, notice_rx)
    }

    #[tokio::test]
    async fn quitting_sends_a_close_frame_and_waits_for_it() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (code_tx, code_rx) = oneshot::channel();
        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
            let mut code_tx = Some(code_tx);
            // Keep reading so the close reply gets flushed
            while let Some(Ok(frame)) = ws.next().await {
                if let Message::Close(frame) = frame {
                    if let Some(tx) = code_tx.take() {
                        let _ = tx.send(frame.map(|f| u16::from(f.code)));
                    }
                }
            }
        });

        let (mut session, mut notice_rx) = session_for(format!("ws://{}/ws/logs", addr));
        session.connect();
        let opened = notice_rx.recv().await.unwrap();
        session.handle_notice(opened);
        assert_eq!(session.state(), ConnectionState::Connected);

        assert!(close_stream(&mut session, &mut notice_rx, Duration::from_secs(5)).await);
        assert_eq!(session.state(), ConnectionState::Disconnected);
        assert_eq!(code_rx.await.unwrap(), Some(NORMAL_CLOSURE));
        assert_eq!(
            session.logs().last().map(|e| e.message.as_str()),
            Some("Connection to WebSocket closed.")
        );
    }

    #[tokio::test]
    async fn quitting_while_disconnected_returns_at_once() {
        let (mut session, mut notice_rx) = session_for("ws://127.0.0.1:9/ws/logs".to_string());
        assert!(!close_stream(&mut session, &mut notice_rx, Duration::from_secs(5)).await);
        assert!(session.logs().is_empty());
    }
}
