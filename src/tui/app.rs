// TUI application state
//
// The App wraps a `Session` and everything the screen needs around it:
// panel state, theme, toast and in-flight control requests. Transport notices
// and command outcomes are fed in by the event loop; keys become `Action`s.

use super::components::logs_panel::LogsPanel;
use super::components::toast::Toast;
use super::theme::{Theme, ThemeKind};
use crate::config::Config;
use crate::control::{Command, CommandOutcome, ControlService, HttpControlClient};
use crate::logging::DiagnosticsBuffer;
use crate::session::{ConnectionState, Session};
use crate::transport::ws::WsConnector;
use crate::transport::TransportNotice;
use std::time::Instant;
use tokio::sync::mpsc;

/// Operator actions bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Connect,
    Disconnect,
    Start,
    Stop,
}

impl Action {
    pub fn all() -> &'static [Action] {
        &[Action::Connect, Action::Disconnect, Action::Start, Action::Stop]
    }

    pub fn key(&self) -> char {
        match self {
            Action::Connect => 'c',
            Action::Disconnect => 'd',
            Action::Start => 's',
            Action::Stop => 'x',
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Action::Connect => "Connect",
            Action::Disconnect => "Disconnect",
            Action::Start => "Start",
            Action::Stop => "Stop",
        }
    }

    pub fn from_key(key: char) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|a| a.key() == key.to_ascii_lowercase())
    }

    /// Whether the control is enabled in the given connection state
    pub fn available_in(&self, state: ConnectionState) -> bool {
        match self {
            Action::Connect => state == ConnectionState::Disconnected,
            Action::Disconnect | Action::Start | Action::Stop => {
                state == ConnectionState::Connected
            }
        }
    }
}

/// Main application state for the TUI
pub struct App {
    pub session: Session<WsConnector>,

    control: HttpControlClient,

    /// Where spawned control requests report back
    outcomes: mpsc::UnboundedSender<CommandOutcome>,

    /// Control requests issued but not yet settled
    pub pending_commands: usize,

    pub logs_panel: LogsPanel,

    /// The console's own tracing output
    pub diagnostics: DiagnosticsBuffer,

    pub show_diagnostics: bool,

    pub theme_kind: ThemeKind,
    pub theme: Theme,

    pub toast: Option<Toast>,

    /// Shown in the title bar
    pub stream_url: String,

    /// When the app started (for uptime display)
    pub start_time: Instant,

    pub should_quit: bool,
}

impl App {
    pub fn new(
        config: &Config,
        session: Session<WsConnector>,
        control: HttpControlClient,
        outcomes: mpsc::UnboundedSender<CommandOutcome>,
        diagnostics: DiagnosticsBuffer,
    ) -> Self {
        let theme_kind = ThemeKind::from_name(&config.tui.theme);
        Self {
            session,
            control,
            outcomes,
            pending_commands: 0,
            logs_panel: LogsPanel::new(),
            diagnostics,
            show_diagnostics: config.tui.show_diagnostics,
            theme_kind,
            theme: theme_kind.theme(),
            toast: None,
            stream_url: config.endpoint.stream_url(),
            start_time: Instant::now(),
            should_quit: false,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.session.state()
    }

    /// Run an action if the current state allows it. Returns whether it ran.
    pub fn perform(&mut self, action: Action) -> bool {
        if !action.available_in(self.state()) {
            tracing::debug!(
                action = action.label(),
                state = self.state().label(),
                "Action ignored"
            );
            return false;
        }

        match action {
            Action::Connect => self.session.connect(),
            Action::Disconnect => self.session.disconnect(),
            Action::Start => self.dispatch_command(Command::Start),
            Action::Stop => self.dispatch_command(Command::Stop),
        }
        true
    }

    /// Log the attempt now and settle the request in the background
    fn dispatch_command(&mut self, command: Command) {
        self.session.begin_command(command);
        self.pending_commands += 1;

        let control = self.control.clone();
        let outcomes = self.outcomes.clone();
        tokio::spawn(async move {
            let result = control.invoke(command).await;
            // Receiver gone means the app is shutting down
            let _ = outcomes.send(CommandOutcome { command, result });
        });
    }

    pub fn apply_outcome(&mut self, outcome: CommandOutcome) {
        self.pending_commands = self.pending_commands.saturating_sub(1);
        self.session.complete_command(outcome.command, outcome.result);
    }

    pub fn apply_notice(&mut self, notice: TransportNotice) {
        self.session.handle_notice(notice);
    }

    pub fn cycle_theme(&mut self) {
        self.theme_kind = self.theme_kind.next();
        self.theme = self.theme_kind.theme();
        self.show_toast(format!("Theme: {}", self.theme_kind.name()));
    }

    pub fn toggle_diagnostics(&mut self) {
        self.show_diagnostics = !self.show_diagnostics;
    }

    /// Text for `y`: the selected log line, or the newest
    pub fn copy_text(&self) -> Option<String> {
        self.logs_panel.copy_text(self.session.logs().entries())
    }

    /// Put the `y` text on the system clipboard and toast the result.
    /// Nothing happens while the log is empty.
    pub fn copy_selection(&mut self) {
        let Some(text) = self.copy_text() else {
            return;
        };
        let copied = arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text));
        match copied {
            Ok(()) => self.show_toast("✓ Copied to clipboard"),
            Err(e) => {
                tracing::warn!("Clipboard unavailable: {}", e);
                self.show_toast("✗ Failed to copy");
            }
        }
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    /// Periodic housekeeping
    pub fn tick(&mut self) {
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    pub fn error_count(&self) -> usize {
        self.session
            .logs()
            .error_count(self.session.error_marker())
    }

    pub fn uptime(&self) -> String {
        let seconds = self.start_time.elapsed().as_secs();
        let hours = seconds / 3600;
        let minutes = (seconds % 3600) / 60;
        let secs = seconds % 60;

        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{ControlError, ControlResponse};
    use crate::session::clock::{FixedClock, Timestamper};
    use chrono::DateTime;

    fn app() -> (App, mpsc::UnboundedReceiver<CommandOutcome>) {
        let config = Config::default();
        let (notice_tx, _notice_rx) = mpsc::unbounded_channel();
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        let clock = FixedClock(
            DateTime::parse_from_rfc3339("2024-05-01T08:15:00+02:00").unwrap(),
        );
        let session = Session::new(
            WsConnector::new(notice_tx),
            config.session_settings(),
            Timestamper::new(clock, chrono::Locale::fr_FR),
        );
        let control = HttpControlClient::new(config.endpoint.api_url());
        let app = App::new(&config, session, control, outcome_tx, DiagnosticsBuffer::new());
        (app, outcome_rx)
    }

    #[test]
    fn actions_follow_connection_state() {
        use ConnectionState::*;

        assert!(Action::Connect.available_in(Disconnected));
        assert!(!Action::Connect.available_in(Connecting));
        assert!(!Action::Connect.available_in(Connected));

        for action in [Action::Disconnect, Action::Start, Action::Stop] {
            assert!(!action.available_in(Disconnected));
            assert!(!action.available_in(Connecting));
            assert!(action.available_in(Connected));
        }
    }

    #[test]
    fn keys_map_to_actions() {
        assert_eq!(Action::from_key('c'), Some(Action::Connect));
        assert_eq!(Action::from_key('D'), Some(Action::Disconnect));
        assert_eq!(Action::from_key('x'), Some(Action::Stop));
        assert_eq!(Action::from_key('z'), None);
    }

    #[test]
    fn unavailable_action_is_ignored() {
        let (mut app, _rx) = app();
        assert!(!app.perform(Action::Start));
        assert_eq!(app.pending_commands, 0);
        assert!(app.session.logs().is_empty());
    }

    #[tokio::test]
    async fn connect_moves_to_connecting() {
        let (mut app, _rx) = app();
        assert!(app.perform(Action::Connect));
        assert_eq!(app.state(), ConnectionState::Connecting);
        assert_eq!(
            app.session.logs().last().map(|e| e.message.as_str()),
            Some("Trying to connect to WebSocket...")
        );
        // A second connect is not offered while the first is in flight
        assert!(!app.perform(Action::Connect));
    }

    #[test]
    fn outcome_settles_pending_command() {
        let (mut app, _rx) = app();
        app.pending_commands = 1;
        app.apply_outcome(CommandOutcome {
            command: Command::Stop,
            result: Err(ControlError::Unreachable("connection refused".into())),
        });
        assert_eq!(app.pending_commands, 0);
        assert_eq!(app.error_count(), 1);

        // Stray outcome never underflows
        app.apply_outcome(CommandOutcome {
            command: Command::Start,
            result: Ok(ControlResponse {
                status: 200,
                body: "ok".into(),
            }),
        });
        assert_eq!(app.pending_commands, 0);
        assert_eq!(
            app.session.logs().last().map(|e| e.message.as_str()),
            Some("API OK: ok")
        );
    }

    #[test]
    fn theme_cycles_with_toast() {
        let (mut app, _rx) = app();
        assert_eq!(app.theme_kind, ThemeKind::Dark);
        app.cycle_theme();
        assert_eq!(app.theme_kind, ThemeKind::Light);
        assert_eq!(
            app.toast.as_ref().map(|t| t.message.as_str()),
            Some("Theme: Light")
        );
    }

    #[test]
    fn copy_with_empty_log_leaves_clipboard_alone() {
        let (mut app, _rx) = app();
        assert_eq!(app.copy_text(), None);
        app.copy_selection();
        assert!(app.toast.is_none());
    }
}
