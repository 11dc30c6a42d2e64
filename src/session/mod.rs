// Session module - the connection lifecycle controller
//
// A `Session` owns the connection state, the single transport handle and the
// operator log. Transport notices and operator actions are plain method calls,
// so the same state machine runs under the TUI loop, the headless loop and
// the tests.
//
//   Disconnected --connect()--> Connecting --Opened--> Connected
//        ^                          |                      |
//        +-------- Closed ----------+--------- Closed -----+
//
// disconnect() only asks the transport to close; the state changes when the
// Closed notice arrives.

pub mod buffer;
pub mod clock;


pub use buffer::{LogBuffer, LogEntry, DEFAULT_ERROR_MARKER};
pub use clock::Timestamper;

use crate::control::{Command, ControlError, ControlResponse, ControlService};
use crate::transport::{Connector, TransportEvent, TransportHandle, TransportNotice, NORMAL_CLOSURE};
use serde::Serialize;

/// Reason sent with a manual close
pub const MANUAL_CLOSE_REASON: &str = "Manual Disconnection.";

const MSG_CONNECTING: &str = "Trying to connect to WebSocket...";
const MSG_ESTABLISHED: &str = "Connection to WebSocket established.";
const MSG_CLOSED: &str = "Connection to WebSocket closed.";
const MSG_ALREADY_CONNECTED: &str = "WebSocket already connected.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

impl ConnectionState {
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionState::Disconnected => "Disconnected",
            ConnectionState::Connecting => "Connecting",
            ConnectionState::Connected => "Connected",
        }
    }
}

/// Where the session connects and how it marks errors
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Full log stream URL, e.g. `ws://host/ws/logs`
    pub stream_url: String,
    /// Control API path prefix shown in attempt entries, e.g. `/api`
    pub api_base: String,
    pub error_marker: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            stream_url: "ws://127.0.0.1:8080/ws/logs".to_string(),
            api_base: "/api".to_string(),
            error_marker: DEFAULT_ERROR_MARKER.to_string(),
        }
    }
}

pub struct Session<C: Connector> {
    state: ConnectionState,
    /// The one live handle. Replaced on connect, cleared on close.
    handle: Option<C::Handle>,
    logs: LogBuffer,
    connector: C,
    timestamper: Timestamper,
    settings: SessionSettings,
}

impl<C: Connector> Session<C> {
    pub fn new(connector: C, settings: SessionSettings, timestamper: Timestamper) -> Self {
        Self {
            state: ConnectionState::Disconnected,
            handle: None,
            logs: LogBuffer::new(),
            connector,
            timestamper,
            settings,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn logs(&self) -> &LogBuffer {
        &self.logs
    }

    pub fn error_marker(&self) -> &str {
        &self.settings.error_marker
    }

    pub fn is_error(&self, entry: &LogEntry) -> bool {
        entry.is_error(&self.settings.error_marker)
    }

    /// Id of the held handle, if any
    pub fn connection_id(&self) -> Option<crate::transport::ConnectionId> {
        self.handle.as_ref().map(|h| h.id())
    }

    /// Connected as far as this session knows, with the handle still open.
    /// The transport may report open before its `Opened` notice is applied.
    fn is_live(&self) -> bool {
        self.state == ConnectionState::Connected
            && self.handle.as_ref().is_some_and(|h| h.is_open())
    }

    fn log(&mut self, message: impl Into<String>) {
        let entry = LogEntry::new(self.timestamper.stamp(), message);
        self.logs.push(entry);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Operator actions
    // ─────────────────────────────────────────────────────────────────────

    /// Open a fresh connection unless the held one is already live.
    ///
    /// Only a `Connected` session with an open handle blocks this. Calling it
    /// while `Connecting` opens a second transport and drops the first handle
    /// without closing it.
    pub fn connect(&mut self) {
        if self.is_live() {
            tracing::debug!("connect() ignored: stream already open");
            self.log(MSG_ALREADY_CONNECTED);
            return;
        }

        if let Some(stale) = &self.handle {
            tracing::warn!(
                connection = stale.id(),
                "Replacing a handle that is not live yet"
            );
        }

        self.logs.clear();
        self.log(MSG_CONNECTING);
        self.state = ConnectionState::Connecting;

        let handle = self.connector.open(&self.settings.stream_url);
        tracing::info!(connection = handle.id(), url = %self.settings.stream_url, "Connecting");
        self.handle = Some(handle);
    }

    /// Request a normal closure of a live stream. Silent otherwise.
    pub fn disconnect(&mut self) {
        match &self.handle {
            Some(handle) if self.is_live() => {
                tracing::info!(connection = handle.id(), "Manual disconnect requested");
                handle.close(NORMAL_CLOSURE, MANUAL_CLOSE_REASON);
            }
            _ => tracing::debug!("disconnect() ignored: no open stream"),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Transport notices
    // ─────────────────────────────────────────────────────────────────────

    pub fn handle_notice(&mut self, notice: TransportNotice) {
        if self.connection_id() != Some(notice.connection) {
            tracing::debug!(
                connection = notice.connection,
                held = ?self.connection_id(),
                "Notice from a connection other than the held one"
            );
        }

        match notice.event {
            TransportEvent::Opened => self.on_open(),
            TransportEvent::Message(text) => self.on_message(text),
            TransportEvent::Closed { code, reason } => self.on_close(code, &reason),
        }
    }

    pub fn on_open(&mut self) {
        self.state = ConnectionState::Connected;
        self.log(MSG_ESTABLISHED);
    }

    pub fn on_message(&mut self, text: String) {
        self.log(text);
    }

    /// Any closure, whatever the cause, lands in `Disconnected`
    pub fn on_close(&mut self, code: u16, reason: &str) {
        tracing::debug!(code, reason, from = ?self.state, "Stream closed");
        self.state = ConnectionState::Disconnected;
        self.log(MSG_CLOSED);
        self.handle = None;
    }

    // ─────────────────────────────────────────────────────────────────────
    // Control commands
    // ─────────────────────────────────────────────────────────────────────

    /// Issue a control command and log both the attempt and the outcome.
    /// Connection state is neither checked nor changed.
    pub async fn send_command<S: ControlService>(&mut self, service: &S, command: Command) {
        self.begin_command(command);
        let result = service.invoke(command).await;
        self.complete_command(command, result);
    }

    /// First half of `send_command`: the attempt entry
    pub fn begin_command(&mut self, command: Command) {
        let path = format!("{}/{}", self.settings.api_base.trim_end_matches('/'), command);
        self.log(format!("Sending {} command to {}...", command, path));
    }

    /// Second half of `send_command`: exactly one outcome entry
    pub fn complete_command(
        &mut self,
        command: Command,
        result: Result<ControlResponse, ControlError>,
    ) {
        let marker = self.settings.error_marker.clone();
        let message = match result {
            Ok(response) if response.is_success() => format!("API OK: {}", response.body),
            Ok(response) => {
                tracing::warn!(%command, status = response.status, "Control request rejected");
                format!("{} API Error ({}): {}", marker, response.status, response.body)
            }
            Err(ControlError::Unreachable(reason)) => {
                tracing::warn!(%command, %reason, "Control service unreachable");
                format!("{} Cannot fetch API: {}", marker, reason)
            }
        };
        self.log(message);
    }
}
