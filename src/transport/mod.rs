// Transport module - the log stream connection seam
//
// The session controller only sees these traits and the notices below.
// The WebSocket adapter in `ws` implements them with tokio-tungstenite;
// tests use an in-memory fake.

pub mod ws;

/// Identifies one opened connection (assigned by the connector)
pub type ConnectionId = u64;

/// Close code for a normal, intentional closure
pub const NORMAL_CLOSURE: u16 = 1000;

/// Close code reported when the connection died without a close frame
pub const ABNORMAL_CLOSURE: u16 = 1006;

/// Lifecycle events delivered by a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    Opened,
    Message(String),
    Closed { code: u16, reason: String },
}

/// A transport event tagged with the connection it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportNotice {
    pub connection: ConnectionId,
    pub event: TransportEvent,
}

impl TransportNotice {
    pub fn new(connection: ConnectionId, event: TransportEvent) -> Self {
        Self { connection, event }
    }
}

/// The live object representing one log stream connection
pub trait TransportHandle {
    fn id(&self) -> ConnectionId;

    /// True once the handshake completed and no close has started
    fn is_open(&self) -> bool;

    /// Ask the peer to close. The closure itself arrives later as a notice.
    fn close(&self, code: u16, reason: &str);
}

/// Opens connections to the log stream
pub trait Connector {
    type Handle: TransportHandle;

    fn open(&mut self, url: &str) -> Self::Handle;
}
