//! WebSocket transport built on tokio-tungstenite
//!
//! Each `open` spawns one task that owns the socket. The task reports
//! `Opened`, every text frame, and exactly one `Closed` on the shared
//! notice channel. The handle only carries an open flag and a channel
//! for close requests; dropping it leaves the connection running.

use super::{
    ConnectionId, Connector, TransportEvent, TransportHandle, TransportNotice, ABNORMAL_CLOSURE,
};
use futures::{SinkExt, StreamExt};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;

/// Code reported when the peer sent a close frame without a status
const NO_STATUS_RECEIVED: u16 = 1005;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
}

#[derive(Debug)]
struct CloseRequest {
    code: u16,
    reason: String,
}

/// Opens WebSocket connections and routes their notices to one channel
pub struct WsConnector {
    notices: mpsc::UnboundedSender<TransportNotice>,
    next_id: ConnectionId,
}

impl WsConnector {
    pub fn new(notices: mpsc::UnboundedSender<TransportNotice>) -> Self {
        Self {
            notices,
            next_id: 0,
        }
    }
}

impl Connector for WsConnector {
    type Handle = WsHandle;

    /// Must be called from within a tokio runtime
    fn open(&mut self, url: &str) -> WsHandle {
        self.next_id += 1;
        let id = self.next_id;
        let open = Arc::new(AtomicBool::new(false));
        let (close_tx, close_rx) = mpsc::unbounded_channel();

        tracing::debug!(connection = id, %url, "Opening log stream");
        tokio::spawn(run_connection(
            id,
            url.to_string(),
            open.clone(),
            close_rx,
            self.notices.clone(),
        ));

        WsHandle { id, open, close_tx }
    }
}

pub struct WsHandle {
    id: ConnectionId,
    open: Arc<AtomicBool>,
    close_tx: mpsc::UnboundedSender<CloseRequest>,
}

impl TransportHandle for WsHandle {
    fn id(&self) -> ConnectionId {
        self.id
    }

    fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    fn close(&self, code: u16, reason: &str) {
        // Closing counts as no longer open, even before the peer answers
        self.open.store(false, Ordering::SeqCst);
        let _ = self.close_tx.send(CloseRequest {
            code,
            reason: reason.to_string(),
        });
    }
}

async fn run_connection(
    id: ConnectionId,
    url: String,
    open: Arc<AtomicBool>,
    close_rx: mpsc::UnboundedReceiver<CloseRequest>,
    notices: mpsc::UnboundedSender<TransportNotice>,
) {
    let (code, reason) = match drive(id, &url, &open, close_rx, &notices).await {
        Ok(closed) => closed,
        Err(e) => {
            tracing::warn!(connection = id, "Log stream failed: {}", e);
            (ABNORMAL_CLOSURE, String::new())
        }
    };

    open.store(false, Ordering::SeqCst);
    tracing::info!(connection = id, code, %reason, "Log stream closed");
    let _ = notices.send(TransportNotice::new(
        id,
        TransportEvent::Closed { code, reason },
    ));
}

/// Run one connection until it closes, returning the close code and reason
async fn drive(
    id: ConnectionId,
    url: &str,
    open: &AtomicBool,
    mut close_rx: mpsc::UnboundedReceiver<CloseRequest>,
    notices: &mpsc::UnboundedSender<TransportNotice>,
) -> Result<(u16, String), TransportError> {
    let (socket, _response) = tokio_tungstenite::connect_async(url).await?;
    open.store(true, Ordering::SeqCst);
    tracing::info!(connection = id, %url, "Log stream open");
    let _ = notices.send(TransportNotice::new(id, TransportEvent::Opened));

    let (mut sink, mut stream) = socket.split();
    let mut accepting_requests = true;
    let mut peer_close: Option<(u16, String)> = None;

    loop {
        tokio::select! {
            request = close_rx.recv(), if accepting_requests => match request {
                Some(request) => {
                    accepting_requests = false;
                    let frame = CloseFrame {
                        code: CloseCode::from(request.code),
                        reason: request.reason.into(),
                    };
                    sink.send(Message::Close(Some(frame))).await?;
                }
                // Handle dropped without closing
                None => accepting_requests = false,
            },
            frame = stream.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    let _ = notices.send(TransportNotice::new(id, TransportEvent::Message(text)));
                }
                Some(Ok(Message::Close(frame))) => {
                    open.store(false, Ordering::SeqCst);
                    peer_close = Some(match frame {
                        Some(frame) => (u16::from(frame.code), frame.reason.into_owned()),
                        None => (NO_STATUS_RECEIVED, String::new()),
                    });
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => return Ok(peer_close.unwrap_or((ABNORMAL_CLOSURE, String::new()))),
            },
        }
    }
}
