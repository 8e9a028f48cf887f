//! WebSocket transport for one DevTools target.
//!
//! A background task owns the read half of the socket. Command responses are
//! routed to the waiting caller through a oneshot channel keyed by command id;
//! events fan out through a broadcast channel.

use crate::protocol::{CdpEvent, CdpIncoming, CdpRequest};
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use storycrawler_error::{CdpError, CdpErrorKind};
use tokio::net::TcpStream;
use tokio::sync::{broadcast, oneshot};
use tokio::task::JoinHandle;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};
use tracing::{debug, error, instrument, trace, warn};

/// Result type for DevTools operations.
pub type CdpResult<T> = Result<T, CdpError>;

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;
type Responder = oneshot::Sender<CdpResult<Value>>;

const EVENT_CAPACITY: usize = 256;

#[derive(Default)]
struct Pending {
    responders: Mutex<HashMap<u64, Responder>>,
    closed: AtomicBool,
}

impl Pending {
    fn lock(&self) -> MutexGuard<'_, HashMap<u64, Responder>> {
        self.responders
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn fail_all(&self) {
        self.closed.store(true, Ordering::SeqCst);
        for (_, responder) in self.lock().drain() {
            let _ = responder.send(Err(CdpError::new(CdpErrorKind::ConnectionClosed)));
        }
    }
}

/// Removes a command's responder when its caller stops waiting.
struct ForgetOnDrop<'a> {
    pending: &'a Pending,
    id: u64,
}

impl Drop for ForgetOnDrop<'_> {
    fn drop(&mut self) {
        self.pending.lock().remove(&self.id);
    }
}

/// Live DevTools session with a single target.
pub struct CdpConnection {
    sink: tokio::sync::Mutex<SplitSink<Socket, Message>>,
    pending: Arc<Pending>,
    events: broadcast::Sender<CdpEvent>,
    next_id: AtomicU64,
    reader: JoinHandle<()>,
}

impl CdpConnection {
    /// Open the WebSocket at `ws_url` and start routing frames.
    #[instrument(name = "cdp_connection_connect")]
    pub async fn connect(ws_url: &str) -> CdpResult<Self> {
        let (socket, _) = connect_async(ws_url).await.map_err(|e| {
            error!("DevTools WebSocket connection failed: {}", e);
            CdpError::new(CdpErrorKind::WebSocketConnection(e.to_string()))
        })?;

        debug!("DevTools WebSocket connection established");

        let (sink, stream) = socket.split();
        let pending = Arc::new(Pending::default());
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        let reader = tokio::spawn(read_frames(stream, pending.clone(), events.clone()));

        Ok(Self {
            sink: tokio::sync::Mutex::new(sink),
            pending,
            events,
            next_id: AtomicU64::new(1),
            reader,
        })
    }

    /// Receive every event emitted after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<CdpEvent> {
        self.events.subscribe()
    }

    /// Send a command and wait for its raw result.
    ///
    /// Dropping the returned future forgets the command; a late response is
    /// then logged and discarded.
    #[instrument(name = "cdp_connection_call", skip(self, params))]
    pub async fn call(&self, method: &str, params: Value) -> CdpResult<Value> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let (tx, rx) = oneshot::channel();
        self.pending.lock().insert(id, tx);
        let _forget = ForgetOnDrop {
            pending: &self.pending,
            id,
        };

        if self.pending.closed.load(Ordering::SeqCst) {
            return Err(CdpError::new(CdpErrorKind::ConnectionClosed));
        }

        let json = serde_json::to_string(&CdpRequest { id, method, params }).map_err(|e| {
            CdpError::new(CdpErrorKind::Send(format!("Serialization error: {}", e)))
        })?;

        trace!("Sending DevTools frame: {}", json);

        let sent = self.sink.lock().await.send(Message::Text(json.into())).await;
        if let Err(e) = sent {
            error!("Failed to send DevTools command: {}", e);
            return Err(CdpError::new(CdpErrorKind::Send(e.to_string())));
        }

        rx.await
            .map_err(|_| CdpError::new(CdpErrorKind::ConnectionClosed))?
    }

    /// Send a command and decode its result.
    pub async fn call_typed<T: DeserializeOwned>(&self, method: &str, params: Value) -> CdpResult<T> {
        let value = self.call(method, params).await?;
        serde_json::from_value(value).map_err(|e| {
            CdpError::new(CdpErrorKind::InvalidMessage(format!(
                "Unexpected {} result: {}",
                method, e
            )))
        })
    }

    /// Commands sent and still awaiting their response.
    pub fn pending_calls(&self) -> usize {
        self.pending.lock().len()
    }

    /// Whether the socket has stopped delivering frames.
    pub fn is_closed(&self) -> bool {
        self.pending.closed.load(Ordering::SeqCst)
    }
}

impl Drop for CdpConnection {
    fn drop(&mut self) {
        self.reader.abort();
    }
}

async fn read_frames(
    mut stream: SplitStream<Socket>,
    pending: Arc<Pending>,
    events: broadcast::Sender<CdpEvent>,
) {
    while let Some(frame) = stream.next().await {
        let text = match frame {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) => {
                debug!("DevTools WebSocket closed by browser");
                break;
            }
            Ok(_) => continue,
            Err(e) => {
                warn!("DevTools WebSocket read failed: {}", e);
                break;
            }
        };

        trace!("Received DevTools frame: {}", text.as_str());

        let incoming: CdpIncoming = match serde_json::from_str(text.as_str()) {
            Ok(incoming) => incoming,
            Err(e) => {
                warn!("Ignoring undecodable DevTools frame: {}", e);
                continue;
            }
        };

        match (incoming.id, incoming.method.clone()) {
            (Some(id), _) => match pending.lock().remove(&id) {
                Some(responder) => {
                    let _ = responder.send(incoming.into_result());
                }
                None => warn!(id, "Response for unknown DevTools command"),
            },
            (None, Some(method)) => {
                let _ = events.send(CdpEvent {
                    method,
                    params: incoming.params.unwrap_or(Value::Null),
                });
            }
            (None, None) => warn!("DevTools frame with neither id nor method"),
        }
    }

    pending.fail_all();
}
