//! Reference-counted STOMP subscription channel.
//!
//! One channel multiplexes any number of subscriptions over a single
//! duplex connection. The connection is opened lazily by the first
//! subscription and closed gracefully when the last one is disposed;
//! after a close or a transport failure the next subscription opens a
//! fresh connection. The channel never reconnects on its own.
//!
//! All shared state sits behind one mutex. Listener invocation happens
//! outside the lock, so a listener may call back into subscribe or
//! dispose without deadlocking. Unsubscribe frames go out while the
//! lock is held, keeping an id's UNSUBSCRIBE ahead of any SUBSCRIBE
//! that reuses the id.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use crate::error::WebSocketError;
use crate::stomp::{StompCommand, StompFrame};
use crate::transport::{DuplexConnection, DuplexListener, DuplexTransport};

/// WebSocket handshake path of the NIS messages endpoint.
pub const HANDSHAKE_PATH: &str = "/w/messages/websocket";

/// Callback receiving demultiplexed frames, or a terminal error when the
/// connection goes away.
pub type FrameListener = Arc<dyn Fn(Result<StompFrame, WebSocketError>) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChannelState {
    Ready,
    Opening,
    Opened,
    Closing,
    Closed,
}

struct ChannelInner {
    state: ChannelState,
    connection: Option<Arc<dyn DuplexConnection>>,
    listeners: HashMap<u32, FrameListener>,
    /// Frames queued until the CONNECTED frame arrives, flushed FIFO.
    pending: VecDeque<StompFrame>,
}

/// A live subscription on a [`SubscriptionChannel`].
pub struct Subscription {
    channel: Arc<SubscriptionChannel>,
    id: u32,
}

impl Subscription {
    /// The allocated subscription id.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Unsubscribe. Disposing the last subscription disconnects and
    /// closes the underlying connection.
    pub fn dispose(&self) {
        self.channel.dispose(self.id);
    }
}

/// Connection-control object multiplexing STOMP subscriptions over one
/// duplex connection.
pub struct SubscriptionChannel {
    transport: Arc<dyn DuplexTransport>,
    host_url: String,
    inner: Mutex<ChannelInner>,
}

impl SubscriptionChannel {
    /// Create a channel for the given NIS host URL. No connection is
    /// opened until the first subscription.
    pub fn new(transport: Arc<dyn DuplexTransport>, host_url: &str) -> Self {
        SubscriptionChannel {
            transport,
            host_url: host_url.trim_end_matches('/').to_string(),
            inner: Mutex::new(ChannelInner {
                state: ChannelState::Ready,
                connection: None,
                listeners: HashMap::new(),
                pending: VecDeque::new(),
            }),
        }
    }

    /// Register a subscription to a destination path.
    ///
    /// Allocates the lowest unused id, registers `listener` as the
    /// demultiplex target, and sends (or queues, while the session is
    /// still connecting) a SUBSCRIBE frame followed by the optional
    /// `after_subscribe` frame for APIs that need a triggering request.
    ///
    /// # Arguments
    /// * `destination` - Destination path of the subscription.
    /// * `after_subscribe` - Frame to send right after the SUBSCRIBE.
    /// * `listener` - Receives frames for this id, and one terminal
    ///   error if the connection closes or fails.
    pub fn subscribe(
        self: &Arc<Self>,
        destination: &str,
        after_subscribe: Option<StompFrame>,
        listener: FrameListener,
    ) -> Result<Subscription, WebSocketError> {
        let mut need_open = false;
        let mut send_now = Vec::new();
        let mut connection = None;

        let id = {
            let mut inner = self.inner.lock().expect("channel mutex poisoned");
            match inner.state {
                ChannelState::Closing => {
                    return Err(WebSocketError::Closed("channel is closing".to_string()))
                }
                ChannelState::Ready | ChannelState::Closed => {
                    inner.state = ChannelState::Opening;
                    inner.connection = None;
                    inner.pending.clear();
                    need_open = true;
                }
                ChannelState::Opening | ChannelState::Opened => {}
            }

            let id = (0..)
                .find(|id| !inner.listeners.contains_key(id))
                .expect("subscription id space exhausted");
            inner.listeners.insert(id, listener);

            let mut frames = vec![StompFrame::subscribe(id, destination)];
            frames.extend(after_subscribe);
            if inner.state == ChannelState::Opened {
                connection = inner.connection.clone();
                send_now = frames;
            } else {
                inner.pending.extend(frames);
            }
            id
        };

        if need_open {
            let uri = format!("{}{}", self.host_url, HANDSHAKE_PATH);
            info!(%uri, "opening connection");
            match self.transport.open(&uri, self.clone() as Arc<dyn DuplexListener>) {
                Ok(conn) => {
                    let mut inner = self.inner.lock().expect("channel mutex poisoned");
                    inner.connection = Some(conn);
                }
                Err(e) => {
                    let mut inner = self.inner.lock().expect("channel mutex poisoned");
                    inner.state = ChannelState::Closed;
                    inner.listeners.remove(&id);
                    inner.pending.clear();
                    return Err(e);
                }
            }
        }

        if let Some(conn) = connection {
            for frame in send_now {
                self.send_frame(&conn, &frame)?;
            }
        }

        Ok(Subscription {
            channel: self.clone(),
            id,
        })
    }

    /// Whether the channel is fully closed.
    pub fn is_closed(&self) -> bool {
        self.inner.lock().expect("channel mutex poisoned").state == ChannelState::Closed
    }

    fn dispose(&self, id: u32) {
        // Removing the id frees it for reallocation, so the UNSUBSCRIBE
        // goes out while the lock is still held. Otherwise a concurrent
        // subscribe could reuse the id and put its SUBSCRIBE on the wire
        // first, which the pending UNSUBSCRIBE would then cancel.
        let to_close = {
            let mut inner = self.inner.lock().expect("channel mutex poisoned");
            if inner.listeners.remove(&id).is_none() {
                return;
            }
            debug!(id, "disposing subscription");
            let last = inner.listeners.is_empty();

            match inner.state {
                ChannelState::Opened => {
                    if let Some(conn) = inner.connection.clone() {
                        if let Err(e) = self.send_frame(&conn, &StompFrame::unsubscribe(id)) {
                            warn!(error = %e, "send during dispose failed");
                        }
                        if last {
                            if let Err(e) = self.send_frame(&conn, &StompFrame::disconnect()) {
                                warn!(error = %e, "send during dispose failed");
                            }
                        }
                    }
                    if last {
                        inner.state = ChannelState::Closing;
                        inner.connection.take()
                    } else {
                        None
                    }
                }
                ChannelState::Opening => {
                    if last {
                        // Never reached CONNECTED; drop the queue and
                        // close without a session to disconnect from.
                        inner.pending.clear();
                        inner.state = ChannelState::Closing;
                        inner.connection.take()
                    } else {
                        inner.pending.push_back(StompFrame::unsubscribe(id));
                        None
                    }
                }
                _ => None,
            }
        };

        if let Some(conn) = to_close {
            info!("closing connection");
            if let Err(e) = conn.close() {
                warn!(error = %e, "transport close failed");
            }
            let mut inner = self.inner.lock().expect("channel mutex poisoned");
            inner.state = ChannelState::Closed;
        }
    }

    fn send_frame(
        &self,
        conn: &Arc<dyn DuplexConnection>,
        frame: &StompFrame,
    ) -> Result<(), WebSocketError> {
        debug!(frame = %frame, "sending frame");
        conn.send(&frame.serialize())
    }

    fn tear_down(&self, error: impl Fn() -> WebSocketError) {
        let listeners = {
            let mut inner = self.inner.lock().expect("channel mutex poisoned");
            inner.state = ChannelState::Closed;
            inner.connection = None;
            inner.pending.clear();
            std::mem::take(&mut inner.listeners)
        };
        for listener in listeners.into_values() {
            listener(Err(error()));
        }
    }
}

impl DuplexListener for SubscriptionChannel {
    fn on_open(&self) {
        let connection = {
            let inner = self.inner.lock().expect("channel mutex poisoned");
            inner.connection.clone()
        };
        let host = host_of(&self.host_url);
        if let Some(conn) = connection {
            if let Err(e) = self.send_frame(&conn, &StompFrame::connect(host)) {
                warn!(error = %e, "failed to send connect frame");
            }
        }
    }

    fn on_message(&self, text: &str) {
        let frame = match StompFrame::parse(text) {
            Ok(frame) => frame,
            Err(e) => {
                warn!(error = %e, "dropping unparseable frame");
                return;
            }
        };
        debug!(frame = %frame, "received frame");

        if frame.command == StompCommand::Connected {
            let (connection, queued) = {
                let mut inner = self.inner.lock().expect("channel mutex poisoned");
                inner.state = ChannelState::Opened;
                let queued: Vec<StompFrame> = inner.pending.drain(..).collect();
                (inner.connection.clone(), queued)
            };
            if let Some(conn) = connection {
                for frame in queued {
                    if let Err(e) = self.send_frame(&conn, &frame) {
                        warn!(error = %e, "failed to flush queued frame");
                    }
                }
            }
            return;
        }

        // Demultiplex on the subscription header; frames for unknown or
        // already-disposed ids are dropped.
        let listener = frame
            .header("subscription")
            .and_then(|value| value.parse::<u32>().ok())
            .and_then(|id| {
                let inner = self.inner.lock().expect("channel mutex poisoned");
                inner.listeners.get(&id).cloned()
            });
        if let Some(listener) = listener {
            listener(Ok(frame));
        }
    }

    fn on_close(&self, reason: &str) {
        info!(reason, "connection closed by peer");
        let reason = reason.to_string();
        self.tear_down(|| WebSocketError::Closed(reason.clone()));
    }

    fn on_failure(&self, message: &str) {
        warn!(message, "connection failed");
        let message = message.to_string();
        self.tear_down(|| WebSocketError::Transport(message.clone()));
    }
}

fn host_of(url: &str) -> &str {
    let rest = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
    rest.split(|c| c == ':' || c == '/').next().unwrap_or(rest)
}
