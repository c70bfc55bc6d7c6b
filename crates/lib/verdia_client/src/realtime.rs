// @zen-component: CHT-RealtimeChannel
//
//! Realtime chat channel consumer.
//!
//! Connects to the push channel, joins a conversation, and surfaces
//! `receiveMessage` events as decoded [`Message`]s. Delivery is
//! at-least-once with best-effort ordering, so consumers keep incoming
//! messages in a [`MessageLog`] which deduplicates by id and orders by
//! `createdAt`.
//!
//! The request gateway does not wrap this channel — no bearer refresh
//! applies here.

use std::collections::HashSet;

use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message as WsFrame};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use verdia_core::models::chat::Message;

/// Realtime channel errors.
#[derive(Debug, Error)]
pub enum RealtimeError {
    #[error("Channel connect failed: {0}")]
    Connect(String),

    #[error("Channel closed")]
    Closed,
}

/// Wire envelope for channel events (`joinConversation`, `receiveMessage`).
#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    event: String,
    data: serde_json::Value,
}

/// A live connection to the chat push channel.
pub struct ChatChannel {
    outgoing: mpsc::UnboundedSender<WsFrame>,
    incoming: mpsc::UnboundedReceiver<Message>,
    cancel: CancellationToken,
}

impl ChatChannel {
    /// Connect to the channel endpoint and start the background reader.
    pub async fn connect(ws_url: &str) -> Result<Self, RealtimeError> {
        let (stream, _) = connect_async(ws_url)
            .await
            .map_err(|e| RealtimeError::Connect(e.to_string()))?;
        let (mut sink, mut source) = stream.split();

        let (outgoing_tx, mut outgoing_rx) = mpsc::unbounded_channel::<WsFrame>();
        let (incoming_tx, incoming_rx) = mpsc::unbounded_channel::<Message>();
        let cancel = CancellationToken::new();
        let worker_cancel = cancel.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = worker_cancel.cancelled() => {
                        let _ = sink.send(WsFrame::Close(None)).await;
                        break;
                    }
                    Some(frame) = outgoing_rx.recv() => {
                        if let Err(e) = sink.send(frame).await {
                            warn!(error = %e, "realtime send failed");
                            break;
                        }
                    }
                    next = source.next() => {
                        match next {
                            Some(Ok(WsFrame::Text(raw))) => {
                                if let Some(message) = decode_push(raw.as_str())
                                    && incoming_tx.send(message).is_err()
                                {
                                    break;
                                }
                            }
                            Some(Ok(WsFrame::Close(_))) | None => {
                                debug!("realtime channel closed by server");
                                break;
                            }
                            Some(Ok(_)) => {} // ping/pong and binary frames
                            Some(Err(e)) => {
                                warn!(error = %e, "realtime receive failed");
                                break;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            outgoing: outgoing_tx,
            incoming: incoming_rx,
            cancel,
        })
    }

    /// Subscribe to a conversation's pushed messages.
    pub fn join(&self, conversation_id: &str) -> Result<(), RealtimeError> {
        let envelope = Envelope {
            event: "joinConversation".into(),
            data: serde_json::Value::String(conversation_id.to_string()),
        };
        let raw = serde_json::to_string(&envelope).map_err(|_| RealtimeError::Closed)?;
        self.outgoing
            .send(WsFrame::Text(raw.into()))
            .map_err(|_| RealtimeError::Closed)
    }

    /// Await the next pushed message. `None` once the channel is closed.
    pub async fn next_message(&mut self) -> Option<Message> {
        self.incoming.recv().await
    }

    /// Tear down the connection.
    pub fn leave(&self) {
        self.cancel.cancel();
    }
}

impl Drop for ChatChannel {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Decode a pushed frame; anything but a well-formed `receiveMessage` is
/// logged and dropped.
fn decode_push(raw: &str) -> Option<Message> {
    let envelope: Envelope = match serde_json::from_str(raw) {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!(error = %e, "discarding malformed realtime frame");
            return None;
        }
    };
    if envelope.event != "receiveMessage" {
        debug!(event = %envelope.event, "ignoring realtime event");
        return None;
    }
    match serde_json::from_value(envelope.data) {
        Ok(message) => Some(message),
        Err(e) => {
            warn!(error = %e, "discarding malformed receiveMessage payload");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Message log
// ---------------------------------------------------------------------------

/// Ordered, deduplicated view of a conversation.
///
/// `insert` drops messages whose id was already seen (at-least-once
/// delivery) and keeps the list ordered by `created_at` (out-of-order
/// arrival).
#[derive(Debug, Default)]
pub struct MessageLog {
    seen: HashSet<String>,
    messages: Vec<Message>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the log from REST history.
    pub fn from_history(history: Vec<Message>) -> Self {
        let mut log = Self::new();
        for message in history {
            log.insert(message);
        }
        log
    }

    /// Add a message; returns `false` for a duplicate id.
    pub fn insert(&mut self, message: Message) -> bool {
        if !self.seen.insert(message.id.clone()) {
            return false;
        }
        let at = self
            .messages
            .partition_point(|m| m.created_at <= message.created_at);
        self.messages.insert(at, message);
        true
    }

    /// Messages in `created_at` order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
