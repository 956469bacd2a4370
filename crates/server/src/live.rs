// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The live push channel.
//!
//! Every committed seat change is broadcast as the shift's fresh snapshot,
//! serialized as camelCase JSON, to every connected WebSocket client.
//!
//! # Architecture
//!
//! - Snapshots are broadcast to all connected clients
//! - A snapshot is the full row state, so a later message always supersedes
//!   an earlier one for the same shift
//! - No commands are executed over WebSocket connections
//! - Clients that fall behind skip the snapshots they missed and keep
//!   receiving newer ones

use axum::{
    extract::{
        State as AxumState, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use futures::{
    SinkExt, Stream,
    stream::{self, StreamExt},
};
use shiftboard_domain::ShiftSnapshot;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use crate::AppState;

/// Default number of snapshots buffered per client.
pub const DEFAULT_FEED_BUFFER: usize = 100;

/// Broadcaster for shift snapshots.
///
/// This is a lightweight wrapper around `tokio::sync::broadcast` that allows
/// multiple WebSocket clients to receive seat changes.
#[derive(Clone)]
pub struct SnapshotBroadcaster {
    tx: broadcast::Sender<ShiftSnapshot>,
}

impl SnapshotBroadcaster {
    /// Creates a broadcaster buffering up to `capacity` snapshots per client.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Broadcasts a snapshot to all connected clients.
    ///
    /// If no clients are connected, the snapshot is dropped.
    pub fn broadcast(&self, snapshot: &ShiftSnapshot) {
        match self.tx.send(snapshot.clone()) {
            Ok(receivers) => {
                debug!(shift_id = %snapshot.id, receivers, "Broadcast shift snapshot");
            }
            Err(_) => {
                debug!(shift_id = %snapshot.id, "No receivers for shift snapshot");
            }
        }
    }

    /// Subscribes to the snapshot stream.
    ///
    /// Snapshots sent before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<ShiftSnapshot> {
        self.tx.subscribe()
    }

    /// Returns the number of connected receivers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for SnapshotBroadcaster {
    fn default() -> Self {
        Self::new(DEFAULT_FEED_BUFFER)
    }
}

/// Handler for GET `/live`.
///
/// Upgrades the connection to a WebSocket and streams snapshots until the
/// client disconnects.
pub async fn live_handler(
    ws: WebSocketUpgrade,
    AxumState(app_state): AxumState<AppState>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, app_state.broadcaster))
}

/// Turns a subscription into the JSON messages sent to one client.
///
/// Lagging skips ahead; the stream ends when the broadcaster is dropped.
pub fn encoded_snapshots(
    rx: broadcast::Receiver<ShiftSnapshot>,
) -> impl Stream<Item = String> + Send + 'static {
    stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(snapshot) => match serde_json::to_string(&snapshot) {
                    Ok(json) => return Some((json, rx)),
                    Err(e) => error!(?e, "Failed to serialize shift snapshot"),
                },
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Live client lagged, skipping snapshots");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, broadcaster: SnapshotBroadcaster) {
    let (mut sender, mut receiver) = socket.split();
    let mut snapshots = Box::pin(encoded_snapshots(broadcaster.subscribe()));
    info!(
        clients = broadcaster.receiver_count(),
        "Client connected to live snapshot stream"
    );

    let mut send_task = tokio::spawn(async move {
        while let Some(json) = snapshots.next().await {
            if sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(_) | Message::Binary(_)) => {
                    warn!("Received unexpected message from client, ignoring");
                }
                Ok(Message::Close(_)) => {
                    debug!("Client sent close frame");
                    break;
                }
                // Answered by axum.
                Ok(Message::Ping(_) | Message::Pong(_)) => {}
                Err(e) => {
                    error!(?e, "WebSocket receive error");
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => {
            debug!("Send task completed");
            recv_task.abort();
        }
        _ = &mut recv_task => {
            debug!("Receive task completed");
            send_task.abort();
        }
    }

    info!("Client disconnected from live snapshot stream");
}
