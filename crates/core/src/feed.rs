// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Change feed listener.
//!
//! One spawned task per subscription reads complete shift snapshots from
//! the push channel, overwrites the cache entry and projects the snapshot
//! onto any rendered fragment for that shift.

use crate::board::BoardStatus;
use crate::cache::CapacityCache;
use crate::ports::PushChannel;
use crate::projector::project;
use crate::view::{ShiftDocument, ViewContext};
use crate::workflow::WorkflowTable;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use shiftboard_domain::{ShiftId, ShiftListing, ShiftSnapshot, SnapshotUpdate};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Connection state of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedStatus {
    /// The channel is being opened.
    Opening,
    /// Messages are flowing.
    Live,
    /// Unsubscribed, or the transport ended the stream.
    Closed,
    /// The channel could not be opened or reported an error.
    Failed,
}

/// What happened to one inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// The cache was updated and `projected` fragments repainted.
    Applied {
        shift_id: ShiftId,
        projected: usize,
    },
    /// The message was not a snapshot.
    Malformed,
    /// The view is not mounted.
    Dropped,
}

/// Everything a mounted board shows, behind one lock.
#[derive(Debug, Default)]
pub struct LiveView {
    pub(crate) mounted: bool,
    pub(crate) cache: CapacityCache,
    pub(crate) document: ShiftDocument,
    pub(crate) listings: Vec<ShiftListing>,
    pub(crate) context: ViewContext,
    pub(crate) workflows: WorkflowTable,
    pub(crate) status: BoardStatus,
    /// Fetches of the listings currently in flight.
    pub(crate) loads_in_flight: usize,
    /// Shifts pushed while a fetch was in flight.
    pub(crate) pushed_during_load: HashSet<ShiftId>,
}

/// The live view shared by the board and its feed task.
pub type SharedView = Arc<Mutex<LiveView>>;

impl LiveView {
    /// Applies one raw push message.
    ///
    /// The cache entry is overwritten unconditionally; fragments are only
    /// touched when one is rendered for the shift. Descriptive fields the
    /// message leaves out are kept from the snapshot already known.
    pub fn apply_push(&mut self, raw: &str) -> PushOutcome {
        if !self.mounted {
            debug!("Dropping push message for unmounted view");
            return PushOutcome::Dropped;
        }

        let update: SnapshotUpdate = match serde_json::from_str(raw) {
            Ok(update) => update,
            Err(err) => {
                warn!(error = %err, "Skipping malformed push message");
                return PushOutcome::Malformed;
            }
        };

        let shift_id: ShiftId = update.id;
        let snapshot: ShiftSnapshot = update.merge_into(self.known_snapshot(shift_id));
        let locked: bool = self.workflows.is_locked(shift_id);
        let projected: usize = project(&mut self.document, shift_id, &snapshot, locked);
        self.cache.replace(snapshot);
        if self.loads_in_flight > 0 {
            self.pushed_during_load.insert(shift_id);
        }

        debug!(shift_id = %shift_id, projected, "Applied push message");
        PushOutcome::Applied {
            shift_id,
            projected,
        }
    }

    /// The cached snapshot of a shift, else the one it was fetched with.
    fn known_snapshot(&self, shift_id: ShiftId) -> Option<&ShiftSnapshot> {
        self.cache.get(shift_id).or_else(|| {
            self.listings
                .iter()
                .find(|listing| listing.snapshot.id == shift_id)
                .map(|listing| &listing.snapshot)
        })
    }

    /// Repaints every fragment of a shift, picking up its lock state.
    pub(crate) fn repaint(&mut self, shift_id: ShiftId) {
        if let Some(snapshot) = self.known_snapshot(shift_id).cloned() {
            let locked: bool = self.workflows.is_locked(shift_id);
            project(&mut self.document, shift_id, &snapshot, locked);
        }
    }

    /// Marks a fetch of the listings as in flight.
    pub(crate) fn begin_load(&mut self) {
        if self.loads_in_flight == 0 {
            self.pushed_during_load.clear();
        }
        self.loads_in_flight += 1;
    }

    /// Ends a fetch, installing its listings when it succeeded.
    ///
    /// Shifts pushed while the fetch was in flight keep their pushed
    /// counters; the fetched rows may predate those pushes.
    pub(crate) fn finish_load(&mut self, listings: Option<Vec<ShiftListing>>) {
        self.loads_in_flight = self.loads_in_flight.saturating_sub(1);
        if let Some(listings) = listings {
            let pushed: &HashSet<ShiftId> = &self.pushed_during_load;
            self.cache.seed_keeping(
                listings.iter().map(|listing| listing.snapshot.clone()),
                |shift_id| pushed.contains(&shift_id),
            );
            self.listings = listings;
            self.rerender();
        }
        if self.loads_in_flight == 0 {
            self.pushed_during_load.clear();
        }
    }

    /// Rebuilds the document from the stored listings.
    pub(crate) fn rerender(&mut self) {
        self.document
            .render(&self.listings, &self.cache, &self.context, &self.workflows);
    }

    /// Returns the cached snapshot of a shift.
    #[must_use]
    pub fn snapshot(&self, shift_id: ShiftId) -> Option<&ShiftSnapshot> {
        self.cache.get(shift_id)
    }

    #[must_use]
    pub const fn document(&self) -> &ShiftDocument {
        &self.document
    }

    #[must_use]
    pub const fn workflows(&self) -> &WorkflowTable {
        &self.workflows
    }
}

/// Opens subscriptions on a push channel.
#[derive(Debug)]
pub struct ChangeFeedListener<C> {
    channel: Arc<C>,
    topic: String,
}

impl<C: PushChannel> ChangeFeedListener<C> {
    /// Creates a listener for one topic.
    #[must_use]
    pub fn new(channel: Arc<C>, topic: impl Into<String>) -> Self {
        Self {
            channel,
            topic: topic.into(),
        }
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Opens one connection and starts applying its messages to `view`.
    ///
    /// Returns immediately; the channel is opened on the spawned task.
    #[must_use]
    pub fn subscribe(&self, view: SharedView) -> Subscription {
        let (status_tx, status_rx) = watch::channel(FeedStatus::Opening);
        let status: Arc<watch::Sender<FeedStatus>> = Arc::new(status_tx);

        info!(topic = %self.topic, "Subscribing to change feed");
        let handle: JoinHandle<()> = tokio::spawn(run_feed(
            Arc::clone(&self.channel),
            self.topic.clone(),
            view,
            Arc::clone(&status),
        ));

        Subscription {
            handle: Some(handle),
            status,
            status_rx,
        }
    }
}

async fn run_feed<C: PushChannel>(
    channel: Arc<C>,
    topic: String,
    view: SharedView,
    status: Arc<watch::Sender<FeedStatus>>,
) {
    let mut stream: C::Stream = match channel.open(&topic).await {
        Ok(stream) => stream,
        Err(err) => {
            error!(topic = %topic, error = %err, "Failed to open change feed");
            status.send_replace(FeedStatus::Failed);
            return;
        }
    };

    status.send_replace(FeedStatus::Live);
    info!(topic = %topic, "Change feed is live");

    while let Some(message) = stream.next().await {
        match message {
            Ok(raw) => {
                let mut live = view.lock().await;
                live.apply_push(&raw);
            }
            Err(err) => {
                error!(topic = %topic, error = %err, "Change feed transport failed");
                status.send_replace(FeedStatus::Failed);
                return;
            }
        }
    }

    info!(topic = %topic, "Change feed closed by transport");
    status.send_replace(FeedStatus::Closed);
}

/// A running change feed.
///
/// Dropping the subscription releases the channel.
#[derive(Debug)]
pub struct Subscription {
    handle: Option<JoinHandle<()>>,
    status: Arc<watch::Sender<FeedStatus>>,
    status_rx: watch::Receiver<FeedStatus>,
}

impl Subscription {
    /// Returns the current connection state.
    #[must_use]
    pub fn status(&self) -> FeedStatus {
        *self.status_rx.borrow()
    }

    /// Returns a receiver that observes every status change.
    #[must_use]
    pub fn watch_status(&self) -> watch::Receiver<FeedStatus> {
        self.status_rx.clone()
    }

    /// Returns true if the feed may still deliver messages.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.handle.is_some() && matches!(self.status(), FeedStatus::Opening | FeedStatus::Live)
    }

    /// Releases the channel.
    ///
    /// Never fails. Safe to call more than once, and before the channel has
    /// finished opening: the task is aborted wherever it is suspended.
    pub fn unsubscribe(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            self.status.send_replace(FeedStatus::Closed);
            info!("Unsubscribed from change feed");
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
