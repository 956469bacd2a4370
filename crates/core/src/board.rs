// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The shift board view controller.
//!
//! `ShiftBoard` owns one mounted view: its capacity cache, rendered
//! document, view context, workflow table and change feed subscription.
//! The shared live view is locked only between remote calls, never across
//! them.

use crate::error::{CoreError, MutationError, TransportError};
use crate::feed::{ChangeFeedListener, FeedStatus, LiveView, SharedView, Subscription};
use crate::ports::{
    Confirmation, ConfirmationRequest, Notice, PushChannel, RegistrationRequest,
    ReservationSurface, ShiftGateway,
};
use crate::view::{BoardTab, NodeId, ShiftDocument, ShiftFilter, ViewContext};
use crate::workflow::{Phase, ReservationAction, WorkflowEvent, WorkflowOutcome};
use serde::{Deserialize, Serialize};
use shiftboard_domain::{
    AttendanceOutcome, QuotaDecision, ShiftDetail, ShiftId, ShiftListing, ShiftSnapshot,
    VolunteerProfile, decide,
};
use std::sync::Arc;
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, warn};

/// Push channel topic covering the shift table.
pub const DEFAULT_TOPIC: &str = "shifts";

/// Board construction settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Push channel topic to subscribe to.
    pub topic: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            topic: String::from(DEFAULT_TOPIC),
        }
    }
}

/// Load state of the board.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum BoardStatus {
    /// Not mounted, or torn down.
    #[default]
    Unmounted,
    /// The last fetch succeeded.
    Loaded,
    /// The last fetch failed; `refresh` retries it.
    LoadFailed {
        /// Why the fetch failed.
        message: String,
    },
}

/// A volunteer's live view of the visible shifts.
pub struct ShiftBoard<G, C, S> {
    volunteer: VolunteerProfile,
    gateway: Arc<G>,
    surface: Arc<S>,
    listener: ChangeFeedListener<C>,
    live: SharedView,
    subscription: Mutex<Option<Subscription>>,
}

impl<G, C, S> ShiftBoard<G, C, S>
where
    G: ShiftGateway,
    C: PushChannel,
    S: ReservationSurface,
{
    /// Creates an unmounted board for one volunteer.
    #[must_use]
    pub fn new(
        volunteer: VolunteerProfile,
        gateway: Arc<G>,
        channel: Arc<C>,
        surface: Arc<S>,
        config: BoardConfig,
    ) -> Self {
        Self {
            volunteer,
            gateway,
            surface,
            listener: ChangeFeedListener::new(channel, config.topic),
            live: Arc::new(Mutex::new(LiveView::default())),
            subscription: Mutex::new(None),
        }
    }

    /// Subscribes to the change feed, then fetches and renders the visible
    /// shifts.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Transport` if the fetch fails. The board is then
    /// mounted in the `LoadFailed` state, still subscribed, and `refresh`
    /// can recover it.
    pub async fn mount(&self) -> Result<(), CoreError> {
        info!(volunteer_id = %self.volunteer.id, "Mounting shift board");
        {
            let mut live = self.live.lock().await;
            if !live.mounted {
                live.mounted = true;
                live.context = ViewContext::default();
            }
        }
        self.load().await
    }

    /// Makes sure the change feed is live, then re-fetches and re-renders.
    ///
    /// Scroll position is kept. The existing subscription is reused while
    /// it is still delivering, since it already covers the whole shift
    /// table. Pushes that land during the fetch win over the fetched rows.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotMounted` if the board is not mounted, or
    /// `CoreError::Transport` if the fetch fails.
    pub async fn refresh(&self) -> Result<(), CoreError> {
        if !self.live.lock().await.mounted {
            return Err(CoreError::NotMounted);
        }
        debug!(volunteer_id = %self.volunteer.id, "Refreshing shift board");
        self.load().await
    }

    /// Subscribes first, then fetches, so no push falls between the fetch
    /// and the subscription.
    async fn load(&self) -> Result<(), CoreError> {
        {
            let mut live = self.live.lock().await;
            if !live.mounted {
                return Err(CoreError::NotMounted);
            }
            live.begin_load();
        }
        self.ensure_subscribed().await;

        let fetched: Result<Vec<ShiftListing>, TransportError> =
            self.gateway.fetch_listings(self.volunteer.id).await;

        let mut live = self.live.lock().await;
        if !live.mounted {
            return Err(CoreError::NotMounted);
        }
        match fetched {
            Ok(listings) => {
                live.finish_load(Some(listings));
                live.status = BoardStatus::Loaded;
                info!(shifts = live.listings.len(), "Shift board loaded");
                drop(live);
                Ok(())
            }
            Err(err) => {
                live.finish_load(None);
                warn!(error = %err, "Failed to load shift board");
                live.status = BoardStatus::LoadFailed {
                    message: err.message.clone(),
                };
                drop(live);
                Err(CoreError::Transport(err))
            }
        }
    }

    async fn ensure_subscribed(&self) {
        let mut subscription = self.subscription.lock().await;
        if subscription.as_ref().is_some_and(Subscription::is_active) {
            return;
        }
        if let Some(mut stale) = subscription.take() {
            stale.unsubscribe();
        }
        *subscription = Some(self.listener.subscribe(Arc::clone(&self.live)));
    }

    /// Tears the view down: unsubscribes, evicts the cache and drops the
    /// document. Safe to call more than once.
    pub async fn unmount(&self) {
        if let Some(mut subscription) = self.subscription.lock().await.take() {
            subscription.unsubscribe();
        }

        let mut live = self.live.lock().await;
        if live.mounted {
            info!(volunteer_id = %self.volunteer.id, "Unmounting shift board");
        }
        live.mounted = false;
        live.cache.evict_all();
        live.document.clear();
        live.listings.clear();
        live.workflows.clear();
        live.loads_in_flight = 0;
        live.pushed_during_load.clear();
        live.context = ViewContext::default();
        live.status = BoardStatus::Unmounted;
    }

    /// Runs the reservation workflow for one shift's control.
    ///
    /// Returns once the workflow is back to `Idle`. Failures shown to the
    /// volunteer are reported as `WorkflowOutcome::Failed`, not as errors.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotMounted` if the board is not mounted (or is
    /// unmounted before submission), or `CoreError::UnknownShift` if no
    /// fragment is rendered for the shift.
    pub async fn activate(&self, shift_id: ShiftId) -> Result<WorkflowOutcome, CoreError> {
        let action: ReservationAction = match self.begin(shift_id).await? {
            Ok(action) => action,
            Err(outcome) => return Ok(outcome),
        };
        debug!(shift_id = %shift_id, ?action, "Workflow activated");

        let detail: ShiftDetail = match self.gateway.fetch_detail(shift_id).await {
            Ok(detail) => detail,
            Err(err) => {
                warn!(shift_id = %shift_id, error = %err, "Failed to fetch shift detail");
                self.settle(shift_id, WorkflowEvent::Dismiss).await;
                self.surface.notify(Notice::Error(err.message.clone()));
                return Ok(WorkflowOutcome::Failed {
                    message: err.message,
                });
            }
        };

        let note: Option<String> = match self.confirm(shift_id, action, detail).await {
            Ok(note) => note,
            Err(outcome) => return Ok(outcome),
        };

        self.submit(shift_id, action, note).await
    }

    /// Checks the control and moves the workflow to `ConfirmPending`.
    async fn begin(
        &self,
        shift_id: ShiftId,
    ) -> Result<Result<ReservationAction, WorkflowOutcome>, CoreError> {
        let mut live = self.live.lock().await;
        if !live.mounted {
            return Err(CoreError::NotMounted);
        }
        let (action, enabled): (ReservationAction, bool) = match live.document.fragment(shift_id)
        {
            Some(fragment) => (fragment.control.action, fragment.control.enabled),
            None => return Err(CoreError::UnknownShift(shift_id)),
        };
        if !live.workflows.phase(shift_id).is_idle() {
            debug!(shift_id = %shift_id, "Rejecting activation of busy shift");
            return Ok(Err(WorkflowOutcome::Busy));
        }
        if !enabled {
            return Ok(Err(WorkflowOutcome::Disabled));
        }
        live.workflows
            .advance(shift_id, WorkflowEvent::Activate(action))?;
        live.document.set_open_modal(Some(shift_id));
        drop(live);
        Ok(Ok(action))
    }

    /// Shows the confirmation surface and, for registrations, any quota
    /// warning. Returns the note to submit, or how the workflow ended.
    async fn confirm(
        &self,
        shift_id: ShiftId,
        action: ReservationAction,
        detail: ShiftDetail,
    ) -> Result<Option<String>, WorkflowOutcome> {
        let described: ShiftSnapshot = detail.snapshot.clone();
        let request: ConfirmationRequest = ConfirmationRequest {
            action,
            detail,
            accepts_note: action == ReservationAction::Register,
        };

        let note: Option<String> = match self.surface.confirm(&request).await {
            Confirmation::Confirmed { note } => note,
            Confirmation::Dismissed(reason) => {
                debug!(shift_id = %shift_id, ?reason, "Confirmation dismissed");
                self.settle(shift_id, WorkflowEvent::Dismiss).await;
                return Err(WorkflowOutcome::Dismissed(reason));
            }
        };

        if action == ReservationAction::Unregister {
            return Ok(None);
        }

        // Counters from the feed, hours and schedule from the fetched detail.
        let snapshot: ShiftSnapshot = self.live.lock().await.cache.get(shift_id).map_or_else(
            || described.clone(),
            |cached| described.with_capacity_of(cached),
        );
        let decision: QuotaDecision = decide(&snapshot, &self.volunteer);
        if let Some(warning) = decision.warning
            && !self.surface.acknowledge(warning).await
        {
            debug!(shift_id = %shift_id, warning = %warning, "Quota warning declined");
            self.settle(shift_id, WorkflowEvent::Dismiss).await;
            return Err(WorkflowOutcome::Declined(warning));
        }

        Ok(note)
    }

    /// Locks the control, runs the mutation and settles the workflow.
    async fn submit(
        &self,
        shift_id: ShiftId,
        action: ReservationAction,
        note: Option<String>,
    ) -> Result<WorkflowOutcome, CoreError> {
        {
            let mut live = self.live.lock().await;
            if !live.mounted {
                return Err(CoreError::NotMounted);
            }
            live.workflows.advance(shift_id, WorkflowEvent::Confirm)?;
            live.document.set_open_modal(None);
            live.repaint(shift_id);
        }

        let result: Result<(), MutationError> = match action {
            ReservationAction::Register => {
                self.gateway
                    .register(RegistrationRequest {
                        shift_id,
                        volunteer_id: self.volunteer.id,
                        note,
                    })
                    .await
            }
            ReservationAction::Unregister => {
                self.gateway.unregister(shift_id, self.volunteer.id).await
            }
        };

        match result {
            Ok(()) => {
                info!(shift_id = %shift_id, ?action, "Reservation mutation succeeded");
                self.surface
                    .notify(Notice::Success(action.success_message().to_string()));
                // The control stays locked until the refreshed row is painted.
                if let Err(err) = self.refresh().await {
                    warn!(error = %err, "Refresh after reservation failed");
                }
                self.settle(shift_id, WorkflowEvent::Succeeded).await;
                Ok(WorkflowOutcome::Completed(action))
            }
            Err(err) => {
                warn!(shift_id = %shift_id, ?action, error = %err, "Reservation mutation rejected");
                self.settle(shift_id, WorkflowEvent::Failed).await;
                self.surface.notify(Notice::Error(err.message.clone()));
                Ok(WorkflowOutcome::Failed {
                    message: err.message,
                })
            }
        }
    }

    /// Returns a shift's workflow to `Idle` and repaints its control.
    ///
    /// A board torn down mid-workflow has already forgotten the phase, so
    /// late settles are ignored.
    async fn settle(&self, shift_id: ShiftId, event: WorkflowEvent) {
        let mut live = self.live.lock().await;
        if !live.mounted {
            debug!(shift_id = %shift_id, ?event, "Ignoring settle for unmounted board");
            return;
        }
        if let Err(err) = live.workflows.advance(shift_id, event) {
            debug!(error = %err, "Ignoring stale workflow settle");
            return;
        }
        if live.document.open_modal() == Some(shift_id) {
            live.document.set_open_modal(None);
        }
        live.repaint(shift_id);
    }

    /// Asks the store to validate the volunteer's attendance on a shift.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Mutation` with the store's message, which has
    /// already been shown to the volunteer.
    pub async fn validate_attendance(
        &self,
        shift_id: ShiftId,
    ) -> Result<AttendanceOutcome, CoreError> {
        match self
            .gateway
            .validate_attendance(shift_id, self.volunteer.id)
            .await
        {
            Ok(outcome) => {
                info!(
                    shift_id = %shift_id,
                    hours_credited = outcome.hours_credited,
                    "Attendance validated"
                );
                self.surface.notify(Notice::Success(format!(
                    "Attendance validated, {} hours credited",
                    outcome.hours_credited
                )));
                Ok(outcome)
            }
            Err(err) => {
                warn!(shift_id = %shift_id, error = %err, "Attendance validation rejected");
                self.surface.notify(Notice::Error(err.message.clone()));
                Err(CoreError::Mutation(err))
            }
        }
    }

    /// Changes the filter and re-renders.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotMounted` if the board is not mounted.
    pub async fn set_filter(&self, filter: ShiftFilter) -> Result<(), CoreError> {
        let mut live = self.live.lock().await;
        if !live.mounted {
            return Err(CoreError::NotMounted);
        }
        live.context.filter = filter;
        live.rerender();
        drop(live);
        Ok(())
    }

    /// Changes the tab and re-renders.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotMounted` if the board is not mounted.
    pub async fn set_tab(&self, tab: BoardTab) -> Result<(), CoreError> {
        let mut live = self.live.lock().await;
        if !live.mounted {
            return Err(CoreError::NotMounted);
        }
        live.context.tab = tab;
        live.rerender();
        drop(live);
        Ok(())
    }

    /// Records the list's scroll position.
    pub async fn scroll_to(&self, offset: u32) {
        self.live.lock().await.document.set_scroll_offset(offset);
    }

    /// Moves focus to a rendered node.
    pub async fn focus(&self, node_id: NodeId) {
        self.live.lock().await.document.focus(node_id);
    }

    /// Returns a copy of the rendered document.
    pub async fn document(&self) -> ShiftDocument {
        self.live.lock().await.document.clone()
    }

    pub async fn status(&self) -> BoardStatus {
        self.live.lock().await.status.clone()
    }

    pub async fn context(&self) -> ViewContext {
        self.live.lock().await.context
    }

    /// Returns the cached snapshot of a shift.
    pub async fn snapshot(&self, shift_id: ShiftId) -> Option<ShiftSnapshot> {
        self.live.lock().await.cache.get(shift_id).cloned()
    }

    /// Returns the workflow phase of a shift.
    pub async fn phase(&self, shift_id: ShiftId) -> Phase {
        self.live.lock().await.workflows.phase(shift_id)
    }

    /// Returns the change feed state, if subscribed.
    pub async fn feed_status(&self) -> Option<FeedStatus> {
        self.subscription
            .lock()
            .await
            .as_ref()
            .map(Subscription::status)
    }

    /// Returns a receiver observing the change feed state, if subscribed.
    pub async fn watch_feed(&self) -> Option<watch::Receiver<FeedStatus>> {
        self.subscription
            .lock()
            .await
            .as_ref()
            .map(Subscription::watch_status)
    }

    #[must_use]
    pub const fn volunteer(&self) -> &VolunteerProfile {
        &self.volunteer
    }
}
