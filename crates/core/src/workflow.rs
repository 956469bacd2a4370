// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reservation workflow phases.
//!
//! Each shift runs its own workflow: `Idle → ConfirmPending → Submitting →
//! Idle`, or back to `Idle` from `ConfirmPending` when the volunteer
//! dismisses the confirmation or declines a quota warning. Workflows for
//! different shifts are independent and may overlap.

use crate::error::CoreError;
use crate::ports::DismissReason;
use serde::{Deserialize, Serialize};
use shiftboard_domain::{ShiftId, WarningKind};
use std::collections::HashMap;

/// What the control does when activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationAction {
    /// Take a seat.
    Register,
    /// Give a held seat back.
    Unregister,
}

impl ReservationAction {
    /// Returns the action available to a viewer.
    #[must_use]
    pub const fn for_viewer(viewer_registered: bool) -> Self {
        if viewer_registered {
            Self::Unregister
        } else {
            Self::Register
        }
    }

    /// Returns the success notification text.
    #[must_use]
    pub const fn success_message(&self) -> &'static str {
        match self {
            Self::Register => "You are registered for this shift",
            Self::Unregister => "Your registration has been cancelled",
        }
    }
}

/// The phase of one shift's workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "phase", content = "action", rename_all = "snake_case")]
pub enum Phase {
    /// The control reflects the current snapshot.
    #[default]
    Idle,
    /// The confirmation surface is open.
    ConfirmPending(ReservationAction),
    /// The mutation is in flight; the control is locked.
    Submitting(ReservationAction),
}

/// Something that happened to a workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "action", rename_all = "snake_case")]
pub enum WorkflowEvent {
    /// The volunteer activated the control.
    Activate(ReservationAction),
    /// The volunteer confirmed (and acknowledged any warning).
    Confirm,
    /// The confirmation was dismissed, a warning declined, or the detail
    /// fetch failed.
    Dismiss,
    /// The store accepted the mutation.
    Succeeded,
    /// The store rejected the mutation.
    Failed,
}

impl Phase {
    /// Returns the phase that follows `event`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTransition` if the event does not apply
    /// to this phase.
    pub fn next(self, shift_id: ShiftId, event: WorkflowEvent) -> Result<Self, CoreError> {
        match (self, event) {
            (Self::Idle, WorkflowEvent::Activate(action)) => Ok(Self::ConfirmPending(action)),
            (Self::ConfirmPending(action), WorkflowEvent::Confirm) => Ok(Self::Submitting(action)),
            (Self::ConfirmPending(_), WorkflowEvent::Dismiss)
            | (Self::Submitting(_), WorkflowEvent::Succeeded | WorkflowEvent::Failed) => {
                Ok(Self::Idle)
            }
            (from, event) => Err(CoreError::InvalidTransition {
                shift_id,
                from,
                event,
            }),
        }
    }

    /// Returns true if the shift's control must stay disabled.
    #[must_use]
    pub const fn locks_control(&self) -> bool {
        matches!(self, Self::Submitting(_))
    }

    /// Returns true if no interaction is under way.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// The phase of every shift with a workflow under way.
///
/// Idle shifts are not stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowTable {
    phases: HashMap<ShiftId, Phase>,
}

impl WorkflowTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current phase of a shift's workflow.
    #[must_use]
    pub fn phase(&self, shift_id: ShiftId) -> Phase {
        self.phases.get(&shift_id).copied().unwrap_or_default()
    }

    /// Applies an event to a shift's workflow.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTransition` and leaves the phase unchanged
    /// if the event does not apply.
    pub fn advance(&mut self, shift_id: ShiftId, event: WorkflowEvent) -> Result<Phase, CoreError> {
        let next: Phase = self.phase(shift_id).next(shift_id, event)?;
        if next.is_idle() {
            self.phases.remove(&shift_id);
        } else {
            self.phases.insert(shift_id, next);
        }
        Ok(next)
    }

    /// Returns true if the shift's control is locked by a submission.
    #[must_use]
    pub fn is_locked(&self, shift_id: ShiftId) -> bool {
        self.phase(shift_id).locks_control()
    }

    /// Returns the number of shifts with a workflow under way.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.phases.len()
    }

    /// Forgets every workflow.
    pub fn clear(&mut self) {
        self.phases.clear();
    }
}

/// How an activation ended. Every outcome leaves the workflow `Idle`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowOutcome {
    /// The mutation succeeded and the view was refreshed.
    Completed(ReservationAction),
    /// The confirmation surface was closed without confirming.
    Dismissed(DismissReason),
    /// The volunteer declined a quota warning.
    Declined(WarningKind),
    /// The detail fetch or the mutation failed; the message was shown.
    Failed {
        /// The message shown to the volunteer.
        message: String,
    },
    /// Another interaction for the same shift is under way.
    Busy,
    /// The control is disabled (shift full, no seat held).
    Disabled,
}
