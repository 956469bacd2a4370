// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::workflow::{Phase, WorkflowEvent};
use shiftboard_domain::ShiftId;

/// A fetch or push-channel failure.
///
/// Transport errors are recoverable by reloading the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    /// A human-readable description of the failure.
    pub message: String,
}

impl TransportError {
    /// Creates a new transport error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Transport error: {}", self.message)
    }
}

impl std::error::Error for TransportError {}

/// A register/unregister/attendance call rejected by the store.
///
/// The message comes from the server and is shown to the volunteer verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationError {
    /// The server-provided, human-readable message.
    pub message: String,
}

impl MutationError {
    /// Creates a new mutation error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for MutationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for MutationError {}

/// Errors raised by the capacity core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A fetch or the push channel failed.
    Transport(TransportError),
    /// The store rejected a mutation.
    Mutation(MutationError),
    /// A workflow event does not apply to the current phase.
    InvalidTransition {
        /// The shift whose workflow was advanced.
        shift_id: ShiftId,
        /// The phase the workflow was in.
        from: Phase,
        /// The rejected event.
        event: WorkflowEvent,
    },
    /// The board is not mounted.
    NotMounted,
    /// No rendered fragment carries this shift id.
    UnknownShift(ShiftId),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "{err}"),
            Self::Mutation(err) => write!(f, "Mutation rejected: {err}"),
            Self::InvalidTransition {
                shift_id,
                from,
                event,
            } => {
                write!(
                    f,
                    "Invalid workflow transition for shift {shift_id}: {event:?} while {from:?}"
                )
            }
            Self::NotMounted => write!(f, "The shift board is not mounted"),
            Self::UnknownShift(shift_id) => write!(f, "Shift {shift_id} is not rendered"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<TransportError> for CoreError {
    fn from(err: TransportError) -> Self {
        Self::Transport(err)
    }
}

impl From<MutationError> for CoreError {
    fn from(err: MutationError) -> Self {
        Self::Mutation(err)
    }
}
