// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Seams to the collaborators the capacity core does not own.
//!
//! - `ShiftGateway`: the store's queries and transactional mutations
//! - `PushChannel`: the transport delivering shift snapshots
//! - `ReservationSurface`: the confirmation dialogs and notifications

use crate::error::{MutationError, TransportError};
use crate::workflow::ReservationAction;
use futures::Stream;
use serde::{Deserialize, Serialize};
use shiftboard_domain::{
    AttendanceOutcome, ShiftDetail, ShiftId, ShiftListing, VolunteerId, WarningKind,
};
use std::future::Future;

/// A request to take a seat on a shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    /// The shift to register for.
    pub shift_id: ShiftId,
    /// The volunteer registering.
    pub volunteer_id: VolunteerId,
    /// Optional free-text note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Queries and mutations against the external store.
///
/// Mutations are atomic on the store side: the core performs no capacity
/// re-check before submitting.
pub trait ShiftGateway: Send + Sync + 'static {
    /// Fetches every visible shift with its mission and the volunteer's
    /// registration, if any.
    fn fetch_listings(
        &self,
        volunteer_id: VolunteerId,
    ) -> impl Future<Output = Result<Vec<ShiftListing>, TransportError>> + Send;

    /// Fetches the descriptive data shown on the confirmation surface.
    fn fetch_detail(
        &self,
        shift_id: ShiftId,
    ) -> impl Future<Output = Result<ShiftDetail, TransportError>> + Send;

    /// Takes a seat.
    fn register(
        &self,
        request: RegistrationRequest,
    ) -> impl Future<Output = Result<(), MutationError>> + Send;

    /// Gives a held seat back.
    fn unregister(
        &self,
        shift_id: ShiftId,
        volunteer_id: VolunteerId,
    ) -> impl Future<Output = Result<(), MutationError>> + Send;

    /// Validates the volunteer's attendance on a shift.
    fn validate_attendance(
        &self,
        shift_id: ShiftId,
        volunteer_id: VolunteerId,
    ) -> impl Future<Output = Result<AttendanceOutcome, MutationError>> + Send;
}

/// A push transport delivering one JSON shift snapshot per message.
pub trait PushChannel: Send + Sync + 'static {
    /// The stream of raw inbound messages.
    ///
    /// The stream ends when the transport disconnects.
    type Stream: Stream<Item = Result<String, TransportError>> + Send + Unpin + 'static;

    /// Opens a connection scoped to `topic`.
    fn open(&self, topic: &str) -> impl Future<Output = Result<Self::Stream, TransportError>> + Send;
}

/// How a confirmation surface was closed without confirming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DismissReason {
    /// Click outside the dialog.
    Backdrop,
    /// The explicit cancel button.
    Cancel,
    /// The escape key.
    Escape,
}

/// The volunteer's answer to a confirmation surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    /// Proceed, with the note typed into the surface (registrations only).
    Confirmed {
        /// Free-text note; ignored for cancellations.
        note: Option<String>,
    },
    /// Closed without confirming.
    Dismissed(DismissReason),
}

/// What the confirmation surface shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmationRequest {
    /// The action being confirmed.
    pub action: ReservationAction,
    /// Mission and shift description.
    pub detail: ShiftDetail,
    /// Whether the surface offers a note field.
    pub accepts_note: bool,
}

/// A transient notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Something succeeded.
    Success(String),
    /// Something failed; server messages are carried verbatim.
    Error(String),
}

/// The user-facing surface of the reservation workflow.
pub trait ReservationSurface: Send + Sync + 'static {
    /// Shows the confirmation surface and waits for the volunteer.
    fn confirm(&self, request: &ConfirmationRequest)
    -> impl Future<Output = Confirmation> + Send;

    /// Shows a blocking quota warning. Returns true to proceed.
    fn acknowledge(&self, warning: WarningKind) -> impl Future<Output = bool> + Send;

    /// Shows a transient notification.
    fn notify(&self, notice: Notice);
}
