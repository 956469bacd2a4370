// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

//! Capacity cache and live reservation workflow.
//!
//! A `ShiftBoard` keeps every open view of shift availability consistent
//! with the store: pushed snapshots overwrite the `CapacityCache` and are
//! projected onto the rendered `ShiftDocument` in place, while the
//! reservation workflow drives one register/unregister round trip per
//! shift.

mod board;
mod cache;
mod error;
mod feed;
mod ports;
mod projector;
mod view;
mod workflow;

#[cfg(test)]
mod tests;

pub use board::{BoardConfig, BoardStatus, DEFAULT_TOPIC, ShiftBoard};
pub use cache::CapacityCache;
pub use error::{CoreError, MutationError, TransportError};
pub use feed::{ChangeFeedListener, FeedStatus, LiveView, PushOutcome, SharedView, Subscription};
pub use ports::{
    Confirmation, ConfirmationRequest, DismissReason, Notice, PushChannel, RegistrationRequest,
    ReservationSurface, ShiftGateway,
};
pub use projector::project;
pub use view::{
    BoardTab, NodeId, ReservedPoolBadge, Section, ShiftControl, ShiftDocument, ShiftFilter,
    ShiftFragment, StatusBadge, ViewContext, YOUR_SHIFTS_HEADING,
};
pub use workflow::{Phase, ReservationAction, WorkflowEvent, WorkflowOutcome, WorkflowTable};
