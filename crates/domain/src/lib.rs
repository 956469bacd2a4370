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

mod badge;
mod error;
mod policy;
mod snapshot;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use badge::{
    AvailabilityBand, BadgeTone, LOW_AVAILABILITY_THRESHOLD, ReservedBadge, control_enabled,
};
pub use error::DomainError;
pub use policy::{QuotaDecision, WarningKind, decide};
pub use snapshot::{ShiftSnapshot, SnapshotUpdate};
pub use types::{
    AttendanceOutcome, Mission, MissionId, Registration, ShiftDetail, ShiftId, ShiftListing,
    VolunteerId, VolunteerProfile,
};
pub use validation::{
    MAX_NOTE_LENGTH, normalize_note, validate_hours_value, validate_mission_fields,
    validate_shift_capacity, validate_shift_times, validate_volunteer_name,
};
