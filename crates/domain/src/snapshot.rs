// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shift capacity snapshots.
//!
//! A snapshot is a complete, self-contained description of one shift's
//! capacity at one instant. The push channel transmits snapshots verbatim,
//! and every consumer replaces its copy wholesale; there are no deltas.
//!
//! Counters are signed so that a snapshot violating the store's invariants
//! (for example `total_registrations > max_slots`) still deserializes. The
//! derived figures clamp at zero instead.

use crate::types::{MissionId, ShiftId};
use serde::{Deserialize, Serialize};
use time::Time;

time::serde::format_description!(shift_time, Time, "[hour]:[minute]:[second]");

/// One shift's capacity facts at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftSnapshot {
    /// The shift identifier.
    pub id: ShiftId,
    /// The owning mission, when the sender included it.
    #[serde(default)]
    pub mission_id: Option<MissionId>,
    /// Local start time of day.
    #[serde(default, with = "shift_time::option")]
    pub start_time: Option<Time>,
    /// Local end time of day.
    #[serde(default, with = "shift_time::option")]
    pub end_time: Option<Time>,
    /// Total bookable seats.
    pub max_slots: i64,
    /// Seats currently occupied.
    pub total_registrations: i64,
    /// Size of the sub-pool set aside for quota-bound volunteers.
    #[serde(default)]
    pub reserved_slots: i64,
    /// Seats within the sub-pool credited to quota-bound volunteers.
    #[serde(default)]
    pub reserved_taken: i64,
    /// Hours credited per attended registration.
    #[serde(default)]
    pub hours_value: f64,
}

impl ShiftSnapshot {
    /// Creates a snapshot carrying only capacity counters.
    ///
    /// Descriptive fields are left empty and `hours_value` is zero.
    #[must_use]
    pub const fn new(id: ShiftId, max_slots: i64, total_registrations: i64) -> Self {
        Self {
            id,
            mission_id: None,
            start_time: None,
            end_time: None,
            max_slots,
            total_registrations,
            reserved_slots: 0,
            reserved_taken: 0,
            hours_value: 0.0,
        }
    }

    /// Sets the reserved sub-pool counters.
    #[must_use]
    pub const fn with_reserved(mut self, reserved_slots: i64, reserved_taken: i64) -> Self {
        self.reserved_slots = reserved_slots;
        self.reserved_taken = reserved_taken;
        self
    }

    /// Sets the hours credited per attended registration.
    #[must_use]
    pub const fn with_hours(mut self, hours_value: f64) -> Self {
        self.hours_value = hours_value;
        self
    }

    /// Sets the owning mission and the time-of-day window.
    #[must_use]
    pub const fn with_schedule(mut self, mission_id: MissionId, start: Time, end: Time) -> Self {
        self.mission_id = Some(mission_id);
        self.start_time = Some(start);
        self.end_time = Some(end);
        self
    }

    /// Seats still bookable: `max(0, max_slots - total_registrations)`.
    #[must_use]
    pub fn available(&self) -> u32 {
        clamp_seats(self.max_slots.saturating_sub(self.total_registrations))
    }

    /// Seats left in the reserved sub-pool:
    /// `max(0, reserved_slots - reserved_taken)`.
    #[must_use]
    pub fn reserved_remaining(&self) -> u32 {
        clamp_seats(self.reserved_slots.saturating_sub(self.reserved_taken))
    }

    /// Returns true if the shift has a reserved sub-pool at all.
    #[must_use]
    pub const fn has_reserved_pool(&self) -> bool {
        self.reserved_slots > 0
    }

    /// Returns true if attending this shift credits any hours.
    #[must_use]
    pub fn credits_hours(&self) -> bool {
        self.hours_value > 0.0
    }

    /// Returns true if no seat is bookable.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.available() == 0
    }

    /// Returns this snapshot's descriptive fields with the capacity
    /// counters of `counters`.
    #[must_use]
    pub fn with_capacity_of(&self, counters: &Self) -> Self {
        Self {
            max_slots: counters.max_slots,
            total_registrations: counters.total_registrations,
            reserved_slots: counters.reserved_slots,
            reserved_taken: counters.reserved_taken,
            ..self.clone()
        }
    }
}

/// A snapshot as a push message carries it.
///
/// The capacity counters are always present. Descriptive fields may be left
/// out, in which case `merge_into` keeps the ones already known.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotUpdate {
    /// The shift identifier.
    pub id: ShiftId,
    #[serde(default)]
    pub mission_id: Option<MissionId>,
    #[serde(default, with = "shift_time::option")]
    pub start_time: Option<Time>,
    #[serde(default, with = "shift_time::option")]
    pub end_time: Option<Time>,
    pub max_slots: i64,
    pub total_registrations: i64,
    #[serde(default)]
    pub reserved_slots: i64,
    #[serde(default)]
    pub reserved_taken: i64,
    #[serde(default)]
    pub hours_value: Option<f64>,
}

impl SnapshotUpdate {
    /// Builds the full snapshot, taking absent descriptive fields from
    /// `previous`. Without a previous snapshot they stay empty and the
    /// hours value is zero.
    #[must_use]
    pub fn merge_into(self, previous: Option<&ShiftSnapshot>) -> ShiftSnapshot {
        ShiftSnapshot {
            id: self.id,
            mission_id: self
                .mission_id
                .or_else(|| previous.and_then(|known| known.mission_id)),
            start_time: self
                .start_time
                .or_else(|| previous.and_then(|known| known.start_time)),
            end_time: self
                .end_time
                .or_else(|| previous.and_then(|known| known.end_time)),
            max_slots: self.max_slots,
            total_registrations: self.total_registrations,
            reserved_slots: self.reserved_slots,
            reserved_taken: self.reserved_taken,
            hours_value: self
                .hours_value
                .or_else(|| previous.map(|known| known.hours_value))
                .unwrap_or_default(),
        }
    }
}

fn clamp_seats(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}
