// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Surgical updates of rendered fragments.

use crate::view::{ReservedPoolBadge, ShiftDocument, ShiftFragment, StatusBadge};
use crate::workflow::ReservationAction;
use shiftboard_domain::{AvailabilityBand, ReservedBadge, ShiftId, ShiftSnapshot, control_enabled};

/// Writes a snapshot's figures into one fragment.
///
/// Initial render and projection both go through here so the two can never
/// disagree on a threshold.
pub(crate) fn paint(fragment: &mut ShiftFragment, snapshot: &ShiftSnapshot, locked: bool) {
    fragment.available_label = snapshot.available().to_string();
    fragment.status_badge = StatusBadge::for_band(AvailabilityBand::of(snapshot));
    fragment.reserved_badge = ReservedPoolBadge::for_state(ReservedBadge::of(snapshot));

    let enabled: bool = !locked && control_enabled(snapshot, fragment.viewer_registered);
    fragment.control.busy = locked;
    fragment.control.enabled = enabled;
    fragment.control.label = control_label(fragment.control.action, enabled, locked);
}

fn control_label(action: ReservationAction, enabled: bool, locked: bool) -> String {
    let label: &str = match (action, enabled, locked) {
        (_, _, true) => "Saving...",
        (ReservationAction::Register, false, false) => "Full",
        (ReservationAction::Register, true, false) => "Register",
        (ReservationAction::Unregister, _, false) => "Cancel registration",
    };
    label.to_string()
}

/// Applies a snapshot to every fragment tagged with `shift_id`.
///
/// Only fields change: node ids, sections and view state are untouched, and
/// applying the same snapshot twice leaves the document as after the first
/// application. Returns the number of fragments updated.
pub fn project(
    document: &mut ShiftDocument,
    shift_id: ShiftId,
    snapshot: &ShiftSnapshot,
    locked: bool,
) -> usize {
    let mut updated: usize = 0;
    for fragment in document.fragments_for_mut(shift_id) {
        paint(fragment, snapshot, locked);
        updated += 1;
    }
    updated
}
