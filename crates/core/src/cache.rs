// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use shiftboard_domain::{ShiftId, ShiftSnapshot};
use std::collections::HashMap;

/// The locally authoritative snapshot of every shift the view has seen.
///
/// Entries are replaced wholesale; the last write wins. The store is the
/// only source of counter values, so nothing here adjusts them.
#[derive(Debug, Clone, Default)]
pub struct CapacityCache {
    snapshots: HashMap<ShiftId, ShiftSnapshot>,
}

impl CapacityCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the snapshots of an initial fetch, dropping everything else.
    pub fn seed(&mut self, snapshots: impl IntoIterator<Item = ShiftSnapshot>) {
        self.snapshots.clear();
        for snapshot in snapshots {
            self.snapshots.insert(snapshot.id, snapshot);
        }
    }

    /// Loads the snapshots of a fetch, except for the shifts `keep` selects,
    /// whose cached entries stay as they are.
    ///
    /// Used when pushes arrived while the fetch was in flight: those pushes
    /// are at least as new as the fetched rows.
    pub fn seed_keeping(
        &mut self,
        snapshots: impl IntoIterator<Item = ShiftSnapshot>,
        keep: impl Fn(ShiftId) -> bool,
    ) {
        self.snapshots.retain(|shift_id, _| keep(*shift_id));
        for snapshot in snapshots {
            if !keep(snapshot.id) {
                self.snapshots.insert(snapshot.id, snapshot);
            }
        }
    }

    /// Returns the current snapshot of a shift.
    #[must_use]
    pub fn get(&self, shift_id: ShiftId) -> Option<&ShiftSnapshot> {
        self.snapshots.get(&shift_id)
    }

    /// Overwrites a shift's snapshot, returning the one it replaced.
    pub fn replace(&mut self, snapshot: ShiftSnapshot) -> Option<ShiftSnapshot> {
        self.snapshots.insert(snapshot.id, snapshot)
    }

    /// Drops every entry.
    pub fn evict_all(&mut self) {
        self.snapshots.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
