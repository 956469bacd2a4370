// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod listing_tests;

use crate::{NewMission, NewShift, SqlitePersistence, VolunteerData};
use shiftboard_domain::{Mission, ShiftSnapshot};
use time::macros::{date, datetime, time};
use time::{Date, OffsetDateTime};

/// A fixed "now" that every visibility test is measured against.
pub const NOW: OffsetDateTime = datetime!(2026-10-16 12:00 UTC);

pub fn create_test_persistence() -> SqlitePersistence {
    SqlitePersistence::new_in_memory().unwrap()
}

pub fn new_mission(title: &str, date: Date) -> NewMission {
    NewMission {
        title: String::from(title),
        date,
        location: String::from("Community Hall"),
        visible: true,
        publish_at: None,
    }
}

pub fn create_test_mission(persistence: &mut SqlitePersistence) -> Mission {
    persistence
        .create_mission(&new_mission("Food drive", date!(2026 - 11 - 02)))
        .unwrap()
}

pub fn create_test_shift(
    persistence: &mut SqlitePersistence,
    mission: &Mission,
    max_slots: i64,
    reserved_slots: i64,
) -> ShiftSnapshot {
    persistence
        .create_shift(&NewShift {
            mission_id: mission.id,
            start_time: time!(09:00),
            end_time: time!(12:00),
            max_slots,
            reserved_slots,
            hours_value: 3.0,
        })
        .unwrap()
}

pub fn create_test_volunteer(
    persistence: &mut SqlitePersistence,
    mandatory_hours: bool,
) -> VolunteerData {
    persistence
        .create_volunteer("Alex", mandatory_hours)
        .unwrap()
}
