// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use shiftboard_domain::{Mission, ShiftSnapshot};
use shiftboard_persistence::SqlitePersistence;
use time::OffsetDateTime;
use time::macros::{date, datetime, time};

use crate::{
    CreateMissionRequest, CreateShiftRequest, CreateVolunteerRequest, RegisterRequest,
    VolunteerResponse, create_mission, create_shift, create_volunteer,
};

pub const NOW: OffsetDateTime = datetime!(2026-10-16 12:00 UTC);

pub fn create_test_persistence() -> SqlitePersistence {
    SqlitePersistence::new_in_memory().unwrap()
}

pub fn create_test_mission_request() -> CreateMissionRequest {
    CreateMissionRequest {
        title: String::from("Harbour clean-up"),
        date: date!(2026 - 11 - 14),
        location: String::from("North pier"),
        visible: true,
        publish_at: None,
    }
}

pub fn create_test_shift_request(mission_id: i64, max_slots: i64) -> CreateShiftRequest {
    CreateShiftRequest {
        mission_id,
        start_time: time!(08:00),
        end_time: time!(11:30),
        max_slots,
        reserved_slots: 0,
        hours_value: 3.5,
    }
}

/// A store holding one mission with one shift of `max_slots` seats.
pub struct Seeded {
    pub persistence: SqlitePersistence,
    pub mission: Mission,
    pub shift: ShiftSnapshot,
}

pub fn seed(max_slots: i64) -> Seeded {
    let mut persistence: SqlitePersistence = create_test_persistence();
    let mission: Mission = create_mission(&mut persistence, &create_test_mission_request()).unwrap();
    let shift: ShiftSnapshot = create_shift(
        &mut persistence,
        &create_test_shift_request(mission.id.value(), max_slots),
    )
    .unwrap();
    Seeded {
        persistence,
        mission,
        shift,
    }
}

pub fn add_volunteer(persistence: &mut SqlitePersistence, name: &str) -> i64 {
    let volunteer: VolunteerResponse = create_volunteer(
        persistence,
        &CreateVolunteerRequest {
            display_name: String::from(name),
            mandatory_hours: false,
        },
    )
    .unwrap();
    volunteer.volunteer_id
}

pub fn register_request(shift_id: i64, volunteer_id: i64) -> RegisterRequest {
    RegisterRequest {
        shift_id,
        volunteer_id,
        note: None,
    }
}
