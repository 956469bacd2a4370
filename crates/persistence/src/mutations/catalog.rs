// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use shiftboard_domain::{Mission, ShiftSnapshot};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::{
    NewMission, NewShift, VolunteerData, format_date, format_time, format_timestamp,
};
use crate::diesel_schema::{missions, shifts, volunteers};
use crate::error::PersistenceError;
use crate::queries::catalog::{get_mission_row, get_shift_row, get_volunteer};

/// Creates a mission and returns it as stored.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_mission(
    conn: &mut SqliteConnection,
    mission: &NewMission,
) -> Result<Mission, PersistenceError> {
    let publish_at: Option<String> = mission.publish_at.map(format_timestamp).transpose()?;

    diesel::insert_into(missions::table)
        .values((
            missions::title.eq(&mission.title),
            missions::mission_date.eq(format_date(mission.date)?),
            missions::location.eq(&mission.location),
            missions::visible.eq(i32::from(mission.visible)),
            missions::publish_at.eq(publish_at),
        ))
        .execute(conn)?;

    let mission_id: i64 = conn.get_last_insert_rowid()?;
    info!(mission_id, title = %mission.title, "Created mission");

    get_mission_row(conn, mission_id)?.into_domain()
}

/// Creates a shift with empty counters and returns its snapshot.
///
/// # Errors
///
/// Returns `PersistenceError::MissionNotFound` if the mission does not
/// exist, or an error if the insert fails.
pub fn create_shift(
    conn: &mut SqliteConnection,
    shift: &NewShift,
) -> Result<ShiftSnapshot, PersistenceError> {
    let mission_id: i64 = shift.mission_id.value();
    get_mission_row(conn, mission_id)?;

    diesel::insert_into(shifts::table)
        .values((
            shifts::mission_id.eq(mission_id),
            shifts::start_time.eq(format_time(shift.start_time)?),
            shifts::end_time.eq(format_time(shift.end_time)?),
            shifts::max_slots.eq(shift.max_slots),
            shifts::total_registrations.eq(0_i64),
            shifts::reserved_slots.eq(shift.reserved_slots),
            shifts::reserved_taken.eq(0_i64),
            shifts::hours_value.eq(shift.hours_value),
        ))
        .execute(conn)?;

    let shift_id: i64 = conn.get_last_insert_rowid()?;
    info!(
        shift_id,
        mission_id,
        max_slots = shift.max_slots,
        reserved_slots = shift.reserved_slots,
        "Created shift"
    );

    get_shift_row(conn, shift_id)?.to_snapshot()
}

/// Creates a volunteer with no completed hours.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_volunteer(
    conn: &mut SqliteConnection,
    display_name: &str,
    mandatory_hours: bool,
) -> Result<VolunteerData, PersistenceError> {
    diesel::insert_into(volunteers::table)
        .values((
            volunteers::display_name.eq(display_name),
            volunteers::mandatory_hours.eq(i32::from(mandatory_hours)),
            volunteers::hours_completed.eq(0.0),
        ))
        .execute(conn)?;

    let volunteer_id: i64 = conn.get_last_insert_rowid()?;
    info!(volunteer_id, mandatory_hours, "Created volunteer");

    get_volunteer(conn, volunteer_id)
}
