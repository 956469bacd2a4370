// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::{MissionRow, RegistrationRow, ShiftRow, VolunteerData};
use crate::diesel_schema::{missions, registrations, shifts, volunteers};
use crate::error::PersistenceError;

/// Loads one mission.
///
/// # Errors
///
/// Returns `PersistenceError::MissionNotFound` if no such mission exists.
pub fn get_mission_row(
    conn: &mut SqliteConnection,
    mission_id: i64,
) -> Result<MissionRow, PersistenceError> {
    missions::table
        .find(mission_id)
        .select(MissionRow::as_select())
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::MissionNotFound(mission_id))
}

/// Loads one shift with its current counters.
///
/// # Errors
///
/// Returns `PersistenceError::ShiftNotFound` if no such shift exists.
pub fn get_shift_row(
    conn: &mut SqliteConnection,
    shift_id: i64,
) -> Result<ShiftRow, PersistenceError> {
    shifts::table
        .find(shift_id)
        .select(ShiftRow::as_select())
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::ShiftNotFound(shift_id))
}

/// Loads one volunteer.
///
/// # Errors
///
/// Returns `PersistenceError::VolunteerNotFound` if no such volunteer exists.
pub fn get_volunteer(
    conn: &mut SqliteConnection,
    volunteer_id: i64,
) -> Result<VolunteerData, PersistenceError> {
    volunteers::table
        .find(volunteer_id)
        .select(VolunteerData::as_select())
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::VolunteerNotFound(volunteer_id))
}

/// Loads a volunteer's registration on a shift, if any.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_registration(
    conn: &mut SqliteConnection,
    shift_id: i64,
    volunteer_id: i64,
) -> Result<Option<RegistrationRow>, PersistenceError> {
    Ok(registrations::table
        .filter(registrations::shift_id.eq(shift_id))
        .filter(registrations::volunteer_id.eq(volunteer_id))
        .select(RegistrationRow::as_select())
        .first(conn)
        .optional()?)
}
