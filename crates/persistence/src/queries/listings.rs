// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use shiftboard_domain::{
    Mission, Registration, ShiftDetail, ShiftId, ShiftListing, ShiftSnapshot,
};
use std::collections::HashMap;
use time::OffsetDateTime;
use tracing::debug;

use crate::data_models::{MissionRow, RegistrationRow, ShiftRow};
use crate::diesel_schema::{missions, registrations, shifts};
use crate::error::PersistenceError;
use crate::queries::catalog::{get_mission_row, get_shift_row};

/// Lists every shift of every mission visible at `now`, with the
/// volunteer's registration on each.
///
/// Missions are ordered by date, shifts by start time.
///
/// # Errors
///
/// Returns an error if a query fails or a stored value is malformed.
pub fn list_visible_shifts(
    conn: &mut SqliteConnection,
    volunteer_id: i64,
    now: OffsetDateTime,
) -> Result<Vec<ShiftListing>, PersistenceError> {
    let visible: Vec<Mission> = missions::table
        .order((missions::mission_date.asc(), missions::mission_id.asc()))
        .select(MissionRow::as_select())
        .load(conn)?
        .into_iter()
        .map(MissionRow::into_domain)
        .collect::<Result<Vec<Mission>, PersistenceError>>()?
        .into_iter()
        .filter(|mission| mission.is_visible_at(now))
        .collect();

    let mission_ids: Vec<i64> = visible.iter().map(|mission| mission.id.value()).collect();

    let shift_rows: Vec<ShiftRow> = shifts::table
        .filter(shifts::mission_id.eq_any(mission_ids))
        .order((shifts::start_time.asc(), shifts::shift_id.asc()))
        .select(ShiftRow::as_select())
        .load(conn)?;

    let shift_ids: Vec<i64> = shift_rows.iter().map(|row| row.shift_id).collect();
    let mut held: HashMap<ShiftId, Registration> = registrations::table
        .filter(registrations::volunteer_id.eq(volunteer_id))
        .filter(registrations::shift_id.eq_any(shift_ids))
        .select(RegistrationRow::as_select())
        .load(conn)?
        .into_iter()
        .map(|row| {
            let registration: Registration = row.into_domain();
            (registration.shift_id, registration)
        })
        .collect();

    let mut by_mission: HashMap<i64, Vec<ShiftRow>> = HashMap::new();
    for row in shift_rows {
        by_mission.entry(row.mission_id).or_default().push(row);
    }

    let mut listings: Vec<ShiftListing> = Vec::new();
    for mission in visible {
        for row in by_mission.remove(&mission.id.value()).unwrap_or_default() {
            let snapshot: ShiftSnapshot = row.to_snapshot()?;
            listings.push(ShiftListing {
                mission: mission.clone(),
                registration: held.remove(&snapshot.id),
                snapshot,
            });
        }
    }

    debug!(volunteer_id, shifts = listings.len(), "Listed visible shifts");
    Ok(listings)
}

/// Loads a shift and its mission.
///
/// Visibility is not checked.
///
/// # Errors
///
/// Returns `PersistenceError::ShiftNotFound` if the shift does not exist.
pub fn get_shift_detail(
    conn: &mut SqliteConnection,
    shift_id: i64,
) -> Result<ShiftDetail, PersistenceError> {
    let shift: ShiftRow = get_shift_row(conn, shift_id)?;
    let mission: Mission = get_mission_row(conn, shift.mission_id)?.into_domain()?;
    Ok(ShiftDetail {
        mission,
        snapshot: shift.to_snapshot()?,
    })
}
