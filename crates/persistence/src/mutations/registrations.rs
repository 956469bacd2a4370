// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The registration procedures.
//!
//! Each runs in one immediate transaction, so the capacity check and the
//! counter update cannot interleave with another writer. The shift's
//! `total_registrations` and `reserved_taken` are changed only here.

use diesel::SqliteConnection;
use diesel::prelude::*;
use shiftboard_domain::{
    AttendanceOutcome, QuotaDecision, ShiftId, ShiftSnapshot, VolunteerId, decide,
};
use tracing::{info, warn};

use crate::data_models::{RegistrationRow, ShiftRow, VolunteerData};
use crate::diesel_schema::{registrations, shifts, volunteers};
use crate::error::PersistenceError;
use crate::queries::catalog::{get_registration, get_shift_row, get_volunteer};

/// Takes a seat on a shift and returns the shift's fresh snapshot.
///
/// Hour eligibility and reserved-pool use are decided by the quota policy
/// against the counters read inside the transaction.
///
/// # Errors
///
/// Returns an error if:
/// - The shift or volunteer does not exist
/// - The volunteer is already registered
/// - The shift is full
pub fn register(
    conn: &mut SqliteConnection,
    shift_id: i64,
    volunteer_id: i64,
    note: Option<&str>,
) -> Result<ShiftSnapshot, PersistenceError> {
    conn.immediate_transaction(|conn| {
        let shift: ShiftRow = get_shift_row(conn, shift_id)?;
        let volunteer: VolunteerData = get_volunteer(conn, volunteer_id)?;

        if get_registration(conn, shift_id, volunteer_id)?.is_some() {
            return Err(PersistenceError::AlreadyRegistered {
                shift_id,
                volunteer_id,
            });
        }

        let snapshot: ShiftSnapshot = shift.to_snapshot()?;
        if snapshot.is_full() {
            warn!(shift_id, volunteer_id, "Rejected registration on full shift");
            return Err(PersistenceError::ShiftFull { shift_id });
        }

        let decision: QuotaDecision = decide(&snapshot, &volunteer.profile());

        diesel::insert_into(registrations::table)
            .values((
                registrations::shift_id.eq(shift_id),
                registrations::volunteer_id.eq(volunteer_id),
                registrations::hour_eligible.eq(i32::from(decision.will_credit_hours)),
                registrations::counts_against_reserve
                    .eq(i32::from(decision.counts_against_reserve)),
                registrations::note.eq(note),
            ))
            .execute(conn)?;

        diesel::update(shifts::table.find(shift_id))
            .set((
                shifts::total_registrations.eq(shifts::total_registrations + 1_i64),
                shifts::reserved_taken
                    .eq(shifts::reserved_taken + i64::from(decision.counts_against_reserve)),
            ))
            .execute(conn)?;

        info!(
            shift_id,
            volunteer_id,
            hour_eligible = decision.will_credit_hours,
            counts_against_reserve = decision.counts_against_reserve,
            "Registered volunteer"
        );

        get_shift_row(conn, shift_id)?.to_snapshot()
    })
}

/// Gives a held seat back and returns the shift's fresh snapshot.
///
/// # Errors
///
/// Returns `PersistenceError::NotRegistered` if the volunteer holds no seat
/// on the shift, or `PersistenceError::ShiftNotFound` if the shift does not
/// exist.
pub fn unregister(
    conn: &mut SqliteConnection,
    shift_id: i64,
    volunteer_id: i64,
) -> Result<ShiftSnapshot, PersistenceError> {
    conn.immediate_transaction(|conn| {
        get_shift_row(conn, shift_id)?;
        let registration: RegistrationRow = get_registration(conn, shift_id, volunteer_id)?
            .ok_or(PersistenceError::NotRegistered {
                shift_id,
                volunteer_id,
            })?;

        diesel::delete(
            registrations::table
                .filter(registrations::shift_id.eq(shift_id))
                .filter(registrations::volunteer_id.eq(volunteer_id)),
        )
        .execute(conn)?;

        let released_reserve: i64 = i64::from(registration.counts_against_reserve != 0);
        diesel::update(shifts::table.find(shift_id))
            .set((
                shifts::total_registrations.eq(shifts::total_registrations - 1_i64),
                shifts::reserved_taken.eq(shifts::reserved_taken - released_reserve),
            ))
            .execute(conn)?;

        info!(shift_id, volunteer_id, "Unregistered volunteer");

        get_shift_row(conn, shift_id)?.to_snapshot()
    })
}

/// Marks a registration as attended and credits the shift's hours when the
/// registration is hour-eligible.
///
/// # Errors
///
/// Returns `PersistenceError::NotRegistered` if there is no registration,
/// or `PersistenceError::AlreadyValidated` if attendance was already
/// recorded.
pub fn validate_attendance(
    conn: &mut SqliteConnection,
    shift_id: i64,
    volunteer_id: i64,
) -> Result<AttendanceOutcome, PersistenceError> {
    conn.immediate_transaction(|conn| {
        let shift: ShiftRow = get_shift_row(conn, shift_id)?;
        let registration: RegistrationRow = get_registration(conn, shift_id, volunteer_id)?
            .ok_or(PersistenceError::NotRegistered {
                shift_id,
                volunteer_id,
            })?;

        if registration.attended != 0 {
            return Err(PersistenceError::AlreadyValidated {
                shift_id,
                volunteer_id,
            });
        }

        diesel::update(
            registrations::table
                .filter(registrations::shift_id.eq(shift_id))
                .filter(registrations::volunteer_id.eq(volunteer_id)),
        )
        .set(registrations::attended.eq(1))
        .execute(conn)?;

        let hours_credited: f64 = if registration.hour_eligible != 0 {
            shift.hours_value
        } else {
            0.0
        };

        if hours_credited > 0.0 {
            diesel::update(volunteers::table.find(volunteer_id))
                .set(volunteers::hours_completed.eq(volunteers::hours_completed + hours_credited))
                .execute(conn)?;
        }

        info!(shift_id, volunteer_id, hours_credited, "Validated attendance");

        Ok(AttendanceOutcome {
            shift_id: ShiftId::new(shift_id),
            volunteer_id: VolunteerId::new(volunteer_id),
            hours_credited,
        })
    })
}
