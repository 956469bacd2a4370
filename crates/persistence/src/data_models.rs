// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and their conversion to domain values.
//!
//! Dates and times are stored as text: missions as `YYYY-MM-DD`, shift
//! times as `HH:MM:SS`, publish timestamps as RFC 3339.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use shiftboard_domain::{
    Mission, MissionId, Registration, ShiftId, ShiftSnapshot, VolunteerId, VolunteerProfile,
};
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, Time};

use crate::diesel_schema::{missions, registrations, shifts, volunteers};
use crate::error::PersistenceError;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const TIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute]:[second]");

pub fn format_date(date: Date) -> Result<String, PersistenceError> {
    date.format(DATE_FORMAT)
        .map_err(|e| PersistenceError::InvalidRecord(format!("Cannot format date: {e}")))
}

pub fn format_time(value: Time) -> Result<String, PersistenceError> {
    value
        .format(TIME_FORMAT)
        .map_err(|e| PersistenceError::InvalidRecord(format!("Cannot format time: {e}")))
}

pub fn format_timestamp(value: OffsetDateTime) -> Result<String, PersistenceError> {
    value
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::InvalidRecord(format!("Cannot format timestamp: {e}")))
}

fn parse_date(value: &str) -> Result<Date, PersistenceError> {
    Date::parse(value, DATE_FORMAT)
        .map_err(|e| PersistenceError::InvalidRecord(format!("Invalid date '{value}': {e}")))
}

fn parse_time(value: &str) -> Result<Time, PersistenceError> {
    Time::parse(value, TIME_FORMAT)
        .map_err(|e| PersistenceError::InvalidRecord(format!("Invalid time '{value}': {e}")))
}

fn parse_timestamp(value: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(value, &Rfc3339)
        .map_err(|e| PersistenceError::InvalidRecord(format!("Invalid timestamp '{value}': {e}")))
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = missions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MissionRow {
    pub mission_id: i64,
    pub title: String,
    pub mission_date: String,
    pub location: String,
    pub visible: i32,
    pub publish_at: Option<String>,
}

impl MissionRow {
    pub fn into_domain(self) -> Result<Mission, PersistenceError> {
        Ok(Mission {
            id: MissionId::new(self.mission_id),
            date: parse_date(&self.mission_date)?,
            publish_at: self.publish_at.as_deref().map(parse_timestamp).transpose()?,
            title: self.title,
            location: self.location,
            visible: self.visible != 0,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = shifts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ShiftRow {
    pub shift_id: i64,
    pub mission_id: i64,
    pub start_time: String,
    pub end_time: String,
    pub max_slots: i64,
    pub total_registrations: i64,
    pub reserved_slots: i64,
    pub reserved_taken: i64,
    pub hours_value: f64,
}

impl ShiftRow {
    pub fn to_snapshot(&self) -> Result<ShiftSnapshot, PersistenceError> {
        Ok(
            ShiftSnapshot::new(
                ShiftId::new(self.shift_id),
                self.max_slots,
                self.total_registrations,
            )
            .with_reserved(self.reserved_slots, self.reserved_taken)
            .with_hours(self.hours_value)
            .with_schedule(
                MissionId::new(self.mission_id),
                parse_time(&self.start_time)?,
                parse_time(&self.end_time)?,
            ),
        )
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = registrations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RegistrationRow {
    pub shift_id: i64,
    pub volunteer_id: i64,
    pub hour_eligible: i32,
    pub counts_against_reserve: i32,
    pub note: Option<String>,
    pub attended: i32,
}

impl RegistrationRow {
    pub fn into_domain(self) -> Registration {
        Registration {
            shift_id: ShiftId::new(self.shift_id),
            volunteer_id: VolunteerId::new(self.volunteer_id),
            hour_eligible: self.hour_eligible != 0,
            counts_against_reserve: self.counts_against_reserve != 0,
            note: self.note,
            attended: self.attended != 0,
        }
    }
}

/// A stored volunteer.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = volunteers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct VolunteerData {
    pub volunteer_id: i64,
    pub display_name: String,
    pub mandatory_hours: i32,
    pub hours_completed: f64,
}

impl VolunteerData {
    /// Returns the quota-relevant profile of this volunteer.
    #[must_use]
    pub const fn profile(&self) -> VolunteerProfile {
        VolunteerProfile::new(
            VolunteerId::new(self.volunteer_id),
            self.mandatory_hours != 0,
        )
    }
}

/// Input for creating a mission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMission {
    pub title: String,
    pub date: Date,
    pub location: String,
    pub visible: bool,
    pub publish_at: Option<OffsetDateTime>,
}

/// Input for creating a shift. Counters start at zero.
#[derive(Debug, Clone, PartialEq)]
pub struct NewShift {
    pub mission_id: MissionId,
    pub start_time: Time,
    pub end_time: Time,
    pub max_slots: i64,
    pub reserved_slots: i64,
    pub hours_value: f64,
}
