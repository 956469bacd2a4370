// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Field names are camelCase on the wire, like the snapshots pushed on the
//! live channel.

use serde::{Deserialize, Serialize};
use shiftboard_domain::{ShiftListing, ShiftSnapshot};
use shiftboard_persistence::VolunteerData;
use time::{Date, OffsetDateTime, Time};

time::serde::format_description!(request_date, Date, "[year]-[month]-[day]");
time::serde::format_description!(request_time, Time, "[hour]:[minute]:[second]");

/// API request to take a seat on a shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// The shift to register for.
    pub shift_id: i64,
    /// The registering volunteer.
    pub volunteer_id: i64,
    /// Optional free-text note for the organizers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// API request to give a seat back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnregisterRequest {
    /// The shift to leave.
    pub shift_id: i64,
    /// The volunteer leaving it.
    pub volunteer_id: i64,
}

/// API request to record that a volunteer attended a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRequest {
    /// The attended shift.
    pub shift_id: i64,
    /// The attending volunteer.
    pub volunteer_id: i64,
}

/// API response for a successful register or unregister.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    /// The shift's capacity right after the change.
    pub snapshot: ShiftSnapshot,
    /// A success message.
    pub message: String,
}

/// API response listing the shifts a volunteer can see.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListShiftsResponse {
    /// The volunteer the listing was built for.
    pub volunteer_id: i64,
    /// Visible shifts in mission order.
    pub shifts: Vec<ShiftListing>,
}

/// API request to create a mission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMissionRequest {
    /// Human-readable title.
    pub title: String,
    /// The mission date.
    #[serde(with = "request_date")]
    pub date: Date,
    /// Where the mission takes place.
    pub location: String,
    /// Whether volunteers can see the mission.
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Optional instant from which the mission becomes visible.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub publish_at: Option<OffsetDateTime>,
}

const fn default_visible() -> bool {
    true
}

/// API request to create a shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShiftRequest {
    /// The owning mission.
    pub mission_id: i64,
    /// Local start time of day.
    #[serde(with = "request_time")]
    pub start_time: Time,
    /// Local end time of day.
    #[serde(with = "request_time")]
    pub end_time: Time,
    /// Total bookable seats.
    pub max_slots: i64,
    /// Seats set aside for quota-bound volunteers.
    #[serde(default)]
    pub reserved_slots: i64,
    /// Hours credited per attended registration.
    pub hours_value: f64,
}

/// API request to create a volunteer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVolunteerRequest {
    /// The name shown to organizers.
    pub display_name: String,
    /// Whether the volunteer has a mandatory hours quota.
    #[serde(default)]
    pub mandatory_hours: bool,
}

/// API response describing a volunteer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerResponse {
    /// The volunteer identifier.
    pub volunteer_id: i64,
    /// The name shown to organizers.
    pub display_name: String,
    /// Whether the volunteer has a mandatory hours quota.
    pub mandatory_hours: bool,
    /// Hours credited so far.
    pub hours_completed: f64,
}

impl From<VolunteerData> for VolunteerResponse {
    fn from(data: VolunteerData) -> Self {
        Self {
            volunteer_id: data.volunteer_id,
            display_name: data.display_name,
            mandatory_hours: data.mandatory_hours != 0,
            hours_completed: data.hours_completed,
        }
    }
}
