// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API operations.
//!
//! Each operation validates its request, calls the store, and translates
//! failures into `ApiError`. The store owns every seat counter; nothing here
//! re-checks capacity.

use shiftboard_domain::{
    AttendanceOutcome, Mission, MissionId, ShiftDetail, ShiftId, ShiftListing, ShiftSnapshot,
    VolunteerId, normalize_note, validate_hours_value, validate_mission_fields,
    validate_shift_capacity, validate_shift_times, validate_volunteer_name,
};
use shiftboard_persistence::{NewMission, NewShift, SqlitePersistence, VolunteerData};
use time::OffsetDateTime;
use tracing::info;

use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::request_response::{
    AttendanceRequest, CreateMissionRequest, CreateShiftRequest, CreateVolunteerRequest,
    ListShiftsResponse, RegisterRequest, RegistrationResponse, UnregisterRequest,
    VolunteerResponse,
};

/// Message returned after a successful registration.
pub const REGISTERED_MESSAGE: &str = "You are registered for this shift";

/// Message returned after a successful cancellation.
pub const UNREGISTERED_MESSAGE: &str = "Your registration was cancelled";

fn parse_ids(shift_id: i64, volunteer_id: i64) -> Result<(ShiftId, VolunteerId), ApiError> {
    let shift: ShiftId = ShiftId::parse(shift_id).map_err(translate_domain_error)?;
    let volunteer: VolunteerId = VolunteerId::parse(volunteer_id).map_err(translate_domain_error)?;
    Ok((shift, volunteer))
}

/// Lists every shift visible at `now`, with the volunteer's registrations.
///
/// # Errors
///
/// Returns an error if:
/// - The volunteer id is not positive
/// - The volunteer does not exist
pub fn list_shifts(
    persistence: &mut SqlitePersistence,
    volunteer_id: i64,
    now: OffsetDateTime,
) -> Result<ListShiftsResponse, ApiError> {
    let volunteer: VolunteerId = VolunteerId::parse(volunteer_id).map_err(translate_domain_error)?;
    persistence
        .get_volunteer(volunteer.value())
        .map_err(translate_persistence_error)?;

    let shifts: Vec<ShiftListing> = persistence
        .list_visible_shifts(volunteer.value(), now)
        .map_err(translate_persistence_error)?;

    Ok(ListShiftsResponse {
        volunteer_id: volunteer.value(),
        shifts,
    })
}

/// Loads a shift and its mission for the confirmation surface.
///
/// # Errors
///
/// Returns an error if the id is not positive or the shift does not exist.
pub fn shift_detail(
    persistence: &mut SqlitePersistence,
    shift_id: i64,
) -> Result<ShiftDetail, ApiError> {
    let shift: ShiftId = ShiftId::parse(shift_id).map_err(translate_domain_error)?;
    persistence
        .get_shift_detail(shift.value())
        .map_err(translate_persistence_error)
}

/// Registers a volunteer for a shift.
///
/// Blank notes are dropped; other notes are trimmed.
///
/// # Errors
///
/// Returns an error if:
/// - Either id is not positive
/// - The note is too long
/// - The shift is full or the volunteer is already registered
/// - The shift or volunteer does not exist
pub fn register(
    persistence: &mut SqlitePersistence,
    request: &RegisterRequest,
) -> Result<RegistrationResponse, ApiError> {
    let (shift, volunteer) = parse_ids(request.shift_id, request.volunteer_id)?;
    let note: Option<String> =
        normalize_note(request.note.as_deref()).map_err(translate_domain_error)?;

    let snapshot: ShiftSnapshot = persistence
        .register(shift.value(), volunteer.value(), note.as_deref())
        .map_err(translate_persistence_error)?;

    info!(
        shift_id = shift.value(),
        volunteer_id = volunteer.value(),
        available = snapshot.available(),
        "Registration accepted"
    );

    Ok(RegistrationResponse {
        snapshot,
        message: String::from(REGISTERED_MESSAGE),
    })
}

/// Cancels a volunteer's registration.
///
/// # Errors
///
/// Returns an error if either id is not positive or the volunteer is not
/// registered.
pub fn unregister(
    persistence: &mut SqlitePersistence,
    request: &UnregisterRequest,
) -> Result<RegistrationResponse, ApiError> {
    let (shift, volunteer) = parse_ids(request.shift_id, request.volunteer_id)?;

    let snapshot: ShiftSnapshot = persistence
        .unregister(shift.value(), volunteer.value())
        .map_err(translate_persistence_error)?;

    info!(
        shift_id = shift.value(),
        volunteer_id = volunteer.value(),
        available = snapshot.available(),
        "Registration cancelled"
    );

    Ok(RegistrationResponse {
        snapshot,
        message: String::from(UNREGISTERED_MESSAGE),
    })
}

/// Records attendance and credits hours when the registration is eligible.
///
/// # Errors
///
/// Returns an error if either id is not positive, the volunteer is not
/// registered, or attendance was already recorded.
pub fn validate_attendance(
    persistence: &mut SqlitePersistence,
    request: &AttendanceRequest,
) -> Result<AttendanceOutcome, ApiError> {
    let (shift, volunteer) = parse_ids(request.shift_id, request.volunteer_id)?;
    persistence
        .validate_attendance(shift.value(), volunteer.value())
        .map_err(translate_persistence_error)
}

/// Creates a mission.
///
/// # Errors
///
/// Returns an error if the title or location is blank.
pub fn create_mission(
    persistence: &mut SqlitePersistence,
    request: &CreateMissionRequest,
) -> Result<Mission, ApiError> {
    validate_mission_fields(&request.title, &request.location).map_err(translate_domain_error)?;

    let mission: Mission = persistence
        .create_mission(&NewMission {
            title: request.title.trim().to_string(),
            date: request.date,
            location: request.location.trim().to_string(),
            visible: request.visible,
            publish_at: request.publish_at,
        })
        .map_err(translate_persistence_error)?;

    Ok(mission)
}

/// Creates a shift with no registrations.
///
/// # Errors
///
/// Returns an error if:
/// - The mission id is not positive or the mission does not exist
/// - The end time does not follow the start time
/// - A seat count is negative or the reserved pool exceeds the shift
/// - The hours value is negative or not finite
pub fn create_shift(
    persistence: &mut SqlitePersistence,
    request: &CreateShiftRequest,
) -> Result<ShiftSnapshot, ApiError> {
    let mission: MissionId = MissionId::parse(request.mission_id).map_err(translate_domain_error)?;
    validate_shift_times(request.start_time, request.end_time).map_err(translate_domain_error)?;
    validate_shift_capacity(request.max_slots, request.reserved_slots)
        .map_err(translate_domain_error)?;
    validate_hours_value(request.hours_value).map_err(translate_domain_error)?;

    persistence
        .create_shift(&NewShift {
            mission_id: mission,
            start_time: request.start_time,
            end_time: request.end_time,
            max_slots: request.max_slots,
            reserved_slots: request.reserved_slots,
            hours_value: request.hours_value,
        })
        .map_err(translate_persistence_error)
}

/// Creates a volunteer.
///
/// # Errors
///
/// Returns an error if the display name is blank.
pub fn create_volunteer(
    persistence: &mut SqlitePersistence,
    request: &CreateVolunteerRequest,
) -> Result<VolunteerResponse, ApiError> {
    validate_volunteer_name(&request.display_name).map_err(translate_domain_error)?;

    let volunteer: VolunteerData = persistence
        .create_volunteer(request.display_name.trim(), request.mandatory_hours)
        .map_err(translate_persistence_error)?;

    Ok(VolunteerResponse::from(volunteer))
}
