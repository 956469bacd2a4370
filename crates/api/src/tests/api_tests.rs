// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{NOW, Seeded, add_volunteer, create_test_shift_request, register_request, seed};
use crate::{
    ApiError, AttendanceRequest, CreateShiftRequest, CreateVolunteerRequest, ListShiftsResponse,
    REGISTERED_MESSAGE, RegisterRequest, RegistrationResponse, UnregisterRequest,
    create_shift, create_volunteer, list_shifts, register, shift_detail, unregister,
    validate_attendance,
};
use shiftboard_domain::{AttendanceOutcome, ShiftDetail};
use time::macros::time;

#[test]
fn test_register_returns_fresh_snapshot() {
    let mut s: Seeded = seed(3);
    let volunteer: i64 = add_volunteer(&mut s.persistence, "Robin");

    let response: RegistrationResponse = register(
        &mut s.persistence,
        &register_request(s.shift.id.value(), volunteer),
    )
    .unwrap();

    assert_eq!(response.message, REGISTERED_MESSAGE);
    assert_eq!(response.snapshot.total_registrations, 1);
    assert_eq!(response.snapshot.available(), 2);
}

#[test]
fn test_register_trims_note_and_drops_blank_note() {
    let mut s: Seeded = seed(3);
    let first: i64 = add_volunteer(&mut s.persistence, "Robin");
    let second: i64 = add_volunteer(&mut s.persistence, "Sam");
    let shift_id: i64 = s.shift.id.value();

    register(
        &mut s.persistence,
        &RegisterRequest {
            note: Some(String::from("  arriving late  ")),
            ..register_request(shift_id, first)
        },
    )
    .unwrap();
    register(
        &mut s.persistence,
        &RegisterRequest {
            note: Some(String::from("   ")),
            ..register_request(shift_id, second)
        },
    )
    .unwrap();

    let first_note = s
        .persistence
        .get_registration(shift_id, first)
        .unwrap()
        .unwrap()
        .note;
    let second_note = s
        .persistence
        .get_registration(shift_id, second)
        .unwrap()
        .unwrap()
        .note;
    assert_eq!(first_note.as_deref(), Some("arriving late"));
    assert_eq!(second_note, None);
}

#[test]
fn test_register_on_full_shift_surfaces_store_message() {
    let mut s: Seeded = seed(1);
    let first: i64 = add_volunteer(&mut s.persistence, "Robin");
    let second: i64 = add_volunteer(&mut s.persistence, "Sam");
    register(&mut s.persistence, &register_request(s.shift.id.value(), first)).unwrap();

    let err: ApiError = register(
        &mut s.persistence,
        &register_request(s.shift.id.value(), second),
    )
    .unwrap_err();

    assert_eq!(err.to_string(), "This shift is already full");
    assert_eq!(err.code(), "shift_full");
}

#[test]
fn test_register_rejects_non_positive_ids() {
    let mut s: Seeded = seed(1);

    let err: ApiError = register(&mut s.persistence, &register_request(0, 1)).unwrap_err();

    assert!(matches!(
        err,
        ApiError::InvalidInput { ref field, .. } if field == "shift_id"
    ));
}

#[test]
fn test_register_rejects_overlong_note() {
    let mut s: Seeded = seed(1);
    let volunteer: i64 = add_volunteer(&mut s.persistence, "Robin");

    let err: ApiError = register(
        &mut s.persistence,
        &RegisterRequest {
            note: Some("x".repeat(501)),
            ..register_request(s.shift.id.value(), volunteer)
        },
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "note"));
    assert_eq!(
        s.persistence
            .get_shift_snapshot(s.shift.id.value())
            .unwrap()
            .total_registrations,
        0
    );
}

#[test]
fn test_unregister_frees_the_seat() {
    let mut s: Seeded = seed(1);
    let volunteer: i64 = add_volunteer(&mut s.persistence, "Robin");
    register(
        &mut s.persistence,
        &register_request(s.shift.id.value(), volunteer),
    )
    .unwrap();

    let response: RegistrationResponse = unregister(
        &mut s.persistence,
        &UnregisterRequest {
            shift_id: s.shift.id.value(),
            volunteer_id: volunteer,
        },
    )
    .unwrap();

    assert_eq!(response.snapshot.available(), 1);
}

#[test]
fn test_list_shifts_requires_known_volunteer() {
    let mut s: Seeded = seed(2);

    let err: ApiError = list_shifts(&mut s.persistence, 99, NOW).unwrap_err();

    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}

#[test]
fn test_list_shifts_marks_registrations() {
    let mut s: Seeded = seed(2);
    let volunteer: i64 = add_volunteer(&mut s.persistence, "Robin");
    register(
        &mut s.persistence,
        &register_request(s.shift.id.value(), volunteer),
    )
    .unwrap();

    let response: ListShiftsResponse = list_shifts(&mut s.persistence, volunteer, NOW).unwrap();

    assert_eq!(response.volunteer_id, volunteer);
    assert_eq!(response.shifts.len(), 1);
    assert!(response.shifts[0].is_registered());
    assert_eq!(response.shifts[0].mission, s.mission);
}

#[test]
fn test_shift_detail_and_missing_shift() {
    let mut s: Seeded = seed(2);

    let detail: ShiftDetail = shift_detail(&mut s.persistence, s.shift.id.value()).unwrap();
    assert_eq!(detail.snapshot, s.shift);

    let err: ApiError = shift_detail(&mut s.persistence, 404).unwrap_err();
    assert_eq!(err.to_string(), "Shift 404 does not exist");
}

#[test]
fn test_attendance_reports_credited_hours() {
    let mut s: Seeded = seed(2);
    let volunteer: i64 = add_volunteer(&mut s.persistence, "Robin");
    register(
        &mut s.persistence,
        &register_request(s.shift.id.value(), volunteer),
    )
    .unwrap();
    let request: AttendanceRequest = AttendanceRequest {
        shift_id: s.shift.id.value(),
        volunteer_id: volunteer,
    };

    let outcome: AttendanceOutcome = validate_attendance(&mut s.persistence, &request).unwrap();
    assert!((outcome.hours_credited - 3.5).abs() < f64::EPSILON);

    let err: ApiError = validate_attendance(&mut s.persistence, &request).unwrap_err();
    assert_eq!(err.code(), "already_validated");
}

#[test]
fn test_create_shift_validates_input() {
    let mut s: Seeded = seed(2);
    let mission_id: i64 = s.mission.id.value();

    let backwards: CreateShiftRequest = CreateShiftRequest {
        end_time: time!(07:00),
        ..create_test_shift_request(mission_id, 4)
    };
    let oversized_pool: CreateShiftRequest = CreateShiftRequest {
        reserved_slots: 5,
        ..create_test_shift_request(mission_id, 4)
    };
    let negative_hours: CreateShiftRequest = CreateShiftRequest {
        hours_value: -1.0,
        ..create_test_shift_request(mission_id, 4)
    };

    for request in [backwards, oversized_pool, negative_hours] {
        let err: ApiError = create_shift(&mut s.persistence, &request).unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput { .. }), "{request:?}");
    }

    let err: ApiError = create_shift(
        &mut s.persistence,
        &create_test_shift_request(mission_id + 100, 4),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::ResourceNotFound { ref resource_type, .. } if resource_type == "Mission"));
}

#[test]
fn test_create_volunteer_rejects_blank_name() {
    let mut s: Seeded = seed(1);

    let err: ApiError = create_volunteer(
        &mut s.persistence,
        &CreateVolunteerRequest {
            display_name: String::from("  "),
            mandatory_hours: true,
        },
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "display_name"));
}
