// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for Shiftboard.
//!
//! Turns wire-level requests into validated calls on the shift store and
//! store failures into `ApiError`s whose messages can be shown verbatim.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{ApiError, translate_domain_error, translate_persistence_error};
pub use handlers::{
    REGISTERED_MESSAGE, UNREGISTERED_MESSAGE, create_mission, create_shift, create_volunteer,
    list_shifts, register, shift_detail, unregister, validate_attendance,
};
pub use request_response::{
    AttendanceRequest, CreateMissionRequest, CreateShiftRequest, CreateVolunteerRequest,
    ListShiftsResponse, RegisterRequest, RegistrationResponse, UnregisterRequest,
    VolunteerResponse,
};

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
