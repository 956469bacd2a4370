// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use time::Time;

/// Maximum length of a registration note, in characters.
pub const MAX_NOTE_LENGTH: usize = 500;

/// Validates the descriptive fields of a mission.
///
/// # Errors
///
/// Returns an error if:
/// - The title is empty or whitespace only
/// - The location is empty or whitespace only
pub fn validate_mission_fields(title: &str, location: &str) -> Result<(), DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::InvalidTitle(String::from(
            "Title cannot be empty",
        )));
    }

    if location.trim().is_empty() {
        return Err(DomainError::InvalidLocation(String::from(
            "Location cannot be empty",
        )));
    }

    Ok(())
}

/// Validates a volunteer display name.
///
/// # Errors
///
/// Returns an error if the name is empty or whitespace only.
pub fn validate_volunteer_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidVolunteerName(String::from(
            "Name cannot be empty",
        )));
    }
    Ok(())
}

/// Validates the seat counts of a new shift.
///
/// # Errors
///
/// Returns `DomainError::InvalidCapacity` if either count is negative or the
/// reserved pool is larger than the shift.
pub const fn validate_shift_capacity(
    max_slots: i64,
    reserved_slots: i64,
) -> Result<(), DomainError> {
    if max_slots < 0 || reserved_slots < 0 || reserved_slots > max_slots {
        return Err(DomainError::InvalidCapacity {
            max_slots,
            reserved_slots,
        });
    }
    Ok(())
}

/// Validates the hours credited per attended registration.
///
/// # Errors
///
/// Returns `DomainError::InvalidHoursValue` if the value is negative, NaN or
/// infinite.
pub fn validate_hours_value(hours_value: f64) -> Result<(), DomainError> {
    if !hours_value.is_finite() || hours_value < 0.0 {
        return Err(DomainError::InvalidHoursValue(hours_value));
    }
    Ok(())
}

/// Validates a shift's time-of-day window.
///
/// # Errors
///
/// Returns `DomainError::InvalidShiftTimes` unless `end` is strictly after
/// `start`.
pub fn validate_shift_times(start: Time, end: Time) -> Result<(), DomainError> {
    if end <= start {
        return Err(DomainError::InvalidShiftTimes { start, end });
    }
    Ok(())
}

/// Normalizes an optional registration note.
///
/// Surrounding whitespace is trimmed and blank notes become `None`.
///
/// # Errors
///
/// Returns `DomainError::NoteTooLong` if the trimmed note exceeds
/// `MAX_NOTE_LENGTH` characters.
pub fn normalize_note(note: Option<&str>) -> Result<Option<String>, DomainError> {
    let Some(trimmed) = note.map(str::trim).filter(|n| !n.is_empty()) else {
        return Ok(None);
    };

    let length: usize = trimmed.chars().count();
    if length > MAX_NOTE_LENGTH {
        return Err(DomainError::NoteTooLong {
            length,
            max: MAX_NOTE_LENGTH,
        });
    }

    Ok(Some(trimmed.to_string()))
}
