// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// An identifier was zero or negative.
    InvalidIdentifier {
        /// The kind of entity the identifier names.
        kind: &'static str,
        /// The rejected value.
        value: i64,
    },
    /// Mission title is empty or invalid.
    InvalidTitle(String),
    /// Mission location is empty or invalid.
    InvalidLocation(String),
    /// Volunteer display name is empty or invalid.
    InvalidVolunteerName(String),
    /// Seat counts are inconsistent.
    InvalidCapacity {
        /// The total bookable seats.
        max_slots: i64,
        /// The reserved sub-pool size.
        reserved_slots: i64,
    },
    /// Hours value is negative or not a finite number.
    InvalidHoursValue(f64),
    /// Shift end time does not follow its start time.
    InvalidShiftTimes {
        /// The shift start time.
        start: time::Time,
        /// The shift end time.
        end: time::Time,
    },
    /// A registration note exceeds the permitted length.
    NoteTooLong {
        /// The note length in characters.
        length: usize,
        /// The maximum permitted length.
        max: usize,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidIdentifier { kind, value } => {
                write!(f, "Invalid {kind} identifier: {value}")
            }
            Self::InvalidTitle(msg) => write!(f, "Invalid mission title: {msg}"),
            Self::InvalidLocation(msg) => write!(f, "Invalid mission location: {msg}"),
            Self::InvalidVolunteerName(msg) => write!(f, "Invalid volunteer name: {msg}"),
            Self::InvalidCapacity {
                max_slots,
                reserved_slots,
            } => {
                write!(
                    f,
                    "Invalid capacity: {reserved_slots} reserved of {max_slots} seats. Seat counts must be non-negative and the reserved pool cannot exceed the total"
                )
            }
            Self::InvalidHoursValue(value) => {
                write!(
                    f,
                    "Invalid hours value: {value}. Must be a non-negative number"
                )
            }
            Self::InvalidShiftTimes { start, end } => {
                write!(f, "Shift end time {end} must be after start time {start}")
            }
            Self::NoteTooLong { length, max } => {
                write!(
                    f,
                    "Registration note is {length} characters long. Must be at most {max}"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
