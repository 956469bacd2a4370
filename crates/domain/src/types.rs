// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::snapshot::ShiftSnapshot;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

time::serde::format_description!(mission_date, Date, "[year]-[month]-[day]");
time::serde::format_description!(
    publish_timestamp,
    OffsetDateTime,
    "[year]-[month]-[day]T[hour]:[minute]:[second][offset_hour sign:mandatory]:[offset_minute]"
);

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw identifier without validation.
            ///
            /// Identifiers read back from the store are trusted as-is.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Wraps a raw identifier, rejecting zero and negative values.
            ///
            /// # Errors
            ///
            /// Returns `DomainError::InvalidIdentifier` if `value` is not positive.
            pub fn parse(value: i64) -> Result<Self, DomainError> {
                if value <= 0 {
                    return Err(DomainError::InvalidIdentifier { kind: $kind, value });
                }
                Ok(Self(value))
            }

            /// Returns the raw identifier.
            #[must_use]
            pub const fn value(&self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identifies a shift.
    ShiftId,
    "shift"
);
entity_id!(
    /// Identifies a mission.
    MissionId,
    "mission"
);
entity_id!(
    /// Identifies a volunteer.
    VolunteerId,
    "volunteer"
);

/// A scheduled mission that owns one or more shifts.
///
/// Missions are read-only context for the capacity core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mission {
    /// The mission identifier.
    pub id: MissionId,
    /// Human-readable title.
    pub title: String,
    /// The calendar date the mission takes place on.
    #[serde(with = "mission_date")]
    pub date: Date,
    /// Where the mission takes place.
    pub location: String,
    /// Whether the mission has been made visible to volunteers.
    pub visible: bool,
    /// Optional instant from which the mission becomes visible.
    #[serde(default, with = "publish_timestamp::option")]
    pub publish_at: Option<OffsetDateTime>,
}

impl Mission {
    /// Returns whether volunteers may see this mission at `now`.
    ///
    /// A mission is visible when it is flagged visible and its publish
    /// instant, if any, is not in the future.
    #[must_use]
    pub fn is_visible_at(&self, now: OffsetDateTime) -> bool {
        self.visible && self.publish_at.is_none_or(|publish_at| publish_at <= now)
    }
}

/// The acting volunteer, as far as quota rules are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerProfile {
    /// The volunteer identifier.
    pub id: VolunteerId,
    /// True if the volunteer must fulfil an hours quota.
    pub mandatory_hours: bool,
}

impl VolunteerProfile {
    /// Creates a new volunteer profile.
    #[must_use]
    pub const fn new(id: VolunteerId, mandatory_hours: bool) -> Self {
        Self {
            id,
            mandatory_hours,
        }
    }

    /// Returns true if the volunteer competes for the reserved sub-pool.
    #[must_use]
    pub const fn is_quota_bound(&self) -> bool {
        self.mandatory_hours
    }
}

/// A volunteer's hold on a seat in a shift.
///
/// Owned by the store; the capacity core only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    /// The shift the seat belongs to.
    pub shift_id: ShiftId,
    /// The volunteer holding the seat.
    pub volunteer_id: VolunteerId,
    /// Whether attending this shift credits hours to the volunteer.
    pub hour_eligible: bool,
    /// Whether the seat was taken from the reserved sub-pool.
    #[serde(default)]
    pub counts_against_reserve: bool,
    /// Optional free-text note left at registration.
    #[serde(default)]
    pub note: Option<String>,
    /// Whether attendance has been validated.
    #[serde(default)]
    pub attended: bool,
}

/// One row of the initial fetch: a visible shift joined with its mission,
/// plus the acting volunteer's registration if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftListing {
    /// The owning mission.
    pub mission: Mission,
    /// The shift's capacity facts at fetch time.
    pub snapshot: ShiftSnapshot,
    /// The acting volunteer's registration, if one exists.
    #[serde(default)]
    pub registration: Option<Registration>,
}

impl ShiftListing {
    /// Returns true if the acting volunteer holds a seat on this shift.
    #[must_use]
    pub const fn is_registered(&self) -> bool {
        self.registration.is_some()
    }
}

/// Descriptive data shown on the confirmation surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftDetail {
    /// The owning mission.
    pub mission: Mission,
    /// The shift's capacity facts.
    pub snapshot: ShiftSnapshot,
}

/// The result of an attendance validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceOutcome {
    /// The shift attended.
    pub shift_id: ShiftId,
    /// The volunteer whose attendance was validated.
    pub volunteer_id: VolunteerId,
    /// Hours credited to the volunteer; zero when the registration was not
    /// hour-eligible.
    pub hours_credited: f64,
}
