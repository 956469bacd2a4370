// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Availability presentation rules.
//!
//! Initial render and live projection both derive badges from these
//! functions, so a badge never changes band between first paint and the
//! first live update for the same numbers.

use crate::snapshot::ShiftSnapshot;
use serde::{Deserialize, Serialize};

/// Highest availability still shown in the "low" band.
pub const LOW_AVAILABILITY_THRESHOLD: u32 = 2;

/// Availability band shown on a shift's status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityBand {
    /// No seat is bookable.
    Full,
    /// One or two seats remain.
    Low,
    /// More than two seats remain.
    Normal,
}

impl AvailabilityBand {
    /// Thresholds an availability figure into its band.
    #[must_use]
    pub const fn from_available(available: u32) -> Self {
        match available {
            0 => Self::Full,
            1..=LOW_AVAILABILITY_THRESHOLD => Self::Low,
            _ => Self::Normal,
        }
    }

    /// Returns the band for a snapshot.
    #[must_use]
    pub fn of(snapshot: &ShiftSnapshot) -> Self {
        Self::from_available(snapshot.available())
    }

    /// Returns the string representation used as the badge class.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Low => "low",
            Self::Normal => "normal",
        }
    }

    /// Returns the badge colour for this band.
    #[must_use]
    pub const fn tone(&self) -> BadgeTone {
        match self {
            Self::Full => BadgeTone::Red,
            Self::Low => BadgeTone::Amber,
            Self::Normal => BadgeTone::Green,
        }
    }
}

impl std::fmt::Display for AvailabilityBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Badge colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeTone {
    Red,
    Amber,
    Green,
}

/// State of the reserved-pool badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ReservedBadge {
    /// The shift has no reserved pool; the badge is not shown.
    Hidden,
    /// Reserved seats remain.
    Remaining {
        /// Seats left in the pool.
        seats: u32,
    },
    /// The reserved pool is exhausted.
    PoolFull,
}

impl ReservedBadge {
    /// Derives the reserved-pool badge for a snapshot.
    #[must_use]
    pub fn of(snapshot: &ShiftSnapshot) -> Self {
        if !snapshot.has_reserved_pool() {
            return Self::Hidden;
        }
        match snapshot.reserved_remaining() {
            0 => Self::PoolFull,
            seats => Self::Remaining { seats },
        }
    }

    /// Returns true if the badge is displayed.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }

    /// Returns the badge text, or an empty string when hidden.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Hidden => String::new(),
            Self::Remaining { seats } => format!("{seats} reserved"),
            Self::PoolFull => String::from("reserved pool full"),
        }
    }
}

/// Returns whether the register/unregister control may be used.
///
/// A full shift disables registration for everyone except viewers who
/// already hold a seat: they must always be able to cancel.
#[must_use]
pub fn control_enabled(snapshot: &ShiftSnapshot, viewer_registered: bool) -> bool {
    viewer_registered || snapshot.available() > 0
}
