// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Quota policy for new registrations.
//!
//! The decision is advisory: it tells the workflow whether a registration
//! will be hour-credited and which warning, if any, the volunteer must
//! acknowledge first. It never touches the reserved-pool counters; the
//! store updates those and they come back through the change feed.

use crate::snapshot::ShiftSnapshot;
use crate::types::VolunteerProfile;
use serde::{Deserialize, Serialize};

/// Why a registration needs an explicit acknowledgement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarningKind {
    /// The shift credits no hours at all.
    ZeroHourShift,
    /// The volunteer is quota-bound and the reserved pool is exhausted.
    ReservedPoolFull,
}

impl WarningKind {
    /// Returns the stable identifier of this warning.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ZeroHourShift => "zero-hour-shift",
            Self::ReservedPoolFull => "reserved-pool-full",
        }
    }

    /// Returns the question put to the volunteer.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::ZeroHourShift => "This shift credits no hours. Continue anyway?",
            Self::ReservedPoolFull => {
                "The reserved places for mandatory-hours volunteers are taken. This registration will not be credited towards your hours. Continue anyway?"
            }
        }
    }
}

impl std::fmt::Display for WarningKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of the quota policy for one `(snapshot, volunteer)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaDecision {
    /// Whether the registration will be credited towards the volunteer's hours.
    pub will_credit_hours: bool,
    /// Whether the registration consumes a seat of the reserved pool.
    pub counts_against_reserve: bool,
    /// The warning to show before proceeding, if any.
    pub warning: Option<WarningKind>,
}

impl QuotaDecision {
    /// Returns true if the volunteer must acknowledge a warning.
    #[must_use]
    pub const fn warning_required(&self) -> bool {
        self.warning.is_some()
    }
}

/// Decides how a new registration interacts with the hours quota.
///
/// Rules apply in order:
/// 1. a zero-hour shift credits nothing and warns `zero-hour-shift`;
/// 2. a volunteer without a quota is credited normally;
/// 3. a quota-bound volunteer is credited against the reserved pool while
///    seats remain in it;
/// 4. otherwise the quota-bound volunteer is not credited and is warned
///    `reserved-pool-full`.
#[must_use]
pub fn decide(snapshot: &ShiftSnapshot, volunteer: &VolunteerProfile) -> QuotaDecision {
    if !snapshot.credits_hours() {
        return QuotaDecision {
            will_credit_hours: false,
            counts_against_reserve: false,
            warning: Some(WarningKind::ZeroHourShift),
        };
    }

    if !volunteer.is_quota_bound() {
        return QuotaDecision {
            will_credit_hours: true,
            counts_against_reserve: false,
            warning: None,
        };
    }

    if snapshot.reserved_remaining() > 0 {
        QuotaDecision {
            will_credit_hours: true,
            counts_against_reserve: true,
            warning: None,
        }
    } else {
        QuotaDecision {
            will_credit_hours: false,
            counts_against_reserve: false,
            warning: Some(WarningKind::ReservedPoolFull),
        }
    }
}
