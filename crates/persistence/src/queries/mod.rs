// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! - `catalog`: single-row lookups of missions, shifts, volunteers and
//!   registrations
//! - `listings`: the volunteer-facing shift list and shift detail

pub mod catalog;
pub mod listings;

pub use catalog::{get_mission_row, get_registration, get_shift_row, get_volunteer};
pub use listings::{get_shift_detail, list_visible_shifts};
