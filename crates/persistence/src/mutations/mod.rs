// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! - `catalog`: creation of missions, shifts and volunteers
//! - `registrations`: the transactional register, unregister and
//!   attendance procedures that own the seat counters

pub mod catalog;
pub mod registrations;

pub use catalog::{create_mission, create_shift, create_volunteer};
pub use registrations::{register, unregister, validate_attendance};
