// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for Shiftboard.
//!
//! This crate is the reference shift store: missions, their shifts, the
//! volunteers and their registrations, kept in `SQLite` through Diesel.
//!
//! ## Seat Counters
//!
//! Each shift row carries `total_registrations` and `reserved_taken`. They
//! are changed only inside the registration procedures in
//! `mutations::registrations`, each of which runs in a single immediate
//! transaction. The capacity check and the counter update therefore never
//! interleave with another writer, and a shift never ends up with more
//! registrations than seats.
//!
//! ## Storage
//!
//! - In-memory databases are shared-cache and uniquely named per adapter,
//!   so every test gets an isolated store
//! - File databases run in WAL mode
//! - Foreign key enforcement is verified at startup
//! - Migrations are embedded and applied on open

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use shiftboard_domain::{
    AttendanceOutcome, Mission, Registration, ShiftDetail, ShiftListing, ShiftSnapshot,
};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use backend::PersistenceBackend;
pub use data_models::{NewMission, NewShift, VolunteerData};
pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// The shift store.
///
/// Owns one `SQLite` connection. Callers that share it across tasks wrap it
/// in a mutex.
pub struct Persistence {
    conn: SqliteConnection,
}

/// Type alias kept for call sites that name the backend explicitly.
pub type SqlitePersistence = Persistence;

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        // Unique shared-cache name per adapter keeps tests isolated.
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError(String::from("Invalid database path"))
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    // ========================================================================
    // Catalog
    // ========================================================================

    /// Creates a mission.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_mission(&mut self, mission: &NewMission) -> Result<Mission, PersistenceError> {
        mutations::create_mission(&mut self.conn, mission)
    }

    /// Creates a shift with no registrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the mission does not exist or the insert fails.
    pub fn create_shift(&mut self, shift: &NewShift) -> Result<ShiftSnapshot, PersistenceError> {
        mutations::create_shift(&mut self.conn, shift)
    }

    /// Creates a volunteer.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_volunteer(
        &mut self,
        display_name: &str,
        mandatory_hours: bool,
    ) -> Result<VolunteerData, PersistenceError> {
        mutations::create_volunteer(&mut self.conn, display_name, mandatory_hours)
    }

    /// Loads a volunteer.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::VolunteerNotFound` if the volunteer does
    /// not exist.
    pub fn get_volunteer(&mut self, volunteer_id: i64) -> Result<VolunteerData, PersistenceError> {
        queries::get_volunteer(&mut self.conn, volunteer_id)
    }

    /// Loads the current capacity snapshot of a shift.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ShiftNotFound` if the shift does not exist.
    pub fn get_shift_snapshot(&mut self, shift_id: i64) -> Result<ShiftSnapshot, PersistenceError> {
        queries::get_shift_row(&mut self.conn, shift_id)?.to_snapshot()
    }

    /// Loads a shift together with its mission.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ShiftNotFound` if the shift does not exist.
    pub fn get_shift_detail(&mut self, shift_id: i64) -> Result<ShiftDetail, PersistenceError> {
        queries::get_shift_detail(&mut self.conn, shift_id)
    }

    /// Loads a volunteer's registration on a shift, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_registration(
        &mut self,
        shift_id: i64,
        volunteer_id: i64,
    ) -> Result<Option<Registration>, PersistenceError> {
        Ok(queries::get_registration(&mut self.conn, shift_id, volunteer_id)?
            .map(data_models::RegistrationRow::into_domain))
    }

    /// Lists the shifts of every mission visible at `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn list_visible_shifts(
        &mut self,
        volunteer_id: i64,
        now: OffsetDateTime,
    ) -> Result<Vec<ShiftListing>, PersistenceError> {
        queries::list_visible_shifts(&mut self.conn, volunteer_id, now)
    }

    // ========================================================================
    // Registrations
    // ========================================================================

    /// Registers a volunteer for a shift and returns the fresh snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the shift is full, the volunteer is already
    /// registered, or either entity does not exist.
    pub fn register(
        &mut self,
        shift_id: i64,
        volunteer_id: i64,
        note: Option<&str>,
    ) -> Result<ShiftSnapshot, PersistenceError> {
        mutations::register(&mut self.conn, shift_id, volunteer_id, note)
    }

    /// Removes a volunteer's registration and returns the fresh snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the volunteer is not registered.
    pub fn unregister(
        &mut self,
        shift_id: i64,
        volunteer_id: i64,
    ) -> Result<ShiftSnapshot, PersistenceError> {
        mutations::unregister(&mut self.conn, shift_id, volunteer_id)
    }

    /// Records attendance and credits hours when eligible.
    ///
    /// # Errors
    ///
    /// Returns an error if the volunteer is not registered or attendance
    /// was already validated.
    pub fn validate_attendance(
        &mut self,
        shift_id: i64,
        volunteer_id: i64,
    ) -> Result<AttendanceOutcome, PersistenceError> {
        mutations::validate_attendance(&mut self.conn, shift_id, volunteer_id)
    }
}
