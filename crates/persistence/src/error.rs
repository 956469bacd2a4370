// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during persistence operations.
///
/// The registration rejections carry messages meant to be shown to the
/// volunteer as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// A stored value could not be converted to its domain type.
    InvalidRecord(String),
    /// The requested mission does not exist.
    MissionNotFound(i64),
    /// The requested shift does not exist.
    ShiftNotFound(i64),
    /// The requested volunteer does not exist.
    VolunteerNotFound(i64),
    /// Every seat on the shift is taken.
    ShiftFull { shift_id: i64 },
    /// The volunteer already holds a seat on the shift.
    AlreadyRegistered { shift_id: i64, volunteer_id: i64 },
    /// The volunteer holds no seat on the shift.
    NotRegistered { shift_id: i64, volunteer_id: i64 },
    /// Attendance for this registration was already validated.
    AlreadyValidated { shift_id: i64, volunteer_id: i64 },
    /// The requested resource was not found.
    NotFound(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::InvalidRecord(msg) => write!(f, "Invalid stored record: {msg}"),
            Self::MissionNotFound(id) => write!(f, "Mission {id} does not exist"),
            Self::ShiftNotFound(id) => write!(f, "Shift {id} does not exist"),
            Self::VolunteerNotFound(id) => write!(f, "Volunteer {id} does not exist"),
            Self::ShiftFull { .. } => write!(f, "This shift is already full"),
            Self::AlreadyRegistered { .. } => {
                write!(f, "You are already registered for this shift")
            }
            Self::NotRegistered { .. } => write!(f, "You are not registered for this shift"),
            Self::AlreadyValidated { .. } => {
                write!(f, "Attendance for this shift has already been validated")
            }
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

