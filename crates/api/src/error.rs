// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use shiftboard_domain::DomainError;
use shiftboard_persistence::PersistenceError;
use thiserror::Error;
use tracing::error;

/// API-level errors.
///
/// These are distinct from domain and persistence errors and represent the
/// API contract. Every variant carries a message that clients show to the
/// volunteer without rewording.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// A registration rule was violated.
    #[error("{message}")]
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    #[error("{message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    #[error("{message}")]
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// Returns a stable machine-readable code for this error.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::DomainRuleViolation { rule, .. } => rule.as_str(),
            Self::InvalidInput { .. } => "invalid_input",
            Self::ResourceNotFound { .. } => "not_found",
            Self::Internal { .. } => "internal",
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let field: String = match &err {
        DomainError::InvalidIdentifier { kind, .. } => format!("{kind}_id"),
        DomainError::InvalidTitle(_) => String::from("title"),
        DomainError::InvalidLocation(_) => String::from("location"),
        DomainError::InvalidVolunteerName(_) => String::from("display_name"),
        DomainError::InvalidCapacity { .. } => String::from("reserved_slots"),
        DomainError::InvalidHoursValue(_) => String::from("hours_value"),
        DomainError::InvalidShiftTimes { .. } => String::from("end_time"),
        DomainError::NoteTooLong { .. } => String::from("note"),
    };

    ApiError::InvalidInput {
        field,
        message: err.to_string(),
    }
}

/// Translates a persistence error into an API error.
///
/// Registration rejections keep the store's wording, which is what the
/// volunteer sees.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    let message: String = err.to_string();
    match err {
        PersistenceError::ShiftFull { .. } => ApiError::DomainRuleViolation {
            rule: String::from("shift_full"),
            message,
        },
        PersistenceError::AlreadyRegistered { .. } => ApiError::DomainRuleViolation {
            rule: String::from("already_registered"),
            message,
        },
        PersistenceError::NotRegistered { .. } => ApiError::DomainRuleViolation {
            rule: String::from("not_registered"),
            message,
        },
        PersistenceError::AlreadyValidated { .. } => ApiError::DomainRuleViolation {
            rule: String::from("already_validated"),
            message,
        },
        PersistenceError::MissionNotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("Mission"),
            message,
        },
        PersistenceError::ShiftNotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("Shift"),
            message,
        },
        PersistenceError::VolunteerNotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("Volunteer"),
            message,
        },
        PersistenceError::NotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("Resource"),
            message,
        },
        PersistenceError::DatabaseError(_)
        | PersistenceError::DatabaseConnectionFailed(_)
        | PersistenceError::MigrationFailed(_)
        | PersistenceError::QueryFailed(_)
        | PersistenceError::InitializationError(_)
        | PersistenceError::ForeignKeyEnforcementNotEnabled
        | PersistenceError::InvalidRecord(_) => {
            error!(error = %message, "Persistence failure");
            ApiError::Internal { message }
        }
    }
}
