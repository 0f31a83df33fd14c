// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use nutritrack_domain::DomainError;
use nutritrack_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain and persistence errors and represent
/// the API contract: `InvalidArgument`, `NotFound`, `Conflict`,
/// `OutOfStock`, and `ProgramOverrun`, plus `Internal` for everything a
/// caller cannot fix. None of these are retried automatically.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Malformed or missing input. Always client-fixable.
    InvalidArgument {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A referenced entity is absent.
    NotFound {
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A uniqueness rule was violated.
    Conflict {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// The relevant stock cannot cover the requested quantity.
    OutOfStock {
        /// A human-readable description of the shortfall.
        message: String,
    },
    /// The beneficiary's program is already at capacity.
    ProgramOverrun {
        /// A human-readable description of the overrun.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::NotFound { message } => write!(f, "Not found: {message}"),
            Self::Conflict { rule, message } => {
                write!(f, "Conflict ({rule}): {message}")
            }
            Self::OutOfStock { message } => write!(f, "Out of stock: {message}"),
            Self::ProgramOverrun { message } => write!(f, "Program overrun: {message}"),
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not
/// leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidNationalId(msg) => ApiError::InvalidArgument {
            field: String::from("nationalId"),
            message: msg,
        },
        DomainError::InvalidName(msg) => ApiError::InvalidArgument {
            field: String::from("name"),
            message: msg,
        },
        DomainError::InvalidBeneficiaryType(value) => ApiError::InvalidArgument {
            field: String::from("beneficiaryType"),
            message: format!(
                "Invalid beneficiary type '{value}'. Must be one of: pregnant, breastfeeding, child"
            ),
        },
        DomainError::InvalidStatus(value) => ApiError::InvalidArgument {
            field: String::from("status"),
            message: format!("Invalid status '{value}'. Must be one of: active, inactive, completed"),
        },
        DomainError::InvalidStatusTransition { from, to } => ApiError::InvalidArgument {
            field: String::from("status"),
            message: format!("Status transition from '{from}' to '{to}' is not allowed"),
        },
        DomainError::InvalidActivityType(value) => ApiError::InvalidArgument {
            field: String::from("activityType"),
            message: format!(
                "Invalid activity type '{value}'. Must be one of: check-in, attendance, activity, assessment"
            ),
        },
        DomainError::InvalidTransactionType(value) => ApiError::InvalidArgument {
            field: String::from("transactionType"),
            message: format!("Invalid transaction type '{value}'. Must be IN or OUT"),
        },
        DomainError::InvalidDayNumber(value) => ApiError::InvalidArgument {
            field: String::from("dayNumber"),
            message: format!("Invalid day number: {value}. Must be at least 1"),
        },
        DomainError::InvalidNotes { length, max } => ApiError::InvalidArgument {
            field: String::from("notes"),
            message: format!("Notes too long: {length} characters (maximum {max})"),
        },
        DomainError::InvalidQuantity(value) => ApiError::InvalidArgument {
            field: String::from("quantityKg"),
            message: format!("Invalid quantity: {value}. Must be a positive number"),
        },
        DomainError::DateParseError { date_string, error } => ApiError::InvalidArgument {
            field: String::from("date"),
            message: format!("Failed to parse date '{date_string}': {error}"),
        },
        DomainError::CounterInvariantViolation {
            national_id,
            completed_days,
            total_program_days,
        } => ApiError::Internal {
            message: format!(
                "Progress counters out of range for beneficiary '{national_id}': completed_days={completed_days}, total_program_days={total_program_days}"
            ),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Conditional-update outcomes map onto the API taxonomy; everything
/// infrastructural becomes `Internal`.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound(message) => ApiError::NotFound {
            message: format!("{message} does not exist"),
        },
        PersistenceError::DuplicateNationalId(national_id) => ApiError::Conflict {
            rule: String::from("unique_national_id"),
            message: format!("A beneficiary with national id '{national_id}' already exists"),
        },
        PersistenceError::DuplicateProgramDay {
            beneficiary_id,
            day_number,
        } => ApiError::Conflict {
            rule: String::from("unique_day_number"),
            message: format!("Day {day_number} already exists for beneficiary {beneficiary_id}"),
        },
        PersistenceError::DuplicateProductName(name) => ApiError::Conflict {
            rule: String::from("unique_product_name"),
            message: format!("A product named '{name}' already exists"),
        },
        PersistenceError::InsufficientMainStock {
            product_id,
            requested,
            available,
        } => ApiError::OutOfStock {
            message: format!(
                "Insufficient central stock for product {product_id}: requested {requested} kg, available {available} kg"
            ),
        },
        PersistenceError::InsufficientWorkerStock {
            field_worker_id,
            product_id,
            requested,
            available,
        } => ApiError::OutOfStock {
            message: format!(
                "Insufficient stock for product {product_id} held by field worker {field_worker_id}: requested {requested} kg, available {available} kg"
            ),
        },
        PersistenceError::ProgramCapacityReached {
            beneficiary_id,
            completed_days,
            total_program_days,
        } => ApiError::ProgramOverrun {
            message: format!(
                "Beneficiary {beneficiary_id} has completed {completed_days} of {total_program_days} program days"
            ),
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
