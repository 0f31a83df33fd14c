// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// National identifier is empty or invalid.
    InvalidNationalId(String),
    /// Beneficiary or worker name is empty or invalid.
    InvalidName(String),
    /// Beneficiary type string is not recognized.
    InvalidBeneficiaryType(String),
    /// Beneficiary status string is not recognized.
    InvalidStatus(String),
    /// A directly requested status transition is not allowed.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
    },
    /// Activity type string is not recognized.
    InvalidActivityType(String),
    /// Stock transaction type string is not recognized.
    InvalidTransactionType(String),
    /// Program day number must be at least 1.
    InvalidDayNumber(i32),
    /// Notes exceed the maximum allowed length.
    InvalidNotes {
        /// The provided length.
        length: usize,
        /// The maximum allowed length.
        max: usize,
    },
    /// Quantity must be a positive number.
    InvalidQuantity(f64),
    /// Failed to parse a date from a string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// The beneficiary progress counters violate their invariant.
    CounterInvariantViolation {
        /// The beneficiary's national identifier.
        national_id: String,
        /// The completed-days counter.
        completed_days: i32,
        /// The total-days counter.
        total_program_days: i32,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidNationalId(msg) => write!(f, "Invalid national id: {msg}"),
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidBeneficiaryType(value) => {
                write!(
                    f,
                    "Invalid beneficiary type '{value}'. Must be one of: pregnant, breastfeeding, child"
                )
            }
            Self::InvalidStatus(value) => {
                write!(
                    f,
                    "Invalid status '{value}'. Must be one of: active, inactive, completed"
                )
            }
            Self::InvalidStatusTransition { from, to } => {
                write!(f, "Status transition from '{from}' to '{to}' is not allowed")
            }
            Self::InvalidActivityType(value) => {
                write!(
                    f,
                    "Invalid activity type '{value}'. Must be one of: check-in, attendance, activity, assessment"
                )
            }
            Self::InvalidTransactionType(value) => {
                write!(f, "Invalid transaction type '{value}'. Must be IN or OUT")
            }
            Self::InvalidDayNumber(value) => {
                write!(f, "Invalid day number: {value}. Must be at least 1")
            }
            Self::InvalidNotes { length, max } => {
                write!(f, "Notes too long: {length} characters (maximum {max})")
            }
            Self::InvalidQuantity(value) => {
                write!(f, "Invalid quantity: {value}. Must be a positive number")
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::CounterInvariantViolation {
                national_id,
                completed_days,
                total_program_days,
            } => {
                write!(
                    f,
                    "Progress counters out of range for beneficiary '{national_id}': completed_days={completed_days}, total_program_days={total_program_days}"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
