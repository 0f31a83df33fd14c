// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during persistence operations.
///
/// Conditional-update outcomes (`InsufficientMainStock`,
/// `InsufficientWorkerStock`, `ProgramCapacityReached`) are typed
/// variants rather than generic query failures so the API layer can
/// translate them into its own taxonomy without string matching.
#[derive(Debug, Clone, PartialEq)]
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
    /// The requested resource was not found.
    NotFound(String),
    /// A beneficiary with this national id already exists.
    DuplicateNationalId(String),
    /// A program day with this day number already exists for the
    /// beneficiary.
    DuplicateProgramDay {
        /// The beneficiary.
        beneficiary_id: i64,
        /// The duplicate day number.
        day_number: i32,
    },
    /// A product with this name already exists.
    DuplicateProductName(String),
    /// The central stock pool cannot cover the requested quantity.
    InsufficientMainStock {
        /// The product.
        product_id: i64,
        /// The requested quantity in kilograms.
        requested: f64,
        /// The available quantity in kilograms (0 when no row exists).
        available: f64,
    },
    /// The field worker's stock cannot cover the requested quantity.
    InsufficientWorkerStock {
        /// The field worker.
        field_worker_id: i64,
        /// The product.
        product_id: i64,
        /// The requested quantity in kilograms.
        requested: f64,
        /// The available quantity in kilograms (0 when no row exists).
        available: f64,
    },
    /// The beneficiary has already completed every enrolled program day.
    ProgramCapacityReached {
        /// The beneficiary.
        beneficiary_id: i64,
        /// The completed-days counter at the time of the attempt.
        completed_days: i32,
        /// The total-days counter at the time of the attempt.
        total_program_days: i32,
    },
    /// A stored value could not be converted back into its domain type.
    InvalidStoredValue {
        /// The column the value came from.
        column: String,
        /// The offending value.
        value: String,
    },
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
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::DuplicateNationalId(national_id) => {
                write!(
                    f,
                    "A beneficiary with national id '{national_id}' already exists"
                )
            }
            Self::DuplicateProgramDay {
                beneficiary_id,
                day_number,
            } => {
                write!(
                    f,
                    "Day {day_number} already exists for beneficiary {beneficiary_id}"
                )
            }
            Self::DuplicateProductName(name) => {
                write!(f, "A product named '{name}' already exists")
            }
            Self::InsufficientMainStock {
                product_id,
                requested,
                available,
            } => {
                write!(
                    f,
                    "Insufficient central stock for product {product_id}: requested {requested} kg, available {available} kg"
                )
            }
            Self::InsufficientWorkerStock {
                field_worker_id,
                product_id,
                requested,
                available,
            } => {
                write!(
                    f,
                    "Insufficient stock for product {product_id} held by field worker {field_worker_id}: requested {requested} kg, available {available} kg"
                )
            }
            Self::ProgramCapacityReached {
                beneficiary_id,
                completed_days,
                total_program_days,
            } => {
                write!(
                    f,
                    "Beneficiary {beneficiary_id} has completed {completed_days} of {total_program_days} program days; no further distributions can be recorded"
                )
            }
            Self::InvalidStoredValue { column, value } => {
                write!(f, "Invalid stored value in column '{column}': '{value}'")
            }
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
