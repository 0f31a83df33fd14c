// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Represents the classification of a beneficiary in the support program.
///
/// Classification is fixed at registration and determines the program
/// track the beneficiary is enrolled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BeneficiaryType {
    /// A pregnant woman enrolled for antenatal nutrition support.
    #[serde(rename = "pregnant")]
    Pregnant,
    /// A breastfeeding mother enrolled for postnatal nutrition support.
    #[serde(rename = "breastfeeding")]
    Breastfeeding,
    /// A child enrolled for growth-monitoring nutrition support.
    #[serde(rename = "child")]
    Child,
}

impl FromStr for BeneficiaryType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pregnant" => Ok(Self::Pregnant),
            "breastfeeding" => Ok(Self::Breastfeeding),
            "child" => Ok(Self::Child),
            _ => Err(DomainError::InvalidBeneficiaryType(s.to_string())),
        }
    }
}

impl std::fmt::Display for BeneficiaryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl BeneficiaryType {
    /// Converts this classification to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pregnant => "pregnant",
            Self::Breastfeeding => "breastfeeding",
            Self::Child => "child",
        }
    }
}

/// Represents the lifecycle status of a beneficiary.
///
/// Valid transitions are:
/// - `Active` → `Completed` (driven exclusively by status reconciliation)
/// - `Active` ↔ `Inactive` (externally settable via direct update)
///
/// No transition out of `Completed` is defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BeneficiaryStatus {
    /// Enrolled and receiving program support.
    #[default]
    #[serde(rename = "active")]
    Active,
    /// Temporarily out of the program (moved away, opted out).
    #[serde(rename = "inactive")]
    Inactive,
    /// Finished every enrolled program day. Terminal.
    #[serde(rename = "completed")]
    Completed,
}

impl FromStr for BeneficiaryStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "completed" => Ok(Self::Completed),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for BeneficiaryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl BeneficiaryStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Completed => "completed",
        }
    }

    /// Checks whether a direct (externally requested) transition from this
    /// status to another is valid.
    ///
    /// Only `Active ↔ Inactive` may be requested directly; `Completed` is
    /// reachable solely through the reconciliation path.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Active, Self::Inactive) | (Self::Inactive, Self::Active)
        )
    }
}

/// Represents the kind of activity recorded for a program day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityType {
    /// A plain check-in visit.
    #[serde(rename = "check-in")]
    CheckIn,
    /// An attendance-counting session day.
    #[serde(rename = "attendance")]
    Attendance,
    /// A group or individual program activity.
    #[serde(rename = "activity")]
    Activity,
    /// A nutrition or health assessment.
    #[serde(rename = "assessment")]
    Assessment,
}

impl FromStr for ActivityType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "check-in" => Ok(Self::CheckIn),
            "attendance" => Ok(Self::Attendance),
            "activity" => Ok(Self::Activity),
            "assessment" => Ok(Self::Assessment),
            _ => Err(DomainError::InvalidActivityType(s.to_string())),
        }
    }
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ActivityType {
    /// Converts this activity type to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CheckIn => "check-in",
            Self::Attendance => "attendance",
            Self::Activity => "activity",
            Self::Assessment => "assessment",
        }
    }
}

/// Represents the direction of a central stock movement.
///
/// Transactions are append-only ledger entries; they are never mutated
/// or deleted and are not a source of truth for current quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockTransactionType {
    /// Stock added to the central pool (restock).
    #[serde(rename = "IN")]
    In,
    /// Stock moved out of the central pool (assignment to a field worker).
    #[serde(rename = "OUT")]
    Out,
}

impl FromStr for StockTransactionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IN" => Ok(Self::In),
            "OUT" => Ok(Self::Out),
            _ => Err(DomainError::InvalidTransactionType(s.to_string())),
        }
    }
}

impl std::fmt::Display for StockTransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl StockTransactionType {
    /// Converts this transaction type to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::In => "IN",
            Self::Out => "OUT",
        }
    }
}

/// Represents a beneficiary's national identifier.
///
/// The national identifier is unique across all beneficiaries and is
/// normalized (trimmed) so whitespace variants cannot create duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NationalId {
    /// The normalized identifier value.
    value: String,
}

impl NationalId {
    /// Creates a new `NationalId`, trimming surrounding whitespace.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_string(),
        }
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Represents a field worker who holds assigned stock and performs
/// distributions.
///
/// Field workers are directory entries provided by an external user
/// system; only the reference shape is modeled here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldWorker {
    /// Canonical identifier assigned by the store.
    /// `None` indicates the worker has not been persisted yet.
    pub field_worker_id: Option<i64>,
    /// The worker's display name.
    pub name: String,
    /// The worker's role label (informational).
    pub role: String,
}

impl FieldWorker {
    /// Creates a new `FieldWorker` without a persisted ID.
    #[must_use]
    pub const fn new(name: String, role: String) -> Self {
        Self {
            field_worker_id: None,
            name,
            role,
        }
    }

    /// Creates a `FieldWorker` with an existing persisted ID.
    #[must_use]
    pub const fn with_id(field_worker_id: i64, name: String, role: String) -> Self {
        Self {
            field_worker_id: Some(field_worker_id),
            name,
            role,
        }
    }
}

/// Represents a product distributed through the program (e.g. fortified
/// flour, supplement).
///
/// Products are catalog entries provided by an external system; only the
/// reference shape is modeled here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Canonical identifier assigned by the store.
    /// `None` indicates the product has not been persisted yet.
    pub product_id: Option<i64>,
    /// The product name (unique).
    pub name: String,
}

impl Product {
    /// Creates a new `Product` without a persisted ID.
    #[must_use]
    pub const fn new(name: String) -> Self {
        Self {
            product_id: None,
            name,
        }
    }

    /// Creates a `Product` with an existing persisted ID.
    #[must_use]
    pub const fn with_id(product_id: i64, name: String) -> Self {
        Self {
            product_id: Some(product_id),
            name,
        }
    }
}

/// Represents a person enrolled in the support program.
///
/// Progress counters are maintained by the program-day and distribution
/// operations and must satisfy two invariants at all times:
///
/// - `0 ≤ completed_days ≤ total_program_days`
/// - `attendance_rate` equals the value derived from the counters by
///   [`crate::progress::attendance_rate`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Beneficiary {
    /// Canonical identifier assigned by the store.
    /// `None` indicates the beneficiary has not been persisted yet.
    pub beneficiary_id: Option<i64>,
    /// The unique national identifier.
    pub national_id: NationalId,
    /// The beneficiary's name (informational, not unique).
    pub name: String,
    /// The program-track classification.
    pub beneficiary_type: BeneficiaryType,
    /// The lifecycle status.
    pub status: BeneficiaryStatus,
    /// The field worker assigned to this beneficiary.
    pub field_worker_id: i64,
    /// Number of program days enrolled.
    pub total_program_days: i32,
    /// Number of program days completed (attended or distributed-for).
    pub completed_days: i32,
    /// Derived attendance percentage (0-100).
    pub attendance_rate: i32,
    /// Registration timestamp (ISO 8601).
    pub registered_at: String,
}

impl Beneficiary {
    /// Creates a new active `Beneficiary` with zeroed progress counters
    /// and no persisted ID.
    #[must_use]
    pub const fn new(
        national_id: NationalId,
        name: String,
        beneficiary_type: BeneficiaryType,
        field_worker_id: i64,
        registered_at: String,
    ) -> Self {
        Self {
            beneficiary_id: None,
            national_id,
            name,
            beneficiary_type,
            status: BeneficiaryStatus::Active,
            field_worker_id,
            total_program_days: 0,
            completed_days: 0,
            attendance_rate: 0,
            registered_at,
        }
    }

    /// Creates a `Beneficiary` with an existing persisted ID.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn with_id(
        beneficiary_id: i64,
        national_id: NationalId,
        name: String,
        beneficiary_type: BeneficiaryType,
        status: BeneficiaryStatus,
        field_worker_id: i64,
        total_program_days: i32,
        completed_days: i32,
        attendance_rate: i32,
        registered_at: String,
    ) -> Self {
        Self {
            beneficiary_id: Some(beneficiary_id),
            national_id,
            name,
            beneficiary_type,
            status,
            field_worker_id,
            total_program_days,
            completed_days,
            attendance_rate,
            registered_at,
        }
    }

    /// Validates the counter invariant.
    ///
    /// # Invariant
    ///
    /// `0 ≤ completed_days ≤ total_program_days`
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CounterInvariantViolation` if the counters
    /// are out of range.
    pub fn validate_counters(&self) -> Result<(), DomainError> {
        if self.completed_days < 0
            || self.total_program_days < 0
            || self.completed_days > self.total_program_days
        {
            return Err(DomainError::CounterInvariantViolation {
                national_id: self.national_id.value().to_owned(),
                completed_days: self.completed_days,
                total_program_days: self.total_program_days,
            });
        }
        Ok(())
    }
}

/// Represents one scheduled unit (day) of a beneficiary's program.
///
/// `day_number` is unique per beneficiary. Attendance is mutated in
/// place; the owning beneficiary's counters track the changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramDay {
    /// Canonical identifier assigned by the store.
    /// `None` indicates the day has not been persisted yet.
    pub program_day_id: Option<i64>,
    /// The owning beneficiary.
    pub beneficiary_id: i64,
    /// The 1-based day number, unique per beneficiary.
    pub day_number: i32,
    /// The scheduled date (ISO 8601 date).
    pub day_date: String,
    /// Whether the beneficiary attended this day.
    pub attended: bool,
    /// The kind of activity scheduled.
    pub activity_type: ActivityType,
    /// Optional free-text notes (at most 500 characters).
    pub notes: Option<String>,
}

impl ProgramDay {
    /// Creates a new unattended `ProgramDay` without a persisted ID.
    #[must_use]
    pub const fn new(
        beneficiary_id: i64,
        day_number: i32,
        day_date: String,
        activity_type: ActivityType,
        notes: Option<String>,
    ) -> Self {
        Self {
            program_day_id: None,
            beneficiary_id,
            day_number,
            day_date,
            attended: false,
            activity_type,
            notes,
        }
    }

    /// Creates a `ProgramDay` with an existing persisted ID.
    #[must_use]
    pub const fn with_id(
        program_day_id: i64,
        beneficiary_id: i64,
        day_number: i32,
        day_date: String,
        attended: bool,
        activity_type: ActivityType,
        notes: Option<String>,
    ) -> Self {
        Self {
            program_day_id: Some(program_day_id),
            beneficiary_id,
            day_number,
            day_date,
            attended,
            activity_type,
            notes,
        }
    }
}

/// Represents the central stock level for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainStock {
    /// Canonical identifier assigned by the store.
    pub main_stock_id: Option<i64>,
    /// The product this stock level is for (one row per product).
    pub product_id: i64,
    /// Current quantity in kilograms. Never negative.
    pub total_stock: f64,
}

/// Represents the stock a field worker holds for one product.
///
/// One row per `(field_worker, product)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stock {
    /// Canonical identifier assigned by the store.
    pub stock_id: Option<i64>,
    /// The field worker holding this stock.
    pub field_worker_id: i64,
    /// The product.
    pub product_id: i64,
    /// Current quantity in kilograms. Never negative.
    pub total_stock: f64,
}

/// Represents a recorded handout of product to a beneficiary.
///
/// Creating a distribution is the trigger for the stock decrement and
/// the beneficiary progress increment, applied together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    /// Canonical identifier assigned by the store.
    pub distribution_id: Option<i64>,
    /// The receiving beneficiary.
    pub beneficiary_id: i64,
    /// The distributed product.
    pub product_id: i64,
    /// The distributing field worker.
    pub field_worker_id: i64,
    /// Quantity handed out, in kilograms. Always positive.
    pub quantity_kg: f64,
    /// The distribution date (ISO 8601 date).
    pub distribution_date: String,
}

/// Represents one append-only ledger entry for a central stock movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockTransaction {
    /// Canonical identifier assigned by the store.
    pub transaction_id: Option<i64>,
    /// The product moved.
    pub product_id: i64,
    /// The quantity moved, in kilograms. Always positive.
    pub quantity_kg: f64,
    /// The movement direction.
    pub transaction_type: StockTransactionType,
    /// When the movement was recorded (ISO 8601).
    pub recorded_at: String,
}
