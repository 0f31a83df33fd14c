// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Response enrichment for beneficiary payloads.
//!
//! Outbound beneficiary JSON carries two derived display fields,
//! `daysRemaining` and `programProgress`, computed here from the
//! persisted counters. This is a pure read-model transform applied at
//! the API boundary; the derived fields are never written back.

use nutritrack_domain::progress::{attendance_rate, days_remaining};
use nutritrack_domain::Beneficiary;
use serde::{Deserialize, Serialize};

/// Outbound beneficiary payload with derived display fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeneficiaryView {
    /// The beneficiary's canonical ID.
    pub id: i64,
    /// The unique national identifier.
    pub national_id: String,
    /// The beneficiary's name.
    pub name: String,
    /// The classification.
    pub beneficiary_type: String,
    /// The lifecycle status.
    pub status: String,
    /// The assigned field worker.
    pub field_worker_id: i64,
    /// Number of program days enrolled.
    pub total_program_days: i32,
    /// Number of program days completed.
    pub completed_days: i32,
    /// Derived attendance percentage (persisted).
    pub attendance_rate: i32,
    /// Registration timestamp.
    pub registered_at: String,
    /// Derived: days still outstanding. Never persisted.
    pub days_remaining: i32,
    /// Derived: completion percentage. Never persisted.
    pub program_progress: i32,
}

/// Builds the enriched display payload for a beneficiary.
///
/// Applied uniformly to every beneficiary-returning response, whether a
/// single object or an array element.
#[must_use]
pub fn to_display(beneficiary: &Beneficiary) -> BeneficiaryView {
    BeneficiaryView {
        id: beneficiary.beneficiary_id.unwrap_or_default(),
        national_id: beneficiary.national_id.value().to_string(),
        name: beneficiary.name.clone(),
        beneficiary_type: beneficiary.beneficiary_type.as_str().to_string(),
        status: beneficiary.status.as_str().to_string(),
        field_worker_id: beneficiary.field_worker_id,
        total_program_days: beneficiary.total_program_days,
        completed_days: beneficiary.completed_days,
        attendance_rate: beneficiary.attendance_rate,
        registered_at: beneficiary.registered_at.clone(),
        days_remaining: days_remaining(beneficiary),
        program_progress: attendance_rate(
            beneficiary.completed_days,
            beneficiary.total_program_days,
        ),
    }
}
