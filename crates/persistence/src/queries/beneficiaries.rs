// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Beneficiary lookups.

use crate::data_models::BeneficiaryRow;
use crate::diesel_schema::beneficiaries;
use crate::error::PersistenceError;
use diesel::prelude::*;
use nutritrack_domain::{Beneficiary, BeneficiaryStatus};

/// Finds a beneficiary row by ID, if present.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_beneficiary(
    conn: &mut SqliteConnection,
    beneficiary_id: i64,
) -> Result<Option<BeneficiaryRow>, PersistenceError> {
    Ok(beneficiaries::table
        .filter(beneficiaries::beneficiary_id.eq(beneficiary_id))
        .first::<BeneficiaryRow>(conn)
        .optional()?)
}

/// Retrieves a beneficiary by ID.
///
/// # Errors
///
/// Returns `NotFound` if no beneficiary with this ID exists.
pub fn get_beneficiary(
    conn: &mut SqliteConnection,
    beneficiary_id: i64,
) -> Result<Beneficiary, PersistenceError> {
    find_beneficiary(conn, beneficiary_id)?
        .ok_or_else(|| PersistenceError::NotFound(format!("Beneficiary {beneficiary_id}")))?
        .into_domain()
}

/// Finds a beneficiary row by national identifier, if present.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_by_national_id(
    conn: &mut SqliteConnection,
    national_id: &str,
) -> Result<Option<BeneficiaryRow>, PersistenceError> {
    Ok(beneficiaries::table
        .filter(beneficiaries::national_id.eq(national_id))
        .first::<BeneficiaryRow>(conn)
        .optional()?)
}

/// Lists all beneficiaries ordered by ID.
///
/// # Errors
///
/// Returns an error if the query fails or a row fails to convert.
pub fn list_beneficiaries(
    conn: &mut SqliteConnection,
) -> Result<Vec<Beneficiary>, PersistenceError> {
    let rows: Vec<BeneficiaryRow> = beneficiaries::table
        .order(beneficiaries::beneficiary_id.asc())
        .load::<BeneficiaryRow>(conn)?;
    rows.into_iter().map(BeneficiaryRow::into_domain).collect()
}

/// Lists all beneficiaries whose status is not yet `completed`.
///
/// This is the working set of the status reconciliation sweep.
///
/// # Errors
///
/// Returns an error if the query fails or a row fails to convert.
pub fn list_unfinished_beneficiaries(
    conn: &mut SqliteConnection,
) -> Result<Vec<Beneficiary>, PersistenceError> {
    let rows: Vec<BeneficiaryRow> = beneficiaries::table
        .filter(beneficiaries::status.ne(BeneficiaryStatus::Completed.as_str()))
        .order(beneficiaries::beneficiary_id.asc())
        .load::<BeneficiaryRow>(conn)?;
    rows.into_iter().map(BeneficiaryRow::into_domain).collect()
}
