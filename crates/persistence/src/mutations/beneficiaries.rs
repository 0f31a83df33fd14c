// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Beneficiary mutations.

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::NewBeneficiary;
use crate::diesel_schema::beneficiaries;
use crate::error::PersistenceError;
use crate::queries;
use diesel::prelude::*;
use nutritrack_domain::{Beneficiary, BeneficiaryStatus};

/// Inserts a beneficiary and returns it with its assigned ID.
///
/// # Errors
///
/// Returns `DuplicateNationalId` if a beneficiary with the same
/// national identifier already exists, `NotFound` if the assigned field
/// worker is absent, or an error if the insert fails.
pub fn insert_beneficiary(
    conn: &mut SqliteConnection,
    beneficiary: &Beneficiary,
) -> Result<Beneficiary, PersistenceError> {
    conn.transaction::<Beneficiary, PersistenceError, _>(|conn| {
        if queries::reference::find_field_worker(conn, beneficiary.field_worker_id)?.is_none() {
            return Err(PersistenceError::NotFound(format!(
                "Field worker {}",
                beneficiary.field_worker_id
            )));
        }

        if queries::beneficiaries::find_by_national_id(conn, beneficiary.national_id.value())?
            .is_some()
        {
            return Err(PersistenceError::DuplicateNationalId(
                beneficiary.national_id.value().to_string(),
            ));
        }

        let record: NewBeneficiary = NewBeneficiary {
            national_id: beneficiary.national_id.value().to_string(),
            name: beneficiary.name.clone(),
            beneficiary_type: beneficiary.beneficiary_type.as_str().to_string(),
            status: beneficiary.status.as_str().to_string(),
            field_worker_id: beneficiary.field_worker_id,
            total_program_days: beneficiary.total_program_days,
            completed_days: beneficiary.completed_days,
            attendance_rate: beneficiary.attendance_rate,
            registered_at: beneficiary.registered_at.clone(),
        };

        diesel::insert_into(beneficiaries::table)
            .values(&record)
            .execute(conn)?;
        let beneficiary_id: i64 = get_last_insert_rowid(conn)?;

        queries::beneficiaries::get_beneficiary(conn, beneficiary_id)
    })
}

/// Sets a beneficiary's lifecycle status.
///
/// Transition validity is the caller's responsibility; this function
/// only persists the new value.
///
/// # Errors
///
/// Returns `NotFound` if the beneficiary is absent.
pub fn update_beneficiary_status(
    conn: &mut SqliteConnection,
    beneficiary_id: i64,
    status: BeneficiaryStatus,
) -> Result<(), PersistenceError> {
    let updated: usize =
        diesel::update(beneficiaries::table.filter(beneficiaries::beneficiary_id.eq(beneficiary_id)))
            .set(beneficiaries::status.eq(status.as_str()))
            .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Beneficiary {beneficiary_id}"
        )));
    }
    Ok(())
}

/// Deletes a beneficiary.
///
/// Program days and distributions cascade via the schema's foreign-key
/// constraints, so a beneficiary is never removed independently of its
/// children.
///
/// # Errors
///
/// Returns `NotFound` if the beneficiary is absent.
pub fn delete_beneficiary(
    conn: &mut SqliteConnection,
    beneficiary_id: i64,
) -> Result<(), PersistenceError> {
    let deleted: usize =
        diesel::delete(beneficiaries::table.filter(beneficiaries::beneficiary_id.eq(beneficiary_id)))
            .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Beneficiary {beneficiary_id}"
        )));
    }
    Ok(())
}
