// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The distribution transaction.
//!
//! Recording a distribution couples three effects: the worker's stock
//! decrement, the distribution row, and the beneficiary's progress
//! increment. All three run inside one transaction in validate-first
//! order, so a failure at any step (including the capacity re-check)
//! leaves no partial state behind.

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{BeneficiaryRow, NewDistribution};
use crate::diesel_schema::{beneficiaries, distributions};
use crate::error::PersistenceError;
use crate::mutations::stock::{debit_worker_stock, worker_stock_available};
use crate::queries;
use diesel::prelude::*;
use nutritrack_domain::progress::attendance_rate;
use nutritrack_domain::{Beneficiary, Distribution};

/// Records a distribution to a beneficiary.
///
/// Transaction steps, in order:
///
/// 1. Load the beneficiary; reject with `ProgramCapacityReached` when
///    `completed_days` already equals `total_program_days`.
/// 2. Conditionally debit the distributing worker's stock
///    (`total_stock >= quantity`); zero affected rows means the worker
///    holds too little (or no row), and nothing has been written yet.
/// 3. Insert the distribution row.
/// 4. Conditionally increment `completed_days`
///    (`completed_days < total_program_days`); zero affected rows means
///    a concurrent update consumed the remaining capacity, and the
///    transaction rolls back, reversing steps 2 and 3.
/// 5. Recompute the attendance rate from the incremented counters.
///
/// # Errors
///
/// Returns `NotFound` for an absent beneficiary,
/// `InsufficientWorkerStock` when the worker cannot cover the quantity,
/// or `ProgramCapacityReached` when the program is already complete.
pub fn record_distribution(
    conn: &mut SqliteConnection,
    distribution: &Distribution,
) -> Result<(Distribution, Beneficiary), PersistenceError> {
    conn.transaction::<(Distribution, Beneficiary), PersistenceError, _>(|conn| {
        let beneficiary_row: BeneficiaryRow =
            queries::beneficiaries::find_beneficiary(conn, distribution.beneficiary_id)?
                .ok_or_else(|| {
                    PersistenceError::NotFound(format!(
                        "Beneficiary {}",
                        distribution.beneficiary_id
                    ))
                })?;

        if beneficiary_row.completed_days >= beneficiary_row.total_program_days {
            return Err(PersistenceError::ProgramCapacityReached {
                beneficiary_id: distribution.beneficiary_id,
                completed_days: beneficiary_row.completed_days,
                total_program_days: beneficiary_row.total_program_days,
            });
        }

        if !debit_worker_stock(
            conn,
            distribution.field_worker_id,
            distribution.product_id,
            distribution.quantity_kg,
        )? {
            let available: f64 = worker_stock_available(
                conn,
                distribution.field_worker_id,
                distribution.product_id,
            )?;
            return Err(PersistenceError::InsufficientWorkerStock {
                field_worker_id: distribution.field_worker_id,
                product_id: distribution.product_id,
                requested: distribution.quantity_kg,
                available,
            });
        }

        let record: NewDistribution = NewDistribution {
            beneficiary_id: distribution.beneficiary_id,
            product_id: distribution.product_id,
            field_worker_id: distribution.field_worker_id,
            quantity_kg: distribution.quantity_kg,
            distribution_date: distribution.distribution_date.clone(),
        };
        diesel::insert_into(distributions::table)
            .values(&record)
            .execute(conn)?;
        let distribution_id: i64 = get_last_insert_rowid(conn)?;

        let incremented: usize = diesel::update(
            beneficiaries::table.filter(
                beneficiaries::beneficiary_id
                    .eq(distribution.beneficiary_id)
                    .and(beneficiaries::completed_days.lt(beneficiaries::total_program_days)),
            ),
        )
        .set(beneficiaries::completed_days.eq(beneficiaries::completed_days + 1))
        .execute(conn)?;

        if incremented == 0 {
            // A concurrent distribution took the last remaining day
            // between the pre-check and this write. Abort; the rollback
            // restores the stock debited above.
            return Err(PersistenceError::ProgramCapacityReached {
                beneficiary_id: distribution.beneficiary_id,
                completed_days: beneficiary_row.total_program_days,
                total_program_days: beneficiary_row.total_program_days,
            });
        }

        let new_completed: i32 = beneficiary_row.completed_days + 1;
        diesel::update(
            beneficiaries::table
                .filter(beneficiaries::beneficiary_id.eq(distribution.beneficiary_id)),
        )
        .set(
            beneficiaries::attendance_rate
                .eq(attendance_rate(new_completed, beneficiary_row.total_program_days)),
        )
        .execute(conn)?;

        let recorded: Distribution = Distribution {
            distribution_id: Some(distribution_id),
            ..distribution.clone()
        };
        let beneficiary: Beneficiary =
            queries::beneficiaries::get_beneficiary(conn, distribution.beneficiary_id)?;

        Ok((recorded, beneficiary))
    })
}
