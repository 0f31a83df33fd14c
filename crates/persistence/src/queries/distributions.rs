// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Distribution record lookups.

use crate::data_models::DistributionRow;
use crate::diesel_schema::distributions;
use crate::error::PersistenceError;
use diesel::prelude::*;
use nutritrack_domain::Distribution;

/// Lists all distributions in insertion order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_distributions(
    conn: &mut SqliteConnection,
) -> Result<Vec<Distribution>, PersistenceError> {
    let rows: Vec<DistributionRow> = distributions::table
        .order(distributions::distribution_id.asc())
        .load::<DistributionRow>(conn)?;
    Ok(rows.into_iter().map(DistributionRow::into_domain).collect())
}

/// Lists the distributions recorded for one beneficiary.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_distributions_for_beneficiary(
    conn: &mut SqliteConnection,
    beneficiary_id: i64,
) -> Result<Vec<Distribution>, PersistenceError> {
    let rows: Vec<DistributionRow> = distributions::table
        .filter(distributions::beneficiary_id.eq(beneficiary_id))
        .order(distributions::distribution_id.asc())
        .load::<DistributionRow>(conn)?;
    Ok(rows.into_iter().map(DistributionRow::into_domain).collect())
}

/// Counts all distribution rows.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_distributions(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(distributions::table.count().get_result(conn)?)
}
