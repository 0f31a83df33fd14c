// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Program-day lookups.
//!
//! Day lookups are always scoped to the owning beneficiary so a day ID
//! belonging to a different beneficiary behaves as absent.

use crate::data_models::ProgramDayRow;
use crate::diesel_schema::program_days;
use crate::error::PersistenceError;
use diesel::prelude::*;
use nutritrack_domain::ProgramDay;

/// Finds a program day row by beneficiary and day ID, if present.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_program_day(
    conn: &mut SqliteConnection,
    beneficiary_id: i64,
    program_day_id: i64,
) -> Result<Option<ProgramDayRow>, PersistenceError> {
    Ok(program_days::table
        .filter(
            program_days::program_day_id
                .eq(program_day_id)
                .and(program_days::beneficiary_id.eq(beneficiary_id)),
        )
        .first::<ProgramDayRow>(conn)
        .optional()?)
}

/// Retrieves a program day scoped to its beneficiary.
///
/// # Errors
///
/// Returns `NotFound` if the day is absent or belongs to a different
/// beneficiary.
pub fn get_program_day(
    conn: &mut SqliteConnection,
    beneficiary_id: i64,
    program_day_id: i64,
) -> Result<ProgramDay, PersistenceError> {
    find_program_day(conn, beneficiary_id, program_day_id)?
        .ok_or_else(|| {
            PersistenceError::NotFound(format!(
                "Program day {program_day_id} for beneficiary {beneficiary_id}"
            ))
        })?
        .into_domain()
}

/// Checks whether a day number is already taken for a beneficiary.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn day_number_exists(
    conn: &mut SqliteConnection,
    beneficiary_id: i64,
    day_number: i32,
) -> Result<bool, PersistenceError> {
    let count: i64 = program_days::table
        .filter(
            program_days::beneficiary_id
                .eq(beneficiary_id)
                .and(program_days::day_number.eq(day_number)),
        )
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}

/// Lists a beneficiary's program days ordered by day number.
///
/// # Errors
///
/// Returns an error if the query fails or a row fails to convert.
pub fn list_program_days(
    conn: &mut SqliteConnection,
    beneficiary_id: i64,
) -> Result<Vec<ProgramDay>, PersistenceError> {
    let rows: Vec<ProgramDayRow> = program_days::table
        .filter(program_days::beneficiary_id.eq(beneficiary_id))
        .order(program_days::day_number.asc())
        .load::<ProgramDayRow>(conn)?;
    rows.into_iter().map(ProgramDayRow::into_domain).collect()
}

/// Counts the program days recorded for a beneficiary.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_program_days(
    conn: &mut SqliteConnection,
    beneficiary_id: i64,
) -> Result<i64, PersistenceError> {
    Ok(program_days::table
        .filter(program_days::beneficiary_id.eq(beneficiary_id))
        .count()
        .get_result(conn)?)
}
