// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Program-day mutations.
//!
//! Each operation pairs a program-day write with the owning
//! beneficiary's counter update inside one transaction, so the counters
//! can never drift from the day records they summarize.

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{BeneficiaryRow, NewProgramDay, ProgramDayRow};
use crate::diesel_schema::{beneficiaries, program_days};
use crate::error::PersistenceError;
use crate::queries;
use diesel::prelude::*;
use nutritrack_domain::progress::attendance_rate;
use nutritrack_domain::{Beneficiary, ProgramDay};

/// Writes a beneficiary's progress counters and derived attendance rate.
fn write_counters(
    conn: &mut SqliteConnection,
    beneficiary_id: i64,
    total_program_days: i32,
    completed_days: i32,
) -> Result<(), PersistenceError> {
    diesel::update(beneficiaries::table.filter(beneficiaries::beneficiary_id.eq(beneficiary_id)))
        .set((
            beneficiaries::total_program_days.eq(total_program_days),
            beneficiaries::completed_days.eq(completed_days),
            beneficiaries::attendance_rate
                .eq(attendance_rate(completed_days, total_program_days)),
        ))
        .execute(conn)?;
    Ok(())
}

/// Enrolls a new program day for a beneficiary.
///
/// Inside one transaction: verifies the beneficiary exists and the day
/// number is free, inserts the day, and increments the beneficiary's
/// `total_program_days` (recomputing the attendance rate).
/// `completed_days` is not changed by enrollment.
///
/// # Errors
///
/// Returns `NotFound` if the beneficiary is absent, or
/// `DuplicateProgramDay` if the day number is already taken.
pub fn insert_program_day(
    conn: &mut SqliteConnection,
    day: &ProgramDay,
) -> Result<(ProgramDay, Beneficiary), PersistenceError> {
    conn.transaction::<(ProgramDay, Beneficiary), PersistenceError, _>(|conn| {
        let beneficiary_row: BeneficiaryRow =
            queries::beneficiaries::find_beneficiary(conn, day.beneficiary_id)?.ok_or_else(
                || PersistenceError::NotFound(format!("Beneficiary {}", day.beneficiary_id)),
            )?;

        if queries::program_days::day_number_exists(conn, day.beneficiary_id, day.day_number)? {
            return Err(PersistenceError::DuplicateProgramDay {
                beneficiary_id: day.beneficiary_id,
                day_number: day.day_number,
            });
        }

        let record: NewProgramDay = NewProgramDay {
            beneficiary_id: day.beneficiary_id,
            day_number: day.day_number,
            day_date: day.day_date.clone(),
            attended: i32::from(day.attended),
            activity_type: day.activity_type.as_str().to_string(),
            notes: day.notes.clone(),
        };

        diesel::insert_into(program_days::table)
            .values(&record)
            .execute(conn)?;
        let program_day_id: i64 = get_last_insert_rowid(conn)?;

        let new_total: i32 = beneficiary_row.total_program_days + 1;
        write_counters(
            conn,
            day.beneficiary_id,
            new_total,
            beneficiary_row.completed_days,
        )?;

        let created: ProgramDay =
            queries::program_days::get_program_day(conn, day.beneficiary_id, program_day_id)?;
        let beneficiary: Beneficiary =
            queries::beneficiaries::get_beneficiary(conn, day.beneficiary_id)?;

        Ok((created, beneficiary))
    })
}

/// Sets the attendance flag on a program day.
///
/// Inside one transaction: writes the day's `attended` flag (and notes
/// when provided) and adjusts the beneficiary's `completed_days`:
///
/// - false → true increments, clamped at `total_program_days` (the day
///   write still succeeds when the counter is clamped)
/// - true → false decrements, floored at 0
/// - no flag change leaves the counter untouched
///
/// The attendance rate is recomputed after every call.
///
/// # Errors
///
/// Returns `NotFound` if the day is absent or belongs to a different
/// beneficiary.
pub fn set_attendance(
    conn: &mut SqliteConnection,
    beneficiary_id: i64,
    program_day_id: i64,
    attended: bool,
    notes: Option<String>,
) -> Result<(ProgramDay, Beneficiary), PersistenceError> {
    conn.transaction::<(ProgramDay, Beneficiary), PersistenceError, _>(|conn| {
        let day_row: ProgramDayRow =
            queries::program_days::find_program_day(conn, beneficiary_id, program_day_id)?
                .ok_or_else(|| {
                    PersistenceError::NotFound(format!(
                        "Program day {program_day_id} for beneficiary {beneficiary_id}"
                    ))
                })?;
        let beneficiary_row: BeneficiaryRow =
            queries::beneficiaries::find_beneficiary(conn, beneficiary_id)?.ok_or_else(|| {
                PersistenceError::NotFound(format!("Beneficiary {beneficiary_id}"))
            })?;

        let was_attended: bool = day_row.attended != 0;

        let day_filter = program_days::table.filter(
            program_days::program_day_id
                .eq(program_day_id)
                .and(program_days::beneficiary_id.eq(beneficiary_id)),
        );
        if let Some(ref text) = notes {
            diesel::update(day_filter)
                .set((
                    program_days::attended.eq(i32::from(attended)),
                    program_days::notes.eq(Some(text.clone())),
                ))
                .execute(conn)?;
        } else {
            diesel::update(day_filter)
                .set(program_days::attended.eq(i32::from(attended)))
                .execute(conn)?;
        }

        let completed: i32 = match (was_attended, attended) {
            (false, true) => {
                // Clamp rather than fail: the day write stands even when
                // the counter has already reached the enrolled total.
                (beneficiary_row.completed_days + 1).min(beneficiary_row.total_program_days)
            }
            (true, false) => (beneficiary_row.completed_days - 1).max(0),
            _ => beneficiary_row.completed_days,
        };
        write_counters(
            conn,
            beneficiary_id,
            beneficiary_row.total_program_days,
            completed,
        )?;

        let updated: ProgramDay =
            queries::program_days::get_program_day(conn, beneficiary_id, program_day_id)?;
        let beneficiary: Beneficiary =
            queries::beneficiaries::get_beneficiary(conn, beneficiary_id)?;

        Ok((updated, beneficiary))
    })
}

/// Removes a program day.
///
/// Inside one transaction: deletes the day, decrements
/// `total_program_days` (floored at 0), additionally decrements
/// `completed_days` (floored at 0) when the removed day was attended,
/// and recomputes the attendance rate.
///
/// # Errors
///
/// Returns `NotFound` if the day is absent or belongs to a different
/// beneficiary.
pub fn delete_program_day(
    conn: &mut SqliteConnection,
    beneficiary_id: i64,
    program_day_id: i64,
) -> Result<Beneficiary, PersistenceError> {
    conn.transaction::<Beneficiary, PersistenceError, _>(|conn| {
        let day_row: ProgramDayRow =
            queries::program_days::find_program_day(conn, beneficiary_id, program_day_id)?
                .ok_or_else(|| {
                    PersistenceError::NotFound(format!(
                        "Program day {program_day_id} for beneficiary {beneficiary_id}"
                    ))
                })?;
        let beneficiary_row: BeneficiaryRow =
            queries::beneficiaries::find_beneficiary(conn, beneficiary_id)?.ok_or_else(|| {
                PersistenceError::NotFound(format!("Beneficiary {beneficiary_id}"))
            })?;

        diesel::delete(
            program_days::table.filter(
                program_days::program_day_id
                    .eq(program_day_id)
                    .and(program_days::beneficiary_id.eq(beneficiary_id)),
            ),
        )
        .execute(conn)?;

        let new_total: i32 = (beneficiary_row.total_program_days - 1).max(0);
        let mut new_completed: i32 = if day_row.attended != 0 {
            (beneficiary_row.completed_days - 1).max(0)
        } else {
            beneficiary_row.completed_days
        };
        // The schema enforces completed <= total; keep the pair coherent
        // even if the counters were already at an edge.
        new_completed = new_completed.min(new_total);

        write_counters(conn, beneficiary_id, new_total, new_completed)?;

        queries::beneficiaries::get_beneficiary(conn, beneficiary_id)
    })
}
