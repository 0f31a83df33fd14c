// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Program-day operations at the API boundary.
//!
//! Each operation validates its inputs, then hands the beneficiary
//! counter update and the day mutation to the store as one logical
//! unit.

use std::str::FromStr;

use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::request_response::{
    AddProgramDayRequest, MessageResponse, ProgramDayView, SetAttendanceRequest,
};
use nutritrack_domain::{
    ActivityType, ProgramDay, validate_date, validate_day_number, validate_notes,
};
use nutritrack_persistence::Persistence;

pub(crate) fn day_to_view(day: &ProgramDay) -> ProgramDayView {
    ProgramDayView {
        id: day.program_day_id.unwrap_or_default(),
        beneficiary_id: day.beneficiary_id,
        day_number: day.day_number,
        date: day.day_date.clone(),
        attended: day.attended,
        activity_type: day.activity_type.as_str().to_string(),
        notes: day.notes.clone(),
    }
}

/// Enrolls a new program day for a beneficiary.
///
/// On success the beneficiary's `total_program_days` has been
/// incremented and the attendance rate recomputed; `completed_days` is
/// untouched by enrollment.
///
/// # Errors
///
/// Returns an error if a field is invalid, the beneficiary is absent,
/// or the day number is already taken.
pub fn add_program_day(
    persistence: &mut Persistence,
    beneficiary_id: i64,
    request: AddProgramDayRequest,
) -> Result<ProgramDayView, ApiError> {
    validate_day_number(request.day_number).map_err(translate_domain_error)?;
    validate_date(&request.date).map_err(translate_domain_error)?;
    validate_notes(request.notes.as_deref()).map_err(translate_domain_error)?;
    let activity_type: ActivityType =
        ActivityType::from_str(&request.activity_type).map_err(translate_domain_error)?;

    let day: ProgramDay = ProgramDay::new(
        beneficiary_id,
        request.day_number,
        request.date,
        activity_type,
        request.notes,
    );

    let (created, _beneficiary) = persistence
        .insert_program_day(&day)
        .map_err(translate_persistence_error)?;

    Ok(day_to_view(&created))
}

/// Sets the attendance flag on a program day.
///
/// A false→true transition advances the beneficiary's `completed_days`
/// (clamped at the enrolled total); true→false retreats it (floored at
/// zero). The attendance rate is recomputed either way.
///
/// # Errors
///
/// Returns an error if the notes are invalid or the day does not
/// belong to the beneficiary.
pub fn set_attendance(
    persistence: &mut Persistence,
    beneficiary_id: i64,
    program_day_id: i64,
    request: SetAttendanceRequest,
) -> Result<ProgramDayView, ApiError> {
    validate_notes(request.notes.as_deref()).map_err(translate_domain_error)?;

    let (updated, _beneficiary) = persistence
        .set_attendance(beneficiary_id, program_day_id, request.attended, request.notes)
        .map_err(translate_persistence_error)?;

    Ok(day_to_view(&updated))
}

/// Removes a program day, retreating the beneficiary's counters.
///
/// # Errors
///
/// Returns an error if the day does not belong to the beneficiary.
pub fn remove_program_day(
    persistence: &mut Persistence,
    beneficiary_id: i64,
    program_day_id: i64,
) -> Result<MessageResponse, ApiError> {
    persistence
        .delete_program_day(beneficiary_id, program_day_id)
        .map_err(translate_persistence_error)?;

    Ok(MessageResponse {
        message: format!("Program day {program_day_id} deleted"),
    })
}

/// Lists a beneficiary's program days ordered by day number.
///
/// # Errors
///
/// Returns `NotFound` if the beneficiary is absent.
pub fn list_program_days(
    persistence: &mut Persistence,
    beneficiary_id: i64,
) -> Result<Vec<ProgramDayView>, ApiError> {
    // Distinguish an empty schedule from a missing beneficiary.
    persistence
        .get_beneficiary(beneficiary_id)
        .map_err(translate_persistence_error)?;

    let days: Vec<ProgramDay> = persistence
        .list_program_days(beneficiary_id)
        .map_err(translate_persistence_error)?;
    Ok(days.iter().map(day_to_view).collect())
}
