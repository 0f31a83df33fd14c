// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field-level validation for domain inputs.
//!
//! These checks run at the API boundary before any storage access, so
//! malformed input is rejected without touching the store.

use crate::error::DomainError;
use crate::types::BeneficiaryStatus;
use time::Date;
use time::macros::format_description;

/// Maximum length of program-day notes, in characters.
pub const MAX_NOTES_LEN: usize = 500;

/// ISO 8601 calendar-date format (`YYYY-MM-DD`).
const DATE_FORMAT: &[time::format_description::BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Validates a beneficiary's national identifier.
///
/// # Errors
///
/// Returns an error if the identifier is empty after trimming.
pub fn validate_national_id(national_id: &str) -> Result<(), DomainError> {
    if national_id.trim().is_empty() {
        return Err(DomainError::InvalidNationalId(String::from(
            "National id must not be empty",
        )));
    }
    Ok(())
}

/// Validates a display name (beneficiary, field worker, or product).
///
/// # Errors
///
/// Returns an error if the name is empty after trimming.
pub fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name must not be empty",
        )));
    }
    Ok(())
}

/// Validates a program day number.
///
/// # Errors
///
/// Returns an error if the day number is less than 1.
pub const fn validate_day_number(day_number: i32) -> Result<(), DomainError> {
    if day_number < 1 {
        return Err(DomainError::InvalidDayNumber(day_number));
    }
    Ok(())
}

/// Validates optional program-day notes against the length limit.
///
/// # Errors
///
/// Returns an error if the notes exceed [`MAX_NOTES_LEN`] characters.
pub fn validate_notes(notes: Option<&str>) -> Result<(), DomainError> {
    if let Some(text) = notes {
        let length: usize = text.chars().count();
        if length > MAX_NOTES_LEN {
            return Err(DomainError::InvalidNotes {
                length,
                max: MAX_NOTES_LEN,
            });
        }
    }
    Ok(())
}

/// Validates a stock or distribution quantity in kilograms.
///
/// # Errors
///
/// Returns an error unless the quantity is a finite positive number.
pub fn validate_quantity(quantity_kg: f64) -> Result<(), DomainError> {
    if !quantity_kg.is_finite() || quantity_kg <= 0.0 {
        return Err(DomainError::InvalidQuantity(quantity_kg));
    }
    Ok(())
}

/// Validates an ISO 8601 calendar date string (`YYYY-MM-DD`).
///
/// # Errors
///
/// Returns an error if the string cannot be parsed as a calendar date.
pub fn validate_date(date_string: &str) -> Result<(), DomainError> {
    Date::parse(date_string, DATE_FORMAT).map_err(|e| DomainError::DateParseError {
        date_string: date_string.to_string(),
        error: e.to_string(),
    })?;
    Ok(())
}

/// Validates a directly requested status transition.
///
/// Direct updates may only flip between `active` and `inactive`. The
/// `completed` status is owned by the reconciliation path.
///
/// # Errors
///
/// Returns an error for any transition other than `active ↔ inactive`.
pub fn validate_status_transition(
    from: BeneficiaryStatus,
    to: BeneficiaryStatus,
) -> Result<(), DomainError> {
    if !from.can_transition_to(to) {
        return Err(DomainError::InvalidStatusTransition {
            from: from.as_str().to_string(),
            to: to.as_str().to_string(),
        });
    }
    Ok(())
}
