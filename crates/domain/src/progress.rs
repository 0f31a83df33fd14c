// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Progress derivation for beneficiaries.
//!
//! Everything in this module is a pure function of the beneficiary's
//! current counters. No function here reads or writes storage; the
//! program-day manager, the distribution processor, and the status
//! reconciliation sweep all call into these functions and persist the
//! results themselves.
//!
//! ## Invariants
//!
//! - `attendance_rate` is always in `0..=100`
//! - `days_remaining` is never negative
//! - `is_complete` never reports completion for a zero-day program

use crate::types::Beneficiary;

/// Derives the attendance percentage from the progress counters.
///
/// Returns `0` when `total_program_days` is zero, otherwise
/// `completed_days / total_program_days * 100` rounded half away from
/// zero to the nearest integer.
#[must_use]
pub fn attendance_rate(completed_days: i32, total_program_days: i32) -> i32 {
    if total_program_days <= 0 {
        return 0;
    }
    let rate: f64 = f64::from(completed_days) / f64::from(total_program_days) * 100.0;
    #[allow(clippy::cast_possible_truncation)]
    let rounded: i32 = rate.round() as i32;
    rounded.clamp(0, 100)
}

/// Completion policy for a beneficiary.
///
/// A beneficiary is complete once every enrolled day has been completed.
/// A beneficiary with no enrolled days is never complete, so freshly
/// registered beneficiaries are not swept into the terminal status.
#[must_use]
pub const fn is_complete(beneficiary: &Beneficiary) -> bool {
    beneficiary.total_program_days > 0
        && beneficiary.completed_days >= beneficiary.total_program_days
}

/// Number of program days still outstanding. Floored at zero.
#[must_use]
pub const fn days_remaining(beneficiary: &Beneficiary) -> i32 {
    let remaining: i32 = beneficiary.total_program_days - beneficiary.completed_days;
    if remaining < 0 { 0 } else { remaining }
}
