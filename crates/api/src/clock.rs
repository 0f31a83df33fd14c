// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Wall-clock helpers for timestamping writes.

use crate::error::ApiError;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

/// Returns the current UTC instant as an RFC 3339 string.
///
/// # Errors
///
/// Returns an error if formatting fails.
pub fn now_rfc3339() -> Result<String, ApiError> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to format timestamp: {e}"),
        })
}

/// Returns the current UTC calendar date as `YYYY-MM-DD`.
///
/// # Errors
///
/// Returns an error if formatting fails.
pub fn today() -> Result<String, ApiError> {
    OffsetDateTime::now_utc()
        .date()
        .format(format_description!("[year]-[month]-[day]"))
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to format date: {e}"),
        })
}
