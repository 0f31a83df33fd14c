// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Status reconciliation.
//!
//! One routine, two callers: the inline per-request check and the timed
//! sweep both run [`reconcile_statuses`]. The routine is idempotent
//! because the completion policy is a pure function of current state,
//! so overlapping or repeated runs converge on the same statuses.

use crate::error::{ApiError, translate_persistence_error};
use nutritrack_domain::progress::is_complete;
use nutritrack_domain::{Beneficiary, BeneficiaryStatus};
use nutritrack_persistence::Persistence;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Counts produced by one reconciliation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationSummary {
    /// Beneficiaries examined (status not yet `completed`).
    pub swept: u32,
    /// Beneficiaries flipped to `completed` in this run.
    pub completed: u32,
    /// Beneficiaries whose update failed (logged, not propagated).
    pub failed: u32,
}

/// Sweeps every not-yet-completed beneficiary and flips those whose
/// program is finished to the `completed` status.
///
/// A failure while persisting one beneficiary's flip is logged and
/// counted; it never aborts the remainder of the sweep.
///
/// # Errors
///
/// Returns an error only if the working set itself cannot be loaded.
pub fn reconcile_statuses(
    persistence: &mut Persistence,
) -> Result<ReconciliationSummary, ApiError> {
    let candidates: Vec<Beneficiary> = persistence
        .list_unfinished_beneficiaries()
        .map_err(translate_persistence_error)?;

    let mut summary: ReconciliationSummary = ReconciliationSummary::default();

    for beneficiary in &candidates {
        summary.swept += 1;

        if !is_complete(beneficiary) {
            continue;
        }
        let Some(beneficiary_id) = beneficiary.beneficiary_id else {
            continue;
        };

        match persistence.update_beneficiary_status(beneficiary_id, BeneficiaryStatus::Completed) {
            Ok(()) => {
                info!(
                    beneficiary_id = beneficiary_id,
                    completed_days = beneficiary.completed_days,
                    total_program_days = beneficiary.total_program_days,
                    "Beneficiary completed program"
                );
                summary.completed += 1;
            }
            Err(e) => {
                warn!(
                    beneficiary_id = beneficiary_id,
                    error = %e,
                    "Failed to reconcile beneficiary status"
                );
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}
