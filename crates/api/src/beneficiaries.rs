// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Beneficiary operations at the API boundary.

use std::str::FromStr;

use crate::clock;
use crate::display::{BeneficiaryView, to_display};
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::request_response::{CreateBeneficiaryRequest, MessageResponse, UpdateStatusRequest};
use nutritrack_domain::{
    Beneficiary, BeneficiaryStatus, BeneficiaryType, NationalId, validate_name,
    validate_national_id, validate_status_transition,
};
use nutritrack_persistence::Persistence;

/// Registers a new beneficiary.
///
/// Validates the request fields, then creates the beneficiary in the
/// `active` status with zeroed progress counters.
///
/// # Errors
///
/// Returns an error if a field is invalid, the national identifier is
/// already registered, or the assigned field worker does not exist.
pub fn register_beneficiary(
    persistence: &mut Persistence,
    request: CreateBeneficiaryRequest,
) -> Result<BeneficiaryView, ApiError> {
    validate_national_id(&request.national_id).map_err(translate_domain_error)?;
    validate_name(&request.name).map_err(translate_domain_error)?;
    let beneficiary_type: BeneficiaryType =
        BeneficiaryType::from_str(&request.beneficiary_type).map_err(translate_domain_error)?;

    let registered_at: String = clock::now_rfc3339()?;
    let beneficiary: Beneficiary = Beneficiary::new(
        NationalId::new(&request.national_id),
        request.name,
        beneficiary_type,
        request.field_worker_id,
        registered_at,
    );

    let created: Beneficiary = persistence
        .insert_beneficiary(&beneficiary)
        .map_err(translate_persistence_error)?;

    Ok(to_display(&created))
}

/// Retrieves one beneficiary as an enriched display payload.
///
/// # Errors
///
/// Returns `NotFound` if the beneficiary is absent.
pub fn get_beneficiary(
    persistence: &mut Persistence,
    beneficiary_id: i64,
) -> Result<BeneficiaryView, ApiError> {
    let beneficiary: Beneficiary = persistence
        .get_beneficiary(beneficiary_id)
        .map_err(translate_persistence_error)?;
    Ok(to_display(&beneficiary))
}

/// Lists all beneficiaries as enriched display payloads.
///
/// # Errors
///
/// Returns an error if the store query fails.
pub fn list_beneficiaries(
    persistence: &mut Persistence,
) -> Result<Vec<BeneficiaryView>, ApiError> {
    let beneficiaries: Vec<Beneficiary> = persistence
        .list_beneficiaries()
        .map_err(translate_persistence_error)?;
    Ok(beneficiaries.iter().map(to_display).collect())
}

/// Directly updates a beneficiary's status.
///
/// Only `active ↔ inactive` flips may be requested here; `completed` is
/// owned by the reconciliation path and is rejected as a target.
///
/// # Errors
///
/// Returns an error if the status string or the transition is invalid,
/// or the beneficiary is absent.
pub fn update_status(
    persistence: &mut Persistence,
    beneficiary_id: i64,
    request: UpdateStatusRequest,
) -> Result<BeneficiaryView, ApiError> {
    let target: BeneficiaryStatus =
        BeneficiaryStatus::from_str(&request.status).map_err(translate_domain_error)?;

    let current: Beneficiary = persistence
        .get_beneficiary(beneficiary_id)
        .map_err(translate_persistence_error)?;

    validate_status_transition(current.status, target).map_err(translate_domain_error)?;

    persistence
        .update_beneficiary_status(beneficiary_id, target)
        .map_err(translate_persistence_error)?;

    let updated: Beneficiary = persistence
        .get_beneficiary(beneficiary_id)
        .map_err(translate_persistence_error)?;
    Ok(to_display(&updated))
}

/// Deletes a beneficiary along with its program days and distributions.
///
/// # Errors
///
/// Returns `NotFound` if the beneficiary is absent.
pub fn remove_beneficiary(
    persistence: &mut Persistence,
    beneficiary_id: i64,
) -> Result<MessageResponse, ApiError> {
    persistence
        .delete_beneficiary(beneficiary_id)
        .map_err(translate_persistence_error)?;

    Ok(MessageResponse {
        message: format!("Beneficiary {beneficiary_id} deleted"),
    })
}
