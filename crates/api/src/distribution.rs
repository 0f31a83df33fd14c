// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The distribution operation at the API boundary.
//!
//! Validation happens in two layers: field presence and shape here,
//! then the stock and capacity conditions inside the store's
//! transaction. Nothing is written until every check has passed, and a
//! failing capacity re-check rolls the stock debit back.

use crate::clock;
use crate::display::{BeneficiaryView, to_display};
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::request_response::{DistributeRequest, DistributeResponse, DistributionView};
use nutritrack_domain::{Distribution, validate_date, validate_quantity};
use nutritrack_persistence::Persistence;

pub(crate) fn distribution_to_view(distribution: &Distribution) -> DistributionView {
    DistributionView {
        id: distribution.distribution_id.unwrap_or_default(),
        beneficiary_id: distribution.beneficiary_id,
        product_id: distribution.product_id,
        field_worker_id: distribution.field_worker_id,
        quantity_kg: distribution.quantity_kg,
        distribution_date: distribution.distribution_date.clone(),
    }
}

fn require<T>(value: Option<T>, field: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::InvalidArgument {
        field: field.to_string(),
        message: format!("Field '{field}' is required"),
    })
}

/// Records a distribution of product to a beneficiary.
///
/// The distributing field worker's own stock is debited (never the
/// central pool), the distribution row is created, and the
/// beneficiary's progress advances, all as one unit of work.
///
/// # Errors
///
/// Returns `InvalidArgument` for missing or malformed fields,
/// `NotFound` for absent references, `OutOfStock` when the worker's
/// stock cannot cover the quantity, and `ProgramOverrun` when the
/// beneficiary's program is already complete.
pub fn distribute(
    persistence: &mut Persistence,
    request: DistributeRequest,
) -> Result<DistributeResponse, ApiError> {
    let beneficiary_id: i64 = require(request.beneficiary_id, "beneficiaryId")?;
    let product_id: i64 = require(request.product_id, "productId")?;
    let quantity_kg: f64 = require(request.quantity_kg, "quantityKg")?;
    let field_worker_id: i64 = require(request.field_worker_id, "fieldWorkerId")?;

    validate_quantity(quantity_kg).map_err(translate_domain_error)?;

    let distribution_date: String = match request.distribution_date {
        Some(date) => {
            validate_date(&date).map_err(translate_domain_error)?;
            date
        }
        None => clock::today()?,
    };

    // The worker must exist even when they hold no stock row yet, so an
    // unknown worker surfaces as 404 rather than an empty-stock 400.
    persistence
        .get_field_worker(field_worker_id)
        .map_err(translate_persistence_error)?;
    persistence
        .get_product(product_id)
        .map_err(translate_persistence_error)?;

    let distribution: Distribution = Distribution {
        distribution_id: None,
        beneficiary_id,
        product_id,
        field_worker_id,
        quantity_kg,
        distribution_date,
    };

    let (recorded, beneficiary) = persistence
        .record_distribution(&distribution)
        .map_err(translate_persistence_error)?;

    let beneficiary_view: BeneficiaryView = to_display(&beneficiary);
    Ok(DistributeResponse {
        distribution: distribution_to_view(&recorded),
        beneficiary: beneficiary_view,
    })
}

/// Lists all recorded distributions.
///
/// # Errors
///
/// Returns an error if the store query fails.
pub fn list_distributions(
    persistence: &mut Persistence,
) -> Result<Vec<DistributionView>, ApiError> {
    let distributions: Vec<Distribution> = persistence
        .list_distributions()
        .map_err(translate_persistence_error)?;
    Ok(distributions.iter().map(distribution_to_view).collect())
}
