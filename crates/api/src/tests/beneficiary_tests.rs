// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ApiError;
use crate::request_response::{CreateBeneficiaryRequest, UpdateStatusRequest};
use crate::tests::helpers::{create_store, seed_beneficiary, seed_field_worker};
use crate::{get_beneficiary, list_beneficiaries, register_beneficiary, remove_beneficiary, update_status};
use crate::display::BeneficiaryView;
use nutritrack_persistence::Persistence;

#[test]
fn test_register_beneficiary_returns_enriched_view() {
    let mut store: Persistence = create_store();
    let worker_id: i64 = seed_field_worker(&mut store);

    let view: BeneficiaryView = register_beneficiary(
        &mut store,
        CreateBeneficiaryRequest {
            national_id: String::from("NID-001"),
            name: String::from("Amina Yusuf"),
            beneficiary_type: String::from("pregnant"),
            field_worker_id: worker_id,
        },
    )
    .unwrap();

    assert!(view.id > 0);
    assert_eq!(view.status, "active");
    assert_eq!(view.total_program_days, 0);
    assert_eq!(view.days_remaining, 0);
    assert_eq!(view.program_progress, 0);
}

#[test]
fn test_register_beneficiary_rejects_duplicate_national_id() {
    let mut store: Persistence = create_store();
    let worker_id: i64 = seed_field_worker(&mut store);
    seed_beneficiary(&mut store, worker_id, "NID-001");

    let result: Result<BeneficiaryView, ApiError> = register_beneficiary(
        &mut store,
        CreateBeneficiaryRequest {
            national_id: String::from("NID-001"),
            name: String::from("Another Person"),
            beneficiary_type: String::from("child"),
            field_worker_id: worker_id,
        },
    );

    assert!(matches!(result, Err(ApiError::Conflict { ref rule, .. }) if rule == "unique_national_id"));
}

#[test]
fn test_register_beneficiary_rejects_unknown_type() {
    let mut store: Persistence = create_store();
    let worker_id: i64 = seed_field_worker(&mut store);

    let result: Result<BeneficiaryView, ApiError> = register_beneficiary(
        &mut store,
        CreateBeneficiaryRequest {
            national_id: String::from("NID-001"),
            name: String::from("Amina Yusuf"),
            beneficiary_type: String::from("elder"),
            field_worker_id: worker_id,
        },
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidArgument { ref field, .. }) if field == "beneficiaryType"
    ));
}

#[test]
fn test_register_beneficiary_rejects_absent_worker() {
    let mut store: Persistence = create_store();

    let result: Result<BeneficiaryView, ApiError> = register_beneficiary(
        &mut store,
        CreateBeneficiaryRequest {
            national_id: String::from("NID-001"),
            name: String::from("Amina Yusuf"),
            beneficiary_type: String::from("pregnant"),
            field_worker_id: 42,
        },
    );

    assert!(matches!(result, Err(ApiError::NotFound { .. })));
}

#[test]
fn test_get_absent_beneficiary_is_not_found() {
    let mut store: Persistence = create_store();

    let result: Result<BeneficiaryView, ApiError> = get_beneficiary(&mut store, 42);
    assert!(matches!(result, Err(ApiError::NotFound { .. })));
}

#[test]
fn test_list_beneficiaries_returns_all_views() {
    let mut store: Persistence = create_store();
    let worker_id: i64 = seed_field_worker(&mut store);
    seed_beneficiary(&mut store, worker_id, "NID-001");
    seed_beneficiary(&mut store, worker_id, "NID-002");

    let views: Vec<BeneficiaryView> = list_beneficiaries(&mut store).unwrap();
    assert_eq!(views.len(), 2);
}

#[test]
fn test_update_status_flips_between_active_and_inactive() {
    let mut store: Persistence = create_store();
    let worker_id: i64 = seed_field_worker(&mut store);
    let beneficiary_id: i64 = seed_beneficiary(&mut store, worker_id, "NID-001");

    let view: BeneficiaryView = update_status(
        &mut store,
        beneficiary_id,
        UpdateStatusRequest {
            status: String::from("inactive"),
        },
    )
    .unwrap();
    assert_eq!(view.status, "inactive");

    let view: BeneficiaryView = update_status(
        &mut store,
        beneficiary_id,
        UpdateStatusRequest {
            status: String::from("active"),
        },
    )
    .unwrap();
    assert_eq!(view.status, "active");
}

#[test]
fn test_update_status_rejects_completed_target() {
    let mut store: Persistence = create_store();
    let worker_id: i64 = seed_field_worker(&mut store);
    let beneficiary_id: i64 = seed_beneficiary(&mut store, worker_id, "NID-001");

    let result: Result<BeneficiaryView, ApiError> = update_status(
        &mut store,
        beneficiary_id,
        UpdateStatusRequest {
            status: String::from("completed"),
        },
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidArgument { ref field, .. }) if field == "status"
    ));
}

#[test]
fn test_update_status_rejects_unknown_value() {
    let mut store: Persistence = create_store();
    let worker_id: i64 = seed_field_worker(&mut store);
    let beneficiary_id: i64 = seed_beneficiary(&mut store, worker_id, "NID-001");

    let result: Result<BeneficiaryView, ApiError> = update_status(
        &mut store,
        beneficiary_id,
        UpdateStatusRequest {
            status: String::from("paused"),
        },
    );

    assert!(matches!(result, Err(ApiError::InvalidArgument { .. })));
}

#[test]
fn test_remove_beneficiary_returns_message() {
    let mut store: Persistence = create_store();
    let worker_id: i64 = seed_field_worker(&mut store);
    let beneficiary_id: i64 = seed_beneficiary(&mut store, worker_id, "NID-001");

    let response = remove_beneficiary(&mut store, beneficiary_id).unwrap();
    assert!(response.message.contains("deleted"));

    assert!(matches!(
        get_beneficiary(&mut store, beneficiary_id),
        Err(ApiError::NotFound { .. })
    ));
}
