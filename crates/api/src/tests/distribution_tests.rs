// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ApiError;
use crate::request_response::{DistributeRequest, DistributeResponse, SetAttendanceRequest};
use crate::tests::helpers::{
    create_store, distribute_request, enroll_days, seed_beneficiary, seed_field_worker,
    seed_product, stock_worker,
};
use crate::{distribute, list_distributions, set_attendance};
use nutritrack_persistence::Persistence;

#[test]
fn test_distribute_returns_distribution_and_updated_beneficiary() {
    let mut store: Persistence = create_store();
    let worker_id: i64 = seed_field_worker(&mut store);
    let product_id: i64 = seed_product(&mut store, "Fortified flour");
    let beneficiary_id: i64 = seed_beneficiary(&mut store, worker_id, "NID-001");
    enroll_days(&mut store, beneficiary_id, 4);
    stock_worker(&mut store, worker_id, product_id, 10.0);

    let response: DistributeResponse = distribute(
        &mut store,
        distribute_request(beneficiary_id, product_id, worker_id, 2.5),
    )
    .unwrap();

    assert!(response.distribution.id > 0);
    assert_eq!(response.distribution.quantity_kg, 2.5);
    assert_eq!(response.beneficiary.completed_days, 1);
    assert_eq!(response.beneficiary.attendance_rate, 25);
    assert_eq!(response.beneficiary.days_remaining, 3);
    assert_eq!(list_distributions(&mut store).unwrap().len(), 1);
}

#[test]
fn test_distribute_rejects_missing_fields_by_name() {
    let mut store: Persistence = create_store();

    let missing_beneficiary: Result<DistributeResponse, ApiError> = distribute(
        &mut store,
        DistributeRequest {
            beneficiary_id: None,
            product_id: Some(1),
            quantity_kg: Some(1.0),
            field_worker_id: Some(1),
            distribution_date: None,
        },
    );
    assert!(matches!(
        missing_beneficiary,
        Err(ApiError::InvalidArgument { ref field, .. }) if field == "beneficiaryId"
    ));

    let missing_quantity: Result<DistributeResponse, ApiError> = distribute(
        &mut store,
        DistributeRequest {
            beneficiary_id: Some(1),
            product_id: Some(1),
            quantity_kg: None,
            field_worker_id: Some(1),
            distribution_date: None,
        },
    );
    assert!(matches!(
        missing_quantity,
        Err(ApiError::InvalidArgument { ref field, .. }) if field == "quantityKg"
    ));
}

#[test]
fn test_distribute_rejects_non_positive_quantity() {
    let mut store: Persistence = create_store();
    let worker_id: i64 = seed_field_worker(&mut store);
    let product_id: i64 = seed_product(&mut store, "Fortified flour");
    let beneficiary_id: i64 = seed_beneficiary(&mut store, worker_id, "NID-001");

    let result: Result<DistributeResponse, ApiError> = distribute(
        &mut store,
        distribute_request(beneficiary_id, product_id, worker_id, 0.0),
    );
    assert!(matches!(
        result,
        Err(ApiError::InvalidArgument { ref field, .. }) if field == "quantityKg"
    ));
}

#[test]
fn test_distribute_with_insufficient_stock_is_out_of_stock() {
    let mut store: Persistence = create_store();
    let worker_id: i64 = seed_field_worker(&mut store);
    let product_id: i64 = seed_product(&mut store, "Fortified flour");
    let beneficiary_id: i64 = seed_beneficiary(&mut store, worker_id, "NID-001");
    enroll_days(&mut store, beneficiary_id, 2);
    stock_worker(&mut store, worker_id, product_id, 1.0);

    let result: Result<DistributeResponse, ApiError> = distribute(
        &mut store,
        distribute_request(beneficiary_id, product_id, worker_id, 2.0),
    );
    assert!(matches!(result, Err(ApiError::OutOfStock { .. })));

    // Failed attempts leave everything untouched.
    assert_eq!(
        store.get_stock(worker_id, product_id).unwrap().total_stock,
        1.0
    );
    assert!(list_distributions(&mut store).unwrap().is_empty());
}

#[test]
fn test_distribute_without_stock_record_is_out_of_stock() {
    let mut store: Persistence = create_store();
    let worker_id: i64 = seed_field_worker(&mut store);
    let product_id: i64 = seed_product(&mut store, "Fortified flour");
    let beneficiary_id: i64 = seed_beneficiary(&mut store, worker_id, "NID-001");
    enroll_days(&mut store, beneficiary_id, 2);

    let result: Result<DistributeResponse, ApiError> = distribute(
        &mut store,
        distribute_request(beneficiary_id, product_id, worker_id, 1.0),
    );
    assert!(matches!(result, Err(ApiError::OutOfStock { .. })));
}

#[test]
fn test_distribute_to_absent_references_is_not_found() {
    let mut store: Persistence = create_store();
    let worker_id: i64 = seed_field_worker(&mut store);
    let product_id: i64 = seed_product(&mut store, "Fortified flour");
    let beneficiary_id: i64 = seed_beneficiary(&mut store, worker_id, "NID-001");
    enroll_days(&mut store, beneficiary_id, 2);
    stock_worker(&mut store, worker_id, product_id, 5.0);

    assert!(matches!(
        distribute(
            &mut store,
            distribute_request(42, product_id, worker_id, 1.0)
        ),
        Err(ApiError::NotFound { .. })
    ));
    assert!(matches!(
        distribute(
            &mut store,
            distribute_request(beneficiary_id, 42, worker_id, 1.0)
        ),
        Err(ApiError::NotFound { .. })
    ));
    assert!(matches!(
        distribute(
            &mut store,
            distribute_request(beneficiary_id, product_id, 42, 1.0)
        ),
        Err(ApiError::NotFound { .. })
    ));
}

#[test]
fn test_full_program_rejects_distribution_with_overrun() {
    let mut store: Persistence = create_store();
    let worker_id: i64 = seed_field_worker(&mut store);
    let product_id: i64 = seed_product(&mut store, "Fortified flour");
    let beneficiary_id: i64 = seed_beneficiary(&mut store, worker_id, "NID-001");
    let day_ids: Vec<i64> = enroll_days(&mut store, beneficiary_id, 5);
    stock_worker(&mut store, worker_id, product_id, 20.0);

    // Five attendances fill the five-day program.
    for day_id in &day_ids {
        set_attendance(
            &mut store,
            beneficiary_id,
            *day_id,
            SetAttendanceRequest {
                attended: true,
                notes: None,
            },
        )
        .unwrap();
    }

    // A sixth day is accepted structurally and can be attended.
    let sixth: Vec<i64> = vec![
        crate::add_program_day(
            &mut store,
            beneficiary_id,
            crate::request_response::AddProgramDayRequest {
                day_number: 6,
                date: String::from("2026-03-06"),
                activity_type: String::from("attendance"),
                notes: None,
            },
        )
        .unwrap()
        .id,
    ];
    set_attendance(
        &mut store,
        beneficiary_id,
        sixth[0],
        SetAttendanceRequest {
            attended: true,
            notes: None,
        },
    )
    .unwrap();

    // completed_days now equals total_program_days (6 of 6); any further
    // distribution must fail with a program overrun.
    let result: Result<DistributeResponse, ApiError> = distribute(
        &mut store,
        distribute_request(beneficiary_id, product_id, worker_id, 1.0),
    );
    assert!(matches!(result, Err(ApiError::ProgramOverrun { .. })));

    // The refused distribution left the stock untouched.
    assert_eq!(
        store.get_stock(worker_id, product_id).unwrap().total_stock,
        20.0
    );
    assert!(list_distributions(&mut store).unwrap().is_empty());
}

#[test]
fn test_overdraw_sequence_respects_stock_floor() {
    let mut store: Persistence = create_store();
    let worker_id: i64 = seed_field_worker(&mut store);
    let product_id: i64 = seed_product(&mut store, "Fortified flour");
    let beneficiary_id: i64 = seed_beneficiary(&mut store, worker_id, "NID-001");
    enroll_days(&mut store, beneficiary_id, 10);
    stock_worker(&mut store, worker_id, product_id, 10.0);

    // Stock 10, quantity 4: exactly floor(10/4) = 2 attempts succeed.
    let mut successes: u32 = 0;
    let mut failures: u32 = 0;
    for _ in 0..4 {
        match distribute(
            &mut store,
            distribute_request(beneficiary_id, product_id, worker_id, 4.0),
        ) {
            Ok(_) => successes += 1,
            Err(ApiError::OutOfStock { .. }) => failures += 1,
            Err(other) => panic!("Unexpected error: {other}"),
        }
    }

    assert_eq!(successes, 2);
    assert_eq!(failures, 2);
    assert_eq!(
        store.get_stock(worker_id, product_id).unwrap().total_stock,
        2.0
    );
}
