// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    TEST_TIMESTAMP, create_store, enroll_days, seed_beneficiary, seed_field_worker,
};
use crate::{Persistence, PersistenceError};
use nutritrack_domain::{Beneficiary, BeneficiaryStatus, BeneficiaryType, NationalId};

#[test]
fn test_insert_beneficiary_assigns_id_and_defaults() {
    let mut store: Persistence = create_store();
    let worker_id: i64 = seed_field_worker(&mut store);

    let beneficiary: Beneficiary = store
        .insert_beneficiary(&Beneficiary::new(
            NationalId::new("NID-001"),
            String::from("Amina Yusuf"),
            BeneficiaryType::Pregnant,
            worker_id,
            TEST_TIMESTAMP.to_string(),
        ))
        .unwrap();

    assert!(beneficiary.beneficiary_id.is_some());
    assert_eq!(beneficiary.status, BeneficiaryStatus::Active);
    assert_eq!(beneficiary.total_program_days, 0);
    assert_eq!(beneficiary.completed_days, 0);
    assert_eq!(beneficiary.attendance_rate, 0);
}

#[test]
fn test_insert_beneficiary_rejects_duplicate_national_id() {
    let mut store: Persistence = create_store();
    let worker_id: i64 = seed_field_worker(&mut store);
    seed_beneficiary(&mut store, worker_id, "NID-001");

    let result: Result<Beneficiary, PersistenceError> =
        store.insert_beneficiary(&Beneficiary::new(
            NationalId::new("NID-001"),
            String::from("Another Person"),
            BeneficiaryType::Child,
            worker_id,
            TEST_TIMESTAMP.to_string(),
        ));

    assert!(matches!(
        result,
        Err(PersistenceError::DuplicateNationalId(_))
    ));
}

#[test]
fn test_insert_beneficiary_rejects_absent_field_worker() {
    let mut store: Persistence = create_store();

    let result: Result<Beneficiary, PersistenceError> =
        store.insert_beneficiary(&Beneficiary::new(
            NationalId::new("NID-001"),
            String::from("Amina Yusuf"),
            BeneficiaryType::Pregnant,
            999,
            TEST_TIMESTAMP.to_string(),
        ));

    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_get_absent_beneficiary_is_not_found() {
    let mut store: Persistence = create_store();

    let result: Result<Beneficiary, PersistenceError> = store.get_beneficiary(42);
    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_update_beneficiary_status_persists() {
    let mut store: Persistence = create_store();
    let worker_id: i64 = seed_field_worker(&mut store);
    let beneficiary_id: i64 = seed_beneficiary(&mut store, worker_id, "NID-001");

    store
        .update_beneficiary_status(beneficiary_id, BeneficiaryStatus::Inactive)
        .unwrap();

    let beneficiary: Beneficiary = store.get_beneficiary(beneficiary_id).unwrap();
    assert_eq!(beneficiary.status, BeneficiaryStatus::Inactive);
}

#[test]
fn test_update_status_of_absent_beneficiary_is_not_found() {
    let mut store: Persistence = create_store();

    let result: Result<(), PersistenceError> =
        store.update_beneficiary_status(42, BeneficiaryStatus::Inactive);
    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_delete_beneficiary_cascades_program_days() {
    let mut store: Persistence = create_store();
    let worker_id: i64 = seed_field_worker(&mut store);
    let beneficiary_id: i64 = seed_beneficiary(&mut store, worker_id, "NID-001");
    enroll_days(&mut store, beneficiary_id, 3);

    assert_eq!(store.count_program_days(beneficiary_id).unwrap(), 3);

    store.delete_beneficiary(beneficiary_id).unwrap();

    assert_eq!(store.count_program_days(beneficiary_id).unwrap(), 0);
    assert!(matches!(
        store.get_beneficiary(beneficiary_id),
        Err(PersistenceError::NotFound(_))
    ));
}

#[test]
fn test_delete_absent_beneficiary_is_not_found() {
    let mut store: Persistence = create_store();

    let result: Result<(), PersistenceError> = store.delete_beneficiary(42);
    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_list_unfinished_excludes_completed_beneficiaries() {
    let mut store: Persistence = create_store();
    let worker_id: i64 = seed_field_worker(&mut store);
    let first: i64 = seed_beneficiary(&mut store, worker_id, "NID-001");
    let second: i64 = seed_beneficiary(&mut store, worker_id, "NID-002");

    store
        .update_beneficiary_status(first, BeneficiaryStatus::Completed)
        .unwrap();

    let unfinished: Vec<Beneficiary> = store.list_unfinished_beneficiaries().unwrap();
    let ids: Vec<i64> = unfinished
        .iter()
        .filter_map(|b: &Beneficiary| b.beneficiary_id)
        .collect();

    assert_eq!(ids, vec![second]);
}
