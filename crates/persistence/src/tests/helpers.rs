// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use crate::Persistence;
use nutritrack_domain::{
    ActivityType, Beneficiary, BeneficiaryType, FieldWorker, NationalId, Product, ProgramDay,
};

pub const TEST_TIMESTAMP: &str = "2026-02-01T08:00:00Z";

pub fn create_store() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn seed_field_worker(store: &mut Persistence) -> i64 {
    let worker: FieldWorker = store
        .insert_field_worker(&FieldWorker::new(
            String::from("Grace Achieng"),
            String::from("field_worker"),
        ))
        .expect("Failed to insert field worker");
    worker.field_worker_id.expect("Worker should have an id")
}

pub fn seed_product(store: &mut Persistence, name: &str) -> i64 {
    let product: Product = store
        .insert_product(&Product::new(name.to_string()))
        .expect("Failed to insert product");
    product.product_id.expect("Product should have an id")
}

pub fn seed_beneficiary(store: &mut Persistence, field_worker_id: i64, national_id: &str) -> i64 {
    let beneficiary: Beneficiary = store
        .insert_beneficiary(&Beneficiary::new(
            NationalId::new(national_id),
            String::from("Amina Yusuf"),
            BeneficiaryType::Pregnant,
            field_worker_id,
            TEST_TIMESTAMP.to_string(),
        ))
        .expect("Failed to insert beneficiary");
    beneficiary
        .beneficiary_id
        .expect("Beneficiary should have an id")
}

/// Enrolls `count` program days numbered 1..=count and returns their ids.
pub fn enroll_days(store: &mut Persistence, beneficiary_id: i64, count: i32) -> Vec<i64> {
    (1..=count)
        .map(|day_number| {
            let (day, _) = store
                .insert_program_day(&ProgramDay::new(
                    beneficiary_id,
                    day_number,
                    format!("2026-03-{:02}", day_number),
                    ActivityType::Attendance,
                    None,
                ))
                .expect("Failed to insert program day");
            day.program_day_id.expect("Day should have an id")
        })
        .collect()
}

/// Gives a field worker `quantity_kg` of a product via the custody
/// chain (central restock then assignment).
pub fn stock_worker(store: &mut Persistence, field_worker_id: i64, product_id: i64, quantity_kg: f64) {
    store
        .restock_main(product_id, quantity_kg, TEST_TIMESTAMP)
        .expect("Failed to restock central pool");
    store
        .assign_stock(field_worker_id, product_id, quantity_kg, TEST_TIMESTAMP)
        .expect("Failed to assign stock to worker");
}
