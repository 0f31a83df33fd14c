// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use crate::request_response::{
    AddProgramDayRequest, AssignStockRequest, CreateBeneficiaryRequest, CreateFieldWorkerRequest,
    CreateProductRequest, DistributeRequest, RestockRequest,
};
use crate::{
    add_program_day, assign_stock, create_field_worker, create_main_stock, create_product,
    register_beneficiary,
};
use nutritrack_persistence::Persistence;

pub fn create_store() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn seed_field_worker(store: &mut Persistence) -> i64 {
    create_field_worker(
        store,
        CreateFieldWorkerRequest {
            name: String::from("Grace Achieng"),
            role: None,
        },
    )
    .expect("Failed to create field worker")
    .id
}

pub fn seed_product(store: &mut Persistence, name: &str) -> i64 {
    create_product(
        store,
        CreateProductRequest {
            name: name.to_string(),
        },
    )
    .expect("Failed to create product")
    .id
}

pub fn seed_beneficiary(store: &mut Persistence, field_worker_id: i64, national_id: &str) -> i64 {
    register_beneficiary(
        store,
        CreateBeneficiaryRequest {
            national_id: national_id.to_string(),
            name: String::from("Amina Yusuf"),
            beneficiary_type: String::from("pregnant"),
            field_worker_id,
        },
    )
    .expect("Failed to register beneficiary")
    .id
}

/// Enrolls `count` program days numbered 1..=count and returns their ids.
pub fn enroll_days(store: &mut Persistence, beneficiary_id: i64, count: i32) -> Vec<i64> {
    (1..=count)
        .map(|day_number| {
            add_program_day(
                store,
                beneficiary_id,
                AddProgramDayRequest {
                    day_number,
                    date: format!("2026-03-{day_number:02}"),
                    activity_type: String::from("attendance"),
                    notes: None,
                },
            )
            .expect("Failed to add program day")
            .id
        })
        .collect()
}

/// Gives a field worker `quantity_kg` of a product via the custody chain.
pub fn stock_worker(
    store: &mut Persistence,
    field_worker_id: i64,
    product_id: i64,
    quantity_kg: f64,
) {
    create_main_stock(
        store,
        RestockRequest {
            product_id: Some(product_id),
            total_stock: Some(quantity_kg),
        },
    )
    .expect("Failed to restock central pool");
    assign_stock(
        store,
        AssignStockRequest {
            field_worker_id: Some(field_worker_id),
            product_id: Some(product_id),
            quantity_kg: Some(quantity_kg),
        },
    )
    .expect("Failed to assign stock to worker");
}

pub fn distribute_request(
    beneficiary_id: i64,
    product_id: i64,
    field_worker_id: i64,
    quantity_kg: f64,
) -> DistributeRequest {
    DistributeRequest {
        beneficiary_id: Some(beneficiary_id),
        product_id: Some(product_id),
        quantity_kg: Some(quantity_kg),
        field_worker_id: Some(field_worker_id),
        distribution_date: Some(String::from("2026-03-15")),
    }
}
