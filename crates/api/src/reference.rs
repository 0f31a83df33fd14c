// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Minimal reference-data operations for the collaborator boundary.
//!
//! Field workers and products are owned by external systems; only the
//! create/list surface needed to exercise the core operations exists
//! here.

use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::request_response::{
    CreateFieldWorkerRequest, CreateProductRequest, FieldWorkerView, ProductView,
};
use nutritrack_domain::{FieldWorker, Product, validate_name};
use nutritrack_persistence::Persistence;

fn worker_to_view(worker: &FieldWorker) -> FieldWorkerView {
    FieldWorkerView {
        id: worker.field_worker_id.unwrap_or_default(),
        name: worker.name.clone(),
        role: worker.role.clone(),
    }
}

fn product_to_view(product: &Product) -> ProductView {
    ProductView {
        id: product.product_id.unwrap_or_default(),
        name: product.name.clone(),
    }
}

/// Creates a field worker directory entry.
///
/// # Errors
///
/// Returns `InvalidArgument` for an empty name.
pub fn create_field_worker(
    persistence: &mut Persistence,
    request: CreateFieldWorkerRequest,
) -> Result<FieldWorkerView, ApiError> {
    validate_name(&request.name).map_err(translate_domain_error)?;

    let worker: FieldWorker = FieldWorker::new(
        request.name,
        request.role.unwrap_or_else(|| String::from("field_worker")),
    );
    let created: FieldWorker = persistence
        .insert_field_worker(&worker)
        .map_err(translate_persistence_error)?;

    Ok(worker_to_view(&created))
}

/// Creates a product catalog entry.
///
/// # Errors
///
/// Returns `InvalidArgument` for an empty name or `Conflict` for a
/// duplicate one.
pub fn create_product(
    persistence: &mut Persistence,
    request: CreateProductRequest,
) -> Result<ProductView, ApiError> {
    validate_name(&request.name).map_err(translate_domain_error)?;

    let created: Product = persistence
        .insert_product(&Product::new(request.name))
        .map_err(translate_persistence_error)?;

    Ok(product_to_view(&created))
}

/// Lists all field workers.
///
/// # Errors
///
/// Returns an error if the store query fails.
pub fn list_field_workers(
    persistence: &mut Persistence,
) -> Result<Vec<FieldWorkerView>, ApiError> {
    let workers: Vec<FieldWorker> = persistence
        .list_field_workers()
        .map_err(translate_persistence_error)?;
    Ok(workers.iter().map(worker_to_view).collect())
}

/// Lists all products.
///
/// # Errors
///
/// Returns an error if the store query fails.
pub fn list_products(persistence: &mut Persistence) -> Result<Vec<ProductView>, ApiError> {
    let products: Vec<Product> = persistence
        .list_products()
        .map_err(translate_persistence_error)?;
    Ok(products.iter().map(product_to_view).collect())
}
