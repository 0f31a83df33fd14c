// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lookups for the reference-data boundary (field workers, products).

use crate::data_models::{FieldWorkerRow, ProductRow};
use crate::diesel_schema::{field_workers, products};
use crate::error::PersistenceError;
use diesel::prelude::*;
use nutritrack_domain::{FieldWorker, Product};

/// Finds a field worker row by ID, if present.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_field_worker(
    conn: &mut SqliteConnection,
    field_worker_id: i64,
) -> Result<Option<FieldWorkerRow>, PersistenceError> {
    Ok(field_workers::table
        .filter(field_workers::field_worker_id.eq(field_worker_id))
        .first::<FieldWorkerRow>(conn)
        .optional()?)
}

/// Retrieves a field worker by ID.
///
/// # Errors
///
/// Returns `NotFound` if no field worker with this ID exists.
pub fn get_field_worker(
    conn: &mut SqliteConnection,
    field_worker_id: i64,
) -> Result<FieldWorker, PersistenceError> {
    find_field_worker(conn, field_worker_id)?
        .map(FieldWorkerRow::into_domain)
        .ok_or_else(|| PersistenceError::NotFound(format!("Field worker {field_worker_id}")))
}

/// Lists all field workers ordered by ID.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_field_workers(
    conn: &mut SqliteConnection,
) -> Result<Vec<FieldWorker>, PersistenceError> {
    let rows: Vec<FieldWorkerRow> = field_workers::table
        .order(field_workers::field_worker_id.asc())
        .load::<FieldWorkerRow>(conn)?;
    Ok(rows.into_iter().map(FieldWorkerRow::into_domain).collect())
}

/// Finds a product row by ID, if present.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_product(
    conn: &mut SqliteConnection,
    product_id: i64,
) -> Result<Option<ProductRow>, PersistenceError> {
    Ok(products::table
        .filter(products::product_id.eq(product_id))
        .first::<ProductRow>(conn)
        .optional()?)
}

/// Finds a product row by its unique name, if present.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_product_by_name(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<Option<ProductRow>, PersistenceError> {
    Ok(products::table
        .filter(products::name.eq(name))
        .first::<ProductRow>(conn)
        .optional()?)
}

/// Retrieves a product by ID.
///
/// # Errors
///
/// Returns `NotFound` if no product with this ID exists.
pub fn get_product(
    conn: &mut SqliteConnection,
    product_id: i64,
) -> Result<Product, PersistenceError> {
    find_product(conn, product_id)?
        .map(ProductRow::into_domain)
        .ok_or_else(|| PersistenceError::NotFound(format!("Product {product_id}")))
}

/// Lists all products ordered by ID.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_products(conn: &mut SqliteConnection) -> Result<Vec<Product>, PersistenceError> {
    let rows: Vec<ProductRow> = products::table
        .order(products::product_id.asc())
        .load::<ProductRow>(conn)?;
    Ok(rows.into_iter().map(ProductRow::into_domain).collect())
}
