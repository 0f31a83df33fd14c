// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutations for the reference-data boundary (field workers, products).

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{NewFieldWorker, NewProduct};
use crate::diesel_schema::{field_workers, products};
use crate::error::PersistenceError;
use crate::queries;
use diesel::prelude::*;
use nutritrack_domain::{FieldWorker, Product};

/// Inserts a field worker and returns it with its assigned ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_field_worker(
    conn: &mut SqliteConnection,
    worker: &FieldWorker,
) -> Result<FieldWorker, PersistenceError> {
    let record: NewFieldWorker = NewFieldWorker {
        name: worker.name.clone(),
        role: worker.role.clone(),
    };

    diesel::insert_into(field_workers::table)
        .values(&record)
        .execute(conn)?;
    let field_worker_id: i64 = get_last_insert_rowid(conn)?;

    Ok(FieldWorker::with_id(
        field_worker_id,
        worker.name.clone(),
        worker.role.clone(),
    ))
}

/// Inserts a product and returns it with its assigned ID.
///
/// # Errors
///
/// Returns `DuplicateProductName` if a product with the same name
/// already exists, or an error if the insert fails.
pub fn insert_product(
    conn: &mut SqliteConnection,
    product: &Product,
) -> Result<Product, PersistenceError> {
    conn.transaction::<Product, PersistenceError, _>(|conn| {
        if queries::reference::find_product_by_name(conn, &product.name)?.is_some() {
            return Err(PersistenceError::DuplicateProductName(product.name.clone()));
        }

        let record: NewProduct = NewProduct {
            name: product.name.clone(),
        };

        diesel::insert_into(products::table)
            .values(&record)
            .execute(conn)?;
        let product_id: i64 = get_last_insert_rowid(conn)?;

        Ok(Product::with_id(product_id, product.name.clone()))
    })
}
