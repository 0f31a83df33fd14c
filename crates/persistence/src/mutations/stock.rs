// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Central-stock mutations: restocking and assignment to field workers.
//!
//! Every movement of the central pool appends a ledger entry in the
//! same transaction as the quantity change. Decrements are conditional
//! single-statement updates; the predicate re-checks availability at
//! write time so the pool can never go negative.

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{MainStockRow, NewMainStock, NewStock, NewStockTransaction, StockRow};
use crate::diesel_schema::{main_stock, stock, stock_transactions};
use crate::error::PersistenceError;
use crate::queries;
use diesel::prelude::*;
use nutritrack_domain::{MainStock, Stock, StockTransaction, StockTransactionType};

/// Appends a ledger entry and returns it with its assigned ID.
fn append_transaction(
    conn: &mut SqliteConnection,
    product_id: i64,
    quantity_kg: f64,
    transaction_type: StockTransactionType,
    recorded_at: &str,
) -> Result<StockTransaction, PersistenceError> {
    let record: NewStockTransaction = NewStockTransaction {
        product_id,
        quantity_kg,
        transaction_type: transaction_type.as_str().to_string(),
        recorded_at: recorded_at.to_string(),
    };

    diesel::insert_into(stock_transactions::table)
        .values(&record)
        .execute(conn)?;
    let transaction_id: i64 = get_last_insert_rowid(conn)?;

    Ok(StockTransaction {
        transaction_id: Some(transaction_id),
        product_id,
        quantity_kg,
        transaction_type,
        recorded_at: recorded_at.to_string(),
    })
}

/// Adds quantity to a product's central stock, creating the row on
/// first restock, and appends an `IN` ledger entry for the delta.
///
/// Runs as one transaction; each restock gets its own ledger row, never
/// a merge with an earlier one.
///
/// # Errors
///
/// Returns `NotFound` if the product is absent.
pub fn restock_main(
    conn: &mut SqliteConnection,
    product_id: i64,
    quantity_kg: f64,
    recorded_at: &str,
) -> Result<(MainStock, StockTransaction), PersistenceError> {
    conn.transaction::<(MainStock, StockTransaction), PersistenceError, _>(|conn| {
        if queries::reference::find_product(conn, product_id)?.is_none() {
            return Err(PersistenceError::NotFound(format!("Product {product_id}")));
        }

        let updated: usize =
            diesel::update(main_stock::table.filter(main_stock::product_id.eq(product_id)))
                .set(main_stock::total_stock.eq(main_stock::total_stock + quantity_kg))
                .execute(conn)?;

        if updated == 0 {
            let record: NewMainStock = NewMainStock {
                product_id,
                total_stock: quantity_kg,
            };
            diesel::insert_into(main_stock::table)
                .values(&record)
                .execute(conn)?;
        }

        let transaction: StockTransaction = append_transaction(
            conn,
            product_id,
            quantity_kg,
            StockTransactionType::In,
            recorded_at,
        )?;
        let level: MainStock = queries::stock::get_main_stock(conn, product_id)?;

        Ok((level, transaction))
    })
}

/// Moves quantity from the central pool to a field worker's stock and
/// appends an `OUT` ledger entry.
///
/// Runs as one transaction. The central decrement is conditional
/// (`total_stock >= quantity`); when it affects no row the pool is
/// insufficient (or absent) and the whole operation fails without any
/// effect.
///
/// # Errors
///
/// Returns `NotFound` for an absent worker or product, or
/// `InsufficientMainStock` when the pool cannot cover the quantity.
pub fn assign_stock(
    conn: &mut SqliteConnection,
    field_worker_id: i64,
    product_id: i64,
    quantity_kg: f64,
    recorded_at: &str,
) -> Result<(MainStock, Stock, StockTransaction), PersistenceError> {
    conn.transaction::<(MainStock, Stock, StockTransaction), PersistenceError, _>(|conn| {
        if queries::reference::find_field_worker(conn, field_worker_id)?.is_none() {
            return Err(PersistenceError::NotFound(format!(
                "Field worker {field_worker_id}"
            )));
        }
        if queries::reference::find_product(conn, product_id)?.is_none() {
            return Err(PersistenceError::NotFound(format!("Product {product_id}")));
        }

        let decremented: usize = diesel::update(
            main_stock::table.filter(
                main_stock::product_id
                    .eq(product_id)
                    .and(main_stock::total_stock.ge(quantity_kg)),
            ),
        )
        .set(main_stock::total_stock.eq(main_stock::total_stock - quantity_kg))
        .execute(conn)?;

        if decremented == 0 {
            let available: f64 = queries::stock::find_main_stock(conn, product_id)?
                .map_or(0.0, |row: MainStockRow| row.total_stock);
            return Err(PersistenceError::InsufficientMainStock {
                product_id,
                requested: quantity_kg,
                available,
            });
        }

        let credited: usize = diesel::update(
            stock::table.filter(
                stock::field_worker_id
                    .eq(field_worker_id)
                    .and(stock::product_id.eq(product_id)),
            ),
        )
        .set(stock::total_stock.eq(stock::total_stock + quantity_kg))
        .execute(conn)?;

        if credited == 0 {
            let record: NewStock = NewStock {
                field_worker_id,
                product_id,
                total_stock: quantity_kg,
            };
            diesel::insert_into(stock::table)
                .values(&record)
                .execute(conn)?;
        }

        let transaction: StockTransaction = append_transaction(
            conn,
            product_id,
            quantity_kg,
            StockTransactionType::Out,
            recorded_at,
        )?;
        let level: MainStock = queries::stock::get_main_stock(conn, product_id)?;
        let worker_level: Stock = queries::stock::get_stock(conn, field_worker_id, product_id)?;

        Ok((level, worker_level, transaction))
    })
}

/// Conditionally debits a field worker's stock row.
///
/// Affects a row only when the worker holds at least `quantity_kg` of
/// the product. Returns whether a row was debited.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn debit_worker_stock(
    conn: &mut SqliteConnection,
    field_worker_id: i64,
    product_id: i64,
    quantity_kg: f64,
) -> Result<bool, PersistenceError> {
    let updated: usize = diesel::update(
        stock::table.filter(
            stock::field_worker_id
                .eq(field_worker_id)
                .and(stock::product_id.eq(product_id))
                .and(stock::total_stock.ge(quantity_kg)),
        ),
    )
    .set(stock::total_stock.eq(stock::total_stock - quantity_kg))
    .execute(conn)?;
    Ok(updated > 0)
}

/// Returns the quantity a worker currently holds, 0 when no row exists.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn worker_stock_available(
    conn: &mut SqliteConnection,
    field_worker_id: i64,
    product_id: i64,
) -> Result<f64, PersistenceError> {
    Ok(queries::stock::find_stock(conn, field_worker_id, product_id)?
        .map_or(0.0, |row: StockRow| row.total_stock))
}
