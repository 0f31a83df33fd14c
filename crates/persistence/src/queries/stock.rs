// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Stock-level and ledger lookups.

use crate::data_models::{MainStockRow, StockRow, StockTransactionRow};
use crate::diesel_schema::{main_stock, stock, stock_transactions};
use crate::error::PersistenceError;
use diesel::prelude::*;
use nutritrack_domain::{MainStock, Stock, StockTransaction};

/// Finds the central stock row for a product, if present.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_main_stock(
    conn: &mut SqliteConnection,
    product_id: i64,
) -> Result<Option<MainStockRow>, PersistenceError> {
    Ok(main_stock::table
        .filter(main_stock::product_id.eq(product_id))
        .first::<MainStockRow>(conn)
        .optional()?)
}

/// Retrieves the central stock level for a product.
///
/// # Errors
///
/// Returns `NotFound` if the product has no central stock row.
pub fn get_main_stock(
    conn: &mut SqliteConnection,
    product_id: i64,
) -> Result<MainStock, PersistenceError> {
    find_main_stock(conn, product_id)?
        .map(MainStockRow::into_domain)
        .ok_or_else(|| PersistenceError::NotFound(format!("Main stock for product {product_id}")))
}

/// Lists all central stock levels ordered by product.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_main_stock(conn: &mut SqliteConnection) -> Result<Vec<MainStock>, PersistenceError> {
    let rows: Vec<MainStockRow> = main_stock::table
        .order(main_stock::product_id.asc())
        .load::<MainStockRow>(conn)?;
    Ok(rows.into_iter().map(MainStockRow::into_domain).collect())
}

/// Finds a field worker's stock row for a product, if present.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_stock(
    conn: &mut SqliteConnection,
    field_worker_id: i64,
    product_id: i64,
) -> Result<Option<StockRow>, PersistenceError> {
    Ok(stock::table
        .filter(
            stock::field_worker_id
                .eq(field_worker_id)
                .and(stock::product_id.eq(product_id)),
        )
        .first::<StockRow>(conn)
        .optional()?)
}

/// Retrieves a field worker's stock level for a product.
///
/// # Errors
///
/// Returns `NotFound` if the worker holds no stock row for the product.
pub fn get_stock(
    conn: &mut SqliteConnection,
    field_worker_id: i64,
    product_id: i64,
) -> Result<Stock, PersistenceError> {
    find_stock(conn, field_worker_id, product_id)?
        .map(StockRow::into_domain)
        .ok_or_else(|| {
            PersistenceError::NotFound(format!(
                "Stock for product {product_id} held by field worker {field_worker_id}"
            ))
        })
}

/// Lists a field worker's stock rows ordered by product.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_stock_for_worker(
    conn: &mut SqliteConnection,
    field_worker_id: i64,
) -> Result<Vec<Stock>, PersistenceError> {
    let rows: Vec<StockRow> = stock::table
        .filter(stock::field_worker_id.eq(field_worker_id))
        .order(stock::product_id.asc())
        .load::<StockRow>(conn)?;
    Ok(rows.into_iter().map(StockRow::into_domain).collect())
}

/// Lists the full stock-movement ledger in insertion order.
///
/// # Errors
///
/// Returns an error if the query fails or a row fails to convert.
pub fn list_stock_transactions(
    conn: &mut SqliteConnection,
) -> Result<Vec<StockTransaction>, PersistenceError> {
    let rows: Vec<StockTransactionRow> = stock_transactions::table
        .order(stock_transactions::transaction_id.asc())
        .load::<StockTransactionRow>(conn)?;
    rows.into_iter()
        .map(StockTransactionRow::into_domain)
        .collect()
}

/// Lists the ledger entries for one product in insertion order.
///
/// # Errors
///
/// Returns an error if the query fails or a row fails to convert.
pub fn list_stock_transactions_for_product(
    conn: &mut SqliteConnection,
    product_id: i64,
) -> Result<Vec<StockTransaction>, PersistenceError> {
    let rows: Vec<StockTransactionRow> = stock_transactions::table
        .filter(stock_transactions::product_id.eq(product_id))
        .order(stock_transactions::transaction_id.asc())
        .load::<StockTransactionRow>(conn)?;
    rows.into_iter()
        .map(StockTransactionRow::into_domain)
        .collect()
}
