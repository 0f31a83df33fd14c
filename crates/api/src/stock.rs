// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Stock operations at the API boundary: central restocking, assignment
//! to field workers, and ledger access.

use crate::clock;
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::request_response::{
    AssignStockRequest, AssignStockResponse, MainStockView, RestockRequest, RestockResponse,
    StockTransactionView, StockView,
};
use nutritrack_domain::{MainStock, Stock, StockTransaction, validate_quantity};
use nutritrack_persistence::Persistence;

pub(crate) fn main_stock_to_view(level: &MainStock) -> MainStockView {
    MainStockView {
        id: level.main_stock_id.unwrap_or_default(),
        product_id: level.product_id,
        total_stock: level.total_stock,
    }
}

pub(crate) fn stock_to_view(level: &Stock) -> StockView {
    StockView {
        id: level.stock_id.unwrap_or_default(),
        field_worker_id: level.field_worker_id,
        product_id: level.product_id,
        total_stock: level.total_stock,
    }
}

pub(crate) fn transaction_to_view(transaction: &StockTransaction) -> StockTransactionView {
    StockTransactionView {
        id: transaction.transaction_id.unwrap_or_default(),
        product_id: transaction.product_id,
        quantity_kg: transaction.quantity_kg,
        transaction_type: transaction.transaction_type.as_str().to_string(),
        recorded_at: transaction.recorded_at.clone(),
    }
}

fn require<T>(value: Option<T>, field: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::InvalidArgument {
        field: field.to_string(),
        message: format!("Field '{field}' is required"),
    })
}

/// Adds quantity to a product's central stock.
///
/// Creates the stock row on first restock and always appends an `IN`
/// ledger entry for the delta; two restocks yield two entries, never a
/// merge.
///
/// # Errors
///
/// Returns `InvalidArgument` for a missing or non-positive amount, and
/// `NotFound` for an absent product.
pub fn create_main_stock(
    persistence: &mut Persistence,
    request: RestockRequest,
) -> Result<RestockResponse, ApiError> {
    let product_id: i64 = require(request.product_id, "productId")?;
    let quantity_kg: f64 = require(request.total_stock, "totalStock")?;
    validate_quantity(quantity_kg).map_err(translate_domain_error)?;

    let recorded_at: String = clock::now_rfc3339()?;
    let (level, transaction) = persistence
        .restock_main(product_id, quantity_kg, &recorded_at)
        .map_err(translate_persistence_error)?;

    Ok(RestockResponse {
        main_stock: main_stock_to_view(&level),
        transaction: transaction_to_view(&transaction),
    })
}

/// Moves quantity from the central pool to a field worker's stock.
///
/// The central decrement is conditional on availability; an `OUT`
/// ledger entry is appended in the same unit of work.
///
/// # Errors
///
/// Returns `InvalidArgument` for a missing or non-positive quantity,
/// `NotFound` for absent references, and `OutOfStock` when the pool
/// cannot cover the quantity.
pub fn assign_stock(
    persistence: &mut Persistence,
    request: AssignStockRequest,
) -> Result<AssignStockResponse, ApiError> {
    let field_worker_id: i64 = require(request.field_worker_id, "fieldWorkerId")?;
    let product_id: i64 = require(request.product_id, "productId")?;
    let quantity_kg: f64 = require(request.quantity_kg, "quantityKg")?;
    validate_quantity(quantity_kg).map_err(translate_domain_error)?;

    let recorded_at: String = clock::now_rfc3339()?;
    let (level, worker_level, transaction) = persistence
        .assign_stock(field_worker_id, product_id, quantity_kg, &recorded_at)
        .map_err(translate_persistence_error)?;

    Ok(AssignStockResponse {
        main_stock: main_stock_to_view(&level),
        stock: stock_to_view(&worker_level),
        transaction: transaction_to_view(&transaction),
    })
}

/// Lists all central stock levels.
///
/// # Errors
///
/// Returns an error if the store query fails.
pub fn list_main_stock(persistence: &mut Persistence) -> Result<Vec<MainStockView>, ApiError> {
    let levels: Vec<MainStock> = persistence
        .list_main_stock()
        .map_err(translate_persistence_error)?;
    Ok(levels.iter().map(main_stock_to_view).collect())
}

/// Lists a field worker's stock levels.
///
/// # Errors
///
/// Returns `NotFound` if the worker is absent.
pub fn list_worker_stock(
    persistence: &mut Persistence,
    field_worker_id: i64,
) -> Result<Vec<StockView>, ApiError> {
    persistence
        .get_field_worker(field_worker_id)
        .map_err(translate_persistence_error)?;

    let levels: Vec<Stock> = persistence
        .list_stock_for_worker(field_worker_id)
        .map_err(translate_persistence_error)?;
    Ok(levels.iter().map(stock_to_view).collect())
}

/// Lists the full stock-movement ledger in insertion order.
///
/// # Errors
///
/// Returns an error if the store query fails.
pub fn list_stock_transactions(
    persistence: &mut Persistence,
) -> Result<Vec<StockTransactionView>, ApiError> {
    let transactions: Vec<StockTransaction> = persistence
        .list_stock_transactions()
        .map_err(translate_persistence_error)?;
    Ok(transactions.iter().map(transaction_to_view).collect())
}
