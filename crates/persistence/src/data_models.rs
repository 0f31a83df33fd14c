// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Diesel row structs and their conversions into domain types.
//!
//! Enum-valued columns are stored as their canonical strings; converting
//! a row back into a domain type re-parses them, and a value that fails
//! to parse surfaces as `InvalidStoredValue` rather than panicking.

use crate::diesel_schema::{
    beneficiaries, distributions, field_workers, main_stock, products, program_days, stock,
    stock_transactions,
};
use crate::error::PersistenceError;
use diesel::prelude::*;
use nutritrack_domain::{
    ActivityType, Beneficiary, BeneficiaryStatus, BeneficiaryType, Distribution, FieldWorker,
    MainStock, NationalId, Product, ProgramDay, Stock, StockTransaction, StockTransactionType,
};
use std::str::FromStr;

/// Queryable row for the `field_workers` table.
#[derive(Debug, Clone, Queryable)]
pub struct FieldWorkerRow {
    pub field_worker_id: i64,
    pub name: String,
    pub role: String,
}

impl FieldWorkerRow {
    pub fn into_domain(self) -> FieldWorker {
        FieldWorker::with_id(self.field_worker_id, self.name, self.role)
    }
}

/// Insertable row for the `field_workers` table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = field_workers)]
pub struct NewFieldWorker {
    pub name: String,
    pub role: String,
}

/// Queryable row for the `products` table.
#[derive(Debug, Clone, Queryable)]
pub struct ProductRow {
    pub product_id: i64,
    pub name: String,
}

impl ProductRow {
    pub fn into_domain(self) -> Product {
        Product::with_id(self.product_id, self.name)
    }
}

/// Insertable row for the `products` table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = products)]
pub struct NewProduct {
    pub name: String,
}

/// Queryable row for the `beneficiaries` table.
#[derive(Debug, Clone, Queryable)]
pub struct BeneficiaryRow {
    pub beneficiary_id: i64,
    pub national_id: String,
    pub name: String,
    pub beneficiary_type: String,
    pub status: String,
    pub field_worker_id: i64,
    pub total_program_days: i32,
    pub completed_days: i32,
    pub attendance_rate: i32,
    pub registered_at: String,
}

impl BeneficiaryRow {
    /// Converts this row into a domain `Beneficiary`.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored enum string no longer parses.
    pub fn into_domain(self) -> Result<Beneficiary, PersistenceError> {
        let beneficiary_type: BeneficiaryType = BeneficiaryType::from_str(&self.beneficiary_type)
            .map_err(|_| PersistenceError::InvalidStoredValue {
            column: String::from("beneficiaries.beneficiary_type"),
            value: self.beneficiary_type.clone(),
        })?;
        let status: BeneficiaryStatus =
            BeneficiaryStatus::from_str(&self.status).map_err(|_| {
                PersistenceError::InvalidStoredValue {
                    column: String::from("beneficiaries.status"),
                    value: self.status.clone(),
                }
            })?;

        Ok(Beneficiary::with_id(
            self.beneficiary_id,
            NationalId::new(&self.national_id),
            self.name,
            beneficiary_type,
            status,
            self.field_worker_id,
            self.total_program_days,
            self.completed_days,
            self.attendance_rate,
            self.registered_at,
        ))
    }
}

/// Insertable row for the `beneficiaries` table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = beneficiaries)]
pub struct NewBeneficiary {
    pub national_id: String,
    pub name: String,
    pub beneficiary_type: String,
    pub status: String,
    pub field_worker_id: i64,
    pub total_program_days: i32,
    pub completed_days: i32,
    pub attendance_rate: i32,
    pub registered_at: String,
}

/// Queryable row for the `program_days` table.
#[derive(Debug, Clone, Queryable)]
pub struct ProgramDayRow {
    pub program_day_id: i64,
    pub beneficiary_id: i64,
    pub day_number: i32,
    pub day_date: String,
    pub attended: i32,
    pub activity_type: String,
    pub notes: Option<String>,
}

impl ProgramDayRow {
    /// Converts this row into a domain `ProgramDay`.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored activity type no longer parses.
    pub fn into_domain(self) -> Result<ProgramDay, PersistenceError> {
        let activity_type: ActivityType = ActivityType::from_str(&self.activity_type).map_err(
            |_| PersistenceError::InvalidStoredValue {
                column: String::from("program_days.activity_type"),
                value: self.activity_type.clone(),
            },
        )?;

        Ok(ProgramDay::with_id(
            self.program_day_id,
            self.beneficiary_id,
            self.day_number,
            self.day_date,
            self.attended != 0,
            activity_type,
            self.notes,
        ))
    }
}

/// Insertable row for the `program_days` table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = program_days)]
pub struct NewProgramDay {
    pub beneficiary_id: i64,
    pub day_number: i32,
    pub day_date: String,
    pub attended: i32,
    pub activity_type: String,
    pub notes: Option<String>,
}

/// Queryable row for the `main_stock` table.
#[derive(Debug, Clone, Queryable)]
pub struct MainStockRow {
    pub main_stock_id: i64,
    pub product_id: i64,
    pub total_stock: f64,
}

impl MainStockRow {
    pub fn into_domain(self) -> MainStock {
        MainStock {
            main_stock_id: Some(self.main_stock_id),
            product_id: self.product_id,
            total_stock: self.total_stock,
        }
    }
}

/// Insertable row for the `main_stock` table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = main_stock)]
pub struct NewMainStock {
    pub product_id: i64,
    pub total_stock: f64,
}

/// Queryable row for the `stock` table.
#[derive(Debug, Clone, Queryable)]
pub struct StockRow {
    pub stock_id: i64,
    pub field_worker_id: i64,
    pub product_id: i64,
    pub total_stock: f64,
}

impl StockRow {
    pub fn into_domain(self) -> Stock {
        Stock {
            stock_id: Some(self.stock_id),
            field_worker_id: self.field_worker_id,
            product_id: self.product_id,
            total_stock: self.total_stock,
        }
    }
}

/// Insertable row for the `stock` table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = stock)]
pub struct NewStock {
    pub field_worker_id: i64,
    pub product_id: i64,
    pub total_stock: f64,
}

/// Queryable row for the `distributions` table.
#[derive(Debug, Clone, Queryable)]
pub struct DistributionRow {
    pub distribution_id: i64,
    pub beneficiary_id: i64,
    pub product_id: i64,
    pub field_worker_id: i64,
    pub quantity_kg: f64,
    pub distribution_date: String,
}

impl DistributionRow {
    pub fn into_domain(self) -> Distribution {
        Distribution {
            distribution_id: Some(self.distribution_id),
            beneficiary_id: self.beneficiary_id,
            product_id: self.product_id,
            field_worker_id: self.field_worker_id,
            quantity_kg: self.quantity_kg,
            distribution_date: self.distribution_date,
        }
    }
}

/// Insertable row for the `distributions` table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = distributions)]
pub struct NewDistribution {
    pub beneficiary_id: i64,
    pub product_id: i64,
    pub field_worker_id: i64,
    pub quantity_kg: f64,
    pub distribution_date: String,
}

/// Queryable row for the `stock_transactions` table.
#[derive(Debug, Clone, Queryable)]
pub struct StockTransactionRow {
    pub transaction_id: i64,
    pub product_id: i64,
    pub quantity_kg: f64,
    pub transaction_type: String,
    pub recorded_at: String,
}

impl StockTransactionRow {
    /// Converts this row into a domain `StockTransaction`.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored transaction type no longer parses.
    pub fn into_domain(self) -> Result<StockTransaction, PersistenceError> {
        let transaction_type: StockTransactionType =
            StockTransactionType::from_str(&self.transaction_type).map_err(|_| {
                PersistenceError::InvalidStoredValue {
                    column: String::from("stock_transactions.transaction_type"),
                    value: self.transaction_type.clone(),
                }
            })?;

        Ok(StockTransaction {
            transaction_id: Some(self.transaction_id),
            product_id: self.product_id,
            quantity_kg: self.quantity_kg,
            transaction_type,
            recorded_at: self.recorded_at,
        })
    }
}

/// Insertable row for the `stock_transactions` table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = stock_transactions)]
pub struct NewStockTransaction {
    pub product_id: i64,
    pub quantity_kg: f64,
    pub transaction_type: String,
    pub recorded_at: String,
}
