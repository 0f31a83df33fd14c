// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the NutriTrack beneficiary tracking system.
//!
//! This crate provides the SQLite entity store for beneficiaries,
//! program days, stock levels, distributions, and the append-only
//! stock-movement ledger. It is built on Diesel with embedded
//! migrations.
//!
//! ## Consistency discipline
//!
//! - Every multi-step logical unit (program-day mutation plus counter
//!   update, distribution, restock, stock assignment) runs inside one
//!   SQLite transaction.
//! - Stock decrements and the beneficiary progress increment are
//!   conditional single-statement updates whose predicates re-check the
//!   guarded invariant at write time.
//! - Schema CHECK constraints back the same invariants at the storage
//!   level; the application never relies on them for control flow.
//!
//! ## Testing
//!
//! Standard tests run against unique in-memory databases; each call to
//! [`Persistence::new_in_memory`] receives its own instance via an
//! atomic counter, so tests are deterministic and isolated.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use nutritrack_domain::{
    Beneficiary, BeneficiaryStatus, Distribution, FieldWorker, MainStock, Product, ProgramDay,
    Stock, StockTransaction,
};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique
/// sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for the NutriTrack entity store.
///
/// Owns the single SQLite connection; every operation on it is either a
/// read or a self-contained transactional unit.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite`
    /// database.
    ///
    /// Each call receives a unique database instance via an atomic
    /// counter, ensuring deterministic test isolation without
    /// time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("memdb_test_{db_id}");
        let shared_memory_url: String = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite`
    /// database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    // ========================================================================
    // Reference data (collaborator boundary)
    // ========================================================================

    /// Inserts a field worker and returns it with its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_field_worker(
        &mut self,
        worker: &FieldWorker,
    ) -> Result<FieldWorker, PersistenceError> {
        mutations::reference::insert_field_worker(&mut self.conn, worker)
    }

    /// Retrieves a field worker by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if absent.
    pub fn get_field_worker(
        &mut self,
        field_worker_id: i64,
    ) -> Result<FieldWorker, PersistenceError> {
        queries::reference::get_field_worker(&mut self.conn, field_worker_id)
    }

    /// Lists all field workers.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_field_workers(&mut self) -> Result<Vec<FieldWorker>, PersistenceError> {
        queries::reference::list_field_workers(&mut self.conn)
    }

    /// Inserts a product and returns it with its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateProductName` if the name is taken.
    pub fn insert_product(&mut self, product: &Product) -> Result<Product, PersistenceError> {
        mutations::reference::insert_product(&mut self.conn, product)
    }

    /// Retrieves a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if absent.
    pub fn get_product(&mut self, product_id: i64) -> Result<Product, PersistenceError> {
        queries::reference::get_product(&mut self.conn, product_id)
    }

    /// Lists all products.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_products(&mut self) -> Result<Vec<Product>, PersistenceError> {
        queries::reference::list_products(&mut self.conn)
    }

    // ========================================================================
    // Beneficiaries
    // ========================================================================

    /// Inserts a beneficiary and returns it with its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateNationalId` if the national identifier is
    /// taken, or `NotFound` if the assigned field worker is absent.
    pub fn insert_beneficiary(
        &mut self,
        beneficiary: &Beneficiary,
    ) -> Result<Beneficiary, PersistenceError> {
        mutations::beneficiaries::insert_beneficiary(&mut self.conn, beneficiary)
    }

    /// Retrieves a beneficiary by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if absent.
    pub fn get_beneficiary(&mut self, beneficiary_id: i64) -> Result<Beneficiary, PersistenceError> {
        queries::beneficiaries::get_beneficiary(&mut self.conn, beneficiary_id)
    }

    /// Lists all beneficiaries.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_beneficiaries(&mut self) -> Result<Vec<Beneficiary>, PersistenceError> {
        queries::beneficiaries::list_beneficiaries(&mut self.conn)
    }

    /// Lists all beneficiaries whose status is not yet `completed`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_unfinished_beneficiaries(&mut self) -> Result<Vec<Beneficiary>, PersistenceError> {
        queries::beneficiaries::list_unfinished_beneficiaries(&mut self.conn)
    }

    /// Sets a beneficiary's lifecycle status.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if absent.
    pub fn update_beneficiary_status(
        &mut self,
        beneficiary_id: i64,
        status: BeneficiaryStatus,
    ) -> Result<(), PersistenceError> {
        mutations::beneficiaries::update_beneficiary_status(&mut self.conn, beneficiary_id, status)
    }

    /// Deletes a beneficiary along with its program days and
    /// distributions (cascade).
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if absent.
    pub fn delete_beneficiary(&mut self, beneficiary_id: i64) -> Result<(), PersistenceError> {
        mutations::beneficiaries::delete_beneficiary(&mut self.conn, beneficiary_id)
    }

    // ========================================================================
    // Program days
    // ========================================================================

    /// Enrolls a new program day and updates the owner's counters in
    /// one transaction.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an absent beneficiary or
    /// `DuplicateProgramDay` for a taken day number.
    pub fn insert_program_day(
        &mut self,
        day: &ProgramDay,
    ) -> Result<(ProgramDay, Beneficiary), PersistenceError> {
        mutations::program_days::insert_program_day(&mut self.conn, day)
    }

    /// Sets a day's attendance flag and adjusts the owner's counters in
    /// one transaction.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the day is absent or belongs to a
    /// different beneficiary.
    pub fn set_attendance(
        &mut self,
        beneficiary_id: i64,
        program_day_id: i64,
        attended: bool,
        notes: Option<String>,
    ) -> Result<(ProgramDay, Beneficiary), PersistenceError> {
        mutations::program_days::set_attendance(
            &mut self.conn,
            beneficiary_id,
            program_day_id,
            attended,
            notes,
        )
    }

    /// Removes a program day and adjusts the owner's counters in one
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the day is absent or belongs to a
    /// different beneficiary.
    pub fn delete_program_day(
        &mut self,
        beneficiary_id: i64,
        program_day_id: i64,
    ) -> Result<Beneficiary, PersistenceError> {
        mutations::program_days::delete_program_day(&mut self.conn, beneficiary_id, program_day_id)
    }

    /// Retrieves a program day scoped to its beneficiary.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the day is absent or belongs to a
    /// different beneficiary.
    pub fn get_program_day(
        &mut self,
        beneficiary_id: i64,
        program_day_id: i64,
    ) -> Result<ProgramDay, PersistenceError> {
        queries::program_days::get_program_day(&mut self.conn, beneficiary_id, program_day_id)
    }

    /// Lists a beneficiary's program days ordered by day number.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_program_days(
        &mut self,
        beneficiary_id: i64,
    ) -> Result<Vec<ProgramDay>, PersistenceError> {
        queries::program_days::list_program_days(&mut self.conn, beneficiary_id)
    }

    /// Counts the program days recorded for a beneficiary.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_program_days(&mut self, beneficiary_id: i64) -> Result<i64, PersistenceError> {
        queries::program_days::count_program_days(&mut self.conn, beneficiary_id)
    }

    // ========================================================================
    // Stock
    // ========================================================================

    /// Adds quantity to a product's central stock and appends an `IN`
    /// ledger entry, in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the product is absent.
    pub fn restock_main(
        &mut self,
        product_id: i64,
        quantity_kg: f64,
        recorded_at: &str,
    ) -> Result<(MainStock, StockTransaction), PersistenceError> {
        mutations::stock::restock_main(&mut self.conn, product_id, quantity_kg, recorded_at)
    }

    /// Moves quantity from the central pool to a field worker's stock
    /// and appends an `OUT` ledger entry, in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an absent worker or product, or
    /// `InsufficientMainStock` when the pool cannot cover the quantity.
    pub fn assign_stock(
        &mut self,
        field_worker_id: i64,
        product_id: i64,
        quantity_kg: f64,
        recorded_at: &str,
    ) -> Result<(MainStock, Stock, StockTransaction), PersistenceError> {
        mutations::stock::assign_stock(
            &mut self.conn,
            field_worker_id,
            product_id,
            quantity_kg,
            recorded_at,
        )
    }

    /// Retrieves the central stock level for a product.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the product has no central stock row.
    pub fn get_main_stock(&mut self, product_id: i64) -> Result<MainStock, PersistenceError> {
        queries::stock::get_main_stock(&mut self.conn, product_id)
    }

    /// Lists all central stock levels.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_main_stock(&mut self) -> Result<Vec<MainStock>, PersistenceError> {
        queries::stock::list_main_stock(&mut self.conn)
    }

    /// Retrieves a field worker's stock level for a product.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the worker holds no row for the product.
    pub fn get_stock(
        &mut self,
        field_worker_id: i64,
        product_id: i64,
    ) -> Result<Stock, PersistenceError> {
        queries::stock::get_stock(&mut self.conn, field_worker_id, product_id)
    }

    /// Lists a field worker's stock rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_stock_for_worker(
        &mut self,
        field_worker_id: i64,
    ) -> Result<Vec<Stock>, PersistenceError> {
        queries::stock::list_stock_for_worker(&mut self.conn, field_worker_id)
    }

    /// Lists the full stock-movement ledger in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_stock_transactions(&mut self) -> Result<Vec<StockTransaction>, PersistenceError> {
        queries::stock::list_stock_transactions(&mut self.conn)
    }

    /// Lists the ledger entries for one product in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_stock_transactions_for_product(
        &mut self,
        product_id: i64,
    ) -> Result<Vec<StockTransaction>, PersistenceError> {
        queries::stock::list_stock_transactions_for_product(&mut self.conn, product_id)
    }

    // ========================================================================
    // Distributions
    // ========================================================================

    /// Records a distribution: conditional stock debit, distribution
    /// row, and beneficiary progress increment in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an absent beneficiary,
    /// `InsufficientWorkerStock` when the worker cannot cover the
    /// quantity, or `ProgramCapacityReached` when the program is
    /// already complete.
    pub fn record_distribution(
        &mut self,
        distribution: &Distribution,
    ) -> Result<(Distribution, Beneficiary), PersistenceError> {
        mutations::distributions::record_distribution(&mut self.conn, distribution)
    }

    /// Lists all distributions in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_distributions(&mut self) -> Result<Vec<Distribution>, PersistenceError> {
        queries::distributions::list_distributions(&mut self.conn)
    }

    /// Lists the distributions recorded for one beneficiary.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_distributions_for_beneficiary(
        &mut self,
        beneficiary_id: i64,
    ) -> Result<Vec<Distribution>, PersistenceError> {
        queries::distributions::list_distributions_for_beneficiary(&mut self.conn, beneficiary_id)
    }

    /// Counts all distribution rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_distributions(&mut self) -> Result<i64, PersistenceError> {
        queries::distributions::count_distributions(&mut self.conn)
    }
}
