// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod beneficiaries;
mod clock;
mod display;
mod distribution;
mod error;
mod program_days;
mod reconciliation;
mod reference;
mod request_response;
mod stock;

#[cfg(test)]
mod tests;

pub use beneficiaries::{
    get_beneficiary, list_beneficiaries, register_beneficiary, remove_beneficiary, update_status,
};
pub use display::{BeneficiaryView, to_display};
pub use distribution::{distribute, list_distributions};
pub use error::{ApiError, translate_domain_error, translate_persistence_error};
pub use program_days::{add_program_day, list_program_days, remove_program_day, set_attendance};
pub use reconciliation::{ReconciliationSummary, reconcile_statuses};
pub use reference::{create_field_worker, create_product, list_field_workers, list_products};
pub use request_response::{
    AddProgramDayRequest, AssignStockRequest, AssignStockResponse, CreateBeneficiaryRequest,
    CreateFieldWorkerRequest, CreateProductRequest, DistributeRequest, DistributeResponse,
    DistributionView, FieldWorkerView, MainStockView, MessageResponse, ProductView,
    ProgramDayView, RestockRequest, RestockResponse, SetAttendanceRequest, StockTransactionView,
    StockView, UpdateStatusRequest,
};
pub use stock::{
    assign_stock, create_main_stock, list_main_stock, list_stock_transactions, list_worker_stock,
};
