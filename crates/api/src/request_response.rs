// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types for the API boundary.
//!
//! Payloads serialize `camelCase` for the JSON clients. Responses are
//! plain read models; nothing in here is ever persisted.

use serde::{Deserialize, Serialize};

/// Request to register a new beneficiary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBeneficiaryRequest {
    /// The unique national identifier.
    pub national_id: String,
    /// The beneficiary's name.
    pub name: String,
    /// The classification: pregnant, breastfeeding, or child.
    pub beneficiary_type: String,
    /// The assigned field worker.
    pub field_worker_id: i64,
}

/// Request to directly update a beneficiary's status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    /// The requested status: active or inactive.
    pub status: String,
}

/// Request to enroll a new program day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddProgramDayRequest {
    /// The 1-based day number, unique per beneficiary.
    pub day_number: i32,
    /// The scheduled date (ISO 8601 date).
    pub date: String,
    /// The activity type: check-in, attendance, activity, or assessment.
    pub activity_type: String,
    /// Optional notes (at most 500 characters).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Request to set a program day's attendance flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetAttendanceRequest {
    /// The new attendance value.
    pub attended: bool,
    /// Optional replacement notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Request to record a distribution.
///
/// All identifying fields are optional at the wire level so a missing
/// field surfaces as a field-named validation error rather than a
/// deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributeRequest {
    /// The receiving beneficiary.
    pub beneficiary_id: Option<i64>,
    /// The distributed product.
    pub product_id: Option<i64>,
    /// The quantity in kilograms.
    pub quantity_kg: Option<f64>,
    /// The distributing field worker.
    pub field_worker_id: Option<i64>,
    /// Optional distribution date (ISO 8601 date); defaults to today.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution_date: Option<String>,
}

/// Request to restock the central pool for a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestockRequest {
    /// The product to restock.
    pub product_id: Option<i64>,
    /// The quantity to add, in kilograms.
    pub total_stock: Option<f64>,
}

/// Request to assign central stock to a field worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignStockRequest {
    /// The receiving field worker.
    pub field_worker_id: Option<i64>,
    /// The product to move.
    pub product_id: Option<i64>,
    /// The quantity to move, in kilograms.
    pub quantity_kg: Option<f64>,
}

/// Request to create a product (reference-data boundary).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    /// The unique product name.
    pub name: String,
}

/// Request to create a field worker (reference-data boundary).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFieldWorkerRequest {
    /// The worker's display name.
    pub name: String,
    /// Optional role label; defaults to `field_worker`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Outbound program day payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramDayView {
    /// The day's canonical ID.
    pub id: i64,
    /// The owning beneficiary.
    pub beneficiary_id: i64,
    /// The 1-based day number.
    pub day_number: i32,
    /// The scheduled date.
    pub date: String,
    /// Whether the day was attended.
    pub attended: bool,
    /// The activity type.
    pub activity_type: String,
    /// Optional notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Outbound distribution payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionView {
    /// The distribution's canonical ID.
    pub id: i64,
    /// The receiving beneficiary.
    pub beneficiary_id: i64,
    /// The distributed product.
    pub product_id: i64,
    /// The distributing field worker.
    pub field_worker_id: i64,
    /// The quantity in kilograms.
    pub quantity_kg: f64,
    /// The distribution date.
    pub distribution_date: String,
}

/// Outbound central stock payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MainStockView {
    /// The row's canonical ID.
    pub id: i64,
    /// The product.
    pub product_id: i64,
    /// The current quantity in kilograms.
    pub total_stock: f64,
}

/// Outbound field-worker stock payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockView {
    /// The row's canonical ID.
    pub id: i64,
    /// The holding field worker.
    pub field_worker_id: i64,
    /// The product.
    pub product_id: i64,
    /// The current quantity in kilograms.
    pub total_stock: f64,
}

/// Outbound ledger entry payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockTransactionView {
    /// The entry's canonical ID.
    pub id: i64,
    /// The product moved.
    pub product_id: i64,
    /// The quantity moved, in kilograms.
    pub quantity_kg: f64,
    /// The movement direction: IN or OUT.
    #[serde(rename = "type")]
    pub transaction_type: String,
    /// When the movement was recorded.
    pub recorded_at: String,
}

/// Outbound field worker payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldWorkerView {
    /// The worker's canonical ID.
    pub id: i64,
    /// The worker's display name.
    pub name: String,
    /// The worker's role label.
    pub role: String,
}

/// Outbound product payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    /// The product's canonical ID.
    pub id: i64,
    /// The product name.
    pub name: String,
}

/// Response for a successful distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributeResponse {
    /// The recorded distribution.
    pub distribution: DistributionView,
    /// The beneficiary after the progress update.
    pub beneficiary: crate::display::BeneficiaryView,
}

/// Response for a successful central restock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestockResponse {
    /// The central stock level after the restock.
    pub main_stock: MainStockView,
    /// The appended ledger entry.
    pub transaction: StockTransactionView,
}

/// Response for a successful stock assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignStockResponse {
    /// The central stock level after the assignment.
    pub main_stock: MainStockView,
    /// The worker's stock level after the assignment.
    pub stock: StockView,
    /// The appended ledger entry.
    pub transaction: StockTransactionView,
}

/// Plain message response for delete-style operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    /// The message.
    pub message: String,
}
