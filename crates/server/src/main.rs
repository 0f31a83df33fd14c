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
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod scheduler;

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use nutritrack_api::{
    AddProgramDayRequest, ApiError, AssignStockRequest, AssignStockResponse, BeneficiaryView,
    CreateBeneficiaryRequest, CreateFieldWorkerRequest, CreateProductRequest, DistributeRequest,
    DistributeResponse, DistributionView, FieldWorkerView, MainStockView, MessageResponse,
    ProductView, ProgramDayView, RestockRequest, RestockResponse, SetAttendanceRequest,
    StockTransactionView, StockView, UpdateStatusRequest, add_program_day, assign_stock,
    create_field_worker, create_main_stock, create_product, distribute, get_beneficiary,
    list_beneficiaries, list_distributions, list_field_workers, list_main_stock,
    list_program_days, list_products, list_stock_transactions, list_worker_stock,
    reconcile_statuses, register_beneficiary, remove_beneficiary, remove_program_day,
    set_attendance, update_status,
};
use nutritrack_persistence::Persistence;
use scheduler::{ReconciliationScheduler, SchedulerHandle, SweepConfig};

/// NutriTrack Server - HTTP server for the beneficiary tracking system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// IANA timezone the daily sweep time is interpreted in
    #[arg(long, default_value = "UTC")]
    sweep_timezone: String,

    /// Hour of day (0-23) the daily sweep fires at
    #[arg(long, default_value_t = 2)]
    sweep_hour: u32,

    /// Minute (0-59) the daily sweep fires at
    #[arg(long, default_value_t = 0)]
    sweep_minute: u32,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access.
#[derive(Clone)]
struct AppState {
    /// The entity store.
    persistence: Arc<Mutex<Persistence>>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::InvalidArgument { .. }
            | ApiError::Conflict { .. }
            | ApiError::OutOfStock { .. }
            | ApiError::ProgramOverrun { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            ApiError::NotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            ApiError::Internal { .. } => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: err.to_string(),
            },
        }
    }
}

/// Runs the inline status reconciliation check.
///
/// Executed before handling any request that concerns beneficiaries.
/// Failures are logged and never fail the request itself.
async fn reconcile_inline(app_state: &AppState) {
    let mut persistence = app_state.persistence.lock().await;
    if let Err(e) = reconcile_statuses(&mut persistence) {
        warn!(error = %e, "Inline status reconciliation failed");
    }
}

/// Handler for POST `/field-workers` endpoint.
async fn handle_create_field_worker(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateFieldWorkerRequest>,
) -> Result<Json<FieldWorkerView>, HttpError> {
    info!(name = %req.name, "Handling create_field_worker request");

    let mut persistence = app_state.persistence.lock().await;
    let view: FieldWorkerView = create_field_worker(&mut persistence, req)?;
    Ok(Json(view))
}

/// Handler for GET `/field-workers` endpoint.
async fn handle_list_field_workers(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<FieldWorkerView>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let views: Vec<FieldWorkerView> = list_field_workers(&mut persistence)?;
    Ok(Json(views))
}

/// Handler for POST `/products` endpoint.
async fn handle_create_product(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateProductRequest>,
) -> Result<Json<ProductView>, HttpError> {
    info!(name = %req.name, "Handling create_product request");

    let mut persistence = app_state.persistence.lock().await;
    let view: ProductView = create_product(&mut persistence, req)?;
    Ok(Json(view))
}

/// Handler for GET `/products` endpoint.
async fn handle_list_products(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<ProductView>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let views: Vec<ProductView> = list_products(&mut persistence)?;
    Ok(Json(views))
}

/// Handler for POST `/beneficiaries` endpoint.
async fn handle_create_beneficiary(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateBeneficiaryRequest>,
) -> Result<Json<BeneficiaryView>, HttpError> {
    info!(
        national_id = %req.national_id,
        field_worker_id = req.field_worker_id,
        "Handling create_beneficiary request"
    );
    reconcile_inline(&app_state).await;

    let mut persistence = app_state.persistence.lock().await;
    let view: BeneficiaryView = register_beneficiary(&mut persistence, req)?;
    Ok(Json(view))
}

/// Handler for GET `/beneficiaries` endpoint.
async fn handle_list_beneficiaries(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<BeneficiaryView>>, HttpError> {
    reconcile_inline(&app_state).await;

    let mut persistence = app_state.persistence.lock().await;
    let views: Vec<BeneficiaryView> = list_beneficiaries(&mut persistence)?;
    Ok(Json(views))
}

/// Handler for GET `/beneficiaries/{id}` endpoint.
async fn handle_get_beneficiary(
    AxumState(app_state): AxumState<AppState>,
    Path(beneficiary_id): Path<i64>,
) -> Result<Json<BeneficiaryView>, HttpError> {
    reconcile_inline(&app_state).await;

    let mut persistence = app_state.persistence.lock().await;
    let view: BeneficiaryView = get_beneficiary(&mut persistence, beneficiary_id)?;
    Ok(Json(view))
}

/// Handler for PUT `/beneficiaries/{id}/status` endpoint.
async fn handle_update_status(
    AxumState(app_state): AxumState<AppState>,
    Path(beneficiary_id): Path<i64>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<BeneficiaryView>, HttpError> {
    info!(
        beneficiary_id = beneficiary_id,
        status = %req.status,
        "Handling update_status request"
    );
    reconcile_inline(&app_state).await;

    let mut persistence = app_state.persistence.lock().await;
    let view: BeneficiaryView = update_status(&mut persistence, beneficiary_id, req)?;
    Ok(Json(view))
}

/// Handler for DELETE `/beneficiaries/{id}` endpoint.
async fn handle_delete_beneficiary(
    AxumState(app_state): AxumState<AppState>,
    Path(beneficiary_id): Path<i64>,
) -> Result<Json<MessageResponse>, HttpError> {
    info!(
        beneficiary_id = beneficiary_id,
        "Handling delete_beneficiary request"
    );
    reconcile_inline(&app_state).await;

    let mut persistence = app_state.persistence.lock().await;
    let response: MessageResponse = remove_beneficiary(&mut persistence, beneficiary_id)?;
    Ok(Json(response))
}

/// Handler for POST `/beneficiaries/{id}/days` endpoint.
async fn handle_add_program_day(
    AxumState(app_state): AxumState<AppState>,
    Path(beneficiary_id): Path<i64>,
    Json(req): Json<AddProgramDayRequest>,
) -> Result<Json<ProgramDayView>, HttpError> {
    info!(
        beneficiary_id = beneficiary_id,
        day_number = req.day_number,
        "Handling add_program_day request"
    );
    reconcile_inline(&app_state).await;

    let mut persistence = app_state.persistence.lock().await;
    let view: ProgramDayView = add_program_day(&mut persistence, beneficiary_id, req)?;
    Ok(Json(view))
}

/// Handler for GET `/beneficiaries/{id}/days` endpoint.
async fn handle_list_program_days(
    AxumState(app_state): AxumState<AppState>,
    Path(beneficiary_id): Path<i64>,
) -> Result<Json<Vec<ProgramDayView>>, HttpError> {
    reconcile_inline(&app_state).await;

    let mut persistence = app_state.persistence.lock().await;
    let views: Vec<ProgramDayView> = list_program_days(&mut persistence, beneficiary_id)?;
    Ok(Json(views))
}

/// Handler for PUT `/beneficiaries/{id}/days/{day_id}` endpoint.
async fn handle_set_attendance(
    AxumState(app_state): AxumState<AppState>,
    Path((beneficiary_id, program_day_id)): Path<(i64, i64)>,
    Json(req): Json<SetAttendanceRequest>,
) -> Result<Json<ProgramDayView>, HttpError> {
    info!(
        beneficiary_id = beneficiary_id,
        program_day_id = program_day_id,
        attended = req.attended,
        "Handling set_attendance request"
    );
    reconcile_inline(&app_state).await;

    let mut persistence = app_state.persistence.lock().await;
    let view: ProgramDayView =
        set_attendance(&mut persistence, beneficiary_id, program_day_id, req)?;
    Ok(Json(view))
}

/// Handler for DELETE `/beneficiaries/{id}/days/{day_id}` endpoint.
async fn handle_remove_program_day(
    AxumState(app_state): AxumState<AppState>,
    Path((beneficiary_id, program_day_id)): Path<(i64, i64)>,
) -> Result<Json<MessageResponse>, HttpError> {
    info!(
        beneficiary_id = beneficiary_id,
        program_day_id = program_day_id,
        "Handling remove_program_day request"
    );
    reconcile_inline(&app_state).await;

    let mut persistence = app_state.persistence.lock().await;
    let response: MessageResponse =
        remove_program_day(&mut persistence, beneficiary_id, program_day_id)?;
    Ok(Json(response))
}

/// Handler for POST `/distributions` endpoint.
async fn handle_distribute(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<DistributeRequest>,
) -> Result<Json<DistributeResponse>, HttpError> {
    info!(
        beneficiary_id = ?req.beneficiary_id,
        product_id = ?req.product_id,
        quantity_kg = ?req.quantity_kg,
        "Handling distribute request"
    );
    reconcile_inline(&app_state).await;

    let mut persistence = app_state.persistence.lock().await;
    let response: DistributeResponse = distribute(&mut persistence, req)?;
    Ok(Json(response))
}

/// Handler for GET `/distributions` endpoint.
async fn handle_list_distributions(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<DistributionView>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let views: Vec<DistributionView> = list_distributions(&mut persistence)?;
    Ok(Json(views))
}

/// Handler for POST `/main-stock` endpoint.
async fn handle_restock(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RestockRequest>,
) -> Result<Json<RestockResponse>, HttpError> {
    info!(
        product_id = ?req.product_id,
        total_stock = ?req.total_stock,
        "Handling restock request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: RestockResponse = create_main_stock(&mut persistence, req)?;
    Ok(Json(response))
}

/// Handler for GET `/main-stock` endpoint.
async fn handle_list_main_stock(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<MainStockView>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let views: Vec<MainStockView> = list_main_stock(&mut persistence)?;
    Ok(Json(views))
}

/// Handler for POST `/stock` endpoint.
async fn handle_assign_stock(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AssignStockRequest>,
) -> Result<Json<AssignStockResponse>, HttpError> {
    info!(
        field_worker_id = ?req.field_worker_id,
        product_id = ?req.product_id,
        quantity_kg = ?req.quantity_kg,
        "Handling assign_stock request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: AssignStockResponse = assign_stock(&mut persistence, req)?;
    Ok(Json(response))
}

/// Handler for GET `/stock/{worker_id}` endpoint.
async fn handle_list_worker_stock(
    AxumState(app_state): AxumState<AppState>,
    Path(field_worker_id): Path<i64>,
) -> Result<Json<Vec<StockView>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let views: Vec<StockView> = list_worker_stock(&mut persistence, field_worker_id)?;
    Ok(Json(views))
}

/// Handler for GET `/stock-transactions` endpoint.
async fn handle_list_stock_transactions(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<StockTransactionView>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let views: Vec<StockTransactionView> = list_stock_transactions(&mut persistence)?;
    Ok(Json(views))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/field-workers", post(handle_create_field_worker))
        .route("/field-workers", get(handle_list_field_workers))
        .route("/products", post(handle_create_product))
        .route("/products", get(handle_list_products))
        .route("/beneficiaries", post(handle_create_beneficiary))
        .route("/beneficiaries", get(handle_list_beneficiaries))
        .route("/beneficiaries/{id}", get(handle_get_beneficiary))
        .route("/beneficiaries/{id}", delete(handle_delete_beneficiary))
        .route("/beneficiaries/{id}/status", put(handle_update_status))
        .route("/beneficiaries/{id}/days", post(handle_add_program_day))
        .route("/beneficiaries/{id}/days", get(handle_list_program_days))
        .route(
            "/beneficiaries/{id}/days/{day_id}",
            put(handle_set_attendance),
        )
        .route(
            "/beneficiaries/{id}/days/{day_id}",
            delete(handle_remove_program_day),
        )
        .route("/distributions", post(handle_distribute))
        .route("/distributions", get(handle_list_distributions))
        .route("/main-stock", post(handle_restock))
        .route("/main-stock", get(handle_list_main_stock))
        .route("/stock", post(handle_assign_stock))
        .route("/stock/{worker_id}", get(handle_list_worker_stock))
        .route("/stock-transactions", get(handle_list_stock_transactions))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing NutriTrack Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    // Start the daily status reconciliation scheduler
    let sweep_config: SweepConfig = SweepConfig {
        timezone: args.sweep_timezone,
        hour: args.sweep_hour,
        minute: args.sweep_minute,
    };
    let scheduler: ReconciliationScheduler =
        ReconciliationScheduler::new(Arc::clone(&app_state.persistence), &sweep_config)?;
    let scheduler_handle: SchedulerHandle = scheduler.start();

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    scheduler_handle.stop().await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use futures::future::join_all;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    /// Helper to create test app state with in-memory persistence.
    fn create_test_app_state() -> AppState {
        let persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");
        AppState {
            persistence: Arc::new(Mutex::new(persistence)),
        }
    }

    async fn send_json(
        app: &Router,
        method: &str,
        uri: &str,
        body: Value,
    ) -> (HttpStatusCode, Value) {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status: HttpStatusCode = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: Value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn send_get(app: &Router, uri: &str) -> (HttpStatusCode, Value) {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status: HttpStatusCode = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: Value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    /// Creates a field worker, a product, and a beneficiary over HTTP.
    async fn seed_basics(app: &Router) -> (i64, i64, i64) {
        let (status, worker) = send_json(
            app,
            "POST",
            "/field-workers",
            json!({"name": "Grace Achieng"}),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);

        let (status, product) = send_json(
            app,
            "POST",
            "/products",
            json!({"name": "Fortified flour"}),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);

        let (status, beneficiary) = send_json(
            app,
            "POST",
            "/beneficiaries",
            json!({
                "nationalId": "NID-001",
                "name": "Amina Yusuf",
                "beneficiaryType": "pregnant",
                "fieldWorkerId": worker["id"],
            }),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);

        (
            worker["id"].as_i64().unwrap(),
            product["id"].as_i64().unwrap(),
            beneficiary["id"].as_i64().unwrap(),
        )
    }

    /// Enrolls `count` program days over HTTP and returns their ids.
    async fn enroll_days(app: &Router, beneficiary_id: i64, count: i32) -> Vec<i64> {
        let mut day_ids: Vec<i64> = Vec::new();
        for day_number in 1..=count {
            let (status, day) = send_json(
                app,
                "POST",
                &format!("/beneficiaries/{beneficiary_id}/days"),
                json!({
                    "dayNumber": day_number,
                    "date": format!("2026-03-{day_number:02}"),
                    "activityType": "attendance",
                }),
            )
            .await;
            assert_eq!(status, HttpStatusCode::OK);
            day_ids.push(day["id"].as_i64().unwrap());
        }
        day_ids
    }

    /// Moves `quantity` kg of a product to the worker via the custody chain.
    async fn stock_worker(app: &Router, worker_id: i64, product_id: i64, quantity: f64) {
        let (status, _) = send_json(
            app,
            "POST",
            "/main-stock",
            json!({"productId": product_id, "totalStock": quantity}),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);

        let (status, _) = send_json(
            app,
            "POST",
            "/stock",
            json!({
                "fieldWorkerId": worker_id,
                "productId": product_id,
                "quantityKg": quantity,
            }),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_beneficiary_returns_enriched_payload() {
        let app: Router = build_router(create_test_app_state());

        let (_, _, beneficiary_id) = seed_basics(&app).await;

        let (status, body) = send_get(&app, &format!("/beneficiaries/{beneficiary_id}")).await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["status"], "active");
        assert_eq!(body["daysRemaining"], 0);
        assert_eq!(body["programProgress"], 0);
    }

    #[tokio::test]
    async fn test_get_absent_beneficiary_returns_404() {
        let app: Router = build_router(create_test_app_state());

        let (status, body) = send_get(&app, "/beneficiaries/42").await;
        assert_eq!(status, HttpStatusCode::NOT_FOUND);
        assert_eq!(body["error"], true);
    }

    #[tokio::test]
    async fn test_duplicate_national_id_returns_400() {
        let app: Router = build_router(create_test_app_state());
        let (worker_id, _, _) = seed_basics(&app).await;

        let (status, body) = send_json(
            &app,
            "POST",
            "/beneficiaries",
            json!({
                "nationalId": "NID-001",
                "name": "Another Person",
                "beneficiaryType": "child",
                "fieldWorkerId": worker_id,
            }),
        )
        .await;

        assert_eq!(status, HttpStatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("NID-001"));
    }

    #[tokio::test]
    async fn test_add_day_then_duplicate_day_number_returns_400() {
        let app: Router = build_router(create_test_app_state());
        let (_, _, beneficiary_id) = seed_basics(&app).await;

        let (status, day) = send_json(
            &app,
            "POST",
            &format!("/beneficiaries/{beneficiary_id}/days"),
            json!({
                "dayNumber": 1,
                "date": "2026-03-01",
                "activityType": "check-in",
                "notes": "first visit",
            }),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(day["dayNumber"], 1);
        assert_eq!(day["attended"], false);

        let (status, _) = send_json(
            &app,
            "POST",
            &format!("/beneficiaries/{beneficiary_id}/days"),
            json!({
                "dayNumber": 1,
                "date": "2026-03-02",
                "activityType": "attendance",
            }),
        )
        .await;
        assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_add_day_for_absent_beneficiary_returns_404() {
        let app: Router = build_router(create_test_app_state());

        let (status, _) = send_json(
            &app,
            "POST",
            "/beneficiaries/42/days",
            json!({
                "dayNumber": 1,
                "date": "2026-03-01",
                "activityType": "attendance",
            }),
        )
        .await;
        assert_eq!(status, HttpStatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_attendance_updates_enriched_fields() {
        let app: Router = build_router(create_test_app_state());
        let (_, _, beneficiary_id) = seed_basics(&app).await;
        let day_ids: Vec<i64> = enroll_days(&app, beneficiary_id, 2).await;

        let (status, day) = send_json(
            &app,
            "PUT",
            &format!("/beneficiaries/{beneficiary_id}/days/{}", day_ids[0]),
            json!({"attended": true}),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(day["attended"], true);

        let (_, body) = send_get(&app, &format!("/beneficiaries/{beneficiary_id}")).await;
        assert_eq!(body["completedDays"], 1);
        assert_eq!(body["totalProgramDays"], 2);
        assert_eq!(body["attendanceRate"], 50);
        assert_eq!(body["daysRemaining"], 1);
        assert_eq!(body["programProgress"], 50);
    }

    #[tokio::test]
    async fn test_set_attendance_on_mismatched_day_returns_404() {
        let app: Router = build_router(create_test_app_state());
        let (worker_id, _, first) = seed_basics(&app).await;
        let day_ids: Vec<i64> = enroll_days(&app, first, 1).await;

        let (status, second) = send_json(
            &app,
            "POST",
            "/beneficiaries",
            json!({
                "nationalId": "NID-002",
                "name": "Halima Noor",
                "beneficiaryType": "child",
                "fieldWorkerId": worker_id,
            }),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        let second_id: i64 = second["id"].as_i64().unwrap();

        let (status, _) = send_json(
            &app,
            "PUT",
            &format!("/beneficiaries/{second_id}/days/{}", day_ids[0]),
            json!({"attended": true}),
        )
        .await;
        assert_eq!(status, HttpStatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_remove_day_returns_message() {
        let app: Router = build_router(create_test_app_state());
        let (_, _, beneficiary_id) = seed_basics(&app).await;
        let day_ids: Vec<i64> = enroll_days(&app, beneficiary_id, 1).await;

        let (status, body) = send_json(
            &app,
            "DELETE",
            &format!("/beneficiaries/{beneficiary_id}/days/{}", day_ids[0]),
            json!({}),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert!(body["message"].as_str().unwrap().contains("deleted"));

        let (_, beneficiary) = send_get(&app, &format!("/beneficiaries/{beneficiary_id}")).await;
        assert_eq!(beneficiary["totalProgramDays"], 0);
    }

    #[tokio::test]
    async fn test_update_status_rejects_completed_target() {
        let app: Router = build_router(create_test_app_state());
        let (_, _, beneficiary_id) = seed_basics(&app).await;

        let (status, _) = send_json(
            &app,
            "PUT",
            &format!("/beneficiaries/{beneficiary_id}/status"),
            json!({"status": "completed"}),
        )
        .await;
        assert_eq!(status, HttpStatusCode::BAD_REQUEST);

        let (status, body) = send_json(
            &app,
            "PUT",
            &format!("/beneficiaries/{beneficiary_id}/status"),
            json!({"status": "inactive"}),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["status"], "inactive");
    }

    #[tokio::test]
    async fn test_restock_returns_stock_and_transaction() {
        let app: Router = build_router(create_test_app_state());
        let (_, product_id, _) = seed_basics(&app).await;

        let (status, body) = send_json(
            &app,
            "POST",
            "/main-stock",
            json!({"productId": product_id, "totalStock": 10.0}),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["mainStock"]["totalStock"], 10.0);
        assert_eq!(body["transaction"]["type"], "IN");

        let (status, body) = send_json(
            &app,
            "POST",
            "/main-stock",
            json!({"productId": product_id, "totalStock": 5.0}),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["mainStock"]["totalStock"], 15.0);

        let (status, ledger) = send_get(&app, "/stock-transactions").await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(ledger.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_restock_absent_product_returns_404() {
        let app: Router = build_router(create_test_app_state());

        let (status, _) = send_json(
            &app,
            "POST",
            "/main-stock",
            json!({"productId": 42, "totalStock": 10.0}),
        )
        .await;
        assert_eq!(status, HttpStatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_restock_invalid_amount_returns_400() {
        let app: Router = build_router(create_test_app_state());
        let (_, product_id, _) = seed_basics(&app).await;

        let (status, _) = send_json(
            &app,
            "POST",
            "/main-stock",
            json!({"productId": product_id, "totalStock": -1.0}),
        )
        .await;
        assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_distribute_happy_path_returns_both_records() {
        let app: Router = build_router(create_test_app_state());
        let (worker_id, product_id, beneficiary_id) = seed_basics(&app).await;
        enroll_days(&app, beneficiary_id, 4).await;
        stock_worker(&app, worker_id, product_id, 10.0).await;

        let (status, body) = send_json(
            &app,
            "POST",
            "/distributions",
            json!({
                "beneficiaryId": beneficiary_id,
                "productId": product_id,
                "quantityKg": 2.5,
                "fieldWorkerId": worker_id,
            }),
        )
        .await;

        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["distribution"]["quantityKg"], 2.5);
        assert_eq!(body["beneficiary"]["completedDays"], 1);
        assert_eq!(body["beneficiary"]["daysRemaining"], 3);

        let (_, stock) = send_get(&app, &format!("/stock/{worker_id}")).await;
        assert_eq!(stock[0]["totalStock"], 7.5);
    }

    #[tokio::test]
    async fn test_distribute_missing_field_returns_400() {
        let app: Router = build_router(create_test_app_state());

        let (status, body) = send_json(
            &app,
            "POST",
            "/distributions",
            json!({"productId": 1, "quantityKg": 1.0, "fieldWorkerId": 1}),
        )
        .await;

        assert_eq!(status, HttpStatusCode::BAD_REQUEST);
        assert!(
            body["message"]
                .as_str()
                .unwrap()
                .contains("beneficiaryId")
        );
    }

    #[tokio::test]
    async fn test_distribute_insufficient_stock_returns_400() {
        let app: Router = build_router(create_test_app_state());
        let (worker_id, product_id, beneficiary_id) = seed_basics(&app).await;
        enroll_days(&app, beneficiary_id, 2).await;
        stock_worker(&app, worker_id, product_id, 1.0).await;

        let (status, body) = send_json(
            &app,
            "POST",
            "/distributions",
            json!({
                "beneficiaryId": beneficiary_id,
                "productId": product_id,
                "quantityKg": 2.0,
                "fieldWorkerId": worker_id,
            }),
        )
        .await;

        assert_eq!(status, HttpStatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("stock"));

        // Failed attempt left the stock untouched.
        let (_, stock) = send_get(&app, &format!("/stock/{worker_id}")).await;
        assert_eq!(stock[0]["totalStock"], 1.0);
    }

    #[tokio::test]
    async fn test_distribute_program_overrun_returns_400() {
        let app: Router = build_router(create_test_app_state());
        let (worker_id, product_id, beneficiary_id) = seed_basics(&app).await;
        let day_ids: Vec<i64> = enroll_days(&app, beneficiary_id, 1).await;
        stock_worker(&app, worker_id, product_id, 10.0).await;

        let (status, _) = send_json(
            &app,
            "PUT",
            &format!("/beneficiaries/{beneficiary_id}/days/{}", day_ids[0]),
            json!({"attended": true}),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);

        let (status, body) = send_json(
            &app,
            "POST",
            "/distributions",
            json!({
                "beneficiaryId": beneficiary_id,
                "productId": product_id,
                "quantityKg": 1.0,
                "fieldWorkerId": worker_id,
            }),
        )
        .await;

        assert_eq!(status, HttpStatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("program days"));

        let (_, stock) = send_get(&app, &format!("/stock/{worker_id}")).await;
        assert_eq!(stock[0]["totalStock"], 10.0);
    }

    #[tokio::test]
    async fn test_concurrent_distributions_never_overdraw_stock() {
        let app: Router = build_router(create_test_app_state());
        let (worker_id, product_id, beneficiary_id) = seed_basics(&app).await;
        enroll_days(&app, beneficiary_id, 10).await;
        stock_worker(&app, worker_id, product_id, 10.0).await;

        // Five concurrent 4 kg requests against 10 kg of stock: exactly
        // floor(10/4) = 2 may succeed.
        let requests = (0..5).map(|_| {
            send_json(
                &app,
                "POST",
                "/distributions",
                json!({
                    "beneficiaryId": beneficiary_id,
                    "productId": product_id,
                    "quantityKg": 4.0,
                    "fieldWorkerId": worker_id,
                }),
            )
        });
        let results: Vec<(HttpStatusCode, Value)> = join_all(requests).await;

        let successes: usize = results
            .iter()
            .filter(|(status, _)| *status == HttpStatusCode::OK)
            .count();
        let failures: usize = results
            .iter()
            .filter(|(status, _)| *status == HttpStatusCode::BAD_REQUEST)
            .count();

        assert_eq!(successes, 2);
        assert_eq!(failures, 3);

        let (_, stock) = send_get(&app, &format!("/stock/{worker_id}")).await;
        assert_eq!(stock[0]["totalStock"], 2.0);

        let (_, distributions) = send_get(&app, "/distributions").await;
        assert_eq!(distributions.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_inline_reconciliation_completes_finished_beneficiary() {
        let app: Router = build_router(create_test_app_state());
        let (_, _, beneficiary_id) = seed_basics(&app).await;
        let day_ids: Vec<i64> = enroll_days(&app, beneficiary_id, 2).await;

        for day_id in &day_ids {
            let (status, _) = send_json(
                &app,
                "PUT",
                &format!("/beneficiaries/{beneficiary_id}/days/{day_id}"),
                json!({"attended": true}),
            )
            .await;
            assert_eq!(status, HttpStatusCode::OK);
        }

        // The next beneficiary-path request runs the inline check first,
        // so the GET observes the flipped status.
        let (status, body) = send_get(&app, &format!("/beneficiaries/{beneficiary_id}")).await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["status"], "completed");
    }

    #[tokio::test]
    async fn test_delete_beneficiary_cascades() {
        let app: Router = build_router(create_test_app_state());
        let (_, _, beneficiary_id) = seed_basics(&app).await;
        enroll_days(&app, beneficiary_id, 2).await;

        let (status, _) = send_json(
            &app,
            "DELETE",
            &format!("/beneficiaries/{beneficiary_id}"),
            json!({}),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);

        let (status, _) = send_get(&app, &format!("/beneficiaries/{beneficiary_id}")).await;
        assert_eq!(status, HttpStatusCode::NOT_FOUND);

        let (status, _) = send_get(&app, &format!("/beneficiaries/{beneficiary_id}/days")).await;
        assert_eq!(status, HttpStatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_assign_stock_beyond_pool_returns_400() {
        let app: Router = build_router(create_test_app_state());
        let (worker_id, product_id, _) = seed_basics(&app).await;

        let (status, _) = send_json(
            &app,
            "POST",
            "/main-stock",
            json!({"productId": product_id, "totalStock": 5.0}),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);

        let (status, body) = send_json(
            &app,
            "POST",
            "/stock",
            json!({
                "fieldWorkerId": worker_id,
                "productId": product_id,
                "quantityKg": 6.0,
            }),
        )
        .await;
        assert_eq!(status, HttpStatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("stock"));
    }

    #[tokio::test]
    async fn test_list_beneficiaries_is_enriched() {
        let app: Router = build_router(create_test_app_state());
        let (_, _, beneficiary_id) = seed_basics(&app).await;
        enroll_days(&app, beneficiary_id, 3).await;

        let (status, body) = send_get(&app, "/beneficiaries").await;
        assert_eq!(status, HttpStatusCode::OK);

        let list = body.as_array().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["daysRemaining"], 3);
        assert_eq!(list[0]["programProgress"], 0);
    }
}
