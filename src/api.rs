// Ledger Reports - Web API
// REST routes + static report pages over a shared, read-only LedgerTable

use crate::config::Assumptions;
use crate::record::LedgerRecord;
use crate::report::{build_all, ReportKind, ReportLink};
use crate::reports::analysis;
use crate::table::{LedgerTable, Selection, TransactionFilter};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::debug;

/// Shared application state. The table is built once and never mutated,
/// so handlers read it without locking.
#[derive(Clone)]
pub struct AppState {
    pub table: Arc<LedgerTable>,
    pub assumptions: Arc<Assumptions>,
}

impl AppState {
    pub fn new(table: LedgerTable, assumptions: Assumptions) -> Self {
        Self {
            table: Arc::new(table),
            assumptions: Arc::new(assumptions),
        }
    }
}

/// API Response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(ApiResponse::<()>::err(message))).into_response()
}

/// Transaction row as served to the browser
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    pub transaction_id: String,
    pub date: String,
    pub account_type: String,
    pub transaction_amount: f64,
    pub cash_flow: f64,
    pub net_income: f64,
    pub revenue: f64,
    pub expenditure: f64,
    pub profit_margin: f64,
    pub debt_to_equity_ratio: f64,
    pub operating_expenses: f64,
    pub gross_profit: f64,
    pub accuracy_score: f64,
    pub transaction_outcome: String,
}

impl From<&LedgerRecord> for TransactionResponse {
    fn from(record: &LedgerRecord) -> Self {
        Self {
            transaction_id: record.transaction_id.clone(),
            date: record.date.format("%Y-%m-%d %H:%M:%S").to_string(),
            account_type: record.account_type.label().to_string(),
            transaction_amount: record.transaction_amount,
            cash_flow: record.cash_flow,
            net_income: record.net_income,
            revenue: record.revenue,
            expenditure: record.expenditure,
            profit_margin: record.profit_margin,
            debt_to_equity_ratio: record.debt_to_equity_ratio,
            operating_expenses: record.operating_expenses,
            gross_profit: record.gross_profit,
            accuracy_score: record.accuracy_score,
            transaction_outcome: record.outcome.label().to_string(),
        }
    }
}

fn to_responses(selection: &Selection<'_>) -> Vec<TransactionResponse> {
    selection.rows().iter().map(|r| TransactionResponse::from(*r)).collect()
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/dashboard - Headline metrics + page index
async fn get_dashboard(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(analysis::dashboard(&state.table)))
}

/// GET /api/reports - Page index
async fn list_reports() -> impl IntoResponse {
    let links: Vec<ReportLink> = ReportKind::ALL.iter().map(ReportKind::link).collect();
    Json(ApiResponse::ok(links))
}

/// GET /api/reports/all - Every page in one payload
async fn get_all_reports(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(build_all(&state.table, &state.assumptions)))
}

/// GET /api/reports/:slug - One report page
async fn get_report(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    match ReportKind::from_slug(&slug) {
        Some(kind) => {
            debug!(report = kind.slug(), "Building report");
            let report = kind.build(&state.table, &state.assumptions);
            (StatusCode::OK, Json(ApiResponse::ok(report))).into_response()
        }
        None => error_response(StatusCode::NOT_FOUND, format!("Unknown report: {}", slug)),
    }
}

/// GET /api/transactions - Every transaction, date order
async fn get_transactions(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(to_responses(&state.table.select_all())))
}

/// GET /api/filters/:kind - Transactions by account type or outcome
async fn filter_transactions(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Response {
    match TransactionFilter::parse(&kind) {
        Some(filter) => {
            let filtered = to_responses(&filter.apply(&state.table));
            (StatusCode::OK, Json(ApiResponse::ok(filtered))).into_response()
        }
        None => error_response(
            StatusCode::BAD_REQUEST,
            format!(
                "Unknown filter '{}': expected all, asset, liability, success or failed",
                kind
            ),
        ),
    }
}

// ============================================================================
// Pages
// ============================================================================

/// GET / - Dashboard page
async fn serve_index() -> impl IntoResponse {
    Html(include_str!("../web/index.html"))
}

/// GET /reports/:slug - Report page shell; fills itself from /api/reports/:slug
async fn serve_report_page(Path(slug): Path<String>) -> Response {
    if ReportKind::from_slug(&slug).is_some() {
        Html(include_str!("../web/report.html")).into_response()
    } else {
        (StatusCode::NOT_FOUND, Html("<h1>Report not found</h1>")).into_response()
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/dashboard", get(get_dashboard))
        .route("/reports", get(list_reports))
        .route("/reports/all", get(get_all_reports))
        .route("/reports/:slug", get(get_report))
        .route("/transactions", get(get_transactions))
        .route("/filters/:kind", get(filter_transactions))
        .with_state(state);

    Router::new()
        .route("/", get(serve_index))
        .route("/reports/:slug", get(serve_report_page))
        .nest("/api", api_routes)
        .nest_service("/static", ServeDir::new("web"))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
