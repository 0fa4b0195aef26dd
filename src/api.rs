//! HTTP API for the Seller Profit Engine.
//!
//! This module exposes a minimal REST API around the engine using the
//! [`axum`](https://crates.io/crates/axum) framework.  A presentation
//! layer posts the order it is editing and gets back the full report;
//! it owns rendering, persistence and export.  The rate table is
//! loaded once before the server starts and shared read-only.

use crate::engine::{evaluate, evaluate_batch, summarize};
use crate::models::{OrderInput, PortfolioSummary, ProfitReport};
use crate::rates::RateTable;
use anyhow::Result;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinError;
use tracing::{error, info};

/// Application state shared across requests.
pub struct AppState {
    pub rates: Arc<RateTable>,
}

/// Response body of the batch endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResponse {
    pub reports: Vec<ProfitReport>,
    pub summary: PortfolioSummary,
}

/// Build the API router around an already loaded rate table.
pub fn build_router(rates: Arc<RateTable>) -> Router {
    let state = Arc::new(AppState { rates });
    Router::new()
        .route("/api/calculate", post(calculate_handler))
        .route("/api/calculate/batch", post(batch_handler))
        .route("/api/rates", get(rates_handler))
        .with_state(state)
}

/// Handler for POST /api/calculate
async fn calculate_handler(
    State(app_state): State<Arc<AppState>>,
    Json(input): Json<OrderInput>,
) -> Json<ProfitReport> {
    Json(evaluate(&input, &app_state.rates))
}

/// Handler for POST /api/calculate/batch
async fn batch_handler(
    State(app_state): State<Arc<AppState>>,
    Json(inputs): Json<Vec<OrderInput>>,
) -> impl IntoResponse {
    let rates = app_state.rates.clone();
    match tokio::task::spawn_blocking(move || evaluate_batch(&inputs, &rates)).await {
        Ok(reports) => {
            info!(orders = reports.len(), "evaluated batch");
            let summary = summarize(&reports);
            (StatusCode::OK, Json(BatchResponse { reports, summary })).into_response()
        }
        Err(err) => batch_failure(err).into_response(),
    }
}

fn batch_failure(err: JoinError) -> (StatusCode, Json<Value>) {
    error!(error = %err, "batch evaluation task failed");
    let body = Json(json!({"error": err.to_string()}));
    (StatusCode::INTERNAL_SERVER_ERROR, body)
}

/// Handler for GET /api/rates
async fn rates_handler(State(app_state): State<Arc<AppState>>) -> Json<RateTable> {
    Json(app_state.rates.as_ref().clone())
}

/// Launch the API server on `addr`.  Runs until the server terminates
/// (e.g. when interrupted).
pub async fn serve(addr: SocketAddr, rates: RateTable) -> Result<()> {
    let router = build_router(Arc::new(rates));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "server listening");
    axum::serve(listener, router).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Breakeven;

    fn state() -> State<Arc<AppState>> {
        State(Arc::new(AppState {
            rates: Arc::new(RateTable::default()),
        }))
    }

    #[tokio::test]
    async fn calculate_accepts_partial_json() {
        let input: OrderInput = serde_json::from_value(json!({
            "selling_price": 100000.0,
            "cost_price": 50000.0,
            "category": "fashion",
            "logistics_program": true,
            "tax_rate_percent": 8.0
        }))
        .unwrap();
        let Json(report) = calculate_handler(state(), Json(input)).await;
        assert_eq!(report.fees.total_fees, 28030.0);
        assert_eq!(report.profit.net_profit, 21970.0);
        assert_eq!(report.breakeven, Breakeven::Price(70146.0));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn batch_returns_reports_and_summary() {
        let inputs = vec![
            OrderInput {
                selling_price: 1000.0,
                ..Default::default()
            },
            OrderInput {
                selling_price: 0.0,
                cost_price: 10.0,
                ..Default::default()
            },
        ];
        let response = batch_handler(state(), Json(inputs)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: BatchResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.reports.len(), 2);
        assert_eq!(body.summary.orders, 2);
        assert_eq!(body.reports[1].profit.profit_margin, None);
        assert_eq!(body.summary.selling_price, 1000.0);
    }

    #[tokio::test]
    async fn failed_batch_task_is_a_server_error() {
        let err = tokio::spawn(async { panic!("evaluation blew up") })
            .await
            .unwrap_err();
        let (status, Json(body)) = batch_failure(err);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("panic"));
    }

    #[tokio::test]
    async fn rates_returns_active_table() {
        let Json(table) = rates_handler(state()).await;
        assert_eq!(table, RateTable::default());
    }
}
