//! Fetch diagnostics and self-test endpoints.

use axum::extract::State;
use serde::Serialize;

use super::{success, ApiResult};
use crate::fetch::{AccessStrategy, FetchReport};
use crate::models::SelfTestResult;
use crate::AppState;

/// GET /api/fetch/report - Attempts made by the last applied fetch.
pub async fn get_fetch_report(State(state): State<AppState>) -> ApiResult<Option<FetchReport>> {
    let report = state.explorer.last_report().await;
    success(report, state.explorer.generation())
}

/// Configured catalog access, in the order strategies are tried.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategiesResponse {
    pub endpoint: String,
    pub request_timeout_secs: u64,
    pub strategies: Vec<AccessStrategy>,
}

/// GET /api/fetch/strategies - Endpoint and access strategies in use.
pub async fn get_strategies(State(state): State<AppState>) -> ApiResult<StrategiesResponse> {
    let config = &state.config;
    success(
        StrategiesResponse {
            endpoint: config.endpoint.clone(),
            request_timeout_secs: config.request_timeout.as_secs(),
            strategies: config.strategies.clone(),
        },
        state.explorer.generation(),
    )
}

/// GET /api/self-test - Results of the last self test.
pub async fn get_self_test(State(state): State<AppState>) -> ApiResult<Vec<SelfTestResult>> {
    let results = state.explorer.self_test_results().await;
    success(results, state.explorer.generation())
}

/// POST /api/self-test - Check mock data and a live fetch.
pub async fn run_self_test(State(state): State<AppState>) -> ApiResult<Vec<SelfTestResult>> {
    let results = state.explorer.run_self_test().await;
    tracing::info!(
        passed = results.iter().filter(|r| r.passed).count(),
        total = results.len(),
        "Self test finished"
    );
    success(results, state.explorer.generation())
}

/// DELETE /api/self-test - Clear stored self-test output.
pub async fn clear_self_test(State(state): State<AppState>) -> ApiResult<()> {
    state.explorer.clear_self_test().await;
    success((), state.explorer.generation())
}
