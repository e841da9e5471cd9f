//! Filter, search and mode endpoints.

use axum::{extract::State, Json};

use super::{error, success, ApiResult};
use crate::models::{
    ExplorerSnapshot, FilterOptions, Game, MockModeRequest, SearchRequest, UpdateFiltersRequest,
};
use crate::AppState;

/// GET /api/options - Selectable platforms, categories and sort keys.
pub async fn get_options(State(state): State<AppState>) -> ApiResult<FilterOptions> {
    success(FilterOptions::default(), state.explorer.generation())
}

/// GET /api/state - Current selections and load status.
pub async fn get_state(State(state): State<AppState>) -> ApiResult<ExplorerSnapshot> {
    let snapshot = state.explorer.snapshot().await;
    let generation = snapshot.generation;
    success(snapshot, generation)
}

/// PUT /api/filters - Change selections and refetch.
pub async fn update_filters(
    State(state): State<AppState>,
    Json(request): Json<UpdateFiltersRequest>,
) -> ApiResult<Vec<Game>> {
    if let Err(e) = state.explorer.set_filters(request).await {
        return error(e, state.explorer.generation());
    }

    let games = state.explorer.filtered_games().await;
    success(games, state.explorer.generation())
}

/// PUT /api/search - Change the title search.
pub async fn update_search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> ApiResult<Vec<Game>> {
    let games = state.explorer.set_search_title(&request.title).await;
    success(games, state.explorer.generation())
}

/// PUT /api/mock-mode - Toggle the sample catalog.
pub async fn set_mock_mode(
    State(state): State<AppState>,
    Json(request): Json<MockModeRequest>,
) -> ApiResult<ExplorerSnapshot> {
    state.explorer.set_mock_mode(request.enabled).await;
    let snapshot = state.explorer.snapshot().await;
    let generation = snapshot.generation;
    success(snapshot, generation)
}

/// POST /api/reset - Restore default selections and clear results.
pub async fn reset(State(state): State<AppState>) -> ApiResult<ExplorerSnapshot> {
    state.explorer.reset().await;
    let snapshot = state.explorer.snapshot().await;
    let generation = snapshot.generation;
    success(snapshot, generation)
}
