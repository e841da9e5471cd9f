//! Game list endpoints.

use axum::extract::{Path, State};

use super::{error, success, ApiResult};
use crate::errors::AppError;
use crate::models::{Game, GameDetail};
use crate::AppState;

/// GET /api/games - Current games after the title search.
pub async fn list_games(State(state): State<AppState>) -> ApiResult<Vec<Game>> {
    let games = state.explorer.filtered_games().await;
    success(games, state.explorer.generation())
}

/// GET /api/games/:id - One game from the current list with its resolved links.
pub async fn get_game(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<GameDetail> {
    let generation = state.explorer.generation();

    match state.explorer.find_game(id).await {
        Some(game) => success(GameDetail::from(game), generation),
        None => error(
            AppError::NotFound(format!("Game {} not found", id)),
            generation,
        ),
    }
}

/// POST /api/games/load - Fetch with the current filters.
pub async fn load_games(State(state): State<AppState>) -> ApiResult<Vec<Game>> {
    if state.explorer.fetch_games(false).await.is_none() {
        tracing::debug!("Load request superseded by a newer fetch");
    }

    let games = state.explorer.filtered_games().await;
    success(games, state.explorer.generation())
}
