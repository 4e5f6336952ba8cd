use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::{models::GameState, AppState};

/// Current snapshot of a running game
pub async fn get_game_state(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<String>,
) -> Result<Json<GameState>, StatusCode> {
    state
        .games
        .snapshot(&game_id)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// Number of running games and the configured limit
pub async fn get_game_stats(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "running": state.games.len(),
        "max": state.config.game.max_games,
    }))
}
