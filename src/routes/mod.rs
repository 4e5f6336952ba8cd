pub mod games;
pub mod health;

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::AppState;

pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes())
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/games", get(games::get_game_stats))
        .route("/games/{game_id}", get(games::get_game_state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::Config,
        dictionary::{Dictionary, WordPool},
        session::{GameRegistry, SessionPlayer},
    };
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tokio::sync::mpsc;
    use tower::ServiceExt;

    fn app_state() -> Arc<AppState> {
        let config = Config::default();
        let games = GameRegistry::new(
            Arc::new(WordPool::from_words((0..30).map(|i| format!("word{}", i)))),
            Arc::new(Dictionary::empty()),
            config.game.max_games,
        );
        Arc::new(AppState { config, games })
    }

    async fn get_json(state: Arc<AppState>, uri: &str) -> (StatusCode, Option<Value>) {
        let response = create_routes()
            .with_state(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).ok())
    }

    #[tokio::test]
    async fn test_health_check() {
        let (status, body) = get_json(app_state(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.unwrap()["status"], "ok");
    }

    #[tokio::test]
    async fn test_get_game_state() {
        let state = app_state();
        let (tx, _rx) = mpsc::channel(4);
        let game_id = state
            .games
            .create_game(SessionPlayer {
                connection_id: uuid::Uuid::new_v4(),
                username: "Tana".to_string(),
                tx,
            })
            .unwrap();

        let (status, body) = get_json(state.clone(), &format!("/api/games/{}", game_id)).await;
        assert_eq!(status, StatusCode::OK);
        let body = body.unwrap();
        assert_eq!(body["game_id"], game_id.as_str());
        assert_eq!(body["phase"], "setup");

        let (_, stats) = get_json(state, "/api/games").await;
        assert_eq!(stats.unwrap()["running"], 1);
    }

    #[tokio::test]
    async fn test_unknown_game_is_not_found() {
        let (status, _) = get_json(app_state(), "/api/games/nothere").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
