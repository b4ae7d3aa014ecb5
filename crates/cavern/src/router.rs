//! Axum router construction.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use cavern_engine::GameEngine;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Builds the complete router for a server running engine `E`.
///
/// The path segment after `/api/game/` is a game id for `join` and a
/// player id everywhere else. `create` is a fixed segment and takes
/// precedence over the id.
pub fn build_router<E: GameEngine>(state: Arc<AppState<E>>) -> Router {
    Router::new()
        .route("/api/game/create", post(handlers::create_game::<E>))
        .route("/api/game/{id}/join", post(handlers::join_game::<E>))
        .route("/api/game/{id}/status", get(handlers::status::<E>))
        .route("/api/game/{id}/map", get(handlers::map::<E>))
        .route("/api/game/{id}/move", post(handlers::move_to::<E>))
        .route("/api/game/{id}/shoot", post(handlers::shoot::<E>))
        .route("/api/game/{id}/pass", post(handlers::pass::<E>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
