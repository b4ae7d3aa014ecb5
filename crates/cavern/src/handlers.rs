//! REST endpoint handlers.
//!
//! Handlers only translate between HTTP and [`GameService`] calls: pull the
//! id out of the path, hand over the body, wrap the reply in `Json`.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/api/game/create` | Start a session |
//! | `POST` | `/api/game/{id}/join` | Join session `id` |
//! | `GET` | `/api/game/{id}/status` | Player `id`'s state |
//! | `GET` | `/api/game/{id}/map` | Player `id`'s map |
//! | `POST` | `/api/game/{id}/move` | Move to `targetCave` |
//! | `POST` | `/api/game/{id}/shoot` | Shoot into `targetCave` |
//! | `POST` | `/api/game/{id}/pass` | Give up the turn |
//!
//! [`GameService`]: cavern_session::GameService

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use cavern_engine::GameEngine;
use cavern_protocol::{
    ActionKind, ActionRequest, ActionResponse, CreateGameResponse, JoinGameResponse,
    MapResponse, PlayerId, SessionId, StatusResponse,
};

use crate::error::CavernError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Session lifecycle
// ---------------------------------------------------------------------------

/// `POST /api/game/create`
pub async fn create_game<E: GameEngine>(
    State(state): State<Arc<AppState<E>>>,
) -> Json<CreateGameResponse> {
    Json(state.service.create().await)
}

/// `POST /api/game/{gameId}/join`
pub async fn join_game<E: GameEngine>(
    State(state): State<Arc<AppState<E>>>,
    Path(game_id): Path<String>,
) -> Result<Json<JoinGameResponse>, CavernError> {
    let reply = state.service.join(&SessionId::from(game_id)).await?;
    Ok(Json(reply))
}

// ---------------------------------------------------------------------------
// Passive queries
// ---------------------------------------------------------------------------

/// `GET /api/game/{playerId}/status`
pub async fn status<E: GameEngine>(
    State(state): State<Arc<AppState<E>>>,
    Path(player_id): Path<String>,
) -> Result<Json<StatusResponse<E::Map>>, CavernError> {
    let reply = state.service.status(&PlayerId::from(player_id)).await?;
    Ok(Json(reply))
}

/// `GET /api/game/{playerId}/map`
pub async fn map<E: GameEngine>(
    State(state): State<Arc<AppState<E>>>,
    Path(player_id): Path<String>,
) -> Result<Json<MapResponse<E::Map>>, CavernError> {
    let reply = state.service.map(&PlayerId::from(player_id)).await?;
    Ok(Json(reply))
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// `POST /api/game/{playerId}/move`
pub async fn move_to<E: GameEngine>(
    state: State<Arc<AppState<E>>>,
    path: Path<String>,
    body: Bytes,
) -> Result<Json<ActionResponse>, CavernError> {
    act(state, path, ActionKind::Move, &body).await
}

/// `POST /api/game/{playerId}/shoot`
pub async fn shoot<E: GameEngine>(
    state: State<Arc<AppState<E>>>,
    path: Path<String>,
    body: Bytes,
) -> Result<Json<ActionResponse>, CavernError> {
    act(state, path, ActionKind::Shoot, &body).await
}

/// `POST /api/game/{playerId}/pass`
pub async fn pass<E: GameEngine>(
    State(state): State<Arc<AppState<E>>>,
    Path(player_id): Path<String>,
) -> Result<Json<ActionResponse>, CavernError> {
    let reply = state.service.pass(&PlayerId::from(player_id)).await?;
    Ok(Json(reply))
}

/// The body is parsed but not judged here: the service decides whether a
/// bad body matters only after the gate has let the player through.
async fn act<E: GameEngine>(
    State(state): State<Arc<AppState<E>>>,
    Path(player_id): Path<String>,
    kind: ActionKind,
    body: &[u8],
) -> Result<Json<ActionResponse>, CavernError> {
    let request = ActionRequest::from_body(body);
    let reply = state
        .service
        .act(&PlayerId::from(player_id), kind, request)
        .await?;
    Ok(Json(reply))
}
