//! Orchestration: one method per client request.
//!
//! Each active request runs gate → engine → scheduler under a single
//! session write lock. Passive requests take the read lock and never touch
//! the scheduler.

use cavern_engine::GameEngine;
use cavern_protocol::{
    Action, ActionKind, ActionRequest, ActionResponse, CreateGameResponse, JoinGameResponse,
    MapResponse, PlayerId, PlayerStatus, ProtocolError, SessionId, StatusResponse,
};

use crate::{Registry, SessionError, gate};

/// Front door of the session core. The HTTP layer calls nothing else.
pub struct GameService<E: GameEngine> {
    registry: Registry<E>,
}

impl<E: GameEngine> GameService<E> {
    /// Wraps a registry.
    pub fn new(registry: Registry<E>) -> Self {
        Self { registry }
    }

    /// The underlying registry, for eviction and counts.
    pub fn registry(&self) -> &Registry<E> {
        &self.registry
    }

    /// Starts a new session. The creator holds the first turn.
    pub async fn create(&self) -> CreateGameResponse {
        let created = self.registry.create_session().await;
        CreateGameResponse {
            game_id: created.session_id,
            current_player: created.player_id.clone(),
            player_id: created.player_id,
            start_location: created.start_location,
            num_caves: created.cave_count,
        }
    }

    /// Adds a player to an existing session.
    pub async fn join(&self, game_id: &SessionId) -> Result<JoinGameResponse, SessionError> {
        let joined = self.registry.join_session(game_id).await?;
        Ok(JoinGameResponse {
            player_id: joined.player_id,
            start_location: joined.start_location,
            num_players: joined.num_players,
        })
    }

    /// Reports the player's state. Works for eliminated players too.
    pub async fn status(&self, player: &PlayerId) -> Result<StatusResponse<E::Map>, SessionError> {
        let view = gate::passive(&self.registry, player).await?;
        let session = view.session();
        let engine = session.engine();

        let state = engine
            .player_state(player)
            .ok_or_else(|| SessionError::PlayerNotFound(player.clone()))?;

        let (perceptions, message) = if state.alive {
            (engine.perceive(player), format!("you are in cave {}", state.location))
        } else {
            (Vec::new(), "you are dead".to_string())
        };

        Ok(StatusResponse {
            status: PlayerStatus::from(&state),
            location: state.location,
            arrows: state.arrows,
            perceptions,
            map: engine.map_data(),
            message,
            current_player: session.current_player().clone(),
        })
    }

    /// Returns the session's map.
    pub async fn map(&self, player: &PlayerId) -> Result<MapResponse<E::Map>, SessionError> {
        let view = gate::passive(&self.registry, player).await?;
        Ok(MapResponse {
            map: view.session().engine().map_data(),
        })
    }

    /// Plays one action for the player.
    ///
    /// `request` is the parsed body, or the reason it could not be parsed.
    /// The gate runs first, so an out-of-turn request with a bad body is
    /// reported as out of turn. Nothing changes unless the engine accepts
    /// the action.
    ///
    /// # Errors
    /// - `PlayerNotFound`, `Eliminated`, `TurnViolation` from the gate.
    /// - `InvalidInput` for a missing, malformed, or out-of-range target.
    /// - `EngineRejected` if the engine refuses the action.
    pub async fn act(
        &self,
        player: &PlayerId,
        kind: ActionKind,
        request: Result<ActionRequest, ProtocolError>,
    ) -> Result<ActionResponse, SessionError> {
        let turn = gate::active(&self.registry, player).await?;

        let action = if kind.needs_target() {
            let target = request?.target()?;
            let caves = turn.session().engine().cave_count();
            if target as usize >= caves {
                return Err(SessionError::InvalidInput(format!(
                    "cave {target} does not exist (caves are 0..{caves})"
                )));
            }
            kind.with_target(target)
        } else {
            Action::Pass
        };

        let report = turn.play(action);
        if report.result.outcome.is_error() {
            return Err(SessionError::EngineRejected {
                message: report.result.message,
                current: report.current_player,
            });
        }

        Ok(ActionResponse {
            result: report.result,
            current_player: report.current_player,
        })
    }

    /// Gives up the turn without acting.
    pub async fn pass(&self, player: &PlayerId) -> Result<ActionResponse, SessionError> {
        self.act(player, ActionKind::Pass, Ok(ActionRequest::default())).await
    }
}
