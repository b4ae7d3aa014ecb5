//! Lock guards handed out by the gate.
//!
//! Holding one of these is proof that the gate's checks passed and that
//! nothing has changed since: the session lock was taken before checking
//! and is only released when the guard is dropped.

use cavern_engine::GameEngine;
use cavern_protocol::{Action, PlayerId, TurnResult};
use tokio::sync::{OwnedRwLockReadGuard, OwnedRwLockWriteGuard};

use crate::Session;

/// Read access to a player's session, for status and map queries.
///
/// Any number of views on the same session can coexist.
pub struct PassiveView<E: GameEngine> {
    player_id: PlayerId,
    session: OwnedRwLockReadGuard<Session<E>>,
}

impl<E: GameEngine> PassiveView<E> {
    pub(crate) fn new(player_id: PlayerId, session: OwnedRwLockReadGuard<Session<E>>) -> Self {
        Self { player_id, session }
    }

    /// The player who asked.
    pub fn player_id(&self) -> &PlayerId {
        &self.player_id
    }

    /// The player's session.
    pub fn session(&self) -> &Session<E> {
        &self.session
    }
}

/// Exclusive access to a session on behalf of the player whose turn it is.
///
/// Consumed by [`play`](Self::play): one guard, one action.
pub struct ActiveTurn<E: GameEngine> {
    player_id: PlayerId,
    session: OwnedRwLockWriteGuard<Session<E>>,
}

/// The result of one played action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    /// What the engine said.
    pub result: TurnResult,
    /// Who acts next. Unchanged if the engine rejected the action.
    pub current_player: PlayerId,
    /// Whether the turn moved on.
    pub advanced: bool,
}

impl<E: GameEngine> ActiveTurn<E> {
    pub(crate) fn new(player_id: PlayerId, session: OwnedRwLockWriteGuard<Session<E>>) -> Self {
        Self { player_id, session }
    }

    /// The player holding the turn.
    pub fn player_id(&self) -> &PlayerId {
        &self.player_id
    }

    /// The player's session.
    pub fn session(&self) -> &Session<E> {
        &self.session
    }

    /// Hands the action to the engine, then advances the turn unless the
    /// engine reported an error.
    ///
    /// The lock is released when this returns.
    pub fn play(mut self, action: Action) -> TurnReport {
        let result = self
            .session
            .engine_mut()
            .handle_player_turn(&self.player_id, action);

        let advanced = !result.outcome.is_error();
        let current_player = if advanced {
            self.session.advance().clone()
        } else {
            self.session.current_player().clone()
        };

        tracing::debug!(
            session_id = %self.session.id(),
            player_id = %self.player_id,
            ?action,
            outcome = ?result.outcome,
            next = %current_player,
            "turn played"
        );

        TurnReport {
            result,
            current_player,
            advanced,
        }
    }
}
