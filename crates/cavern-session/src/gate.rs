//! The access gate: may this player make this request right now?
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. the player exists ([`Registry::resolve`]);
//! 2. the player is alive (active requests only);
//! 3. it is the player's turn (active requests only).
//!
//! The gate never mutates anything. The lock-taking entry points,
//! [`passive`] and [`active`], run the checks while already holding the
//! session lock, so the answer cannot go stale before the caller uses it.

use cavern_engine::GameEngine;
use cavern_protocol::PlayerId;

use crate::{ActiveTurn, PassiveView, Registry, Session, SessionError};

/// The kind of request being made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    /// Read-only queries (status, map). Allowed for eliminated players.
    Passive,
    /// Turn-consuming actions (move, shoot, pass).
    Active,
}

/// Fails with [`SessionError::Eliminated`] if the engine says the player
/// is dead, or [`SessionError::PlayerNotFound`] if the engine has never
/// heard of them.
pub fn check_alive<E: GameEngine>(
    session: &Session<E>,
    player: &PlayerId,
) -> Result<(), SessionError> {
    match session.engine().player_state(player) {
        Some(state) if state.alive => Ok(()),
        Some(_) => Err(SessionError::Eliminated(player.clone())),
        None => Err(SessionError::PlayerNotFound(player.clone())),
    }
}

/// Fails with [`SessionError::TurnViolation`] unless `player` is the one
/// entitled to act.
pub fn check_turn<E: GameEngine>(
    session: &Session<E>,
    player: &PlayerId,
) -> Result<(), SessionError> {
    let current = session.current_player();
    if current == player {
        Ok(())
    } else {
        Err(SessionError::TurnViolation {
            player: player.clone(),
            current: current.clone(),
        })
    }
}

/// Runs the per-session checks for one request.
pub fn authorize<E: GameEngine>(
    session: &Session<E>,
    player: &PlayerId,
    access: Access,
) -> Result<(), SessionError> {
    match access {
        Access::Passive => Ok(()),
        Access::Active => {
            check_alive(session, player)?;
            check_turn(session, player)
        }
    }
}

/// Resolves the player and takes a shared lock on their session.
///
/// # Errors
/// [`SessionError::PlayerNotFound`] if the player is unknown.
pub async fn passive<E: GameEngine>(
    registry: &Registry<E>,
    player: &PlayerId,
) -> Result<PassiveView<E>, SessionError> {
    let handle = registry.resolve(player).await?;
    let session = handle.read_owned().await;
    authorize(&session, player, Access::Passive)?;
    Ok(PassiveView::new(player.clone(), session))
}

/// Resolves the player, takes an exclusive lock on their session, and
/// checks they may act.
///
/// # Errors
/// - [`SessionError::PlayerNotFound`] if the player is unknown.
/// - [`SessionError::Eliminated`] if the player is dead.
/// - [`SessionError::TurnViolation`] if it is someone else's turn.
pub async fn active<E: GameEngine>(
    registry: &Registry<E>,
    player: &PlayerId,
) -> Result<ActiveTurn<E>, SessionError> {
    let handle = registry.resolve(player).await?;
    let session = handle.write_owned().await;
    if let Err(err) = authorize(&session, player, Access::Active) {
        tracing::debug!(player_id = %player, session_id = %session.id(), %err, "action refused");
        return Err(err);
    }
    Ok(ActiveTurn::new(player.clone(), session))
}
