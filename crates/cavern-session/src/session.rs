//! The session record: one match, its engine, and its turn order.

use cavern_engine::GameEngine;
use cavern_protocol::{CaveId, PlayerId, SessionId};

use crate::scheduler;

/// One in-progress match.
///
/// A session is created with exactly one player and only ever changes in
/// two ways:
///
/// - [`join`](Self::join) appends to the player order, never touching the
///   turn index;
/// - [`advance`](Self::advance) moves the turn index, never touching the
///   player order.
///
/// Together these keep `turn_index < player_order.len()` true at all times.
///
/// Liveness is not stored here. The engine owns it and the scheduler asks
/// on demand.
#[derive(Debug)]
pub struct Session<E: GameEngine> {
    id: SessionId,
    engine: E,
    player_order: Vec<PlayerId>,
    turn_index: usize,
}

impl<E: GameEngine> Session<E> {
    /// Creates a session with its founding player, who holds the first turn.
    ///
    /// Returns the session and the founder's start location.
    pub(crate) fn create(id: SessionId, mut engine: E, founder: PlayerId) -> (Self, CaveId) {
        let start = engine.initialize_player(&founder);
        let session = Self {
            id,
            engine,
            player_order: vec![founder],
            turn_index: 0,
        };
        (session, start)
    }

    /// Appends a player to the end of the turn order.
    ///
    /// Player ids come from a unique id source, so a duplicate here is a
    /// bug in the caller rather than a user error.
    pub(crate) fn join(&mut self, player: PlayerId) -> CaveId {
        debug_assert!(!self.contains(&player), "player {player} joined twice");
        let start = self.engine.initialize_player(&player);
        self.player_order.push(player);
        start
    }

    /// Moves the turn to the next living player and returns them.
    pub fn advance(&mut self) -> &PlayerId {
        let engine = &self.engine;
        self.turn_index =
            scheduler::next_turn(&self.player_order, self.turn_index, |p| engine.is_alive(p));
        self.current_player()
    }

    /// The session's id.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Read access to the session's engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub(crate) fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// All players in join order.
    pub fn players(&self) -> &[PlayerId] {
        &self.player_order
    }

    /// Number of players, dead or alive.
    pub fn len(&self) -> usize {
        self.player_order.len()
    }

    /// Returns `true` if the session has no players. A session starts with
    /// one player and never shrinks, so this only holds for a broken session.
    pub fn is_empty(&self) -> bool {
        self.player_order.is_empty()
    }

    /// Returns `true` if the player belongs to this session.
    pub fn contains(&self, player: &PlayerId) -> bool {
        self.player_order.contains(player)
    }

    /// Position of the acting player in [`players`](Self::players).
    pub fn turn_index(&self) -> usize {
        self.turn_index
    }

    /// The player entitled to act.
    pub fn current_player(&self) -> &PlayerId {
        &self.player_order[self.turn_index]
    }
}
