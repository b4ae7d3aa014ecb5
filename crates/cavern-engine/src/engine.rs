//! The `GameEngine` trait: the contract between the session core and a
//! game's rules.
//!
//! The core owns *who* may act and *when*. The engine owns *what happens*:
//! where players stand, what they carry, whether they are still alive,
//! and how an action resolves.

use cavern_protocol::{Action, CaveId, Perception, PlayerId, PlayerState, TurnResult};
use serde::Serialize;

use crate::EngineError;

/// The trait every game engine implements.
///
/// Each session owns exactly one engine instance, created with
/// [`new`](Self::new) when the session is created. All methods are
/// synchronous and bounded; the core calls them while holding the
/// session's lock.
///
/// # Trait bounds
///
/// - `Send + Sync` so an engine can sit behind a `tokio::sync::RwLock`
///   shared between request handlers.
/// - `'static` because sessions live as long as the process.
pub trait GameEngine: Send + Sync + 'static {
    /// Engine settings (map size, hazard counts, ...).
    type Config: Send + Sync + Clone + Default + 'static;

    /// What `map_data` returns. Sent to clients as-is.
    type Map: Serialize + Send + Sync + 'static;

    /// Checks a configuration before any engine is built from it.
    ///
    /// Called once at startup so that session creation itself can never
    /// fail. Default: accept everything.
    fn validate_config(_config: &Self::Config) -> Result<(), EngineError> {
        Ok(())
    }

    /// Builds a fresh engine for a new session.
    fn new(config: &Self::Config) -> Self;

    /// Number of caves on this engine's map.
    fn cave_count(&self) -> usize;

    /// Adds a player to the game and returns where they start.
    fn initialize_player(&mut self, player: &PlayerId) -> CaveId;

    /// Returns the player's current state, or `None` if the engine has
    /// never seen them.
    fn player_state(&self, player: &PlayerId) -> Option<PlayerState>;

    /// Returns `true` if the player is known and still alive.
    fn is_alive(&self, player: &PlayerId) -> bool {
        self.player_state(player).is_some_and(|s| s.alive)
    }

    /// Resolves one action for one player.
    ///
    /// Must leave the engine unchanged when it returns `Outcome::Error`.
    fn handle_player_turn(&mut self, player: &PlayerId, action: Action) -> TurnResult;

    /// What the player currently senses. Empty for dead or unknown players.
    fn perceive(&self, player: &PlayerId) -> Vec<Perception>;

    /// The map as shown to clients.
    fn map_data(&self) -> Self::Map;
}
