//! Core protocol types: identifiers and the game engine contract.
//!
//! Everything here is plain data. The session core moves these values
//! between the HTTP layer and the engine without interpreting them beyond
//! what turn-keeping needs (is the player alive? did the action fail?).

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// An opaque identifier for a game session (one match).
///
/// A newtype over `String` so a `SessionId` can never be passed where a
/// `PlayerId` is expected. `#[serde(transparent)]` keeps the JSON form a
/// plain string: `"3f2a..."`, not `{ "0": "3f2a..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SessionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// An opaque identifier for a player.
///
/// Possessing a player id is the only credential in Cavern: whoever
/// presents it acts as that player.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for PlayerId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Index of a cave on the map, `0..cave_count`.
pub type CaveId = u32;

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// The category of a state-changing request, before its target is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Walk through a tunnel into an adjacent cave.
    Move,
    /// Fire an arrow into an adjacent cave.
    Shoot,
    /// Give up the turn without doing anything.
    Pass,
}

impl ActionKind {
    /// Returns `true` if this kind of action needs a `targetCave`.
    pub fn needs_target(self) -> bool {
        !matches!(self, Self::Pass)
    }

    /// Builds the concrete action for a parsed target.
    pub fn with_target(self, target: CaveId) -> Action {
        match self {
            Self::Move => Action::Move(target),
            Self::Shoot => Action::Shoot(target),
            Self::Pass => Action::Pass,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Move => f.write_str("move"),
            Self::Shoot => f.write_str("shoot"),
            Self::Pass => f.write_str("pass"),
        }
    }
}

/// A fully-formed player action handed to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move into the given cave.
    Move(CaveId),
    /// Shoot into the given cave.
    Shoot(CaveId),
    /// Do nothing this turn.
    Pass,
}

// ---------------------------------------------------------------------------
// Engine results
// ---------------------------------------------------------------------------

/// How the engine resolved an action.
///
/// The session core only distinguishes `Error` from everything else:
/// an `Error` outcome never advances the turn, any other outcome does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The action was applied and play continues.
    Ok,
    /// The action won the game for the acting player.
    Win,
    /// The action eliminated the acting player.
    Lost,
    /// The action was rejected; nothing changed.
    Error,
}

impl Outcome {
    /// Returns `true` if the engine rejected the action.
    pub fn is_error(self) -> bool {
        matches!(self, Self::Error)
    }
}

/// A sensation a player receives from the caves next to theirs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Perception {
    /// A live wumpus is in an adjacent cave.
    Stench,
    /// A bottomless pit is in an adjacent cave.
    Breeze,
    /// Bats roost in an adjacent cave.
    Rustle,
}

/// What the engine returns for every action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnResult {
    /// How the action resolved. Serialized as `status` on the wire.
    #[serde(rename = "status")]
    pub outcome: Outcome,

    /// What the acting player senses after the action.
    pub perceptions: Vec<Perception>,

    /// Human-readable description of what happened.
    pub message: String,
}

impl TurnResult {
    /// Shorthand for a rejected action with no perceptions.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Error,
            perceptions: Vec::new(),
            message: message.into(),
        }
    }
}

/// A player's state as held by the engine.
///
/// `alive` is the single source of truth for elimination. The session
/// core reads it on demand and never stores its own copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// The cave the player is standing in.
    pub location: CaveId,
    /// Arrows left in the quiver.
    pub arrows: u32,
    /// Whether the player is still in the game.
    pub alive: bool,
}

/// Liveness as reported in the status reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerStatus {
    /// Still playing.
    Alive,
    /// Eliminated.
    Dead,
}

impl From<&PlayerState> for PlayerStatus {
    fn from(state: &PlayerState) -> Self {
        if state.alive { Self::Alive } else { Self::Dead }
    }
}
