//! Wire protocol for Cavern.
//!
//! This crate defines the "language" spoken between the HTTP layer, the
//! session core, and the game engine:
//!
//! - **Identifiers** ([`SessionId`], [`PlayerId`], [`CaveId`]) and the
//!   [`IdSource`] that mints them.
//! - **Engine contract types** ([`Action`], [`Outcome`], [`Perception`],
//!   [`PlayerState`], [`TurnResult`]) -- what the core sends to and
//!   reads back from a game engine.
//! - **Messages** ([`CreateGameResponse`], [`StatusResponse`], ...) --
//!   the JSON bodies that travel over HTTP, plus [`ActionRequest`] parsing.
//! - **Errors** ([`ProtocolError`]).
//!
//! # Architecture
//!
//! ```text
//! HTTP (cavern) → Session core (cavern-session) → Engine (cavern-engine)
//!          ↘               ↓                      ↙
//!                 Protocol (this crate)
//! ```

mod error;
mod ids;
mod messages;
mod types;

pub use error::ProtocolError;
pub use ids::{IdSource, SequentialIds, UuidIds};
pub use messages::{
    ActionRequest, ActionResponse, CreateGameResponse, ErrorResponse,
    JoinGameResponse, MapResponse, StatusResponse,
};
pub use types::{
    Action, ActionKind, CaveId, Outcome, Perception, PlayerId, PlayerState,
    PlayerStatus, SessionId, TurnResult,
};
