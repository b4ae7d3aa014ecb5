//! Session core for Cavern.
//!
//! This crate decides *who* may act and *when*:
//!
//! 1. **Registry** -- which sessions exist and which session each player
//!    belongs to ([`Registry`])
//! 2. **Scheduler** -- whose turn it is, skipping eliminated players
//!    ([`scheduler`], [`Session::advance`])
//! 3. **Gate** -- whether a request may proceed at all ([`gate`])
//! 4. **Orchestration** -- gate → engine → scheduler → reply
//!    ([`GameService`])
//!
//! # How it fits in the stack
//!
//! ```text
//! HTTP layer (above)  ← turns requests into GameService calls
//!     ↕
//! Session core (this crate)  ← identity, membership, turn order
//!     ↕
//! Engine (below)  ← game rules, player liveness
//! ```
//!
//! # Locking
//!
//! The registry's two maps share one structural lock; every session has
//! its own lock. Sessions never wait on each other, and the structural lock
//! is never held while a session lock is awaited.

mod error;
pub mod gate;
mod registry;
pub mod scheduler;
mod service;
mod session;
mod turn;

#[cfg(test)]
mod stub;

pub use error::{ErrorKind, SessionError};
pub use gate::Access;
pub use registry::{CreatedSession, JoinedSession, Registry, SessionHandle};
pub use service::GameService;
pub use session::Session;
pub use turn::{ActiveTurn, PassiveView, TurnReport};
