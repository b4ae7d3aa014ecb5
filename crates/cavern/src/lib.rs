//! # Cavern
//!
//! Turn-based cave hunting over HTTP.
//!
//! Many game sessions run side by side in one process. Each player holds
//! an opaque id; Cavern works out which session the id belongs to, whether
//! it is that player's turn, and only then hands the action to the game
//! engine.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cavern::prelude::*;
//!
//! # async fn start() -> Result<(), CavernError> {
//! let server = CavernServer::builder()
//!     .bind("0.0.0.0:8080")
//!     .build::<CaveHunt>(CaveConfig::default())
//!     .await?;
//! server.run().await
//! # }
//! ```

pub mod config;
mod error;
pub mod handlers;
pub mod router;
mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::CavernError;
pub use server::{CavernServer, CavernServerBuilder, ServerError};

/// The types most servers and engines need.
pub mod prelude {
    pub use cavern_engine::{CaveConfig, CaveHunt, EngineError, GameEngine};
    pub use cavern_protocol::{
        Action, ActionKind, CaveId, IdSource, Outcome, Perception, PlayerId, PlayerState,
        SessionId, TurnResult, UuidIds,
    };
    pub use cavern_session::{ErrorKind, GameService, Registry, SessionError};

    pub use crate::{CavernError, CavernServer, ServerConfig};
}
