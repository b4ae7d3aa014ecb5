//! Game engines for Cavern.
//!
//! The session core never looks inside a game. It talks to one engine
//! instance per session through the [`GameEngine`] trait: place a player,
//! read their state, resolve an action, describe the map.
//!
//! # Key types
//!
//! - [`GameEngine`] -- the contract every engine implements
//! - [`CaveHunt`] -- the bundled engine: hunt a wumpus through a cave network
//! - [`CaveConfig`] -- map size, hazard counts, arrows, RNG seed
//! - [`CaveMap`] -- cave topology, also the engine's map representation

mod config;
mod engine;
mod error;
mod hunt;
mod map;

pub use config::CaveConfig;
pub use engine::GameEngine;
pub use error::EngineError;
pub use hunt::{CaveHunt, Hazards};
pub use map::{Cave, CaveMap};
