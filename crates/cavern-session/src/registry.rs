//! The session registry: every live session, and which session each
//! player belongs to.
//!
//! # Concurrency
//!
//! Two levels of locking:
//!
//! - One structural `RwLock` guards both maps. It is held only for map
//!   reads and inserts, never across another `.await`.
//! - Each session sits behind its own `Arc<RwLock<Session>>`, handed out
//!   as a [`SessionHandle`]. Turn-taking locks only that session, so
//!   different sessions never wait on each other.

use std::collections::HashMap;
use std::sync::Arc;

use cavern_engine::GameEngine;
use cavern_protocol::{CaveId, IdSource, PlayerId, SessionId};
use tokio::sync::RwLock;

use crate::{Session, SessionError};

/// Shared, individually locked access to one session.
pub type SessionHandle<E> = Arc<RwLock<Session<E>>>;

/// What [`Registry::create_session`] hands back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedSession {
    pub session_id: SessionId,
    pub player_id: PlayerId,
    pub start_location: CaveId,
    pub cave_count: usize,
}

/// What [`Registry::join_session`] hands back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedSession {
    pub player_id: PlayerId,
    pub start_location: CaveId,
    /// Party size including the new player.
    pub num_players: usize,
}

/// The two maps, always updated together.
struct Index<E: GameEngine> {
    sessions: HashMap<SessionId, SessionHandle<E>>,
    /// Each player belongs to exactly one session.
    players: HashMap<PlayerId, SessionId>,
}

/// Owns every session in the process.
///
/// One instance lives for the whole process in production and is shared
/// with request handlers through the application state. Tests build their
/// own isolated instances.
///
/// ## Lifecycle
///
/// ```text
/// create_session() ──→ join_session() ... ──→ evict()
///        │                    │                  │
///        ▼                    ▼                  ▼
///   [1 player]         [N players]          [removed]
/// ```
///
/// Nothing calls `evict` automatically: sessions stay until something
/// decides they are done.
pub struct Registry<E: GameEngine> {
    index: RwLock<Index<E>>,
    ids: Arc<dyn IdSource>,
    engine_config: E::Config,
}

impl<E: GameEngine> Registry<E> {
    /// Creates an empty registry.
    ///
    /// The engine configuration is validated here, once, so that creating
    /// a session later cannot fail.
    ///
    /// # Errors
    /// Returns [`SessionError::Config`] if the engine rejects the config.
    pub fn new(engine_config: E::Config, ids: Arc<dyn IdSource>) -> Result<Self, SessionError> {
        E::validate_config(&engine_config)?;
        Ok(Self {
            index: RwLock::new(Index {
                sessions: HashMap::new(),
                players: HashMap::new(),
            }),
            ids,
            engine_config,
        })
    }

    /// Starts a new session with a fresh engine and one player.
    pub async fn create_session(&self) -> CreatedSession {
        let session_id = SessionId(self.ids.new_id());
        let player_id = PlayerId(self.ids.new_id());

        let engine = E::new(&self.engine_config);
        let (session, start_location) =
            Session::create(session_id.clone(), engine, player_id.clone());
        let cave_count = session.engine().cave_count();

        {
            let mut index = self.index.write().await;
            index
                .sessions
                .insert(session_id.clone(), Arc::new(RwLock::new(session)));
            index.players.insert(player_id.clone(), session_id.clone());
        }

        tracing::info!(%session_id, %player_id, "session created");

        CreatedSession {
            session_id,
            player_id,
            start_location,
            cave_count,
        }
    }

    /// Adds a new player to the end of an existing session's turn order.
    ///
    /// The player is appended under the session's own lock first, and only
    /// then registered in the player map, so a player id is never
    /// resolvable before its session knows about it.
    ///
    /// # Errors
    /// Returns [`SessionError::SessionNotFound`] if the session does not
    /// exist (or was evicted while the join was in progress).
    pub async fn join_session(
        &self,
        session_id: &SessionId,
    ) -> Result<JoinedSession, SessionError> {
        let handle = self.session(session_id).await?;
        let player_id = PlayerId(self.ids.new_id());

        let (start_location, num_players) = {
            let mut session = handle.write().await;
            let start = session.join(player_id.clone());
            (start, session.len())
        };

        {
            let mut index = self.index.write().await;
            if !index.sessions.contains_key(session_id) {
                return Err(SessionError::SessionNotFound(session_id.clone()));
            }
            index.players.insert(player_id.clone(), session_id.clone());
        }

        tracing::info!(%session_id, %player_id, players = num_players, "player joined");

        Ok(JoinedSession {
            player_id,
            start_location,
            num_players,
        })
    }

    /// Finds the session a player belongs to.
    ///
    /// # Errors
    /// Returns [`SessionError::PlayerNotFound`] if the player is unknown.
    pub async fn resolve(&self, player_id: &PlayerId) -> Result<SessionHandle<E>, SessionError> {
        let index = self.index.read().await;
        index
            .players
            .get(player_id)
            .and_then(|session_id| index.sessions.get(session_id))
            .cloned()
            .ok_or_else(|| SessionError::PlayerNotFound(player_id.clone()))
    }

    /// Looks up a session by id.
    ///
    /// # Errors
    /// Returns [`SessionError::SessionNotFound`] if the session is unknown.
    pub async fn session(&self, session_id: &SessionId) -> Result<SessionHandle<E>, SessionError> {
        self.index
            .read()
            .await
            .sessions
            .get(session_id)
            .cloned()
            .ok_or_else(|| SessionError::SessionNotFound(session_id.clone()))
    }

    /// Removes a session and every player in it. Returns the removed players.
    ///
    /// Requests already holding the session's handle finish normally; new
    /// requests for its players get `PlayerNotFound`.
    ///
    /// # Errors
    /// Returns [`SessionError::SessionNotFound`] if the session is unknown.
    pub async fn evict(&self, session_id: &SessionId) -> Result<Vec<PlayerId>, SessionError> {
        let mut index = self.index.write().await;
        index
            .sessions
            .remove(session_id)
            .ok_or_else(|| SessionError::SessionNotFound(session_id.clone()))?;

        let mut removed = Vec::new();
        index.players.retain(|player_id, owner| {
            if owner == session_id {
                removed.push(player_id.clone());
                false
            } else {
                true
            }
        });

        tracing::info!(%session_id, players = removed.len(), "session evicted");
        Ok(removed)
    }

    /// Number of live sessions.
    pub async fn session_count(&self) -> usize {
        self.index.read().await.sessions.len()
    }

    /// Number of registered players across all sessions.
    pub async fn player_count(&self) -> usize {
        self.index.read().await.players.len()
    }
}
