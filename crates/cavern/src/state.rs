//! Shared application state for the HTTP layer.

use cavern_engine::GameEngine;
use cavern_session::GameService;

/// Everything a handler needs, shared behind an `Arc`.
///
/// The service owns the registry; there is exactly one per server.
pub struct AppState<E: GameEngine> {
    /// Entry point into the session core.
    pub service: GameService<E>,
}

impl<E: GameEngine> AppState<E> {
    /// Wraps a service.
    pub fn new(service: GameService<E>) -> Self {
        Self { service }
    }
}
