//! `CavernServer` builder and server loop.
//!
//! This is the entry point for running a Cavern game server. It ties the
//! layers together: HTTP → session core → engine.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use cavern_engine::{CaveHunt, GameEngine};
use cavern_protocol::{IdSource, UuidIds};
use cavern_session::{GameService, Registry};
use tokio::net::TcpListener;

use crate::CavernError;
use crate::router::build_router;
use crate::state::AppState;

/// Builder for configuring and starting a Cavern server.
///
/// # Example
///
/// ```rust,ignore
/// use cavern::prelude::*;
///
/// let server = CavernServer::builder()
///     .bind("0.0.0.0:8080")
///     .build::<CaveHunt>(CaveConfig::default())
///     .await?;
/// server.run().await
/// ```
pub struct CavernServerBuilder {
    bind_addr: String,
    ids: Arc<dyn IdSource>,
}

impl CavernServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: crate::config::DEFAULT_BIND.to_string(),
            ids: Arc::new(UuidIds),
        }
    }

    /// Sets the address to bind the server to. Port 0 picks a free port.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Replaces the default UUID id source.
    pub fn id_source(mut self, ids: Arc<dyn IdSource>) -> Self {
        self.ids = ids;
        self
    }

    /// Validates the engine configuration, binds the listener, and
    /// assembles the server.
    ///
    /// # Errors
    ///
    /// - [`CavernError::Session`] if the engine rejects `engine_config`.
    /// - [`CavernError::Server`] if the address cannot be bound.
    pub async fn build<E: GameEngine>(
        self,
        engine_config: E::Config,
    ) -> Result<CavernServer<E>, CavernError> {
        let registry = Registry::<E>::new(engine_config, self.ids)?;
        let state = Arc::new(AppState::new(GameService::new(registry)));
        let router = build_router(Arc::clone(&state));

        let listener = TcpListener::bind(&self.bind_addr)
            .await
            .map_err(|e| ServerError::Bind(format!("bind failed on {}: {e}", self.bind_addr)))?;

        Ok(CavernServer {
            listener,
            router,
            state,
        })
    }
}

impl Default for CavernServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A bound Cavern server.
///
/// Call [`run()`](Self::run) to start serving requests.
pub struct CavernServer<E: GameEngine = CaveHunt> {
    listener: TcpListener,
    router: Router,
    state: Arc<AppState<E>>,
}

impl CavernServer {
    /// Creates a new builder.
    pub fn builder() -> CavernServerBuilder {
        CavernServerBuilder::new()
    }
}

impl<E: GameEngine> CavernServer<E> {
    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// The service behind the routes, for eviction and inspection.
    ///
    /// Calls made through it share state with HTTP requests.
    pub fn service(&self) -> &GameService<E> {
        &self.state.service
    }

    /// Serves requests until Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns [`CavernError::Server`] if serving fails with an I/O error.
    pub async fn run(self) -> Result<(), CavernError> {
        let addr = self.local_addr().ok();
        tracing::info!(?addr, "Cavern server listening");

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Serve(e.to_string()))?;

        tracing::info!("Cavern server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(e) => {
            tracing::error!(error = %e, "cannot listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}

/// Errors that can occur when starting or running the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Failed to bind to the network address.
    #[error("bind error: {0}")]
    Bind(String),

    /// The server encountered a fatal error while serving.
    #[error("serve error: {0}")]
    Serve(String),
}
