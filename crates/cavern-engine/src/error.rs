//! Error types for the engine layer.

/// Errors raised while setting up an engine.
///
/// Engines never fail once running: rejected actions are reported as an
/// `Outcome::Error` turn result, not as a Rust error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The configuration cannot produce a playable map.
    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),
}
