//! Error types for the protocol layer.
//!
//! Each crate in Cavern defines its own error enum. A `ProtocolError`
//! always means "the request body was not something we understand",
//! never a game rule or a lookup failure.

/// Errors that can occur while parsing request bodies.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    /// The body is not valid JSON, or not a JSON object.
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    /// `targetCave` is absent from the body.
    #[error("targetCave is required")]
    MissingTarget,

    /// `targetCave` is present but is not a non-negative integer.
    #[error("targetCave must be a cave number, got {0}")]
    InvalidTarget(String),
}
