//! Unified error type for the Cavern server.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cavern_protocol::{ErrorResponse, PlayerId};
use cavern_session::{ErrorKind, SessionError};

use crate::server::ServerError;

/// Top-level error for the server.
///
/// Handlers return this and let [`IntoResponse`] turn it into a JSON
/// error reply. Body, engine and config failures reach it already folded
/// into [`SessionError`] by the session core.
#[derive(Debug, thiserror::Error)]
pub enum CavernError {
    /// A lookup, gate, or turn failure from the session core.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Binding or serving failed.
    #[error(transparent)]
    Server(#[from] ServerError),

    /// An environment variable held an unusable value.
    #[error("configuration error: {0}")]
    Config(String),
}

impl CavernError {
    /// The HTTP status this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Session(err) => match err.kind() {
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::TurnViolation => StatusCode::FORBIDDEN,
                ErrorKind::Eliminated | ErrorKind::InvalidInput | ErrorKind::EngineRejected => {
                    StatusCode::BAD_REQUEST
                }
                ErrorKind::Config => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Server(_) | Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable kind for the `kind` field of error replies.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Session(err) => err.kind().as_str(),
            Self::Config(_) => ErrorKind::Config.as_str(),
            Self::Server(_) => "internal",
        }
    }

    fn current_player(&self) -> Option<&PlayerId> {
        match self {
            Self::Session(err) => err.current_player(),
            _ => None,
        }
    }
}

impl IntoResponse for CavernError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }

        let body = ErrorResponse {
            error: self.to_string(),
            status: status.as_u16(),
            kind: self.kind().to_string(),
            current_player: self.current_player().cloned(),
        };

        (status, Json(body)).into_response()
    }
}
