//! Error types for the session core.

use std::fmt;

use cavern_engine::EngineError;
use cavern_protocol::{PlayerId, ProtocolError, SessionId};

/// Errors that can occur while routing a request to a session.
///
/// None of these are fatal and none are retried: each is reported to the
/// caller that caused it, and no shared state has been touched by then.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// No session exists with this id.
    #[error("game {0} not found")]
    SessionNotFound(SessionId),

    /// No player exists with this id.
    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),

    /// The player has been eliminated and may no longer act.
    #[error("you are dead")]
    Eliminated(PlayerId),

    /// The player tried to act while it is someone else's turn.
    #[error("it is not your turn; current player is {current}")]
    TurnViolation {
        /// Who tried to act.
        player: PlayerId,
        /// Who is entitled to act.
        current: PlayerId,
    },

    /// The request carried a missing, non-numeric, or out-of-range target.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The engine refused the action. The turn did not advance.
    #[error("{message}")]
    EngineRejected {
        /// The engine's explanation.
        message: String,
        /// Who still holds the turn.
        current: PlayerId,
    },

    /// The engine configuration is unusable.
    #[error(transparent)]
    Config(#[from] EngineError),
}

impl From<ProtocolError> for SessionError {
    fn from(err: ProtocolError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

impl SessionError {
    /// The structured kind of this error, for callers that branch on it.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SessionNotFound(_) | Self::PlayerNotFound(_) => ErrorKind::NotFound,
            Self::Eliminated(_) => ErrorKind::Eliminated,
            Self::TurnViolation { .. } => ErrorKind::TurnViolation,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::EngineRejected { .. } => ErrorKind::EngineRejected,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// The player whose turn it is, for errors where that matters.
    pub fn current_player(&self) -> Option<&PlayerId> {
        match self {
            Self::TurnViolation { current, .. } | Self::EngineRejected { current, .. } => {
                Some(current)
            }
            _ => None,
        }
    }
}

/// Coarse classification of [`SessionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unknown player or session.
    NotFound,
    /// Dead player attempting an action.
    Eliminated,
    /// Acting out of turn.
    TurnViolation,
    /// Unparseable or out-of-range input.
    InvalidInput,
    /// The engine rejected the action.
    EngineRejected,
    /// Bad engine configuration.
    Config,
}

impl ErrorKind {
    /// Snake-case name used in error replies.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Eliminated => "eliminated",
            Self::TurnViolation => "turn_violation",
            Self::InvalidInput => "invalid_input",
            Self::EngineRejected => "engine_rejected",
            Self::Config => "config",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_violation_message_names_current_player() {
        let err = SessionError::TurnViolation {
            player: PlayerId::from("b"),
            current: PlayerId::from("a"),
        };
        assert_eq!(err.to_string(), "it is not your turn; current player is a");
        assert_eq!(err.current_player(), Some(&PlayerId::from("a")));
    }

    #[test]
    fn test_eliminated_message_is_you_are_dead() {
        let err = SessionError::Eliminated(PlayerId::from("a"));
        assert_eq!(err.to_string(), "you are dead");
        assert_eq!(err.kind(), ErrorKind::Eliminated);
    }

    #[test]
    fn test_protocol_error_becomes_invalid_input() {
        let err: SessionError = ProtocolError::MissingTarget.into();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_both_lookups_are_not_found() {
        assert_eq!(
            SessionError::SessionNotFound(SessionId("g".into())).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            SessionError::PlayerNotFound(PlayerId::from("p")).kind(),
            ErrorKind::NotFound
        );
    }
}
