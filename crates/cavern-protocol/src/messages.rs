//! JSON bodies exchanged over HTTP.
//!
//! Field names are camelCase on the wire (`gameId`, `targetCave`,
//! `currentPlayer`) to match the browser clients. Map-carrying replies are
//! generic over the engine's map representation `M`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{CaveId, Perception, PlayerId, PlayerStatus, ProtocolError, SessionId, TurnResult};

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Body of `POST /api/game/{playerId}/move` and `/shoot`.
///
/// `targetCave` is kept as a raw JSON value until [`target`](Self::target)
/// is called, so that a bad target is reported as a game-level
/// "invalid input" rather than a framework deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRequest {
    /// The cave to move into or shoot at.
    #[serde(default)]
    pub target_cave: Option<Value>,
}

impl ActionRequest {
    /// A request targeting the given JSON value.
    pub fn with_target(target: impl Into<Value>) -> Self {
        Self {
            target_cave: Some(target.into()),
        }
    }

    /// Parses a raw request body. An empty body is an empty request.
    ///
    /// Anything else must be a JSON object; unknown fields are ignored.
    pub fn from_body(body: &[u8]) -> Result<Self, ProtocolError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        let value: Value =
            serde_json::from_slice(body).map_err(|e| ProtocolError::MalformedBody(e.to_string()))?;
        match value {
            Value::Object(mut fields) => Ok(Self {
                target_cave: fields.remove("targetCave"),
            }),
            other => Err(ProtocolError::MalformedBody(format!(
                "expected a JSON object, got {other}"
            ))),
        }
    }

    /// Returns the target cave as a number.
    ///
    /// Accepts a JSON integer (`4`) or a string of digits (`"4"`).
    /// Anything else, including negative or fractional numbers, is
    /// rejected. Range checking against the map is the caller's job.
    pub fn target(&self) -> Result<CaveId, ProtocolError> {
        match &self.target_cave {
            None | Some(Value::Null) => Err(ProtocolError::MissingTarget),
            Some(Value::Number(n)) => n
                .as_u64()
                .and_then(|v| CaveId::try_from(v).ok())
                .ok_or_else(|| ProtocolError::InvalidTarget(n.to_string())),
            Some(Value::String(s)) => {
                let digits = s.trim();
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(ProtocolError::InvalidTarget(format!("{s:?}")));
                }
                digits
                    .parse::<CaveId>()
                    .map_err(|_| ProtocolError::InvalidTarget(format!("{s:?}")))
            }
            Some(other) => Err(ProtocolError::InvalidTarget(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Replies
// ---------------------------------------------------------------------------

/// Reply to `POST /api/game/create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameResponse {
    pub game_id: SessionId,
    pub player_id: PlayerId,
    pub start_location: CaveId,
    pub num_caves: usize,
    /// Always the creator: a new session starts on its first player.
    pub current_player: PlayerId,
}

/// Reply to `POST /api/game/{gameId}/join`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinGameResponse {
    pub player_id: PlayerId,
    pub start_location: CaveId,
    /// Party size including the player who just joined.
    pub num_players: usize,
}

/// Reply to `GET /api/game/{playerId}/status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse<M> {
    pub status: PlayerStatus,
    pub location: CaveId,
    pub arrows: u32,
    pub perceptions: Vec<Perception>,
    pub map: M,
    pub message: String,
    pub current_player: PlayerId,
}

/// Reply to `GET /api/game/{playerId}/map`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapResponse<M> {
    pub map: M,
}

/// Reply to move, shoot and pass: the engine's result plus whose turn it
/// is now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    #[serde(flatten)]
    pub result: TurnResult,
    pub current_player: PlayerId,
}

/// Body of every non-2xx reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: String,
    /// HTTP status code, repeated for clients that only see the body.
    pub status: u16,
    /// Machine-readable error kind (`not_found`, `turn_violation`, ...).
    pub kind: String,
    /// The player whose turn it is, when that is relevant to the error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_player: Option<PlayerId>,
}
