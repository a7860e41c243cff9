use serde::Serialize;

use crate::domain::{GameId, GameTransition, PlayerView};
use crate::error::{EngineError, Rejection};
use crate::errors::ErrorCode;

pub const PROTOCOL_VERSION: i32 = 1;

/// Replies and pushes sent to a client.
#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    /// Caller-scoped state after an accepted command or on request.
    GameState { game_id: GameId, view: PlayerView },
    /// Something changed in a game the client follows.
    Transition {
        game_id: GameId,
        transition: GameTransition,
    },
    /// The command was not applied.
    Error {
        #[serde(flatten)]
        rejection: Rejection,
    },
}

impl ServerMsg {
    pub fn from_result(game_id: GameId, result: Result<PlayerView, EngineError>) -> Self {
        match result {
            Ok(view) => ServerMsg::GameState { game_id, view },
            Err(err) => ServerMsg::Error {
                rejection: err.rejection(),
            },
        }
    }

    /// Reply for a payload that could not be decoded at all.
    pub fn bad_request(detail: impl Into<String>) -> Self {
        ServerMsg::Error {
            rejection: Rejection {
                code: ErrorCode::BadRequest.as_str(),
                detail: detail.into(),
                resync: false,
            },
        }
    }
}
