use serde::{Deserialize, Serialize};

use crate::domain::{Action, Card, EntityId, GameId, PlayerId};

/// A command as submitted by a client. The caller's identity comes from
/// the authenticated session, never from the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientCommand {
    Attack {
        game_id: GameId,
        card: Card,
        target: PlayerId,
    },
    Defend {
        game_id: GameId,
        turn_id: EntityId,
        card: Card,
    },
    TakeCards {
        game_id: GameId,
        turn_id: EntityId,
    },
    PassTurn {
        game_id: GameId,
    },
    Leave {
        game_id: GameId,
    },
}

impl ClientCommand {
    pub fn game_id(&self) -> GameId {
        match *self {
            ClientCommand::Attack { game_id, .. }
            | ClientCommand::Defend { game_id, .. }
            | ClientCommand::TakeCards { game_id, .. }
            | ClientCommand::PassTurn { game_id }
            | ClientCommand::Leave { game_id } => game_id,
        }
    }

    pub fn into_action(self) -> Action {
        match self {
            ClientCommand::Attack { card, target, .. } => Action::Attack { card, target },
            ClientCommand::Defend { turn_id, card, .. } => Action::Defend { turn_id, card },
            ClientCommand::TakeCards { turn_id, .. } => Action::Take { turn_id },
            ClientCommand::PassTurn { .. } => Action::Pass,
            ClientCommand::Leave { .. } => Action::Leave,
        }
    }
}
