//! Transitions derived from a before/after pair of game states.

use serde::Serialize;

use super::cards_types::Suit;
use super::state::{EntityId, GameState, GameStatus, PlayerId, RoundState, TurnStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameTransition {
    /// Explicit: user quit the game
    PlayerLeft { player_id: PlayerId },

    /// Edge-triggered: a turn reached DefenderBeat or DefenderTook
    TurnEnded {
        turn_id: EntityId,
        status: TurnStatus,
    },

    /// Edge-triggered: a round was scored
    RoundEnded {
        round_no: u32,
        loser: Option<PlayerId>,
    },

    /// Edge-triggered: Game moved from Active -> Finished
    GameEnded { fool: Option<PlayerId> },

    /// Edge-triggered: a new round was dealt
    RoundStarted {
        round_no: u32,
        trump: Suit,
        starting_attacker: PlayerId,
    },

    /// Edge-triggered: an attacker opened a turn
    TurnStarted {
        turn_id: EntityId,
        attacker: PlayerId,
        defender: PlayerId,
    },
}

/// Derive domain transitions from before/after state.
pub fn derive_game_transitions(before: &GameState, after: &GameState) -> Vec<GameTransition> {
    let mut transitions = Vec::new();
    let pid = |s| after.player_id(s).unwrap_or_default();

    // 1. Departures
    for (b, a) in before.players.iter().zip(&after.players) {
        if !b.left && a.left {
            transitions.push(GameTransition::PlayerLeft {
                player_id: a.player_id,
            });
        }
    }

    // 2. Turns closed in the round that was live before
    let before_round_after: Option<&RoundState> = if before.round.id == after.round.id {
        Some(&after.round)
    } else {
        after
            .previous_round
            .as_deref()
            .filter(|r| r.id == before.round.id)
    };
    if let Some(round) = before_round_after {
        for t in &round.turns {
            if !before.round.turns.iter().any(|bt| bt.id == t.id) {
                transitions.push(GameTransition::TurnEnded {
                    turn_id: t.id,
                    status: t.status,
                });
            }
        }
    }

    // 3. Rounds scored
    for r in after.history.iter().skip(before.history.len()) {
        transitions.push(GameTransition::RoundEnded {
            round_no: r.round_no,
            loser: r.loser.and_then(|s| after.player_id(s)),
        });
    }

    // 4. Game end
    if before.status == GameStatus::Active && after.status == GameStatus::Finished {
        transitions.push(GameTransition::GameEnded {
            fool: after.fool.and_then(|s| after.player_id(s)),
        });
    }

    // 5. New round
    if after.round.id != before.round.id {
        transitions.push(GameTransition::RoundStarted {
            round_no: after.round.round_no,
            trump: after.round.trump,
            starting_attacker: pid(after.round.next_attacker),
        });
    }

    // 6. New turn
    if let Some(t) = after.round.turn.as_ref() {
        if before.round.turn.as_ref().map(|bt| bt.id) != Some(t.id) {
            transitions.push(GameTransition::TurnStarted {
                turn_id: t.id,
                attacker: pid(t.attacker),
                defender: pid(t.defender),
            });
        }
    }

    transitions
}
