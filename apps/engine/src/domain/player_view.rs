//! Player view of game state - what information is visible to a player.
//!
//! A view is a copy scoped to one caller: their own hand in full, every
//! other hand as a count. It also carries the caller's legal actions so a
//! client never has to re-implement the rules to highlight playable cards.

use serde::Serialize;

use super::cards_types::{Card, Suit};
use super::game::Action;
use super::legal::legal_actions;
use super::state::{
    DrawStatus, EntityId, GameId, GameState, GameStatus, PlayerId, PlayerStatus, RoundResult,
    RoundStatus, Seat,
};
use crate::errors::domain::DomainError;

/// Public facts about one seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatView {
    pub seat: Seat,
    pub player_id: PlayerId,
    pub hand_count: usize,
    pub points: u32,
    pub status: PlayerStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrawView {
    pub id: EntityId,
    pub attacker: PlayerId,
    pub attacking: Card,
    pub defending: Option<Card>,
    pub status: DrawStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnView {
    pub id: EntityId,
    pub turn_no: u32,
    pub attacker: PlayerId,
    pub defender: PlayerId,
    pub draws: Vec<DrawView>,
    /// Attackers that are done adding cards.
    pub passed: Vec<PlayerId>,
}

/// Information visible to a player at a decision point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerView {
    pub game_id: GameId,
    pub game_status: GameStatus,
    /// Overall loser once the game is finished.
    pub fool: Option<PlayerId>,

    pub round_id: EntityId,
    pub round_no: u32,
    pub round_status: RoundStatus,
    pub trump: Suit,
    /// The revealed card; public even when it was dealt to a player.
    pub trump_card: Card,
    pub stock_count: usize,
    pub discarded_count: usize,

    /// Caller's seat and full hand.
    pub seat: Seat,
    pub hand: Vec<Card>,
    pub players: Vec<SeatView>,

    pub turn: Option<TurnView>,
    /// Who opens the next turn while no turn is active.
    pub next_attacker: Option<PlayerId>,
    pub last_round: Option<RoundResult>,

    /// What the caller may submit right now.
    pub legal: Vec<Action>,
}

impl PlayerView {
    /// Build the view for `player`. Fails with `NotFound` if they are not seated.
    pub fn for_player(state: &GameState, player: PlayerId) -> Result<Self, DomainError> {
        let seat = state.seat_of(player)?;
        let round = &state.round;
        let pid = |s: Seat| state.player_id(s).unwrap_or_default();

        let players = state
            .players
            .iter()
            .enumerate()
            .map(|(i, slot)| {
                let s = i as Seat;
                SeatView {
                    seat: s,
                    player_id: slot.player_id,
                    hand_count: round.hand(s).len(),
                    points: slot.points,
                    status: round.status_of(s),
                }
            })
            .collect();

        let turn = round.turn.as_ref().map(|t| TurnView {
            id: t.id,
            turn_no: t.turn_no,
            attacker: pid(t.attacker),
            defender: pid(t.defender),
            draws: t
                .draws
                .iter()
                .map(|d| DrawView {
                    id: d.id,
                    attacker: pid(d.attacker),
                    attacking: d.attacking,
                    defending: d.defending,
                    status: d.status,
                })
                .collect(),
            passed: t.passed.iter().map(|s| pid(*s)).collect(),
        });

        let next_attacker = match (state.status, round.status, &round.turn) {
            (GameStatus::Active, RoundStatus::Active, None) => state.player_id(round.next_attacker),
            _ => None,
        };

        Ok(Self {
            game_id: state.game_id,
            game_status: state.status,
            fool: state.fool.and_then(|s| state.player_id(s)),
            round_id: round.id,
            round_no: round.round_no,
            round_status: round.status,
            trump: round.trump,
            trump_card: round.trump_card,
            stock_count: round.stock.len(),
            discarded_count: round.discarded.len(),
            seat,
            hand: round.hand(seat).to_vec(),
            players,
            turn,
            next_attacker,
            last_round: state.history.last().cloned(),
            legal: legal_actions(state, player),
        })
    }
}
