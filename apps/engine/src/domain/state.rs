//! Game, round, turn and draw state owned by a single game controller.

use serde::{Deserialize, Serialize};

use super::cards_types::{Card, Rank, Suit};
use super::settings::GameSettings;
use crate::errors::domain::{DomainError, MoveKind, NotFoundKind};

pub type GameId = i64;
/// Caller identity supplied by the identity collaborator.
pub type PlayerId = i64;
/// Position at the table, fixed at game creation (0-based, clockwise).
pub type Seat = u8;
/// Identifier for rounds, turns and draws; unique within a game.
pub type EntityId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    Active,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundStatus {
    Active,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TurnStatus {
    Active,
    DefenderTook,
    DefenderBeat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DrawStatus {
    Pending,
    Beaten,
    Taken,
}

/// A player's standing within the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerStatus {
    /// In the rotation.
    Active,
    /// Emptied their hand after the stock ran out.
    Finished,
    /// Quit the game.
    Left,
}

/// One attack card and its optional cover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draw {
    pub id: EntityId,
    pub attacker: Seat,
    pub attacking: Card,
    pub defending: Option<Card>,
    pub status: DrawStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnState {
    pub id: EntityId,
    /// 1-based within the round.
    pub turn_no: u32,
    /// Player who opened the turn.
    pub attacker: Seat,
    pub defender: Seat,
    pub status: TurnStatus,
    pub draws: Vec<Draw>,
    /// Attackers in the order they first placed a card.
    pub attack_order: Vec<Seat>,
    /// Attackers who are done adding cards since the last attack.
    pub passed: Vec<Seat>,
    /// Seats whose hand ran out during this turn, in the order it happened.
    pub emptied: Vec<Seat>,
}

impl TurnState {
    pub fn has_pending(&self) -> bool {
        self.draws.iter().any(|d| d.status == DrawStatus::Pending)
    }

    pub fn pending_count(&self) -> usize {
        self.draws
            .iter()
            .filter(|d| d.status == DrawStatus::Pending)
            .count()
    }

    /// Whether `rank` appears on the table, on either side of any draw.
    pub fn rank_on_table(&self, rank: Rank) -> bool {
        self.draws
            .iter()
            .any(|d| d.attacking.rank == rank || d.defending.is_some_and(|c| c.rank == rank))
    }

    /// Every card on the table with the seat that placed it.
    pub fn table_cards(&self) -> Vec<(Seat, Card)> {
        let mut out = Vec::with_capacity(self.draws.len() * 2);
        for d in &self.draws {
            out.push((d.attacker, d.attacking));
            if let Some(card) = d.defending {
                out.push((self.defender, card));
            }
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundState {
    pub id: EntityId,
    /// 1-based.
    pub round_no: u32,
    pub status: RoundStatus,
    pub trump: Suit,
    pub trump_card: Card,
    /// Undealt cards; the last element is the top.
    pub stock: Vec<Card>,
    /// Hands indexed by seat.
    pub hands: Vec<Vec<Card>>,
    pub discarded: Vec<Card>,
    /// Indexed by seat.
    pub player_status: Vec<PlayerStatus>,
    /// The single active turn, if any.
    pub turn: Option<TurnState>,
    /// Closed turns of this round, oldest first.
    pub turns: Vec<TurnState>,
    /// Who opens the next turn.
    pub next_attacker: Seat,
    pub loser: Option<Seat>,
    /// First player to empty their hand.
    pub winner: Option<Seat>,
    pub finish_order: Vec<Seat>,
    /// Seats that quit during this round.
    pub left_this_round: Vec<Seat>,
}

impl RoundState {
    pub fn seat_count(&self) -> usize {
        self.hands.len()
    }

    pub fn hand(&self, seat: Seat) -> &[Card] {
        self.hands
            .get(seat as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn status_of(&self, seat: Seat) -> PlayerStatus {
        self.player_status
            .get(seat as usize)
            .copied()
            .unwrap_or(PlayerStatus::Left)
    }

    pub fn is_active(&self, seat: Seat) -> bool {
        self.status_of(seat) == PlayerStatus::Active
    }

    pub fn active_seats(&self) -> Vec<Seat> {
        (0..self.seat_count() as Seat)
            .filter(|s| self.is_active(*s))
            .collect()
    }

    /// Non-departed seats still holding cards.
    pub fn seats_with_cards(&self) -> Vec<Seat> {
        (0..self.seat_count() as Seat)
            .filter(|s| self.status_of(*s) != PlayerStatus::Left && !self.hand(*s).is_empty())
            .collect()
    }

    /// Next active seat strictly clockwise of `seat`.
    pub fn next_active_after(&self, seat: Seat) -> Option<Seat> {
        let n = self.seat_count();
        (1..n)
            .map(|step| ((seat as usize + step) % n) as Seat)
            .find(|s| self.is_active(*s))
    }

    /// `seat` itself if active, otherwise the next active seat clockwise.
    pub fn next_active_from(&self, seat: Seat) -> Option<Seat> {
        if self.is_active(seat) {
            Some(seat)
        } else {
            self.next_active_after(seat)
        }
    }

    /// Seats clockwise from `start` (inclusive), all of them once.
    pub fn clockwise_from(&self, start: Seat) -> impl Iterator<Item = Seat> {
        let n = self.seat_count();
        (0..n).map(move |step| ((start as usize + step) % n) as Seat)
    }

    pub fn active_turn(&self) -> Option<&TurnState> {
        self.turn.as_ref()
    }

    pub fn find_turn(&self, turn_id: EntityId) -> Option<&TurnState> {
        self.turn
            .iter()
            .chain(self.turns.iter())
            .find(|t| t.id == turn_id)
    }

    pub fn cards_on_table(&self) -> usize {
        self.turn
            .as_ref()
            .map(|t| t.table_cards().len())
            .unwrap_or(0)
    }
}

/// Per-player standing across the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSlot {
    pub player_id: PlayerId,
    /// Accumulated penalty points.
    pub points: u32,
    pub left: bool,
}

/// Summary of a finished round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub round_id: EntityId,
    pub round_no: u32,
    pub loser: Option<Seat>,
    pub winner: Option<Seat>,
    /// Points added this round, indexed by seat.
    pub points_awarded: Vec<u32>,
}

/// Entire game container, sufficient for pure domain operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub game_id: GameId,
    /// Base seed; each round's shuffle is derived from it.
    pub seed: u64,
    pub settings: GameSettings,
    /// Indexed by seat.
    pub players: Vec<PlayerSlot>,
    pub status: GameStatus,
    /// Overall loser, once the game is finished.
    pub fool: Option<Seat>,
    pub round: RoundState,
    /// Finished rounds, oldest first.
    pub history: Vec<RoundResult>,
    /// Final state of the round before the current one.
    pub previous_round: Option<Box<RoundState>>,
    pub(crate) next_entity_id: EntityId,
}

impl GameState {
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn seat_of(&self, player: PlayerId) -> Result<Seat, DomainError> {
        self.players
            .iter()
            .position(|p| p.player_id == player)
            .map(|i| i as Seat)
            .ok_or_else(|| {
                DomainError::not_found(
                    NotFoundKind::Player,
                    format!("Player {player} is not seated in game {}", self.game_id),
                )
            })
    }

    pub fn player_id(&self, seat: Seat) -> Option<PlayerId> {
        self.players.get(seat as usize).map(|p| p.player_id)
    }

    /// Players that have not quit the game.
    pub fn remaining_players(&self) -> usize {
        self.players.iter().filter(|p| !p.left).count()
    }

    pub(crate) fn allocate_id(&mut self) -> EntityId {
        let id = self.next_entity_id;
        self.next_entity_id += 1;
        id
    }

    /// Total cards across stock, hands, table and discard pile.
    pub fn card_total(&self) -> usize {
        self.round.stock.len()
            + self.round.hands.iter().map(Vec::len).sum::<usize>()
            + self.round.discarded.len()
            + self.round.cards_on_table()
    }
}

pub fn require_active_turn<'a>(
    round: &'a RoundState,
    ctx: &'static str,
) -> Result<&'a TurnState, DomainError> {
    round.turn.as_ref().ok_or_else(|| {
        DomainError::illegal(MoveKind::NoActiveTurn, format!("No active turn ({ctx})"))
    })
}

/// Resolve `turn_id` against the round: the active turn, or the reason it is not.
pub fn require_turn_id(round: &RoundState, turn_id: EntityId) -> Result<&TurnState, DomainError> {
    match round.turn.as_ref() {
        Some(t) if t.id == turn_id => Ok(t),
        _ if round.turns.iter().any(|t| t.id == turn_id) => Err(DomainError::illegal(
            MoveKind::TurnNotActive,
            format!("Turn {turn_id} is already closed"),
        )),
        _ => Err(DomainError::not_found(
            NotFoundKind::Turn,
            format!("Turn {turn_id} does not exist in round {}", round.round_no),
        )),
    }
}
