//! Entity snapshot: the durable rows a storage or replication layer consumes.
//!
//! Every card of the game appears in exactly one `PlayerCardRow`.

use serde::Serialize;

use super::cards_types::{Card, Suit};
use super::settings::GameSettings;
use super::state::{
    DrawStatus, EntityId, GameId, GameState, GameStatus, PlayerId, RoundStatus, TurnStatus,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardLocation {
    Hand,
    Deck,
    Discarded,
    OnTable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRow {
    pub id: GameId,
    pub status: GameStatus,
    pub trump_suit: Suit,
    pub current_round_number: u32,
    pub settings: GameSettings,
    pub fool: Option<PlayerId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundRow {
    pub id: EntityId,
    pub game_id: GameId,
    pub round_number: u32,
    pub status: RoundStatus,
    pub loser: Option<PlayerId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnRow {
    pub id: EntityId,
    pub round_id: EntityId,
    pub turn_number: u32,
    pub attacker: PlayerId,
    pub defender: PlayerId,
    pub status: TurnStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrawRow {
    pub id: EntityId,
    pub turn_id: EntityId,
    pub attacker: PlayerId,
    pub attacking_card: Card,
    pub defending_card: Option<Card>,
    pub status: DrawStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerCardRow {
    /// Stable per card within the game.
    pub id: u8,
    pub game_id: GameId,
    /// Holder for Hand, placer for OnTable; none for Deck and Discarded.
    pub player: Option<PlayerId>,
    pub card: Card,
    pub location: CardLocation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerPointsRow {
    pub game_id: GameId,
    pub player: PlayerId,
    pub points: u32,
}

/// Complete durable representation of one game at a point in time.
///
/// Rounds cover the whole game; turns and draws cover the current round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntitySnapshot {
    pub game: GameRow,
    pub rounds: Vec<RoundRow>,
    pub turns: Vec<TurnRow>,
    pub draws: Vec<DrawRow>,
    pub player_cards: Vec<PlayerCardRow>,
    pub player_points: Vec<PlayerPointsRow>,
}

impl EntitySnapshot {
    pub fn capture(state: &GameState) -> Self {
        let game_id = state.game_id;
        let round = &state.round;
        let pid = |s| state.player_id(s).unwrap_or_default();

        let game = GameRow {
            id: game_id,
            status: state.status,
            trump_suit: round.trump,
            current_round_number: round.round_no,
            settings: state.settings,
            fool: state.fool.and_then(|s| state.player_id(s)),
        };

        let mut rounds: Vec<RoundRow> = state
            .history
            .iter()
            .filter(|r| r.round_id != round.id)
            .map(|r| RoundRow {
                id: r.round_id,
                game_id,
                round_number: r.round_no,
                status: RoundStatus::Finished,
                loser: r.loser.and_then(|s| state.player_id(s)),
            })
            .collect();
        rounds.push(RoundRow {
            id: round.id,
            game_id,
            round_number: round.round_no,
            status: round.status,
            loser: round.loser.and_then(|s| state.player_id(s)),
        });

        let mut turns = Vec::new();
        let mut draws = Vec::new();
        for t in round.turns.iter().chain(round.turn.iter()) {
            turns.push(TurnRow {
                id: t.id,
                round_id: round.id,
                turn_number: t.turn_no,
                attacker: pid(t.attacker),
                defender: pid(t.defender),
                status: t.status,
            });
            draws.extend(t.draws.iter().map(|d| DrawRow {
                id: d.id,
                turn_id: t.id,
                attacker: pid(d.attacker),
                attacking_card: d.attacking,
                defending_card: d.defending,
                status: d.status,
            }));
        }

        let mut player_cards = Vec::with_capacity(state.settings.deck_size.card_count());
        let mut push = |player: Option<PlayerId>, card: Card, location| {
            player_cards.push(PlayerCardRow {
                id: card.ordinal(),
                game_id,
                player,
                card,
                location,
            })
        };
        for (seat, hand) in round.hands.iter().enumerate() {
            for card in hand {
                push(state.player_id(seat as u8), *card, CardLocation::Hand);
            }
        }
        if let Some(t) = round.turn.as_ref() {
            for (seat, card) in t.table_cards() {
                push(state.player_id(seat), card, CardLocation::OnTable);
            }
        }
        for card in &round.stock {
            push(None, *card, CardLocation::Deck);
        }
        for card in &round.discarded {
            push(None, *card, CardLocation::Discarded);
        }
        player_cards.sort_by_key(|row| row.id);

        let player_points = state
            .players
            .iter()
            .map(|p| PlayerPointsRow {
                game_id,
                player: p.player_id,
                points: p.points,
            })
            .collect();

        Self {
            game,
            rounds,
            turns,
            draws,
            player_cards,
            player_points,
        }
    }

    /// Cards per location, for conservation checks.
    pub fn count_at(&self, location: CardLocation) -> usize {
        self.player_cards
            .iter()
            .filter(|r| r.location == location)
            .count()
    }
}
