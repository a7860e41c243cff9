//! Per-game rule options, captured once at game creation.

use serde::{Deserialize, Serialize};

use super::cards_types::DeckSize;
use crate::errors::domain::{ConfigKind, DomainError};

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 6;

pub const DEFAULT_STARTING_HAND_SIZE: u8 = 7;
pub const DEFAULT_MAX_ATTACK_CARDS: u8 = 6;
pub const DEFAULT_MAX_POINTS: u32 = 15;

pub const MIN_HAND_SIZE: u8 = 3;
pub const MAX_HAND_SIZE: u8 = 20;
pub const MIN_MAX_POINTS: u32 = 5;
pub const MAX_MAX_POINTS: u32 = 50;

/// Immutable rule configuration threaded by value into every component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub deck_size: DeckSize,
    /// Initial and refill target.
    pub starting_hand_size: u8,
    /// Cap on attack cards per turn; 0 = unbounded.
    pub max_attack_cards: u8,
    pub multi_round_mode: bool,
    /// Overall-loser threshold in multi-round mode.
    pub max_points: u32,
    /// Whether non-current attackers may join an attack.
    pub anyone_can_attack: bool,
    /// Whether the revealed trump card is dealt to the last player.
    pub trump_card_to_player: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            deck_size: DeckSize::Standard36,
            starting_hand_size: DEFAULT_STARTING_HAND_SIZE,
            max_attack_cards: DEFAULT_MAX_ATTACK_CARDS,
            multi_round_mode: true,
            max_points: DEFAULT_MAX_POINTS,
            anyone_can_attack: true,
            trump_card_to_player: true,
        }
    }
}

impl GameSettings {
    pub fn with_deck_size(mut self, deck_size: DeckSize) -> Self {
        self.deck_size = deck_size;
        self
    }

    pub fn with_starting_hand_size(mut self, n: u8) -> Self {
        self.starting_hand_size = n;
        self
    }

    pub fn with_max_attack_cards(mut self, n: u8) -> Self {
        self.max_attack_cards = n;
        self
    }

    pub fn with_multi_round_mode(mut self, on: bool) -> Self {
        self.multi_round_mode = on;
        self
    }

    pub fn with_max_points(mut self, points: u32) -> Self {
        self.max_points = points;
        self
    }

    pub fn with_anyone_can_attack(mut self, on: bool) -> Self {
        self.anyone_can_attack = on;
        self
    }

    pub fn with_trump_card_to_player(mut self, on: bool) -> Self {
        self.trump_card_to_player = on;
        self
    }

    /// Whether `draw_count` attack cards already fill the table.
    pub fn attack_limit_reached(&self, draw_count: usize) -> bool {
        self.max_attack_cards > 0 && draw_count >= self.max_attack_cards as usize
    }

    /// Range checks that do not depend on the table.
    pub fn validate(&self) -> Result<(), DomainError> {
        if !(MIN_HAND_SIZE..=MAX_HAND_SIZE).contains(&self.starting_hand_size) {
            return Err(DomainError::configuration(
                ConfigKind::HandSizeOutOfRange,
                format!(
                    "Starting hand size must be {MIN_HAND_SIZE}..={MAX_HAND_SIZE}, got {}",
                    self.starting_hand_size
                ),
            ));
        }
        if !(MIN_MAX_POINTS..=MAX_MAX_POINTS).contains(&self.max_points) {
            return Err(DomainError::configuration(
                ConfigKind::MaxPointsOutOfRange,
                format!(
                    "Max points must be {MIN_MAX_POINTS}..={MAX_MAX_POINTS}, got {}",
                    self.max_points
                ),
            ));
        }
        Ok(())
    }

    /// Full validation for a table of `player_count` players.
    pub fn validate_for_players(&self, player_count: usize) -> Result<(), DomainError> {
        if player_count < MIN_PLAYERS {
            return Err(DomainError::configuration(
                ConfigKind::TooFewPlayers,
                format!("At least {MIN_PLAYERS} players required, got {player_count}"),
            ));
        }
        if player_count > MAX_PLAYERS {
            return Err(DomainError::configuration(
                ConfigKind::TooManyPlayers,
                format!("At most {MAX_PLAYERS} players allowed, got {player_count}"),
            ));
        }
        self.validate()?;
        let needed = self.starting_hand_size as usize * player_count;
        if needed > self.deck_size.card_count() {
            return Err(DomainError::configuration(
                ConfigKind::DeckTooSmall,
                format!(
                    "{player_count} hands of {} need {needed} cards, deck has {}",
                    self.starting_hand_size,
                    self.deck_size.card_count()
                ),
            ));
        }
        Ok(())
    }
}
