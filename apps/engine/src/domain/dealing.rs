//! Deterministic card dealing: shuffle, hands, trump, starting attacker.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use super::cards_logic::lowest_trump;
use super::cards_types::{Card, Suit};
use super::settings::GameSettings;
use crate::errors::domain::{ConfigKind, DomainError};

/// Outcome of dealing one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    /// One hand per dealt player, in seating order.
    pub hands: Vec<Vec<Card>>,
    /// Undealt cards. The last element is the top of the stock; the first is
    /// the revealed trump card when it stays in the deck.
    pub stock: Vec<Card>,
    /// The card that revealed the trump suit.
    pub trump_card: Card,
    pub trump: Suit,
    /// Index into `hands` of the player who opens the round.
    pub starting_attacker: usize,
}

impl Deal {
    /// Assemble a deal from explicit parts (rigged deals, replays).
    /// Trump and starting attacker are derived the same way `deal` does.
    pub fn from_parts(hands: Vec<Vec<Card>>, stock: Vec<Card>, trump_card: Card) -> Self {
        let trump = trump_card.suit;
        let starting_attacker = starting_attacker(&hands, trump);
        Self {
            hands,
            stock,
            trump_card,
            trump,
            starting_attacker,
        }
    }

    /// Check that hands plus stock are exactly the configured deck.
    pub fn validate(
        &self,
        settings: &GameSettings,
        player_count: usize,
    ) -> Result<(), DomainError> {
        if self.hands.len() != player_count {
            return Err(DomainError::configuration(
                ConfigKind::InvalidDeal,
                format!(
                    "Deal has {} hands for {player_count} players",
                    self.hands.len()
                ),
            ));
        }
        let mut dealt: Vec<Card> = self
            .hands
            .iter()
            .flatten()
            .chain(self.stock.iter())
            .copied()
            .collect();
        dealt.sort();
        let mut expected = settings.deck_size.cards();
        expected.sort();
        if dealt != expected {
            return Err(DomainError::configuration(
                ConfigKind::InvalidDeal,
                "Deal is not a permutation of the deck",
            ));
        }
        if !dealt.contains(&self.trump_card) || self.trump != self.trump_card.suit {
            return Err(DomainError::configuration(
                ConfigKind::InvalidDeal,
                format!("Trump card {} is not part of the deal", self.trump_card),
            ));
        }
        if self.starting_attacker >= player_count {
            return Err(DomainError::configuration(
                ConfigKind::InvalidDeal,
                "Starting attacker out of range",
            ));
        }
        Ok(())
    }
}

/// Fisher-Yates shuffle driven by a seeded ChaCha stream.
fn shuffle_with_seed(deck: &mut [Card], seed: u64) {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    deck.shuffle(&mut rng);
}

/// Deal a round for `player_count` players.
///
/// Cards are dealt one at a time round-robin from the top of the shuffled
/// deck. The bottom card reveals trump; with `trump_card_to_player` it is
/// handed to the last player instead of staying in the stock. When the hands
/// use the whole deck the last dealt card reveals trump.
pub fn deal(player_count: usize, settings: &GameSettings, seed: u64) -> Result<Deal, DomainError> {
    settings.validate_for_players(player_count)?;

    let mut deck = settings.deck_size.cards();
    shuffle_with_seed(&mut deck, seed);

    let mut hands: Vec<Vec<Card>> = vec![Vec::new(); player_count];
    let mut last_dealt = None;
    for _ in 0..settings.starting_hand_size {
        for hand in hands.iter_mut() {
            let card = deck
                .pop()
                .ok_or_else(|| DomainError::invariant("deck exhausted while dealing"))?;
            hand.push(card);
            last_dealt = Some(card);
        }
    }

    let trump_card = if deck.is_empty() {
        last_dealt.ok_or_else(|| DomainError::invariant("nothing was dealt"))?
    } else if settings.trump_card_to_player {
        let card = deck.remove(0);
        if let Some(last) = hands.last_mut() {
            last.push(card);
        }
        card
    } else {
        deck[0]
    };

    for hand in hands.iter_mut() {
        hand.sort();
    }

    Ok(Deal::from_parts(hands, deck, trump_card))
}

/// Player holding the lowest trump; failing that, the lowest rank overall.
/// Ties go to the earlier seat.
pub fn starting_attacker(hands: &[Vec<Card>], trump: Suit) -> usize {
    let by_trump = hands
        .iter()
        .enumerate()
        .filter_map(|(i, h)| lowest_trump(h, trump).map(|c| (c.rank, i)))
        .min();
    if let Some((_, seat)) = by_trump {
        return seat;
    }
    hands
        .iter()
        .enumerate()
        .filter_map(|(i, h)| h.iter().map(|c| c.rank).min().map(|r| (r, i)))
        .min()
        .map(|(_, seat)| seat)
        .unwrap_or(0)
}
