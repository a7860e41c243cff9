// Proptest generators for domain types.
// Settings are generated valid by construction for up to four players.

use proptest::prelude::*;

use crate::domain::{Card, DeckSize, GameSettings, Rank, Suit};

pub fn suit() -> impl Strategy<Value = Suit> {
    prop_oneof![
        Just(Suit::Clubs),
        Just(Suit::Diamonds),
        Just(Suit::Hearts),
        Just(Suit::Spades),
    ]
}

pub fn rank() -> impl Strategy<Value = Rank> {
    (0usize..13).prop_map(|i| Rank::ALL[i])
}

pub fn card() -> impl Strategy<Value = Card> {
    (suit(), rank()).prop_map(|(suit, rank)| Card { suit, rank })
}

/// Two different cards
pub fn two_distinct_cards() -> impl Strategy<Value = (Card, Card)> {
    (card(), card()).prop_filter("cards must differ", |(a, b)| a != b)
}

pub fn deck_size() -> impl Strategy<Value = DeckSize> {
    prop_oneof![Just(DeckSize::Standard36), Just(DeckSize::Extended52)]
}

/// Valid settings for 2..=4 players
pub fn settings() -> impl Strategy<Value = GameSettings> {
    (
        deck_size(),
        3u8..=6,
        0u8..=6,
        any::<bool>(),
        5u32..=20,
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(
            |(deck, hand, max_attack, multi, max_points, anyone, trump_to_player)| {
                GameSettings::default()
                    .with_deck_size(deck)
                    .with_starting_hand_size(hand)
                    .with_max_attack_cards(max_attack)
                    .with_multi_round_mode(multi)
                    .with_max_points(max_points)
                    .with_anyone_can_attack(anyone)
                    .with_trump_card_to_player(trump_to_player)
            },
        )
}

pub fn player_count() -> impl Strategy<Value = usize> {
    2usize..=4
}

/// Choice stream for driving random games
pub fn choices() -> impl Strategy<Value = Vec<u16>> {
    prop::collection::vec(any::<u16>(), 64..256)
}
