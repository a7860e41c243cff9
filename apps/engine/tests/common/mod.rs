#![allow(dead_code)]


use durak_engine::domain::{Card, Deal, GameSettings, PlayerId, Seat};
use durak_engine::{GameRegistry, PlayerView};

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    engine_test_support::logging::init();
}

pub fn pid(seat: Seat) -> PlayerId {
    101 + seat as PlayerId
}

pub fn card(token: &str) -> Card {
    token
        .parse()
        .unwrap_or_else(|e| panic!("bad card {token}: {e}"))
}

pub fn cards(tokens: &[&str]) -> Vec<Card> {
    tokens.iter().map(|t| card(t)).collect()
}

/// Six cards a hand, trump card stays at the bottom of the stock.
pub fn six_card_settings() -> GameSettings {
    GameSettings::default()
        .with_starting_hand_size(6)
        .with_trump_card_to_player(false)
}

/// Deal with fixed hands; the rest of the deck forms the stock with
/// `trump_card` at the bottom.
pub fn rigged_deal(settings: &GameSettings, hands: &[&[&str]], trump_card: &str) -> Deal {
    let hands: Vec<Vec<Card>> = hands.iter().map(|h| cards(h)).collect();
    let trump_card = card(trump_card);
    let mut stock: Vec<Card> = settings
        .deck_size
        .cards()
        .into_iter()
        .filter(|c| *c != trump_card && !hands.iter().any(|h| h.contains(c)))
        .collect();
    stock.insert(0, trump_card);
    Deal::from_parts(hands, stock, trump_card)
}

/// Spades are trump; seat 0 holds the lowest trump and opens against seat 1.
pub const HEADS_UP: [&[&str]; 2] = [
    &["6H", "6C", "8D", "9S", "TC", "JD"],
    &["9H", "QC", "KD", "AS", "7D", "8C"],
];

/// Three seats; seat 0 opens with spades trump. Seats 0 and 2 both hold a
/// six to pile onto an opening 6H.
pub const THREE_WAY: [&[&str]; 3] = [
    &["6H", "6C", "6S", "9H", "TC", "JD"],
    &["7H", "8H", "KH", "QC", "KD", "7S"],
    &["6D", "7C", "8C", "9C", "9D", "8S"],
];

pub fn start_rigged(registry: &GameRegistry, settings: GameSettings, hands: &[&[&str]]) -> i64 {
    let players: Vec<PlayerId> = (0..hands.len() as Seat).map(pid).collect();
    let deal = rigged_deal(&settings, hands, "KS");
    registry
        .create_game_with_deal(&players, settings, 7, deal)
        .expect("rigged game starts")
}

pub fn turn_id(view: &PlayerView) -> u64 {
    view.turn.as_ref().expect("active turn").id
}
