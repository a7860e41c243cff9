//! Card game logic: trump-aware beating and "lowest card leads" ordering

use std::cmp::Ordering;

use super::cards_types::{Card, Suit};

pub fn hand_has_suit(hand: &[Card], suit: Suit) -> bool {
    hand.iter().any(|c| c.suit == suit)
}

/// Whether `defending` covers `attacking` under `trump`.
pub fn beats(defending: Card, attacking: Card, trump: Suit) -> bool {
    let d_trump = defending.suit == trump;
    let a_trump = attacking.suit == trump;
    if d_trump && a_trump {
        return defending.rank > attacking.rank;
    }
    if d_trump && !a_trump {
        return true;
    }
    if a_trump {
        return false;
    }
    // Neither is trump: only the same suit with a higher rank covers
    defending.suit == attacking.suit && defending.rank > attacking.rank
}

/// Orders cards for "lowest card leads".
///
/// Non-trump cards always come before trumps. Within the same trump status
/// only the rank matters, so two non-trump cards of the same rank are equal.
pub fn compare_for_lead(a: Card, b: Card, trump: Suit) -> Ordering {
    let a_trump = a.suit == trump;
    let b_trump = b.suit == trump;
    match (a_trump, b_trump) {
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        _ => a.rank.cmp(&b.rank),
    }
}

/// Lowest trump held in `hand`, if any.
pub fn lowest_trump(hand: &[Card], trump: Suit) -> Option<Card> {
    hand.iter()
        .copied()
        .filter(|c| c.suit == trump)
        .min_by_key(|c| c.rank)
}

/// Cards in `hand` that cover `attacking`, weakest first.
pub fn covering_cards(hand: &[Card], attacking: Card, trump: Suit) -> Vec<Card> {
    let mut v: Vec<Card> = hand
        .iter()
        .copied()
        .filter(|c| beats(*c, attacking, trump))
        .collect();
    v.sort_by(|a, b| compare_for_lead(*a, *b, trump).then_with(|| a.cmp(b)));
    v
}
