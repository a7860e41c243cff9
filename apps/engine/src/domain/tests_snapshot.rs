//! Entity snapshots and per-player views.

use crate::domain::snapshot::CardLocation;
use crate::domain::test_state_helpers::*;
use crate::domain::{Action, EntitySnapshot, GameSettings, GameState, PlayerView, Suit};
use crate::errors::domain::{DomainError, NotFoundKind};

fn mid_turn() -> GameState {
    let s = table(
        GameSettings::default(),
        &[&["7H", "8C"], &["TH", "9D", "6C"], &["QC"]],
        &["6S", "AC"],
        Suit::Spades,
        0,
    );
    let s = attack(&s, 0, "7H", 1);
    defend(&s, 1, "TH")
}

#[test]
fn snapshot_covers_every_card_once() {
    let s = mid_turn();
    let snap = EntitySnapshot::capture(&s);
    assert_eq!(snap.player_cards.len(), 36);
    assert_eq!(snap.count_at(CardLocation::OnTable), 2);
    assert_eq!(snap.count_at(CardLocation::Deck), 2);
    assert_eq!(snap.count_at(CardLocation::Hand), 4);
    assert_eq!(snap.count_at(CardLocation::Discarded), 28);

    let placed_th = snap
        .player_cards
        .iter()
        .find(|r| r.card == c("TH"))
        .unwrap();
    assert_eq!(placed_th.location, CardLocation::OnTable);
    assert_eq!(placed_th.player, Some(pid(1)));
}

#[test]
fn snapshot_rows_match_entities() {
    let s = mid_turn();
    let snap = EntitySnapshot::capture(&s);
    assert_eq!(snap.game.id, GAME_ID);
    assert_eq!(snap.game.trump_suit, Suit::Spades);
    assert_eq!(snap.game.current_round_number, 1);
    assert_eq!(snap.rounds.len(), 1);
    assert_eq!(snap.turns.len(), 1);
    assert_eq!(snap.draws.len(), 1);
    assert_eq!(snap.draws[0].turn_id, snap.turns[0].id);
    assert_eq!(snap.draws[0].defending_card, Some(c("TH")));
    assert_eq!(snap.player_points.len(), 3);
}

#[test]
fn snapshot_lists_scored_rounds() {
    let s = table(
        GameSettings::default(),
        &[&["7H"], &["8C", "9C"]],
        &[],
        Suit::Spades,
        0,
    );
    let s = attack(&s, 0, "7H", 1);
    let s = take(&s, 1);
    let snap = EntitySnapshot::capture(&s);
    assert_eq!(snap.rounds.len(), 2);
    assert_eq!(snap.rounds[0].loser, Some(pid(1)));
    assert_eq!(snap.player_points[1].points, 5);
}

#[test]
fn view_hides_other_hands() {
    let s = mid_turn();
    let view = PlayerView::for_player(&s, pid(0)).unwrap();
    assert_eq!(view.hand, cards(&["8C"]));
    assert_eq!(view.players[1].hand_count, 2);
    assert_eq!(view.players[2].hand_count, 1);
    assert_eq!(view.stock_count, 2);

    let json = serde_json::to_string(&view).unwrap();
    assert!(!json.contains("\"9D\""));
    assert!(!json.contains("\"QC\""));
    // Table cards are public
    assert!(json.contains("\"TH\""));
}

#[test]
fn view_carries_legal_actions() {
    let s = mid_turn();
    let view = PlayerView::for_player(&s, pid(2)).unwrap();
    assert_eq!(view.legal, vec![Action::Pass]);
    let turn = view.turn.unwrap();
    assert_eq!(turn.attacker, pid(0));
    assert_eq!(turn.defender, pid(1));
    assert!(view.next_attacker.is_none());
}

#[test]
fn view_for_stranger_is_not_found() {
    let s = mid_turn();
    let err = PlayerView::for_player(&s, 12345).unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Player, _)));
}
