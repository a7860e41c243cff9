//! Round controller and game controller flow.

use crate::domain::dealing::starting_attacker;
use crate::domain::state::{PlayerStatus, RoundStatus};
use crate::domain::test_state_helpers::*;
use crate::domain::{GameSettings, GameState, GameStatus, Suit};

/// Seat 0 sheds its last card, seat 1 takes it and is left holding cards.
fn seat_one_loses(state: &GameState) -> GameState {
    let mut s = state.clone();
    relayout(&mut s, &[&["7H"], &["8C", "9C"]], &[], Suit::Spades, 0);
    let s = attack(&s, 0, "7H", 1);
    take(&s, 1)
}

#[test]
fn take_with_empty_stock_ends_round_with_loser() {
    let s = table(
        GameSettings::default(),
        &[&["7H"], &["8C", "9C"]],
        &[],
        Suit::Spades,
        0,
    );
    let s = attack(&s, 0, "7H", 1);
    let s = take(&s, 1);

    assert_eq!(s.history.len(), 1);
    let result = &s.history[0];
    assert_eq!(result.loser, Some(1));
    assert_eq!(result.winner, Some(0));
    assert_eq!(result.points_awarded, vec![0, 5]);
    assert_eq!(s.players[1].points, 5);

    // Multi-round mode below the threshold deals the next round
    assert_eq!(s.status, GameStatus::Active);
    assert_eq!(s.round.round_no, 2);
    assert_eq!(s.round.status, RoundStatus::Active);
    let prev = s.previous_round.as_deref().unwrap();
    assert_eq!(prev.status, RoundStatus::Finished);
    assert_eq!(prev.player_status[0], PlayerStatus::Finished);
}

#[test]
fn single_round_mode_finishes_immediately() {
    let settings = GameSettings::default().with_multi_round_mode(false);
    let s = table(settings, &[&["7H"], &["8C", "9C"]], &[], Suit::Spades, 0);
    let s = attack(&s, 0, "7H", 1);
    let s = take(&s, 1);
    assert_eq!(s.status, GameStatus::Finished);
    assert_eq!(s.fool, Some(1));
    assert_eq!(s.round.status, RoundStatus::Finished);
}

#[test]
fn five_five_five_reaches_threshold() {
    let settings = GameSettings::default().with_max_points(15);
    let mut s = GameState::new(GAME_ID, &players(2), settings, 7).unwrap();
    for round in 1..=3u32 {
        assert_eq!(s.status, GameStatus::Active);
        assert_eq!(s.round.round_no, round);
        s = seat_one_loses(&s);
        assert_eq!(s.players[1].points, 5 * round);
    }
    assert_eq!(s.status, GameStatus::Finished);
    assert_eq!(s.fool, Some(1));
    assert_eq!(s.history.len(), 3);
}

#[test]
fn simultaneous_exhaustion_is_a_no_loser_round() {
    let s = table(
        GameSettings::default(),
        &[&["7H"], &["TH"]],
        &[],
        Suit::Spades,
        0,
    );
    let s = attack(&s, 0, "7H", 1);
    let s = defend(&s, 1, "TH");
    let result = &s.history[0];
    assert_eq!(result.loser, None);
    assert_eq!(result.winner, Some(0));
    assert_eq!(result.points_awarded, vec![0, 0]);
    assert_eq!(s.round.round_no, 2);
}

#[test]
fn refill_goes_attackers_first_defender_last() {
    let settings = GameSettings::default().with_starting_hand_size(3);
    let s = table(
        settings,
        &[&["7H", "8C"], &["TH", "9D"], &["QC"]],
        &["6S", "AH", "KH", "QH", "JH"],
        Suit::Spades,
        0,
    );
    let s = attack(&s, 0, "7H", 1);
    let s = defend(&s, 1, "TH");
    let s = pass(&s, 0);
    let s = pass(&s, 2);

    assert_eq!(s.round.hands[0], cards(&["8C", "JH", "QH"]));
    assert_eq!(s.round.hands[2], cards(&["QC", "KH", "AH"]));
    // Defender only got the bottom card
    assert_eq!(s.round.hands[1], cards(&["9D", "6S"]));
    assert!(s.round.stock.is_empty());
}

#[test]
fn next_attacker_after_beat_is_defender() {
    let s = table(
        GameSettings::default(),
        &[&["7H", "8C"], &["TH", "9D"], &["QC", "KC"]],
        &[],
        Suit::Spades,
        0,
    );
    let s = attack(&s, 0, "7H", 1);
    let s = defend(&s, 1, "TH");
    let s = pass(&s, 0);
    let s = pass(&s, 2);
    assert_eq!(s.round.next_attacker, 1);
}

#[test]
fn next_round_recomputes_starting_attacker() {
    let s = table(
        GameSettings::default(),
        &[&["7H"], &["8C", "9C"], &["TC"]],
        &[],
        Suit::Spades,
        0,
    );
    let s = attack(&s, 0, "7H", 1);
    let s = take(&s, 1);
    // Seat 0 is out; seats 1 and 2 still hold cards, the round goes on
    assert_eq!(s.round.round_no, 1);
    assert_eq!(s.round.next_attacker, 2);

    let s = attack(&s, 2, "TC", 1);
    let s = take(&s, 1);
    assert_eq!(s.history.len(), 1);
    assert_eq!(s.history[0].loser, Some(1));
    assert_eq!(s.round.round_no, 2);
    assert_eq!(
        s.round.next_attacker as usize,
        starting_attacker(&s.round.hands, s.round.trump)
    );
}

#[test]
fn same_seed_same_game() {
    let a = GameState::new(GAME_ID, &players(3), GameSettings::default(), 99).unwrap();
    let b = GameState::new(GAME_ID, &players(3), GameSettings::default(), 99).unwrap();
    assert_eq!(a, b);
    let c = GameState::new(GAME_ID, &players(3), GameSettings::default(), 100).unwrap();
    assert_ne!(a.round.hands, c.round.hands);
}

#[test]
fn duplicate_players_are_rejected() {
    let err = GameState::new(GAME_ID, &[5, 6, 5], GameSettings::default(), 1).unwrap_err();
    assert_eq!(
        err.code(),
        crate::errors::error_code::ErrorCode::DuplicatePlayer
    );
}

#[test]
fn winner_is_whoever_ran_out_first_not_who_attacked_first() {
    let s = table(
        GameSettings::default(),
        &[&["7H", "8H"], &["TH", "8C", "JH", "6D"], &["7C"], &["9D"]],
        &[],
        Suit::Spades,
        0,
    );
    let s = attack(&s, 0, "7H", 1);
    let s = defend(&s, 1, "TH");
    // Seat 2 sheds its only card before the opener sheds its second
    let s = attack(&s, 2, "7C", 1);
    let s = defend(&s, 1, "8C");
    let s = attack(&s, 0, "8H", 1);
    let s = defend(&s, 1, "JH");
    let s = pass(&s, 3);

    assert!(s.round.turn.is_none());
    assert_eq!(s.round.status, RoundStatus::Active);
    assert_eq!(s.round.winner, Some(2));
    assert_eq!(s.round.finish_order, vec![2, 0]);
    assert_eq!(s.round.player_status[2], PlayerStatus::Finished);
    assert_eq!(s.round.player_status[0], PlayerStatus::Finished);
    assert_eq!(s.round.turns.last().unwrap().emptied, vec![2, 0]);
    check_invariants(&s).unwrap();
}
