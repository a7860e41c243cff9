//! Players quitting mid-game.

use crate::domain::state::{PlayerStatus, TurnStatus};
use crate::domain::test_state_helpers::*;
use crate::domain::{Action, GameSettings, GameStatus, Suit};
use crate::errors::domain::MoveKind;

fn three_player_table(settings: GameSettings) -> crate::domain::GameState {
    table(
        settings,
        &[&["7H", "8C"], &["TH", "9D"], &["QC", "KC"]],
        &[],
        Suit::Spades,
        0,
    )
}

#[test]
fn defender_leaving_abandons_turn() {
    let s = three_player_table(GameSettings::default());
    let s = attack(&s, 0, "7H", 1);
    let s = act(&s, 1, Action::Leave);

    assert!(s.players[1].left);
    assert_eq!(s.round.player_status[1], PlayerStatus::Left);
    assert!(s.round.hands[1].is_empty());
    assert!(s.round.turn.is_none());
    assert_eq!(s.round.turns[0].status, TurnStatus::DefenderBeat);
    for card in ["7H", "TH", "9D"] {
        assert!(s.round.discarded.contains(&c(card)), "{card} not discarded");
    }
    assert_eq!(s.round.next_attacker, 2);
    assert_eq!(s.round.left_this_round, vec![1]);

    let err = reject(&s, 1, Action::Pass);
    assert_eq!(err.move_kind(), Some(&MoveKind::PlayerNotActive));
    let err = reject(&s, 1, Action::Leave);
    assert_eq!(err.move_kind(), Some(&MoveKind::PlayerNotActive));
}

#[test]
fn last_opponent_leaving_ends_game_without_fool() {
    let s = table(
        GameSettings::default(),
        &[&["7H", "8C"], &["TH", "9D"]],
        &["6S", "AC"],
        Suit::Spades,
        0,
    );
    let s = attack(&s, 0, "7H", 1);
    let s = act(&s, 0, Action::Leave);

    assert_eq!(s.status, GameStatus::Finished);
    assert_eq!(s.fool, None);
    assert_eq!(s.round.loser, None);
    assert_eq!(s.history[0].points_awarded, vec![1, 0]);
    assert_eq!(s.players[0].points, 1);

    let err = reject(&s, 1, Action::Pass);
    assert_eq!(err.move_kind(), Some(&MoveKind::GameFinished));
}

#[test]
fn opener_leaving_closes_turn_when_only_they_could_attack() {
    let s = three_player_table(GameSettings::default().with_anyone_can_attack(false));
    let s = attack(&s, 0, "7H", 1);
    let s = defend(&s, 1, "TH");
    assert!(s.round.turn.is_some());

    let s = act(&s, 0, Action::Leave);
    assert!(s.round.turn.is_none());
    assert_eq!(s.round.turns[0].status, TurnStatus::DefenderBeat);
    assert_eq!(s.round.next_attacker, 1);
}

#[test]
fn lone_attack_is_withdrawn_when_its_attacker_leaves() {
    let s = three_player_table(GameSettings::default());
    let s = attack(&s, 0, "7H", 1);
    let s = act(&s, 0, Action::Leave);

    // Nothing is left on the table, so the turn is over
    assert!(s.round.turn.is_none());
    let closed = s.round.turns.last().unwrap();
    assert_eq!(closed.status, TurnStatus::DefenderBeat);
    assert!(closed.draws.is_empty());
    assert!(s.round.discarded.contains(&c("7H")));
    assert_eq!(s.round.next_attacker, 1);
    assert_eq!(s.round.hand(1).len(), 2);
    check_invariants(&s).unwrap();
}

#[test]
fn leaver_pending_attack_is_discarded_others_stay() {
    let s = table(
        GameSettings::default(),
        &[&["7H", "8C"], &["TH", "9D", "AH"], &["7C", "KC"]],
        &[],
        Suit::Spades,
        0,
    );
    let s = attack(&s, 0, "7H", 1);
    let s = attack(&s, 2, "7C", 1);
    let s = act(&s, 2, Action::Leave);

    let turn = s.round.turn.as_ref().unwrap();
    assert_eq!(turn.draws.len(), 1);
    assert_eq!(turn.draws[0].attacking, c("7H"));
    assert!(s.round.discarded.contains(&c("7C")));
    check_invariants(&s).unwrap();

    // The defender answers only what the remaining attacker put down
    let s = defend(&s, 1, "TH");
    let s = pass(&s, 0);
    assert!(s.round.turn.is_none());
    assert_eq!(s.round.next_attacker, 1);
    check_invariants(&s).unwrap();
}

#[test]
fn next_attacker_leaving_moves_the_lead() {
    let s = three_player_table(GameSettings::default());
    let s = act(&s, 0, Action::Leave);
    assert_eq!(s.round.next_attacker, 1);
    assert_eq!(s.status, GameStatus::Active);
}

#[test]
fn leaver_sits_out_following_rounds() {
    let s = three_player_table(GameSettings::default());
    let s = act(&s, 2, Action::Leave);
    // Seat 0 sheds both cards over two turns while seat 1 keeps taking
    let s = attack(&s, 0, "7H", 1);
    let s = take(&s, 1);
    // Seat 1 took, so the lead skips back to seat 0
    assert_eq!(s.round.next_attacker, 0);
    let s = attack(&s, 0, "8C", 1);
    let s = take(&s, 1);

    assert_eq!(s.history.len(), 1);
    assert_eq!(s.history[0].loser, Some(1));
    assert_eq!(s.history[0].points_awarded, vec![0, 5, 1]);
    assert_eq!(s.round.round_no, 2);
    assert_eq!(s.round.player_status[2], PlayerStatus::Left);
    assert!(s.round.hands[2].is_empty());
    assert!(s.round.left_this_round.is_empty());
}
